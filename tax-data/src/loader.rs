use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketTable, ScheduleError, TaxBracket, TaxSchedule};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a tax schedule.
#[derive(Debug, Error)]
pub enum ScheduleLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid schedule: {0}")]
    Invalid(#[from] ScheduleError),

    #[error("unsupported schedule file '{0}' (expected .toml or .csv)")]
    UnsupportedFormat(PathBuf),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for ScheduleLoadError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoadError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket CSV file.
///
/// - `upper_bound`: top of the bracket (empty for the unbounded last bracket)
/// - `rate`: the marginal rate as a fraction (e.g. 0.017 for 1.7%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket-only CSV files.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ScheduleLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Turn parsed records into a validated [`BracketTable`].
    pub fn table(records: &[BracketRecord]) -> Result<BracketTable, ScheduleLoadError> {
        let brackets = records
            .iter()
            .map(|r| TaxBracket {
                upper_bound: r.upper_bound,
                rate: r.rate,
            })
            .collect();

        Ok(BracketTable::new(brackets)?)
    }
}

/// Loader for complete schedules.
///
/// A `.toml` file carries the whole [`TaxSchedule`]. A `.csv` file only
/// carries brackets; name, currency and flat rates come from the built-in
/// Norwegian 2024 schedule.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse a full schedule from TOML text. Brackets and flat rates are
    /// validated while deserialising.
    pub fn from_toml_str(input: &str) -> Result<TaxSchedule, ScheduleLoadError> {
        Ok(toml::from_str(input)?)
    }

    /// Parse brackets from CSV and combine them with the built-in flat rates.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<TaxSchedule, ScheduleLoadError> {
        let records = BracketLoader::parse(reader)?;
        let table = BracketLoader::table(&records)?;
        Ok(TaxSchedule::norway_2024().with_brackets(table))
    }

    /// Load a schedule file, choosing the format by extension.
    pub fn from_path(path: &Path) -> Result<TaxSchedule, ScheduleLoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            std::fs::read_to_string(path).map_err(|source| ScheduleLoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let schedule = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&read()?)?,
            Some("csv") => {
                let mut schedule = Self::from_csv_reader(read()?.as_bytes())?;
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    schedule.name = stem.to_string();
                }
                schedule
            }
            _ => return Err(ScheduleLoadError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(
            path = %path.display(),
            name = %schedule.name,
            brackets = schedule.brackets.brackets().len(),
            "loaded tax schedule"
        );

        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const BRACKETS_CSV: &str = "\
upper_bound,rate
208050,0.0
292850,0.017
670000,0.04
937900,0.136
1350000,0.166
,0.176
";

    const SMALL_TOML: &str = r#"
name = "Flat-ish"
currency = "SEK"

[flat_rates]
national_insurance = "0.07"
general_tax = "0.2"

[[brackets]]
upper_bound = "100000"
rate = "0"

[[brackets]]
rate = "0.2"
"#;

    #[test]
    fn parse_csv_single_record() {
        let csv = "upper_bound,rate\n208050,0.0";

        let records = BracketLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![BracketRecord {
                upper_bound: Some(dec!(208050)),
                rate: dec!(0.0),
            }]
        );
    }

    #[test]
    fn parse_csv_empty_upper_bound_is_unbounded() {
        let records = BracketLoader::parse(BRACKETS_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 6);
        assert_eq!(records[5].upper_bound, None);
        assert_eq!(records[5].rate, dec!(0.176));
    }

    #[test]
    fn parse_csv_tolerates_whitespace() {
        let csv = "upper_bound , rate\n 208050 , 0.0 \n , 0.2 \n";

        let records = BracketLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records[0].upper_bound, Some(dec!(208050)));
        assert_eq!(records[1].upper_bound, None);
    }

    #[test]
    fn parse_csv_rejects_bad_rate() {
        let csv = "upper_bound,rate\n208050,abc";

        let result = BracketLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(ScheduleLoadError::CsvParse(_))));
    }

    #[test]
    fn table_matches_built_in_schedule() {
        let records = BracketLoader::parse(BRACKETS_CSV.as_bytes()).unwrap();

        let table = BracketLoader::table(&records).unwrap();

        assert_eq!(table, TaxSchedule::norway_2024().brackets);
    }

    #[test]
    fn table_rejects_missing_unbounded_bracket() {
        let csv = "upper_bound,rate\n100,0.1\n200,0.2";
        let records = BracketLoader::parse(csv.as_bytes()).unwrap();

        let result = BracketLoader::table(&records);

        assert!(matches!(
            result,
            Err(ScheduleLoadError::Invalid(
                ScheduleError::MissingUnboundedBracket
            ))
        ));
    }

    #[test]
    fn from_csv_reader_keeps_built_in_flat_rates() {
        let csv = "upper_bound,rate\n,0.1";

        let schedule = ScheduleLoader::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(schedule.brackets.brackets().len(), 1);
        assert_eq!(schedule.flat_rates.national_insurance(), dec!(0.078));
        assert_eq!(schedule.currency, "NOK");
    }

    #[test]
    fn from_toml_str_reads_every_field() {
        let schedule = ScheduleLoader::from_toml_str(SMALL_TOML).unwrap();

        assert_eq!(schedule.name, "Flat-ish");
        assert_eq!(schedule.currency, "SEK");
        assert_eq!(schedule.flat_rates.general_tax(), dec!(0.2));
        assert_eq!(
            schedule.brackets.brackets(),
            &[
                TaxBracket::bounded(dec!(100000), dec!(0)),
                TaxBracket::unbounded(dec!(0.2)),
            ]
        );
    }

    #[test]
    fn from_toml_str_rejects_invalid_flat_rate() {
        let input = SMALL_TOML.replace("\"0.07\"", "\"1.07\"");

        let result = ScheduleLoader::from_toml_str(&input);

        assert!(matches!(result, Err(ScheduleLoadError::TomlParse(_))));
    }

    #[test]
    fn from_path_rejects_unknown_extension() {
        let result = ScheduleLoader::from_path(Path::new("schedule.json"));

        assert!(matches!(
            result,
            Err(ScheduleLoadError::UnsupportedFormat(_))
        ));
    }
}
