//! CSV batch normalization.
//!
//! Reads a CSV with an address column and writes one output row per input
//! row with the parsed components. Rows that fail to parse are logged and
//! written with an `error` value; they never stop the batch.

use std::io;
use std::sync::Arc;

use maptools_address::{AddressParser, BatchConfig, ParsedAddress};
use maptools_geocoder::progress::ProgressCallback;
use serde::Serialize;
use thiserror::Error;

/// Errors that abort a batch (bad input file, not bad addresses).
#[derive(Debug, Error)]
pub enum BatchError {
    /// Reading or writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configured address column is not in the header row.
    #[error("Column {column:?} not found in input header")]
    MissingColumn {
        /// The configured column name.
        column: String,
    },

    /// The configured delimiter is not a single ASCII character.
    #[error("Delimiter {delimiter:?} is not a single ASCII character")]
    InvalidDelimiter {
        /// The configured delimiter.
        delimiter: char,
    },
}

/// Counts from one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseSummary {
    /// Rows read.
    pub total: u64,
    /// Rows parsed successfully.
    pub parsed: u64,
    /// Rows that failed to parse.
    pub failed: u64,
    /// Parsed rows with no recognized street suffix.
    pub suffix_misses: u64,
}

#[derive(Debug, Default, Serialize)]
struct OutputRecord {
    input: String,
    lookup: Option<String>,
    street: Option<String>,
    suffix: Option<String>,
    unit: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
    error: Option<String>,
}

impl OutputRecord {
    fn parsed(input: &str, addr: ParsedAddress) -> Self {
        Self {
            input: input.to_string(),
            lookup: Some(addr.lookup),
            street: Some(addr.street),
            suffix: Some(addr.suffix),
            unit: addr.unit,
            city: Some(addr.city),
            state: Some(addr.state),
            zip: Some(addr.zip),
            error: None,
        }
    }

    fn failed(input: &str, error: String) -> Self {
        Self {
            input: input.to_string(),
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Normalizes the address column of every CSV row from `reader` into
/// `writer`.
///
/// # Errors
///
/// Returns [`BatchError`] if the CSV cannot be read or written, the
/// address column is missing, or the delimiter is invalid. Individual
/// unparseable addresses are not errors.
pub fn normalize_csv<R: io::Read, W: io::Write>(
    parser: &AddressParser,
    config: &BatchConfig,
    reader: R,
    writer: W,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<ParseSummary, BatchError> {
    let delimiter = u8::try_from(config.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(BatchError::InvalidDelimiter {
            delimiter: config.delimiter,
        })?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);
    let column = rdr
        .headers()?
        .iter()
        .position(|h| h.trim() == config.address_column)
        .ok_or_else(|| BatchError::MissingColumn {
            column: config.address_column.clone(),
        })?;

    let records: Vec<_> = rdr.records().collect();
    progress.set_total(records.len() as u64);

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    let mut summary = ParseSummary::default();

    for record in records {
        summary.total += 1;

        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Unreadable row: {e}");
                summary.failed += 1;
                wtr.serialize(OutputRecord::failed("", e.to_string()))?;
                progress.inc(1);
                continue;
            }
        };
        let raw = record.get(column).unwrap_or_default();

        let output = match parser.parse(raw) {
            Ok(addr) => {
                summary.parsed += 1;
                if addr.is_missing_suffix() {
                    summary.suffix_misses += 1;
                }
                OutputRecord::parsed(raw, addr)
            }
            Err(e) => {
                log::warn!("Invalid address {raw:?}: {e}");
                summary.failed += 1;
                OutputRecord::failed(raw, e.to_string())
            }
        };

        wtr.serialize(output)?;
        progress.inc(1);
    }

    wtr.flush()?;

    log::info!(
        "Parsed {}/{} addresses ({} failed, {} without street type)",
        summary.parsed,
        summary.total,
        summary.failed,
        summary.suffix_misses
    );
    progress.finish(format!("{}/{} parsed", summary.parsed, summary.total));

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use maptools_geocoder::progress::null_progress;

    use super::*;

    fn run(input: &str, config: &BatchConfig) -> Result<(ParseSummary, String), BatchError> {
        let mut out = Vec::new();
        let summary = normalize_csv(
            &AddressParser::usps(),
            config,
            input.as_bytes(),
            &mut out,
            &null_progress(),
        )?;
        Ok((summary, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn normalizes_rows_and_continues_past_failures() {
        let input = "id,address\n\
                     1,\"179 Livingston St, 7th Fl, Brooklyn, NY 11201\"\n\
                     2,not an address\n\
                     3,\"123 Main, Springfield, IL 62701\"\n";

        let (summary, output) = run(input, &BatchConfig::default()).unwrap();

        assert_eq!(
            summary,
            ParseSummary {
                total: 3,
                parsed: 2,
                failed: 1,
                suffix_misses: 1,
            }
        );

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "input,lookup,street,suffix,unit,city,state,zip,error"
        );
        assert_eq!(
            lines[1],
            "\"179 Livingston St, 7th Fl, Brooklyn, NY 11201\",\"179 LIVINGSTON ST, Brooklyn, NY 11201\",179 LIVINGSTON ST,ST,7th Fl,Brooklyn,NY,11201,"
        );
        assert!(lines[2].starts_with("not an address,,,,,,,,"));
        assert!(lines[2].contains("Expected at least 3 comma-separated segments"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn malformed_row_is_written_as_failure() {
        let input = "id,address\n\
                     1,\"W 22 St, New York, NY 10011\"\n\
                     2,x,extra\n\
                     3,\"55 Broadway, New York, NY 10006\"\n";

        let (summary, output) = run(input, &BatchConfig::default()).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.parsed, 2);
        assert_eq!(summary.failed, 1);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("\"W 22 St, New York, NY 10011\""));
        assert!(lines[2].starts_with(",,,,,,,,"));
        assert!(lines[2].contains("3 fields"));
        assert!(lines[3].starts_with("\"55 Broadway, New York, NY 10006\""));
    }

    #[test]
    fn uses_configured_column_and_delimiter() {
        let config = BatchConfig {
            address_column: "location".to_string(),
            delimiter: ';',
            ..BatchConfig::default()
        };
        let input = "location;note\nW 22 St, New York, NY 10011;x\n";

        let (summary, output) = run(input, &config).unwrap();

        assert_eq!(summary.parsed, 1);
        assert!(output.contains("W 22ND ST, New York, NY 10011;W 22ND ST;ST;;New York;NY;10011;"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = run("id,addr\n1,x\n", &BatchConfig::default()).unwrap_err();
        assert!(matches!(err, BatchError::MissingColumn { column } if column == "address"));
    }

    #[test]
    fn non_ascii_delimiter_is_an_error() {
        let config = BatchConfig {
            delimiter: '§',
            ..BatchConfig::default()
        };
        assert!(matches!(
            run("address\n", &config),
            Err(BatchError::InvalidDelimiter { delimiter: '§' })
        ));
    }
}
