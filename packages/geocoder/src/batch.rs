//! Batch geocoding with bounded concurrency.

use std::sync::Arc;

use futures::stream::{self, StreamExt as _};
use maptools_address::SuffixTable;

use crate::progress::ProgressCallback;
use crate::row::{GeocodedRow, RowDetail, RowOutcome, geocode_address};
use crate::{GeocodeOptions, Geocoder};

/// Per-outcome counts for a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    /// Rows processed.
    pub total: u64,
    /// Rows with a geometry.
    pub matched: u64,
    /// Rows whose address could not be parsed.
    pub unparseable: u64,
    /// Rows the geocoder could not match.
    pub no_match: u64,
    /// Rows where the geocoder failed or timed out.
    pub failed: u64,
    /// Parsed rows with no recognized street suffix.
    pub suffix_misses: u64,
}

impl BatchStats {
    /// Counts one row.
    pub fn record(&mut self, row: &GeocodedRow) {
        self.total += 1;
        match row.outcome {
            RowOutcome::Matched => self.matched += 1,
            RowOutcome::Unparseable => self.unparseable += 1,
            RowOutcome::NoMatch => self.no_match += 1,
            RowOutcome::Failed => self.failed += 1,
        }
        if row.parsed.as_ref().is_some_and(|p| p.is_missing_suffix()) {
            self.suffix_misses += 1;
        }
    }
}

/// Geocodes every address, keeping at most `concurrency` requests in
/// flight.
///
/// Rows are returned in input order. A bad address only affects its own
/// row; the batch always runs to completion.
pub async fn geocode_batch<G, S>(
    geocoder: &G,
    table: &SuffixTable,
    addresses: &[S],
    options: &GeocodeOptions,
    detail: RowDetail,
    concurrency: usize,
    progress: Option<&Arc<dyn ProgressCallback>>,
) -> (Vec<GeocodedRow>, BatchStats)
where
    G: Geocoder + ?Sized,
    S: AsRef<str>,
{
    log::info!(
        "Geocoding {} addresses (concurrency={concurrency})...",
        addresses.len()
    );
    if let Some(p) = progress {
        p.set_total(addresses.len() as u64);
    }

    let mut results = stream::iter(
        addresses
            .iter()
            .map(|raw| geocode_address(geocoder, table, raw.as_ref(), options, detail)),
    )
    .buffered(concurrency.max(1));

    let mut rows = Vec::with_capacity(addresses.len());
    let mut stats = BatchStats::default();

    while let Some(row) = results.next().await {
        stats.record(&row);
        if let Some(p) = progress {
            p.inc(1);
        }
        rows.push(row);
    }

    log::info!(
        "Geocoded {}/{} addresses ({} unparseable, {} unmatched, {} failed, {} without street type)",
        stats.matched,
        stats.total,
        stats.unparseable,
        stats.no_match,
        stats.failed,
        stats.suffix_misses
    );
    if let Some(p) = progress {
        p.finish(format!("{}/{} geocoded", stats.matched, stats.total));
    }

    (rows, stats)
}
