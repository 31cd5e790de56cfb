//! Joins boarding and alighting rows into total traffic per station and date.

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info};

use crate::bands::{BandedRecord, overflow};
use crate::error::PipelineError;
use crate::schema::{Band, direction};

/// How to treat several rows sharing a (date, station, direction) key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with [`PipelineError::DuplicateKey`].
    #[default]
    Reject,
    /// Sum the duplicates into one row before joining.
    Sum,
}

/// Boarding plus alighting traffic for one (date, station) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficRecord {
    pub date: String,
    pub station: String,
    pub bands: [u64; 6],
}

impl TrafficRecord {
    pub fn band(&self, band: Band) -> u64 {
        self.bands[band.index()]
    }
}

type Key<'a> = (&'a str, &'a str);

/// Indexes one direction's rows by (date, station), keeping first-seen order.
fn index_direction<'a>(
    records: &'a [BandedRecord],
    dir: &str,
    policy: DuplicatePolicy,
) -> Result<(Vec<Key<'a>>, HashMap<Key<'a>, [u64; 6]>)> {
    let mut order = Vec::new();
    let mut totals: HashMap<Key<'a>, [u64; 6]> = HashMap::new();

    for rec in records.iter().filter(|r| r.direction == dir) {
        let key = (rec.date.as_str(), rec.station.as_str());
        match totals.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(rec.bands);
                order.push(key);
            }
            Entry::Occupied(mut slot) => match policy {
                DuplicatePolicy::Reject => {
                    return Err(PipelineError::DuplicateKey {
                        date: rec.date.clone(),
                        station: rec.station.clone(),
                        direction: dir.to_string(),
                    }
                    .into());
                }
                DuplicatePolicy::Sum => {
                    for ((acc, v), band) in slot.get_mut().iter_mut().zip(rec.bands).zip(Band::ALL) {
                        *acc = acc
                            .checked_add(v)
                            .ok_or_else(|| overflow(&rec.date, &rec.station, band))?;
                    }
                }
            },
        }
    }

    Ok((order, totals))
}

/// Inner-joins boarding and alighting rows on (date, station) and sums each band.
///
/// Pairs seen in only one direction are dropped. Rows with any other
/// direction value are ignored. Output follows boarding row order.
#[tracing::instrument(skip_all, fields(rows = records.len(), policy = ?policy))]
pub fn calculate_total_traffic(
    records: &[BandedRecord],
    policy: DuplicatePolicy,
) -> Result<Vec<TrafficRecord>> {
    let (board_order, boarding) = index_direction(records, direction::BOARDING, policy)?;
    let (_, alighting) = index_direction(records, direction::ALIGHTING, policy)?;

    let mut out = Vec::with_capacity(board_order.len());
    for key in board_order {
        let Some(alight) = alighting.get(&key) else {
            continue;
        };
        let board = &boarding[&key];

        let mut bands = [0u64; 6];
        for (i, (total, band)) in bands.iter_mut().zip(Band::ALL).enumerate() {
            *total = board[i]
                .checked_add(alight[i])
                .ok_or_else(|| overflow(key.0, key.1, band))?;
        }

        out.push(TrafficRecord {
            date: key.0.to_string(),
            station: key.1.to_string(),
            bands,
        });
    }

    debug!(
        boarding = boarding.len(),
        alighting = alighting.len(),
        "Direction subsets indexed"
    );
    info!(joined = out.len(), "Traffic rows joined");
    Ok(out)
}
