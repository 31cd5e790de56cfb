//! Collapses hourly passenger columns into the six time-of-day bands.

use anyhow::Result;
use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::loader::{RawTable, cell, is_missing};
use crate::schema::{Band, passenger};

/// One passenger row with its hourly counts summed into bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandedRecord {
    pub date: String,
    pub station: String,
    pub direction: String,
    pub bands: [u64; 6],
}

impl BandedRecord {
    pub fn band(&self, band: Band) -> u64 {
        self.bands[band.index()]
    }
}

/// Result of banding a passenger table.
#[derive(Debug, Default)]
pub struct BandingReport {
    pub records: Vec<BandedRecord>,
    /// Bands with none of their hourly columns present; zero for every row.
    pub missing_bands: Vec<Band>,
}

/// Sums each band's hourly columns row-wise.
///
/// Columns are resolved once per band. A band whose hourly columns are all
/// absent is logged and left at zero; a band with only some of them present
/// sums what exists.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn group_time_bands(table: &RawTable) -> Result<BandingReport> {
    let date_idx = table.require(passenger::DATE)?;
    let station_idx = table.require(passenger::STATION)?;
    let direction_idx = table.require(passenger::DIRECTION)?;

    let mut missing_bands = Vec::new();
    let band_columns: Vec<Vec<(usize, &str)>> = Band::ALL
        .iter()
        .map(|&band| {
            let present: Vec<(usize, &str)> = band
                .hourly_columns()
                .iter()
                .filter_map(|&name| table.column(name).map(|idx| (idx, name)))
                .collect();

            if present.is_empty() {
                warn!(
                    band = band.label(),
                    expected = ?band.hourly_columns(),
                    "No hourly columns found for band, defaulting to zero"
                );
                missing_bands.push(band);
            } else {
                debug!(band = band.label(), columns = present.len(), "Band columns resolved");
            }

            present
        })
        .collect();

    let mut records = Vec::with_capacity(table.len());
    for (row_no, row) in table.rows().iter().enumerate() {
        let date = cell(row, date_idx);
        let station = cell(row, station_idx);

        let mut bands = [0u64; 6];
        for ((slot, columns), band) in bands.iter_mut().zip(&band_columns).zip(Band::ALL) {
            for &(idx, name) in columns {
                let count = parse_count(cell(row, idx), row_no + 1, name)?;
                *slot = slot
                    .checked_add(count)
                    .ok_or_else(|| overflow(date, station, band))?;
            }
        }

        records.push(BandedRecord {
            date: date.to_string(),
            station: station.to_string(),
            direction: cell(row, direction_idx).to_string(),
            bands,
        });
    }

    Ok(BandingReport {
        records,
        missing_bands,
    })
}

/// Error for a band total that does not fit in a `u64`.
pub(crate) fn overflow(date: &str, station: &str, band: Band) -> anyhow::Error {
    PipelineError::CountOverflow {
        date: date.to_string(),
        station: station.to_string(),
        band: band.label().to_string(),
    }
    .into()
}

/// Parses an hourly passenger count. Blank and NA cells count as zero and
/// thousands separators are ignored.
pub fn parse_count(value: &str, row: usize, column: &str) -> Result<u64> {
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    if is_missing(&cleaned) {
        return Ok(0);
    }

    let invalid = || PipelineError::InvalidNumber {
        row,
        column: column.to_string(),
        value: value.to_string(),
    };

    // Some exports write integer counts as "123.0"
    match cleaned.parse::<u64>() {
        Ok(n) => Ok(n),
        Err(_) => match cleaned.parse::<f64>() {
            Ok(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(f as u64),
            _ => Err(invalid().into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_hour_headers() -> Vec<&'static str> {
        let mut headers = vec![passenger::DATE, passenger::STATION, passenger::DIRECTION];
        for band in Band::ALL {
            headers.extend_from_slice(band.hourly_columns());
        }
        headers
    }

    fn row(date: &str, station: &str, direction: &str, counts: &[u64]) -> Vec<String> {
        let mut cells = vec![date.to_string(), station.to_string(), direction.to_string()];
        cells.extend(counts.iter().map(|c| c.to_string()));
        cells
    }

    #[test]
    fn test_band_sum_equals_constituents() {
        let headers = all_hour_headers();
        let counts: Vec<u64> = (1..=19).collect();
        let table = RawTable::from_rows(&headers, vec![row("2024-01-01", "동대문", "승차", &counts)]);

        let report = group_time_bands(&table).unwrap();
        let rec = &report.records[0];

        assert!(report.missing_bands.is_empty());
        assert_eq!(rec.band(Band::Night), 1);
        assert_eq!(rec.band(Band::Morning), 2 + 3 + 4 + 5 + 6);
        assert_eq!(rec.band(Band::Lunch), 7 + 8 + 9);
        assert_eq!(rec.band(Band::Afternoon), 10 + 11 + 12);
        assert_eq!(rec.band(Band::Evening), 13 + 14 + 15 + 16);
        assert_eq!(rec.band(Band::Late), 17 + 18 + 19);
        assert_eq!(rec.direction, "승차");
    }

    #[test]
    fn test_missing_all_columns_defaults_to_zero() {
        let headers: Vec<&str> = all_hour_headers()
            .into_iter()
            .filter(|h| !Band::Late.hourly_columns().contains(h))
            .collect();
        let counts = vec![1u64; headers.len() - 3];
        let table = RawTable::from_rows(
            &headers,
            vec![
                row("2024-01-01", "동대문", "승차", &counts),
                row("2024-01-02", "동대문", "승차", &counts),
            ],
        );

        let report = group_time_bands(&table).unwrap();

        assert_eq!(report.missing_bands, vec![Band::Late]);
        assert!(report.records.iter().all(|r| r.band(Band::Late) == 0));
        assert_eq!(report.records[0].band(Band::Morning), 5);
    }

    #[test]
    fn test_partial_presence_sums_existing_only() {
        let headers = vec![
            passenger::DATE,
            passenger::STATION,
            passenger::DIRECTION,
            "06시-07시",
            "09시-10시",
        ];
        let table = RawTable::from_rows(
            &headers,
            vec![row("2024-01-01", "동대문", "하차", &[40, 2])],
        );

        let report = group_time_bands(&table).unwrap();

        assert_eq!(report.records[0].band(Band::Morning), 42);
        assert!(!report.missing_bands.contains(&Band::Morning));
        assert_eq!(report.missing_bands.len(), 5);
    }

    #[test]
    fn test_missing_key_column_is_error() {
        let table = RawTable::from_rows(&["역명", "구분"], vec![]);
        let err = group_time_bands(&table).unwrap_err();

        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::MissingColumn("날짜".to_string()))
        );
    }

    #[test]
    fn test_parse_count_formats() {
        assert_eq!(parse_count("", 1, "c").unwrap(), 0);
        assert_eq!(parse_count("NaN", 1, "c").unwrap(), 0);
        assert_eq!(parse_count("1,234", 1, "c").unwrap(), 1234);
        assert_eq!(parse_count("17.0", 1, "c").unwrap(), 17);
        assert!(parse_count("abc", 1, "c").is_err());
        assert!(parse_count("-3", 1, "c").is_err());
        assert!(parse_count("2.5", 1, "c").is_err());
    }

    #[test]
    fn test_parse_count_rejects_out_of_range() {
        assert!(parse_count("1e30", 1, "c").is_err());
        assert!(parse_count("inf", 1, "c").is_err());
        assert!(parse_count("18446744073709551616", 1, "c").is_err());
        assert_eq!(parse_count("1e3", 1, "c").unwrap(), 1000);
    }

    #[test]
    fn test_band_sum_overflow_is_error() {
        let headers = vec![
            passenger::DATE,
            passenger::STATION,
            passenger::DIRECTION,
            "11시-12시",
            "12시-13시",
        ];
        let table = RawTable::from_rows(
            &headers,
            vec![row("2024-01-01", "동대문", "승차", &[u64::MAX, 1])],
        );

        let err = group_time_bands(&table).unwrap_err();

        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::CountOverflow {
                date: "2024-01-01".to_string(),
                station: "동대문".to_string(),
                band: Band::Lunch.label().to_string(),
            })
        );
    }

    #[test]
    fn test_parse_count_error_names_cell() {
        let err = parse_count("n.a.", 7, "08시-09시").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid number 'n.a.' in column '08시-09시' at row 7"
        );
    }
}
