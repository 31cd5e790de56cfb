//! Column labels and direction values of the Seoul source datasets.
//!
//! Every locale-specific string the pipeline touches lives here, so the
//! aggregation code never embeds a Korean literal directly.

use serde::{Serialize, Serializer};
use std::fmt;

// ── Passenger table columns ─────────────────────────────────────────────────
pub mod passenger {
    pub const DATE: &str = "날짜";
    pub const STATION: &str = "역명";
    pub const DIRECTION: &str = "구분";
}

// ── Direction values ────────────────────────────────────────────────────────
pub mod direction {
    pub const BOARDING: &str = "승차";
    pub const ALIGHTING: &str = "하차";
}

// ── Sales table columns ─────────────────────────────────────────────────────
pub mod sales {
    pub const ZONE_NAME: &str = "상권_코드_명";
    pub const REVENUE_SUFFIX: &str = "_매출_금액";
}

// ── Derived traffic columns ─────────────────────────────────────────────────
pub mod traffic {
    pub const TRAFFIC_SUFFIX: &str = "_유동인구";
}

/// Default target station (Dongdaemun).
pub const DEFAULT_STATION: &str = "동대문";

/// One of the six coarse time-of-day bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    Night,
    Morning,
    Lunch,
    Afternoon,
    Evening,
    Late,
}

impl Band {
    pub const ALL: [Band; 6] = [
        Band::Night,
        Band::Morning,
        Band::Lunch,
        Band::Afternoon,
        Band::Evening,
        Band::Late,
    ];

    /// Column label shared by the sales dataset and the banded tables.
    pub fn label(self) -> &'static str {
        match self {
            Band::Night => "시간대_00~06",
            Band::Morning => "시간대_06~11",
            Band::Lunch => "시간대_11~14",
            Band::Afternoon => "시간대_14~17",
            Band::Evening => "시간대_17~21",
            Band::Late => "시간대_21~24",
        }
    }

    /// Short hour range used in logs and chart output.
    pub fn short_name(self) -> &'static str {
        match self {
            Band::Night => "00-06",
            Band::Morning => "06-11",
            Band::Lunch => "11-14",
            Band::Afternoon => "14-17",
            Band::Evening => "17-21",
            Band::Late => "21-24",
        }
    }

    /// Hourly passenger columns that make up this band.
    pub fn hourly_columns(self) -> &'static [&'static str] {
        match self {
            Band::Night => &["06시 이전"],
            Band::Morning => &["06시-07시", "07시-08시", "08시-09시", "09시-10시", "10시-11시"],
            Band::Lunch => &["11시-12시", "12시-13시", "13시-14시"],
            Band::Afternoon => &["14시-15시", "15시-16시", "16시-17시"],
            Band::Evening => &["17시-18시", "18시-19시", "19시-20시", "20시-21시"],
            Band::Late => &["21시-22시", "22시-23시", "23시-24시"],
        }
    }

    /// Sales column holding this band's revenue, e.g. `시간대_00~06_매출_금액`.
    pub fn revenue_column(self) -> String {
        format!("{}{}", self.label(), sales::REVENUE_SUFFIX)
    }

    /// Column name of this band's total traffic, e.g. `시간대_00~06_유동인구`.
    pub fn traffic_column(self) -> String {
        format!("{}{}", self.label(), traffic::TRAFFIC_SUFFIX)
    }

    /// Position of the band in [`Band::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl Serialize for Band {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.short_name())
    }
}
