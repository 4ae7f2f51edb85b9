use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

pub const SHIFT_ID_SEPARATOR: char = '_';
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShiftIdError {
    #[error("shift identifier {0:?} has no date/time-band separator")]
    MissingSeparator(String),

    #[error("shift identifier {0:?} has an empty date or time band")]
    EmptyPart(String),
}

/// Composite shift key `DATE_TIMEBAND`, e.g. `10/02/2026_00-08`.
///
/// The text is kept verbatim so that the identifier written back to a store is
/// exactly the one read from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftId {
    date_part: String,
    band_part: String,
}

impl ShiftId {
    pub fn parse(raw: &str) -> Result<Self, ShiftIdError> {
        let raw = raw.trim();
        let (date_part, band_part) = raw
            .split_once(SHIFT_ID_SEPARATOR)
            .ok_or_else(|| ShiftIdError::MissingSeparator(raw.to_string()))?;
        if date_part.is_empty() || band_part.is_empty() {
            return Err(ShiftIdError::EmptyPart(raw.to_string()));
        }
        Ok(Self {
            date_part: date_part.to_string(),
            band_part: band_part.to_string(),
        })
    }

    pub fn date_part(&self) -> &str {
        &self.date_part
    }

    pub fn band_label(&self) -> &str {
        &self.band_part
    }

    /// Calendar date of the shift. Day and month may or may not be zero-padded.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.date_part)
    }

    pub fn time_band(&self) -> TimeBand {
        TimeBand::from_label(&self.band_part)
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date() == Some(date)
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SHIFT_ID_SEPARATOR}{}", self.date_part, self.band_part)
    }
}

impl TryFrom<String> for ShiftId {
    type Error = ShiftIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShiftId> for String {
    fn from(value: ShiftId) -> Self {
        value.to_string()
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One of the fixed daily periods. Labels outside the known set are kept and
/// ordered after the known ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeBand {
    Night,
    Morning,
    Afternoon,
    Evening,
    LateEvening,
    Other(String),
}

impl TimeBand {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "00-08" => Self::Night,
            "08-14" => Self::Morning,
            "14-18" => Self::Afternoon,
            "18-21" => Self::Evening,
            "21-24" => Self::LateEvening,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Night => "00-08",
            Self::Morning => "08-14",
            Self::Afternoon => "14-18",
            Self::Evening => "18-21",
            Self::LateEvening => "21-24",
            Self::Other(label) => label,
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            Self::Night => 1,
            Self::Morning => 2,
            Self::Afternoon => 3,
            Self::Evening => 4,
            Self::LateEvening => 5,
            Self::Other(_) => u8::MAX,
        }
    }
}

impl Ord for TimeBand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority()
            .cmp(&other.priority())
            .then_with(|| self.label().cmp(other.label()))
    }
}

impl PartialOrd for TimeBand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Remaining places as written in the roster. Anything that is not a finite,
/// positive number counts as zero. Fractions round up, so a shift is open
/// exactly when the written value is greater than zero.
pub fn coerce_capacity(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.ceil().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub id: ShiftId,
    pub capacity_remaining: u32,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.capacity_remaining > 0
    }
}
