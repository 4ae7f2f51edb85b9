// Narrow open shifts to one day and order them for display.

use crate::modules::shifts::core::shift::{Shift, ShiftId};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub time_band: String,
    pub shift_reference: ShiftId,
    pub capacity_remaining: u32,
}

/// Open slots on `date`, ordered by time band. Unknown bands come last.
pub fn slots_for_date(shifts: &[Shift], date: NaiveDate) -> Vec<Slot> {
    let mut on_date: Vec<&Shift> = shifts.iter().filter(|s| s.id.is_on(date)).collect();
    on_date.sort_by_key(|s| s.id.time_band());
    on_date
        .into_iter()
        .map(|s| Slot {
            time_band: s.id.band_label().to_string(),
            shift_reference: s.id.clone(),
            capacity_remaining: s.capacity_remaining,
        })
        .collect()
}

/// Distinct dates that have at least one of the given shifts, ascending.
pub fn available_dates(shifts: &[Shift]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = shifts.iter().filter_map(|s| s.id.date()).collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Parse a date picked by the user: `DD/MM/YYYY` or ISO `YYYY-MM-DD`.
pub fn parse_user_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    crate::modules::shifts::core::shift::parse_date(text)
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
}
