use crate::error::{DashboardError, Result};

/// Weekday labels indexed by the dataset's weekday code (0 = Sunday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu",
];

/// Season labels for codes 1..=4.
pub const SEASON_NAMES: [&str; 4] = ["Semi", "Panas", "Gugur", "Dingin"];

/// Month labels for codes 1..=12.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Calendar years for year codes 0 and 1.
pub const YEARS: [i32; 2] = [2011, 2012];

fn unmapped(mapping: &'static str, code: impl ToString) -> DashboardError {
    DashboardError::UnmappedCode {
        mapping,
        code: code.to_string(),
    }
}

/// Returns the Indonesian day name for a weekday code in `0..=6`.
///
/// # Errors
/// Returns `DashboardError::UnmappedCode` for any other code.
pub fn weekday_name(code: u8) -> Result<&'static str> {
    WEEKDAY_NAMES
        .get(usize::from(code))
        .copied()
        .ok_or_else(|| unmapped("weekday", code))
}

/// Returns the Indonesian season name for a season code in `1..=4`.
///
/// # Errors
/// Returns `DashboardError::UnmappedCode` for any other code.
pub fn season_name(code: u8) -> Result<&'static str> {
    usize::from(code)
        .checked_sub(1)
        .and_then(|i| SEASON_NAMES.get(i))
        .copied()
        .ok_or_else(|| unmapped("season", code))
}

/// Returns the Indonesian month name for a month code in `1..=12`.
///
/// # Errors
/// Returns `DashboardError::UnmappedCode` for any other code.
pub fn month_name(code: u32) -> Result<&'static str> {
    (code as usize)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
        .ok_or_else(|| unmapped("month", code))
}

/// Maps the dataset's `yr` code (0 or 1) to its calendar year.
pub fn year_from_code(code: u8) -> Result<i32> {
    YEARS
        .get(usize::from(code))
        .copied()
        .ok_or_else(|| unmapped("year", code))
}

/// Inverse of [`year_from_code`].
pub fn year_code(year: i32) -> Result<u8> {
    YEARS
        .iter()
        .position(|&y| y == year)
        .map(|i| i as u8)
        .ok_or_else(|| unmapped("year", year))
}

/// Inverse of [`season_name`]: "Semi" -> 1 ... "Dingin" -> 4.
pub fn season_code(label: &str) -> Result<u8> {
    SEASON_NAMES
        .iter()
        .position(|&name| name == label)
        .map(|i| i as u8 + 1)
        .ok_or_else(|| unmapped("season", label))
}
