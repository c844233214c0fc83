use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};

/// Bin edges over the normalized temperature, left-closed and right-open.
/// Normalized values are degrees Celsius divided by 41.
pub const TEMP_BIN_EDGES: [f64; 4] = [0.0, 20.0 / 41.0, 30.0 / 41.0, 0.9];

/// Temperature category, ordered from coldest to hottest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TemperatureCategory {
    Dingin,
    Normal,
    Panas,
}

impl TemperatureCategory {
    pub const ALL: [TemperatureCategory; 3] = [Self::Dingin, Self::Normal, Self::Panas];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dingin => "Dingin",
            Self::Normal => "Normal",
            Self::Panas => "Panas",
        }
    }
}

/// Places a normalized temperature into its category.
///
/// Returns `Ok(None)` for values outside `[0, 0.9)`; those are excluded
/// rather than clamped into the nearest bin.
///
/// # Errors
/// Returns `DashboardError::Data` if `temp` is NaN or infinite.
pub fn bucketize(temp: f64) -> Result<Option<TemperatureCategory>> {
    if !temp.is_finite() {
        return Err(DashboardError::Data(format!(
            "Temperature is not finite: {}",
            temp
        )));
    }

    let category = TEMP_BIN_EDGES
        .windows(2)
        .zip(TemperatureCategory::ALL)
        .find(|(edges, _)| temp >= edges[0] && temp < edges[1])
        .map(|(_, category)| category);

    Ok(category)
}
