use crate::bucket::TemperatureCategory;
use crate::mapping;
use chrono::NaiveDate;
use log::{Log, Metadata, Record as LogRecord};
use serde::Serialize;

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// One day of bike-share activity.
///
/// `yr` holds the calendar year (already mapped from the dataset's 0/1 code).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub dteday: NaiveDate,
    pub season: u8,
    pub yr: i32,
    pub mnth: u32,
    pub weekday: u8,
    pub workingday: bool,
    pub temp: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

/// Mean daily rentals for one (season, weekday) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySeasonRow {
    pub season: u8,
    pub weekday: u8,
    pub mean_cnt: f64,
    pub day_name: String,
    pub season_name: String,
}

/// Total rentals for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotalRow {
    pub month: u32,
    pub total_cnt: u64,
    pub month_name: String,
}

/// Average working-day rentals for one user type in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTypeAverageRow {
    pub year: i32,
    pub user_type: String,
    pub average_rentals: f64,
}

/// Total rentals within one temperature category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureTotalRow {
    pub category: String,
    pub total_cnt: u64,
}

/// Metric cards for the user-type chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserTypeMetrics {
    pub casual: f64,
    pub registered: f64,
}

/// Metric cards for the temperature chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemperatureMetrics {
    pub dingin: u64,
    pub normal: u64,
    pub panas: u64,
}

impl TemperatureMetrics {
    pub fn get(&self, category: TemperatureCategory) -> u64 {
        match category {
            TemperatureCategory::Dingin => self.dingin,
            TemperatureCategory::Normal => self.normal,
            TemperatureCategory::Panas => self.panas,
        }
    }
}

/// Every table and metric shown for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub weekday_season: Vec<WeekdaySeasonRow>,
    pub month_season: Vec<MonthTotalRow>,
    pub avg_rentals: Vec<UserTypeAverageRow>,
    pub by_temperature: Vec<TemperatureTotalRow>,
    pub user_type_metrics: UserTypeMetrics,
    pub temperature_metrics: TemperatureMetrics,
}

/// Filter selection driving one dashboard computation
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub years: Vec<i32>,
    pub trend_season: u8,
    pub temperature_season: u8,
}

/// Season selector for the command line
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SeasonArg {
    Semi,
    Panas,
    Gugur,
    Dingin,
}

impl SeasonArg {
    pub fn code(self) -> u8 {
        match self {
            SeasonArg::Semi => 1,
            SeasonArg::Panas => 2,
            SeasonArg::Gugur => 3,
            SeasonArg::Dingin => 4,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            years: mapping::YEARS.to_vec(),
            trend_season: SeasonArg::Semi.code(),
            temperature_season: SeasonArg::Semi.code(),
        }
    }
}
