pub mod bucket;
pub mod error;
pub mod load;
pub mod mapping;
pub mod melt;
pub mod structs;
pub mod transform;

// Re-export public API
pub use bucket::{TemperatureCategory, bucketize};
pub use error::{DashboardError, Result};
pub use load::{SummaryTable, read_day_csv, read_day_records, write_csv, write_json, write_parquet};
pub use structs::{
    Dashboard, DashboardConfig, MonthTotalRow, Record, SeasonArg, SimpleLogger,
    TemperatureMetrics, TemperatureTotalRow, UserTypeAverageRow, UserTypeMetrics,
    WeekdaySeasonRow,
};
pub use transform::{
    build_dashboard, create_avg_rentals, create_bytemp_df, create_cnt_df,
    create_month_season_df, filter_season, filter_years,
};
