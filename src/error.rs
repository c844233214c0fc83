use arrow_schema::ArrowError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parquet Error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow Error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Missing value in column {column} at row {row}")]
    MissingValue { column: &'static str, row: usize },
    #[error("Invalid value in column {column} at row {row}: {value}")]
    InvalidValue {
        column: &'static str,
        row: usize,
        value: String,
    },
    #[error("Unmapped {mapping} code: {code}")]
    UnmappedCode { mapping: &'static str, code: String },
    #[error("Data Error: {0}")]
    Data(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
