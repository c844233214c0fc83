use crate::error::{DashboardError, Result};
use crate::mapping::year_from_code;
use crate::structs::{
    MonthTotalRow, Record, TemperatureTotalRow, UserTypeAverageRow, WeekdaySeasonRow,
};
use arrow_array::{
    ArrayRef, Float64Array, Int32Array, RecordBatch, StringArray, UInt8Array, UInt32Array,
    UInt64Array,
};
use arrow_schema::{DataType, Field, Schema};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim, Writer};
use log::debug;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path, sync::Arc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns every dataset row must carry.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "dteday",
    "season",
    "yr",
    "mnth",
    "weekday",
    "workingday",
    "temp",
    "casual",
    "registered",
    "cnt",
];

/// One `day.csv` row before validation. Other columns in the file are ignored.
#[derive(Debug, Deserialize)]
struct RawDay {
    dteday: Option<String>,
    season: Option<u8>,
    yr: Option<u8>,
    mnth: Option<u32>,
    weekday: Option<u8>,
    workingday: Option<u8>,
    temp: Option<f64>,
    casual: Option<u32>,
    registered: Option<u32>,
    cnt: Option<u32>,
}

fn required<T>(value: Option<T>, column: &'static str, row: usize) -> Result<T> {
    value.ok_or(DashboardError::MissingValue { column, row })
}

impl RawDay {
    fn into_record(self, row: usize) -> Result<Record> {
        let date_str = required(self.dteday, "dteday", row)?;
        let dteday = NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT).map_err(|_| {
            DashboardError::InvalidValue {
                column: "dteday",
                row,
                value: date_str.clone(),
            }
        })?;

        let workingday = match required(self.workingday, "workingday", row)? {
            0 => false,
            1 => true,
            other => {
                return Err(DashboardError::InvalidValue {
                    column: "workingday",
                    row,
                    value: other.to_string(),
                });
            }
        };

        Ok(Record {
            dteday,
            season: required(self.season, "season", row)?,
            yr: year_from_code(required(self.yr, "yr", row)?)?,
            mnth: required(self.mnth, "mnth", row)?,
            weekday: required(self.weekday, "weekday", row)?,
            workingday,
            temp: required(self.temp, "temp", row)?,
            casual: required(self.casual, "casual", row)?,
            registered: required(self.registered, "registered", row)?,
            cnt: required(self.cnt, "cnt", row)?,
        })
    }
}

/// Reads daily bike-share records from CSV data.
///
/// The header must contain every column in [`REQUIRED_COLUMNS`]; the `yr`
/// code is mapped to its calendar year. Row indices in errors count data rows
/// from zero.
///
/// # Errors
///
/// Returns `DashboardError::MissingColumn` for an incomplete header,
/// `DashboardError::MissingValue` for an empty required field,
/// `DashboardError::InvalidValue` for an unparseable date or working-day flag,
/// and `DashboardError::Csv` if a field cannot be read as its column's type.
pub fn read_day_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(DashboardError::MissingColumn(missing.to_string()));
    }

    let mut records = Vec::new();
    for (row, result) in rdr.deserialize::<RawDay>().enumerate() {
        records.push(result?.into_record(row)?);
    }
    debug!("Loaded {} daily records", records.len());
    Ok(records)
}

/// Reads the `day.csv` dataset from disk. See [`read_day_records`].
pub fn read_day_csv(path: &Path) -> Result<Vec<Record>> {
    debug!("Reading CSV file: {}", path.display());
    let file = File::open(path)?;
    read_day_records(file)
}

/// A chart-ready table that can be written as CSV, JSON and Parquet.
pub trait SummaryTable: Serialize + Sized {
    /// Column definitions, shared by the CSV header and the Parquet schema.
    fn fields() -> Vec<Field>;

    /// One CSV record, in the order of [`SummaryTable::fields`].
    fn csv_record(&self) -> Vec<String>;

    fn columns(rows: &[Self]) -> Vec<ArrayRef>;

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(Self::fields()))
    }

    fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        Ok(RecordBatch::try_new(Self::schema(), Self::columns(rows))?)
    }
}

fn strings<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}

impl SummaryTable for WeekdaySeasonRow {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("season", DataType::UInt8, false),
            Field::new("weekday", DataType::UInt8, false),
            Field::new("mean_cnt", DataType::Float64, false),
            Field::new("day_name", DataType::Utf8, false),
            Field::new("season_name", DataType::Utf8, false),
        ]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.season.to_string(),
            self.weekday.to_string(),
            format!("{:.2}", self.mean_cnt),
            self.day_name.clone(),
            self.season_name.clone(),
        ]
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        let seasons: UInt8Array = rows.iter().map(|r| r.season).collect();
        let weekdays: UInt8Array = rows.iter().map(|r| r.weekday).collect();
        let means: Float64Array = rows.iter().map(|r| r.mean_cnt).collect();
        vec![
            Arc::new(seasons),
            Arc::new(weekdays),
            Arc::new(means),
            strings(rows.iter().map(|r| r.day_name.as_str())),
            strings(rows.iter().map(|r| r.season_name.as_str())),
        ]
    }
}

impl SummaryTable for MonthTotalRow {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("month", DataType::UInt32, false),
            Field::new("total_cnt", DataType::UInt64, false),
            Field::new("month_name", DataType::Utf8, false),
        ]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.month.to_string(),
            self.total_cnt.to_string(),
            self.month_name.clone(),
        ]
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        let months: UInt32Array = rows.iter().map(|r| r.month).collect();
        let totals: UInt64Array = rows.iter().map(|r| r.total_cnt).collect();
        vec![
            Arc::new(months),
            Arc::new(totals),
            strings(rows.iter().map(|r| r.month_name.as_str())),
        ]
    }
}

impl SummaryTable for UserTypeAverageRow {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("year", DataType::Int32, false),
            Field::new("user_type", DataType::Utf8, false),
            Field::new("average_rentals", DataType::Float64, false),
        ]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.user_type.clone(),
            format!("{:.2}", self.average_rentals),
        ]
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        let years: Int32Array = rows.iter().map(|r| r.year).collect();
        let averages: Float64Array = rows.iter().map(|r| r.average_rentals).collect();
        vec![
            Arc::new(years),
            strings(rows.iter().map(|r| r.user_type.as_str())),
            Arc::new(averages),
        ]
    }
}

impl SummaryTable for TemperatureTotalRow {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("category", DataType::Utf8, false),
            Field::new("total_cnt", DataType::UInt64, false),
        ]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![self.category.clone(), self.total_cnt.to_string()]
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        let totals: UInt64Array = rows.iter().map(|r| r.total_cnt).collect();
        vec![
            strings(rows.iter().map(|r| r.category.as_str())),
            Arc::new(totals),
        ]
    }
}

/// Writes a summary table to a CSV file with a header row.
///
/// # Errors
/// Returns error if file cannot be created or written to.
pub fn write_csv<T: SummaryTable>(rows: &[T], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(T::fields().iter().map(|f| f.name().as_str()))?;
    for row in rows {
        writer.write_record(row.csv_record())?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes any serializable value to a pretty-formatted JSON file.
///
/// # Errors
/// Returns error if file cannot be created or serialization fails.
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Writes a summary table to a Parquet file using Arrow format.
///
/// # Errors
/// Returns error if file cannot be created, schema is invalid, or Arrow operations fail.
pub fn write_parquet<T: SummaryTable>(rows: &[T], output_path: &Path) -> Result<()> {
    let batch = T::to_batch(rows)?;

    let file = File::create(output_path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, T::schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    fn parse(body: &str) -> Result<Vec<Record>> {
        read_day_records(format!("{}\n{}", HEADER, body).as_bytes())
    }

    #[test]
    fn reads_day_rows() {
        let records = parse(
            "1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985\n\
             2,2012-01-02,1,1,1,0,0,1,2,0.363478,0.353739,0.696087,0.248539,131,670,801\n",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].yr, 2011);
        assert_eq!(records[0].dteday, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert!(!records[0].workingday);
        assert_eq!(records[0].cnt, 985);
        assert_eq!(records[1].yr, 2012);
        assert!(records[1].workingday);
        assert_eq!(records[1].temp, 0.363478);
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "dteday,season,yr,mnth,weekday,workingday,casual,registered,cnt\n";
        let err = read_day_records(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == "temp"));
    }

    #[test]
    fn empty_temperature_is_reported() {
        let err = parse("1,2011-01-01,1,0,1,0,6,0,2,,0.36,0.80,0.16,331,654,985\n").unwrap_err();
        assert!(matches!(
            err,
            DashboardError::MissingValue { column: "temp", row: 0 }
        ));
    }

    #[test]
    fn unknown_year_code_is_reported() {
        let err = parse("1,2013-01-01,1,2,1,0,6,0,2,0.3,0.36,0.80,0.16,331,654,985\n").unwrap_err();
        assert!(matches!(err, DashboardError::UnmappedCode { mapping: "year", .. }));
    }

    #[test]
    fn bad_working_day_flag_is_reported() {
        let err = parse("1,2011-01-01,1,0,1,0,6,3,2,0.3,0.36,0.80,0.16,331,654,985\n").unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidValue { column: "workingday", .. }
        ));
    }

    #[test]
    fn bad_date_is_reported() {
        let err = parse("1,01/01/2011,1,0,1,0,6,0,2,0.3,0.36,0.80,0.16,331,654,985\n").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidValue { column: "dteday", .. }));
    }

    #[test]
    fn header_only_yields_no_records() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn batch_matches_schema() {
        let rows = vec![TemperatureTotalRow {
            category: "Normal".to_string(),
            total_cnt: 42,
        }];
        let batch = TemperatureTotalRow::to_batch(&rows).unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.schema().field(1).name(), "total_cnt");
    }
}
