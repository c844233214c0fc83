use crate::bucket::{TemperatureCategory, bucketize};
use crate::error::{DashboardError, Result};
use crate::mapping::{month_name, season_name, weekday_name, year_code};
use crate::melt::{WideTable, melt};
use crate::structs::{
    Dashboard, DashboardConfig, MonthTotalRow, Record, TemperatureMetrics, TemperatureTotalRow,
    UserTypeAverageRow, UserTypeMetrics, WeekdaySeasonRow,
};
use log::debug;
use std::collections::BTreeMap;

/// User-type columns reshaped by [`create_avg_rentals`], in output order.
pub const USER_TYPES: [&str; 2] = ["casual", "registered"];

/// Computes the mean daily rental count for every (season, weekday) pair present.
///
/// Rows are ordered by season, then weekday. Pairs with no records are absent
/// rather than zero-filled.
///
/// # Arguments
///
/// * `records` - Records already filtered by the selected years
///
/// # Errors
///
/// Returns `DashboardError::UnmappedCode` if a season or weekday code has no label.
pub fn create_cnt_df(records: &[Record]) -> Result<Vec<WeekdaySeasonRow>> {
    let mut groups: BTreeMap<(u8, u8), (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry((record.season, record.weekday)).or_default();
        entry.0 += u64::from(record.cnt);
        entry.1 += 1;
    }
    debug!("Found {} season-weekday combinations", groups.len());

    groups
        .into_iter()
        .map(|((season, weekday), (sum, count))| {
            Ok(WeekdaySeasonRow {
                season,
                weekday,
                mean_cnt: sum as f64 / count as f64,
                day_name: weekday_name(weekday)?.to_string(),
                season_name: season_name(season)?.to_string(),
            })
        })
        .collect()
}

/// Sums rentals per month.
///
/// The caller restricts `records` to a single season; months that do not
/// occur in the input are omitted.
///
/// # Errors
///
/// Returns `DashboardError::UnmappedCode` for a month code outside `1..=12`.
pub fn create_month_season_df(records: &[Record]) -> Result<Vec<MonthTotalRow>> {
    let mut totals: BTreeMap<u32, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.mnth).or_default() += u64::from(record.cnt);
    }

    totals
        .into_iter()
        .map(|(month, total_cnt)| {
            Ok(MonthTotalRow {
                month,
                total_cnt,
                month_name: month_name(month)?.to_string(),
            })
        })
        .collect()
}

/// Averages casual and registered rentals per year over working days only.
///
/// The per-year means are reshaped to long form: all casual rows (by year),
/// then all registered rows, giving two rows per year with working-day records.
///
/// # Errors
///
/// Returns `DashboardError::Data` if the reshape fails.
pub fn create_avg_rentals(records: &[Record]) -> Result<Vec<UserTypeAverageRow>> {
    let mut by_year: BTreeMap<i32, (u64, u64, u64)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.workingday) {
        let entry = by_year.entry(record.yr).or_default();
        entry.0 += u64::from(record.casual);
        entry.1 += u64::from(record.registered);
        entry.2 += 1;
    }

    let mut wide = WideTable::new(&USER_TYPES);
    for (year, (casual, registered, days)) in by_year {
        let days = days as f64;
        wide.push(year, vec![casual as f64 / days, registered as f64 / days]);
    }

    let rows = melt(&wide)?
        .into_iter()
        .map(|row| UserTypeAverageRow {
            year: row.key,
            user_type: row.variable,
            average_rentals: row.value,
        })
        .collect();
    Ok(rows)
}

/// Sums rentals per temperature category.
///
/// The caller restricts `records` to a single season. Records whose temperature
/// falls outside every bin are excluded, and categories without records are absent.
///
/// # Errors
///
/// Returns `DashboardError::InvalidValue` if a record's temperature is not finite.
pub fn create_bytemp_df(records: &[Record]) -> Result<Vec<TemperatureTotalRow>> {
    let mut totals: BTreeMap<TemperatureCategory, u64> = BTreeMap::new();
    let mut excluded = 0usize;
    for (row, record) in records.iter().enumerate() {
        let category = bucketize(record.temp).map_err(|_| DashboardError::InvalidValue {
            column: "temp",
            row,
            value: record.temp.to_string(),
        })?;
        match category {
            Some(category) => *totals.entry(category).or_default() += u64::from(record.cnt),
            None => excluded += 1,
        }
    }
    if excluded > 0 {
        debug!("{} records fell outside the temperature bins", excluded);
    }

    Ok(totals
        .into_iter()
        .map(|(category, total_cnt)| TemperatureTotalRow {
            category: category.label().to_string(),
            total_cnt,
        })
        .collect())
}

/// Keeps records whose calendar year is one of `years`.
pub fn filter_years(records: &[Record], years: &[i32]) -> Vec<Record> {
    records
        .iter()
        .filter(|r| years.contains(&r.yr))
        .copied()
        .collect()
}

/// Keeps records of one season code.
pub fn filter_season(records: &[Record], season: u8) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.season == season)
        .copied()
        .collect()
}

/// Sums the averaged rentals of each user type across years.
pub fn user_type_totals(rows: &[UserTypeAverageRow]) -> UserTypeMetrics {
    rows.iter()
        .fold(UserTypeMetrics::default(), |mut acc, row| {
            match row.user_type.as_str() {
                "casual" => acc.casual += row.average_rentals,
                "registered" => acc.registered += row.average_rentals,
                _ => {}
            }
            acc
        })
}

/// Per-category totals, zero for categories that are absent.
pub fn temperature_totals(rows: &[TemperatureTotalRow]) -> TemperatureMetrics {
    let mut metrics = TemperatureMetrics::default();
    for row in rows {
        match row.category.as_str() {
            "Dingin" => metrics.dingin += row.total_cnt,
            "Normal" => metrics.normal += row.total_cnt,
            "Panas" => metrics.panas += row.total_cnt,
            _ => {}
        }
    }
    metrics
}

/// Recomputes every dashboard table for one filter selection.
///
/// The year filter applies to all four tables; the trend and temperature
/// charts are additionally restricted to their selected seasons.
///
/// # Errors
///
/// Returns `DashboardError::UnmappedCode` if the selection names an unknown
/// year or season, or any error raised by the transforms.
pub fn build_dashboard(records: &[Record], config: &DashboardConfig) -> Result<Dashboard> {
    for &year in &config.years {
        year_code(year)?;
    }
    let trend_label = season_name(config.trend_season)?;
    let temperature_label = season_name(config.temperature_season)?;

    let main = filter_years(records, &config.years);
    debug!(
        "Year filter {:?} kept {} of {} records",
        config.years,
        main.len(),
        records.len()
    );

    let weekday_season = create_cnt_df(&main)?;

    let trend = filter_season(&main, config.trend_season);
    debug!("Trend season {}: {} records", trend_label, trend.len());
    let month_season = create_month_season_df(&trend)?;

    let avg_rentals = create_avg_rentals(&main)?;

    let by_season = filter_season(&main, config.temperature_season);
    debug!(
        "Temperature season {}: {} records",
        temperature_label,
        by_season.len()
    );
    let by_temperature = create_bytemp_df(&by_season)?;

    Ok(Dashboard {
        user_type_metrics: user_type_totals(&avg_rentals),
        temperature_metrics: temperature_totals(&by_temperature),
        weekday_season,
        month_season,
        avg_rentals,
        by_temperature,
    })
}
