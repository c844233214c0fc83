use clap::Parser;
use dashboard::{
    DashboardConfig, DashboardError, SeasonArg, SimpleLogger, SummaryTable, build_dashboard,
    mapping::season_name, read_day_csv, write_csv, write_json, write_parquet,
};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// input day.csv file
    #[arg(short, long, default_value = "data/day.csv")]
    input_file: PathBuf,

    /// Output base name (will create dir containing .csv, .json, and .parquet files)
    #[arg(short, long, default_value = "dashboard")]
    output: String,

    /// Calendar years to include (e.g., 2011,2012)
    #[arg(short, long, value_delimiter = ',', default_values_t = [2011, 2012])]
    years: Vec<i32>,

    /// Season for the monthly trend chart
    #[arg(long, default_value = "semi")]
    trend_season: SeasonArg,

    /// Season for the temperature category chart
    #[arg(long, default_value = "semi")]
    temperature_season: SeasonArg,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn write_table<T: SummaryTable>(rows: &[T], dir: &Path, stem: &str) -> Result<(), DashboardError> {
    let csv_path = dir.join(format!("{}.csv", stem));
    let json_path = dir.join(format!("{}.json", stem));
    let parquet_path = dir.join(format!("{}.parquet", stem));

    write_csv(rows, &csv_path)?;
    write_json(rows, &json_path)?;
    write_parquet(rows, &parquet_path)?;

    debug!("  - {} ({} rows)", csv_path.display(), rows.len());
    debug!("  - {}", json_path.display());
    debug!("  - {}", parquet_path.display());
    Ok(())
}

fn main() -> Result<(), DashboardError> {
    // Initialize timer and logger
    let total_start = Instant::now();
    log::set_logger(&LOGGER).map_err(|e| DashboardError::Data(e.to_string()))?;

    // Acquire CLI args
    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    let config = DashboardConfig {
        years: args.years.clone(),
        trend_season: args.trend_season.code(),
        temperature_season: args.temperature_season.code(),
    };

    println!("Bike Sharing Dashboard");
    debug!(
        "Input file: {} | Years: {:?}",
        args.input_file.display(),
        config.years
    );
    debug!(
        "Trend season: {:?} | Temperature season: {:?}",
        args.trend_season, args.temperature_season
    );

    let load_start = Instant::now();
    let records = read_day_csv(&args.input_file)?;
    println!(
        "Loaded {} records in {:.2?}",
        records.len(),
        load_start.elapsed()
    );

    let processing_start = Instant::now();
    let dashboard = build_dashboard(&records, &config)?;
    let processing_time = processing_start.elapsed();
    println!("Dashboard tables computed in {:.2?}", processing_time);

    // Create output directory
    let output_dir = PathBuf::from(format!("./output/{}", args.output));
    fs::create_dir_all(&output_dir)?;
    println!(
        "Created output directory: {} | Writing output files...",
        output_dir.display()
    );

    let io_start = Instant::now();
    write_table(&dashboard.weekday_season, &output_dir, "weekday_season")?;
    write_table(&dashboard.month_season, &output_dir, "month_season")?;
    write_table(&dashboard.avg_rentals, &output_dir, "avg_rentals")?;
    write_table(&dashboard.by_temperature, &output_dir, "by_temperature")?;
    write_json(&dashboard, &output_dir.join("dashboard.json"))?;
    println!("All files took {:.2?}", io_start.elapsed());

    // Metric cards
    let trend_label = season_name(config.trend_season)?;
    let temperature_label = season_name(config.temperature_season)?;
    println!("\nYears {:?}", config.years);
    println!(
        "Trend season {}: {} months",
        trend_label,
        dashboard.month_season.len()
    );
    println!(
        "Penyewa Kasual: {:.2} | Penyewa Terdaftar: {:.2}",
        dashboard.user_type_metrics.casual, dashboard.user_type_metrics.registered
    );
    println!(
        "Musim {}: Dingin={} Normal={} Panas={}",
        temperature_label,
        dashboard.temperature_metrics.dingin,
        dashboard.temperature_metrics.normal,
        dashboard.temperature_metrics.panas
    );

    println!("\nTotal runtime: {:.2?}", total_start.elapsed());
    Ok(())
}
