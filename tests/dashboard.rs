use dashboard::{
    DashboardConfig, DashboardError, build_dashboard, read_day_csv, write_csv, write_json,
    write_parquet,
};
use std::fs;

const DAY_CSV: &str = "\
instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985
2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801
3,2011-01-03,1,0,1,0,1,1,1,0.196364,0.189405,0.437273,0.248309,120,1229,1349
4,2011-01-04,1,0,1,0,2,1,1,0.2,0.212122,0.590435,0.160296,108,1454,1562
5,2011-07-05,3,0,7,0,2,1,1,0.92,0.80,0.59,0.16,200,800,1000
6,2012-01-02,1,1,1,1,1,0,1,0.5,0.5,0.5,0.2,50,150,200
7,2012-01-03,1,1,1,0,2,1,1,0.75,0.7,0.5,0.2,30,170,200
";

#[test]
fn builds_and_writes_the_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("day.csv");
    fs::write(&input, DAY_CSV).unwrap();

    let records = read_day_csv(&input).unwrap();
    assert_eq!(records.len(), 7);

    let dashboard = build_dashboard(&records, &DashboardConfig::default()).unwrap();

    // Spring Sunday appears once, Spring Tuesday twice (2011 and 2012).
    let tuesday = dashboard
        .weekday_season
        .iter()
        .find(|r| r.season == 1 && r.weekday == 2)
        .unwrap();
    assert_eq!(tuesday.day_name, "Selasa");
    assert_eq!(tuesday.mean_cnt, (1562.0 + 200.0) / 2.0);

    // Spring only spans January in this sample.
    assert_eq!(dashboard.month_season.len(), 1);
    assert_eq!(dashboard.month_season[0].month_name, "Januari");
    assert_eq!(
        dashboard.month_season[0].total_cnt,
        985 + 801 + 1349 + 1562 + 200 + 200
    );

    let years: Vec<(i32, &str)> = dashboard
        .avg_rentals
        .iter()
        .map(|r| (r.year, r.user_type.as_str()))
        .collect();
    assert_eq!(
        years,
        vec![
            (2011, "casual"),
            (2012, "casual"),
            (2011, "registered"),
            (2012, "registered"),
        ]
    );
    assert_eq!(dashboard.avg_rentals[0].average_rentals, (120.0 + 108.0 + 200.0) / 3.0);
    assert_eq!(dashboard.avg_rentals[1].average_rentals, 30.0);

    let categories: Vec<(&str, u64)> = dashboard
        .by_temperature
        .iter()
        .map(|r| (r.category.as_str(), r.total_cnt))
        .collect();
    assert_eq!(
        categories,
        vec![("Dingin", 985 + 801 + 1349 + 1562), ("Normal", 200), ("Panas", 200)]
    );
    assert_eq!(dashboard.temperature_metrics.panas, 200);

    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    write_csv(&dashboard.avg_rentals, &out.join("avg_rentals.csv")).unwrap();
    write_parquet(&dashboard.by_temperature, &out.join("by_temperature.parquet")).unwrap();
    write_json(&dashboard, &out.join("dashboard.json")).unwrap();

    let csv = fs::read_to_string(out.join("avg_rentals.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("year,user_type,average_rentals"));
    assert_eq!(lines.next(), Some("2011,casual,142.67"));
    assert!(out.join("by_temperature.parquet").metadata().unwrap().len() > 0);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("dashboard.json")).unwrap()).unwrap();
    assert_eq!(json["temperature_metrics"]["normal"], 200);
}

#[test]
fn hot_season_outside_the_bins_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("day.csv");
    fs::write(&input, DAY_CSV).unwrap();
    let records = read_day_csv(&input).unwrap();

    let config = DashboardConfig {
        years: vec![2011],
        trend_season: 3,
        temperature_season: 3,
    };
    let dashboard = build_dashboard(&records, &config).unwrap();
    assert_eq!(dashboard.month_season.len(), 1);
    assert_eq!(dashboard.month_season[0].month_name, "Juli");
    assert!(dashboard.by_temperature.is_empty());
    assert_eq!(dashboard.temperature_metrics.panas, 0);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_day_csv(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, DashboardError::Io(_)));
}
