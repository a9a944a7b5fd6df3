//! End-to-end runs over real files: CSV in, report JSON out.

use campaign_compare::commands::{execute_analyze, AnalyzeArgs};
use campaign_compare::ingest::table_from_bytes;
use campaign_compare::normalizer::normalize_records;
use campaign_compare::output::read_report;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::{Path, PathBuf};

const SAMPLE_CSV: &str = "\
customer_no,campaign_year,campaign_series,plan_close_dt,order_dt,previous_step_at_closure,days_to_plan_close
1001,2025,Alpha,2025-03-01 10:00:00,2025-02-20 09:00:00,TKT - To start,9
1002,2025,Alpha,2025-03-01 11:30:00,2025-02-21 09:00:00,TKT - 1st contact complete,8
1003,2025,Beta,2025-03-04,2025-02-22,TKT - 2nd contact complete,10
1004,2026,Alpha,2026-03-02,2026-02-25,TKT - To start,5
1005,2026,Beta,not-a-date,2026-02-26,TKT - 6th contact complete,7
";

fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("sales.csv");
    std::fs::write(&path, SAMPLE_CSV).unwrap();
    path
}

#[test]
fn test_csv_to_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let output = dir.path().join("report.json");

    execute_analyze(AnalyzeArgs {
        input,
        output_json: output.clone(),
        ..Default::default()
    })
    .unwrap();

    let report = read_report(&output).unwrap();

    assert_eq!(report.version, "1.0.0");
    assert_eq!(report.record_count, 5);
    assert!(!report.date_aligned);

    // Cohort KPIs, ordered by year
    assert_eq!(report.cohort_kpis.len(), 2);
    let y25 = &report.cohort_kpis[0];
    assert_eq!(y25.campaign_year, "2025");
    assert_eq!(y25.total_sales, 3);
    assert_eq!(y25.avg_contacts, 1.0);
    let y26 = &report.cohort_kpis[1];
    assert_eq!(y26.total_sales, 2);
    // 1005 carries an unmapped lifecycle label, so both 2026 sales are zero-touch
    assert_eq!(y26.pct_zero_touch, 100.0);

    // 1005's close date is unknown: in the cohorts, not in the series
    let daily_total: u64 = report.daily_volume.iter().map(|r| r.daily_sales).sum();
    assert_eq!(daily_total, 4);
    assert_eq!(report.daily_volume.len(), 3);
    assert!(report.daily_volume.iter().all(|r| r.plot_date.is_none()));

    let weekly_total: u64 = report.weekly_volume.iter().map(|r| r.sales).sum();
    assert_eq!(weekly_total, 4);

    // The pivot is not date-keyed, so 1005 still counts toward (Beta, 2026)
    assert_eq!(report.series_breakdown.len(), 4);
}

#[test]
fn test_alignment_flag_adds_projection() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let output = dir.path().join("aligned.json");

    execute_analyze(AnalyzeArgs {
        input,
        output_json: output.clone(),
        align_dates: true,
        ..Default::default()
    })
    .unwrap();

    let report = read_report(&output).unwrap();
    assert!(report.date_aligned);
    for row in &report.daily_volume {
        let plot = row.plot_date.expect("aligned run projects every row");
        assert_eq!(plot.format("%m-%d").to_string(), row.close_date.format("%m-%d").to_string());
    }
}

#[test]
fn test_year_filter_restricts_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let output = dir.path().join("filtered.json");

    execute_analyze(AnalyzeArgs {
        input,
        output_json: output.clone(),
        years: Some(vec!["2025".to_string()]),
        ..Default::default()
    })
    .unwrap();

    let report = read_report(&output).unwrap();
    assert_eq!(report.record_count, 3);
    assert_eq!(report.cohort_kpis.len(), 1);
    assert_eq!(report.cohort_kpis[0].campaign_year, "2025");
}

#[test]
fn test_empty_filter_result_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let output = dir.path().join("never-written.json");

    execute_analyze(AnalyzeArgs {
        input,
        output_json: output.clone(),
        years: Some(vec!["2099".to_string()]),
        ..Default::default()
    })
    .unwrap();

    assert!(!output.exists());
}

#[test]
fn test_missing_column_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.csv");
    std::fs::write(&input, "customer_no,campaign_year\n1,2025\n").unwrap();

    let err = execute_analyze(AnalyzeArgs {
        input,
        output_json: dir.path().join("report.json"),
        ..Default::default()
    })
    .unwrap_err();

    assert!(format!("{:#}", err).contains("required column missing"));
}

#[test]
fn test_zip_and_csv_paths_converge() {
    // The same rows, once as a plain CSV and once zip-packaged, must
    // normalize identically: one normalizer, every encoding.
    let mut archive_bytes = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut archive_bytes));
        let options: zip::write::FileOptions<'_, ()> = zip::write::FileOptions::default();
        zip.start_file("export/sales.csv", options).unwrap();
        zip.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    let from_csv = normalize_records(
        &table_from_bytes(SAMPLE_CSV.as_bytes(), &PathBuf::from("sales.csv")).unwrap(),
    )
    .unwrap();
    let from_zip = normalize_records(
        &table_from_bytes(&archive_bytes, &PathBuf::from("sales.zip")).unwrap(),
    )
    .unwrap();

    assert_eq!(from_csv.stats, from_zip.stats);
    assert_eq!(from_csv.records.len(), from_zip.records.len());
    for (a, b) in from_csv.records.iter().zip(&from_zip.records) {
        assert_eq!(a.customer_no, b.customer_no);
        assert_eq!(a.contact_count, b.contact_count);
        assert_eq!(a.plan_close_dt, b.plan_close_dt);
        assert_eq!(a.campaign_year, b.campaign_year);
    }
}
