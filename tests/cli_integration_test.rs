//! CLI integration tests for command orchestration.
//!
//! Tests cover:
//! - Config parsing with real INI files on disk
//! - Source resolution and loading through the CSV adapter
//! - Filter precedence (flags over config over dataset defaults)
//! - Full commands via `Cli::parse_from` (export, report, failures)

mod common;

use clap::Parser;
use common::*;
use dealboard::adapters::file_config_adapter::FileConfigAdapter;
use dealboard::cli::{self, Cli, FilterArgs, SourceArgs};
use dealboard::domain::error::DealboardError;
use dealboard::domain::filter::{self, DateRange, LabelFilter};
use dealboard::domain::summary::Summary;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const ROWS: [&str; 4] = [
    "2024-01-01,2024-01-03,2025-01-01,100,2.5,USD,Swap",
    "2024-01-05,2024-01-07,,200,3.0,EUR,Loan",
    "2024-02-01,,,300,1.0,USD,Loan",
    "2024-02-10,,,50,N/A,GBP,Swap",
];

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn source_args(path: &Path) -> SourceArgs {
    SourceArgs {
        source: Some(path.to_path_buf()),
        ..SourceArgs::default()
    }
}

// ExitCode has no PartialEq; compare the debug form instead.
fn exit_code_eq(actual: ExitCode, expected: ExitCode) -> bool {
    format!("{actual:?}") == format!("{expected:?}")
}

fn run_args(args: &[&str]) -> ExitCode {
    let mut argv = vec!["dealboard"];
    argv.extend_from_slice(args);
    cli::run(Cli::parse_from(argv))
}

mod config_loading {
    use super::*;

    #[test]
    fn no_config_file_uses_defaults() {
        let config = cli::load_config(None).unwrap();
        let source = cli::build_source_config(&config, &SourceArgs::default()).unwrap();
        assert_eq!(source.path, PathBuf::from(cli::DEFAULT_SOURCE));
        assert_eq!(source.sheet, cli::DEFAULT_SHEET);
        assert_eq!(source.header_row, cli::DEFAULT_HEADER_ROW);
    }

    #[test]
    fn source_section_is_read_from_ini() {
        let ini = write_temp_ini("[source]\npath = deals.xlsx\nsheet = Deals\nheader_row = 0\n");
        let config = cli::load_config(Some(ini.path())).unwrap();
        let source = cli::build_source_config(&config, &SourceArgs::default()).unwrap();

        assert_eq!(source.path, PathBuf::from("deals.xlsx"));
        assert_eq!(source.sheet, "Deals");
        assert_eq!(source.header_row, 0);
    }

    #[test]
    fn flags_override_source_section() {
        let ini = write_temp_ini("[source]\npath = deals.xlsx\nsheet = Deals\nheader_row = 0\n");
        let config = cli::load_config(Some(ini.path())).unwrap();
        let args = SourceArgs {
            source: Some(PathBuf::from("other.csv")),
            sheet: None,
            header_row: Some(3),
        };
        let source = cli::build_source_config(&config, &args).unwrap();

        assert_eq!(source.path, PathBuf::from("other.csv"));
        assert_eq!(source.sheet, "Deals");
        assert_eq!(source.header_row, 3);
    }

    #[test]
    fn negative_header_row_is_config_invalid() {
        let config = FileConfigAdapter::from_string("[source]\nheader_row = -1\n").unwrap();
        let err = cli::build_source_config(&config, &SourceArgs::default()).unwrap_err();
        assert!(matches!(err, DealboardError::ConfigInvalid { .. }));
    }

    #[test]
    fn missing_config_file_is_config_parse() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = cli::load_config(Some(&dir.path().join("absent.ini"))).unwrap_err();
        assert!(matches!(err, DealboardError::ConfigParse { .. }));
    }
}

mod pipeline {
    use super::*;

    #[test]
    fn load_dataset_reads_csv_source_and_drops_bad_rows() {
        let (_dir, path) = write_source_csv(&ROWS);
        let config = FileConfigAdapter::empty();
        let source = cli::build_source_config(&config, &source_args(&path)).unwrap();
        let ds = cli::load_dataset(&source).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.currencies(), vec!["USD", "EUR"]);
    }

    #[test]
    fn load_dataset_for_missing_file_is_source_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = FileConfigAdapter::empty();
        let source = cli::build_source_config(&config, &source_args(&dir.path().join("nope.csv")))
            .unwrap();
        let err = cli::load_dataset(&source).unwrap_err();
        assert!(matches!(err, DealboardError::SourceUnavailable { .. }));
    }

    #[test]
    fn config_filter_section_narrows_the_view() {
        let (_dir, path) = write_source_csv(&ROWS);
        let config = FileConfigAdapter::from_string(
            "[filter]\nstart_date = 2024-01-01\nend_date = 2024-01-31\ncurrencies = USD\n",
        )
        .unwrap();
        let source = cli::build_source_config(&config, &source_args(&path)).unwrap();
        let ds = cli::load_dataset(&source).unwrap();
        let spec = cli::build_filter_spec(&ds, &config, &FilterArgs::default()).unwrap();

        assert_eq!(
            spec.date_range,
            Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 31)))
        );
        let summary = Summary::compute(&filter::apply(&ds, &spec));
        assert_eq!(summary.deal_count, 1);
        assert_eq!(summary.total_amount, 100.0);
        assert_eq!(summary.average_rate, Some(2.5));
    }

    #[test]
    fn flags_take_precedence_over_config_filter() {
        let (_dir, path) = write_source_csv(&ROWS);
        let config = FileConfigAdapter::from_string("[filter]\ncurrencies = USD\n").unwrap();
        let ds = cli::load_dataset(&cli::build_source_config(&config, &source_args(&path)).unwrap())
            .unwrap();
        let args = FilterArgs {
            currencies: vec!["EUR".into()],
            ..FilterArgs::default()
        };
        let spec = cli::build_filter_spec(&ds, &config, &args).unwrap();

        assert_eq!(spec.currencies, LabelFilter::one_of(["EUR"]));
        assert_eq!(filter::apply(&ds, &spec).len(), 1);
    }

    #[test]
    fn unknown_currency_gives_empty_summary() {
        let (_dir, path) = write_source_csv(&ROWS);
        let config = FileConfigAdapter::empty();
        let ds = cli::load_dataset(&cli::build_source_config(&config, &source_args(&path)).unwrap())
            .unwrap();
        let args = FilterArgs {
            currencies: vec!["GBP".into()],
            ..FilterArgs::default()
        };
        let spec = cli::build_filter_spec(&ds, &config, &args).unwrap();
        let summary = Summary::compute(&filter::apply(&ds, &spec));

        assert_eq!(summary.deal_count, 0);
        assert!(cli::render_summary(&summary).contains("n/a"));
    }
}

mod commands {
    use super::*;

    #[test]
    fn export_writes_filtered_csv() {
        let (dir, path) = write_source_csv(&ROWS);
        let out = dir.path().join("out/usd.csv");

        let code = run_args(&[
            "export",
            "--source",
            path.to_str().unwrap(),
            "--currency",
            "USD",
            "-o",
            out.to_str().unwrap(),
        ]);
        assert!(exit_code_eq(code, ExitCode::SUCCESS));

        let csv = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2024-01-01,2024-01-03,2025-01-01,100,2.5,USD,Swap"));
        assert!(lines[2].starts_with("2024-02-01,,,300,1,USD,Loan"));
    }

    #[test]
    fn report_writes_dashboard_and_csv_download() {
        let (dir, path) = write_source_csv(&ROWS);
        let out = dir.path().join("site/dashboard.html");

        let code = run_args(&[
            "report",
            "--source",
            path.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "--title",
            "Q1 Deals",
        ]);
        assert!(exit_code_eq(code, ExitCode::SUCCESS));

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("Q1 Deals"));
        assert!(html.contains("Key Metrics"));
        assert!(html.contains("<svg"));
        assert!(html.contains("href=\"filtered_deals.csv\""));

        let csv = std::fs::read_to_string(dir.path().join("site/filtered_deals.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn report_without_csv_skips_download() {
        let (dir, path) = write_source_csv(&ROWS);
        let out = dir.path().join("dashboard.html");

        let code = run_args(&[
            "report",
            "--source",
            path.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "--no-csv",
        ]);
        assert!(exit_code_eq(code, ExitCode::SUCCESS));
        assert!(out.exists());
        assert!(!dir.path().join("filtered_deals.csv").exists());
    }

    #[test]
    fn missing_source_exits_with_source_code() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.csv");
        let code = run_args(&["summary", "--source", missing.to_str().unwrap()]);
        assert!(exit_code_eq(code, ExitCode::from(3)));
    }

    #[test]
    fn missing_trade_date_exits_with_column_code() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("deals.csv");
        std::fs::write(&path, "banner\nAmount,Rate\n1,2\n").unwrap();
        let code = run_args(&["options", "--source", path.to_str().unwrap()]);
        assert!(exit_code_eq(code, ExitCode::from(4)));
    }

    #[test]
    fn bad_date_flag_exits_with_usage_code() {
        let (_dir, path) = write_source_csv(&ROWS);
        let code = run_args(&[
            "summary",
            "--source",
            path.to_str().unwrap(),
            "--from",
            "01/02/2024x",
        ]);
        assert!(exit_code_eq(code, ExitCode::from(2)));
    }

    #[test]
    fn comma_separated_labels_parse_into_one_filter() {
        let cli = Cli::parse_from(["dealboard", "summary", "--currency", "USD,EUR", "--deal-type", "Swap"]);
        match cli.command {
            cli::Command::Summary { filter, .. } => {
                assert_eq!(filter.currencies, vec!["USD", "EUR"]);
                assert_eq!(filter.deal_types, vec!["Swap"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
