//! CLI definition and dispatch.
//!
//! Every invocation is one filter state: load the dataset, build the filter
//! spec from flags over config over dataset defaults, apply it, then project
//! the view into the requested output.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report_adapter::HtmlReportAdapter;
use crate::adapters::open_source;
use crate::domain::deal::Dataset;
use crate::domain::error::DealboardError;
use crate::domain::export::{self, EXPORT_FILE_NAME};
use crate::domain::filter::{self, DateRange, FilterOptions, FilterSpec, FilteredView, LabelFilter};
use crate::domain::normalize;
use crate::domain::summary::Summary;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::{Dashboard, ReportPort};

pub const DEFAULT_SOURCE: &str = "data/Data_stage.xlsm";
pub const DEFAULT_SHEET: &str = "F";
pub const DEFAULT_HEADER_ROW: usize = 1;
pub const DEFAULT_REPORT: &str = "dashboard.html";
pub const DEFAULT_TITLE: &str = "Financial Deals Dashboard";

#[derive(Parser, Debug)]
#[command(name = "dealboard", about = "Financial deals dashboard")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Workbook or CSV file holding the deals
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// Worksheet name (workbooks only)
    #[arg(long)]
    pub sheet: Option<String>,
    /// Zero-based row holding the column names
    #[arg(long)]
    pub header_row: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First trade date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Last trade date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Accepted currency; repeat or comma-separate
    #[arg(long = "currency", value_delimiter = ',')]
    pub currencies: Vec<String>,
    /// Accepted deal type; repeat or comma-separate
    #[arg(long = "deal-type", value_delimiter = ',')]
    pub deal_types: Vec<String>,
    /// Leave unspecified label filters unconstrained, keeping deals without
    /// a currency or deal type
    #[arg(long)]
    pub include_unlabelled: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the key metrics of the filtered deals
    Summary {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the key metrics and the filtered data table
    Show {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Print at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the selectable filter values
    Options {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Write the filtered deals as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file, `-` for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the HTML dashboard
    Report {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
        /// Skip writing the CSV download next to the dashboard
        #[arg(long)]
        no_csv: bool,
    },
}

/// Where and how to read the deals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub sheet: String,
    pub header_row: usize,
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => return report_error(&e),
    };

    let result = match cli.command {
        Command::Summary { source, filter } => run_summary(&config, &source, &filter),
        Command::Show {
            source,
            filter,
            limit,
        } => run_show(&config, &source, &filter, limit),
        Command::Options { source } => run_options(&config, &source),
        Command::Export {
            source,
            filter,
            output,
        } => run_export(&config, &source, &filter, output.as_deref()),
        Command::Report {
            source,
            filter,
            output,
            title,
            no_csv,
        } => run_report(
            &config,
            &source,
            &filter,
            output.as_deref(),
            title.as_deref(),
            no_csv,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn report_error(err: &DealboardError) -> ExitCode {
    tracing::debug!(error = ?err, "command failed");
    eprintln!("error: {err}");
    ExitCode::from(err)
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, DealboardError> {
    match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading config");
            FileConfigAdapter::from_file(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_source_config(
    config: &dyn ConfigPort,
    args: &SourceArgs,
) -> Result<SourceConfig, DealboardError> {
    let path = args
        .source
        .clone()
        .or_else(|| config.get_string("source", "path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));

    let sheet = args
        .sheet
        .clone()
        .or_else(|| config.get_string("source", "sheet"))
        .unwrap_or_else(|| DEFAULT_SHEET.to_string());

    let header_row = match args.header_row {
        Some(h) => h,
        None => {
            let raw = config.get_int("source", "header_row", DEFAULT_HEADER_ROW as i64);
            usize::try_from(raw).map_err(|_| DealboardError::ConfigInvalid {
                section: "source".into(),
                key: "header_row".into(),
                reason: format!("must be zero or positive, got {raw}"),
            })?
        }
    };

    Ok(SourceConfig {
        path,
        sheet,
        header_row,
    })
}

pub fn load_dataset(source: &SourceConfig) -> Result<Dataset, DealboardError> {
    let port = open_source(&source.path, &source.sheet, source.header_row)?;
    normalize::load(port.as_ref())
}

/// Flags override the `[filter]` config section, which overrides the
/// dataset defaults (full date span, every label present).
pub fn build_filter_spec(
    dataset: &Dataset,
    config: &dyn ConfigPort,
    args: &FilterArgs,
) -> Result<FilterSpec, DealboardError> {
    let defaults = FilterSpec::defaults_for(dataset);
    let include_unlabelled =
        args.include_unlabelled || config.get_bool("filter", "include_unlabelled", false);

    let start = resolve_date(args.from.as_deref(), "--from", config, "start_date")?;
    let end = resolve_date(args.to.as_deref(), "--to", config, "end_date")?;
    let date_range = match (start, end, defaults.date_range) {
        (None, None, bounds) => bounds,
        (start, end, bounds) => Some(DateRange::new(
            start.or(bounds.map(|b| b.start)).unwrap_or(NaiveDate::MIN),
            end.or(bounds.map(|b| b.end)).unwrap_or(NaiveDate::MAX),
        )),
    };

    let currencies = resolve_labels(
        &args.currencies,
        config.get_list("filter", "currencies"),
        include_unlabelled,
        defaults.currencies,
    );
    let deal_types = resolve_labels(
        &args.deal_types,
        config.get_list("filter", "deal_types"),
        include_unlabelled,
        defaults.deal_types,
    );

    let spec = FilterSpec {
        date_range,
        currencies,
        deal_types,
    };
    tracing::debug!(?spec, "resolved filter");
    Ok(spec)
}

fn resolve_date(
    flag: Option<&str>,
    flag_name: &str,
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, DealboardError> {
    if let Some(value) = flag {
        return parse_date(value)
            .map(Some)
            .ok_or_else(|| DealboardError::InvalidArgument {
                arg: flag_name.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            });
    }
    match config.get_string("filter", key) {
        Some(value) => parse_date(&value)
            .map(Some)
            .ok_or_else(|| DealboardError::ConfigInvalid {
                section: "filter".into(),
                key: key.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }),
        None => Ok(None),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn resolve_labels(
    flag: &[String],
    configured: Option<Vec<String>>,
    include_unlabelled: bool,
    default: LabelFilter,
) -> LabelFilter {
    let from_flag: Vec<&str> = flag
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !from_flag.is_empty() {
        return LabelFilter::one_of(from_flag);
    }
    match configured {
        Some(labels) => LabelFilter::one_of(labels),
        None if include_unlabelled => LabelFilter::Any,
        None => default,
    }
}

fn prepare(
    config: &dyn ConfigPort,
    source: &SourceArgs,
) -> Result<(SourceConfig, Dataset), DealboardError> {
    let source = build_source_config(config, source)?;
    let dataset = load_dataset(&source)?;
    Ok((source, dataset))
}

fn run_summary(
    config: &dyn ConfigPort,
    source: &SourceArgs,
    filter_args: &FilterArgs,
) -> Result<(), DealboardError> {
    let (_, dataset) = prepare(config, source)?;
    let spec = build_filter_spec(&dataset, config, filter_args)?;
    let view = filter::apply(&dataset, &spec);

    print!("{}", render_summary(&Summary::compute(&view)));
    Ok(())
}

fn run_show(
    config: &dyn ConfigPort,
    source: &SourceArgs,
    filter_args: &FilterArgs,
    limit: Option<usize>,
) -> Result<(), DealboardError> {
    let (_, dataset) = prepare(config, source)?;
    let spec = build_filter_spec(&dataset, config, filter_args)?;
    let view = filter::apply(&dataset, &spec);

    print!("{}", render_summary(&Summary::compute(&view)));
    println!();
    print!("{}", render_table(&view, limit));
    Ok(())
}

fn run_options(config: &dyn ConfigPort, source: &SourceArgs) -> Result<(), DealboardError> {
    let (_, dataset) = prepare(config, source)?;
    print!(
        "{}",
        render_options(&FilterOptions::from_dataset(&dataset), dataset.len())
    );
    Ok(())
}

fn run_export(
    config: &dyn ConfigPort,
    source: &SourceArgs,
    filter_args: &FilterArgs,
    output: Option<&Path>,
) -> Result<(), DealboardError> {
    let (_, dataset) = prepare(config, source)?;
    let spec = build_filter_spec(&dataset, config, filter_args)?;
    let view = filter::apply(&dataset, &spec);

    let output = output
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("export", "path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));

    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        export::write_csv(&view, &mut lock)?;
        lock.flush()?;
    } else {
        write_export(&view, &output)?;
        eprintln!("Exported {} deals to {}", view.len(), output.display());
    }
    Ok(())
}

fn run_report(
    config: &dyn ConfigPort,
    source: &SourceArgs,
    filter_args: &FilterArgs,
    output: Option<&Path>,
    title: Option<&str>,
    no_csv: bool,
) -> Result<(), DealboardError> {
    let (source_config, dataset) = prepare(config, source)?;
    let spec = build_filter_spec(&dataset, config, filter_args)?;
    let view = filter::apply(&dataset, &spec);
    let summary = Summary::compute(&view);

    let output = output
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("report", "path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT));
    let title = title
        .map(str::to_string)
        .or_else(|| config.get_string("report", "title"))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let csv_href = if no_csv {
        None
    } else {
        let csv_path = output
            .parent()
            .map(|p| p.join(EXPORT_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
        write_export(&view, &csv_path)?;
        Some(EXPORT_FILE_NAME)
    };

    let source_label = source_config.path.display().to_string();
    let dashboard = Dashboard {
        title: &title,
        source: &source_label,
        spec: &spec,
        view: &view,
        summary: &summary,
        csv_href,
    };
    HtmlReportAdapter::new().write(&dashboard, &output)?;

    eprintln!("Dashboard written to: {}", output.display());
    Ok(())
}

pub fn write_export(view: &FilteredView<'_>, path: &Path) -> Result<(), DealboardError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    export::write_csv(view, io::BufWriter::new(file))
}

pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Total Deals:       {}\nTotal Amount:      {}\nAverage Rate (%):  {}\n",
        summary.deal_count,
        summary.total_amount_display(),
        summary.average_rate_display(),
    )
}

pub fn render_table(view: &FilteredView<'_>, limit: Option<usize>) -> String {
    if view.is_empty() {
        return "No deals match the selected filters.\n".to_string();
    }

    let header = export::header(view);
    let shown = limit.unwrap_or(view.len()).min(view.len());
    let rows: Vec<Vec<String>> = view.iter().take(shown).map(export::record).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(&header);
    for row in &rows {
        out.push_str(&line(row));
    }
    if shown < view.len() {
        out.push_str(&format!("... {} more\n", view.len() - shown));
    }
    out
}

pub fn render_options(options: &FilterOptions, deal_count: usize) -> String {
    let dates = options
        .trade_dates
        .map(|r| r.to_string())
        .unwrap_or_else(|| "no data".to_string());
    format!(
        "Deals:        {}\nTrade dates:  {}\nCurrencies:   {}\nDeal types:   {}\n",
        deal_count,
        dates,
        options.currencies.join(", "),
        options.deal_types.join(", "),
    )
}
