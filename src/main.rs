use analytics::correlation::strongest;
use analytics::{
    ClassifiedCorrelation, CorrelationMatrix, RiskComponents, cumulative_sum, decompose,
};
use analyzer::{WeightedScorer, best_per_metric, radar_profile};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use configuration::settings::Settings;
use configuration::{DEFAULT_CONFIG_FILE, LogFormat};
use core_types::{
    ContributionPeriod, CorrelationResult, DateRange, Event, FilterCriteria, MetricRecord,
    ValueRange,
};
use events::{EventDetails, apply_filters, group_by_month, parse_events, summarize_by_type};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// The main entry point for the Vantage analytics views.
fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    // The guard flushes the file writer on drop, so it must live until exit.
    let _guard = configuration::init_tracing(&settings.logging)?;

    tracing::info!(command = cli.command.name(), "Starting vantage.");

    // Execute the appropriate command
    match cli.command {
        Commands::Classify(args) => handle_classify(args, cli.json),
        Commands::Correlations(args) => handle_correlations(args, cli.json),
        Commands::Rank(args) => handle_rank(args, &settings, cli.json),
        Commands::Score(args) => handle_score(args, &settings, cli.json),
        Commands::Normalize(args) => handle_normalize(args, cli.json),
        Commands::Contributions(args) => handle_contributions(args, cli.json),
        Commands::Risk(args) => handle_risk(args, cli.json),
        Commands::Timeline(args) => handle_timeline(args, &settings, cli.json),
        Commands::Summary(args) => handle_summary(args, &settings, cli.json),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Chart-ready views over financial analytics results.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Print the derived view as JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    /// Override the configured log format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label a single correlation coefficient and p-value.
    Classify(ClassifyArgs),
    /// Show the strongest correlations, or the event-type by metric matrix.
    Correlations(CorrelationsArgs),
    /// Show the best entity for each metric.
    Rank(MetricsArgs),
    /// Rank entities by the weighted score configured under [ranking.weights].
    Score(InputArgs),
    /// Normalize metrics to 0-100 for a radar chart.
    Normalize(MetricsArgs),
    /// Show cumulative factor contributions over time.
    Contributions(InputArgs),
    /// Show each factor's share of total variance.
    Risk(InputArgs),
    /// Filter events and group them by month, newest first.
    Timeline(EventArgs),
    /// Impact statistics per event type.
    Summary(EventArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Classify(_) => "classify",
            Commands::Correlations(_) => "correlations",
            Commands::Rank(_) => "rank",
            Commands::Score(_) => "score",
            Commands::Normalize(_) => "normalize",
            Commands::Contributions(_) => "contributions",
            Commands::Risk(_) => "risk",
            Commands::Timeline(_) => "timeline",
            Commands::Summary(_) => "summary",
        }
    }
}

#[derive(Args)]
struct ClassifyArgs {
    /// Correlation coefficient, e.g. -0.42.
    #[arg(allow_hyphen_values = true)]
    coefficient: f64,
    /// Two-sided p-value.
    p_value: f64,
}

#[derive(Args)]
struct InputArgs {
    /// JSON file to read.
    file: PathBuf,
}

#[derive(Args)]
struct CorrelationsArgs {
    /// JSON array of correlation results.
    file: PathBuf,

    /// How many rows to show, strongest first.
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Show the full matrix instead of the strongest rows.
    #[arg(long)]
    matrix: bool,
}

#[derive(Args)]
struct MetricsArgs {
    /// JSON array of metric records.
    file: PathBuf,

    /// Metrics to include (comma separated). Defaults to every metric seen.
    #[arg(long, value_delimiter = ',')]
    metrics: Vec<String>,
}

#[derive(Args)]
struct EventArgs {
    /// JSON array of events, or an object with an `events` array.
    file: PathBuf,

    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Args)]
struct FilterArgs {
    /// Event types to keep (comma separated). Defaults to all types.
    #[arg(long = "types", value_delimiter = ',')]
    types: Vec<String>,

    /// Symbols to keep (comma separated). Defaults to all symbols.
    #[arg(long = "symbols", value_delimiter = ',')]
    symbols: Vec<String>,

    /// First day to include (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to include (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Lower impact bound. Defaults to [filters].min_impact.
    #[arg(long, allow_hyphen_values = true)]
    min_impact: Option<f64>,

    /// Upper impact bound. Defaults to [filters].max_impact.
    #[arg(long, allow_hyphen_values = true)]
    max_impact: Option<f64>,

    /// Keep only events whose |impact| reaches this value.
    #[arg(long)]
    min_abs_impact: Option<f64>,
}

impl FilterArgs {
    /// Builds the criteria, filling unset impact bounds from the configuration.
    fn criteria(&self, settings: &Settings) -> anyhow::Result<FilterCriteria> {
        let defaults = &settings.filters;
        let value_range = ValueRange::new(
            self.min_impact.unwrap_or(defaults.min_impact),
            self.max_impact.unwrap_or(defaults.max_impact),
        )?;

        let mut criteria = FilterCriteria::new()
            .with_types(self.types.iter().cloned())
            .with_symbols(self.symbols.iter().cloned())
            .with_value_range(value_range);
        if self.from.is_some() || self.to.is_some() {
            criteria = criteria.with_date_range(DateRange::from_days(self.from, self.to)?);
        }
        if let Some(min_abs_impact) = self.min_abs_impact {
            criteria = criteria.with_min_abs_impact(min_abs_impact);
        }
        Ok(criteria)
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_classify(args: ClassifyArgs, json: bool) -> anyhow::Result<()> {
    let result = CorrelationResult::new("-", "-", args.coefficient, args.p_value, 0);
    let classified = ClassifiedCorrelation::from(&result);
    if json {
        return print_json(&classified);
    }

    let mut table = Table::new();
    table.set_header(vec!["Coefficient", "Strength", "Direction", "p-value", "Significance"]);
    table.add_row(vec![
        format!("{:.3}", args.coefficient),
        classified.strength.to_string(),
        format!("{:?}", classified.direction),
        format!("{:.4}", args.p_value),
        classified.significance.to_string(),
    ]);
    println!("{table}");
    Ok(())
}

fn handle_correlations(args: CorrelationsArgs, json: bool) -> anyhow::Result<()> {
    let results: Vec<CorrelationResult> = read_json(&args.file)?;
    tracing::info!(results = results.len(), "Loaded correlation results.");

    if args.matrix {
        let matrix = CorrelationMatrix::build(&results);
        if json {
            return print_json(&matrix);
        }
        let mut table = Table::new();
        let mut header = vec!["Event type".to_string()];
        header.extend(matrix.metrics.iter().cloned());
        table.set_header(header);
        for (event_type, cells) in matrix.event_types.iter().zip(&matrix.cells) {
            let mut row = vec![event_type.clone()];
            row.extend(cells.iter().map(|cell| fmt_opt(*cell, 3)));
            table.add_row(row);
        }
        println!("{table}");
        return Ok(());
    }

    let rows = strongest(&results, args.limit);
    if json {
        return print_json(&rows);
    }
    let mut table = Table::new();
    table.set_header(vec![
        "Event type",
        "Metric",
        "Coefficient",
        "Strength",
        "p-value",
        "Significance",
        "n",
    ]);
    for row in &rows {
        table.add_row(vec![
            row.result.event_type.clone(),
            row.result.metric.clone(),
            format!("{:.3}", row.result.coefficient),
            row.strength.to_string(),
            format!("{:.4}", row.result.p_value),
            row.significance.to_string(),
            row.result.sample_size.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_rank(args: MetricsArgs, settings: &Settings, json: bool) -> anyhow::Result<()> {
    let records: Vec<MetricRecord> = read_json(&args.file)?;
    let metrics = metric_names(&records, args.metrics);
    let polarity = settings.ranking.polarity_table();

    let best = best_per_metric(&records, &metrics, &polarity);
    tracing::info!(
        entities = records.len(),
        metrics = metrics.len(),
        "Computed best entity per metric."
    );
    if json {
        return print_json(&best);
    }

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Polarity", "Best", "Value"]);
    for metric in &metrics {
        let (entity, value) = match best.get(metric).and_then(Option::as_ref) {
            Some(best) => (best.entity_id.clone(), format!("{:.4}", best.value)),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            metric.clone(),
            format!("{:?}", polarity.polarity(metric)),
            entity,
            value,
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_score(args: InputArgs, settings: &Settings, json: bool) -> anyhow::Result<()> {
    let records: Vec<MetricRecord> = read_json(&args.file)?;
    let scorer = WeightedScorer::new(
        settings.ranking.weights.clone(),
        settings.ranking.polarity_table(),
    )
    .context("Configure [ranking.weights] to use the score command")?;

    let ranked = scorer.rank(&records);
    if json {
        return print_json(&ranked);
    }

    let metrics: Vec<&String> = settings.ranking.weights.keys().collect();
    let mut table = Table::new();
    let mut header = vec!["#".to_string(), "Entity".to_string(), "Score".to_string()];
    header.extend(metrics.iter().map(|m| m.to_string()));
    table.set_header(header);
    for (position, record) in ranked.iter().enumerate() {
        let mut row = vec![
            (position + 1).to_string(),
            record.entity_id.clone(),
            format!("{:.2}", record.score),
        ];
        row.extend(
            metrics
                .iter()
                .map(|m| fmt_opt(record.components.get(*m).copied(), 1)),
        );
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

fn handle_normalize(args: MetricsArgs, json: bool) -> anyhow::Result<()> {
    let records: Vec<MetricRecord> = read_json(&args.file)?;
    let metrics = metric_names(&records, args.metrics);

    let axes = radar_profile(&records, &metrics);
    if json {
        return print_json(&axes);
    }

    let mut table = Table::new();
    let mut header = vec!["Metric".to_string()];
    header.extend(records.iter().map(|r| r.entity_id.clone()));
    table.set_header(header);
    for axis in &axes {
        let mut row = vec![axis.metric.clone()];
        row.extend(axis.values.iter().map(|v| match (v.normalized, v.raw) {
            (Some(normalized), Some(raw)) => format!("{normalized:.1} ({raw:.4})"),
            _ => "-".to_string(),
        }));
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

fn handle_contributions(args: InputArgs, json: bool) -> anyhow::Result<()> {
    let periods: Vec<ContributionPeriod> = read_json(&args.file)?;
    let points = cumulative_sum(&periods);
    tracing::info!(periods = points.len(), "Accumulated factor contributions.");
    if json {
        return print_json(&points);
    }

    let factors: Vec<&String> = points
        .last()
        .map(|point| point.totals.keys().collect())
        .unwrap_or_default();
    let mut table = Table::new();
    let mut header = vec!["Date".to_string()];
    header.extend(factors.iter().map(|f| f.to_string()));
    table.set_header(header);
    for point in &points {
        let mut row = vec![point.timestamp.clone()];
        row.extend(
            factors
                .iter()
                .map(|f| fmt_opt(point.totals.get(*f).copied(), 4)),
        );
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

fn handle_risk(args: InputArgs, json: bool) -> anyhow::Result<()> {
    let risk: RiskComponents = read_json(&args.file)?;
    let shares = decompose(&risk);
    if json {
        return print_json(&shares);
    }

    let mut table = Table::new();
    table.set_header(vec!["Factor", "Component", "Share %"]);
    for share in &shares {
        table.add_row(vec![
            share.factor.clone(),
            format!("{:.6}", share.component),
            fmt_opt(share.percentage, 2),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// A timeline entry as printed with `--json`: the event plus its typed metadata.
#[derive(Serialize)]
struct TimelineEntry<'a> {
    #[serde(flatten)]
    event: &'a Event,
    details: EventDetails,
}

#[derive(Serialize)]
struct TimelineMonth<'a> {
    key: &'a str,
    events: Vec<TimelineEntry<'a>>,
}

fn handle_timeline(args: EventArgs, settings: &Settings, json: bool) -> anyhow::Result<()> {
    let events = read_events(&args.file)?;
    let criteria = args.filter.criteria(settings)?;

    let filtered: Vec<Event> = apply_filters(&events, &criteria)
        .into_iter()
        .cloned()
        .collect();
    let timeline = group_by_month(&filtered);
    tracing::info!(
        fetched = events.len(),
        shown = filtered.len(),
        months = timeline.len(),
        "Built event timeline."
    );

    if json {
        let months: Vec<TimelineMonth> = timeline
            .iter()
            .map(|group| TimelineMonth {
                key: &group.key,
                events: group
                    .events
                    .iter()
                    .map(|event| TimelineEntry {
                        event: *event,
                        details: EventDetails::from_event(event),
                    })
                    .collect(),
            })
            .collect();
        return print_json(&months);
    }

    let mut table = Table::new();
    table.set_header(vec!["Month", "Date", "Type", "Symbol", "Impact", "Description"]);
    for group in &timeline {
        for event in &group.events {
            table.add_row(vec![
                group.key.clone(),
                event.date.clone(),
                event.event_type.clone(),
                event.symbol.clone().unwrap_or_else(|| "-".to_string()),
                fmt_opt(event.impact_score, 2),
                event.description.clone(),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

fn handle_summary(args: EventArgs, settings: &Settings, json: bool) -> anyhow::Result<()> {
    let events = read_events(&args.file)?;
    let criteria = args.filter.criteria(settings)?;
    let filtered: Vec<Event> = apply_filters(&events, &criteria)
        .into_iter()
        .cloned()
        .collect();

    let summary = summarize_by_type(&filtered);
    if json {
        return print_json(&summary);
    }

    let mut table = Table::new();
    table.set_header(vec!["Type", "Count", "Scored", "Mean", "Median", "Positive", "Negative"]);
    for row in &summary {
        table.add_row(vec![
            row.event_type.clone(),
            row.count.to_string(),
            row.scored.to_string(),
            fmt_opt(row.mean_impact, 3),
            fmt_opt(row.median_impact, 3),
            row.positive.to_string(),
            row.negative.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// Helpers
// ==============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn read_events(path: &Path) -> anyhow::Result<Vec<Event>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_events(&raw).with_context(|| format!("Failed to parse events in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The requested metrics, or every metric seen in first-seen order.
fn metric_names(records: &[MetricRecord], requested: Vec<String>) -> Vec<String> {
    if !requested.is_empty() {
        return requested;
    }
    let mut names: Vec<String> = Vec::new();
    for record in records {
        for metric in record.metrics.keys() {
            if !names.contains(metric) {
                names.push(metric.clone());
            }
        }
    }
    names
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => "-".to_string(),
    }
}
