use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use serde::Serialize;

use metric_deck::calculators::{
    estimate_sample_size, project_goal, run_readout, score_plan_item, AlertThresholds, GoalInputs, PowerInputs,
    ReadoutInputs,
};
use metric_deck::ingestion::{
    CompositeObserver, DataSource, FileObserver, IngestionObserver, LoadOptions, LogObserver, SourceFormat,
};
use metric_deck::profiling::{ProfileOptions, VarianceMethod};
use metric_deck::report;
use metric_deck::workspace::{LoadReport, Workspace};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dataset and print its column profiles
    Profile(ProfileArgs),

    /// Load a dataset and print descriptive insights
    Insights(SourceArgs),

    /// Scan the first numeric column of a dataset for spikes and drift
    Alerts(AlertArgs),

    /// Write a status report for the headline metric
    Report(ReportArgs),

    /// Draft an experiment design brief
    Brief(BriefArgs),

    /// Estimate the per-arm sample size
    Power(PowerArgs),

    /// Decide go/no-go for an experiment readout
    Readout(ReadoutArgs),

    /// Project a metric toward a goal
    Goal(GoalArgs),

    /// Score a roadmap initiative by impact over effort
    Plan(PlanArgs),

    /// Show the metric board
    Metrics,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Delimited,
    Json,
}

impl From<FormatArg> for SourceFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Delimited => SourceFormat::Delimited,
            FormatArg::Json => SourceFormat::Json,
        }
    }
}

#[derive(Args)]
struct SourceArgs {
    /// File path or http(s) URL
    source: String,

    /// Force the input format instead of inferring it from the extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Append load events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Args)]
struct ProfileArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Use Welford's method for variance instead of the sum-of-squares identity
    #[arg(long)]
    welford: bool,

    /// Also write the profiles as CSV to this path
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Number of rows to preview
    #[arg(long, default_value_t = 6)]
    preview: usize,
}

#[derive(Args)]
struct AlertArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Spike threshold in percent (std / mean)
    #[arg(long)]
    spike: Option<f64>,

    /// Drift threshold in percent (|mean - min| / mean)
    #[arg(long)]
    drift: Option<f64>,

    /// Experiment holdout share in percent
    #[arg(long, default_value_t = metric_deck::workspace::DEFAULT_HOLDOUT_PERCENT)]
    holdout: u8,
}

#[derive(Args)]
struct ReportArgs {
    /// Optional dataset (file path or URL)
    source: Option<String>,

    /// Force the input format instead of inferring it from the extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Args)]
struct BriefArgs {
    #[arg(long)]
    goal: Option<String>,

    /// Primary metric (defaults to the first registered metric)
    #[arg(long)]
    metric: Option<String>,

    #[arg(long)]
    guardrails: Option<String>,
}

#[derive(Args)]
struct PowerArgs {
    #[arg(long)]
    baseline: Option<f64>,
    #[arg(long)]
    mde: Option<f64>,
    #[arg(long)]
    alpha: Option<f64>,
    #[arg(long)]
    power: Option<f64>,
}

#[derive(Args)]
struct ReadoutArgs {
    #[arg(long, allow_negative_numbers = true)]
    observed: Option<f64>,
    #[arg(long)]
    mde: Option<f64>,
    /// Decision rule; "DS approval required" gates on --approved
    #[arg(long, default_value = "Ship if effect clears MDE")]
    rule: String,
    #[arg(long)]
    approved: bool,
    #[arg(long)]
    guardrails: Option<String>,
}

#[derive(Args)]
struct GoalArgs {
    #[arg(long)]
    current: Option<f64>,
    #[arg(long)]
    target: Option<f64>,
    #[arg(long)]
    weeks: Option<f64>,
    /// Expected weekly lift in percent
    #[arg(long, allow_negative_numbers = true)]
    lift: Option<f64>,
}

#[derive(Args)]
struct PlanArgs {
    name: String,
    #[arg(long)]
    impact: Option<f64>,
    #[arg(long)]
    effort: Option<f64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut ws = Workspace::with_sample_metrics();

    match &cli.command {
        Commands::Profile(args) => {
            if args.welford {
                ws = ws.with_profile_options(ProfileOptions {
                    variance: VarianceMethod::Welford,
                    ..Default::default()
                });
            }
            if !load_into(&mut ws, &args.source)? {
                return Ok(());
            }
            let Some(summary) = ws.summary() else {
                println!("Dataset has a header but no rows.");
                return Ok(());
            };
            if let Some(path) = &args.csv_out {
                let file = File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
                report::write_profiles_csv(&summary, file).map_err(|e| e.to_string())?;
                debug!("wrote profiles to {}", path.display());
            }
            if cli.json {
                print_json(&summary)?;
            } else {
                println!("{}\n", report::preview(ws.table(), args.preview));
                println!("{}", report::render_counts(&summary));
                for p in &summary.profiles {
                    let kind = if p.is_numeric { "numeric" } else { "text" };
                    println!(
                        "  {} ({kind}): {} unique, {} missing, sample [{}]",
                        p.name,
                        p.unique_count,
                        p.missing_count,
                        p.sample.join(", ")
                    );
                }
            }
        }
        Commands::Insights(args) => {
            if !load_into(&mut ws, args)? {
                return Ok(());
            }
            match ws.summary() {
                Some(summary) if cli.json => print_json(&report::insights(&summary))?,
                Some(summary) => println!("{}", report::render_insights(&summary)),
                None => println!("No numeric columns detected yet."),
            }
        }
        Commands::Alerts(args) => {
            load_into(&mut ws, &args.source)?;
            ws.set_holdout_percent(args.holdout);
            let thresholds = AlertThresholds {
                spike_percent: args.spike,
                drift_percent: args.drift,
            };
            let alert = ws.scan_alerts(&thresholds).map_err(|e| e.to_string())?;
            emit(cli.json, &alert)?;
        }
        Commands::Report(args) => {
            if let Some(location) = &args.source {
                let source_args = SourceArgs {
                    source: location.clone(),
                    format: args.format,
                    log_file: None,
                };
                load_into(&mut ws, &source_args)?;
            }
            let summary = ws.summary();
            println!("{}", report::status_report(summary.as_ref(), ws.metrics()));
        }
        Commands::Brief(args) => {
            let metric = args
                .metric
                .as_deref()
                .or_else(|| ws.metrics().names().first().copied());
            println!(
                "{}",
                report::design_brief(args.goal.as_deref(), metric, args.guardrails.as_deref())
            );
        }
        Commands::Power(args) => {
            let estimate = estimate_sample_size(&PowerInputs {
                baseline: args.baseline,
                mde: args.mde,
                alpha: args.alpha,
                power: args.power,
            })
            .map_err(|e| e.to_string())?;
            emit(cli.json, &estimate)?;
        }
        Commands::Readout(args) => {
            let readout = run_readout(&ReadoutInputs {
                observed: args.observed,
                mde: args.mde,
                rule: args.rule.clone(),
                approved: args.approved,
                guardrails: args.guardrails.clone(),
            });
            emit(cli.json, &readout)?;
        }
        Commands::Goal(args) => {
            let projection = project_goal(&GoalInputs {
                current: args.current,
                target: args.target,
                weeks: args.weeks,
                lift_percent: args.lift,
            })
            .map_err(|e| e.to_string())?;
            emit(cli.json, &projection)?;
        }
        Commands::Plan(args) => {
            let item = score_plan_item(&args.name, args.impact, args.effort).map_err(|e| e.to_string())?;
            emit(cli.json, &item)?;
        }
        Commands::Metrics => {
            if cli.json {
                print_json(ws.metrics())?;
            } else {
                for (priority, metrics) in ws.metrics().board() {
                    println!("== {priority}");
                    for m in metrics {
                        println!("{}", m.card());
                    }
                }
            }
        }
    }
    Ok(())
}

/// Load a source into the workspace. Returns `false` (after telling the user) when the source was
/// empty.
fn load_into(ws: &mut Workspace, args: &SourceArgs) -> Result<bool, String> {
    let mut observers: Vec<Arc<dyn IngestionObserver>> = vec![Arc::new(LogObserver)];
    if let Some(path) = &args.log_file {
        observers.push(Arc::new(FileObserver::new(path)));
    }
    let options = LoadOptions {
        format: args.format.map(SourceFormat::from),
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    };

    let source = DataSource::parse(&args.source);
    match ws.load(&source, &options) {
        Ok(LoadReport::Loaded { .. }) => Ok(true),
        Ok(LoadReport::NoData) => {
            println!("No data found in source.");
            Ok(false)
        }
        Err(e) if e.is_source_error() => Err(format!("Unable to fetch data: {e}")),
        Err(e) => Err(format!("Failed to parse file: {e}")),
    }
}

fn emit<T: Serialize + std::fmt::Display>(json: bool, value: &T) -> Result<(), String> {
    if json {
        print_json(value)
    } else {
        println!("{value}");
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}
