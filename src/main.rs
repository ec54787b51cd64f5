use clap::Parser;
use rnbench::bench::kernels::Scratch;
use rnbench::bench::rng::BenchRng;
use rnbench::bench::verify::verify;
use rnbench::cli::{renderer_for, run_with_progress, ProgressSink, Silent};
use rnbench::config::history::{render_table, RunHistory};
use rnbench::config::{BenchmarkConfig, ProgressStyle};
use rnbench::util::units::{format_duration, format_rate};
use rnbench::{error, Result, Scheduler, VERSION};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StyleArg {
    Bar,
    Dots,
}

/// Retro Nano Bench: deterministic 30 second CPU micro-benchmark
#[derive(Debug, Parser)]
#[command(name = "rnbench", version)]
struct Args {
    /// Run every kernel once and log its result before timing
    #[arg(long)]
    verify: bool,

    /// Progress rendering style
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Print the run record as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Do not append this run to the run history
    #[arg(long)]
    no_save: bool,

    /// Show the N most recent saved runs and exit
    #[arg(long, value_name = "N")]
    history: Option<usize>,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Enable informational logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn show_history(history: &RunHistory, limit: usize) -> Result<()> {
    let entries = history.recent(limit)?;
    if entries.is_empty() {
        println!("No saved runs in {}", history.path().display());
    } else {
        print!("{}", render_table(&entries));
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut config = BenchmarkConfig::load()?;
    if args.verify {
        config = config.with_verify(true);
    }
    if args.no_save {
        config = config.with_save_results(false);
    }
    if let Some(style) = args.style {
        config = config.with_progress_style(match style {
            StyleArg::Bar => ProgressStyle::Bar,
            StyleArg::Dots => ProgressStyle::Dots,
        });
    }

    if args.save_config {
        config.save()?;
        println!("Settings written to {}", BenchmarkConfig::config_file_path()?.display());
        return Ok(());
    }

    if let Some(limit) = args.history {
        return show_history(&RunHistory::open_default()?, limit);
    }

    if !args.json {
        println!("Retro Nano Bench v{}\n", VERSION);
    }

    if config.verify {
        for (kind, result) in verify(&mut BenchRng::default(), &mut Scratch::new()) {
            if !args.json {
                println!("{}", kind.describe(result));
            }
        }
        if !args.json {
            println!();
        }
    }

    let sink: Box<dyn ProgressSink + Send> = if args.json {
        Box::new(Silent)
    } else {
        renderer_for(&config)
    };
    let (record, _) = run_with_progress(Scheduler::new(), sink).await?;
    info!("{}", record.summary());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("\n\nResult: {}", record.score);
        println!(
            "Elapsed: {} ({})",
            format_duration(record.elapsed),
            format_rate(record.iterations_per_second)
        );
    }

    if config.save_results {
        let history = RunHistory::open_default()?;
        history.record(&record)?;
        info!(path = %history.path().display(), "Run added to history");
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args).await {
        eprintln!("{}", error::user_friendly_message(&err));
        std::process::exit(1);
    }
}
