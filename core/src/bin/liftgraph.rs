use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use liftgraph_core::{
    cli, history_rows, metrics, normalize::parse_date, render_chart, ChartConfig, CsvStore,
    Formula, NewRecord, RecordStore, Session, NO_DATA_NOTICE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Strength-training performance curves", long_about = None)]
struct Cli {
    /// Directory holding the per-user stores
    #[arg(long, global = true, default_value = ".", value_hint = ValueHint::DirPath)]
    root: PathBuf,

    /// User name; data lives in <root>/perfs_<user>/
    #[arg(short, long, global = true, env = "LIFTGRAPH_USER")]
    user: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List exercises in the store
    Exercises,
    /// Build the chart for one exercise and write the figure JSON
    Chart(ChartArgs),
    /// Show the log of one exercise, newest first
    History { exercise: String },
    /// Record a new session
    Add(AddArgs),
    /// Delete a row (index as shown by `history`)
    Delete { exercise: String, index: usize },
    /// Copy uploaded CSV sheets into the store
    Import {
        #[arg(value_hint = ValueHint::DirPath)]
        source: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ChartArgs {
    exercise: String,

    /// Output JSON path (`-` for stdout)
    #[arg(short, long, default_value = "-", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// JSON config file; flags below override it
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Fold repetitions into the plotted value
    #[arg(long, action = ArgAction::SetTrue)]
    reps: bool,

    #[arg(long, value_enum)]
    formula: Option<FormulaOpt>,

    /// Repetition weight (>= 0.1)
    #[arg(long)]
    coefficient: Option<f64>,

    /// Sets per session for the tonnage formula
    #[arg(long)]
    sets_factor: Option<f64>,

    /// Leave out injury/break overlays
    #[arg(long, action = ArgAction::SetTrue)]
    no_breaks: bool,

    /// Print a text summary to stderr
    #[arg(long, action = ArgAction::SetTrue)]
    summary: bool,

    /// Print pipeline counters (Prometheus text format) to stderr
    #[arg(long, action = ArgAction::SetTrue)]
    metrics: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormulaOpt {
    Additive,
    Averaged,
    Tonnage,
}

impl From<FormulaOpt> for Formula {
    fn from(f: FormulaOpt) -> Self {
        match f {
            FormulaOpt::Additive => Formula::Additive,
            FormulaOpt::Averaged => Formula::AveragedAdditive,
            FormulaOpt::Tonnage => Formula::Tonnage,
        }
    }
}

#[derive(Args, Debug)]
struct AddArgs {
    exercise: String,
    /// Session date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    date: String,
    /// Load in kg
    #[arg(long)]
    kg: f64,
    /// Repetitions per set, up to four (e.g. --sets 8,8,6)
    #[arg(long, value_delimiter = ',', num_args = 0..=4)]
    sets: Vec<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let user = cli
        .user
        .as_deref()
        .ok_or_else(|| anyhow!("a user name is required (--user or LIFTGRAPH_USER)"))?;
    let mut session = Session::new(user)?;
    let mut store = CsvStore::open(&cli.root, &session)
        .with_context(|| format!("opening store for {}", session.user()))?;

    match cli.command {
        Command::Exercises => {
            for name in store.exercises()? {
                println!("{name}");
            }
            Ok(())
        }
        Command::Chart(args) => handle_chart(&store, &mut session, args),
        Command::History { exercise } => {
            let raw = store.load_series(&exercise)?;
            cli::print_history(&history_rows(&raw));
            Ok(())
        }
        Command::Add(args) => handle_add(&mut store, args),
        Command::Delete { exercise, index } => {
            let removed = store.delete_row(&exercise, index)?;
            info!("deleted row {index} of {exercise}: {}", removed.join(","));
            Ok(())
        }
        // one process is one import; the once-per-session guard is for
        // long-lived sessions (Python front end, embedding)
        Command::Import { source } => {
            let copied = store
                .import_from(&source)
                .with_context(|| format!("importing {}", source.display()))?;
            println!("{copied} sheet(s) imported");
            Ok(())
        }
    }
}

fn handle_chart(store: &CsvStore, session: &mut Session, args: ChartArgs) -> Result<()> {
    let file_cfg = match args.config.as_ref() {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    let flags = ChartConfig {
        repetitions: args.reps.then_some(true),
        formula: args.formula.map(Formula::from),
        coefficient: args.coefficient,
        sets_factor: args.sets_factor,
        show_breaks: args.no_breaks.then_some(false),
    };
    session.options = file_cfg.merged(flags).validate()?;

    let figure = match render_chart(store, session, &args.exercise) {
        Ok(f) => f,
        Err(e) if e.is_missing_column() => {
            warn!("{e}");
            println!("{NO_DATA_NOTICE}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let json = figure.to_json_pretty()?;
    if args.output.as_os_str() == "-" {
        let mut out = io::stdout().lock();
        out.write_all(json.as_bytes())?;
        out.write_all(b"\n")?;
    } else {
        fs::write(&args.output, json)
            .with_context(|| format!("writing {}", args.output.display()))?;
        info!("figure written to {}", args.output.display());
    }

    if args.summary {
        eprint!("{}", cli::chart_report(&figure));
    }
    if args.metrics {
        eprint!("{}", metrics::global().render_text()?);
    }
    Ok(())
}

fn handle_add(store: &mut CsvStore, args: AddArgs) -> Result<()> {
    let date: NaiveDate =
        parse_date(&args.date).ok_or_else(|| anyhow!("unreadable date '{}'", args.date))?;
    let mut sets = [0.0; 4];
    for (slot, v) in sets.iter_mut().zip(args.sets.iter()) {
        *slot = *v;
    }
    store.append_record(
        &args.exercise,
        &NewRecord {
            date,
            load: args.kg,
            sets,
        },
    )?;
    Ok(())
}
