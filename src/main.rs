use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use tile_search::report::{self, Format};
use tile_search::{search, Domain, Error, Heuristic, Problem, SearchOptions, Strategy, TieBreak};

// Input format:
// nine digits in row-major order, concatenated or separated by whitespace.
// 0 is a blank; the single-blank domain has one, the multi-blank domain three.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// File holding the initial board
    input: PathBuf,

    /// Report file; the report goes to stdout when omitted
    output: Option<PathBuf>,

    /// Puzzle variant
    #[clap(short, long, value_enum, default_value_t = Domain::SingleBlank)]
    domain: Domain,

    /// Strategy to run; repeat for several. Defaults to all five for the
    /// single-blank domain and A* for the multi-blank domain
    #[clap(short, long = "strategy", value_enum)]
    strategies: Vec<Strategy>,

    /// Heuristic for Greedy and A*
    #[clap(long, value_enum)]
    heuristic: Option<Heuristic>,

    /// Report layout; defaults to actions for single-blank, trace for multi-blank
    #[clap(long, value_enum)]
    format: Option<Format>,

    /// Drop superseded frontier entries eagerly instead of skipping them on pop
    #[clap(long)]
    purge_stale: bool,

    /// Pop order among frontier entries with equal keys
    #[clap(long, value_enum, default_value_t = TieBreak::Heap)]
    ties: TieBreak,

    /// Raise the log level (-v info, -vv debug); RUST_LOG takes precedence
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> tile_search::Result<()> {
    let text = fs::read_to_string(&args.input)?;
    let problem = Problem::new(args.domain, args.domain.parse(&text)?);

    let options = SearchOptions {
        heuristic: args.heuristic,
        purge_stale: args.purge_stale,
        ties: args.ties,
    };
    let format = args.format.unwrap_or_else(|| Format::default_for(args.domain));
    let strategies: Vec<Strategy> = if args.strategies.is_empty() {
        Strategy::defaults(args.domain).collect()
    } else {
        args.strategies.clone()
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    for strategy in strategies {
        match search(&problem, strategy, &options) {
            Ok(solution) => report::write_solution(&mut out, format, &solution)?,
            Err(Error::Exhausted { strategy, expanded }) => {
                report::write_failure(&mut out, strategy, expanded)?
            }
            Err(e) => return Err(e),
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
