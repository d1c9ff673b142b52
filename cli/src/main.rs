use std::fs;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use marksweep::script::{self, Op};
use marksweep::{CollectStats, Context, GcConfig, GcError};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "marksweep", about = "Drive a mark-and-sweep heap with a tiny operation script")]
struct Cli {
    /// Path to a script of heap operations
    file: Option<String>,
    /// Run inline operations, e.g. "int 1; int 2; pair; pop; collect"
    #[arg(long)]
    eval: Option<String>,
    /// JSON file with `stack_max`, `initial_threshold` and `max_objects`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of roots
    #[arg(long)]
    stack_max: Option<usize>,
    /// Live-object count that triggers the first collection
    #[arg(long)]
    threshold: Option<usize>,
    /// Hard cap on live objects
    #[arg(long)]
    max_objects: Option<usize>,
    /// Print version and exit
    #[arg(long)]
    version: bool,
}

/// Result of running a whole script: the final cycle and the first failing op, if any.
struct Run {
    last: CollectStats,
    failure: Option<(Op, GcError)>,
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!(
            "{} {}",
            "marksweep".bright_cyan().bold(),
            env!("CARGO_PKG_VERSION").bright_black()
        );
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            process::exit(1);
        }
    };

    let source = match (cli.eval, cli.file) {
        (Some(code), _) => code,
        (None, Some(file)) => match fs::read_to_string(&file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!(
                    "{} could not read '{}': {e}",
                    "error:".red().bold(),
                    file.yellow()
                );
                process::exit(1);
            }
        },
        (None, None) => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "pass a script file or --eval \"ops\"",
            )
            .exit(),
    };

    let ops = match script::parse(&source) {
        Ok(ops) => ops,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err).with_source_code(source));
            process::exit(1);
        }
    };

    let ctx = match Context::with_config(config) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            process::exit(1);
        }
    };

    if let Some((op, err)) = run_script(ctx, &ops).failure {
        eprintln!("{} {} {err}", "fatal:".red().bold(), format!("`{op}`").yellow());
        process::exit(1);
    }
}

/// Runs `ops` until one fails, then destroys the context either way so the final cycle
/// is always reported.
fn run_script(mut ctx: Context, ops: &[Op]) -> Run {
    let mut failure = None;
    for op in ops {
        match script::execute(&mut ctx, op) {
            Ok(outcome) => render::print_outcome(&outcome),
            Err(err) => {
                failure = Some((*op, err));
                break;
            }
        }
    }
    Run {
        last: ctx.destroy(),
        failure,
    }
}

fn load_config(cli: &Cli) -> Result<GcConfig, GcError> {
    let mut config = match &cli.config {
        Some(path) => GcConfig::from_path(path)?,
        None => GcConfig::default(),
    };
    if let Some(stack_max) = cli.stack_max {
        config.stack_max = stack_max;
    }
    if let Some(threshold) = cli.threshold {
        config.initial_threshold = threshold;
    }
    if cli.max_objects.is_some() {
        config.max_objects = cli.max_objects;
    }
    config.validate()?;
    Ok(config)
}
