//! Command-line runner: read a JSON program tree and execute it.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use quickbeam::{EvalContext, Frontend, Interpreter, JsonFrontend, OutputSink};

/// Run a Quickbeam program tree.
#[derive(Debug, Parser)]
#[command(name = "quickbeam", version, about)]
struct Cli {
    /// Program tree as JSON, or `-` to read stdin
    file: PathBuf,

    /// Log every evaluated node (overridden by RUST_LOG)
    #[arg(long)]
    trace: bool,

    /// Maximum binding-stack depth
    #[arg(long, default_value_t = quickbeam::environment::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("quickbeam: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let source = read_source(&cli.file)?;
    let frontend = JsonFrontend::new();
    let program = frontend
        .parse(&source)
        .with_context(|| format!("failed to parse {}", cli.file.display()))?;

    let ctx = EvalContext::with_max_call_depth(cli.max_depth).with_trace(cli.trace);
    let mut interp = Interpreter::with_context(ctx, OutputSink::stdout());
    interp.run(&program)?;
    Ok(())
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Logs go to stderr so they never mix with program output.
fn init_tracing(trace: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if trace { "quickbeam=trace" } else { "quickbeam=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}
