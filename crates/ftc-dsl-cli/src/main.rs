//! ftc-dsl CLI entry point.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::FtcConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ftc-dsl", version)]
#[command(about = "Transpile FTC robot DSL programs to LinearOpMode Java")]
struct Cli {
    /// DSL source file
    input: PathBuf,

    /// Output file (default: INPUT with the configured extension)
    output: Option<PathBuf>,

    /// Write the result to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Print the parsed program as JSON instead of Java
    #[arg(long)]
    ast: bool,

    /// Config file applied after the global and project config
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "ftc_dsl=warn",
        1 => "ftc_dsl=info",
        _ => "ftc_dsl=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let root = std::env::current_dir().context("failed to determine current directory")?;
    let config = FtcConfig::load(&root, cli.config.as_deref())?;

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let output = if cli.ast {
        let unit = ftc_dsl::read_unit(&source)
            .with_context(|| format!("failed to read {}", cli.input.display()))?;
        let mut json = serde_json::to_string_pretty(&unit)?;
        json.push('\n');
        json
    } else {
        ftc_dsl::transpile_with(&source, &config.options())
    };

    if cli.stdout {
        print!("{}", output);
        return Ok(());
    }

    let path = output_path(cli, &config);
    std::fs::write(&path, output).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote output");
    println!(
        "Successfully transpiled {} to {}",
        cli.input.display(),
        path.display()
    );
    Ok(())
}

fn output_path(cli: &Cli, config: &FtcConfig) -> PathBuf {
    match &cli.output {
        Some(path) => path.clone(),
        None if cli.ast => cli.input.with_extension("json"),
        None => cli.input.with_extension(config.extension()),
    }
}
