//! Donate-e2e CLI: runs the declined-card donation scenario
//!
//! ## Usage
//!
//! ```bash
//! donate-e2e run                          # Headless chromium against the live page
//! donate-e2e run --headed --no-sandbox    # Visible window, container friendly
//! donate-e2e run --mock                   # In-memory widget, no browser
//! donate-e2e generate --format yaml       # Print a generated test case
//! donate-e2e --config suite.yaml config   # Show the effective configuration
//! ```

use clap::Parser;
use donate_e2e::{Generators, TestCase};
use donate_e2e_cli::{
    apply_run_args, load_suite_config, Backend, CaseFormat, Cli, CliConfig, CliResult,
    ColorChoice, Commands, GenerateArgs, RunArgs, ScenarioRunner, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    let color: ColorChoice = cli.color.into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli, config: &CliConfig) -> CliResult<()> {
    let suite = load_suite_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Run(args) => run_scenario(config, suite, &args).await,
        Commands::Generate(args) => run_generate(&args),
        Commands::Config => {
            print!("{}", suite.to_yaml()?);
            Ok(())
        }
    }
}

async fn run_scenario(
    config: &CliConfig,
    suite: donate_e2e::SuiteConfig,
    args: &RunArgs,
) -> CliResult<()> {
    let suite = apply_run_args(suite, args)?;
    let backend = if args.mock {
        Backend::Mock
    } else {
        Backend::Chromium
    };
    ScenarioRunner::new(config, suite).run(backend).await?;
    Ok(())
}

fn run_generate(args: &GenerateArgs) -> CliResult<()> {
    let case = TestCase::declined_card_with(&mut Generators::new());
    let rendered = match args.format {
        CaseFormat::Json => serde_json::to_string_pretty(&case)?,
        CaseFormat::Yaml => serde_yaml_ng::to_string(&case)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
