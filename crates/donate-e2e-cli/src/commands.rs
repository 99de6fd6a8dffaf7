//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Donate-e2e: runs the declined-card scenario against the donation widget
#[derive(Parser, Debug)]
#[command(name = "donate-e2e")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the declined-card donation scenario
    Run(RunArgs),

    /// Print a freshly generated test case
    Generate(GenerateArgs),

    /// Print the effective configuration as YAML
    Config,
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Scheme and host of the test page
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Disable the chromium sandbox (containers, CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Chromium binary
    #[arg(long, value_name = "PATH")]
    pub chromium: Option<String>,

    /// Run against the in-memory widget instead of a browser
    #[arg(long)]
    pub mock: bool,
}

/// Arguments for the generate command
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Output format
    #[arg(long, default_value = "json")]
    pub format: CaseFormat,
}

/// Output format for generated test cases
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

/// Color argument for CLI
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_run_flags() {
            let cli = Cli::try_parse_from([
                "donate-e2e",
                "run",
                "--base-url",
                "http://localhost:8080",
                "--headed",
                "--no-sandbox",
                "--chromium",
                "/usr/bin/chromium",
            ])
            .unwrap();
            let Commands::Run(args) = cli.command else {
                panic!("expected run");
            };
            assert_eq!(args.base_url.as_deref(), Some("http://localhost:8080"));
            assert!(args.headed);
            assert!(args.no_sandbox);
            assert_eq!(args.chromium.as_deref(), Some("/usr/bin/chromium"));
            assert!(!args.mock);
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::try_parse_from([
                "donate-e2e",
                "config",
                "-vv",
                "--color",
                "never",
                "--config",
                "suite.yaml",
            ])
            .unwrap();
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
            assert_eq!(cli.config, Some(PathBuf::from("suite.yaml")));
            assert!(matches!(cli.command, Commands::Config));
        }

        #[test]
        fn test_generate_format() {
            let cli = Cli::try_parse_from(["donate-e2e", "generate", "--format", "yaml"]).unwrap();
            let Commands::Generate(args) = cli.command else {
                panic!("expected generate");
            };
            assert_eq!(args.format, CaseFormat::Yaml);
        }

        #[test]
        fn test_generate_defaults_to_json() {
            let cli = Cli::try_parse_from(["donate-e2e", "generate"]).unwrap();
            let Commands::Generate(args) = cli.command else {
                panic!("expected generate");
            };
            assert_eq!(args.format, CaseFormat::Json);
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["donate-e2e"]).is_err());
        }

        #[test]
        fn test_unknown_format_rejected() {
            assert!(Cli::try_parse_from(["donate-e2e", "generate", "--format", "toml"]).is_err());
        }
    }

    mod color_tests {
        use super::*;
        use crate::config::ColorChoice;

        #[test]
        fn test_color_arg_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        }
    }
}
