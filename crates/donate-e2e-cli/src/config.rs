//! CLI configuration
//!
//! Suite settings are layered: defaults, then the `--config` file, then
//! environment variables, then `run` flags.

use crate::commands::RunArgs;
use crate::error::CliResult;
use donate_e2e::SuiteConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Map `-v` count and `-q` to a level
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default tracing filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "donate_e2e=info,info",
            Self::Debug => "donate_e2e=debug,debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stdout().features().colors_supported(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Defaults overlaid by the optional file and then the environment
pub fn load_suite_config(path: Option<&Path>) -> CliResult<SuiteConfig> {
    load_suite_config_from(path, |key| std::env::var(key).ok())
}

/// [`load_suite_config`] with an arbitrary variable lookup
pub fn load_suite_config_from<F>(path: Option<&Path>, lookup: F) -> CliResult<SuiteConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match path {
        Some(path) => SuiteConfig::from_yaml_file(path)?,
        None => SuiteConfig::default(),
    };
    Ok(config.apply_env_from(lookup)?)
}

/// Overlay `run` flags on a loaded configuration
pub fn apply_run_args(mut config: SuiteConfig, args: &RunArgs) -> CliResult<SuiteConfig> {
    if let Some(ref url) = args.base_url {
        config.base_url.clone_from(url);
    }
    if args.headed {
        config.headless = false;
    }
    if args.no_sandbox {
        config.sandbox = false;
    }
    if let Some(ref path) = args.chromium {
        config.chromium_path = Some(path.clone());
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(3, false), Verbosity::Debug);
            assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
        }

        #[test]
        fn test_predicates() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
        }

        #[test]
        fn test_log_filter() {
            assert_eq!(Verbosity::Quiet.log_filter(), "error");
            assert!(Verbosity::Debug.log_filter().contains("debug"));
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_explicit_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }

        #[test]
        fn test_cli_config_builder() {
            let config = CliConfig::new()
                .with_verbosity(Verbosity::Verbose)
                .with_color(ColorChoice::Never);
            assert_eq!(config.verbosity, Verbosity::Verbose);
            assert_eq!(config.color, ColorChoice::Never);
        }
    }

    mod layering_tests {
        use super::*;

        #[test]
        fn test_defaults_without_file() {
            let config = load_suite_config_from(None, no_env).unwrap();
            assert_eq!(config, SuiteConfig::default());
        }

        #[test]
        fn test_file_then_env() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "base_url: http://file.test\nheadless: false").unwrap();

            let config = load_suite_config_from(Some(file.path()), |key| {
                (key == donate_e2e::ENV_BASE_URL).then(|| "http://env.test".to_string())
            })
            .unwrap();

            assert_eq!(config.base_url, "http://env.test");
            assert!(!config.headless);
        }

        #[test]
        fn test_flags_override_everything() {
            let config = load_suite_config_from(None, no_env).unwrap();
            let args = RunArgs {
                base_url: Some("http://flag.test".into()),
                headed: true,
                no_sandbox: true,
                chromium: Some("/opt/chromium".into()),
                mock: false,
            };

            let config = apply_run_args(config, &args).unwrap();

            assert_eq!(config.base_url, "http://flag.test");
            assert!(!config.headless);
            assert!(!config.sandbox);
            assert_eq!(config.chromium_path.as_deref(), Some("/opt/chromium"));
        }

        #[test]
        fn test_invalid_flag_url_rejected() {
            let config = SuiteConfig::default();
            let args = RunArgs {
                base_url: Some("ftp://nope".into()),
                ..RunArgs::default()
            };
            assert!(apply_run_args(config, &args).is_err());
        }

        #[test]
        fn test_missing_file_is_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("absent.yaml");
            assert!(load_suite_config_from(Some(&path), no_env).is_err());
        }
    }
}
