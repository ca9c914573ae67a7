//! Rescale CLI - resize raster images by scale factor or to an exact size.
//!
//! # Usage
//!
//! ```bash
//! # Halve the width, double the height
//! rescale --relative in.png out.png 0.5 2.0
//!
//! # Uniform scale (sy defaults to sx)
//! rescale --relative in.png out.jpg 1.5
//!
//! # Exact size, two ways
//! rescale --absolute in.png out.png 640 480
//! rescale --absolute in.png out.png 640x480
//!
//! # Show what would happen
//! rescale --absolute in.png out.png 640x480 --dry-run --json
//!
//! # Built-in end-to-end check
//! rescale --self-test
//! ```
//!
//! Exit code is 0 on success and 1 on any failure, including bad arguments.

use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use rescale_core::{Config, ScaleMode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod cli;
mod logging;

/// Rescale - resize raster images by scale factor or to an exact size.
#[derive(Parser, Debug)]
#[command(name = "rescale")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["relative", "absolute", "self_test", "show_config"])
))]
struct Cli {
    /// Scale by factors: <IN> <OUT> <SX> [SY]
    #[arg(long)]
    relative: bool,

    /// Resize to an exact size: <IN> <OUT> <W> <H> or <IN> <OUT> <WxH>
    #[arg(long)]
    absolute: bool,

    /// Generate synthetic images, scale them and verify the output sizes
    #[arg(long)]
    self_test: bool,

    /// Print the effective configuration as TOML
    #[arg(long)]
    show_config: bool,

    #[command(flatten)]
    scale: cli::scale::ScaleArgs,

    /// Directory for --self-test fixtures and outputs
    #[arg(long, value_name = "DIR", requires = "self_test")]
    self_test_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", env = "RESCALE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn scale_mode(&self) -> Option<ScaleMode> {
        if self.relative {
            Some(ScaleMode::Relative)
        } else if self.absolute {
            Some(ScaleMode::Absolute)
        } else {
            None
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    // Logging isn't initialized yet, so config problems go straight to stderr.
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Rescale v{}", rescale_core::VERSION);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Failed: {e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    if let Some(mode) = cli.scale_mode() {
        return cli::scale::execute(mode, &cli.scale, config);
    }
    if !cli.scale.params.is_empty() || cli.scale.dry_run {
        anyhow::bail!("positional arguments and --dry-run only apply to --relative/--absolute");
    }
    if cli.self_test {
        return cli::self_test::execute(cli.self_test_dir.as_deref(), config);
    }
    cli::config::execute(cli.config.as_deref(), config)
}

/// An explicit `--config` must load; the default location falls back to defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load_from(path)
            .map_err(|e| anyhow::anyhow!("cannot load config {}: {}", path.display(), e));
    }
    Ok(Config::load().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config: {e}\n  \
             Using default configuration. Check it with `rescale --show-config`."
        );
        Config::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rescale").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_relative_with_dry_run_last() {
        let cli = parse(&["--relative", "a.png", "b.png", "0.5", "2", "--dry-run"]).unwrap();
        assert_eq!(cli.scale_mode(), Some(ScaleMode::Relative));
        assert_eq!(cli.scale.params, ["a.png", "b.png", "0.5", "2"]);
        assert!(cli.scale.dry_run);
    }

    #[test]
    fn test_parse_absolute_wxh() {
        let cli = parse(&["--absolute", "a.png", "b.png", "640x480"]).unwrap();
        assert_eq!(cli.scale_mode(), Some(ScaleMode::Absolute));
        assert_eq!(cli.scale.params.len(), 3);
    }

    #[test]
    fn test_parse_negative_factor_reaches_validation() {
        let cli = parse(&["--relative", "a.png", "b.png", "-0.5"]).unwrap();
        assert_eq!(cli.scale.params[2], "-0.5");
    }

    #[test]
    fn test_modes_are_exclusive() {
        let err = parse(&["--relative", "--absolute", "a", "b", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_mode_is_required() {
        assert!(parse(&["a.png", "b.png", "2"]).is_err());
    }

    #[test]
    fn test_self_test_flag() {
        let cli = parse(&["--self-test", "--self-test-dir", "/tmp/rescale"]).unwrap();
        assert!(cli.self_test);
        assert_eq!(cli.scale_mode(), None);
        assert_eq!(cli.self_test_dir, Some(PathBuf::from("/tmp/rescale")));
    }

    #[test]
    fn test_json_requires_dry_run() {
        assert!(parse(&["--absolute", "a.png", "b.png", "1x1", "--json"]).is_err());
    }

    #[test]
    fn test_too_many_positionals() {
        assert!(parse(&["--relative", "a", "b", "1", "2", "3"]).is_err());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let err = load_config(Some(Path::new("/nonexistent/rescale.toml"))).unwrap_err();
        assert!(err.to_string().contains("cannot load config"));
    }
}
