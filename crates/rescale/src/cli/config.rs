//! `--show-config`: print the effective configuration.

use rescale_core::Config;
use std::path::Path;

/// Print where the config came from, then the config as TOML.
pub fn execute(source: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    let path = source
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);
    let origin = if path.exists() { "" } else { " (not found, using defaults)" };

    println!("# {}{}", path.display(), origin);
    println!("{}", config.to_toml()?);
    Ok(())
}
