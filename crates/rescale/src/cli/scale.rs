//! `--relative` and `--absolute`: resize one image.

use clap::Args;
use rescale_core::{Config, ScaleMode, ScaleRequest, Scaler};

/// Positionals and flags shared by both scale modes.
#[derive(Args, Debug, Default)]
pub struct ScaleArgs {
    /// --relative: <IN> <OUT> <SX> [SY]; --absolute: <IN> <OUT> <W> <H> or <IN> <OUT> <WxH>
    #[arg(value_name = "ARGS", num_args = 1..=4, allow_negative_numbers = true)]
    pub params: Vec<String>,

    /// Report the target size and interpolation without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,
}

/// Execute a scale request.
pub fn execute(mode: ScaleMode, args: &ScaleArgs, config: &Config) -> anyhow::Result<()> {
    let request = ScaleRequest::from_positionals(mode, &args.params, args.dry_run)?;
    let plan = Scaler::new(config).scale(&request)?;

    if !request.is_dry_run() {
        println!(
            "Success: Scaled image written to: {}",
            request.output().display()
        );
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("Dry run ({}):", mode.to_string().to_lowercase());
        println!("{}", plan);
    }

    Ok(())
}
