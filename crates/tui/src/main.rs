mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use rostergrid_core::scale::Factor;

struct Args {
    path: PathBuf,
    factor: Option<Factor>,
}

fn parse_args() -> Result<Args> {
    let mut path = None;
    let mut factor = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--factor" => {
                let raw = args.next().context("--factor needs a value")?;
                let value: i64 = raw
                    .parse()
                    .with_context(|| format!("invalid --factor {raw:?}"))?;
                factor = Some(Factor::new(value)?);
            }
            _ if path.is_none() => path = Some(PathBuf::from(&arg)),
            _ => bail!("unexpected argument {arg:?}"),
        }
    }
    let Some(path) = path else {
        bail!("Usage: rostergrid <roster.json> [--factor N]");
    };
    Ok(Args { path, factor })
}

fn main() -> Result<()> {
    // Quiet by default: the TUI owns the terminal.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args()?;
    let data =
        std::fs::read(&args.path).with_context(|| format!("reading {}", args.path.display()))?;
    let roster = rostergrid_core::parsers::parse_roster(&data)
        .with_context(|| format!("parsing {}", args.path.display()))?;

    let mut config = roster
        .scale_config()
        .context("roster has no shifts and no view window")?;
    if let Some(factor) = args.factor {
        config.factor = factor;
    }
    let scale = config.build()?;
    info!(
        "loaded {} spots, {} shifts; factor {} {}",
        roster.spots.len(),
        roster.shifts.len(),
        config.factor,
        config.unit
    );

    for violation in roster.contract_violations() {
        warn!("{violation}");
    }

    renderer::render_tui(&roster, scale)?;
    Ok(())
}
