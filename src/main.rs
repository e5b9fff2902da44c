mod app;
mod config;
mod data;
mod error;
mod report;
mod similarity;

use anyhow::Context;
use clap::Parser;

use config::{Args, Config};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::resolve(Args::parse()).context("loading configuration")?;
    log::debug!("config: {config:?}");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app::run(&config, &mut out)
        .with_context(|| format!("processing {}", config.input_path.display()))?;

    Ok(())
}
