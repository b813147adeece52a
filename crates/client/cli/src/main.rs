//! Scenario replay entry point.
mod config;
mod replay;

use anyhow::{Context, Result};
use config::CliConfig;
use effect_content::ContentFactory;
use replay::Replay;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = CliConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        scenario = %config.scenario,
        "loading content"
    );

    let content = ContentFactory::new(&config.data_dir);
    let effect_config = content.load_config()?;
    let catalog = content.load_effects()?;
    let scenario = content
        .load_scenario(&config.scenario)
        .with_context(|| format!("scenario `{}`", config.scenario))?;

    let mut replay = Replay::new(&scenario, &catalog, effect_config);
    for line in replay.run(&scenario)? {
        println!("{}", line);
    }
    println!();
    for line in replay.summary() {
        println!("{}", line);
    }

    Ok(())
}

/// Setup logging to stderr so stdout carries only replay output.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
