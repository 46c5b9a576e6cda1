use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use synthdesk_snapshot::config::Config;

fn init_tracing(config: &Config) {
    // Diagnostics go to stderr — stdout carries only the rendered snapshot.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match synthdesk_snapshot::generate(&args) {
        Some(output) => print!("{output}"),
        None => debug!("nothing to render"),
    }

    Ok(())
}
