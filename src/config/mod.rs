/// Process configuration, sourced from the environment.
///
/// The snapshot tool is deliberately argument-driven; the environment only
/// controls diagnostics, never what gets rendered.
#[derive(Debug, Clone)]
pub struct Config {
    /// Filter directive for the tracing subscriber (`RUST_LOG` syntax).
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // dotenvy loads .env, but doesn't override already-set env vars
        dotenvy::dotenv().ok();

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self { log_level })
    }
}
