use std::time::Duration;

use postforge_pipeline::PipelineConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables. `ANTHROPIC_API_KEY`
/// has no default; the binary refuses to start without it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `900`). An orchestration
    /// run holds its request open for the whole pipeline, so this must
    /// cover the slowest full run, not a single provider call.
    pub request_timeout_secs: u64,
    /// Log output format: `pretty` or `json`.
    pub log_format: String,
    /// Anthropic API key. The binary exits at startup when unset; tests
    /// leave it `None` and inject a generator directly.
    pub anthropic_api_key: Option<String>,
    /// Model override; defaults to the provider crate's canonical model.
    pub anthropic_model: Option<String>,
    /// Base URL override, for proxies and local mock servers.
    pub anthropic_base_url: Option<String>,
    /// Posts generated concurrently per batch.
    pub generation_batch_size: usize,
    /// Pause between post batches, in milliseconds.
    pub generation_batch_delay_ms: u64,
    /// Per-provider-call timeout in seconds.
    pub generation_call_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                    |
    /// |--------------------------------|----------------------------|
    /// | `HOST`                         | `0.0.0.0`                  |
    /// | `PORT`                         | `3000`                     |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`         | `900`                      |
    /// | `LOG_FORMAT`                   | `pretty`                   |
    /// | `ANTHROPIC_API_KEY`            | (required at startup)      |
    /// | `ANTHROPIC_MODEL`              | provider default           |
    /// | `ANTHROPIC_BASE_URL`           | provider default           |
    /// | `GENERATION_BATCH_SIZE`        | `4`                        |
    /// | `GENERATION_BATCH_DELAY_MS`    | `2000`                     |
    /// | `GENERATION_CALL_TIMEOUT_SECS` | `120`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".into());

        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        let anthropic_model = std::env::var("ANTHROPIC_MODEL").ok();
        let anthropic_base_url = std::env::var("ANTHROPIC_BASE_URL").ok();

        let generation_batch_size: usize = std::env::var("GENERATION_BATCH_SIZE")
            .unwrap_or_else(|_| "4".into())
            .parse()
            .expect("GENERATION_BATCH_SIZE must be a valid usize");

        let generation_batch_delay_ms: u64 = std::env::var("GENERATION_BATCH_DELAY_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("GENERATION_BATCH_DELAY_MS must be a valid u64");

        let generation_call_timeout_secs: u64 = std::env::var("GENERATION_CALL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("GENERATION_CALL_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_format,
            anthropic_api_key,
            anthropic_model,
            anthropic_base_url,
            generation_batch_size,
            generation_batch_delay_ms,
            generation_call_timeout_secs,
        }
    }

    /// Pipeline tuning assembled from the generation env vars. Token
    /// budgets and temperature keep their library defaults.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            batch_size: self.generation_batch_size,
            batch_delay: Duration::from_millis(self.generation_batch_delay_ms),
            call_timeout: Duration::from_secs(self.generation_call_timeout_secs),
            ..PipelineConfig::default()
        }
    }
}
