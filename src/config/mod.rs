// Configuration module entry point
// Loads listener configuration from file, environment and built-in defaults

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the default `config.toml` (optional).
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension),
    /// layered with `WEBHOOK_*` environment variables over built-in defaults.
    /// The defaults reproduce a plain `0.0.0.0:8000` listener.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("WEBHOOK"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.access_log", true)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Host shown in the startup banner and used as the fallback URL
    /// authority. An unspecified bind address is reachable locally as
    /// `localhost`.
    pub fn display_host(&self) -> &str {
        match self.server.host.as_str() {
            "0.0.0.0" | "::" => "localhost",
            host => host,
        }
    }

    /// Authority used to rebuild a request URL when the client sent no
    /// `Host` header.
    pub fn local_authority(&self) -> String {
        format!("{}:{}", self.display_host(), self.server.port)
    }
}
