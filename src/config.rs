use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tourism_backoffice")]
#[command(about = "Back-office API for points of interest, municipalities and tours")]
pub struct AppConfig {
    /// Interface to bind.
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "APP_PORT", default_value_t = 3001)]
    pub port: u16,

    /// Directory holding the collection files.
    #[arg(long, env = "DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Tracing directives, e.g. `tourism_backoffice=info`. Falls back to `RUST_LOG`.
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Reads `.env` if present, then command-line flags with environment fallbacks.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = AppConfig::try_parse_from([
            "tourism_backoffice",
            "--host",
            "127.0.0.1",
            "--port",
            "8088",
            "--data-dir",
            "/srv/data",
            "--log-filter",
            "tourism_backoffice=warn",
        ])
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:8088");
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.log_filter.as_deref(), Some("tourism_backoffice=warn"));
    }

    #[test]
    fn rejects_a_port_out_of_range() {
        let parsed = AppConfig::try_parse_from(["tourism_backoffice", "--port", "70000"]);
        assert!(parsed.is_err());
    }
}
