//! # Node Configuration
//!
//! Assembles every subsystem's configuration from `ERP_*` environment
//! variables. CLI flags are applied on top in `main.rs`.

use std::env;
use std::net::IpAddr;
use std::str::FromStr;

use erp_01_purchase_posting::{LedgerConnectionConfig, PostingConfig};
use erp_02_resource_api::ApiConfig;
use erp_telemetry::TelemetryConfig;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeConfig {
    /// HTTP API configuration.
    pub api: ApiConfig,
    /// Posting function and element type names.
    pub posting: PostingConfig,
    /// PostgreSQL ledger; `None` unless a database URL is given.
    pub ledger: Option<LedgerConnectionConfig>,
    /// Logging, tracing and metrics.
    pub telemetry: TelemetryConfig,
    /// Post to an in-memory ledger instead of a database.
    pub demo: bool,
    /// Offices allowed to use the receipt resource; empty allows all.
    pub receipt_offices: Vec<i32>,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error("api: {0}")]
    Api(#[from] erp_02_resource_api::ConfigError),

    #[error("posting: {0}")]
    Posting(#[from] erp_01_purchase_posting::ConfigError),

    /// Neither a database nor demo mode was requested
    #[error("no ledger configured: set ERP_DATABASE_URL or run with --demo")]
    NoLedger,
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { name, value }),
    }
}

impl NodeConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ERP_HOST` | `127.0.0.1` |
    /// | `ERP_PORT` | `8080` |
    /// | `ERP_PAGE_SIZE` | `25` |
    /// | `ERP_MAX_BODY_BYTES` | `2097152` |
    /// | `ERP_DATABASE_URL` | unset |
    /// | `ERP_DB_MAX_CONNECTIONS` | `5` |
    /// | `ERP_DB_ACQUIRE_TIMEOUT_SECS` | `30` |
    /// | `ERP_POSTING_FUNCTION` | `transactions.post_purchase` |
    /// | `ERP_DEMO` | `false` (ignores `ERP_DATABASE_URL` when set) |
    /// | `ERP_RECEIPT_OFFICES` | unset (comma separated office ids) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(host) = parse_var::<IpAddr>(&lookup, "ERP_HOST")? {
            config.api.host = host;
        }
        if let Some(port) = parse_var(&lookup, "ERP_PORT")? {
            config.api.port = port;
        }
        if let Some(page_size) = parse_var(&lookup, "ERP_PAGE_SIZE")? {
            config.api.page_size = page_size;
        }
        if let Some(limit) = parse_var(&lookup, "ERP_MAX_BODY_BYTES")? {
            config.api.max_body_bytes = limit;
        }
        if let Some(function) = lookup("ERP_POSTING_FUNCTION") {
            config.posting.function = function;
        }
        if let Some(demo) = parse_var(&lookup, "ERP_DEMO")? {
            config.demo = demo;
        }

        if let Some(database_url) = lookup("ERP_DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            let mut ledger = LedgerConnectionConfig {
                database_url,
                ..LedgerConnectionConfig::default()
            };
            if let Some(max) = parse_var(&lookup, "ERP_DB_MAX_CONNECTIONS")? {
                ledger.max_connections = max;
            }
            if let Some(secs) = parse_var(&lookup, "ERP_DB_ACQUIRE_TIMEOUT_SECS")? {
                ledger.acquire_timeout_secs = secs;
            }
            config.ledger = Some(ledger);
        }
        if config.demo {
            config.ledger = None;
        }

        if let Some(offices) = lookup("ERP_RECEIPT_OFFICES") {
            config.receipt_offices = offices
                .split(',')
                .filter(|id| !id.trim().is_empty())
                .map(|id| {
                    id.trim().parse().map_err(|_| ConfigError::InvalidVar {
                        name: "ERP_RECEIPT_OFFICES",
                        value: offices.clone(),
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        Ok(config)
    }

    /// Validate every section and require a ledger.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.posting.validate()?;
        match &self.ledger {
            Some(ledger) => ledger.validate()?,
            None if self.demo => {}
            None => return Err(ConfigError::NoLedger),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_need_a_ledger() {
        let config = NodeConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.ledger.is_none());
        assert!(matches!(config.validate(), Err(ConfigError::NoLedger)));
    }

    #[test]
    fn test_demo_mode_validates() {
        let config = NodeConfig::from_lookup(lookup(&[("ERP_DEMO", "true")])).unwrap();
        assert!(config.demo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_demo_overrides_database_url() {
        let config = NodeConfig::from_lookup(lookup(&[
            ("ERP_DEMO", "true"),
            ("ERP_DATABASE_URL", "postgres://erp@localhost/erp"),
        ]))
        .unwrap();
        assert!(config.demo);
        assert!(config.ledger.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_settings() {
        let config = NodeConfig::from_lookup(lookup(&[
            ("ERP_DATABASE_URL", "postgres://erp@localhost/erp"),
            ("ERP_DB_MAX_CONNECTIONS", "12"),
            ("ERP_PORT", "9000"),
        ]))
        .unwrap();

        let ledger = config.ledger.as_ref().unwrap();
        assert_eq!(ledger.max_connections, 12);
        assert_eq!(ledger.acquire_timeout_secs, 30);
        assert_eq!(config.api.port, 9000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let err = NodeConfig::from_lookup(lookup(&[("ERP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "ERP_PORT", .. }));
    }

    #[test]
    fn test_receipt_offices() {
        let config = NodeConfig::from_lookup(lookup(&[("ERP_RECEIPT_OFFICES", "1, 4,")])).unwrap();
        assert_eq!(config.receipt_offices, vec![1, 4]);
    }

    #[test]
    fn test_bad_posting_function_rejected() {
        let mut config = NodeConfig::from_lookup(lookup(&[("ERP_DEMO", "true")])).unwrap();
        config.posting.function = "post; drop".into();
        assert!(matches!(config.validate(), Err(ConfigError::Posting(_))));
    }
}
