//! Configuration for the purchase posting gateway

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Posting configuration
///
/// Names of the ledger function and the composite element types it takes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingConfig {
    /// Ledger posting function
    pub function: String,
    /// Element type of the line item array
    pub line_item_type: String,
    /// Element type of the attachment array
    pub attachment_type: String,
    /// Element type of the related transaction id array
    pub related_id_type: String,
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            function: "transactions.post_purchase".to_string(),
            line_item_type: "transactions.stock_detail_type".to_string(),
            attachment_type: "core.attachment_type".to_string(),
            related_id_type: "bigint".to_string(),
        }
    }
}

impl PostingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("function", &self.function),
            ("line_item_type", &self.line_item_type),
            ("attachment_type", &self.attachment_type),
            ("related_id_type", &self.related_id_type),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(field));
            }
            // Names are spliced into SQL text
            if !value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ' ' | '(' | ')'))
            {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("unexpected character in {:?}", value),
                });
            }
        }
        Ok(())
    }
}

/// Ledger connection settings for the Postgres adapter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConnectionConfig {
    pub database_url: String,
    /// Pool size
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
}

impl Default for LedgerConnectionConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

impl LedgerConnectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Empty("database_url"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                field: "max_connections",
                reason: "must be at least 1".into(),
            });
        }
        if self.acquire_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "acquire_timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
