use std::time::Duration;

use thiserror::Error;

pub const CLUSTER_IDENTIFIER_VAR: &str = "AURORA_PG_CLUSTER_NAME";
pub const RELATIONS_VAR: &str = "ITEMS_TO_PREWARM";
pub const ENDPOINT_IDENTIFIER_VAR: &str = "DB_CLUSTER_ENDPOINT_IDENTIFIER";
pub const SECRET_REF_VAR: &str = "DB_SECRET_ARN";
pub const DATABASE_NAME_VAR: &str = "DB_NAME";
pub const PREWARM_MODE_VAR: &str = "PREWARM_MODE";
pub const SSL_MODE_VAR: &str = "DB_SSL_MODE";
pub const CONNECT_TIMEOUT_VAR: &str = "DB_CONNECT_TIMEOUT_SECS";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),

    #[error("{0} must list at least one relation")]
    NoRelations(&'static str),

    #[error("{var} has unsupported value '{value}' (expected {expected})")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// `pg_prewarm` mode argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrewarmMode {
    #[default]
    Buffer,
    Read,
    Prefetch,
}

impl PrewarmMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buffer => "buffer",
            Self::Read => "read",
            Self::Prefetch => "prefetch",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buffer" => Some(Self::Buffer),
            "read" => Some(Self::Read),
            "prefetch" => Some(Self::Prefetch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DbSslMode {
    Disable,
    Prefer,
    #[default]
    Require,
    VerifyCa,
    VerifyFull,
}

impl DbSslMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "disable" => Some(Self::Disable),
            "prefer" => Some(Self::Prefer),
            "require" => Some(Self::Require),
            "verify-ca" | "verify_ca" => Some(Self::VerifyCa),
            "verify-full" | "verify_full" => Some(Self::VerifyFull),
            _ => None,
        }
    }
}

/// Handler configuration, resolved once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrewarmConfig {
    pub cluster_identifier: String,
    pub relations: Vec<String>,
    pub endpoint_identifier: String,
    pub secret_ref: String,
    pub database_name: String,
    pub prewarm_mode: PrewarmMode,
    pub ssl_mode: DbSslMode,
    pub connect_timeout: Duration,
}

impl PrewarmConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(var))
        };
        let optional = |var: &'static str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let relations = parse_relations(&required(RELATIONS_VAR)?);
        if relations.is_empty() {
            return Err(ConfigError::NoRelations(RELATIONS_VAR));
        }

        let prewarm_mode = match optional(PREWARM_MODE_VAR) {
            Some(raw) => PrewarmMode::parse(&raw).ok_or(ConfigError::Invalid {
                var: PREWARM_MODE_VAR,
                value: raw,
                expected: "buffer, read, or prefetch",
            })?,
            None => PrewarmMode::default(),
        };

        let ssl_mode = match optional(SSL_MODE_VAR) {
            Some(raw) => DbSslMode::parse(&raw).ok_or(ConfigError::Invalid {
                var: SSL_MODE_VAR,
                value: raw,
                expected: "disable, prefer, require, verify-ca, or verify-full",
            })?,
            None => DbSslMode::default(),
        };

        let connect_timeout_secs = match optional(CONNECT_TIMEOUT_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    var: CONNECT_TIMEOUT_VAR,
                    value: raw,
                    expected: "a positive number of seconds",
                })?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        Ok(Self {
            cluster_identifier: required(CLUSTER_IDENTIFIER_VAR)?,
            relations,
            endpoint_identifier: required(ENDPOINT_IDENTIFIER_VAR)?,
            secret_ref: required(SECRET_REF_VAR)?,
            database_name: required(DATABASE_NAME_VAR)?,
            prewarm_mode,
            ssl_mode,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}

/// Splits a comma-separated relation list, keeping order and dropping blanks.
pub fn parse_relations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|relation| !relation.is_empty())
        .map(str::to_string)
        .collect()
}
