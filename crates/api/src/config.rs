use std::path::PathBuf;

use policyscore_core::sentinel::{MissingSentinel, DEFAULT_MISSING_CODE};

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A `*` entry allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JSON model artifact (default: `model.json`).
    pub model_path: PathBuf,
    /// Optional JSON rule file replacing the built-in policy rules.
    pub rules_path: Option<PathBuf>,
    /// Numeric code callers use for "missing"; `None` disables translation.
    pub missing_sentinel: Option<MissingSentinel>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MODEL_PATH`           | `model.json`               |
    /// | `RULES_PATH`           | unset (built-in rules)     |
    /// | `MISSING_SENTINEL`     | `-999` (empty disables)    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_or(&lookup, "PORT", 8000_u16, "a valid u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30_u64, "a valid u64")?;

        let model_path = lookup("MODEL_PATH")
            .unwrap_or_else(|| "model.json".into())
            .into();

        let rules_path = lookup("RULES_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let missing_sentinel = match lookup("MISSING_SENTINEL") {
            None => Some(MissingSentinel::new(DEFAULT_MISSING_CODE)),
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(code) if code.is_finite() => Some(MissingSentinel::new(code)),
                _ => {
                    return Err(ConfigError {
                        var: "MISSING_SENTINEL",
                        expected: "a finite number or empty",
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            model_path,
            rules_path,
            missing_sentinel,
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError {
            var,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.model_path, PathBuf::from("model.json"));
        assert!(cfg.rules_path.is_none());
        assert_eq!(cfg.missing_sentinel, Some(MissingSentinel::new(-999.0)));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("RULES_PATH", "/etc/policyscore/rules.json"),
            ("MISSING_SENTINEL", "-1"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(
            cfg.rules_path,
            Some(PathBuf::from("/etc/policyscore/rules.json"))
        );
        assert_eq!(cfg.missing_sentinel, Some(MissingSentinel::new(-1.0)));
    }

    #[test]
    fn empty_sentinel_disables_translation() {
        let cfg = config(&[("MISSING_SENTINEL", "")]).unwrap();
        assert!(cfg.missing_sentinel.is_none());
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.var, "PORT");
        assert_eq!(err.to_string(), "PORT must be a valid u16, got 'eighty'");
    }

    #[test]
    fn invalid_sentinel_is_reported() {
        let err = config(&[("MISSING_SENTINEL", "nan")]).unwrap_err();
        assert_eq!(err.var, "MISSING_SENTINEL");
    }
}
