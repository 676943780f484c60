//! Session configuration from environment variables
//!
//! Controls where the selected connection is persisted, under which key,
//! and how long a change notification waits before the wallet list is re-read.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORE_DIR: &str = "./.wallet-session";
pub const DEFAULT_STORAGE_KEY: &str = "walletConnection";
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 100;

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Directory backing the file store
    pub store_dir: PathBuf,
    /// Key of the single persisted connection slot
    pub storage_key: String,
    /// Delay between a wallet change notification and the refresh it triggers
    pub refresh_delay: Duration,
    /// Persist the selected account and restore it on the next session
    pub persist_selection: bool,
}

impl SessionConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `WALLET_STORE_DIR`: directory for the file store (default `./.wallet-session`)
    /// - `WALLET_STORAGE_KEY`: persisted slot key (default `walletConnection`)
    /// - `WALLET_REFRESH_DELAY_MS`: refresh delay after a change event (default 100)
    /// - `WALLET_PERSIST_SELECTION`: `true`/`false` (default `true`)
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Ephemeral session without auto-reconnect
    /// WALLET_PERSIST_SELECTION=false cargo run -- status
    /// ```
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_dir = lookup("WALLET_STORE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_dir);

        let storage_key = lookup("WALLET_STORAGE_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.storage_key);

        let refresh_delay = match lookup("WALLET_REFRESH_DELAY_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    log::warn!(
                        "⚠️  Invalid WALLET_REFRESH_DELAY_MS '{}', using {}ms",
                        raw,
                        DEFAULT_REFRESH_DELAY_MS
                    );
                    defaults.refresh_delay
                }
            },
            None => defaults.refresh_delay,
        };

        let persist_selection = match lookup("WALLET_PERSIST_SELECTION") {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                log::warn!(
                    "⚠️  Invalid WALLET_PERSIST_SELECTION '{}', keeping persistence enabled",
                    raw
                );
                defaults.persist_selection
            }),
            None => defaults.persist_selection,
        };

        if persist_selection {
            log::info!("💾 Persisting selection under key '{}'", storage_key);
        } else {
            log::info!("🔌 Selection persistence disabled");
        }

        Self {
            store_dir,
            storage_key,
            refresh_delay,
            persist_selection,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            refresh_delay: Duration::from_millis(DEFAULT_REFRESH_DELAY_MS),
            persist_selection: true,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SessionConfig::from_lookup(|_| None);
        assert_eq!(config.store_dir, PathBuf::from(DEFAULT_STORE_DIR));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.refresh_delay, Duration::from_millis(100));
        assert!(config.persist_selection);
    }

    #[test]
    fn test_overrides() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("WALLET_STORE_DIR", "/tmp/sessions"),
            ("WALLET_STORAGE_KEY", "demoConnection"),
            ("WALLET_REFRESH_DELAY_MS", "25"),
            ("WALLET_PERSIST_SELECTION", "off"),
        ]));
        assert_eq!(config.store_dir, PathBuf::from("/tmp/sessions"));
        assert_eq!(config.storage_key, "demoConnection");
        assert_eq!(config.refresh_delay, Duration::from_millis(25));
        assert!(!config.persist_selection);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("WALLET_STORAGE_KEY", "   "),
            ("WALLET_REFRESH_DELAY_MS", "soon"),
            ("WALLET_PERSIST_SELECTION", "maybe"),
        ]));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.refresh_delay, Duration::from_millis(100));
        assert!(config.persist_selection);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" yes "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
