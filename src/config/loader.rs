//! Environment lookup helpers shared by the config types.

use crate::error::ConfigError;
use std::str::FromStr;

/// Source of configuration values keyed by variable name. Any `Fn(&str) -> Option<String>` works.
pub trait VarSource {
    fn var(&self, key: &str) -> Option<String>;
}

impl<F> VarSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        (self)(key)
    }
}

/// Process environment (after `.env` has been loaded by the binary).
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Required non-empty variable.
pub fn required(src: &dyn VarSource, key: &'static str) -> Result<String, ConfigError> {
    match src.var(key) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(key)),
    }
}

/// Optional variable parsed with `FromStr`; unset or blank falls back to `default`.
pub fn parsed_or<T: FromStr>(src: &dyn VarSource, key: &'static str, default: T) -> Result<T, ConfigError> {
    match src.var(key) {
        Some(v) if !v.trim().is_empty() => v.trim().parse().map_err(|_| ConfigError::InvalidVar {
            key,
            value: v,
        }),
        _ => Ok(default),
    }
}

/// Boolean flag: `1`, `true`, `yes`, `on` (any case) are true, anything else set is false.
pub fn flag(src: &dyn VarSource, key: &'static str) -> bool {
    src.var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
