//! Environment variable utilities
//!
//! Typed reads of `WSM_*` settings with defaults.
//!
//! ```ignore
//! use wsmem_core::env::{env_get, env_get_bool};
//!
//! let step: usize = env_get("WSM_GROWTH_STEP", 4096);
//! let flush = env_get_bool("WSM_FLUSH_EPRINT", false);
//! ```

use std::str::FromStr;

/// Get environment variable parsed as `T`, or `default` if unset or unparsable
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Get environment variable as boolean
///
/// "1", "true", "yes", "on" (any case) are true, any other value is false.
/// Unset returns `default`.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

/// `Some(T)` if the variable is set and parses, `None` otherwise
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[inline]
pub fn env_get_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[inline]
pub fn env_is_set(key: &str) -> bool {
    std::env::var_os(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable; tests run in parallel.

    #[test]
    fn test_env_get_default() {
        let val: usize = env_get("__WSM_TEST_UNSET__", 42);
        assert_eq!(val, 42);
        assert!(env_get_opt::<usize>("__WSM_TEST_UNSET__").is_none());
        assert_eq!(env_get_str("__WSM_TEST_UNSET__", "x"), "x");
        assert!(!env_is_set("__WSM_TEST_UNSET__"));
    }

    #[test]
    fn test_env_get_parses() {
        std::env::set_var("__WSM_TEST_NUM__", " 8192 ");
        let val: usize = env_get("__WSM_TEST_NUM__", 0);
        assert_eq!(val, 8192);
        std::env::remove_var("__WSM_TEST_NUM__");
    }

    #[test]
    fn test_env_get_invalid_parse() {
        std::env::set_var("__WSM_TEST_BAD__", "lots");
        let val: usize = env_get("__WSM_TEST_BAD__", 99);
        assert_eq!(val, 99);
        std::env::remove_var("__WSM_TEST_BAD__");
    }

    #[test]
    fn test_env_get_bool_variants() {
        for (raw, expected) in [("1", true), ("TRUE", true), ("yes", true), ("on", true),
                                ("0", false), ("off", false), ("garbage", false)] {
            std::env::set_var("__WSM_TEST_BOOL__", raw);
            assert_eq!(env_get_bool("__WSM_TEST_BOOL__", !expected), expected, "{}", raw);
        }
        std::env::remove_var("__WSM_TEST_BOOL__");
        assert!(env_get_bool("__WSM_TEST_BOOL__", true));
    }
}
