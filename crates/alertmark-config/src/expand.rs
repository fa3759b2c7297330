//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config field in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("theme/alerts.css", "f").unwrap(), "theme/alerts.css");
    }

    #[test]
    fn test_expand_default_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ALERTMARK_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${ALERTMARK_EXPAND_UNSET:-theme}/alerts.css", "f").unwrap(),
            "theme/alerts.css"
        );
    }

    #[test]
    fn test_expand_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ALERTMARK_EXPAND_SET", "/srv/theme");
        }
        assert_eq!(
            expand_env("${ALERTMARK_EXPAND_SET}/alerts.css", "f").unwrap(),
            "/srv/theme/alerts.css"
        );
        unsafe {
            std::env::remove_var("ALERTMARK_EXPAND_SET");
        }
    }

    #[test]
    fn test_expand_missing_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ALERTMARK_EXPAND_MISSING");
        }
        let err = expand_env("${ALERTMARK_EXPAND_MISSING}", "alerts.stylesheet").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("alerts.stylesheet"));
        assert!(msg.contains("ALERTMARK_EXPAND_MISSING"));
    }
}
