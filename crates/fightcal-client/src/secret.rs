//! Secret references in `config.toml`.
//!
//! The calendar access token, session secret and session token may be
//! written as references instead of literal values:
//!
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - `pass::path/in/store` takes the first line of `pass show path/in/store`
//! - anything else is used verbatim

use std::process::Command;

use thiserror::Error;

/// Why a secret reference could not be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("environment variable `{0}` is not set")]
    MissingEnv(String),

    #[error("`pass show {path}` failed: {message}")]
    Pass { path: String, message: String },

    #[error("secret reference `{0}` resolved to an empty value")]
    Empty(String),
}

/// Resolves `value`, expanding `env::` and `pass::` references.
pub fn resolve(value: &str) -> Result<String, SecretError> {
    let resolved = if let Some(var) = value.strip_prefix("env::") {
        std::env::var(var).map_err(|_| SecretError::MissingEnv(var.to_string()))?
    } else if let Some(path) = value.strip_prefix("pass::") {
        pass_show(path)?
    } else {
        return Ok(value.to_string());
    };

    if resolved.trim().is_empty() {
        return Err(SecretError::Empty(value.to_string()));
    }
    Ok(resolved)
}

/// Resolves an optional setting; `None` stays `None`.
pub fn resolve_optional(value: Option<&str>) -> Result<Option<String>, SecretError> {
    value.map(resolve).transpose()
}

fn pass_show(path: &str) -> Result<String, SecretError> {
    let fail = |message: String| SecretError::Pass {
        path: path.to_string(),
        message,
    };

    let output = Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| fail(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(fail(format!("{} ({})", stderr.trim(), output.status)));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| fail("no output".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_values_pass_through() {
        assert_eq!(resolve("ya29.token").unwrap(), "ya29.token");
        assert_eq!(resolve("").unwrap(), "");
    }

    #[test]
    fn env_reference() {
        unsafe {
            std::env::set_var("_FIGHTCAL_TEST_TOKEN", "from-env");
        }
        assert_eq!(resolve("env::_FIGHTCAL_TEST_TOKEN").unwrap(), "from-env");
        assert_eq!(
            resolve_optional(Some("env::_FIGHTCAL_TEST_TOKEN")).unwrap(),
            Some("from-env".to_string())
        );
        unsafe {
            std::env::remove_var("_FIGHTCAL_TEST_TOKEN");
        }
    }

    #[test]
    fn missing_env_is_error() {
        assert_eq!(
            resolve("env::_FIGHTCAL_SURELY_UNSET_98765"),
            Err(SecretError::MissingEnv("_FIGHTCAL_SURELY_UNSET_98765".to_string()))
        );
    }

    #[test]
    fn empty_env_is_error() {
        unsafe {
            std::env::set_var("_FIGHTCAL_TEST_EMPTY", " ");
        }
        assert!(matches!(
            resolve("env::_FIGHTCAL_TEST_EMPTY"),
            Err(SecretError::Empty(_))
        ));
        unsafe {
            std::env::remove_var("_FIGHTCAL_TEST_EMPTY");
        }
    }

    #[test]
    fn none_stays_none() {
        assert_eq!(resolve_optional(None).unwrap(), None);
    }

    #[test]
    fn unknown_pass_entry_is_error() {
        assert!(resolve("pass::fightcal/does/not/exist/12345").is_err());
    }
}
