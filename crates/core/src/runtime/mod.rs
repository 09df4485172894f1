//! Interpreter resolution.
//!
//! Maps a workflow's interpreter selector (e.g. `"3.x"`) to a concrete
//! binary on PATH. Provisioning of the surrounding sandbox is the host's
//! business; the engine only needs a usable interpreter path and a clean,
//! writable working directory per run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving an interpreter selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The selector does not describe a supported interpreter series.
    #[error("Unsupported interpreter selector '{0}': only major version 3 is supported")]
    UnsupportedSelector(String),

    /// No candidate binary for the selector was found on PATH.
    #[error("No interpreter matching '{selector}' found on PATH")]
    NotFound { selector: String },
}

/// Candidate binary names for a selector, in preference order.
///
/// - `"3"` / `"3.x"`: the latest major-3 interpreter (`python3`, then
///   `python`)
/// - `"3.N"`: that minor series (`python3.N`), falling back to `python3`
pub fn candidate_binaries(selector: &str) -> Result<Vec<String>, RuntimeError> {
    if selector == "3" || selector == "3.x" {
        return Ok(vec!["python3".to_string(), "python".to_string()]);
    }

    if let Some(minor) = selector.strip_prefix("3.") {
        if !minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit()) {
            return Ok(vec![format!("python{selector}"), "python3".to_string()]);
        }
    }

    Err(RuntimeError::UnsupportedSelector(selector.to_string()))
}

/// Resolve a selector to the first matching binary on PATH.
pub fn resolve_interpreter(selector: &str) -> Result<PathBuf, RuntimeError> {
    for candidate in candidate_binaries(selector)? {
        if let Ok(path) = which::which(&candidate) {
            return Ok(path);
        }
    }

    Err(RuntimeError::NotFound {
        selector: selector.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_for_latest_major_three() {
        let candidates = candidate_binaries("3.x").unwrap();
        assert_eq!(candidates, vec!["python3".to_string(), "python".to_string()]);

        let candidates = candidate_binaries("3").unwrap();
        assert_eq!(candidates[0], "python3");
    }

    #[test]
    fn test_candidates_for_minor_series() {
        let candidates = candidate_binaries("3.11").unwrap();
        assert_eq!(
            candidates,
            vec!["python3.11".to_string(), "python3".to_string()]
        );
    }

    #[test]
    fn test_major_two_is_unsupported() {
        let err = candidate_binaries("2.7").unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedSelector(_)));
    }

    #[test]
    fn test_garbage_selector_is_unsupported() {
        assert!(candidate_binaries("latest").is_err());
        assert!(candidate_binaries("3.abc").is_err());
        assert!(candidate_binaries("3.").is_err());
    }

    #[test]
    fn test_resolve_unsupported_selector() {
        let err = resolve_interpreter("2.x").unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedSelector(_)));
    }
}
