//! Output formatting for dependency trees.
//!
//! Submodules:
//! - [`color`]: color and styling helpers (semantic colors for ids and
//!   statuses)
//! - [`tree`]: dependency tree rendering with ASCII/Unicode connectors

pub mod color;
pub mod tree;

use std::env;

/// Configuration for tree output.
///
/// Controls whether connectors use ASCII fallbacks instead of Unicode and
/// whether ANSI colors are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only connectors instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `GIRDER_ASCII`: set to "1" or "true" for ASCII-only connectors
    ///   (default: false)
    /// - `NO_COLOR`: standard env var to disable colors (any value disables)
    /// - `GIRDER_COLOR`: set to "0" or "false" to disable colors
    ///   (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Shared implementation of [`Self::from_env`] with the variable lookup
    /// injected, so the parsing rules are testable without touching the
    /// process environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let use_ascii = match get("GIRDER_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "GIRDER_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // Respect the NO_COLOR standard (https://no-color.org/), with
        // GIRDER_COLOR available for explicit control.
        let use_colors = get("NO_COLOR").is_none()
            && get("GIRDER_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}
