//! Labelmatch Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all labelmatch crates.

use serde::{Deserialize, Serialize};

/// Configuration for parser behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Reject expressions that do not start with an opening brace
    pub require_braces: bool,
}

impl ParserConfig {
    /// Strict mode: `{...}` is mandatory
    pub fn strict() -> Self {
        Self {
            require_braces: true,
        }
    }
}

/// Processing phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lexer,
    Parser,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Lexer => "lexer",
            Phase::Parser => "parser",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("labelmatch::{}", self.as_str())
    }
}
