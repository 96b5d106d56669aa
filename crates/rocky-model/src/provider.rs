use std::fmt;

use serde::{Deserialize, Serialize};

/// A diagnostics backend selectable by the UI.
///
/// `Mock` is the deterministic engine alone; the others add a model's
/// candidate result on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Mock,
    Gemini,
    OpenAi,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Mock, Provider::Gemini, Provider::OpenAi];

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Mock => "mock",
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
