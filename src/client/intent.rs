use serde::{Deserialize, Serialize};
use std::fmt;

/// Badge shown next to an agent reply. Purely cosmetic: the prompt sent
/// upstream is the same whatever the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Summarize,
    Analyze,
    Write,
    Answer,
    Generate,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Analyze => "analyze",
            Self::Write => "write",
            Self::Answer => "answer",
            Self::Generate => "generate",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First matching keyword wins, in the order summarize, analyze,
/// write/create, answer/what.
pub fn classify(input: &str) -> Action {
    let lower = input.to_lowercase();

    if lower.contains("summarize") {
        Action::Summarize
    } else if lower.contains("analyze") {
        Action::Analyze
    } else if lower.contains("write") || lower.contains("create") {
        Action::Write
    } else if lower.contains("answer") || lower.contains("what") {
        Action::Answer
    } else {
        Action::Generate
    }
}
