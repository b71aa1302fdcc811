use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const REASONING_OPEN: &str = "<think>";
pub const REASONING_CLOSE: &str = "</think>";

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern"));
// Repeated so "# # Title" loses both markers in one pass.
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:#{1,6}[ \t]*)+").expect("heading pattern"));

/// Model reply split into what the user sees and the hidden reasoning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOutput {
    pub visible: String,
    pub reasoning: String,
}

pub fn parse_output(raw: &str) -> ParsedOutput {
    if raw.is_empty() {
        return ParsedOutput::default();
    }

    let start = raw.find(REASONING_OPEN);
    let end = raw.find(REASONING_CLOSE);

    match (start, end) {
        (Some(start), Some(end)) if end > start => {
            let reasoning = raw[start + REASONING_OPEN.len()..end].trim().to_string();
            let remainder = format!("{}{}", &raw[..start], &raw[end + REASONING_CLOSE.len()..]);
            ParsedOutput {
                visible: strip_markup(remainder.trim()),
                reasoning,
            }
        }
        _ => ParsedOutput {
            visible: strip_markup(raw),
            reasoning: String::new(),
        },
    }
}

/// Removes `**bold**` emphasis and leading `#` heading markers.
pub fn strip_markup(text: &str) -> String {
    let unbolded = BOLD.replace_all(text, "$1");
    HEADING.replace_all(&unbolded, "").into_owned()
}
