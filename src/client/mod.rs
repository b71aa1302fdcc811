//! Adapter used by front-ends to talk to the proxy: request building, reply
//! parsing, reasoning extraction and the offline fallback.

mod adapter;
pub mod intent;
pub mod output;

pub use adapter::{
    AgentTurn, DEFAULT_REPLY_TEXT, Outcome, PLACEHOLDER_IMAGE_URL, ProxyClient,
    extract_generated_text, simulation_message,
};
pub use intent::{Action, classify};
pub use output::{ParsedOutput, parse_output, strip_markup};
