//! Reporters for quell messages.
//!
//! Provides three sinks:
//! - **Text** (`"text"`): one line per message, grouped under module headers
//! - **JSON** (`"json"`): machine-readable array of messages
//! - **Collecting**: keeps messages in memory for hosts and tests

pub mod collect;
pub mod json;
pub mod text;

use quell_core::reporter::Reporter;
use quell_core::stats::LinterStats;
use quell_core::types::Message;

pub use collect::CollectingReporter;
pub use json::JsonReporter;
pub use text::TextReporter;

/// Renders messages and run summaries.
pub trait MessageFormatter {
    fn format_message(&self, msg: &Message) -> String;
    fn format_summary(&self, stats: &LinterStats, msg_status: u32) -> String;
}

/// Build the reporter named by `output.format` in the config.
/// Unknown names fall back to text.
pub fn reporter_for(format: &str, path_strip_prefix: &str) -> Box<dyn Reporter> {
    match format {
        "json" => Box::new(JsonReporter::new(path_strip_prefix)),
        _ => Box::new(TextReporter::new(path_strip_prefix)),
    }
}
