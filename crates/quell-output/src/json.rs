use quell_core::reporter::Reporter;
use quell_core::stats::LinterStats;
use quell_core::types::Message;

use crate::MessageFormatter;

/// Buffers messages and renders them as one JSON array.
#[derive(Debug, Default)]
pub struct JsonReporter {
    messages: Vec<Message>,
    path_strip_prefix: String,
}

impl JsonReporter {
    pub fn new(path_strip_prefix: &str) -> Self {
        Self {
            messages: Vec::new(),
            path_strip_prefix: path_strip_prefix.to_string(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.messages).unwrap_or_default()
    }
}

impl MessageFormatter for JsonReporter {
    fn format_message(&self, msg: &Message) -> String {
        serde_json::to_string(msg).unwrap_or_default()
    }

    fn format_summary(&self, stats: &LinterStats, msg_status: u32) -> String {
        serde_json::json!({ "status": msg_status, "stats": stats }).to_string()
    }
}

impl Reporter for JsonReporter {
    fn handle_message(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    fn path_strip_prefix(&self) -> &str {
        &self.path_strip_prefix
    }
}
