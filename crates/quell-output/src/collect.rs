use quell_core::reporter::Reporter;
use quell_core::types::Message;

/// Keeps every message it receives, in order.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    pub messages: Vec<Message>,
    path_strip_prefix: String,
}

impl CollectingReporter {
    pub fn new(path_strip_prefix: &str) -> Self {
        Self {
            messages: Vec::new(),
            path_strip_prefix: path_strip_prefix.to_string(),
        }
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.symbol.as_str()).collect()
    }

    pub fn take(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

impl Reporter for CollectingReporter {
    fn handle_message(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    fn path_strip_prefix(&self) -> &str {
        &self.path_strip_prefix
    }
}
