use quell_core::reporter::Reporter;
use quell_core::stats::LinterStats;
use quell_core::types::{Message, MessageCategory};

use crate::MessageFormatter;

/// `path:line:column: msg_id: msg (symbol)` lines, with a header each time
/// the module changes. Messages outside any module get no header.
#[derive(Debug, Default)]
pub struct TextReporter {
    out: String,
    current_module: Option<String>,
    path_strip_prefix: String,
}

impl TextReporter {
    pub fn new(path_strip_prefix: &str) -> Self {
        Self {
            path_strip_prefix: path_strip_prefix.to_string(),
            ..Self::default()
        }
    }

    pub fn output(&self) -> &str {
        &self.out
    }
}

impl MessageFormatter for TextReporter {
    fn format_message(&self, msg: &Message) -> String {
        format!(
            "{}:{}:{}: {}: {} ({})\n",
            msg.location.path, msg.location.line, msg.location.column, msg.msg_id, msg.msg, msg.symbol,
        )
    }

    fn format_summary(&self, stats: &LinterStats, msg_status: u32) -> String {
        if stats.total() == 0 {
            return String::new(); // Clean run = no summary
        }
        let counts: Vec<String> = MessageCategory::ALL
            .iter()
            .rev()
            .filter(|cat| stats.category_count(**cat) > 0)
            .map(|cat| format!("{} {}(s)", stats.category_count(*cat), cat))
            .collect();
        format!(
            "\n{} in {} module(s) (status {})\n",
            counts.join(", "),
            stats.by_module.len(),
            msg_status,
        )
    }
}

impl Reporter for TextReporter {
    fn handle_message(&mut self, msg: Message) {
        let module = msg.location.module.as_str();
        if !module.is_empty() && self.current_module.as_deref() != Some(module) {
            self.out
                .push_str(&format!("************* Module {}\n", msg.location.module));
            self.current_module = Some(msg.location.module.clone());
        }
        let line = self.format_message(&msg);
        self.out.push_str(&line);
    }

    fn path_strip_prefix(&self) -> &str {
        &self.path_strip_prefix
    }
}
