use quell_core::catalog::MessageCatalog;
use quell_core::reporter::Reporter;
use quell_core::types::{Confidence, MessageStateScope};

use crate::handler::MessageHandler;

impl<C: MessageCatalog, R: Reporter> MessageHandler<C, R> {
    /// Whether a message (id, symbol or old name) should be shown at `line`.
    ///
    /// Enabled when any definition the token resolves to is enabled. A token
    /// the catalog does not know is treated as its own only alias.
    pub fn is_enabled(&self, msg_descr: &str, line: Option<u32>, confidence: Option<Confidence>) -> bool {
        if let Some(confidence) = confidence {
            if !self.config.accepts_confidence(confidence.name()) {
                return false;
            }
        }
        let msgids: Vec<String> = match self.catalog.definitions_for(msg_descr) {
            Ok(defs) => defs.into_iter().map(|d| d.msgid).collect(),
            Err(_) => vec![msg_descr.to_string()],
        };
        msgids.iter().any(|msgid| self.is_one_enabled(msgid, line))
    }

    /// Decision for one concrete message id.
    pub fn is_one_enabled(&self, msgid: &str, line: Option<u32>) -> bool {
        let Some(line) = line else {
            return self.run_default(msgid);
        };
        let Some(fs) = self.file_state.as_ref() else {
            return self.run_default(msgid);
        };
        if let Some(state) = fs.line_state(msgid, line) {
            return state.enabled;
        }
        // Lines past the parsed tree (trailing comments) have no line state;
        // use the closest directive at or before them.
        match fs.max_line() {
            Some(max_line) if line > max_line => fs
                .raw_transitions(msgid)
                .rev()
                .find(|&(directive_line, _)| directive_line <= line)
                .map_or_else(|| self.run_default(msgid), |(_, enabled)| enabled),
            _ => self.run_default(msgid),
        }
    }

    /// Why a message at `line` is (or would be) in its current state.
    pub fn scope_of(&self, msgid: &str, line: Option<u32>, confidence: Confidence) -> MessageStateScope {
        if !self.config.accepts_confidence(confidence.name()) {
            return MessageStateScope::Confidence;
        }
        let covered = match (line, self.file_state.as_ref()) {
            (Some(line), Some(fs)) => fs.line_state(msgid, line).is_some(),
            _ => false,
        };
        if covered {
            MessageStateScope::File
        } else {
            MessageStateScope::Run
        }
    }

    fn run_default(&self, msgid: &str) -> bool {
        self.msgs_state.get(msgid).copied().unwrap_or(true)
    }
}
