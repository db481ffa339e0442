use serde::Serialize;

/// A directive that named a message by numeric id instead of its symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedMessage {
    pub module: String,
    pub msgid: String,
    pub symbol: String,
    pub line: Option<u32>,
    pub is_disabled: bool,
}

/// Append-only audit of numeric-id directives for a whole run.
///
/// Lives on the handler, not on a file, so it survives `open_file` /
/// `close_file`; only [`clear`](Self::clear) empties it.
#[derive(Debug, Clone, Default)]
pub struct ManagedMessageLog {
    entries: Vec<ManagedMessage>,
}

impl ManagedMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, module: &str, msgid: &str, symbol: &str, line: Option<u32>, is_disabled: bool) {
        self.entries.push(ManagedMessage {
            module: module.to_string(),
            msgid: msgid.to_string(),
            symbol: symbol.to_string(),
            line,
            is_disabled,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Every record, oldest first.
    pub fn all(&self) -> &[ManagedMessage] {
        &self.entries
    }

    pub fn for_module<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a ManagedMessage> + 'a {
        self.entries.iter().filter(move |m| m.module == module)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
