//! Per-file suppression state.
//!
//! A [`FileState`] is created when a file is opened and dropped when it is
//! closed. It keeps two views of the inline directives seen in the file:
//! - the raw transition log, exactly as the directives were applied
//! - the line-indexed state, where each transition is spread over the lines it
//!   covers inside the parsed tree
//!
//! Lines past the last parsed line never appear in the line-indexed state.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::definition::MessageDefinition;
use crate::types::MessageStateScope;

/// Inclusive line span of a parsed block (function, class, statement body).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }
}

/// What the parser tells us about a file before checkers run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContext {
    pub module: String,
    pub abspath: Option<String>,
    /// Last line present in the parsed tree.
    pub max_line: Option<u32>,
    #[serde(default)]
    pub blocks: Vec<LineRange>,
}

impl FileContext {
    pub fn new(module: &str, abspath: Option<&str>, max_line: Option<u32>) -> Self {
        Self {
            module: module.to_string(),
            abspath: abspath.map(str::to_string),
            max_line,
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<LineRange>) -> Self {
        self.blocks = blocks;
        self
    }
}

/// How far a transition reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionSpan {
    /// From the directive line to the end of the innermost enclosing block.
    Block,
    /// The directive's target line only.
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawTransition {
    enabled: bool,
    span: TransitionSpan,
}

/// Resolved state of one message on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    pub enabled: bool,
    /// Line of the directive that produced this state.
    pub origin: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FileState {
    context: FileContext,
    line_states: HashMap<String, BTreeMap<u32, LineState>>,
    raw: HashMap<String, BTreeMap<u32, RawTransition>>,
    /// (msgid, directive line) -> lines where that directive swallowed a message.
    ignored: BTreeMap<(String, u32), BTreeSet<u32>>,
}

impl FileState {
    pub fn new(context: FileContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn module(&self) -> &str {
        &self.context.module
    }

    pub fn abspath(&self) -> Option<&str> {
        self.context.abspath.as_deref()
    }

    pub fn max_line(&self) -> Option<u32> {
        self.context.max_line
    }

    /// Record a transition covering the rest of the enclosing block.
    pub fn set_transition(&mut self, def: &MessageDefinition, line: u32, enabled: bool) {
        self.record(&def.msgid, line, enabled, TransitionSpan::Block);
    }

    /// Record a transition covering only `line`.
    pub fn set_line_transition(&mut self, def: &MessageDefinition, line: u32, enabled: bool) {
        self.record(&def.msgid, line, enabled, TransitionSpan::Line);
    }

    fn record(&mut self, msgid: &str, line: u32, enabled: bool, span: TransitionSpan) {
        self.raw
            .entry(msgid.to_string())
            .or_default()
            .insert(line, RawTransition { enabled, span });
        self.rebuild(msgid);
    }

    /// Re-spread every raw transition of `msgid` in ascending line order, so a
    /// later directive overrides an earlier one on the lines they share.
    fn rebuild(&mut self, msgid: &str) {
        let Some(raw) = self.raw.get(msgid) else {
            return;
        };
        let mut states = BTreeMap::new();
        for (&line, transition) in raw {
            let end = match transition.span {
                TransitionSpan::Line => line,
                TransitionSpan::Block => self.block_end(line),
            };
            let end = self.context.max_line.map_or(end, |max| end.min(max));
            for covered in line..=end {
                states.insert(
                    covered,
                    LineState {
                        enabled: transition.enabled,
                        origin: line,
                    },
                );
            }
        }
        self.line_states.insert(msgid.to_string(), states);
    }

    /// End of the innermost block holding `line`; the whole module otherwise.
    fn block_end(&self, line: u32) -> u32 {
        self.context
            .blocks
            .iter()
            .filter(|b| b.contains(line))
            .min_by_key(|b| b.end - b.start)
            .map(|b| b.end)
            .or(self.context.max_line)
            .unwrap_or(line)
    }

    /// Line-indexed state of `msgid` at `line`, if any transition covers it.
    pub fn line_state(&self, msgid: &str, line: u32) -> Option<LineState> {
        self.line_states.get(msgid)?.get(&line).copied()
    }

    /// Raw transitions of `msgid` as (line, enabled), ascending by line.
    pub fn raw_transitions(&self, msgid: &str) -> impl DoubleEndedIterator<Item = (u32, bool)> + '_ {
        self.raw
            .get(msgid)
            .into_iter()
            .flat_map(|lines| lines.iter())
            .map(|(&line, t)| (line, t.enabled))
    }

    /// Remember that a disabled occurrence was swallowed. Only file-scoped
    /// rejections are attributable to a directive; others are dropped.
    pub fn record_ignored(&mut self, scope: MessageStateScope, msgid: &str, line: Option<u32>) {
        if scope != MessageStateScope::File {
            return;
        }
        let Some(line) = line else { return };
        if let Some(state) = self.line_state(msgid, line) {
            self.ignored
                .entry((msgid.to_string(), state.origin))
                .or_default()
                .insert(line);
        }
    }

    /// Disabling directives that never swallowed anything, as (msgid, line).
    pub fn spurious_suppressions(&self) -> Vec<(String, u32)> {
        let mut out = Vec::new();
        for (msgid, lines) in &self.raw {
            for (&line, transition) in lines {
                if !transition.enabled && !self.ignored.contains_key(&(msgid.clone(), line)) {
                    out.push((msgid.clone(), line));
                }
            }
        }
        out.sort();
        out
    }

    /// Swallowed occurrences as (msgid, directive line, occurrence line).
    pub fn ignored_occurrences(&self) -> Vec<(String, u32, u32)> {
        self.ignored
            .iter()
            .flat_map(|((msgid, origin), lines)| {
                lines.iter().map(move |&line| (msgid.clone(), *origin, line))
            })
            .collect()
    }
}
