//! Message definitions and their `%`-style templates.
//!
//! Template syntax:
//! - `%s` inserts the argument's display form
//! - `%r` inserts the quoted form (`'foo'`)
//! - `%d` / `%i` insert an integer
//! - `%%` is a literal percent sign
//!
//! Templates are parsed when the definition is built, so a bad placeholder is
//! rejected at load time rather than when the message fires.

use serde::{Deserialize, Serialize};

use crate::types::{MessageArg, MessageCategory, MessageError, WarningScope};

/// Categories whose messages may be raised with or without a node.
const SCOPE_EXEMPT: [MessageCategory; 2] = [MessageCategory::Fatal, MessageCategory::Refactor];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Conversion {
    Str,
    Repr,
    Int,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum Segment {
    Literal(String),
    Placeholder(Conversion),
}

/// A parsed message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    raw: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let conversion = match chars.next() {
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some('s') => Conversion::Str,
                Some('r') => Conversion::Repr,
                Some('d') | Some('i') => Conversion::Int,
                Some(other) => {
                    return Err(MessageError::InvalidDefinition(format!(
                        "unsupported placeholder '%{other}' in template {raw:?}"
                    )))
                }
                None => {
                    return Err(MessageError::InvalidDefinition(format!(
                        "dangling '%' at end of template {raw:?}"
                    )))
                }
            };
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(conversion));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of positional arguments the template consumes.
    pub fn arity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder(_)))
            .count()
    }

    /// Interpolate `args`. With no arguments the template is returned verbatim.
    pub fn render(&self, args: &[MessageArg]) -> Result<String, MessageError> {
        if args.is_empty() {
            return Ok(self.raw.clone());
        }
        if args.len() != self.arity() {
            return Err(MessageError::MalformedUsage(format!(
                "template {:?} takes {} argument(s), got {}",
                self.raw,
                self.arity(),
                args.len()
            )));
        }
        let mut out = String::with_capacity(self.raw.len());
        let mut args = args.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(conversion) => {
                    // arity was checked above
                    let Some(arg) = args.next() else { break };
                    match (conversion, arg) {
                        (Conversion::Str, a) => out.push_str(&a.to_string()),
                        (Conversion::Repr, a) => out.push_str(&a.repr()),
                        (Conversion::Int, MessageArg::Int(i)) => out.push_str(&i.to_string()),
                        (Conversion::Int, MessageArg::Float(x)) => {
                            out.push_str(&(x.trunc() as i64).to_string())
                        }
                        (Conversion::Int, MessageArg::Str(s)) => {
                            return Err(MessageError::MalformedUsage(format!(
                                "%d placeholder in {:?} needs a number, got {s:?}",
                                self.raw
                            )))
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}

/// True when the token looks like a numeric message id (`W0611`), as opposed
/// to a symbol (`unused-import`).
pub fn is_numeric_msgid(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && token.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}

/// One diagnostic a checker can raise. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDefinition {
    pub msgid: String,
    pub symbol: String,
    pub category: MessageCategory,
    pub template: Template,
    pub description: String,
    pub checker: String,
    pub scope: WarningScope,
    /// Previous (msgid, symbol) pairs that still resolve to this definition.
    pub old_names: Vec<(String, String)>,
}

impl MessageDefinition {
    pub fn new(
        checker: &str,
        msgid: &str,
        symbol: &str,
        msg: &str,
        description: &str,
        scope: WarningScope,
    ) -> Result<Self, MessageError> {
        let category = check_msgid(msgid)?;
        check_symbol(msgid, symbol)?;
        Ok(Self {
            msgid: msgid.to_string(),
            symbol: symbol.to_string(),
            category,
            template: Template::parse(msg)?,
            description: description.to_string(),
            checker: checker.to_lowercase(),
            scope,
            old_names: Vec::new(),
        })
    }

    pub fn with_old_names(mut self, old_names: &[(&str, &str)]) -> Result<Self, MessageError> {
        for (old_msgid, old_symbol) in old_names {
            check_msgid(old_msgid)?;
            check_symbol(old_msgid, old_symbol)?;
            self.old_names
                .push((old_msgid.to_string(), old_symbol.to_string()));
        }
        Ok(self)
    }

    /// `symbol (msgid)`, as shown in suppression-related messages.
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.symbol, self.msgid)
    }

    /// Check that the caller supplied what this message's scope needs.
    pub fn check_usage(&self, line: Option<u32>, has_node: bool) -> Result<(), MessageError> {
        if SCOPE_EXEMPT.contains(&self.category) {
            return Ok(());
        }
        match self.scope {
            WarningScope::Line => {
                if line.is_none() {
                    return Err(MessageError::MalformedUsage(format!(
                        "Message {} must provide line, got None",
                        self.msgid
                    )));
                }
                if has_node {
                    return Err(MessageError::MalformedUsage(format!(
                        "Message {} must only provide line, got line={} and a node",
                        self.msgid,
                        line.unwrap_or_default()
                    )));
                }
            }
            WarningScope::Node => {
                if !has_node {
                    return Err(MessageError::MalformedUsage(format!(
                        "Message {} must provide Node, got None",
                        self.msgid
                    )));
                }
            }
        }
        Ok(())
    }
}

fn check_msgid(msgid: &str) -> Result<MessageCategory, MessageError> {
    if msgid.len() != 5 || !is_numeric_msgid(msgid) {
        return Err(MessageError::InvalidDefinition(format!(
            "invalid message id {msgid:?}: expected a category letter and four digits"
        )));
    }
    MessageCategory::of_msgid(msgid).ok_or_else(|| {
        MessageError::InvalidDefinition(format!(
            "bad message category in {msgid:?}, expected one of I, C, R, W, E, F"
        ))
    })
}

fn check_symbol(msgid: &str, symbol: &str) -> Result<(), MessageError> {
    if symbol.is_empty() || symbol.chars().any(|c| c.is_whitespace()) {
        return Err(MessageError::InvalidDefinition(format!(
            "invalid symbol {symbol:?} for message {msgid}"
        )));
    }
    Ok(())
}
