use serde::{Deserialize, Serialize};

/// Message categories, keyed by the first letter of a message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    Info,
    Convention,
    Refactor,
    Warning,
    Error,
    Fatal,
}

impl MessageCategory {
    pub const ALL: [MessageCategory; 6] = [
        MessageCategory::Info,
        MessageCategory::Convention,
        MessageCategory::Refactor,
        MessageCategory::Warning,
        MessageCategory::Error,
        MessageCategory::Fatal,
    ];

    pub fn code(&self) -> char {
        match self {
            MessageCategory::Info => 'I',
            MessageCategory::Convention => 'C',
            MessageCategory::Refactor => 'R',
            MessageCategory::Warning => 'W',
            MessageCategory::Error => 'E',
            MessageCategory::Fatal => 'F',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCategory::Info => "info",
            MessageCategory::Convention => "convention",
            MessageCategory::Refactor => "refactor",
            MessageCategory::Warning => "warning",
            MessageCategory::Error => "error",
            MessageCategory::Fatal => "fatal",
        }
    }

    /// Bit OR'd into the run status whenever a message of this category is emitted.
    pub fn status_bit(&self) -> u32 {
        match self {
            MessageCategory::Info => 0,
            MessageCategory::Convention => 16,
            MessageCategory::Refactor => 8,
            MessageCategory::Warning => 4,
            MessageCategory::Error => 2,
            MessageCategory::Fatal => 1,
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code.to_ascii_uppercase())
    }

    /// Resolve a category token: the one-letter code or the long name, any case.
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_code(c);
        }
        let lower = token.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == lower)
    }

    /// Category of a message id, derived solely from its first letter.
    pub fn of_msgid(msgid: &str) -> Option<Self> {
        msgid.chars().next().and_then(Self::from_code)
    }
}

impl std::fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Certainty attached to a single message occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    ControlFlow,
    Inference,
    InferenceFailure,
    #[default]
    Undefined,
}

impl Confidence {
    pub fn name(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::ControlFlow => "CONTROL_FLOW",
            Confidence::Inference => "INFERENCE",
            Confidence::InferenceFailure => "INFERENCE_FAILURE",
            Confidence::Undefined => "UNDEFINED",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Confidence::High => "Warning that is not based on inference result.",
            Confidence::ControlFlow => "Warning based on assumptions about control flow.",
            Confidence::Inference => "Warning based on inference result.",
            Confidence::InferenceFailure => "Warning based on inference with failures.",
            Confidence::Undefined => "Warning without any associated confidence level.",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a message is raised against a source line or a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningScope {
    Line,
    Node,
}

/// Why a message ended up disabled; recorded for ignored occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStateScope {
    /// Rejected by the confidence filter.
    Confidence,
    /// An explicit per-file transition covers the line.
    File,
    /// The run-wide default applied.
    Run,
}

/// Granularity of an enable/disable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Run,
    File,
}

/// Where a message was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLocation {
    pub abspath: Option<String>,
    pub path: String,
    pub module: String,
    pub obj: String,
    pub line: u32,
    pub column: u32,
}

/// An accepted message, handed to the reporter exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub msg_id: String,
    pub symbol: String,
    pub category: MessageCategory,
    pub location: MessageLocation,
    pub msg: String,
    pub confidence: Confidence,
}

/// A positional argument interpolated into a message template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageArg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl MessageArg {
    /// Quoted form used by `%r`. Single quotes unless the text holds a single
    /// quote and no double quote; backslashes and control characters are escaped.
    pub fn repr(&self) -> String {
        let MessageArg::Str(s) = self else {
            return self.to_string();
        };
        let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
        let mut out = String::with_capacity(s.len() + 2);
        out.push(quote);
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c == quote => {
                    out.push('\\');
                    out.push(c);
                }
                c if c.is_control() && (c as u32) < 0x100 => {
                    out.push_str(&format!("\\x{:02x}", c as u32));
                }
                c => out.push(c),
            }
        }
        out.push(quote);
        out
    }
}

/// Floats print with a fractional part (`3.0`, not `3`).
fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x == f64::INFINITY {
        "inf".to_string()
    } else if x == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{x:.1}")
    } else {
        x.to_string()
    }
}

impl std::fmt::Display for MessageArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageArg::Str(s) => f.write_str(s),
            MessageArg::Int(i) => write!(f, "{i}"),
            MessageArg::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

impl From<&str> for MessageArg {
    fn from(s: &str) -> Self {
        MessageArg::Str(s.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(s: String) -> Self {
        MessageArg::Str(s)
    }
}

impl From<&String> for MessageArg {
    fn from(s: &String) -> Self {
        MessageArg::Str(s.clone())
    }
}

impl From<i64> for MessageArg {
    fn from(i: i64) -> Self {
        MessageArg::Int(i)
    }
}

impl From<u32> for MessageArg {
    fn from(i: u32) -> Self {
        MessageArg::Int(i64::from(i))
    }
}

impl From<f64> for MessageArg {
    fn from(x: f64) -> Self {
        MessageArg::Float(x)
    }
}

/// A syntax node supplied by the parser.
pub trait SyntaxNode {
    /// First line of the node (1-based).
    fn from_line(&self) -> u32;

    /// Column offset of the node, when the node carries one.
    fn col_offset(&self) -> Option<u32>;

    /// Logical module name of the file containing the node.
    fn module_name(&self) -> String;

    /// Dotted name of the enclosing construct (empty at module level).
    fn frame_name(&self) -> String;

    /// Absolute path of the file the node was parsed from.
    fn root_file(&self) -> Option<String>;
}

/// Errors raised while resolving, applying, or emitting messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("No such message id or symbol '{0}'")]
    UnknownMessage(String),

    #[error("Line number not supplied for a next-line directive")]
    NoLineSupplied,

    #[error("Invalid message usage: {0}")]
    MalformedUsage(String),

    #[error("Invalid message definition: {0}")]
    InvalidDefinition(String),

    #[error("No file is open for a file-scoped operation")]
    NoFileOpen,
}
