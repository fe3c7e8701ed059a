//! Error carrier for Pact failures
//!
//! A [`PactError`] is a location-tagged failure with a closed [`PactErrorType`],
//! a best-effort call stack and a human readable message. The core itself only
//! fails on decoding; everything else here is plumbing for the evaluator and
//! for ingesting previously rendered diagnostics.

pub mod diagnostic;

#[cfg(test)]
mod tests;

use crate::shared::Info;
use compact_str::CompactString;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PactErrorType {
    /// Evaluation failure
    EvalError,
    /// Bad arguments to a function
    ArgsError,
    /// Database failure
    DbError,
    /// Transaction failure
    TxFailure,
    /// Syntax failure
    SyntaxError,
    /// Gas limit or gas accounting failure
    GasError,
    /// Pact continuation failure
    ContinuationError,
}

impl PactErrorType {
    /// All kinds
    pub const ALL: [PactErrorType; 7] = [
        PactErrorType::EvalError,
        PactErrorType::ArgsError,
        PactErrorType::DbError,
        PactErrorType::TxFailure,
        PactErrorType::SyntaxError,
        PactErrorType::GasError,
        PactErrorType::ContinuationError,
    ];

    /// Tag name as it appears in encoded errors
    pub fn as_str(self) -> &'static str {
        match self {
            PactErrorType::EvalError => "EvalError",
            PactErrorType::ArgsError => "ArgsError",
            PactErrorType::DbError => "DbError",
            PactErrorType::TxFailure => "TxFailure",
            PactErrorType::SyntaxError => "SyntaxError",
            PactErrorType::GasError => "GasError",
            PactErrorType::ContinuationError => "ContinuationError",
        }
    }

    /// Prefix placed before the message when displaying an error of this kind
    pub fn message_prefix(self) -> Option<&'static str> {
        match self {
            PactErrorType::EvalError | PactErrorType::ArgsError => None,
            PactErrorType::DbError => Some("Database exception"),
            PactErrorType::TxFailure => Some("Tx Failed"),
            PactErrorType::SyntaxError => Some("Syntax error"),
            PactErrorType::GasError => Some("Gas Error"),
            PactErrorType::ContinuationError => Some("Continuation Error"),
        }
    }
}

impl fmt::Display for PactErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown error type tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error type: {0}")]
pub struct UnknownErrorType(pub String);

impl FromStr for PactErrorType {
    type Err = UnknownErrorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PactErrorType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownErrorType(s.to_string()))
    }
}

impl Serialize for PactErrorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PactErrorType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// Stack function type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackFunctionType {
    /// Regular function
    SFDefun,
    /// Capability body
    SFDefcap,
    /// Pact step
    SFDefPact,
}

impl fmt::Display for StackFunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackFunctionType::SFDefun => write!(f, "defun"),
            StackFunctionType::SFDefcap => write!(f, "defcap"),
            StackFunctionType::SFDefPact => write!(f, "defpact"),
        }
    }
}

/// Summary of the application that produced a stack frame
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunApp {
    /// Kind of function applied
    pub fn_type: StackFunctionType,
    /// Rendered arguments
    pub args: Vec<String>,
}

/// One call stack entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackFrame {
    /// Function name
    pub name: CompactString,
    /// Call site
    pub loc: Info,
    /// Applied function and arguments, when known
    pub app: Option<FunApp>,
}

impl StackFrame {
    /// Frame for a call without argument information
    pub fn new<S: Into<CompactString>>(name: S, loc: Info) -> Self {
        StackFrame {
            name: name.into(),
            loc,
            app: None,
        }
    }

    /// Frame for an application of `name` to rendered `args`
    pub fn applied<S: Into<CompactString>>(
        name: S,
        loc: Info,
        fn_type: StackFunctionType,
        args: Vec<String>,
    ) -> Self {
        StackFrame {
            name: name.into(),
            loc,
            app: Some(FunApp { fn_type, args }),
        }
    }

    /// Render as `loc: name` or `loc: (name arg1 arg2)`
    pub fn render(&self) -> String {
        match &self.app {
            None => format!("{}: {}", self.loc, self.name),
            Some(app) => {
                let mut out = format!("{}: ({}", self.loc, self.name);
                for arg in &app.args {
                    out.push(' ');
                    out.push_str(arg);
                }
                out.push(')');
                out
            }
        }
    }

    /// Strict inverse of [`StackFrame::render`].
    ///
    /// Rendering drops the function type, so applied frames come back as `SFDefun`.
    pub fn parse(text: &str) -> Option<StackFrame> {
        let (loc, rest) = text.split_once(": ")?;
        let loc = Info::parse_rendered(loc)?;
        if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            let mut parts = inner.split_whitespace();
            let name = parts.next()?;
            let args = parts.map(str::to_string).collect();
            return Some(StackFrame::applied(name, loc, StackFunctionType::SFDefun, args));
        }
        if rest.is_empty() || rest.contains(char::is_whitespace) {
            return None;
        }
        Some(StackFrame::new(rest, loc))
    }

    /// Reconstruct a frame from legacy diagnostic text.
    ///
    /// Never fails: text that does not parse becomes a placeholder frame whose
    /// name is the original text verbatim. Only for ingesting stored output.
    pub fn parse_lenient(text: &str) -> StackFrame {
        StackFrame::parse(text).unwrap_or_else(|| {
            tracing::debug!(frame = text, "keeping unparseable stack frame as placeholder");
            StackFrame::new(text, Info::default())
        })
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Located Pact failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PactError {
    /// Failure category
    pub kind: PactErrorType,
    /// Where it happened
    pub info: Info,
    /// Best-effort call stack, innermost first
    pub call_stack: Vec<StackFrame>,
    /// Human readable cause
    pub message: String,
}

impl PactError {
    /// Create an error without call stack
    pub fn new<S: Into<String>>(kind: PactErrorType, info: Info, message: S) -> Self {
        PactError {
            kind,
            info,
            call_stack: Vec::new(),
            message: message.into(),
        }
    }

    /// Evaluation error
    pub fn eval_error<S: Into<String>>(info: Info, message: S) -> Self {
        PactError::new(PactErrorType::EvalError, info, message)
    }

    /// Argument error
    pub fn args_error<S: Into<String>>(info: Info, message: S) -> Self {
        PactError::new(PactErrorType::ArgsError, info, message)
    }

    /// Database error
    pub fn db_error<S: Into<String>>(info: Info, message: S) -> Self {
        PactError::new(PactErrorType::DbError, info, message)
    }

    /// Gas error
    pub fn gas_error<S: Into<String>>(info: Info, message: S) -> Self {
        PactError::new(PactErrorType::GasError, info, message)
    }

    /// Attach a call stack
    pub fn with_call_stack(mut self, call_stack: Vec<StackFrame>) -> Self {
        self.call_stack = call_stack;
        self
    }

    /// Location of the failure
    pub fn info(&self) -> &Info {
        &self.info
    }
}

impl fmt::Display for PactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Failure: ", self.info)?;
        if let Some(prefix) = self.kind.message_prefix() {
            write!(f, "{}: ", prefix)?;
        }
        f.write_str(&self.message)
    }
}

impl std::error::Error for PactError {}

impl Serialize for PactError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let frames: Vec<String> = self.call_stack.iter().map(StackFrame::render).collect();
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("callStack", &frames)?;
        map.serialize_entry("info", &self.info.render())?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("type", &self.kind)?;
        map.end()
    }
}

// Decoding is lenient: this only ever reads diagnostics rendered by older
// nodes, which must load even when their text no longer parses.
impl<'de> Deserialize<'de> for PactError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Rendered {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            info: String,
            #[serde(rename = "callStack", default)]
            call_stack: Vec<String>,
            message: String,
        }

        let rendered = Rendered::deserialize(deserializer)?;
        let kind = rendered.kind.parse().unwrap_or_else(|e: UnknownErrorType| {
            tracing::warn!(error = %e, "treating unknown error type as EvalError");
            PactErrorType::EvalError
        });
        let info = Info::parse_rendered(&rendered.info).unwrap_or_else(|| {
            tracing::debug!(info = %rendered.info, "dropping unparseable error location");
            Info::default()
        });
        Ok(PactError {
            kind,
            info,
            call_stack: rendered.call_stack.iter().map(|f| StackFrame::parse_lenient(f)).collect(),
            message: rendered.message,
        })
    }
}
