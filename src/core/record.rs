//! Log records and the arguments they capture
//!
//! A record is built on the producer thread and crosses to exactly one
//! consumer. Producers never format: a record either carries its final
//! text (no arguments) or the raw template plus the captured arguments,
//! and the consumer materializes the text via [`Record::render`].

use super::error::Result;
use super::render::render_template;
use super::severity::Severity;
use chrono::{DateTime, Utc};
use std::fmt;

/// An argument captured at the call site, by value.
///
/// Capturing as a tagged value instead of a boxed closure keeps the
/// producer path to a move of a few words per argument. String-likes
/// are copied into an owned `String` so the record never borrows from
/// the producer stack.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => write!(f, "{}", s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Uint(u) => write!(f, "{}", u),
            ArgValue::Float(fl) => write!(f, "{}", fl),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Char(c) => write!(f, "{}", c),
        }
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Int(i)
    }
}

impl From<i32> for ArgValue {
    fn from(i: i32) -> Self {
        ArgValue::Int(i as i64)
    }
}

impl From<i16> for ArgValue {
    fn from(i: i16) -> Self {
        ArgValue::Int(i as i64)
    }
}

impl From<i8> for ArgValue {
    fn from(i: i8) -> Self {
        ArgValue::Int(i as i64)
    }
}

impl From<isize> for ArgValue {
    fn from(i: isize) -> Self {
        ArgValue::Int(i as i64)
    }
}

impl From<u64> for ArgValue {
    fn from(u: u64) -> Self {
        ArgValue::Uint(u)
    }
}

impl From<u32> for ArgValue {
    fn from(u: u32) -> Self {
        ArgValue::Uint(u as u64)
    }
}

impl From<u16> for ArgValue {
    fn from(u: u16) -> Self {
        ArgValue::Uint(u as u64)
    }
}

impl From<u8> for ArgValue {
    fn from(u: u8) -> Self {
        ArgValue::Uint(u as u64)
    }
}

impl From<usize> for ArgValue {
    fn from(u: usize) -> Self {
        ArgValue::Uint(u as u64)
    }
}

impl From<f64> for ArgValue {
    fn from(f: f64) -> Self {
        ArgValue::Float(f)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<char> for ArgValue {
    fn from(c: char) -> Self {
        ArgValue::Char(c)
    }
}

#[derive(Debug, Clone)]
enum Payload {
    /// Final text, ready to write.
    Rendered(String),
    /// Raw template plus captured arguments; rendered on the consumer.
    Deferred {
        template: String,
        args: Vec<ArgValue>,
    },
}

/// A single log event in transit from a producer to its consumer.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Severity,
    /// Wall-clock capture instant, taken on the producer thread when
    /// the log call is made. Always UTC.
    pub timestamp: DateTime<Utc>,
    payload: Payload,
}

impl Record {
    /// A record with no format arguments. The template is the final
    /// text; [`Record::render`] is a no-op.
    pub fn eager(level: Severity, template: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            payload: Payload::Rendered(template.into()),
        }
    }

    /// A record carrying a template and captured arguments, to be
    /// rendered on the consumer thread.
    pub fn deferred(level: Severity, template: impl Into<String>, args: Vec<ArgValue>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            payload: Payload::Deferred {
                template: template.into(),
                args,
            },
        }
    }

    /// Whether rendering is still pending.
    pub fn is_deferred(&self) -> bool {
        matches!(self.payload, Payload::Deferred { .. })
    }

    /// Materialize the final text. Idempotent; a no-op for records built
    /// without arguments. On a template/argument mismatch the payload
    /// becomes the sentinel line and the error is returned so the caller
    /// can count it.
    pub fn render(&mut self) -> Result<()> {
        let Payload::Deferred { template, args } = &self.payload else {
            return Ok(());
        };
        let (text, result) = match render_template(template, args) {
            Ok(text) => (text, Ok(())),
            Err(err) => (format!("<RENDER ERROR: \"{}\">", template), Err(err)),
        };
        self.payload = Payload::Rendered(text);
        result
    }

    /// The text to write: the rendered line, or the raw template if
    /// [`Record::render`] has not run yet.
    pub fn message(&self) -> &str {
        match &self.payload {
            Payload::Rendered(text) => text,
            Payload::Deferred { template, .. } => template,
        }
    }
}
