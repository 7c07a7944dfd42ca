//! Severity levels and their sink/color mappings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of severity levels, and the length of the sink array.
pub const SEVERITY_COUNT: usize = 6;

/// Log severity. The numeric order is a contract: it indexes the
/// per-severity sink array and names the on-disk files, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Error = 0,
    Warn = 1,
    Fault = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl Severity {
    /// All levels in index order.
    pub const ALL: [Severity; SEVERITY_COUNT] = [
        Severity::Error,
        Severity::Warn,
        Severity::Fault,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Fault => "FAULT",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
        }
    }

    /// Sink-array index of this level.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Severity::Error),
            1 => Some(Severity::Warn),
            2 => Some(Severity::Fault),
            3 => Some(Severity::Info),
            4 => Some(Severity::Debug),
            5 => Some(Severity::Trace),
            _ => None,
        }
    }

    /// Basename of this level's log file, e.g. `ERROR.log`.
    pub fn file_name(&self) -> String {
        format!("{}.log", self.to_str())
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Error => Red,
            Severity::Warn => Yellow,
            Severity::Fault => TrueColor {
                r: 255,
                g: 165,
                b: 0,
            },
            Severity::Info => Cyan,
            Severity::Debug => Green,
            Severity::Trace => TrueColor {
                r: 255,
                g: 105,
                b: 180,
            },
        }
    }

    /// Background color, where the level carries one (Error is rendered
    /// red on yellow).
    pub fn background_code(&self) -> Option<colored::Color> {
        match self {
            Severity::Error => Some(colored::Color::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(Severity::Error),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "FAULT" => Ok(Severity::Fault),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            "TRACE" => Ok(Severity::Trace),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}
