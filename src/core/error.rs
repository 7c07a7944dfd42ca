//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation} '{path}': {source}")]
    SinkIo {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template placeholder count does not match the captured arguments
    #[error("template \"{template}\" has {placeholders} placeholder(s) but {args} argument(s)")]
    RenderMismatch {
        template: String,
        placeholders: usize,
        args: usize,
    },

    /// Template contains a brace directive other than `{}`
    #[error("unsupported format directive in template \"{template}\"")]
    RenderDirective { template: String },

    /// Write routed to a sink that never opened
    #[error("sink for {level} is closed")]
    SinkClosed { level: &'static str },
}

impl LoggerError {
    /// Create a sink IO error with context
    pub fn sink_io(
        operation: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::SinkIo {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a placeholder/argument mismatch error
    pub fn render_mismatch(template: impl Into<String>, placeholders: usize, args: usize) -> Self {
        LoggerError::RenderMismatch {
            template: template.into(),
            placeholders,
            args,
        }
    }

    /// Create an unsupported-directive error
    pub fn render_directive(template: impl Into<String>) -> Self {
        LoggerError::RenderDirective {
            template: template.into(),
        }
    }
}
