//! Error types for template scanning and parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("invalid template syntax at {span:?}: {message}")]
    InvalidSyntax {
        span: Span,
        message: String,
        text: String,
    },
}

impl TemplateError {
    /// Create a syntax error for a transclusion that lacks its outer braces
    pub fn invalid_syntax(text: &str, span: Span, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            span,
            message: message.into(),
            text: text.to_string(),
        }
    }

    /// Get the offending text
    pub fn text(&self) -> &str {
        match self {
            Self::InvalidSyntax { text, .. } => text,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            TemplateError::InvalidSyntax {
                span,
                message,
                text,
            } => {
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("invalid template syntax")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(text.as_str())), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
