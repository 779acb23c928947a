//! Error types for decoding templates and cards

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid {what} JSON at line {line}, column {column}: {message}")]
    Json {
        what: &'static str,
        line: usize,
        column: usize,
        message: String,
    },
}

impl InputError {
    pub(crate) fn from_json(what: &'static str, err: serde_json::Error) -> Self {
        // serde_json appends " at line L column C" to its Display output
        let message = err.to_string();
        let message = match message.rfind(" at line ") {
            Some(idx) if err.line() > 0 => message[..idx].to_string(),
            _ => message,
        };
        InputError::Json {
            what,
            line: err.line(),
            column: err.column(),
            message,
        }
    }

    /// Location of the error as a byte span into `source`
    pub fn span(&self, source: &str) -> Span {
        match self {
            InputError::Json { line, column, .. } => {
                let offset = line_column_to_offset(source, *line, *column);
                let end = source[offset..]
                    .chars()
                    .next()
                    .map(|c| offset + c.len_utf8())
                    .unwrap_or(offset);
                offset..end
            }
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        // ariadne counts chars, not bytes
        let span = self.span(source);
        let start = source[..span.start].chars().count();
        let span = start..start + source[span].chars().count();
        match self {
            InputError::Json { what, message, .. } => {
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message(format!("invalid {}", what))
                    .with_label(
                        Label::new((filename, span))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8(buf).unwrap_or_else(|_| self.to_string())
    }
}

/// Convert a 1-based line and column (as reported by serde_json) to a byte offset
fn line_column_to_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            // Step back to a char boundary; columns count bytes
            let mut pos = offset + col;
            while pos > offset && !source.is_char_boundary(pos) {
                pos -= 1;
            }
            return pos;
        }
        offset += text.len();
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error(source: &str) -> InputError {
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        InputError::from_json("template", err)
    }

    #[test]
    fn test_display_has_location() {
        let err = json_error("{\n  \"id\": ,\n}");
        let text = err.to_string();
        assert!(text.contains("invalid template JSON"));
        assert!(text.contains("line 2"));
        assert!(!text.contains(" at line 2 column"));
    }

    #[test]
    fn test_span_points_into_source() {
        let source = "{\n  \"id\": ,\n}";
        let err = json_error(source);
        let span = err.span(source);
        assert_eq!(&source[span.start..span.end], ",");
    }

    #[test]
    fn test_offset_conversion() {
        let source = "ab\ncd\nef";
        assert_eq!(line_column_to_offset(source, 1, 1), 0);
        assert_eq!(line_column_to_offset(source, 2, 2), 4);
        assert_eq!(line_column_to_offset(source, 3, 1), 6);
        assert_eq!(line_column_to_offset(source, 9, 1), source.len());
        assert_eq!(line_column_to_offset(source, 0, 0), 0);
    }

    #[test]
    fn test_format_mentions_filename() {
        let source = "{\n  \"id\": ,\n}";
        let report = json_error(source).format(source, "card.json");
        assert!(report.contains("card.json"));
    }
}
