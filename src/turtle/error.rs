//! Error types for Turtle reading

/// Error type for Turtle parsing operations
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// Lexer error (invalid token)
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Lexer {
        position: usize,
        line: usize,
        column: usize,
        message: String,
    },

    /// Parser error (unexpected token or unsupported structure)
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        position: usize,
        line: usize,
        column: usize,
        message: String,
    },

    /// Prefix used before it was declared
    #[error("Undefined prefix: {0}")]
    UndefinedPrefix(String),

    /// Relative IRI without a base
    #[error("IRI resolution error: {0}")]
    IriResolution(String),
}

/// Result type for Turtle operations
pub type Result<T> = std::result::Result<T, TurtleError>;

impl TurtleError {
    /// Create a lexer error at a byte offset of `source`
    pub fn lexer(source: &str, position: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_col(source, position);
        Self::Lexer {
            position,
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error at a byte offset of `source`
    pub fn parse(source: &str, position: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_col(source, position);
        Self::Parse {
            position,
            line,
            column,
            message: message.into(),
        }
    }
}

/// Convert a byte position to (line, column), 1-indexed.
fn line_col(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for (i, c) in source.char_indices() {
        if i >= position {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let src = "ab\ncd\nef";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 4), (2, 2));
        assert_eq!(line_col(src, 6), (3, 1));
    }
}
