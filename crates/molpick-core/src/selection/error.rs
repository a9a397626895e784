use thiserror::Error;

/// Errors produced while turning a selection expression into an AST.
///
/// Evaluation itself is infallible: the [`crate::selection::ast::Expr`] sum
/// type is closed, so an "unknown node" cannot reach the evaluator. A failed
/// spec compilation is not an error either; it is the `None` result of
/// [`crate::selection::spec::to_spec`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("syntax error at column {column}: {message} (found '{fragment}')")]
    Syntax {
        message: String,
        /// The offending slice of the input, or "end of input".
        fragment: String,
        /// 1-based column of the offending text.
        column: usize,
    },
}

impl SelectionError {
    /// Builds a syntax error pointing at `span` (byte offsets) in `input`.
    pub(crate) fn syntax(message: impl Into<String>, input: &str, span: (usize, usize)) -> Self {
        let (start, end) = span;
        let fragment = if start >= input.len() || start >= end {
            "end of input".to_string()
        } else {
            input[start..end.min(input.len())].to_string()
        };
        SelectionError::Syntax {
            message: message.into(),
            fragment,
            column: input[..start.min(input.len())].chars().count() + 1,
        }
    }
}
