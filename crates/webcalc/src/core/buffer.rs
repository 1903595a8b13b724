//! The editable expression being built from keypad and keyboard input

use crate::core::Operation;

/// Letters allowed in the buffer: the `sqrt` wrapper and the exponent
/// marker of normalized results such as `1e+21`.
const ACCEPTED_LETTERS: &str = "sqrte";

/// Returns true if `ch` may appear in an expression
#[must_use]
pub fn is_accepted_char(ch: char) -> bool {
    ch.is_ascii_digit()
        || matches!(
            ch,
            '.' | '+' | '-' | '*' | '/' | '(' | ')' | Operation::MULTIPLY_GLYPH | Operation::DIVIDE_GLYPH
        )
        || ACCEPTED_LETTERS.contains(ch)
}

/// Accumulated expression text
///
/// Only characters accepted by [`is_accepted_char`] ever enter the
/// buffer; syntactic validity is checked at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    expression: String,
}

impl InputBuffer {
    /// Creates an empty buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            expression: String::new(),
        }
    }

    /// Appends a token. Returns false and leaves the buffer untouched if
    /// the token contains a character outside the accepted alphabet.
    pub fn append(&mut self, token: &str) -> bool {
        if !token.chars().all(is_accepted_char) {
            return false;
        }
        self.expression.push_str(token);
        true
    }

    /// Removes the final character; no-op when empty
    pub fn delete_last(&mut self) {
        self.expression.pop();
    }

    /// Resets to the empty expression
    pub fn clear(&mut self) {
        self.expression.clear();
    }

    /// Replaces the expression wholesale, subject to the same alphabet
    /// check as [`append`](Self::append)
    pub fn set_expression(&mut self, text: &str) -> bool {
        if !text.chars().all(is_accepted_char) {
            return false;
        }
        self.expression.clear();
        self.expression.push_str(text);
        true
    }

    /// Wraps the whole current expression as `sqrt(<current>)`
    pub fn wrap_sqrt(&mut self) {
        self.expression = format!("sqrt({})", self.expression);
    }

    /// Returns the present expression
    #[must_use]
    pub fn current(&self) -> &str {
        &self.expression
    }

    /// Returns true if nothing has been entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }
}
