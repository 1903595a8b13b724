//! Binary operators and the display glyphs the keypad inserts for them

/// Type-safe binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (× on screen, * for the evaluator)
    Multiply,
    /// Division (÷ on screen, / for the evaluator)
    Divide,
    /// Exponentiation (**)
    Power,
}

impl Operation {
    /// Multiplication glyph shown in the display
    pub const MULTIPLY_GLYPH: char = '×';
    /// Division glyph shown in the display
    pub const DIVIDE_GLYPH: char = '÷';

    /// Returns the text the keypad appends for this operation
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "**",
        }
    }

    /// Returns the canonical symbol understood by the parser
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "**",
        }
    }

    /// Applies the operation with plain IEEE-754 semantics.
    ///
    /// Division by zero yields an infinity or NaN here; classification
    /// happens once on the final value.
    #[must_use]
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Power => a.powf(b),
        }
    }
}

/// Rewrites the display glyphs into canonical operator symbols.
///
/// The rewrite is textual, so two consecutive multiply glyphs become `**`.
#[must_use]
pub fn normalize_glyphs(text: &str) -> String {
    let mut canonical = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            Operation::MULTIPLY_GLYPH => canonical.push_str(Operation::Multiply.symbol()),
            Operation::DIVIDE_GLYPH => canonical.push_str(Operation::Divide.symbol()),
            other => canonical.push(other),
        }
    }
    canonical
}
