//! Webcalc - keypad calculator engine
//!
//! Turns discrete button and keyboard events into an expression, evaluates
//! it with a dedicated parser (never a general-purpose interpreter) and
//! keeps the ten most recent calculations.
//!
//! # Components
//!
//! - [`InputBuffer`](core::buffer::InputBuffer): the editable expression
//! - [`Evaluator`](core::evaluator::Evaluator): text to `f64` or a classified failure
//! - [`HistoryLog`](core::history::HistoryLog): bounded, newest-first log
//! - [`Calculator`](calculator::Calculator): the calculation cycle, reporting to a
//!   [`DisplaySink`](display::DisplaySink)
//!
//! # Example
//!
//! ```rust
//! use webcalc::prelude::*;
//!
//! let mut calc = Calculator::new(RecordingDisplay::new());
//! for action in [Action::Digit(6), Action::Multiply, Action::Digit(7), Action::Calculate] {
//!     calc.dispatch(action);
//! }
//! assert_eq!(calc.expression(), "42");
//! assert_eq!(calc.sink().history(), ["6×7 = 42".to_string()]);
//!
//! // Failures leave the expression alone and raise a transient error
//! calc.dispatch(Action::Divide);
//! calc.dispatch(Action::Digit(0));
//! assert_eq!(calc.dispatch(Action::Calculate), Cycle::Failed(FailureKind::NonFinite));
//! assert_eq!(calc.expression(), "42÷0");
//! assert_eq!(calc.sink().error(), Some("Invalid calculation"));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod action;
pub mod calculator;
pub mod config;
pub mod core;
pub mod display;
pub mod schedule;

#[cfg(feature = "wasm")]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::action::{Action, Keypad, KeypadButton};
    pub use crate::calculator::{Calculator, Cycle, Phase};
    pub use crate::config::{CalculatorConfig, ConfigError};
    pub use crate::core::buffer::InputBuffer;
    pub use crate::core::evaluator::{format_result, Evaluator};
    pub use crate::core::history::{HistoryEntry, HistoryLog};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, FailureKind, Operation};
    pub use crate::display::{DisplayCall, DisplaySink, RecordingDisplay};
    pub use crate::schedule::TimerQueue;

    #[cfg(feature = "wasm")]
    pub use crate::wasm::{BrowserCalculator, DomSink};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate("2+3"), Ok(5.0));
    }

    #[test]
    fn test_parser_direct() {
        let ast = Parser::parse_str("1+2*3").unwrap();
        assert_eq!(Evaluator::new().evaluate_ast(&ast), 7.0);
    }

    #[test]
    fn test_evaluate_then_format_round_trip() {
        let value = Evaluator::new().evaluate("10÷4").unwrap();
        let text = format_result(value);
        let mut buffer = InputBuffer::new();
        assert!(buffer.set_expression(&text));
        assert_eq!(buffer.current(), "2.5");
    }

    #[test]
    fn test_sqrt_negative_classification_is_locked() {
        let err = Evaluator::new().evaluate("sqrt(-1)").unwrap_err();
        assert_eq!(err.kind(), FailureKind::NonFinite);
    }
}
