//! AST evaluator and result normalization

use crate::core::parser::{AstNode, Parser};
use crate::core::{normalize_glyphs, CalcError, CalcResult};

/// Evaluator for keypad expressions
///
/// Pure: the same input always produces the same outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates a display expression (glyphs allowed) to a finite number
    pub fn evaluate(&self, expression: &str) -> CalcResult<f64> {
        let canonical = normalize_glyphs(expression);
        let ast = Parser::parse_str(&canonical)?;
        let value = self.evaluate_ast(&ast);

        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFinite(value))
        }
    }

    /// Folds an AST into a raw `f64`, which may be NaN or infinite
    #[must_use]
    pub fn evaluate_ast(&self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate_ast(inner),
            AstNode::Sqrt(inner) => self.evaluate_ast(inner).sqrt(),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(self.evaluate_ast(left), self.evaluate_ast(right))
            }
        }
    }
}

/// Formats a finite result as editable expression text.
///
/// Uses the shortest decimal that round-trips. Magnitudes at or above
/// `1e21` or below `1e-6` switch to exponent form with an explicit sign
/// (`1e+21`, `1.5e-7`). Negative zero prints as `0`.
#[must_use]
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => scientific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FailureKind, Operation};

    fn eval(input: &str) -> CalcResult<f64> {
        Evaluator::new().evaluate(input)
    }

    fn kind(input: &str) -> Option<FailureKind> {
        eval(input).err().map(|e| e.kind())
    }

    // ===== AST folding tests =====

    #[test]
    fn test_evaluate_ast_number() {
        assert_eq!(Evaluator::new().evaluate_ast(&AstNode::number(42.0)), 42.0);
    }

    #[test]
    fn test_evaluate_ast_nested() {
        // (1 + 2) * (3 + 4) = 21
        let ast = AstNode::binary(
            AstNode::binary(AstNode::number(1.0), Operation::Add, AstNode::number(2.0)),
            Operation::Multiply,
            AstNode::binary(AstNode::number(3.0), Operation::Add, AstNode::number(4.0)),
        );
        assert_eq!(Evaluator::new().evaluate_ast(&ast), 21.0);
    }

    #[test]
    fn test_evaluate_ast_sqrt_of_negative_is_nan() {
        let ast = AstNode::sqrt(AstNode::negate(AstNode::number(1.0)));
        assert!(Evaluator::new().evaluate_ast(&ast).is_nan());
    }

    // ===== String evaluation tests =====

    #[test]
    fn test_evaluate_basic_sum() {
        assert_eq!(eval("2+2"), Ok(4.0));
    }

    #[test]
    fn test_evaluate_display_glyphs() {
        assert_eq!(eval("6×7"), Ok(42.0));
        assert_eq!(eval("20÷4"), Ok(5.0));
        assert_eq!(eval("2+3×4"), Ok(14.0));
    }

    #[test]
    fn test_evaluate_precedence_and_grouping() {
        assert_eq!(eval("(2+3)×4"), Ok(20.0));
        assert_eq!(eval("2×3**2"), Ok(18.0));
        assert_eq!(eval("2**3**2"), Ok(512.0));
        assert_eq!(eval("10-4-3"), Ok(3.0));
        assert_eq!(eval("2**-1"), Ok(0.5));
    }

    #[test]
    fn test_evaluate_sqrt() {
        assert_eq!(eval("sqrt(9)"), Ok(3.0));
        assert_eq!(eval("sqrt(7+9)"), Ok(4.0));
        assert_eq!(eval("sqrt(9)+1"), Ok(4.0));
    }

    #[test]
    fn test_evaluate_sqrt_of_negative_is_non_finite() {
        assert_eq!(kind("sqrt(-1)"), Some(FailureKind::NonFinite));
    }

    #[test]
    fn test_evaluate_percent_substitution() {
        assert_eq!(eval("50/100"), Ok(0.5));
        assert_eq!(eval("200+50/100"), Ok(200.5));
    }

    #[test]
    fn test_evaluate_division_by_zero_is_non_finite() {
        assert_eq!(kind("5/0"), Some(FailureKind::NonFinite));
        assert_eq!(kind("5÷0"), Some(FailureKind::NonFinite));
        assert_eq!(kind("0/0"), Some(FailureKind::NonFinite));
        assert_eq!(kind("-5/0"), Some(FailureKind::NonFinite));
    }

    #[test]
    fn test_evaluate_overflow_is_non_finite() {
        assert_eq!(kind("10**400"), Some(FailureKind::NonFinite));
    }

    #[test]
    fn test_evaluate_only_final_value_is_classified() {
        // 1/(1/0) = 1/inf = 0
        assert_eq!(eval("1/(1/0)"), Ok(0.0));
    }

    #[test]
    fn test_evaluate_malformed_is_invalid_syntax() {
        assert_eq!(kind("2+"), Some(FailureKind::InvalidSyntax));
        assert_eq!(kind(""), Some(FailureKind::InvalidSyntax));
        assert_eq!(kind("(1+2"), Some(FailureKind::InvalidSyntax));
        assert_eq!(kind("1+2)"), Some(FailureKind::InvalidSyntax));
        assert_eq!(kind("÷"), Some(FailureKind::InvalidSyntax));
    }

    #[test]
    fn test_evaluate_longest_accepted_sum() {
        let terms = crate::core::parser::MAX_TOKENS / 2;
        let input = format!("{}1", "1+".repeat(terms - 1));
        assert_eq!(eval(&input), Ok(512.0));
    }

    #[test]
    fn test_evaluate_long_chains_are_invalid_syntax() {
        for input in [
            format!("{}1", "1+".repeat(200_000)),
            format!("{}1", "-+".repeat(50_000)),
            format!("{}2", "1×1×".repeat(10_000)),
            format!("{}2", "1××".repeat(15_000)),
        ] {
            assert_eq!(kind(&input), Some(FailureKind::InvalidSyntax));
        }
    }

    #[test]
    fn test_evaluate_double_multiply_glyph_is_power() {
        assert_eq!(eval("2××3"), Ok(8.0));
    }

    #[test]
    fn test_evaluate_reenters_formatted_results() {
        assert_eq!(eval("1e+21×2"), Ok(2e21));
        assert_eq!(eval("1.5e-7×2"), Ok(3e-7));
    }

    #[test]
    fn test_evaluate_is_pure() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate("3×3"), evaluator.evaluate("3×3"));
    }

    // ===== Formatting tests =====

    #[test]
    fn test_format_result_integers() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(-12.0), "-12");
        assert_eq!(format_result(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_result_fractions() {
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_result(0.000001), "0.000001");
    }

    #[test]
    fn test_format_result_negative_zero() {
        assert_eq!(format_result(-0.0), "0");
    }

    #[test]
    fn test_format_result_exponent_forms() {
        assert_eq!(format_result(1e21), "1e+21");
        assert_eq!(format_result(-2.5e30), "-2.5e+30");
        assert_eq!(format_result(1.5e-7), "1.5e-7");
    }
}
