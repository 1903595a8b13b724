//! End-to-end calculation cycle against the in-memory display

use std::time::Duration;

use webcalc::prelude::*;

fn calculator() -> Calculator<RecordingDisplay> {
    Calculator::new(RecordingDisplay::new())
}

fn keys(calc: &mut Calculator<RecordingDisplay>, keys: &[&str]) {
    for key in keys {
        calc.press_key(key);
    }
}

// ===== Observable properties =====

#[test]
fn two_plus_two_is_four() {
    let mut calc = calculator();
    keys(&mut calc, &["2", "+", "2", "Enter"]);
    assert_eq!(calc.expression(), "4");
    assert_eq!(calc.sink().history(), ["2+2 = 4".to_string()]);
}

#[test]
fn eleven_calculations_keep_ten_newest_first() {
    let mut calc = calculator();
    for i in 1..=11u8 {
        calc.dispatch(Action::Clear);
        for ch in i.to_string().chars() {
            calc.press_key(&ch.to_string());
        }
        keys(&mut calc, &["+", "0", "Enter"]);
    }

    let history = calc.history();
    assert_eq!(history.len(), 10);
    assert_eq!(history.latest().map(|e| e.display()), Some("11+0 = 11".to_string()));

    let rendered = calc.sink().history();
    assert_eq!(rendered.len(), 10);
    assert_eq!(rendered.first().map(String::as_str), Some("11+0 = 11"));
    assert_eq!(rendered.last().map(String::as_str), Some("2+0 = 2"));
}

#[test]
fn percent_button_after_fifty() {
    let mut calc = calculator();
    calc.press_button(None, "5");
    calc.press_button(None, "0");
    calc.press_button(Some("percent"), "%");
    let cycle = calc.press_button(Some("calculate"), "=");
    assert_eq!(
        cycle,
        Cycle::Evaluated {
            expression: "50/100".to_string(),
            result: "0.5".to_string(),
        }
    );
}

#[test]
fn result_text_round_trips_through_set_expression() {
    let mut calc = calculator();
    keys(&mut calc, &["1", "/", "3", "Enter"]);
    let result = calc.expression().to_string();
    assert_eq!(result, "0.3333333333333333");

    assert!(calc.set_expression(&result));
    assert_eq!(calc.expression(), result);
}

#[test]
fn sqrt_wraps_then_evaluates() {
    let mut calc = calculator();
    keys(&mut calc, &["1", "6"]);
    calc.dispatch(Action::Sqrt);
    assert_eq!(calc.sink().display(), "sqrt(16)");
    calc.dispatch(Action::Calculate);
    assert_eq!(calc.expression(), "4");
}

#[test]
fn sqrt_of_negative_reports_invalid_calculation() {
    let mut calc = calculator();
    keys(&mut calc, &["-", "9"]);
    calc.dispatch(Action::Sqrt);
    assert_eq!(
        calc.dispatch(Action::Calculate),
        Cycle::Failed(FailureKind::NonFinite)
    );
    assert_eq!(calc.expression(), "sqrt(-9)");
    assert_eq!(calc.sink().error(), Some("Invalid calculation"));
}

// ===== Error notification lifecycle =====

#[test]
fn error_clears_after_two_seconds_and_input_continues() {
    let mut calc = calculator();
    keys(&mut calc, &["5", "/", "0", "Enter"]);
    assert_eq!(calc.sink().error(), Some("Invalid calculation"));
    assert_eq!(calc.phase(), Phase::IdleWithError);

    // Editing while the notice is up is allowed
    keys(&mut calc, &["Backspace", "5"]);
    assert_eq!(calc.expression(), "5÷5");
    assert_eq!(calc.sink().error(), Some("Invalid calculation"));

    calc.sink_mut().advance(Duration::from_millis(2000));
    assert_eq!(calc.sink().error(), None);

    calc.press_key("Enter");
    assert_eq!(calc.expression(), "1");
}

#[test]
fn overlapping_errors_are_not_cancelled() {
    let mut calc = calculator();
    keys(&mut calc, &["2", "+", "Enter"]);
    calc.sink_mut().advance(Duration::from_millis(1000));
    keys(&mut calc, &["Enter"]);
    assert_eq!(calc.sink().pending_clears(), 2);

    // The first timer fires and clears whatever is showing
    calc.sink_mut().advance(Duration::from_millis(1000));
    assert_eq!(calc.sink().error(), None);
    assert_eq!(calc.sink().pending_clears(), 1);

    calc.sink_mut().advance(Duration::from_millis(1000));
    assert_eq!(calc.sink().pending_clears(), 0);
}

#[test]
fn failure_does_not_touch_display_or_history() {
    let mut calc = calculator();
    keys(&mut calc, &["3", "Enter", "*"]);
    let before = calc.sink().calls().len();

    calc.press_key("Enter");
    let new_calls = &calc.sink().calls()[before..];
    assert_eq!(new_calls, [DisplayCall::Error("Invalid input".to_string())]);
    assert_eq!(calc.history().len(), 1);
}

#[test]
fn very_long_expression_fails_without_crashing() {
    let mut calc = calculator();
    let long = format!("{}1", "1+".repeat(200_000));
    assert!(calc.set_expression(&long));

    assert_eq!(
        calc.dispatch(Action::Calculate),
        Cycle::Failed(FailureKind::InvalidSyntax)
    );
    assert_eq!(calc.expression(), long);
    assert_eq!(calc.sink().error(), Some("Invalid input"));
    assert!(calc.history().is_empty());
}

// ===== Configuration =====

#[test]
fn configured_messages_and_delay_are_used() {
    let config = CalculatorConfig::from_json(
        r#"{"error_clear_delay_ms": 100, "invalid_input_message": "Syntax?"}"#,
    )
    .unwrap();
    let mut calc = Calculator::with_config(RecordingDisplay::new(), config);
    calc.press_key("Enter");
    assert_eq!(calc.sink().error(), Some("Syntax?"));
    calc.sink_mut().advance(Duration::from_millis(100));
    assert_eq!(calc.sink().error(), None);
}
