//! Property-based tests for accumulation, evaluation and formatting

use calcpad::accumulator::{Accumulator, Mode};
use calcpad::core::Operation;
use calcpad::key::Key;
use proptest::prelude::*;

// ===== Helpers =====

fn type_text(acc: &mut Accumulator, text: &str) {
    for ch in text.chars() {
        assert!(acc.press_token(&ch.to_string()), "untyped char {ch}");
    }
}

fn apply(a: f64, op: Operation, b: f64) -> f64 {
    match op {
        Operation::Add => a + b,
        Operation::Subtract => a - b,
        Operation::Multiply => a * b,
        Operation::Divide => a / b,
    }
}

// ===== Strategy definitions =====

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

/// Decimal operands with up to two fractional digits, as typed text
fn operand_strategy() -> impl Strategy<Value = (String, f64)> {
    (0u32..10_000, 0u32..100).prop_map(|(whole, frac)| {
        let text = format!("{whole}.{frac:02}");
        let value = f64::from(whole) + f64::from(frac) / 100.0;
        (text, value)
    })
}

fn key_strategy() -> impl Strategy<Value = Key> {
    prop::sample::select(Key::ALL.to_vec())
}

// ===== Evaluation properties =====

proptest! {
    /// Results land within the rounding step of the exact value
    #[test]
    fn prop_result_within_precision(
        (a_text, a) in operand_strategy(),
        op in operation_strategy(),
        (b_text, b) in operand_strategy(),
    ) {
        prop_assume!(!(op == Operation::Divide && b == 0.0));
        let mut acc = Accumulator::new();
        type_text(&mut acc, &format!("{a_text}{}{b_text}", op.symbol()));
        acc.press(Key::Equals);

        let shown: f64 = acc.display().parse().unwrap();
        prop_assert!((shown - apply(a, op, b)).abs() <= 1e-5, "{} vs {}", shown, apply(a, op, b));
    }

    /// Displayed results never carry trailing zeros or a bare point
    #[test]
    fn prop_no_trailing_zeros(
        (a_text, _) in operand_strategy(),
        op in operation_strategy(),
        (b_text, b) in operand_strategy(),
    ) {
        prop_assume!(!(op == Operation::Divide && b == 0.0));
        let mut acc = Accumulator::new();
        type_text(&mut acc, &format!("{a_text}{}{b_text}", op.symbol()));
        acc.press(Key::Equals);

        let shown = acc.display();
        if shown.contains('.') {
            prop_assert!(!shown.ends_with('0'), "{}", shown);
            prop_assert!(!shown.ends_with('.'), "{}", shown);
        }
        prop_assert_ne!(shown, "-0");
    }

    /// Integer arithmetic is exact
    #[test]
    fn prop_integer_ops_exact(a in 0i64..100_000, op in operation_strategy(), b in 1i64..100_000) {
        prop_assume!(op != Operation::Divide);
        let mut acc = Accumulator::new();
        type_text(&mut acc, &format!("{a}{}{b}", op.symbol()));
        acc.press(Key::Equals);

        let expected = match op {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            _ => a * b,
        };
        prop_assert_eq!(acc.display(), expected.to_string());
    }

    /// Division by zero always shows the error marker
    #[test]
    fn prop_divide_by_zero_is_error(a in 0u32..100_000) {
        let mut acc = Accumulator::new();
        type_text(&mut acc, &format!("{a}/0"));
        acc.press(Key::Equals);
        prop_assert_eq!(acc.display(), "Error");
        prop_assert_eq!(acc.mode(), &Mode::ErrorShown);
    }
}

// ===== Editing properties =====

proptest! {
    /// Deleting at least as many times as keys typed empties the buffer
    #[test]
    fn prop_delete_all_restores_placeholder(text in "[0-9+*/.-]{0,20}") {
        let mut acc = Accumulator::new();
        type_text(&mut acc, &text);
        for _ in 0..=text.len() {
            acc.press(Key::Delete);
        }
        prop_assert_eq!(acc.display(), "0");
        prop_assert_eq!(acc.expression(), "");
    }

    /// Reset from any state is the initial state
    #[test]
    fn prop_reset_from_anywhere(keys in prop::collection::vec(key_strategy(), 0..50)) {
        let mut acc = Accumulator::new();
        acc.press_all(keys);
        acc.press(Key::Reset);
        prop_assert_eq!(acc.display(), "0");
        prop_assert_eq!(acc.mode(), &Mode::Editing);
    }

    /// The display is never empty
    #[test]
    fn prop_display_never_empty(keys in prop::collection::vec(key_strategy(), 0..50)) {
        let mut acc = Accumulator::new();
        for key in keys {
            acc.press(key);
            prop_assert!(!acc.display().is_empty());
        }
    }

    /// Pressing `=` twice shows the same thing as pressing it once
    #[test]
    fn prop_equals_idempotent(keys in prop::collection::vec(key_strategy(), 0..30)) {
        let mut acc = Accumulator::new();
        acc.press_all(keys);
        acc.press(Key::Equals);
        let once = acc.display();
        acc.press(Key::Equals);
        prop_assert_eq!(acc.display(), once);
    }
}
