//! Physical keyboard to logical key mapping

use crate::core::Operation;
use crate::key::Key;

/// Maps a physical key name (as reported by a keydown event) to a [`Key`].
///
/// Returns `None` for anything the keypad does not handle; callers must let
/// the host's default action run in that case.
#[must_use]
pub fn map_physical_key(name: &str) -> Option<Key> {
    match name {
        "Backspace" => Some(Key::Delete),
        "Enter" => Some(Key::Equals),
        "*" | "x" | "X" => Some(Key::Operator(Operation::Multiply)),
        "+" | "-" | "/" | "." => name.parse().ok(),
        _ if name.len() == 1 && name.as_bytes()[0].is_ascii_digit() => name.parse().ok(),
        _ => None,
    }
}
