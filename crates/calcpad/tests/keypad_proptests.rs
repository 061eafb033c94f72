//! Property-based tests for the terminal keypad

#![cfg(feature = "tui")]
#![allow(clippy::unwrap_used)]

use calcpad::core::InputEvent;
use calcpad::tui::Keypad;
use proptest::prelude::*;
use ratatui::layout::Rect;

// ===== Strategy definitions =====

/// Generate valid grid positions
fn grid_position_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0usize..5usize, 0usize..4usize)
}

/// Generate keypad areas large enough to hold one row per cell
fn area_strategy() -> impl Strategy<Value = Rect> {
    (0u16..20, 0u16..10, 14u16..60, 7u16..30).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn label_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "C", "←", "÷", "×", "7", "8", "9", "−", "4", "5", "6", "+", "1", "2", "3", "=", "0", ".",
    ])
}

// ===== Grid properties =====

proptest! {
    /// Every cell of the 5x4 grid belongs to exactly one button
    #[test]
    fn prop_every_cell_covered(pos in grid_position_strategy()) {
        let keypad = Keypad::new();
        let covering = keypad.buttons().filter(|b| b.covers(pos.0, pos.1)).count();
        prop_assert_eq!(covering, 1);
    }

    /// Label lookup finds a button whose event matches the label
    #[test]
    fn prop_label_lookup(label in label_strategy()) {
        let keypad = Keypad::new();
        let index = keypad.find_button_by_label(label);
        prop_assert!(index.is_some());
        let button = keypad.get_button(index.unwrap()).unwrap();
        prop_assert_eq!(Some(button.event), InputEvent::from_label(label));
    }

    /// Highlighting lights only buttons sending that event
    #[test]
    fn prop_highlight_matches_event(label in label_strategy()) {
        let mut keypad = Keypad::new();
        let event = InputEvent::from_label(label).unwrap();
        keypad.highlight(event);
        for button in keypad.buttons() {
            prop_assert_eq!(button.pressed, button.event == event);
        }
    }
}

// ===== Hit testing properties =====

proptest! {
    /// Clicks outside the area never hit a button
    #[test]
    fn prop_hit_test_outside(area in area_strategy(), dx in 0u16..10) {
        let keypad = Keypad::new();
        prop_assert_eq!(keypad.hit_test(area, area.x + area.width + dx, area.y), None);
        prop_assert_eq!(keypad.hit_test(area, area.x, area.y + area.height + dx), None);
    }

    /// Clicks on the border never hit a button
    #[test]
    fn prop_hit_test_border(area in area_strategy(), offset in 0u16..14) {
        let keypad = Keypad::new();
        let x = area.x + offset.min(area.width - 1);
        prop_assert_eq!(keypad.hit_test(area, x, area.y), None);
        prop_assert_eq!(keypad.hit_test(area, x, area.y + area.height - 1), None);
    }

    /// The first inner cell is always the Clear button
    #[test]
    fn prop_hit_test_top_left(area in area_strategy()) {
        let keypad = Keypad::new();
        let index = keypad.hit_test(area, area.x + 1, area.y + 1);
        prop_assert!(index.is_some());
        prop_assert_eq!(keypad.get_button(index.unwrap()).unwrap().event, InputEvent::Clear);
    }
}
