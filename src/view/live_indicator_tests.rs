//! Tests for LiveIndicator widget.

use super::*;
use ratatui::style::{Color, Style};

// ===== TailMode derivation =====

#[test]
fn exhausted_source_is_static_wherever_scrolled() {
    assert_eq!(TailMode::from_state(false, true), TailMode::Static);
    assert_eq!(TailMode::from_state(false, false), TailMode::Static);
}

#[test]
fn live_source_at_bottom_is_following() {
    assert_eq!(TailMode::from_state(true, true), TailMode::Following);
}

#[test]
fn live_source_scrolled_up_is_paused() {
    assert_eq!(TailMode::from_state(true, false), TailMode::Paused);
}

// ===== Rendering =====

#[test]
fn static_mode_renders_gray_text_regardless_of_blink() {
    for blink_on in [false, true] {
        let span = LiveIndicator::new(TailMode::Static, blink_on).render();
        assert_eq!(span.content, "[LIVE] ");
        assert_eq!(span.style, Style::default().fg(Color::Gray));
    }
}

#[test]
fn following_mode_blinks_green() {
    let visible = LiveIndicator::new(TailMode::Following, true).render();
    assert_eq!(visible.content, "[LIVE] ");
    assert_eq!(visible.style, Style::default().fg(Color::Green));

    let hidden = LiveIndicator::new(TailMode::Following, false).render();
    assert_eq!(hidden.content, "");
}

#[test]
fn paused_mode_does_not_blink() {
    for blink_on in [false, true] {
        let span = LiveIndicator::new(TailMode::Paused, blink_on).render();
        assert_eq!(span.content, "[PAUSED] ");
        assert_eq!(span.style, Style::default().fg(Color::Yellow));
    }
}
