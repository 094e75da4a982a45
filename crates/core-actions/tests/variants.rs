mod common;

use common::*;
use core_actions::SessionOutcome;
use core_events::{EditorFeatures, Variant};
use core_text::LineBuffer;
use pretty_assertions::assert_eq;

fn run_variant(n: u8, default: &str, keys: &[u8]) -> Run {
    let features = Variant::from_number(n).unwrap().features();
    run_with(
        LineBuffer::with_content(80, default.as_bytes()),
        features,
        None,
        keys,
    )
}

#[test]
fn append_only_ignores_default_and_rejects_backspace() {
    let r = run_variant(1, "preset", b"ab\x7fc\r");
    assert_eq!(r.outcome, accepted("abc"));
    assert_eq!(r.alerts, 1);
}

#[test]
fn append_only_has_no_cancel_and_no_motion() {
    let r = run_variant(1, "", &keys(&[b"a", b"\x07", LEFT, b"b", b"\r"]));
    assert_eq!(r.outcome, accepted("ab"));
    assert_eq!(r.alerts, 2);
}

#[test]
fn backspace_variant_edits_at_end() {
    let r = run_variant(2, "preset", b"abc\x7f\x7fx\r");
    assert_eq!(r.outcome, accepted("ax"));
    assert_eq!(r.alerts, 0);
}

#[test]
fn default_variant_keeps_preset_on_enter() {
    let r = run_variant(3, "preset", b"\r");
    assert_eq!(r.outcome, accepted("preset"));
}

#[test]
fn default_variant_wipes_preset_on_typing_and_lacks_motion() {
    let r = run_variant(3, "preset", &keys(&[b"a", HOME, b"b", b"\r"]));
    assert_eq!(r.outcome, accepted("ab"));
    assert_eq!(r.alerts, 1);
}

#[test]
fn early_variants_never_draw_a_status_line() {
    for n in 1..=3 {
        let r = run_variant(n, "", b"x\r");
        assert!(r.render.statuses().is_empty(), "variant {n}");
    }
}

#[test]
fn full_variant_cancel_and_status_line() {
    let r = run_variant(5, "", b"ab\x07");
    assert_eq!(r.outcome, SessionOutcome::Cancelled);
    assert_eq!(r.render.statuses().len(), 1);
}

#[test]
fn variants_four_and_five_behave_alike() {
    let script = keys(&[b"hello", HOME, b"\x1a", b"J", END, b"!", b"\r"]);
    let four = run_variant(4, "", &script);
    let five = run_variant(5, "", &script);
    assert_eq!(four.outcome, accepted("Jello!"));
    assert_eq!(four.outcome, five.outcome);
}

#[test]
fn toggle_updates_mode_indicator_each_time() {
    let r = run_with(
        LineBuffer::with_capacity(80),
        EditorFeatures::all(),
        None,
        b"\x1a\x1a\r",
    );
    let statuses = r.render.statuses();
    let modes: Vec<&str> = statuses.iter().map(|s| &s[..5]).collect();
    assert_eq!(modes, vec!["[INS]", "[REP]", "[INS]"]);
}
