use super::*;
use crate::target::TargetStore;

fn trigger() -> TargetId {
    let mut store = TargetStore::default();
    store.insert("section")
}

#[test]
fn progress_hits_endpoints_and_clamps() {
    let r = ResolvedRange {
        start_px: 400.0,
        end_px: 1200.0,
    };
    assert_eq!(r.progress(400.0), 0.0);
    assert_eq!(r.progress(1200.0), 1.0);
    assert_eq!(r.progress(800.0), 0.5);
    assert_eq!(r.progress(-50.0), 0.0);
    assert_eq!(r.progress(5000.0), 1.0);
}

#[test]
fn degenerate_range_is_a_step() {
    let r = ResolvedRange {
        start_px: 300.0,
        end_px: 300.0,
    };
    assert!(!r.is_valid());
    assert_eq!(r.span(), 0.0);
    assert_eq!(r.progress(299.0), 0.0);
    assert_eq!(r.progress(300.0), 1.0);
}

#[test]
fn relative_end_is_measured_from_start() {
    let range = ScrollRange::parse(trigger(), "top top", "+=300vh").unwrap();
    let r = range.resolve(Rect::new(0.0, 1000.0, 1200.0, 1800.0), 800.0);
    assert_eq!(r.start_px, 1000.0);
    assert_eq!(r.end_px, 1000.0 + 2400.0);
}

#[test]
fn resize_changes_resolution() {
    let range = ScrollRange::parse(trigger(), "top 75%", "bottom top").unwrap();
    let bx = Rect::new(0.0, 2000.0, 1200.0, 2600.0);
    let tall = range.resolve(bx, 1000.0);
    let short = range.resolve(bx, 600.0);
    assert_eq!(tall.start_px, 1250.0);
    assert_eq!(short.start_px, 1550.0);
    assert_eq!(tall.end_px, short.end_px);
}

#[test]
fn visible_range_spans_entry_to_exit() {
    let r = ScrollRange::visible(trigger()).resolve(Rect::new(0.0, 900.0, 10.0, 1100.0), 700.0);
    assert_eq!(r.start_px, 200.0);
    assert_eq!(r.end_px, 1100.0);
}
