use super::*;
use crate::animation::props::PropKey;
use crate::foundation::core::Rgba8;
use crate::foundation::ids::SlotKey;

fn navbar(store: &mut TargetStore) -> ScrollFlag {
    ScrollFlag {
        target: store.insert("navbar"),
        threshold: 50.0,
        raised: PropertySet::new()
            .background(Rgba8::rgba(13, 13, 18, 204))
            .blur(24.0),
        lowered: PropertySet::new().background(Rgba8::TRANSPARENT).blur(0.0),
    }
}

fn slot(flag: ScrollFlag) -> FlagSlot {
    FlagSlot::new(
        ContextId(SlotKey {
            index: 0,
            generation: 0,
        }),
        flag,
    )
}

#[test]
fn raises_only_past_the_threshold() {
    let mut store = TargetStore::default();
    let flag = navbar(&mut store);
    let id = flag.target;
    let mut slot = slot(flag);

    slot.update(50.0, &mut store);
    assert!(!slot.is_raised());
    assert_eq!(store.num(id, PropKey::Blur), 0.0);

    slot.update(51.0, &mut store);
    assert!(slot.is_raised());
    assert_eq!(store.num(id, PropKey::Blur), 24.0);
    assert_eq!(
        store.value(id, PropKey::BackgroundColor).as_color(),
        Some(Rgba8::rgba(13, 13, 18, 204))
    );

    slot.update(0.0, &mut store);
    assert!(!slot.is_raised());
    assert_eq!(
        store.value(id, PropKey::BackgroundColor).as_color(),
        Some(Rgba8::TRANSPARENT)
    );
}

#[test]
fn writes_only_when_the_state_changes() {
    let mut store = TargetStore::default();
    let flag = navbar(&mut store);
    let id = flag.target;
    let mut slot = slot(flag);
    slot.update(200.0, &mut store);

    // A host override survives scrolling that keeps the flag raised.
    store.set_prop(id, PropKey::Blur, 3.0);
    slot.update(400.0, &mut store);
    assert_eq!(store.num(id, PropKey::Blur), 3.0);
}

#[test]
fn mismatched_styles_are_rejected() {
    let mut store = TargetStore::default();
    let mut flag = navbar(&mut store);
    flag.validate().unwrap();

    flag.lowered = PropertySet::new().blur(0.0);
    assert!(flag.validate().is_err());

    let mut flag = navbar(&mut store);
    flag.threshold = f64::NAN;
    assert!(flag.validate().is_err());

    let mut flag = navbar(&mut store);
    flag.raised = PropertySet::new().background(Rgba8::WHITE).with(PropKey::Blur, Rgba8::WHITE);
    assert!(flag.validate().is_err());
}
