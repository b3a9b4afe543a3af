use super::*;
use crate::foundation::core::Rgba8;

fn store_with(names: &[&str]) -> (TargetStore, Vec<TargetId>) {
    let mut store = TargetStore::default();
    let ids = names.iter().map(|n| store.insert(*n)).collect();
    (store, ids)
}

fn linear() -> Defaults {
    Defaults {
        ease: Ease::Linear,
        duration: 1.0,
    }
}

#[test]
fn positions_parse() {
    assert_eq!("-=0.8".parse::<Position>().unwrap(), Position::End(-0.8));
    assert_eq!("+=0.3".parse::<Position>().unwrap(), Position::End(0.3));
    assert_eq!("<".parse::<Position>().unwrap(), Position::PrevStart(0.0));
    assert_eq!("<0.25".parse::<Position>().unwrap(), Position::PrevStart(0.25));
    assert_eq!(">".parse::<Position>().unwrap(), Position::PrevEnd(0.0));
    assert_eq!("1.5".parse::<Position>().unwrap(), Position::At(1.5));
    assert!("+=soon".parse::<Position>().is_err());
}

#[test]
fn relative_offsets_overlap_steps() {
    let (_, ids) = store_with(&["a", "b", "c"]);
    let tl = TimelineBuilder::new(Defaults {
        ease: Ease::OutQuart,
        duration: 1.2,
    })
    .tween(ids[0], Tween::from_state(PropertySet::new().y(50.0)), Position::default())
    .unwrap()
    .tween(
        ids[1],
        Tween::from_state(PropertySet::new().y(20.0)),
        "-=0.8".parse().unwrap(),
    )
    .unwrap()
    .tween(
        ids[2],
        Tween::from_state(PropertySet::new().y(10.0)),
        "-=0.4".parse().unwrap(),
    )
    .unwrap()
    .build()
    .unwrap();
    // 0..1.2, 0.4..1.6, 1.2..2.4
    assert!((tl.duration() - 2.4).abs() < 1e-9);
}

#[test]
fn from_steps_render_pending_state_then_captured_end() {
    let (mut store, ids) = store_with(&["line"]);
    let mut tl = TimelineBuilder::new(linear())
        .tween(
            ids[0],
            Tween::from_state(PropertySet::new().y(30.0).opacity(0.0)),
            Position::At(0.5),
        )
        .unwrap()
        .build()
        .unwrap();
    tl.capture(&store);

    tl.seek(0.0, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Y), 30.0);
    assert_eq!(store.num(ids[0], PropKey::Opacity), 0.0);

    tl.seek(1.0, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Y), 15.0);

    tl.seek(10.0, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Y), 0.0);
    assert_eq!(store.num(ids[0], PropKey::Opacity), 1.0);
}

#[test]
fn omitted_from_is_captured_on_first_activation() {
    let (mut store, ids) = store_with(&["card"]);
    store.set_prop(ids[0], PropKey::Scale, 1.0);
    let mut tl = TimelineBuilder::new(linear())
        .to(ids[0], PropertySet::new().scale(0.5))
        .unwrap()
        .build()
        .unwrap();

    tl.seek(0.5, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Scale), 0.75);

    // A later outside write does not change the captured start.
    store.set_prop(ids[0], PropKey::Scale, 9.0);
    tl.seek(0.0, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Scale), 1.0);
}

#[test]
fn seek_is_idempotent_and_reversible() {
    let (mut store, ids) = store_with(&["a", "b"]);
    let mut tl = TimelineBuilder::new(Defaults {
        ease: Ease::InOutCubic,
        duration: 0.7,
    })
    .to(ids[0], PropertySet::new().x(100.0).opacity(0.2))
    .unwrap()
    .tween(
        ids[1],
        Tween::to(PropertySet::new().background(Rgba8::rgb(0xE8, 0x55, 0x3D))),
        "<0.3".parse().unwrap(),
    )
    .unwrap()
    .build()
    .unwrap();

    for &t in &[0.0, 0.35, 0.9, 0.2, 0.9, 0.0, 0.61] {
        tl.seek(t, &mut store);
        let first = store.snapshot();
        tl.seek(t, &mut store);
        assert_eq!(store.snapshot(), first, "t={t}");
    }

    tl.seek(0.9, &mut store);
    let forward = store.snapshot();
    tl.seek(0.0, &mut store);
    tl.seek(0.9, &mut store);
    assert_eq!(store.snapshot(), forward);
}

#[test]
fn later_steps_win_and_pending_keys_keep_earliest_from() {
    let (mut store, ids) = store_with(&["cursor"]);
    let c = ids[0];
    let mut tl = TimelineBuilder::new(linear())
        .set(c, PropertySet::new().x(-50.0), Position::At(0.0))
        .unwrap()
        .tween(c, Tween::to(PropertySet::new().x(90.0)), Position::At(1.0))
        .unwrap()
        .tween(c, Tween::to(PropertySet::new().x(140.0)), Position::At(3.0))
        .unwrap()
        .build()
        .unwrap();

    tl.seek(3.5, &mut store);
    assert_eq!(store.num(c, PropKey::X), 115.0);
    tl.seek(2.5, &mut store);
    assert_eq!(store.num(c, PropKey::X), 90.0);
    tl.seek(0.5, &mut store);
    assert_eq!(store.num(c, PropKey::X), -50.0);
    tl.seek(1.5, &mut store);
    assert_eq!(store.num(c, PropKey::X), 20.0);
}

#[test]
fn repeat_wraps_with_dead_time() {
    let (mut store, ids) = store_with(&["dot"]);
    let mut tl = TimelineBuilder::new(linear())
        .tween(
            ids[0],
            Tween::from_to(PropertySet::new().x(0.0), PropertySet::new().x(10.0)),
            Position::default(),
        )
        .unwrap()
        .repeat(Repeat::Count(2))
        .repeat_delay(0.5)
        .build()
        .unwrap();
    assert_eq!(tl.total_duration(), 1.0 * 3.0 + 0.5 * 2.0);
    assert_eq!(tl.iteration_time(1.25), 1.0);
    assert_eq!(tl.iteration_time(1.75), 0.25);
    assert_eq!(tl.iteration_time(100.0), 1.0);

    tl.seek(1.75, &mut store);
    assert_eq!(store.num(ids[0], PropKey::X), 2.5);
    tl.seek(1.2, &mut store);
    assert_eq!(store.num(ids[0], PropKey::X), 10.0);
}

#[test]
fn infinite_repeat_never_ends() {
    let (_, ids) = store_with(&["dot"]);
    let tl = TimelineBuilder::new(linear())
        .to(ids[0], PropertySet::new().opacity(0.0))
        .unwrap()
        .repeat(Repeat::Infinite)
        .repeat_delay(1.0)
        .build()
        .unwrap();
    assert!(tl.total_duration().is_infinite());
    assert_eq!(tl.iteration_time(2.5), 0.5);
    assert_eq!(tl.iteration_time(201.5), 1.0);
}

#[test]
fn nested_children_inherit_defaults_and_offset_time() {
    let (mut store, ids) = store_with(&["a", "b"]);
    let parent = TimelineBuilder::new(Defaults {
        ease: Ease::Linear,
        duration: 2.0,
    });
    let child = parent
        .child()
        .tween(
            ids[1],
            Tween::from_to(PropertySet::new().y(0.0), PropertySet::new().y(8.0)),
            Position::default(),
        )
        .unwrap();
    let mut tl = parent
        .to(ids[0], PropertySet::new().x(4.0))
        .unwrap()
        .nest(child, Position::default())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(tl.duration(), 4.0);

    tl.seek(3.0, &mut store);
    assert_eq!(store.num(ids[0], PropKey::X), 4.0);
    assert_eq!(store.num(ids[1], PropKey::Y), 4.0);
    tl.seek(1.0, &mut store);
    assert_eq!(store.num(ids[1], PropKey::Y), 0.0);
}

#[test]
fn nested_timeline_competes_at_its_own_start() {
    let (mut store, ids) = store_with(&["a"]);
    let parent = TimelineBuilder::new(linear());
    let child = parent
        .child()
        .tween(
            ids[0],
            Tween::from_to(PropertySet::new().y(0.0), PropertySet::new().y(100.0)),
            Position::At(2.0),
        )
        .unwrap();
    let mut tl = parent
        .nest(child, Position::At(0.0))
        .unwrap()
        .tween(
            ids[0],
            Tween::from_to(PropertySet::new().y(0.0), PropertySet::new().y(50.0)).duration(0.5),
            Position::At(1.0),
        )
        .unwrap()
        .build()
        .unwrap();

    // The sibling entered the parent after the nested timeline, so it wins even though the
    // nested step starts later in absolute time.
    tl.seek(3.0, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Y), 50.0);
    tl.seek(1.25, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Y), 25.0);
    tl.seek(0.5, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Y), 0.0);
}

#[test]
fn stagger_offsets_each_target() {
    let (mut store, ids) = store_with(&["w0", "w1", "w2"]);
    let mut tl = TimelineBuilder::new(linear())
        .stagger(
            &ids,
            Tween::from_to(
                PropertySet::new().opacity(0.0),
                PropertySet::new().opacity(1.0),
            ),
            0.25,
            Position::default(),
        )
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(tl.duration(), 1.5);
    tl.seek(0.5, &mut store);
    assert_eq!(store.num(ids[0], PropKey::Opacity), 0.5);
    assert_eq!(store.num(ids[1], PropKey::Opacity), 0.25);
    assert_eq!(store.num(ids[2], PropKey::Opacity), 0.0);
}

#[test]
fn invalid_steps_are_rejected_at_construction() {
    let (_, ids) = store_with(&["a"]);
    let b = || TimelineBuilder::new(linear());
    assert!(
        b().tween(
            ids[0],
            Tween::from_to(PropertySet::new().x(0.0), PropertySet::new().y(1.0)),
            Position::default()
        )
        .is_err()
    );
    assert!(
        b().tween(ids[0], Tween::to(PropertySet::new()), Position::default())
            .is_err()
    );
    assert!(
        b().tween(
            ids[0],
            Tween::to(PropertySet::new().x(1.0)).duration(-1.0),
            Position::default()
        )
        .is_err()
    );
    assert!(
        b().tween(
            ids[0],
            Tween::to(PropertySet::new().with(PropKey::Color, 1.0)),
            Position::default()
        )
        .is_err()
    );
    assert!(b().repeat_delay(f64::NAN).build().is_err());
}

#[test]
fn touched_lists_each_pair_once() {
    let (_, ids) = store_with(&["a", "b"]);
    let tl = TimelineBuilder::new(linear())
        .to(ids[0], PropertySet::new().x(1.0).opacity(0.0))
        .unwrap()
        .to(ids[0], PropertySet::new().x(2.0))
        .unwrap()
        .to(ids[1], PropertySet::new().scale(2.0))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        tl.touched(),
        vec![
            (ids[0], PropKey::X),
            (ids[0], PropKey::Opacity),
            (ids[1], PropKey::Scale)
        ]
    );
    assert_eq!(tl.targets(), vec![ids[0], ids[1]]);
}
