use super::*;
use crate::animation::ease::Ease;
use crate::animation::props::PropertySet;
use crate::animation::timeline::{Defaults, Position, Repeat, TimelineBuilder, Tween};
use crate::foundation::core::{Millis, Rect, Viewport};
use crate::machines::cards::CardCycler;
use crate::scroll::binding::BindingState;

fn stage() -> Stage {
    Stage::new(Viewport::new(1000.0, 6000.0).unwrap())
}

fn rise(target: TargetId) -> ReelResult<Timeline> {
    TimelineBuilder::new(Defaults {
        ease: Ease::Linear,
        duration: 1.0,
    })
    .tween(
        target,
        Tween::from_state(PropertySet::new().y(60.0).opacity(0.0)),
        Position::default(),
    )?
    .build()
}

#[test]
fn failed_setup_releases_everything() {
    let mut stage = stage();
    let section = stage.register("section", Some(Rect::new(0.0, 1000.0, 100.0, 2000.0)));
    let card = stage.register("card", None);
    stage.targets_mut().set_prop(card, PropKey::Opacity, 0.7);

    let err = stage
        .open("broken", |cx| {
            let tl = cx.create(rise(card)?)?;
            cx.bind(
                Some(tl),
                ScrollRange::parse(section, "top 75%", "bottom top")?,
                BindingMode::Enter,
            )?;
            cx.pin(ScrollRange::parse(section, "top top", "+=100vh")?)?;
            cx.spawn(CardCycler::new(vec![card], Millis(3000))?)?;
            Err(ReelError::validation("late failure"))
        })
        .unwrap_err();
    assert!(err.to_string().contains("late failure"));

    assert_eq!(stage.context_count(), 0);
    assert_eq!(stage.timeline_count(), 0);
    assert_eq!(stage.binding_count(), 0);
    assert_eq!(stage.machine_count(), 0);
    assert_eq!(stage.pending_timers(), 0);
    assert_eq!(stage.scroll_height(), 6000.0);
    assert_eq!(stage.targets().num(card, PropKey::Opacity), 0.7);
    assert_eq!(stage.targets().num(card, PropKey::Y), 0.0);
}

#[test]
fn dispose_restores_values_from_creation_time() {
    let mut stage = stage();
    let card = stage.register("card", None);
    stage.targets_mut().set_prop(card, PropKey::Scale, 1.5);

    let ctx = stage
        .open("scale", |cx| {
            let tl = TimelineBuilder::new(Defaults::default())
                .tween(card, Tween::to(PropertySet::new().scale(0.5)), 0.0.into())?
                .build()?;
            let tl = cx.create(tl)?;
            cx.play(tl)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(stage.context_label(ctx.id()), Some("scale"));
    stage.tick(Millis(0));
    stage.tick(Millis(1000));
    assert_eq!(stage.targets().num(card, PropKey::Scale), 0.5);

    ctx.dispose(&mut stage);
    assert_eq!(stage.targets().num(card, PropKey::Scale), 1.5);
    assert_eq!(stage.playback_count(), 0);
}

#[test]
fn binding_configuration_errors_surface_at_construction() {
    let mut stage = stage();
    let section = stage.register("section", Some(Rect::new(0.0, 1000.0, 100.0, 2000.0)));
    let card = stage.register("card", None);
    let range = ScrollRange::parse(section, "top top", "bottom top").unwrap();

    let mut foreign = None;
    let other = stage
        .open("other", |cx| {
            foreign = Some(cx.create(rise(card)?)?);
            Ok(())
        })
        .unwrap();
    let foreign = foreign.unwrap();

    let ctx = stage
        .open("checks", |cx| {
            assert!(cx.bind(None, range, BindingMode::Scrub).is_err());
            assert!(cx.bind(None, range, BindingMode::Enter).is_err());
            assert!(cx.bind(Some(foreign), range, BindingMode::Scrub).is_err());

            let looping = TimelineBuilder::new(Defaults::default())
                .repeat(Repeat::Infinite)
                .to(card, PropertySet::new().x(10.0))?
                .build()?;
            let looping = cx.create(looping)?;
            assert!(cx.bind(Some(looping), range, BindingMode::Scrub).is_err());

            let ghost = ScrollRange::parse(TargetId(99), "top top", "bottom top")?;
            let tl = cx.create(rise(card)?)?;
            assert!(cx.bind(Some(tl), ghost, BindingMode::Scrub).is_err());

            let empty = ScrollRange::parse(section, "top top", "+=0")?;
            assert!(cx.pin(empty).is_err());
            assert!(cx.create(rise(TargetId(99))?).is_err());
            Ok(())
        })
        .unwrap();
    assert_eq!(stage.binding_count(), 0);

    stage.dispose(other);
    let err = stage
        .open("stale", |cx| {
            cx.play(foreign)?;
            Ok(())
        })
        .unwrap_err();
    assert!(err.to_string().contains("disposed"));
    stage.dispose(ctx);
}

#[test]
fn pending_binding_activates_once_laid_out() {
    let mut stage = stage();
    let section = stage.register("section", None);
    let card = stage.register("card", None);
    let mut binding = None;
    let ctx = stage
        .open("deferred", |cx| {
            let tl = cx.create(rise(card)?)?;
            binding = Some(cx.bind(
                Some(tl),
                ScrollRange::parse(section, "top bottom", "bottom top")?,
                BindingMode::Scrub,
            )?);
            Ok(())
        })
        .unwrap();
    let binding = binding.unwrap();
    assert_eq!(stage.binding_state(binding), Some(BindingState::Pending));

    stage.scroll_to(1500.0);
    assert_eq!(stage.targets().num(card, PropKey::Opacity), 1.0);

    // [2000 - 1000, 3000]
    stage.set_layout(section, Some(Rect::new(0.0, 2000.0, 100.0, 3000.0)));
    assert!(matches!(
        stage.binding_state(binding),
        Some(BindingState::Active { progress, .. }) if progress == 0.25
    ));
    assert_eq!(stage.targets().num(card, PropKey::Y), 45.0);

    stage.dispose(ctx);
    assert_eq!(stage.binding_state(binding), None);
}

#[test]
fn enter_plays_once_and_never_reverses() {
    let mut stage = stage();
    let section = stage.register("section", Some(Rect::new(0.0, 2000.0, 100.0, 3000.0)));
    let card = stage.register("card", None);
    let mut timeline = None;
    let ctx = stage
        .open("enter", |cx| {
            let tl = cx.create(rise(card)?)?;
            cx.bind(
                Some(tl),
                ScrollRange::parse(section, "top 75%", "bottom top")?,
                BindingMode::Enter,
            )?;
            timeline = Some(tl);
            Ok(())
        })
        .unwrap();
    let timeline = timeline.unwrap();

    // Rendered hidden before the trigger is reached.
    assert_eq!(stage.targets().num(card, PropKey::Opacity), 0.0);
    assert_eq!(stage.targets().num(card, PropKey::Y), 60.0);

    // start = 2000 - 750
    stage.scroll_to(1250.0);
    assert!(!stage.is_playing(timeline));
    stage.scroll_to(1300.0);
    assert!(stage.is_playing(timeline));

    stage.tick(Millis(100));
    stage.scroll_to(0.0);
    stage.tick(Millis(600));
    assert!((stage.targets().num(card, PropKey::Opacity) - 0.5).abs() < 1e-9);
    stage.tick(Millis(1100));
    assert_eq!(stage.targets().num(card, PropKey::Opacity), 1.0);
    assert!(!stage.is_playing(timeline));

    stage.scroll_to(1300.0);
    assert!(!stage.is_playing(timeline));
    assert_eq!(stage.targets().num(card, PropKey::Y), 0.0);

    stage.dispose(ctx);
}
