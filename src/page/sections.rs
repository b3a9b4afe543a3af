use crate::animation::ease::Ease;
use crate::animation::props::PropertySet;
use crate::animation::timeline::{Defaults, Position, TimelineBuilder, Tween};
use crate::config::StageConfig;
use crate::context::ContextHandle;
use crate::foundation::core::Rgba8;
use crate::foundation::error::ReelResult;
use crate::machines::cards::CardCycler;
use crate::machines::pointer;
use crate::machines::typist::Typist;
use crate::page::theme::Theme;
use crate::page::{FeatureTargets, HeroTargets, PhilosophyTargets, ProtocolTargets};
use crate::scroll::anchor::{Anchor, EndAnchor, Length};
use crate::scroll::binding::BindingMode;
use crate::scroll::flag::ScrollFlag;
use crate::scroll::range::ScrollRange;
use crate::stage::Stage;
use crate::target::TargetId;

// "power3.out"
const REVEAL: Ease = Ease::OutQuart;

fn hidden(y: f64) -> PropertySet {
    PropertySet::new().y(y).opacity(0.0)
}

// "backdrop-blur-xl"
const NAV_BLUR: f64 = 24.0;

/// Navbar fills in and blurs what scrolls under it once the page leaves the top.
pub(crate) fn navbar(
    stage: &mut Stage,
    navbar: TargetId,
    config: &StageConfig,
    theme: &Theme,
) -> ReelResult<ContextHandle> {
    stage.open("navbar", |cx| {
        cx.flag(ScrollFlag {
            target: navbar,
            threshold: config.navbar_threshold,
            raised: PropertySet::new()
                .background(theme.palette.nav_fill)
                .blur(NAV_BLUR),
            lowered: PropertySet::new()
                .background(Rgba8::TRANSPARENT)
                .blur(0.0),
        })?;
        Ok(())
    })
}

/// Intro sequence played on mount: headline lines, then the call to action, then the hint.
pub(crate) fn hero(stage: &mut Stage, t: &HeroTargets) -> ReelResult<ContextHandle> {
    stage.open("hero", |cx| {
        let tl = TimelineBuilder::new(Defaults {
            ease: REVEAL,
            duration: 1.2,
        })
        .stagger(
            &t.lines,
            Tween::from_state(hidden(50.0)),
            0.08,
            Position::default(),
        )?
        .tween(t.cta, Tween::from_state(hidden(20.0)), Position::End(-0.8))?
        .tween(t.hint, Tween::from_state(hidden(10.0)), Position::End(-0.4))?
        .build()?;
        let tl = cx.create(tl)?;
        cx.play(tl)?;
        Ok(())
    })
}

/// Card wrappers reveal on entry; the shuffler, typist and pointer demo run for the page's
/// lifetime.
pub(crate) fn features(
    stage: &mut Stage,
    t: &FeatureTargets,
    config: &StageConfig,
    theme: &Theme,
) -> ReelResult<ContextHandle> {
    stage.open("features", |cx| {
        let reveal = TimelineBuilder::new(Defaults {
            ease: REVEAL,
            duration: 1.0,
        })
        .stagger(
            &t.wrappers,
            Tween::from_state(hidden(60.0)),
            0.15,
            Position::default(),
        )?
        .build()?;
        let reveal = cx.create(reveal)?;
        cx.bind(
            Some(reveal),
            ScrollRange::parse(t.section, "top 75%", "bottom top")?,
            BindingMode::Enter,
        )?;

        cx.spawn(
            CardCycler::new(t.cards.clone(), config.card_cadence())?
                .with_transition(config.card_transition()),
        )?;
        cx.spawn(Typist::new(
            t.telemetry,
            config.messages.clone(),
            config.char_delay(),
            config.pause(),
        )?)?;

        let script = cx.create(pointer::script(t.pointer, theme.pointer_palette())?)?;
        cx.play(script)?;
        Ok(())
    })
}

/// Each manifesto line rises in when its own top crosses 85% of the viewport.
pub(crate) fn philosophy(stage: &mut Stage, t: &PhilosophyTargets) -> ReelResult<ContextHandle> {
    stage.open("philosophy", |cx| {
        for &line in &t.lines {
            let tl = TimelineBuilder::new(Defaults {
                ease: REVEAL,
                duration: 1.0,
            })
            .tween(line, Tween::from_state(hidden(30.0)), Position::default())?
            .build()?;
            let tl = cx.create(tl)?;
            cx.bind(
                Some(tl),
                ScrollRange::parse(line, "top 85%", "bottom top")?,
                BindingMode::Enter,
            )?;
        }
        Ok(())
    })
}

/// Pin the section for one viewport height per card; during each height the card in front
/// recedes as the next one slides over it.
pub(crate) fn protocol(stage: &mut Stage, t: &ProtocolTargets) -> ReelResult<ContextHandle> {
    stage.open("protocol", |cx| {
        let steps = t.cards.len() as f64;
        cx.pin(ScrollRange::new(
            t.section,
            Anchor::TOP_TOP,
            EndAnchor::Relative(Length::Fraction(steps)),
        ))?;

        for (i, pair) in t.cards.windows(2).enumerate() {
            let card = pair[0];
            let tl = TimelineBuilder::new(Defaults {
                ease: Ease::Linear,
                duration: 1.0,
            })
            .to(card, PropertySet::new().scale(0.92).opacity(0.4).blur(15.0))?
            .build()?;
            let tl = cx.create(tl)?;
            let top = Length::Fraction(0.0);
            let range = ScrollRange::new(
                t.section,
                Anchor::new(top, Length::Fraction(-(i as f64))),
                Anchor::new(top, Length::Fraction(-(i as f64 + 1.0))),
            );
            cx.bind(Some(tl), range, BindingMode::Scrub)?;
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/page/sections.rs"]
mod tests;
