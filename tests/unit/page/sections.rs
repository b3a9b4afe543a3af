use super::*;
use crate::animation::props::PropKey;
use crate::foundation::core::Millis;
use crate::page::PageTargets;
use crate::page::layout::synthetic;
use crate::target::Positioning;

fn page() -> (Stage, PageTargets, StageConfig) {
    let config = StageConfig::default();
    let (stage, targets) = synthetic(&config, &Theme::dark()).unwrap();
    (stage, targets, config)
}

#[test]
fn navbar_fills_in_past_the_threshold_until_disposed() {
    let (mut stage, t, config) = page();
    let theme = Theme::dark();
    stage.targets_mut().set_prop(t.navbar, PropKey::Blur, 2.0);
    let ctx = navbar(&mut stage, t.navbar, &config, &theme).unwrap();
    let fill = |stage: &Stage| {
        stage
            .targets()
            .value(t.navbar, PropKey::BackgroundColor)
            .as_color()
    };
    assert_eq!(fill(&stage), Some(Rgba8::TRANSPARENT));
    assert_eq!(stage.targets().num(t.navbar, PropKey::Blur), 0.0);

    stage.scroll_to(50.0);
    assert_eq!(fill(&stage), Some(Rgba8::TRANSPARENT));
    stage.scroll_to(51.0);
    assert_eq!(fill(&stage), Some(theme.palette.nav_fill));
    assert_eq!(stage.targets().num(t.navbar, PropKey::Blur), NAV_BLUR);
    stage.scroll_to(50.0);
    assert_eq!(stage.targets().num(t.navbar, PropKey::Blur), 0.0);

    stage.scroll_to(400.0);
    stage.dispose(ctx);
    assert_eq!(stage.flag_count(), 0);
    assert_eq!(stage.targets().num(t.navbar, PropKey::Blur), 2.0);
    stage.scroll_to(0.0);
    stage.scroll_to(600.0);
    assert_eq!(stage.targets().num(t.navbar, PropKey::Blur), 2.0);
}

#[test]
fn hero_intro_plays_on_mount() {
    let (mut stage, t, _) = page();
    let ctx = hero(&mut stage, &t.hero).unwrap();
    for &line in &t.hero.lines {
        assert_eq!(stage.targets().num(line, PropKey::Opacity), 0.0);
        assert_eq!(stage.targets().num(line, PropKey::Y), 50.0);
    }
    assert_eq!(stage.targets().num(t.hero.hint, PropKey::Y), 10.0);

    stage.tick(Millis(0));
    stage.tick(Millis(3000));
    for id in t.hero.lines.iter().copied().chain([t.hero.cta, t.hero.hint]) {
        assert_eq!(stage.targets().num(id, PropKey::Opacity), 1.0);
        assert_eq!(stage.targets().num(id, PropKey::Y), 0.0);
    }
    assert_eq!(stage.playback_count(), 0);
    stage.dispose(ctx);
}

#[test]
fn features_run_machines_and_reveal_on_entry() {
    let (mut stage, t, _) = page();
    let f = &t.features;
    let ctx = features(&mut stage, f, &StageConfig::default(), &Theme::dark()).unwrap();
    assert_eq!(stage.machine_count(), 2);
    for &w in &f.wrappers {
        assert_eq!(stage.targets().num(w, PropKey::Opacity), 0.0);
    }

    stage.tick(Millis(0));
    stage.tick(Millis(50));
    assert_eq!(stage.targets().text(f.telemetry), "S");
    stage.tick(Millis(1200));
    assert_eq!(stage.targets().num(f.pointer.cursor, PropKey::X), 90.0);

    // start = 900 - 0.75 * 900
    stage.scroll_to(300.0);
    stage.tick(Millis(1300));
    stage.tick(Millis(3000));
    for &w in &f.wrappers {
        assert_eq!(stage.targets().num(w, PropKey::Opacity), 1.0);
    }
    assert_eq!(stage.targets().num(f.cards[2], PropKey::ZIndex), 10.0);

    stage.dispose(ctx);
    assert_eq!(stage.machine_count(), 0);
    assert_eq!(stage.playback_count(), 0);
}

#[test]
fn manifesto_lines_reveal_independently() {
    let (mut stage, t, _) = page();
    let ctx = philosophy(&mut stage, &t.philosophy).unwrap();
    let first = t.philosophy.lines[0];
    let second = t.philosophy.lines[1];

    // First line top 2205, start 2205 - 765.
    stage.scroll_to(1400.0);
    stage.tick(Millis(0));
    stage.scroll_to(1500.0);
    stage.tick(Millis(16));
    stage.tick(Millis(2000));
    assert_eq!(stage.targets().num(first, PropKey::Opacity), 1.0);
    assert_eq!(stage.targets().num(second, PropKey::Opacity), 0.0);
    assert_eq!(stage.targets().num(second, PropKey::Y), 30.0);
    stage.dispose(ctx);
}

#[test]
fn protocol_pins_and_stacks_cards() {
    let (mut stage, t, config) = page();
    let vh = config.viewport_height;
    let before = stage.scroll_height();
    let p = &t.protocol;
    let ctx = protocol(&mut stage, p).unwrap();
    assert_eq!(stage.scroll_height(), before + 3.0 * vh);

    let top = stage.targets().layout(p.section).unwrap().y0;
    stage.scroll_to(top + 0.5 * vh);
    assert!((stage.targets().num(p.cards[0], PropKey::Scale) - 0.96).abs() < 1e-9);
    assert_eq!(stage.targets().num(p.cards[1], PropKey::Scale), 1.0);
    assert_eq!(stage.viewport_position(p.section), Some(0.0));

    stage.scroll_to(top + 1.5 * vh);
    assert_eq!(stage.targets().num(p.cards[0], PropKey::Scale), 0.92);
    assert_eq!(stage.targets().num(p.cards[0], PropKey::Blur), 15.0);
    assert!((stage.targets().num(p.cards[1], PropKey::Opacity) - 0.7).abs() < 1e-9);
    assert_eq!(stage.viewport_position(p.section), Some(0.0));

    stage.scroll_to(top + 3.0 * vh);
    assert_eq!(
        stage.targets().positioning(p.section),
        Positioning::Flow { shift: 3.0 * vh }
    );
    assert_eq!(stage.viewport_position(p.section), Some(0.0));

    stage.dispose(ctx);
    assert_eq!(stage.scroll_height(), before);
    assert_eq!(stage.targets().num(p.cards[0], PropKey::Scale), 1.0);
    assert_eq!(stage.targets().num(p.cards[0], PropKey::Blur), 0.0);
}
