use crate::animation::props::PropKey;
use crate::config::StageConfig;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::ReelResult;
use crate::machines::pointer::PointerTargets;
use crate::page::theme::Theme;
use crate::page::{FeatureTargets, HeroTargets, PageTargets, PhilosophyTargets, ProtocolTargets};
use crate::stage::Stage;
use crate::target::{Positioning, TargetId};

const PAGE_WIDTH: f64 = 1280.0;
const NAV_WIDTH: f64 = 1024.0;
const NAV_TOP: f64 = 24.0;

// Stacks full-width sections top to bottom.
struct Column {
    y: f64,
}

impl Column {
    fn section(&mut self, height: f64) -> Rect {
        let r = Rect::new(0.0, self.y, PAGE_WIDTH, self.y + height);
        self.y += height;
        r
    }
}

fn inset(outer: Rect, x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(outer.x0 + x, outer.y0 + y, outer.x0 + x + w, outer.y0 + y + h)
}

/// Lay out the marketing page in a fresh stage, the way a browser would at `config`'s viewport
/// height, and register every animated element.
///
/// Sections: hero (1 vh), features (1.2 vh), philosophy (1 vh), protocol (1 vh) and a footer
/// (0.5 vh). The navbar floats over them, fixed 24 px below the viewport top. Host-side initial styling (backgrounds, card titles) comes from `theme`.
pub fn synthetic(config: &StageConfig, theme: &Theme) -> ReelResult<(Stage, PageTargets)> {
    config.validate()?;
    let vh = config.viewport_height;
    let mut stage = Stage::new(config.viewport(vh)?);
    let mut col = Column { y: 0.0 };
    let palette = theme.palette;

    let nav_x = (PAGE_WIDTH - NAV_WIDTH) / 2.0;
    let navbar = stage.register(
        "navbar",
        Some(Rect::new(nav_x, NAV_TOP, nav_x + NAV_WIDTH, NAV_TOP + 72.0)),
    );
    stage
        .targets_mut()
        .set_positioning(navbar, Positioning::Fixed { top: NAV_TOP });

    let hero_box = col.section(vh);
    let hero_section = stage.register("hero", Some(hero_box));
    let lines = (0..config.hero_lines)
        .map(|i| {
            let r = inset(hero_box, 96.0, vh * 0.3 + 80.0 * i as f64, 720.0, 70.0);
            stage.register(format!("hero-line-{i}"), Some(r))
        })
        .collect::<Vec<_>>();
    let below_lines = vh * 0.3 + 80.0 * config.hero_lines as f64 + 24.0;
    let cta = stage.register("hero-cta", Some(inset(hero_box, 96.0, below_lines, 220.0, 56.0)));
    let hint = stage.register("hero-hint", Some(inset(hero_box, 616.0, vh - 60.0, 48.0, 40.0)));

    let features_box = col.section(vh * 1.2);
    let features_section = stage.register("features", Some(features_box));
    let wrapper_w = (PAGE_WIDTH - 96.0 * 2.0 - 40.0 * 2.0) / 3.0;
    let wrapper_boxes: Vec<Rect> = (0..3)
        .map(|i| {
            let x = 96.0 + (wrapper_w + 40.0) * i as f64;
            inset(features_box, x, vh * 0.2, wrapper_w, vh * 0.8)
        })
        .collect();
    let wrappers = wrapper_boxes
        .iter()
        .enumerate()
        .map(|(i, &r)| stage.register(format!("feature-wrapper-{i}"), Some(r)))
        .collect::<Vec<_>>();
    let card_box = inset(wrapper_boxes[0], 24.0, 120.0, wrapper_w - 48.0, 180.0);
    let cards = config
        .card_titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let id = stage.register(format!("shuffler-card-{i}"), Some(card_box));
            style(&mut stage, id, palette.surface);
            stage.targets_mut().set_text(id, title);
            id
        })
        .collect::<Vec<_>>();
    let telemetry = stage.register(
        "telemetry-text",
        Some(inset(wrapper_boxes[1], 24.0, 120.0, wrapper_w - 48.0, 120.0)),
    );
    let demo = wrapper_boxes[2];
    let pointer = PointerTargets {
        cursor: stage.register("pointer-cursor", Some(inset(demo, 0.0, 0.0, 24.0, 24.0))),
        day: stage.register("pointer-day", Some(inset(demo, 90.0, 60.0, 32.0, 32.0))),
        confirm: stage.register("pointer-confirm", Some(inset(demo, 120.0, 140.0, 120.0, 40.0))),
    };

    let philosophy_box = col.section(vh);
    let philosophy_section = stage.register("philosophy", Some(philosophy_box));
    let manifesto = (0..config.manifesto_lines)
        .map(|i| {
            let r = inset(philosophy_box, 96.0, vh * 0.25 + 120.0 * i as f64, 1088.0, 100.0);
            stage.register(format!("manifesto-line-{i}"), Some(r))
        })
        .collect::<Vec<_>>();

    let protocol_box = col.section(vh);
    let protocol_section = stage.register("protocol", Some(protocol_box));
    let protocol_cards = (0..config.protocol_steps)
        .map(|i| {
            let id = stage.register(format!("protocol-card-{i}"), Some(protocol_box));
            style(&mut stage, id, palette.surface);
            id
        })
        .collect::<Vec<_>>();

    let footer_box = col.section(vh * 0.5);
    stage.register("footer", Some(footer_box));

    for section in [hero_section, features_section, philosophy_section, protocol_section] {
        style(&mut stage, section, palette.background);
    }
    stage.resize(vh, col.y)?;

    let targets = PageTargets {
        navbar,
        hero: HeroTargets {
            section: hero_section,
            lines,
            cta,
            hint,
        },
        features: FeatureTargets {
            section: features_section,
            wrappers,
            cards,
            telemetry,
            pointer,
        },
        philosophy: PhilosophyTargets {
            section: philosophy_section,
            lines: manifesto,
        },
        protocol: ProtocolTargets {
            section: protocol_section,
            cards: protocol_cards,
        },
    };
    tracing::debug!(
        targets = stage.targets().len(),
        document_height = col.y,
        "synthetic page laid out"
    );
    Ok((stage, targets))
}

fn style(stage: &mut Stage, id: TargetId, background: Rgba8) {
    stage.targets_mut().set_prop(id, PropKey::BackgroundColor, background);
}

#[cfg(test)]
#[path = "../../tests/unit/page/layout.rs"]
mod tests;
