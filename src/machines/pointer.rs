use crate::animation::ease::Ease;
use crate::animation::props::PropertySet;
use crate::animation::timeline::{Position, Repeat, Timeline, TimelineBuilder, Tween};
use crate::foundation::core::Rgba8;
use crate::foundation::error::ReelResult;
use crate::target::TargetId;

/// Elements driven by the scripted pointer demo.
#[derive(Clone, Copy, Debug)]
pub struct PointerTargets {
    /// The simulated cursor.
    pub cursor: TargetId,
    /// The calendar day cell the cursor clicks first.
    pub day: TargetId,
    /// The confirm button the cursor clicks second.
    pub confirm: TargetId,
}

/// Colors used by the pointer demo.
#[derive(Clone, Copy, Debug)]
pub struct PointerPalette {
    /// Fill of a clicked element.
    pub highlight: Rgba8,
    /// Text color on a clicked element.
    pub highlight_text: Rgba8,
    /// Resting text color of the day cell.
    pub day_text: Rgba8,
    /// Resting text color of the confirm button.
    pub confirm_text: Rgba8,
}

const CURSOR_START: (f64, f64) = (-50.0, -50.0);
const DAY_AT: (f64, f64) = (90.0, 60.0);
const CONFIRM_AT: (f64, f64) = (140.0, 140.0);

fn press(tl: TimelineBuilder, cursor: TargetId) -> ReelResult<TimelineBuilder> {
    tl.tween(
        cursor,
        Tween::to(PropertySet::new().scale(0.8))
            .duration(0.1)
            .ease(Ease::InQuad),
        Position::default(),
    )?
    .tween(
        cursor,
        Tween::to(PropertySet::new().scale(1.0))
            .duration(0.1)
            .ease(Ease::OutBack),
        Position::default(),
    )
}

/// Build the looping "cursor books a session" script.
///
/// The cursor fades in, travels to the day cell, clicks it, travels to the confirm button,
/// clicks it and fades out. The loop restarts after a one second pause and runs until the
/// owning context is disposed. The confirm button is reset at the end of each iteration so
/// every loop starts from the same picture.
pub fn script(targets: PointerTargets, palette: PointerPalette) -> ReelResult<Timeline> {
    let PointerTargets {
        cursor,
        day,
        confirm,
    } = targets;
    let rest_day = PropertySet::new()
        .background(Rgba8::TRANSPARENT)
        .color(palette.day_text);
    let rest_confirm = PropertySet::new()
        .background(Rgba8::TRANSPARENT)
        .color(palette.confirm_text);
    let clicked = PropertySet::new()
        .background(palette.highlight)
        .color(palette.highlight_text);

    let tl = Timeline::builder()
        .ease(Ease::InOutCubic)
        .repeat(Repeat::Infinite)
        .repeat_delay(1.0)
        .set(
            cursor,
            PropertySet::new()
                .x(CURSOR_START.0)
                .y(CURSOR_START.1)
                .opacity(0.0)
                .scale(1.0),
            Position::At(0.0),
        )?
        .set(day, rest_day, Position::At(0.0))?
        .set(confirm, rest_confirm.clone(), Position::At(0.0))?
        .tween(
            cursor,
            Tween::to(PropertySet::new().opacity(1.0)).duration(0.2),
            Position::default(),
        )?
        .tween(
            cursor,
            Tween::to(PropertySet::new().x(DAY_AT.0).y(DAY_AT.1)).duration(1.0),
            Position::default(),
        )?;
    let tl = press(tl, cursor)?
        .set(day, clicked.clone(), Position::PrevStart(0.0))?
        .tween(
            cursor,
            Tween::to(PropertySet::new().x(CONFIRM_AT.0).y(CONFIRM_AT.1)).duration(0.8),
            Position::End(0.3),
        )?;
    press(tl, cursor)?
        .tween(
            confirm,
            Tween::to(clicked).duration(0.15),
            Position::PrevStart(0.0),
        )?
        .tween(
            cursor,
            Tween::to(PropertySet::new().opacity(0.0))
                .duration(0.2)
                .delay(0.5),
            Position::default(),
        )?
        .set(confirm, rest_confirm, Position::default())?
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/machines/pointer.rs"]
mod tests;
