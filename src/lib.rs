//! scrollreel is a scroll-synchronized animation orchestration layer.
//!
//! A host (a browser shell, a native UI, a test harness) registers the elements it renders as
//! targets on a [`Stage`], reports their layout and the viewport, and forwards scroll offsets
//! and frame timestamps. The stage answers with the computed visual state of every target:
//!
//! - Build seekable [`Timeline`]s from [`Tween`]s with relative [`Position`]s
//! - Open an animation context with [`Stage::open`] and, inside it, `create` timelines,
//!   `play` them on the clock, `bind` them to scroll (enter, scrub, pin), `flag` elements past
//!   a scroll threshold ([`ScrollFlag`]) and `spawn` timed machines ([`CardCycler`], [`Typist`])
//! - Dispose the context to release everything it created and restore what it changed
//!
//! The [`Page`] choreography mounts the marketing page's navbar and four sections on top of this API.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod clock;
pub(crate) mod config;
pub(crate) mod context;
pub(crate) mod machines;
pub(crate) mod page;
pub(crate) mod scroll;
pub(crate) mod stage;
pub(crate) mod target;

pub use crate::animation::ease::Ease;
pub use crate::animation::props::{PropKey, PropValue, PropertySet, ValueKind, interpolate};
pub use crate::animation::timeline::{
    Defaults, Position, Repeat, Timeline, TimelineBuilder, Tween,
};
pub use crate::config::StageConfig;
pub use crate::context::{ContextHandle, ContextScope};
pub use crate::foundation::core::{Millis, Rect, Rgba8, Viewport};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::foundation::ids::{
    BindingId, ContextId, FlagId, MachineId, PlaybackId, TimelineId,
};
pub use crate::machines::TimedMachine;
pub use crate::machines::cards::{CARD_TRANSITION, CardCycler};
pub use crate::machines::pointer::{PointerPalette, PointerTargets, script as pointer_script};
pub use crate::machines::typist::{Typist, TypistPhase};
pub use crate::page::layout::synthetic as synthetic_page;
pub use crate::page::theme::{Fonts, Palette, Theme, ThemeName};
pub use crate::page::{
    FeatureTargets, HeroTargets, Page, PageTargets, PhilosophyTargets, ProtocolTargets,
};
pub use crate::scroll::anchor::{Anchor, EndAnchor, Length};
pub use crate::scroll::binding::{BindingMode, BindingState};
pub use crate::scroll::flag::ScrollFlag;
pub use crate::scroll::range::{ResolvedRange, ScrollRange};
pub use crate::stage::Stage;
pub use crate::target::{Positioning, TargetId, TargetSnapshot, TargetStore};
