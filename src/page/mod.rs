//! The marketing page: one animation context per section, mounted against host-supplied targets.

use crate::config::StageConfig;
use crate::context::ContextHandle;
use crate::foundation::error::ReelResult;
use crate::machines::pointer::PointerTargets;
use crate::page::theme::Theme;
use crate::stage::Stage;
use crate::target::TargetId;

pub(crate) mod layout;
pub(crate) mod sections;
pub(crate) mod theme;

/// Hero section: headline lines, call to action and scroll hint.
#[derive(Clone, Debug)]
pub struct HeroTargets {
    pub section: TargetId,
    pub lines: Vec<TargetId>,
    pub cta: TargetId,
    pub hint: TargetId,
}

/// Features section: three card wrappers and the machines living inside them.
#[derive(Clone, Debug)]
pub struct FeatureTargets {
    pub section: TargetId,
    pub wrappers: Vec<TargetId>,
    /// Card stack, front first.
    pub cards: Vec<TargetId>,
    /// Text slot the typist writes into.
    pub telemetry: TargetId,
    pub pointer: PointerTargets,
}

/// Philosophy section: manifesto lines revealed one by one.
#[derive(Clone, Debug)]
pub struct PhilosophyTargets {
    pub section: TargetId,
    pub lines: Vec<TargetId>,
}

/// Protocol section: pinned while its cards stack over each other.
#[derive(Clone, Debug)]
pub struct ProtocolTargets {
    pub section: TargetId,
    pub cards: Vec<TargetId>,
}

/// Every element the page choreography animates.
#[derive(Clone, Debug)]
pub struct PageTargets {
    /// Fixed navigation bar; fills in once the page is scrolled.
    pub navbar: TargetId,
    pub hero: HeroTargets,
    pub features: FeatureTargets,
    pub philosophy: PhilosophyTargets,
    pub protocol: ProtocolTargets,
}

/// A mounted page. Holds one open context per section.
#[derive(Debug)]
pub struct Page {
    contexts: Vec<ContextHandle>,
}

impl Page {
    /// Open the navbar, hero, features, philosophy and protocol contexts, in that order.
    ///
    /// If a section fails to mount, the sections already mounted are disposed before the error
    /// is returned.
    #[tracing::instrument(skip_all, fields(theme = %theme.name))]
    pub fn mount(
        stage: &mut Stage,
        targets: &PageTargets,
        config: &StageConfig,
        theme: &Theme,
    ) -> ReelResult<Self> {
        let mut page = Self {
            contexts: Vec::with_capacity(5),
        };
        let mounted = (|| -> ReelResult<()> {
            page.contexts
                .push(sections::navbar(stage, targets.navbar, config, theme)?);
            page.contexts.push(sections::hero(stage, &targets.hero)?);
            page.contexts
                .push(sections::features(stage, &targets.features, config, theme)?);
            page.contexts
                .push(sections::philosophy(stage, &targets.philosophy)?);
            page.contexts.push(sections::protocol(stage, &targets.protocol)?);
            Ok(())
        })();
        match mounted {
            Ok(()) => Ok(page),
            Err(err) => {
                page.unmount(stage);
                Err(err)
            }
        }
    }

    /// Dispose every section, last mounted first.
    pub fn unmount(mut self, stage: &mut Stage) {
        while let Some(ctx) = self.contexts.pop() {
            stage.dispose(ctx);
        }
    }

    /// Handles of the open section contexts, in mount order.
    pub fn contexts(&self) -> &[ContextHandle] {
        &self.contexts
    }
}
