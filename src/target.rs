use std::collections::{BTreeMap, HashMap};

use crate::animation::props::{PropKey, PropValue, PropertySet};
use crate::foundation::core::Rect;

/// Opaque handle to a renderable element. Issued by [`TargetStore::insert`]; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub(crate) u32);

/// How an element is currently positioned.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Positioning {
    /// Normal document flow, displaced by `shift` px (non-zero after a pin completes).
    Flow {
        /// Downward displacement in px.
        shift: f64,
    },
    /// Held at a fixed viewport offset.
    Fixed {
        /// Distance from the viewport top in px.
        top: f64,
    },
}

impl Default for Positioning {
    fn default() -> Self {
        Self::Flow { shift: 0.0 }
    }
}

#[derive(Clone, Debug)]
struct TargetState {
    name: String,
    props: PropertySet,
    layout: Option<Rect>,
    positioning: Positioning,
    text: String,
}

/// Every element the animation layer may touch, plus its computed visual state.
///
/// Layout boxes are document-space flow boxes as reported by the host, before any pin spacer
/// displacement. `None` means "not rendered yet".
#[derive(Debug, Default)]
pub struct TargetStore {
    targets: Vec<TargetState>,
    by_name: HashMap<String, TargetId>,
}

impl TargetStore {
    /// Register an element by name. Registering an existing name returns its id.
    pub fn insert(&mut self, name: impl Into<String>) -> TargetId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = TargetId(u32::try_from(self.targets.len()).unwrap_or(u32::MAX));
        self.by_name.insert(name.clone(), id);
        self.targets.push(TargetState {
            name,
            props: PropertySet::new(),
            layout: None,
            positioning: Positioning::default(),
            text: String::new(),
        });
        id
    }

    /// Look up a target by name.
    pub fn lookup(&self, name: &str) -> Option<TargetId> {
        self.by_name.get(name).copied()
    }

    /// `true` if `id` was issued by this store.
    pub fn contains(&self, id: TargetId) -> bool {
        (id.0 as usize) < self.targets.len()
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Registered name.
    pub fn name(&self, id: TargetId) -> Option<&str> {
        self.state(id).map(|s| s.name.as_str())
    }

    /// Current computed properties (only keys that were ever written).
    pub fn props(&self, id: TargetId) -> Option<&PropertySet> {
        self.state(id).map(|s| &s.props)
    }

    /// Current value of `key`, falling back to the key's default.
    pub fn value(&self, id: TargetId, key: PropKey) -> PropValue {
        self.state(id)
            .map(|s| s.props.get_or_default(key))
            .unwrap_or_else(|| key.default_value())
    }

    /// Scalar shortcut for [`TargetStore::value`].
    pub fn num(&self, id: TargetId, key: PropKey) -> f64 {
        self.value(id, key).as_num().unwrap_or_default()
    }

    /// Set a property directly (host-side initial styling).
    pub fn set_prop(&mut self, id: TargetId, key: PropKey, value: impl Into<PropValue>) {
        if let Some(s) = self.state_mut(id) {
            s.props.set(key, value);
        }
    }

    /// Document-space flow box, if rendered.
    pub fn layout(&self, id: TargetId) -> Option<Rect> {
        self.state(id).and_then(|s| s.layout)
    }

    /// Current positioning mode.
    pub fn positioning(&self, id: TargetId) -> Positioning {
        self.state(id).map(|s| s.positioning).unwrap_or_default()
    }

    /// Text content slot.
    pub fn text(&self, id: TargetId) -> &str {
        self.state(id).map(|s| s.text.as_str()).unwrap_or("")
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = TargetId> + '_ {
        (0..self.targets.len()).map(|i| TargetId(i as u32))
    }

    /// Serializable view of every target keyed by name.
    pub fn snapshot(&self) -> BTreeMap<String, TargetSnapshot> {
        self.targets
            .iter()
            .map(|s| {
                (
                    s.name.clone(),
                    TargetSnapshot {
                        props: s.props.clone(),
                        positioning: s.positioning,
                        text: (!s.text.is_empty()).then(|| s.text.clone()),
                    },
                )
            })
            .collect()
    }

    pub(crate) fn apply(&mut self, id: TargetId, key: PropKey, value: PropValue) {
        if let Some(s) = self.state_mut(id) {
            s.props.set(key, value);
        }
    }

    pub(crate) fn set_layout(&mut self, id: TargetId, layout: Option<Rect>) {
        if let Some(s) = self.state_mut(id) {
            s.layout = layout;
        }
    }

    pub(crate) fn set_positioning(&mut self, id: TargetId, positioning: Positioning) {
        if let Some(s) = self.state_mut(id) {
            s.positioning = positioning;
        }
    }

    pub(crate) fn set_text(&mut self, id: TargetId, text: &str) {
        if let Some(s) = self.state_mut(id) {
            s.text.clear();
            s.text.push_str(text);
        }
    }

    fn state(&self, id: TargetId) -> Option<&TargetState> {
        self.targets.get(id.0 as usize)
    }

    fn state_mut(&mut self, id: TargetId) -> Option<&mut TargetState> {
        self.targets.get_mut(id.0 as usize)
    }
}

/// Per-target entry of [`TargetStore::snapshot`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TargetSnapshot {
    /// Computed properties.
    pub props: PropertySet,
    /// Positioning mode.
    pub positioning: Positioning,
    /// Text content, when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
#[path = "../tests/unit/target.rs"]
mod tests;
