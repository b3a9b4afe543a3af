use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::animation::ease::Ease;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};

/// Animatable visual property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PropKey {
    /// Horizontal offset in px.
    X,
    /// Vertical offset in px.
    Y,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Uniform scale factor.
    Scale,
    /// Blur radius in px.
    Blur,
    /// Stacking order.
    ZIndex,
    /// Background fill.
    BackgroundColor,
    /// Foreground (text) color.
    Color,
}

/// Which kind of [`PropValue`] a key accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// [`PropValue::Num`].
    Num,
    /// [`PropValue::Color`].
    Color,
}

impl PropKey {
    /// Value kind accepted by this key.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::BackgroundColor | Self::Color => ValueKind::Color,
            _ => ValueKind::Num,
        }
    }

    /// Value an element has for this key before anything animated it.
    pub fn default_value(self) -> PropValue {
        match self {
            Self::Opacity | Self::Scale => PropValue::Num(1.0),
            Self::X | Self::Y | Self::Blur | Self::ZIndex => PropValue::Num(0.0),
            Self::BackgroundColor | Self::Color => PropValue::Color(Rgba8::TRANSPARENT),
        }
    }
}

/// A single property value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Scalar value.
    Num(f64),
    /// Color value.
    Color(Rgba8),
}

impl PropValue {
    /// Kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Num(_) => ValueKind::Num,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// Scalar payload, if any.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(v) => Some(*v),
            Self::Color(_) => None,
        }
    }

    /// Color payload, if any.
    pub fn as_color(&self) -> Option<Rgba8> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Num(_) => None,
        }
    }

    // Kinds are checked when a step is built, so a mismatch here can only come from a
    // store value written with the wrong kind; the destination wins.
    pub(crate) fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Num(a), Self::Num(b)) => Self::Num(a * (1.0 - t) + b * t),
            (Self::Color(a), Self::Color(b)) => Self::Color(Rgba8::lerp(*a, *b, t)),
            _ => *b,
        }
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<Rgba8> for PropValue {
    fn from(c: Rgba8) -> Self {
        Self::Color(c)
    }
}

/// Small key-sorted map from [`PropKey`] to [`PropValue`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    from = "BTreeMap<PropKey, PropValue>",
    into = "BTreeMap<PropKey, PropValue>"
)]
pub struct PropertySet {
    entries: SmallVec<[(PropKey, PropValue); 4]>,
}

impl PropertySet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`PropertySet::set`].
    pub fn with(mut self, key: PropKey, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Horizontal offset.
    pub fn x(self, v: f64) -> Self {
        self.with(PropKey::X, v)
    }

    /// Vertical offset.
    pub fn y(self, v: f64) -> Self {
        self.with(PropKey::Y, v)
    }

    /// Opacity.
    pub fn opacity(self, v: f64) -> Self {
        self.with(PropKey::Opacity, v)
    }

    /// Scale factor.
    pub fn scale(self, v: f64) -> Self {
        self.with(PropKey::Scale, v)
    }

    /// Blur radius.
    pub fn blur(self, v: f64) -> Self {
        self.with(PropKey::Blur, v)
    }

    /// Stacking order.
    pub fn z_index(self, v: f64) -> Self {
        self.with(PropKey::ZIndex, v)
    }

    /// Background color.
    pub fn background(self, c: Rgba8) -> Self {
        self.with(PropKey::BackgroundColor, c)
    }

    /// Foreground color.
    pub fn color(self, c: Rgba8) -> Self {
        self.with(PropKey::Color, c)
    }

    /// Insert or replace `key`.
    pub fn set(&mut self, key: PropKey, value: impl Into<PropValue>) {
        let value = value.into();
        match self.entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(i) => self.entries[i].1 = value,
            Err(i) => self.entries.insert(i, (key, value)),
        }
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: PropKey) -> Option<&PropValue> {
        self.entries
            .binary_search_by_key(&key, |(k, _)| *k)
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// Value for `key`, or the key's default.
    pub fn get_or_default(&self, key: PropKey) -> PropValue {
        self.get(key).copied().unwrap_or_else(|| key.default_value())
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = PropKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (PropKey, &PropValue)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no key is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when both sets declare exactly the same keys.
    pub fn same_keys(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.keys().eq(other.keys())
    }

    /// Check that every value has the kind its key expects.
    pub fn validate(&self) -> ReelResult<()> {
        for (key, value) in self.iter() {
            if key.kind() != value.kind() {
                return Err(ReelError::config(format!(
                    "property {key:?} expects a {:?} value, got {value:?}",
                    key.kind()
                )));
            }
        }
        Ok(())
    }

    /// A set with the keys of `self` and values produced by `read`.
    pub(crate) fn project(&self, mut read: impl FnMut(PropKey) -> PropValue) -> PropertySet {
        let entries = self.keys().map(|k| (k, read(k))).collect();
        PropertySet { entries }
    }
}

impl From<BTreeMap<PropKey, PropValue>> for PropertySet {
    fn from(map: BTreeMap<PropKey, PropValue>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl From<PropertySet> for BTreeMap<PropKey, PropValue> {
    fn from(set: PropertySet) -> Self {
        set.entries.into_iter().collect()
    }
}

/// Eased interpolation between two property sets with identical keys.
///
/// `t` is clamped to `[0, 1]`; `t == 0` returns `from` and `t == 1` returns `to` exactly.
pub fn interpolate(
    from: &PropertySet,
    to: &PropertySet,
    t: f64,
    ease: Ease,
) -> ReelResult<PropertySet> {
    from.validate()?;
    to.validate()?;
    if !from.same_keys(to) {
        return Err(ReelError::config(format!(
            "interpolation key sets differ: {:?} vs {:?}",
            from.keys().collect::<Vec<_>>(),
            to.keys().collect::<Vec<_>>()
        )));
    }
    let t = t.clamp(0.0, 1.0);
    if t <= 0.0 {
        return Ok(from.clone());
    }
    if t >= 1.0 {
        return Ok(to.clone());
    }
    let e = ease.apply(t);
    let entries = from
        .entries
        .iter()
        .zip(to.entries.iter())
        .map(|((k, a), (_, b))| (*k, PropValue::lerp(a, b, e)))
        .collect();
    Ok(PropertySet { entries })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/props.rs"]
mod tests;
