// ============================================================================
// RENDER TARGETS — per-target inversion state owned by the host integration
// ============================================================================
//
// Each render target (a window, a video surface, a canvas view) is either
// NORMAL or INVERTED. Only INVERTED targets are stored; a target missing from
// the set is NORMAL. The filter itself stays stateless.
// ============================================================================

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use image::RgbaImage;
use uuid::Uuid;

use crate::filter::ColorInversionFilter;
use crate::frame::Frame;

/// Opaque identifier for a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(Uuid);

impl TargetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TargetId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterState {
    #[default]
    Normal,
    Inverted,
}

impl FilterState {
    pub fn toggled(self) -> Self {
        match self {
            FilterState::Normal => FilterState::Inverted,
            FilterState::Inverted => FilterState::Normal,
        }
    }

    pub fn is_inverted(self) -> bool {
        self == FilterState::Inverted
    }
}

/// A render target as enumerated by the host, with its current focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderTarget<K = TargetId> {
    pub id: K,
    pub focused: bool,
}

/// Maps render targets to their inversion state and renders frames for them.
///
/// While suspended the filter is detached from every target, but the set of
/// inverted targets is kept so [`resume`](Self::resume) can reattach it.
#[derive(Debug, Clone)]
pub struct InversionRegistry<K = TargetId> {
    filter: ColorInversionFilter,
    inverted: HashSet<K>,
    suspended: bool,
}

impl<K: Eq + Hash + Copy> Default for InversionRegistry<K> {
    fn default() -> Self {
        Self::new(ColorInversionFilter::default())
    }
}

impl<K: Eq + Hash + Copy> InversionRegistry<K> {
    pub fn new(filter: ColorInversionFilter) -> Self {
        Self {
            filter,
            inverted: HashSet::new(),
            suspended: false,
        }
    }

    pub fn filter(&self) -> &ColorInversionFilter {
        &self.filter
    }

    /// Remembered state of `target`, independent of suspension.
    pub fn state(&self, target: K) -> FilterState {
        if self.inverted.contains(&target) {
            FilterState::Inverted
        } else {
            FilterState::Normal
        }
    }

    pub fn is_inverted(&self, target: K) -> bool {
        self.state(target).is_inverted()
    }

    /// `true` when frames for `target` currently go through the filter.
    pub fn is_attached(&self, target: K) -> bool {
        !self.suspended && self.is_inverted(target)
    }

    pub fn set_state(&mut self, target: K, state: FilterState) {
        match state {
            FilterState::Inverted => {
                self.inverted.insert(target);
            }
            FilterState::Normal => {
                self.inverted.remove(&target);
            }
        }
    }

    /// Flip `target` between NORMAL and INVERTED and return the new state.
    pub fn toggle(&mut self, target: K) -> FilterState {
        let next = self.state(target).toggled();
        self.set_state(target, next);
        next
    }

    /// Toggle every focused target in the host's enumeration. Returns the ids
    /// that were toggled, in enumeration order.
    pub fn toggle_focused<'a, I>(&mut self, targets: I) -> Vec<K>
    where
        I: IntoIterator<Item = &'a RenderTarget<K>>,
        K: 'a,
    {
        let mut toggled = Vec::new();
        for t in targets {
            if t.focused {
                self.toggle(t.id);
                toggled.push(t.id);
            }
        }
        toggled
    }

    /// Drop any state for a target that no longer exists.
    pub fn forget(&mut self, target: K) {
        self.inverted.remove(&target);
    }

    pub fn inverted_targets(&self) -> Vec<K> {
        self.inverted.iter().copied().collect()
    }

    pub fn inverted_count(&self) -> usize {
        self.inverted.len()
    }

    /// Detach the filter from every target, keeping the remembered states.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Reattach the filter to every target remembered as inverted.
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Render one frame for `target`.
    pub fn render(&self, target: K, frame: &Frame) -> Frame {
        self.filter.apply_to_frame(frame, self.is_attached(target))
    }

    pub fn render_rgba8(&self, target: K, img: &RgbaImage) -> RgbaImage {
        self.filter.apply_to_rgba_image(img, self.is_attached(target))
    }
}
