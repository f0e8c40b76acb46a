//! Pose snapshots for the player rig and the held item
//!
//! A [`PlayerFrame`] carries optional sub-frames. An absent sub-frame means the
//! keyframe does not animate that part, so interpolation holds whatever the
//! track already had. An [`ItemFrame`] is an open map from shape-node name to
//! transform; names missing from the map are at the neutral transform.

use std::collections::BTreeMap;

use crate::element::{AnimationElement, Lerp};

/// Right arm chain and the main-hand item anchor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RightHandFrame {
    pub item_anchor: AnimationElement,
    pub lower_arm: AnimationElement,
    pub upper_arm: AnimationElement,
}

impl RightHandFrame {
    pub const ZERO: Self = Self {
        item_anchor: AnimationElement::ZERO,
        lower_arm: AnimationElement::ZERO,
        upper_arm: AnimationElement::ZERO,
    };

    pub const fn new(
        item_anchor: AnimationElement,
        lower_arm: AnimationElement,
        upper_arm: AnimationElement,
    ) -> Self {
        Self {
            item_anchor,
            lower_arm,
            upper_arm,
        }
    }
}

impl Lerp for RightHandFrame {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            item_anchor: self.item_anchor.lerp(&other.item_anchor, t),
            lower_arm: self.lower_arm.lerp(&other.lower_arm, t),
            upper_arm: self.upper_arm.lerp(&other.upper_arm, t),
        }
    }
}

/// Left arm chain and the off-hand item anchor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LeftHandFrame {
    pub item_anchor: AnimationElement,
    pub lower_arm: AnimationElement,
    pub upper_arm: AnimationElement,
}

impl LeftHandFrame {
    pub const ZERO: Self = Self {
        item_anchor: AnimationElement::ZERO,
        lower_arm: AnimationElement::ZERO,
        upper_arm: AnimationElement::ZERO,
    };

    pub const fn new(
        item_anchor: AnimationElement,
        lower_arm: AnimationElement,
        upper_arm: AnimationElement,
    ) -> Self {
        Self {
            item_anchor,
            lower_arm,
            upper_arm,
        }
    }
}

impl Lerp for LeftHandFrame {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            item_anchor: self.item_anchor.lerp(&other.item_anchor, t),
            lower_arm: self.lower_arm.lerp(&other.lower_arm, t),
            upper_arm: self.upper_arm.lerp(&other.upper_arm, t),
        }
    }
}

/// Interpolate an optional track value
///
/// A part only the target animates starts from `zero`; a part only the source
/// animates is held as-is.
fn lerp_optional<T: Lerp>(from: Option<&T>, to: Option<&T>, zero: &T, t: f32) -> Option<T> {
    match (from, to) {
        (Some(from), Some(to)) => Some(from.lerp(to, t)),
        (None, Some(to)) => Some(zero.lerp(to, t)),
        (Some(from), None) => Some(from.clone()),
        (None, None) => None,
    }
}

/// Full player pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerFrame {
    pub right_hand: Option<RightHandFrame>,
    pub left_hand: Option<LeftHandFrame>,
    pub upper_torso: Option<AnimationElement>,
    /// Transform of the detached item anchor
    pub detached_anchor_frame: Option<AnimationElement>,
    /// Whether the item anchor is detached from the hand
    pub detached_anchor: bool,
    pub switch_arms: bool,
    /// How closely the arms follow camera pitch
    pub pitch_follow: f32,
    pub fov_multiplier: f32,
    pub bobbing_amplitude: f32,
}

impl PlayerFrame {
    /// Arms track camera pitch exactly
    pub const PERFECT_PITCH_FOLLOW: f32 = 1.0;
    /// Arms lag behind camera pitch
    pub const DEFAULT_PITCH_FOLLOW: f32 = 0.8;
    /// Tolerance used when matching pitch follow against its sentinels
    pub const EPSILON: f32 = 1e-6;

    pub const ZERO: Self = Self {
        right_hand: None,
        left_hand: None,
        upper_torso: None,
        detached_anchor_frame: None,
        detached_anchor: false,
        switch_arms: false,
        pitch_follow: Self::DEFAULT_PITCH_FOLLOW,
        fov_multiplier: 1.0,
        bobbing_amplitude: 1.0,
    };

    /// Whether pitch follow is the perfect-follow sentinel
    pub fn is_perfect_pitch_follow(&self) -> bool {
        (self.pitch_follow - Self::PERFECT_PITCH_FOLLOW).abs() < Self::EPSILON
    }

    /// Interpolate from `self` toward `target`
    ///
    /// Flags are taken from `target`; scalar modifiers are interpolated.
    pub fn interpolate(&self, target: &Self, t: f32) -> Self {
        Self {
            right_hand: lerp_optional(
                self.right_hand.as_ref(),
                target.right_hand.as_ref(),
                &RightHandFrame::ZERO,
                t,
            ),
            left_hand: lerp_optional(
                self.left_hand.as_ref(),
                target.left_hand.as_ref(),
                &LeftHandFrame::ZERO,
                t,
            ),
            upper_torso: lerp_optional(
                self.upper_torso.as_ref(),
                target.upper_torso.as_ref(),
                &AnimationElement::ZERO,
                t,
            ),
            detached_anchor_frame: lerp_optional(
                self.detached_anchor_frame.as_ref(),
                target.detached_anchor_frame.as_ref(),
                &AnimationElement::ZERO,
                t,
            ),
            detached_anchor: target.detached_anchor,
            switch_arms: target.switch_arms,
            pitch_follow: self.pitch_follow.lerp(&target.pitch_follow, t),
            fov_multiplier: self.fov_multiplier.lerp(&target.fov_multiplier, t),
            bobbing_amplitude: self.bobbing_amplitude.lerp(&target.bobbing_amplitude, t),
        }
    }
}

impl Default for PlayerFrame {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Held item pose keyed by shape-node name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemFrame {
    pub elements: BTreeMap<String, AnimationElement>,
}

impl ItemFrame {
    pub fn new(elements: BTreeMap<String, AnimationElement>) -> Self {
        Self { elements }
    }

    /// Frame with no animated nodes
    pub fn empty() -> Self {
        Self::default()
    }

    /// Transform for a node, neutral if the frame does not mention it
    pub fn element(&self, name: &str) -> AnimationElement {
        self.elements
            .get(name)
            .copied()
            .unwrap_or(AnimationElement::ZERO)
    }

    /// Interpolate every node either frame mentions
    pub fn interpolate(&self, target: &Self, t: f32) -> Self {
        let mut elements = BTreeMap::new();
        for name in self.elements.keys().chain(target.elements.keys()) {
            if elements.contains_key(name) {
                continue;
            }
            let value = self.element(name).lerp(&target.element(name), t);
            elements.insert(name.clone(), value);
        }
        Self { elements }
    }
}

impl FromIterator<(String, AnimationElement)> for ItemFrame {
    fn from_iter<I: IntoIterator<Item = (String, AnimationElement)>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

/// Output of one animation tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerItemFrame {
    pub player: PlayerFrame,
    /// `None` leaves the item pose untouched
    pub item: Option<ItemFrame>,
}

impl PlayerItemFrame {
    pub const ZERO: Self = Self {
        player: PlayerFrame::ZERO,
        item: None,
    };

    pub fn new(player: PlayerFrame, item: Option<ItemFrame>) -> Self {
        Self { player, item }
    }
}
