//! JSON document format for animation clips
//!
//! The document mirrors [`Animation`] field for field. Field names are
//! camelCase; PascalCase names are accepted on load. Times are whole
//! milliseconds, and easing curves are stored by name.
//!
//! ```json
//! {
//!   "hold": false,
//!   "itemAnimationStart": 0,
//!   "itemAnimationEnd": 300,
//!   "playerKeyFrames": [
//!     { "easingTime": 300, "easingFunction": "Cubic",
//!       "elements": { "UpperTorso": [0, 0, 0, 0, 15, 0] } }
//!   ],
//!   "itemKeyFrames": [],
//!   "soundFrames": []
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::animation::Animation;
use crate::easing::EasingFunction;
use crate::element::AnimationElement;
use crate::error::{AnimationError, Result};
use crate::frame::{ItemFrame, LeftHandFrame, PlayerFrame, RightHandFrame};
use crate::keyframe::{ItemKeyFrame, PlayerKeyFrame, SoundFrame};

/// Element names used by player keyframes
pub mod element_names {
    pub const ITEM_ANCHOR: &str = "ItemAnchor";
    pub const LOWER_ARM_R: &str = "LowerArmR";
    pub const UPPER_ARM_R: &str = "UpperArmR";
    pub const ITEM_ANCHOR_L: &str = "ItemAnchorL";
    pub const LOWER_ARM_L: &str = "LowerArmL";
    pub const UPPER_ARM_L: &str = "UpperArmL";
    pub const UPPER_TORSO: &str = "UpperTorso";
    pub const DETACHED_ANCHOR: &str = "DetachedAnchor";
}

use element_names::{
    DETACHED_ANCHOR, ITEM_ANCHOR, ITEM_ANCHOR_L, LOWER_ARM_L, LOWER_ARM_R, UPPER_ARM_L,
    UPPER_ARM_R, UPPER_TORSO,
};

fn default_easing() -> String {
    EasingFunction::Linear.name().to_string()
}

const fn default_one() -> f32 {
    1.0
}

fn millis_from_f64<E: de::Error>(value: f64) -> std::result::Result<u64, E> {
    if !value.is_finite() || value < 0.0 {
        return Err(E::custom(format!(
            "expected a non-negative number of milliseconds, got {value}"
        )));
    }
    Ok(value.round() as u64)
}

/// Accepts integer or fractional milliseconds
fn deserialize_millis<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    millis_from_f64(f64::deserialize(deserializer)?)
}

fn deserialize_optional_millis<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u64>, D::Error> {
    Option::<f64>::deserialize(deserializer)?
        .map(millis_from_f64)
        .transpose()
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Named elements of every animated part of a player pose
pub fn player_frame_elements(frame: &PlayerFrame) -> BTreeMap<String, AnimationElement> {
    let mut elements = BTreeMap::new();

    if let Some(hand) = &frame.right_hand {
        elements.insert(ITEM_ANCHOR.to_string(), hand.item_anchor);
        elements.insert(LOWER_ARM_R.to_string(), hand.lower_arm);
        elements.insert(UPPER_ARM_R.to_string(), hand.upper_arm);
    }
    if let Some(hand) = &frame.left_hand {
        elements.insert(ITEM_ANCHOR_L.to_string(), hand.item_anchor);
        elements.insert(LOWER_ARM_L.to_string(), hand.lower_arm);
        elements.insert(UPPER_ARM_L.to_string(), hand.upper_arm);
    }
    if let Some(torso) = frame.upper_torso {
        elements.insert(UPPER_TORSO.to_string(), torso);
    }
    if let Some(anchor) = frame.detached_anchor_frame {
        elements.insert(DETACHED_ANCHOR.to_string(), anchor);
    }

    elements
}

/// Serialized form of a player keyframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerKeyFrameDocument {
    /// Keyframe time in milliseconds since clip start
    #[serde(alias = "EasingTime", deserialize_with = "deserialize_millis")]
    pub easing_time: u64,
    #[serde(default = "default_easing", alias = "EasingFunction")]
    pub easing_function: String,
    #[serde(default, alias = "DetachedAnchor")]
    pub detached_anchor: bool,
    #[serde(default, alias = "SwitchArms")]
    pub switch_arms: bool,
    /// `true` selects perfect pitch follow, `false` the default lag
    #[serde(default, alias = "PitchFollow")]
    pub pitch_follow: bool,
    #[serde(
        default = "default_one",
        alias = "FovMultiplier",
        alias = "FOVMultiplier"
    )]
    pub fov_multiplier: f32,
    #[serde(default = "default_one", alias = "BobbingAmplitude")]
    pub bobbing_amplitude: f32,
    #[serde(default, alias = "Elements")]
    pub elements: BTreeMap<String, AnimationElement>,
}

impl PlayerKeyFrameDocument {
    pub fn from_key_frame(key_frame: &PlayerKeyFrame) -> Self {
        let frame = &key_frame.frame;
        let elements = player_frame_elements(frame);

        Self {
            easing_time: duration_millis(key_frame.time),
            easing_function: key_frame.easing.name().to_string(),
            detached_anchor: frame.detached_anchor,
            switch_arms: frame.switch_arms,
            pitch_follow: frame.is_perfect_pitch_follow(),
            fov_multiplier: frame.fov_multiplier,
            bobbing_amplitude: frame.bobbing_amplitude,
            elements,
        }
    }

    /// Resolve the easing name and element map into a keyframe
    ///
    /// A hand is animated if any of its three elements is named; the others
    /// fall back to the neutral transform.
    pub fn to_key_frame(&self) -> Result<PlayerKeyFrame> {
        let easing: EasingFunction = self.easing_function.parse()?;
        let get = |name: &str| self.elements.get(name).copied();
        let any = |names: [&str; 3]| names.iter().any(|name| self.elements.contains_key(*name));
        let or_zero = |name: &str| get(name).unwrap_or(AnimationElement::ZERO);

        let right_hand = any([ITEM_ANCHOR, LOWER_ARM_R, UPPER_ARM_R]).then(|| {
            RightHandFrame::new(or_zero(ITEM_ANCHOR), or_zero(LOWER_ARM_R), or_zero(UPPER_ARM_R))
        });
        let left_hand = any([ITEM_ANCHOR_L, LOWER_ARM_L, UPPER_ARM_L]).then(|| {
            LeftHandFrame::new(
                or_zero(ITEM_ANCHOR_L),
                or_zero(LOWER_ARM_L),
                or_zero(UPPER_ARM_L),
            )
        });

        let frame = PlayerFrame {
            right_hand,
            left_hand,
            upper_torso: get(UPPER_TORSO),
            detached_anchor_frame: get(DETACHED_ANCHOR),
            detached_anchor: self.detached_anchor,
            switch_arms: self.switch_arms,
            pitch_follow: if self.pitch_follow {
                PlayerFrame::PERFECT_PITCH_FOLLOW
            } else {
                PlayerFrame::DEFAULT_PITCH_FOLLOW
            },
            fov_multiplier: self.fov_multiplier,
            bobbing_amplitude: self.bobbing_amplitude,
        };

        Ok(PlayerKeyFrame::new(
            frame,
            Duration::from_millis(self.easing_time),
            easing,
        ))
    }
}

/// Serialized form of an item keyframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemKeyFrameDocument {
    #[serde(alias = "DurationFraction")]
    pub duration_fraction: f32,
    #[serde(default = "default_easing", alias = "EasingFunction")]
    pub easing_function: String,
    #[serde(default, alias = "Elements")]
    pub elements: BTreeMap<String, AnimationElement>,
}

impl ItemKeyFrameDocument {
    pub fn from_key_frame(key_frame: &ItemKeyFrame) -> Self {
        Self {
            duration_fraction: key_frame.duration_fraction,
            easing_function: key_frame.easing.name().to_string(),
            elements: key_frame.frame.elements.clone(),
        }
    }

    pub fn to_key_frame(&self) -> Result<ItemKeyFrame> {
        Ok(ItemKeyFrame::new(
            ItemFrame::new(self.elements.clone()),
            self.duration_fraction,
            self.easing_function.parse()?,
        ))
    }
}

/// Serialized form of an [`Animation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDocument {
    #[serde(default, alias = "Hold")]
    pub hold: bool,
    #[serde(
        default,
        alias = "ItemAnimationStart",
        deserialize_with = "deserialize_millis"
    )]
    pub item_animation_start: u64,
    /// Defaults to the clip's total duration
    #[serde(
        default,
        alias = "ItemAnimationEnd",
        deserialize_with = "deserialize_optional_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_animation_end: Option<u64>,
    #[serde(alias = "PlayerKeyFrames")]
    pub player_key_frames: Vec<PlayerKeyFrameDocument>,
    #[serde(default, alias = "ItemKeyFrames")]
    pub item_key_frames: Vec<ItemKeyFrameDocument>,
    #[serde(default, alias = "SoundFrames")]
    pub sound_frames: Vec<SoundFrame>,
}

impl AnimationDocument {
    pub fn from_animation(animation: &Animation) -> Self {
        Self {
            hold: animation.hold(),
            item_animation_start: duration_millis(animation.item_animation_start()),
            item_animation_end: Some(duration_millis(animation.item_animation_end())),
            player_key_frames: animation
                .player_key_frames()
                .iter()
                .map(PlayerKeyFrameDocument::from_key_frame)
                .collect(),
            item_key_frames: animation
                .item_key_frames()
                .iter()
                .map(ItemKeyFrameDocument::from_key_frame)
                .collect(),
            sound_frames: animation.sound_frames().to_vec(),
        }
    }

    /// Build the live animation
    ///
    /// Fails on the first unknown easing name or on an empty player track.
    /// An item window reaching past the clip is clamped with a warning.
    pub fn to_animation(&self) -> Result<Animation> {
        let player = self
            .player_key_frames
            .iter()
            .map(PlayerKeyFrameDocument::to_key_frame)
            .collect::<Result<Vec<_>>>()?;
        let item = self
            .item_key_frames
            .iter()
            .map(ItemKeyFrameDocument::to_key_frame)
            .collect::<Result<Vec<_>>>()?;

        let mut animation = Animation::new(player, item, self.sound_frames.iter().cloned())?;
        animation.set_hold(self.hold);

        let start = Duration::from_millis(self.item_animation_start);
        let end = self
            .item_animation_end
            .map_or_else(|| animation.total_duration(), Duration::from_millis);
        animation.set_item_animation_window(start, end);
        if animation.item_animation_start() != start || animation.item_animation_end() != end {
            warn!(
                "Item animation window {}..{} ms clamped to {}..{} ms",
                start.as_millis(),
                end.as_millis(),
                animation.item_animation_start().as_millis(),
                animation.item_animation_end().as_millis()
            );
        }

        Ok(animation)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading animation document from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Saving animation document to {}", path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl From<&Animation> for AnimationDocument {
    fn from(animation: &Animation) -> Self {
        Self::from_animation(animation)
    }
}

impl TryFrom<&AnimationDocument> for Animation {
    type Error = AnimationError;

    fn try_from(document: &AnimationDocument) -> Result<Self> {
        document.to_animation()
    }
}

impl TryFrom<AnimationDocument> for Animation {
    type Error = AnimationError;

    fn try_from(document: AnimationDocument) -> Result<Self> {
        document.to_animation()
    }
}
