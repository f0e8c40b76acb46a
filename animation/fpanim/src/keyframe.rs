//! Keyframes for the player, item, and sound tracks

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::frame::{ItemFrame, PlayerFrame};

/// Player pose anchored at a time since clip start
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerKeyFrame {
    pub frame: PlayerFrame,
    pub time: Duration,
    /// Curve for the transition into this keyframe
    pub easing: EasingFunction,
}

impl PlayerKeyFrame {
    pub const ZERO: Self = Self {
        frame: PlayerFrame::ZERO,
        time: Duration::ZERO,
        easing: EasingFunction::Linear,
    };

    pub fn new(frame: PlayerFrame, time: Duration, easing: EasingFunction) -> Self {
        Self {
            frame,
            time,
            easing,
        }
    }

    /// Pose at raw segment progress between `previous` and this keyframe
    pub fn interpolate(&self, previous: &PlayerFrame, progress: f32) -> PlayerFrame {
        previous.interpolate(&self.frame, self.easing.apply(progress))
    }
}

/// Item pose anchored at a fraction of the item animation window
#[derive(Debug, Clone, PartialEq)]
pub struct ItemKeyFrame {
    pub frame: ItemFrame,
    pub duration_fraction: f32,
    /// Curve for the transition into this keyframe
    pub easing: EasingFunction,
}

impl ItemKeyFrame {
    pub fn new(frame: ItemFrame, duration_fraction: f32, easing: EasingFunction) -> Self {
        Self {
            frame,
            duration_fraction,
            easing,
        }
    }

    /// Pose at raw segment progress between `previous` and this keyframe
    pub fn interpolate(&self, previous: &ItemFrame, progress: f32) -> ItemFrame {
        previous.interpolate(&self.frame, self.easing.apply(progress))
    }
}

const fn default_true() -> bool {
    true
}

const fn default_range() -> f32 {
    SoundFrame::DEFAULT_RANGE
}

const fn default_volume() -> f32 {
    1.0
}

/// Sound trigger at a fraction of the total clip duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundFrame {
    /// Sound asset identifier
    #[serde(alias = "Code")]
    pub code: String,
    #[serde(alias = "DurationFraction")]
    pub duration_fraction: f32,
    #[serde(default = "default_true", alias = "RandomizePitch")]
    pub randomize_pitch: bool,
    /// Audible range in blocks
    #[serde(default = "default_range", alias = "Range")]
    pub range: f32,
    #[serde(default = "default_volume", alias = "Volume")]
    pub volume: f32,
    /// Whether the sound is replicated to other players
    #[serde(default = "default_true", alias = "Synchronize")]
    pub synchronize: bool,
}

impl SoundFrame {
    pub const DEFAULT_RANGE: f32 = 32.0;

    /// Sound with default pitch, range, volume, and synchronization
    pub fn new(code: impl Into<String>, duration_fraction: f32) -> Self {
        Self {
            code: code.into(),
            duration_fraction,
            randomize_pitch: true,
            range: Self::DEFAULT_RANGE,
            volume: 1.0,
            synchronize: true,
        }
    }

    /// Trigger point in clip time, rounded to whole microseconds
    ///
    /// `None` when the fraction is not finite or the point does not fit in a
    /// `Duration`; such a sound never fires.
    pub fn trigger_time(&self, total_duration: Duration) -> Option<Duration> {
        let fraction = f64::from(self.duration_fraction.max(0.0));
        let micros = (fraction * total_duration.as_secs_f64() * 1e6).round();
        if !micros.is_finite() || micros >= u64::MAX as f64 {
            return None;
        }
        Some(Duration::from_micros(micros as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::AnimationElement;
    use crate::frame::RightHandFrame;

    #[test]
    fn test_player_key_frame_applies_its_easing() {
        let target = PlayerFrame {
            upper_torso: Some(AnimationElement::new(8.0, 0.0, 0.0, 0.0, 0.0, 0.0)),
            ..PlayerFrame::ZERO
        };
        let key = PlayerKeyFrame::new(target, Duration::from_millis(100), EasingFunction::Quadratic);

        let frame = key.interpolate(&PlayerFrame::ZERO, 0.5);
        assert_eq!(frame.upper_torso.map(|e| e.offset_x), Some(2.0));
    }

    #[test]
    fn test_player_key_frame_full_progress_reaches_target() {
        let target = PlayerFrame {
            right_hand: Some(RightHandFrame::new(
                AnimationElement::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
                AnimationElement::ZERO,
                AnimationElement::ZERO,
            )),
            ..PlayerFrame::ZERO
        };
        let key = PlayerKeyFrame::new(target, Duration::from_millis(100), EasingFunction::Bounce);

        let frame = key.interpolate(&PlayerFrame::ZERO, 1.0);
        assert_eq!(frame.right_hand, target.right_hand);
    }

    #[test]
    fn test_item_key_frame_applies_its_easing() {
        let target: ItemFrame = [(
            "Barrel".to_string(),
            AnimationElement::new(0.0, 0.0, 0.0, 0.0, 0.0, 40.0),
        )]
        .into_iter()
        .collect();
        let key = ItemKeyFrame::new(target, 0.5, EasingFunction::EaseOutQuadratic);

        let frame = key.interpolate(&ItemFrame::empty(), 0.5);
        assert_eq!(frame.element("Barrel").rotation_z, 30.0);
    }

    #[test]
    fn test_sound_frame_defaults() {
        let sound = SoundFrame::new("game:sounds/bow-draw", 0.25);
        assert!(sound.randomize_pitch);
        assert!(sound.synchronize);
        assert_eq!(sound.range, 32.0);
        assert_eq!(sound.volume, 1.0);
    }

    #[test]
    fn test_sound_frame_trigger_time() {
        let sound = SoundFrame::new("click", 0.25);
        assert_eq!(
            sound.trigger_time(Duration::from_millis(800)),
            Some(Duration::from_millis(200))
        );
    }

    #[test]
    fn test_sound_frame_trigger_time_rounds_to_micros() {
        // 0.1 widens to 0.10000000149 in f64
        let sound = SoundFrame::new("click", 0.1);
        assert_eq!(
            sound.trigger_time(Duration::from_millis(1000)),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn test_sound_frame_trigger_time_out_of_range() {
        let total = Duration::from_millis(1000);
        assert_eq!(SoundFrame::new("far", 1e30).trigger_time(total), None);
        assert_eq!(SoundFrame::new("inf", f32::INFINITY).trigger_time(total), None);
        assert_eq!(
            SoundFrame::new("early", -0.5).trigger_time(total),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_sound_frame_json_fills_defaults() {
        let sound: SoundFrame =
            serde_json::from_str(r#"{ "code": "swing", "durationFraction": 0.5 }"#).unwrap();
        assert_eq!(sound, SoundFrame::new("swing", 0.5));
    }
}
