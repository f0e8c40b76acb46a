//! Consistency checks for authored clips

use std::fmt;
use std::time::Duration;

use log::debug;

use super::Animation;

/// Authoring problem that does not stop playback but likely looks wrong
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// The first player keyframe is not at time zero
    FirstKeyFrameNotAtZero { time: Duration },
    /// Two player keyframes share a timestamp, giving a zero-length segment
    DuplicatePlayerKeyFrameTime { index: usize, time: Duration },
    /// An item keyframe lies outside the item animation window
    ItemFractionOutOfRange { index: usize, fraction: f32 },
    /// A sound can never fire, or fires after the clip ends
    SoundFractionOutOfRange {
        index: usize,
        code: String,
        fraction: f32,
    },
    /// A track was edited out of order and needs [`Animation::sort_frames`]
    UnsortedTrack { track: &'static str },
    /// The item animation window is not inside the clip
    ItemWindowOutOfRange { start: Duration, end: Duration },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstKeyFrameNotAtZero { time } => write!(
                f,
                "first player keyframe is at {} ms instead of 0 ms",
                time.as_millis()
            ),
            Self::DuplicatePlayerKeyFrameTime { index, time } => write!(
                f,
                "player keyframe {index} repeats time {} ms",
                time.as_millis()
            ),
            Self::ItemFractionOutOfRange { index, fraction } => {
                write!(f, "item keyframe {index} has fraction {fraction} outside [0, 1]")
            }
            Self::SoundFractionOutOfRange {
                index,
                code,
                fraction,
            } => write!(
                f,
                "sound {index} ('{code}') has fraction {fraction} outside (0, 1] and will not play as authored"
            ),
            Self::UnsortedTrack { track } => write!(f, "{track} track is not sorted"),
            Self::ItemWindowOutOfRange { start, end } => write!(
                f,
                "item animation window {}..{} ms is not inside the clip",
                start.as_millis(),
                end.as_millis()
            ),
        }
    }
}

impl Animation {
    /// Report authoring problems, in track order
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if let Some(first) = self.player_key_frames.first()
            && first.time != Duration::ZERO
        {
            issues.push(ValidationIssue::FirstKeyFrameNotAtZero { time: first.time });
        }

        if !self.player_key_frames.is_sorted_by_key(|frame| frame.time) {
            issues.push(ValidationIssue::UnsortedTrack { track: "player" });
        }
        for (index, pair) in self.player_key_frames.windows(2).enumerate() {
            if pair[0].time == pair[1].time {
                issues.push(ValidationIssue::DuplicatePlayerKeyFrameTime {
                    index: index + 1,
                    time: pair[1].time,
                });
            }
        }

        if !self
            .item_key_frames
            .is_sorted_by(|a, b| a.duration_fraction <= b.duration_fraction)
        {
            issues.push(ValidationIssue::UnsortedTrack { track: "item" });
        }
        for (index, frame) in self.item_key_frames.iter().enumerate() {
            if !(0.0..=1.0).contains(&frame.duration_fraction) {
                issues.push(ValidationIssue::ItemFractionOutOfRange {
                    index,
                    fraction: frame.duration_fraction,
                });
            }
        }

        if !self
            .sound_frames
            .is_sorted_by(|a, b| a.duration_fraction <= b.duration_fraction)
        {
            issues.push(ValidationIssue::UnsortedTrack { track: "sound" });
        }
        for (index, sound) in self.sound_frames.iter().enumerate() {
            // Trigger windows are half-open, so a sound at 0 is never reached
            if !(sound.duration_fraction > 0.0 && sound.duration_fraction <= 1.0) {
                issues.push(ValidationIssue::SoundFractionOutOfRange {
                    index,
                    code: sound.code.clone(),
                    fraction: sound.duration_fraction,
                });
            }
        }

        if self.item_animation_start > self.item_animation_end
            || self.item_animation_end > self.total_duration()
        {
            issues.push(ValidationIssue::ItemWindowOutOfRange {
                start: self.item_animation_start,
                end: self.item_animation_end,
            });
        }

        debug!("Validation found {} issue(s)", issues.len());
        issues
    }
}
