//! Animation clips for the first-person player rig and held item
//!
//! An [`Animation`] owns three independently ordered tracks:
//! - player keyframes, indexed by time since clip start
//! - item keyframes, indexed by fraction of the item animation window
//! - sound triggers, indexed by fraction of the whole clip
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use fpanim::{Animation, EasingFunction, PlayerFrame, PlayerItemFrame, PlayerKeyFrame};
//!
//! let animation = Animation::from_player_frames([
//!     PlayerKeyFrame::new(PlayerFrame::ZERO, Duration::ZERO, EasingFunction::Linear),
//!     PlayerKeyFrame::new(PlayerFrame::ZERO, Duration::from_millis(300), EasingFunction::Cubic),
//! ])?;
//!
//! let mut pose = PlayerItemFrame::ZERO;
//! let mut elapsed = Duration::ZERO;
//! while !animation.is_finished(elapsed) {
//!     elapsed += Duration::from_millis(16);
//!     pose = animation.interpolate(&pose, elapsed);
//! }
//! # Ok::<(), fpanim::AnimationError>(())
//! ```

mod interpolation;
mod sound;
mod validation;

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::document::AnimationDocument;
use crate::error::{AnimationError, Result};
use crate::frame::PlayerItemFrame;
use crate::keyframe::{ItemKeyFrame, PlayerKeyFrame, SoundFrame};

pub use interpolation::{find_next_item_key_frame, find_next_player_key_frame, segment_progress};
pub use sound::SoundSink;
pub use validation::ValidationIssue;

/// Keyframed first-person animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Never empty, sorted by time
    player_key_frames: Vec<PlayerKeyFrame>,
    /// Sorted by duration fraction
    item_key_frames: Vec<ItemKeyFrame>,
    /// Sorted by duration fraction
    sound_frames: Vec<SoundFrame>,
    item_animation_start: Duration,
    item_animation_end: Duration,
    /// Keep the last pose after the clip ends
    hold: bool,
}

impl Animation {
    /// Create an animation from all three tracks
    ///
    /// Each track is sorted. The item animation window spans the whole clip.
    pub fn new(
        player_key_frames: impl IntoIterator<Item = PlayerKeyFrame>,
        item_key_frames: impl IntoIterator<Item = ItemKeyFrame>,
        sound_frames: impl IntoIterator<Item = SoundFrame>,
    ) -> Result<Self> {
        let player_key_frames: Vec<_> = player_key_frames.into_iter().collect();
        if player_key_frames.is_empty() {
            return Err(AnimationError::NoPlayerKeyFrames);
        }

        let mut animation = Self {
            player_key_frames,
            item_key_frames: item_key_frames.into_iter().collect(),
            sound_frames: sound_frames.into_iter().collect(),
            item_animation_start: Duration::ZERO,
            item_animation_end: Duration::ZERO,
            hold: false,
        };

        if !animation.is_sorted() {
            warn!("Animation keyframes were not in order; sorting");
        }
        animation.sort_frames();
        animation.item_animation_end = animation.total_duration();

        debug!(
            "Created animation: {} player, {} item, {} sound frames, {} ms",
            animation.player_key_frames.len(),
            animation.item_key_frames.len(),
            animation.sound_frames.len(),
            animation.total_duration().as_millis()
        );

        Ok(animation)
    }

    /// Create a player-only animation
    pub fn from_player_frames(
        player_key_frames: impl IntoIterator<Item = PlayerKeyFrame>,
    ) -> Result<Self> {
        Self::new(player_key_frames, Vec::new(), Vec::new())
    }

    /// Create an animation with player and item tracks but no sounds
    pub fn with_item_frames(
        player_key_frames: impl IntoIterator<Item = PlayerKeyFrame>,
        item_key_frames: impl IntoIterator<Item = ItemKeyFrame>,
    ) -> Result<Self> {
        Self::new(player_key_frames, item_key_frames, Vec::new())
    }

    /// Idle clip: a single neutral keyframe at time zero
    pub fn zero() -> Self {
        Self {
            player_key_frames: vec![PlayerKeyFrame::ZERO],
            item_key_frames: Vec::new(),
            sound_frames: Vec::new(),
            item_animation_start: Duration::ZERO,
            item_animation_end: Duration::ZERO,
            hold: false,
        }
    }

    /// Time of the last player keyframe
    pub fn total_duration(&self) -> Duration {
        self.player_key_frames
            .last()
            .map_or(Duration::ZERO, |frame| frame.time)
    }

    /// Whether `elapsed` is at or past the end of the clip
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total_duration()
    }

    pub fn player_key_frames(&self) -> &[PlayerKeyFrame] {
        &self.player_key_frames
    }

    pub fn item_key_frames(&self) -> &[ItemKeyFrame] {
        &self.item_key_frames
    }

    pub fn sound_frames(&self) -> &[SoundFrame] {
        &self.sound_frames
    }

    pub fn item_animation_start(&self) -> Duration {
        self.item_animation_start
    }

    pub fn item_animation_end(&self) -> Duration {
        self.item_animation_end
    }

    pub fn hold(&self) -> bool {
        self.hold
    }

    pub fn set_hold(&mut self, hold: bool) {
        self.hold = hold;
    }

    /// Builder form of [`Animation::set_hold`]
    pub fn with_hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    /// Set the item animation window, clamped into the clip
    pub fn set_item_animation_window(&mut self, start: Duration, end: Duration) {
        self.item_animation_start = start;
        self.item_animation_end = end;
        self.clamp_item_window();
    }

    /// Restore `start <= end <= total_duration`
    ///
    /// Returns `true` if either bound moved. Call after editing keyframes
    /// through the mutable accessors.
    pub fn clamp_item_window(&mut self) -> bool {
        let total = self.total_duration();
        let (start, end) = (self.item_animation_start, self.item_animation_end);

        self.item_animation_end = self.item_animation_end.min(total);
        self.item_animation_start = self.item_animation_start.min(self.item_animation_end);

        start != self.item_animation_start || end != self.item_animation_end
    }

    /// Mutable player keyframes
    ///
    /// The slice cannot change length, so the clip always keeps at least one
    /// keyframe. Use [`Animation::insert_player_key_frame`] and
    /// [`Animation::remove_player_key_frame`] to change the count.
    pub fn player_key_frames_mut(&mut self) -> &mut [PlayerKeyFrame] {
        &mut self.player_key_frames
    }

    pub fn item_key_frames_mut(&mut self) -> &mut Vec<ItemKeyFrame> {
        &mut self.item_key_frames
    }

    pub fn sound_frames_mut(&mut self) -> &mut Vec<SoundFrame> {
        &mut self.sound_frames
    }

    /// Insert a player keyframe before `index`
    ///
    /// The keyframe's time must lie between its neighbours. The item window
    /// is re-clamped afterwards.
    pub fn insert_player_key_frame(&mut self, index: usize, frame: PlayerKeyFrame) -> Result<()> {
        let len = self.player_key_frames.len();
        if index > len {
            return Err(AnimationError::KeyFrameIndex { index, len });
        }

        let after_previous = index
            .checked_sub(1)
            .is_none_or(|prev| self.player_key_frames[prev].time <= frame.time);
        let before_next = self
            .player_key_frames
            .get(index)
            .is_none_or(|next| frame.time <= next.time);
        if !(after_previous && before_next) {
            return Err(AnimationError::KeyFrameOrder {
                index,
                time: frame.time,
            });
        }

        self.player_key_frames.insert(index, frame);
        self.clamp_item_window();
        Ok(())
    }

    /// Remove a player keyframe, refusing to remove the last one
    pub fn remove_player_key_frame(&mut self, index: usize) -> Result<PlayerKeyFrame> {
        let len = self.player_key_frames.len();
        if index >= len {
            return Err(AnimationError::KeyFrameIndex { index, len });
        }
        if len == 1 {
            return Err(AnimationError::NoPlayerKeyFrames);
        }
        let removed = self.player_key_frames.remove(index);
        self.clamp_item_window();
        Ok(removed)
    }

    /// Re-sort the player, item, and sound tracks
    pub fn sort_frames(&mut self) {
        self.player_key_frames.sort_by_key(|frame| frame.time);
        self.item_key_frames
            .sort_by(|a, b| a.duration_fraction.total_cmp(&b.duration_fraction));
        self.sound_frames
            .sort_by(|a, b| a.duration_fraction.total_cmp(&b.duration_fraction));
    }

    fn is_sorted(&self) -> bool {
        self.player_key_frames.is_sorted_by_key(|frame| frame.time)
            && self
                .item_key_frames
                .is_sorted_by(|a, b| a.duration_fraction <= b.duration_fraction)
            && self
                .sound_frames
                .is_sorted_by(|a, b| a.duration_fraction <= b.duration_fraction)
    }

    /// Pose shown just before player keyframe `index` is reached
    pub fn still_player_frame(&self, index: usize) -> Result<PlayerItemFrame> {
        let frame = self
            .player_key_frames
            .get(index)
            .ok_or(AnimationError::KeyFrameIndex {
                index,
                len: self.player_key_frames.len(),
            })?;
        let timestamp = frame.time.saturating_sub(Duration::from_millis(1));

        Ok(self.interpolate(&PlayerItemFrame::ZERO, timestamp))
    }

    /// Pose at the clip fraction of item keyframe `index`
    pub fn still_item_frame(&self, index: usize) -> Result<PlayerItemFrame> {
        let frame = self
            .item_key_frames
            .get(index)
            .ok_or(AnimationError::KeyFrameIndex {
                index,
                len: self.item_key_frames.len(),
            })?;

        Ok(self.still_frame(frame.duration_fraction))
    }

    /// Pose at a fraction of the whole clip, starting from the neutral pose
    ///
    /// `progress` is clamped to `[0, 1]`; NaN reads as 0.
    pub fn still_frame(&self, progress: f32) -> PlayerItemFrame {
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        let elapsed = self.total_duration().mul_f64(f64::from(progress));
        self.interpolate(&PlayerItemFrame::ZERO, elapsed)
    }

    /// Load an animation from a JSON document on disk
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        AnimationDocument::from_path(path)?.to_animation()
    }

    /// Save this animation as a pretty-printed JSON document
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        AnimationDocument::from_animation(self).to_path(path)
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = AnimationDocument::from_animation(self)
            .to_json_string_pretty()
            .map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
