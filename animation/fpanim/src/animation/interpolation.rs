//! Segment lookup and eased interpolation
//!
//! The player track is searched by absolute time. Its eased progress is turned
//! back into an adjusted clip time, and the item track is searched with that
//! adjusted time mapped into the item animation window. Item motion therefore
//! follows the pacing of the player easing.

use std::time::Duration;

use log::trace;

use super::Animation;
use crate::frame::{ItemFrame, PlayerFrame, PlayerItemFrame};
use crate::keyframe::{ItemKeyFrame, PlayerKeyFrame};

/// Index of the first player keyframe strictly after `time`
///
/// Returns `None` once `time` is at or past the last keyframe. A keyframe
/// exactly at `time` counts as passed.
pub fn find_next_player_key_frame(key_frames: &[PlayerKeyFrame], time: Duration) -> Option<usize> {
    let index = key_frames.partition_point(|frame| frame.time <= time);
    (index < key_frames.len()).then_some(index)
}

/// Index of the first item keyframe strictly after `progress`
///
/// Clamped to the last keyframe. Returns `None` for an empty track.
pub fn find_next_item_key_frame(key_frames: &[ItemKeyFrame], progress: f32) -> Option<usize> {
    if key_frames.is_empty() {
        return None;
    }
    let index = key_frames.partition_point(|frame| frame.duration_fraction <= progress);
    Some(index.min(key_frames.len() - 1))
}

/// Raw progress of `elapsed` through the segment `[start, end]`
///
/// A zero-length segment is complete.
pub fn segment_progress(elapsed: Duration, start: Duration, end: Duration) -> f32 {
    let span = end.saturating_sub(start);
    if span.is_zero() {
        return 1.0;
    }
    (elapsed.saturating_sub(start).as_secs_f64() / span.as_secs_f64()) as f32
}

/// Raw progress through a fraction span, complete when the span is empty
fn fraction_progress(progress: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span <= 0.0 {
        return 1.0;
    }
    (progress - start) / span
}

impl Animation {
    /// Pose for the current tick
    ///
    /// `previous` is the pose output by the last tick; the first segment
    /// starts from it. At or after the end of the clip the last keyframes are
    /// returned verbatim.
    pub fn interpolate(&self, previous: &PlayerItemFrame, elapsed: Duration) -> PlayerItemFrame {
        let Some(next) = find_next_player_key_frame(&self.player_key_frames, elapsed) else {
            return self.final_frame();
        };

        let (player, adjusted) = self.interpolate_player(&previous.player, next, elapsed);
        let item = self.interpolate_item(previous.item.as_ref(), adjusted);

        PlayerItemFrame::new(player, item)
    }

    fn final_frame(&self) -> PlayerItemFrame {
        let player = self
            .player_key_frames
            .last()
            .map_or(PlayerFrame::ZERO, |frame| frame.frame);
        let item = self.item_key_frames.last().map(|frame| frame.frame.clone());

        PlayerItemFrame::new(player, item)
    }

    /// Player pose and the eased clip time used for the item track
    fn interpolate_player(
        &self,
        previous: &PlayerFrame,
        next: usize,
        elapsed: Duration,
    ) -> (PlayerFrame, Duration) {
        let target = &self.player_key_frames[next];
        let (from, start) = match next.checked_sub(1) {
            Some(prev) => {
                let frame = &self.player_key_frames[prev];
                (&frame.frame, frame.time)
            }
            None => (previous, Duration::ZERO),
        };

        let progress = segment_progress(elapsed, start, target.time);
        let eased = target.easing.apply(progress);
        let adjusted = start + target.time.saturating_sub(start).mul_f64(f64::from(eased));

        trace!(
            "Player segment -> {next}: progress {progress:.3}, eased {eased:.3}, adjusted {} ms",
            adjusted.as_millis()
        );

        (target.interpolate(from, progress), adjusted)
    }

    /// Progress through the item animation window, clamped to `[0, 1]`
    pub fn item_window_progress(&self, elapsed: Duration) -> f32 {
        let start = self.item_animation_start;
        let span = self.item_animation_end.saturating_sub(start);
        if span.is_zero() {
            return if elapsed >= start { 1.0 } else { 0.0 };
        }

        let progress = (elapsed.as_secs_f64() - start.as_secs_f64()) / span.as_secs_f64();
        progress.clamp(0.0, 1.0) as f32
    }

    fn interpolate_item(&self, previous: Option<&ItemFrame>, elapsed: Duration) -> Option<ItemFrame> {
        let progress = self.item_window_progress(elapsed);
        let next = find_next_item_key_frame(&self.item_key_frames, progress)?;
        let target = &self.item_key_frames[next];

        let frame = match next.checked_sub(1) {
            Some(prev) => {
                let from = &self.item_key_frames[prev];
                let local = fraction_progress(
                    progress,
                    from.duration_fraction,
                    target.duration_fraction,
                );
                target.interpolate(&from.frame, local)
            }
            None => {
                let local = fraction_progress(progress, 0.0, target.duration_fraction);
                match previous {
                    Some(from) => target.interpolate(from, local),
                    None => target.interpolate(&ItemFrame::empty(), local),
                }
            }
        };

        trace!("Item segment -> {next}: window progress {progress:.3}");

        Some(frame)
    }
}
