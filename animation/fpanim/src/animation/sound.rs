//! Timed sound triggers

use std::time::Duration;

use log::trace;

use super::Animation;
use crate::keyframe::SoundFrame;

/// Receiver for sound triggers, typically the game's sound backend
pub trait SoundSink {
    fn play(&mut self, sound: &SoundFrame);
}

impl<F: FnMut(&SoundFrame)> SoundSink for F {
    fn play(&mut self, sound: &SoundFrame) {
        self(sound);
    }
}

impl Animation {
    /// Fire every sound whose trigger time lies in `(previous, current]`
    ///
    /// Calling this once per tick with contiguous windows fires each sound
    /// exactly once, independent of tick size.
    pub fn dispatch_sounds<S: SoundSink + ?Sized>(
        &self,
        previous: Duration,
        current: Duration,
        sink: &mut S,
    ) {
        let total = self.total_duration();
        for sound in &self.sound_frames {
            let Some(trigger) = sound.trigger_time(total) else {
                continue;
            };
            if trigger > previous && trigger <= current {
                trace!("Sound '{}' at {} ms", sound.code, trigger.as_millis());
                sink.play(sound);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::EasingFunction;
    use crate::frame::PlayerFrame;
    use crate::keyframe::PlayerKeyFrame;
    use pretty_assertions::assert_eq;

    fn animation(sounds: Vec<SoundFrame>) -> Animation {
        Animation::new(
            [
                PlayerKeyFrame::new(PlayerFrame::ZERO, Duration::ZERO, EasingFunction::Linear),
                PlayerKeyFrame::new(
                    PlayerFrame::ZERO,
                    Duration::from_millis(1000),
                    EasingFunction::Linear,
                ),
            ],
            Vec::new(),
            sounds,
        )
        .unwrap()
    }

    fn fired_codes(animation: &Animation, ticks: &[u64]) -> Vec<String> {
        let mut fired = Vec::new();
        let mut sink = |sound: &SoundFrame| fired.push(sound.code.clone());
        for window in ticks.windows(2) {
            animation.dispatch_sounds(
                Duration::from_millis(window[0]),
                Duration::from_millis(window[1]),
                &mut sink,
            );
        }
        fired
    }

    #[test]
    fn test_window_is_half_open() {
        let animation = animation(vec![SoundFrame::new("click", 0.5)]);

        assert_eq!(fired_codes(&animation, &[400, 500]), vec!["click"]);
        assert!(fired_codes(&animation, &[500, 600]).is_empty());
        assert!(fired_codes(&animation, &[400, 499]).is_empty());
    }

    #[test]
    fn test_each_sound_fires_once_regardless_of_tick_size() {
        let animation = animation(vec![
            SoundFrame::new("draw", 0.1),
            SoundFrame::new("creak", 0.45),
            SoundFrame::new("release", 0.9),
            SoundFrame::new("end", 1.0),
        ]);

        let coarse = fired_codes(&animation, &[0, 700, 1000]);
        let fine: Vec<u64> = (0..=100).map(|i| i * 10).collect();
        let fine = fired_codes(&animation, &fine);
        let uneven = fired_codes(&animation, &[0, 1, 100, 450, 451, 899, 900, 1000, 1016]);

        let expected = vec!["draw", "creak", "release", "end"];
        assert_eq!(coarse, expected);
        assert_eq!(fine, expected);
        assert_eq!(uneven, expected);
    }

    #[test]
    fn test_tick_ending_on_trigger_fires_it() {
        let animation = animation(vec![SoundFrame::new("draw", 0.1)]);

        assert_eq!(fired_codes(&animation, &[50, 100]), vec!["draw"]);
        assert!(fired_codes(&animation, &[100, 150]).is_empty());
    }

    #[test]
    fn test_unreachable_fraction_never_fires() {
        let animation = animation(vec![
            SoundFrame::new("far", 1e30),
            SoundFrame::new("click", 0.5),
        ]);

        let fired = fired_codes(&animation, &[0, 16, 500, 1000, u64::MAX / 2]);
        assert_eq!(fired, vec!["click"]);
    }

    #[test]
    fn test_empty_window_fires_nothing() {
        let animation = animation(vec![SoundFrame::new("click", 0.5)]);
        assert!(fired_codes(&animation, &[500, 500]).is_empty());
    }

    #[test]
    fn test_struct_sink() {
        #[derive(Default)]
        struct Recorder(Vec<(String, f32)>);

        impl SoundSink for Recorder {
            fn play(&mut self, sound: &SoundFrame) {
                self.0.push((sound.code.clone(), sound.volume));
            }
        }

        let mut sound = SoundFrame::new("bolt", 0.25);
        sound.volume = 0.4;
        let animation = animation(vec![sound]);

        let mut recorder = Recorder::default();
        animation.dispatch_sounds(Duration::ZERO, Duration::from_millis(250), &mut recorder);
        assert_eq!(recorder.0, vec![("bolt".to_string(), 0.4)]);
    }
}
