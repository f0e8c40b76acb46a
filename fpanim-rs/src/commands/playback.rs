//! Sample and sounds command implementations

use anyhow::Result;
use console::style;
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;

use fpanim::document::player_frame_elements;
use fpanim::{Animation, PlayerItemFrame, SoundFrame};

use crate::utils::{add_table_row, create_table, format_element, format_millis, load_animation};

/// Pose at `elapsed`, interpolated from the neutral pose
fn sample(animation: &Animation, elapsed: Duration) -> PlayerItemFrame {
    animation.interpolate(&PlayerItemFrame::ZERO, elapsed)
}

fn pose_to_json(elapsed: Duration, finished: bool, pose: &PlayerItemFrame) -> Value {
    let player = &pose.player;
    json!({
        "timeMs": elapsed.as_millis() as u64,
        "finished": finished,
        "player": {
            "elements": player_frame_elements(player),
            "detachedAnchor": player.detached_anchor,
            "switchArms": player.switch_arms,
            "pitchFollow": player.pitch_follow,
            "fovMultiplier": player.fov_multiplier,
            "bobbingAmplitude": player.bobbing_amplitude,
        },
        "item": pose.item.as_ref().map(|item| &item.elements),
    })
}

pub fn execute_sample(path: &Path, times: &[u64], json: bool) -> Result<()> {
    let animation = load_animation(path)?;

    if json {
        let samples: Vec<Value> = times
            .iter()
            .map(|&ms| {
                let elapsed = Duration::from_millis(ms);
                pose_to_json(
                    elapsed,
                    animation.is_finished(elapsed),
                    &sample(&animation, elapsed),
                )
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    for &ms in times {
        let elapsed = Duration::from_millis(ms);
        let pose = sample(&animation, elapsed);
        let player = &pose.player;

        let status = if animation.is_finished(elapsed) {
            style(" (finished)").dim().to_string()
        } else {
            String::new()
        };
        println!("\n{}{}", style(format!("Pose at {}", format_millis(elapsed))).bold(), status);
        println!(
            "FOV: {:.3}  Bobbing: {:.3}  Pitch Follow: {:.3}  Detached: {}  Switch Arms: {}",
            player.fov_multiplier,
            player.bobbing_amplitude,
            player.pitch_follow,
            player.detached_anchor,
            player.switch_arms
        );

        let mut table = create_table(&["Track", "Element", "Transform"]);
        let mut rows = 0;
        for (name, element) in player_frame_elements(player) {
            rows += 1;
            add_table_row(
                &mut table,
                vec!["player".to_string(), name, format_element(&element)],
            );
        }
        if let Some(item) = &pose.item {
            for (name, element) in &item.elements {
                rows += 1;
                add_table_row(
                    &mut table,
                    vec!["item".to_string(), name.clone(), format_element(element)],
                );
            }
        }

        if rows == 0 {
            println!("{}", style("No animated elements").dim());
        } else {
            table.printstd();
        }
    }

    Ok(())
}

/// Play through the clip at a fixed tick, collecting `(tick, sound)` pairs
fn simulate_sounds(animation: &Animation, step: Duration) -> Vec<(Duration, SoundFrame)> {
    let mut fired = Vec::new();
    let mut previous = Duration::ZERO;

    while !animation.is_finished(previous) {
        let current = previous + step;
        animation.dispatch_sounds(previous, current, &mut |sound: &SoundFrame| {
            fired.push((current, sound.clone()));
        });
        previous = current;
    }

    fired
}

pub fn execute_sounds(path: &Path, step_ms: u64) -> Result<()> {
    let animation = load_animation(path)?;
    let step = Duration::from_millis(step_ms.max(1));
    let fired = simulate_sounds(&animation, step);

    println!(
        "Simulated {} at {} ticks: {} sound(s) fired",
        style(format_millis(animation.total_duration())).yellow(),
        format_millis(step),
        style(fired.len()).green()
    );

    if !fired.is_empty() {
        let mut table = create_table(&["Tick", "Trigger", "Code", "Volume", "Range"]);
        for (tick, sound) in &fired {
            add_table_row(
                &mut table,
                vec![
                    format_millis(*tick),
                    sound
                        .trigger_time(animation.total_duration())
                        .map_or_else(|| "never".to_string(), format_millis),
                    sound.code.clone(),
                    format!("{:.2}", sound.volume),
                    format!("{:.0}", sound.range),
                ],
            );
        }
        table.printstd();
    }

    let skipped = animation.sound_frames().len().saturating_sub(fired.len());
    if skipped > 0 {
        log::warn!("{skipped} sound(s) never fired; run `validate` for details");
    }

    Ok(())
}
