//! Info and validate command implementations

use anyhow::Result;
use console::style;
use std::path::Path;

use fpanim::{Animation, PlayerFrame};

use crate::utils::{add_table_row, create_table, format_millis, format_percentage, load_animation};

/// Short labels for the parts a player keyframe animates
fn animated_parts(frame: &PlayerFrame) -> String {
    let parts: Vec<&str> = [
        (frame.right_hand.is_some(), "right hand"),
        (frame.left_hand.is_some(), "left hand"),
        (frame.upper_torso.is_some(), "torso"),
        (frame.detached_anchor_frame.is_some(), "anchor"),
    ]
    .into_iter()
    .filter_map(|(present, label)| present.then_some(label))
    .collect();

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

fn flags(frame: &PlayerFrame) -> String {
    let mut flags = Vec::new();
    if frame.detached_anchor {
        flags.push("detached");
    }
    if frame.switch_arms {
        flags.push("switch arms");
    }
    if frame.is_perfect_pitch_follow() {
        flags.push("pitch follow");
    }
    if flags.is_empty() {
        "-".to_string()
    } else {
        flags.join(", ")
    }
}

pub fn execute_info(path: &Path, detailed: bool) -> Result<()> {
    let animation = load_animation(path)?;

    println!("\n{}", style("Animation Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Duration: {}",
        style(format_millis(animation.total_duration())).yellow()
    );
    println!(
        "Player Keyframes: {}",
        style(animation.player_key_frames().len()).green()
    );
    println!(
        "Item Keyframes: {}",
        style(animation.item_key_frames().len()).green()
    );
    println!("Sounds: {}", style(animation.sound_frames().len()).green());
    println!(
        "Item Window: {} - {}",
        format_millis(animation.item_animation_start()),
        format_millis(animation.item_animation_end())
    );
    println!("Hold: {}", if animation.hold() { "yes" } else { "no" });

    if detailed {
        print_details(&animation);
    }

    Ok(())
}

fn print_details(animation: &Animation) {
    println!("\n{}", style("Player Keyframes").bold());
    let mut table = create_table(&["#", "Time", "Easing", "Parts", "Flags", "FOV", "Bobbing"]);
    for (index, key) in animation.player_key_frames().iter().enumerate() {
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                format_millis(key.time),
                key.easing.to_string(),
                animated_parts(&key.frame),
                flags(&key.frame),
                format!("{:.2}", key.frame.fov_multiplier),
                format!("{:.2}", key.frame.bobbing_amplitude),
            ],
        );
    }
    table.printstd();

    if !animation.item_key_frames().is_empty() {
        println!("\n{}", style("Item Keyframes").bold());
        let mut table = create_table(&["#", "Fraction", "Easing", "Nodes"]);
        for (index, key) in animation.item_key_frames().iter().enumerate() {
            let nodes: Vec<&str> = key.frame.elements.keys().map(String::as_str).collect();
            add_table_row(
                &mut table,
                vec![
                    index.to_string(),
                    format_percentage(key.duration_fraction),
                    key.easing.to_string(),
                    nodes.join(", "),
                ],
            );
        }
        table.printstd();
    }

    if !animation.sound_frames().is_empty() {
        println!("\n{}", style("Sounds").bold());
        let mut table = create_table(&["Code", "Fraction", "Trigger", "Volume", "Range", "Sync"]);
        for sound in animation.sound_frames() {
            add_table_row(
                &mut table,
                vec![
                    sound.code.clone(),
                    format_percentage(sound.duration_fraction),
                    sound
                        .trigger_time(animation.total_duration())
                        .map_or_else(|| "never".to_string(), format_millis),
                    format!("{:.2}", sound.volume),
                    format!("{:.0}", sound.range),
                    if sound.synchronize { "yes" } else { "no" }.to_string(),
                ],
            );
        }
        table.printstd();
    }
}

pub fn execute_validate(path: &Path, strict: bool) -> Result<()> {
    let animation = load_animation(path)?;
    let issues = animation.validate();

    if issues.is_empty() {
        println!(
            "✓ Animation '{}' is valid ({}, {} player keyframes)",
            style(path.display()).cyan(),
            format_millis(animation.total_duration()),
            animation.player_key_frames().len()
        );
        return Ok(());
    }

    println!(
        "⚠ Animation '{}' loaded with {} warning(s):",
        style(path.display()).cyan(),
        style(issues.len()).yellow()
    );
    for issue in &issues {
        println!("  - {issue}");
    }

    if strict {
        anyhow::bail!("Validation failed with {} warning(s)", issues.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpanim::{AnimationElement, RightHandFrame};

    #[test]
    fn test_animated_parts() {
        assert_eq!(animated_parts(&PlayerFrame::ZERO), "-");

        let frame = PlayerFrame {
            right_hand: Some(RightHandFrame::ZERO),
            upper_torso: Some(AnimationElement::ZERO),
            ..PlayerFrame::ZERO
        };
        assert_eq!(animated_parts(&frame), "right hand, torso");
    }

    #[test]
    fn test_flags() {
        assert_eq!(flags(&PlayerFrame::ZERO), "-");

        let frame = PlayerFrame {
            switch_arms: true,
            pitch_follow: PlayerFrame::PERFECT_PITCH_FOLLOW,
            ..PlayerFrame::ZERO
        };
        assert_eq!(flags(&frame), "switch arms, pitch follow");
    }
}
