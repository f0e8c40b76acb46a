//! Formatting utilities

use std::time::Duration;

use fpanim::AnimationElement;

/// Format a duration as whole milliseconds
pub fn format_millis(duration: Duration) -> String {
    format!("{} ms", duration.as_millis())
}

/// Format a fraction as a percentage
pub fn format_percentage(value: f32) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Format an element as offset and rotation triples
pub fn format_element(element: &AnimationElement) -> String {
    let [x, y, z, rx, ry, rz] = element.to_array();
    format!("({x:.3}, {y:.3}, {z:.3}) rot ({rx:.2}, {ry:.2}, {rz:.2})")
}
