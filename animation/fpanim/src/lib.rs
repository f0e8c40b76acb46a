//! # fpanim - First-Person Keyframe Animation
//!
//! Keyframe playback for a first-person player rig and the item it holds.
//! Each tick turns an elapsed time and the previous pose into a new pose,
//! with per-segment easing and a separately timed item track.
//!
//! ## Features
//!
//! - Time-indexed player keyframes with optional arm, torso, and anchor parts
//! - Item keyframes indexed by fraction of a configurable item window
//! - Named easing curves resolved when a document is loaded
//! - Sound triggers fired exactly once over contiguous tick windows
//! - JSON documents with camelCase fields, PascalCase accepted on load
//!
//! ## Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use fpanim::{Animation, PlayerItemFrame, SoundFrame};
//!
//! # fn main() -> Result<(), fpanim::AnimationError> {
//! let animation = Animation::load("bow_draw.json")?;
//!
//! let mut pose = PlayerItemFrame::ZERO;
//! let mut previous = Duration::ZERO;
//! let tick = Duration::from_millis(16);
//! while !animation.is_finished(previous) {
//!     let current = previous + tick;
//!     pose = animation.interpolate(&pose, current);
//!     animation.dispatch_sounds(previous, current, &mut |sound: &SoundFrame| {
//!         println!("play {}", sound.code);
//!     });
//!     previous = current;
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod animation;
pub mod document;
pub mod easing;
pub mod element;
pub mod error;
pub mod frame;
pub mod keyframe;

// Re-export commonly used types
pub use animation::{Animation, SoundSink, ValidationIssue};
pub use document::{AnimationDocument, ItemKeyFrameDocument, PlayerKeyFrameDocument};
pub use easing::EasingFunction;
pub use element::{AnimationElement, Lerp};
pub use error::{AnimationError, Result};
pub use frame::{ItemFrame, LeftHandFrame, PlayerFrame, PlayerItemFrame, RightHandFrame};
pub use keyframe::{ItemKeyFrame, PlayerKeyFrame, SoundFrame};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
