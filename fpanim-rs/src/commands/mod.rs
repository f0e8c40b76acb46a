//! Command implementations

pub mod format;
pub mod inspect;
pub mod playback;
