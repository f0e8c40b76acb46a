//! Document loading

use anyhow::{Context, Result};
use std::path::Path;

use fpanim::Animation;

/// Load an animation document, naming the file in any error
pub fn load_animation(path: &Path) -> Result<Animation> {
    Animation::load(path)
        .with_context(|| format!("Failed to load animation: {}", path.display()))
}
