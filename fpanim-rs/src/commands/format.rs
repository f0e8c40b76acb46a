//! Format command implementation

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use fpanim::AnimationDocument;

use crate::utils::load_animation;

/// Load a document and write it back in canonical form
///
/// The round trip resolves easing names, sorts every track, fills defaults,
/// and clamps the item window, so the output always loads cleanly.
pub fn execute(input: &Path, output: Option<&Path>) -> Result<()> {
    let animation = load_animation(input)?;
    let document = AnimationDocument::from_animation(&animation);

    match output {
        Some(output) => {
            document
                .to_path(output)
                .with_context(|| format!("Failed to write output file: {}", output.display()))?;
            eprintln!(
                "✓ Wrote {} to {}",
                style(input.display()).cyan(),
                style(output.display()).green()
            );
        }
        None => {
            let json = document
                .to_json_string_pretty()
                .context("Failed to serialize animation")?;
            println!("{json}");
        }
    }

    Ok(())
}
