use std::path::Path;

use anyhow::{Context, Result};

use crate::fragment::extract_by_class;
use crate::slide::Slide;
use crate::state::DisplayState;

const SLIDE_CLASS: &str = "slide";

/// Reads a page and turns each element carrying the slide class into a slide.
pub fn load_page(path: &Path) -> Result<Vec<Slide>> {
    let markup = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page {}", path.display()))?;
    slides_from_markup(&markup).with_context(|| format!("Failed to parse page {}", path.display()))
}

pub fn slides_from_markup(markup: &str) -> Result<Vec<Slide>> {
    let slides = extract_by_class(markup, SLIDE_CLASS)?
        .into_iter()
        .enumerate()
        .map(|(position, fragment)| {
            let state = if position == 0 {
                DisplayState::Current
            } else {
                DisplayState::AfterCurrent
            };
            Slide::new(position, state, fragment)
        })
        .collect();
    Ok(slides)
}
