//! Text chunking and slide rasterization for the video renderer.
//!
//! The generated text is split into slide-sized chunks on word boundaries
//! (a word is never cut in half), then each chunk is drawn onto a fixed-size
//! white canvas with a second, narrower wrap pass so the lines stay readable
//! on screen.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::config::VideoConfig;

use super::video::VideoError;

// Layout constants carried over from the original canvas design: text block
// starts at (50, 50) and advances 20 px per line at a 20 px glyph size.
const MARGIN_X: i32 = 50;
const MARGIN_Y: i32 = 50;
const LINE_STEP: i32 = 20;
const GLYPH_PX: f32 = 20.0;

/// Candidate font locations tried in order when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// ---------------------------------------------------------------------------
// Chunking
// ---------------------------------------------------------------------------

/// Split `text` into ordered slide chunks of at most `width` characters,
/// wrapping on word boundaries.
///
/// Whitespace-only chunks are dropped; a blank slide has nothing to show.
pub fn chunk_text(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width)
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|line| line.into_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Font resolution
// ---------------------------------------------------------------------------

/// Load the slide font: the configured path when set, otherwise the first
/// candidate location that exists.
pub fn resolve_font(config: &VideoConfig) -> Result<FontVec, VideoError> {
    let path: PathBuf = match &config.font_path {
        Some(path) => path.clone(),
        None => FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
            .ok_or(VideoError::FontNotFound)?
            .to_path_buf(),
    };

    let bytes = std::fs::read(&path).map_err(|_| VideoError::FontNotFound)?;
    FontVec::try_from_vec(bytes).map_err(|_| VideoError::FontNotFound)
}

// ---------------------------------------------------------------------------
// Rasterization
// ---------------------------------------------------------------------------

/// Draw one chunk onto a white canvas, re-wrapped to `config.line_chars`
/// characters per line.
pub fn render_slide(chunk: &str, config: &VideoConfig, font: &FontVec) -> RgbImage {
    let mut image = RgbImage::from_pixel(config.width, config.height, Rgb([255, 255, 255]));

    let mut y = MARGIN_Y;
    for line in textwrap::wrap(chunk, config.line_chars) {
        draw_text_mut(
            &mut image,
            Rgb([0, 0, 0]),
            MARGIN_X,
            y,
            PxScale::from(GLYPH_PX),
            font,
            &line,
        );
        y += LINE_STEP;
    }

    image
}

/// Rasterize every chunk into `dir` as `slide_NNN.png`, in chunk order.
///
/// Returns the written paths, ordered.
pub fn write_slides(
    chunks: &[String],
    config: &VideoConfig,
    dir: &Path,
) -> Result<Vec<PathBuf>, VideoError> {
    let font = resolve_font(config)?;

    let mut paths = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let path = dir.join(format!("slide_{i:03}.png"));
        render_slide(chunk, config, &font)
            .save(&path)
            .map_err(|e| VideoError::Raster(e.to_string()))?;
        paths.push(path);
    }

    Ok(paths)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // chunk_text
    // -----------------------------------------------------------------------

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = chunk_text("just a few words", 200);
        assert_eq!(chunks, vec!["just a few words".to_string()]);
    }

    #[test]
    fn chunks_respect_the_width_limit() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa".repeat(8);
        for chunk in chunk_text(&text, 40) {
            assert!(chunk.len() <= 40, "chunk too wide: {chunk:?}");
        }
    }

    /// Words are never split: re-joining the chunks with spaces restores the
    /// original word sequence.
    #[test]
    fn words_survive_chunking_intact() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let chunks = chunk_text(text, 20);

        let original: Vec<&str> = text.split_whitespace().collect();
        let rejoined: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.split_whitespace())
            .map(|w| w.to_string())
            .collect();
        assert_eq!(original, rejoined);
    }

    /// Slide count tracks text length: roughly ceil(len / width), adjusted
    /// for word boundaries (never fewer than the unadjusted minimum).
    #[test]
    fn chunk_count_scales_with_length() {
        let word = "lorem ";
        let text = word.repeat(100); // 600 chars
        let width = 200;

        let chunks = chunk_text(text.trim_end(), width);
        let minimum = text.trim_end().len().div_ceil(width);

        assert!(chunks.len() >= minimum);
        // Word-boundary adjustment can only add a handful of extra slides.
        assert!(chunks.len() <= minimum + 2, "got {} chunks", chunks.len());
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 200).is_empty());
    }

    // -----------------------------------------------------------------------
    // resolve_font / render_slide
    // -----------------------------------------------------------------------

    #[test]
    fn bogus_configured_font_path_is_an_error() {
        let config = VideoConfig {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..VideoConfig::default()
        };
        assert!(matches!(
            resolve_font(&config),
            Err(VideoError::FontNotFound)
        ));
    }

    #[test]
    fn slides_render_at_the_configured_size() {
        let config = VideoConfig::default();
        // Skip when the test host has no usable system font.
        let Ok(font) = resolve_font(&config) else {
            eprintln!("skipping: no system font available");
            return;
        };

        let image = render_slide("hello slide", &config, &font);
        assert_eq!(image.dimensions(), (config.width, config.height));

        // The text must actually have been drawn: not every pixel is white.
        let any_ink = image.pixels().any(|p| p.0 != [255, 255, 255]);
        assert!(any_ink, "slide came out blank");
    }

    #[test]
    fn write_slides_names_files_in_order() {
        let config = VideoConfig::default();
        if resolve_font(&config).is_err() {
            eprintln!("skipping: no system font available");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let chunks = vec!["first".to_string(), "second".to_string()];
        let paths = write_slides(&chunks, &config, dir.path()).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("slide_000.png"));
        assert!(paths[1].ends_with("slide_001.png"));
        assert!(paths.iter().all(|p| p.exists()));
    }
}
