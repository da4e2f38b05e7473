//! End-to-end pipeline: binary, then dictionary DEFLATE, then URL-safe text.

use malt_recipe::Recipe;
use tracing::debug;

use crate::binary::{decode_binary, encode_binary};
use crate::compression::{deflate, inflate, DICTIONARY};
use crate::transport::{from_text, to_text};
use crate::Error;

/// Knobs for [`crush_with`] and [`load_with`].
///
/// A link can only be loaded with the same `dictionary` setting it was
/// crushed with. `level` only affects the encoding side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrushOptions {
    /// DEFLATE effort, 0-9.
    pub level: u32,
    /// Seed the compressor with the brewing dictionary.
    pub dictionary: bool,
}

impl Default for CrushOptions {
    fn default() -> Self {
        Self {
            level: 9,
            dictionary: true,
        }
    }
}

impl CrushOptions {
    fn dictionary(&self) -> Option<&'static [u8]> {
        self.dictionary.then_some(DICTIONARY)
    }
}

/// Encodes `recipe` into a URL-safe string.
pub fn crush(recipe: &Recipe) -> Result<String, Error> {
    crush_with(recipe, &CrushOptions::default())
}

pub fn crush_with(recipe: &Recipe, options: &CrushOptions) -> Result<String, Error> {
    let binary = encode_binary(recipe)?;
    let compressed = deflate(&binary, options.level, options.dictionary())?;
    let text = to_text(&compressed);
    debug!(
        binary = binary.len(),
        compressed = compressed.len(),
        text = text.len(),
        "crushed recipe"
    );
    Ok(text)
}

/// Decodes a string produced by [`crush`].
pub fn load(text: &str) -> Result<Recipe, Error> {
    load_with(text, &CrushOptions::default())
}

pub fn load_with(text: &str, options: &CrushOptions) -> Result<Recipe, Error> {
    let compressed = from_text(text)?;
    let binary = inflate(&compressed, options.dictionary())?;
    debug!(
        text = text.len(),
        compressed = compressed.len(),
        binary = binary.len(),
        "loading recipe"
    );
    Ok(decode_binary(&binary)?)
}
