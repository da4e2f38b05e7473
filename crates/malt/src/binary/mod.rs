//! Bit-packed binary form of a recipe.
//!
//! The payload is a fixed sequence of sections with no tags between them, so
//! [`RecipeEncoder`] and [`RecipeDecoder`] must agree on field order and bit
//! widths exactly. The first byte is [`FORMAT_VERSION`].
//!
//! Layout, sub-byte fields packed most-significant first:
//!
//! | section            | bits                                                   |
//! |--------------------|--------------------------------------------------------|
//! | version            | 8                                                      |
//! | header 1           | glass 3, serving size 3, type 2                        |
//! | header 2           | small batch 1, style 7                                 |
//! | name, description  | varuint length + UTF-8                                 |
//! | sizes              | batch 5 + boil delta 3, or varuint batch + varuint boil|
//! | custom serving     | varuint, when serving code is 7                        |
//! | counts             | fermentables 4 + miscs 4, hops 5 + yeasts 3            |
//! | fermentables       | unit 2, yield 7, name length 7, then varuints + name   |
//! | hops               | time 3, weight 1, form 2, use 2, then varuints + name  |
//! | miscs              | time 2, use 3, unit 3, then varuints + name            |
//! | yeasts             | amount 1, type 3, unit 2, unused 1, form 1, ...        |
//! | mash (not extract) | water 1, steps 7, steps, six ppm varuints              |
//! | trailer (optional) | carbonation 5, steps 3, then 2 bytes per step          |

mod decoder;
mod encoder;

pub use decoder::RecipeDecoder;
pub use encoder::RecipeEncoder;

use malt_buffers::BufferError;
use malt_recipe::presets::{
    preset_code, HOP_SEED_GRAMS, HOP_SEED_TIME, HOP_TIMES, HOP_TIME_CUSTOM, HOP_TIME_PREVIOUS,
};
use malt_recipe::Recipe;

/// Version byte leading every binary payload.
pub const FORMAT_VERSION: u8 = 1;

/// Serving size code meaning "custom value follows".
pub(crate) const SERVING_CUSTOM: u8 = 7;
/// Misc time code meaning "custom value follows".
pub(crate) const MISC_TIME_CUSTOM: u8 = 3;
/// Mash duration code meaning "custom value follows".
pub(crate) const MASH_DURATION_CUSTOM: u8 = 7;
/// Mash ramp code meaning "custom value follows".
pub(crate) const MASH_RAMP_CUSTOM: u8 = 3;
/// Water:grain ratios are stored in tenths, offset by 1.6 L/kg.
pub(crate) const RATIO_OFFSET_TENTHS: u32 = 16;

pub(crate) const MAX_FERMENTABLES: usize = 0x0f;
pub(crate) const MAX_MISCS: usize = 0x0f;
pub(crate) const MAX_HOPS: usize = 0x1f;
pub(crate) const MAX_YEASTS: usize = 0x07;
pub(crate) const MAX_MASH_STEPS: usize = 0x7f;
pub(crate) const MAX_FERMENTATION_STEPS: usize = 0x07;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("too many {collection}: {len} (at most {max} fit)")]
    TooMany {
        collection: &'static str,
        len: usize,
        max: usize,
    },
    #[error("{field} out of encodable range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed recipe payload: {0}")]
    Buffer(#[from] BufferError),
    #[error("reserved {field} index {index}")]
    InvalidEnum { field: &'static str, index: u8 },
    #[error("unsupported recipe format version {0}")]
    UnsupportedVersion(u8),
    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),
}

/// Previous hop's time and weight, threaded through the hop loop on both sides.
///
/// Seeded at 60 minutes / 28 grams before the first hop and updated after every
/// hop whether or not its values were written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopCarry {
    pub previous_time: u32,
    pub previous_grams: u32,
}

impl Default for HopCarry {
    fn default() -> Self {
        Self {
            previous_time: HOP_SEED_TIME,
            previous_grams: HOP_SEED_GRAMS,
        }
    }
}

impl HopCarry {
    /// Time code for `time`: a preset wins, then "same as previous", then custom.
    pub fn time_code(&self, time: u32) -> u8 {
        match preset_code(&HOP_TIMES, &time) {
            Some(code) => code,
            None if time == self.previous_time => HOP_TIME_PREVIOUS,
            None => HOP_TIME_CUSTOM,
        }
    }

    pub fn weight_differs(&self, grams: u32) -> bool {
        grams != self.previous_grams
    }

    pub fn advance(&mut self, time: u32, grams: u32) {
        self.previous_time = time;
        self.previous_grams = grams;
    }
}

/// Batch and boil fit one byte: batch under 32 L, boil-off under 8 L.
pub fn is_small_batch(batch_size: u32, boil_size: u32) -> bool {
    batch_size < 32 && boil_size >= batch_size && boil_size - batch_size < 8
}

/// Encodes `recipe` to its binary form.
pub fn encode_binary(recipe: &Recipe) -> Result<Vec<u8>, EncodeError> {
    RecipeEncoder::new().encode(recipe)
}

/// Decodes a binary payload produced by [`encode_binary`].
pub fn decode_binary(data: &[u8]) -> Result<Recipe, DecodeError> {
    RecipeDecoder::new(data).decode()
}
