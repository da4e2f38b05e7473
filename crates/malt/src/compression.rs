//! Raw DEFLATE seeded with a preset dictionary of brewing vocabulary.
//!
//! Recipe payloads are a few hundred bytes, too short to build useful
//! back-references of their own. Seeding the window with [`DICTIONARY`] lets
//! the compressor match ingredient names and style words against it instead.
//! Both sides must use a byte-identical dictionary.

use flate2::{
    Compress, CompressError, Compression, Decompress, DecompressError, FlushCompress,
    FlushDecompress, Status,
};

/// Preset dictionary, most frequent terms last so they sit closest to the
/// start of the payload.
pub static DICTIONARY: &[u8] = include_bytes!("dict.txt");

/// Largest inflated payload accepted. Real recipes are well under 4 KiB.
pub const MAX_INFLATED_LEN: usize = 64 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("deflate failed: {0}")]
    Deflate(#[from] CompressError),
    #[error("inflate failed, corrupted data or dictionary mismatch: {0}")]
    Inflate(#[from] DecompressError),
    #[error("compressed stream ends early")]
    Truncated,
    #[error("inflated payload exceeds {MAX_INFLATED_LEN} bytes")]
    TooLarge,
}

/// Compresses `data` as a headerless DEFLATE stream.
///
/// `level` is clamped to 0-9. With `dictionary` unset the stream is plain raw
/// DEFLATE.
pub fn deflate(
    data: &[u8],
    level: u32,
    dictionary: Option<&[u8]>,
) -> Result<Vec<u8>, CompressionError> {
    let mut compress = Compress::new(Compression::new(level.min(9)), false);
    if let Some(dictionary) = dictionary {
        compress.set_dictionary(dictionary)?;
    }

    let mut out = Vec::with_capacity(data.len() / 2 + 64);
    loop {
        let consumed = compress.total_in() as usize;
        match compress.compress_vec(&data[consumed..], &mut out, FlushCompress::Finish)? {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => out.reserve(out.capacity().max(64)),
        }
    }
}

/// Inflates a headerless DEFLATE stream produced by [`deflate`] with the same
/// dictionary.
pub fn inflate(data: &[u8], dictionary: Option<&[u8]>) -> Result<Vec<u8>, CompressionError> {
    let mut decompress = Decompress::new(false);
    if let Some(dictionary) = dictionary {
        decompress.set_dictionary(dictionary)?;
    }

    let mut out = Vec::with_capacity(data.len() * 4 + 64);
    loop {
        let consumed = decompress.total_in() as usize;
        let produced = decompress.total_out();
        let status =
            decompress.decompress_vec(&data[consumed..], &mut out, FlushDecompress::Finish)?;
        if out.len() > MAX_INFLATED_LEN {
            return Err(CompressionError::TooLarge);
        }
        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                let stalled = decompress.total_in() as usize == consumed
                    && decompress.total_out() == produced;
                let drained = decompress.total_in() as usize == data.len();
                if out.len() < out.capacity() && (stalled || drained) {
                    return Err(CompressionError::Truncated);
                }
                out.reserve(out.capacity().max(64));
            }
        }
    }
}
