//! Byte cursor used by the malt recipe format.
//!
//! [`Writer`] appends fixed-width big-endian integers, varuints and
//! length-prefixed strings to a growable buffer. [`Reader`] consumes the same
//! fields from a byte slice and reports [`BufferError::EndOfBuffer`] instead of
//! panicking when the input is short.
//!
//! # Example
//!
//! ```
//! use malt_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x2a);
//! writer.var_uint(300);
//! writer.var_str("Cascade");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.try_u8(), Ok(0x2a));
//! assert_eq!(reader.try_var_uint(), Ok(300));
//! assert_eq!(reader.try_var_str(), Ok("Cascade"));
//! assert_eq!(reader.size(), 0);
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::{var_uint_size, Writer};

/// Errors raised while reading from a [`Reader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A read needed more bytes than remain in the buffer.
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    /// A string field did not contain valid UTF-8.
    #[error("invalid utf-8 in string field")]
    InvalidUtf8,
    /// A varuint carried more than 32 bits of payload.
    #[error("varuint does not fit in 32 bits")]
    VarUintOverflow,
}
