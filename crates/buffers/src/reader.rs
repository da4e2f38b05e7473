//! Byte buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A byte buffer reader that reads data from a byte slice.
///
/// Every read is bounds-checked: running past the end yields
/// [`BufferError::EndOfBuffer`] and leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use malt_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_u16(), Ok(0x0203));
/// assert_eq!(reader.size(), 1);
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if n > self.size() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit big-endian integer.
    #[inline]
    pub fn try_u16(&mut self) -> Result<u16, BufferError> {
        self.check(2)?;
        let x = self.x;
        let val = ((self.uint8[x] as u16) << 8) | (self.uint8[x + 1] as u16);
        self.x += 2;
        Ok(val)
    }

    /// Reads a variable-length unsigned integer written by
    /// [`Writer::var_uint`](crate::Writer::var_uint).
    ///
    /// The cursor is left untouched on error.
    pub fn try_var_uint(&mut self) -> Result<u32, BufferError> {
        let mut val: u32 = 0;
        let mut x = self.x;
        for shift in (0..35).step_by(7) {
            let byte = *self.uint8.get(x).ok_or(BufferError::EndOfBuffer)?;
            x += 1;
            let payload = (byte & 0x7f) as u32;
            if shift == 28 && payload > 0x0f {
                return Err(BufferError::VarUintOverflow);
            }
            val |= payload << shift;
            if byte & 0x80 == 0 {
                self.x = x;
                return Ok(val);
            }
        }
        Err(BufferError::VarUintOverflow)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        Ok(bin)
    }

    /// Reads a UTF-8 string of `size` bytes.
    pub fn try_utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let start = self.x;
        let s = str::from_utf8(&self.uint8[start..start + size])
            .map_err(|_| BufferError::InvalidUtf8)?;
        self.x += size;
        Ok(s)
    }

    /// Reads a varuint length followed by that many bytes of UTF-8.
    pub fn try_var_str(&mut self) -> Result<&'a str, BufferError> {
        let start = self.x;
        let len = self.try_var_uint()? as usize;
        self.try_utf8(len).inspect_err(|_| self.x = start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Writer;

    #[test]
    fn test_try_u8_success() {
        let data = [0x42u8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Ok(0x42));
        assert_eq!(reader.x, 1);
    }

    #[test]
    fn test_try_u8_end_of_buffer() {
        let data: [u8; 0] = [];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
        // Cursor must not advance on error
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_u16_success() {
        let data = [0x01u8, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u16(), Ok(0x0102u16));
        assert_eq!(reader.x, 2);
    }

    #[test]
    fn test_try_u16_partial() {
        let data = [0x01u8]; // one byte short of a u16
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u16(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_var_uint() {
        let data = [0x00, 0x7f, 0x80, 0x01, 0xac, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_var_uint(), Ok(0));
        assert_eq!(reader.try_var_uint(), Ok(127));
        assert_eq!(reader.try_var_uint(), Ok(128));
        assert_eq!(reader.try_var_uint(), Ok(300));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_try_var_uint_truncated() {
        let data = [0x80u8, 0x80];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_var_uint(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_var_uint_overflow() {
        let data = [0xffu8, 0xff, 0xff, 0xff, 0x1f];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_var_uint(), Err(BufferError::VarUintOverflow));

        let data = [0x80u8, 0x80, 0x80, 0x80, 0x80, 0x01];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_var_uint(), Err(BufferError::VarUintOverflow));
    }

    #[test]
    fn test_try_var_uint_max() {
        let mut writer = Writer::new();
        writer.var_uint(u32::MAX);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_var_uint(), Ok(u32::MAX));
    }

    #[test]
    fn test_try_buf_end_of_buffer() {
        let data = [1u8, 2];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_buf(5), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
        assert_eq!(reader.try_buf(2), Ok([1u8, 2].as_ref()));
    }

    #[test]
    fn test_try_utf8_invalid() {
        // 0xff is not valid UTF-8
        let data = [0xffu8, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_utf8(2), Err(BufferError::InvalidUtf8));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_var_str_multibyte() {
        let mut writer = Writer::new();
        writer.var_str("Brett 🍺 Saison");
        writer.var_str("");
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_var_str(), Ok("Brett 🍺 Saison"));
        assert_eq!(reader.try_var_str(), Ok(""));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_try_var_str_length_past_end() {
        let data = [0x05u8, b'a', b'b'];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_var_str(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }
}
