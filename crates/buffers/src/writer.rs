//! Byte buffer writer with auto-growing capacity.

/// A byte buffer writer that grows automatically as needed.
///
/// Multi-byte integers are written big-endian so that packed bit fields read
/// most-significant-bit first on the wire.
///
/// # Example
///
/// ```
/// use malt_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x02, 0x03]);
/// ```
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
    /// Position where last flush happened.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
    /// Allocation size when buffer needs to grow.
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default allocation size (4KB), enough for
    /// any recipe without growing.
    pub fn new() -> Self {
        Self::with_alloc_size(4 * 1024)
    }

    /// Creates a new writer with custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        let alloc_size = alloc_size.max(1);
        Self {
            uint8: vec![0u8; alloc_size],
            x0: 0,
            x: 0,
            alloc_size,
        }
    }

    /// Ensures the buffer has at least `capacity` bytes available.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let remaining = self.uint8.len() - self.x;
        if remaining < capacity {
            let total = self.uint8.len() - self.x0;
            let required = capacity - remaining;
            let total_required = total + required;
            let new_size = if total_required <= self.alloc_size {
                self.alloc_size
            } else {
                total_required * 2
            };
            self.grow(new_size);
        }
    }

    fn grow(&mut self, new_size: usize) {
        let x0 = self.x0;
        let x = self.x;
        let mut new_buf = vec![0u8; new_size];
        new_buf[..x - x0].copy_from_slice(&self.uint8[x0..x]);
        self.uint8 = new_buf;
        self.x = x - x0;
        self.x0 = 0;
    }

    /// Discards everything written since the last flush.
    pub fn reset(&mut self) {
        self.x = self.x0;
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.x - self.x0
    }

    /// Returns `true` if nothing was written since the last flush.
    pub fn is_empty(&self) -> bool {
        self.x == self.x0
    }

    /// Returns the written data and advances the flush position.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        result
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.ensure_capacity(2);
        let bytes = val.to_be_bytes();
        self.uint8[self.x] = bytes[0];
        self.uint8[self.x + 1] = bytes[1];
        self.x += 2;
    }

    /// Writes a variable-length unsigned integer.
    ///
    /// Seven payload bits per byte, least-significant group first. Every byte
    /// but the last has its high bit set. Returns the number of bytes written.
    pub fn var_uint(&mut self, val: u32) -> usize {
        self.ensure_capacity(5);
        let start = self.x;
        let mut val = val;
        while val >= 0x80 {
            self.uint8[self.x] = (val as u8 & 0x7f) | 0x80;
            self.x += 1;
            val >>= 7;
        }
        self.uint8[self.x] = val as u8;
        self.x += 1;
        self.x - start
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }

    /// Writes a UTF-8 string prefixed with its byte length as a varuint.
    ///
    /// Strings longer than `u32::MAX` bytes are not representable and are cut
    /// at that length.
    pub fn var_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
        self.ensure_capacity(var_uint_size(len) + len as usize);
        self.var_uint(len);
        self.buf(&bytes[..len as usize]);
    }
}

/// Number of bytes [`Writer::var_uint`] uses for `val`.
pub fn var_uint_size(val: u32) -> usize {
    match val {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        0x4000..=0x1f_ffff => 3,
        0x20_0000..=0x0fff_ffff => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_u16() {
        let mut writer = Writer::new();
        writer.u16(0x0102);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_var_uint_single_byte() {
        let mut writer = Writer::new();
        assert_eq!(writer.var_uint(0), 1);
        assert_eq!(writer.var_uint(127), 1);
        assert_eq!(writer.flush(), [0x00, 0x7f]);
    }

    #[test]
    fn test_var_uint_continuation() {
        let mut writer = Writer::new();
        writer.var_uint(128);
        writer.var_uint(300);
        assert_eq!(writer.flush(), [0x80, 0x01, 0xac, 0x02]);
    }

    #[test]
    fn test_var_uint_max() {
        let mut writer = Writer::new();
        assert_eq!(writer.var_uint(u32::MAX), 5);
        assert_eq!(writer.flush(), [0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn test_var_uint_size_matches_writer() {
        for val in [0, 1, 127, 128, 16_383, 16_384, 2_097_151, 2_097_152, u32::MAX] {
            let mut writer = Writer::new();
            assert_eq!(writer.var_uint(val), var_uint_size(val), "value {val}");
        }
    }

    #[test]
    fn test_var_str() {
        let mut writer = Writer::new();
        writer.var_str("IPA");
        assert_eq!(writer.flush(), [0x03, b'I', b'P', b'A']);
    }

    #[test]
    fn test_var_str_counts_bytes_not_chars() {
        let mut writer = Writer::new();
        writer.var_str("🍺");
        let data = writer.flush();
        assert_eq!(data[0], 4);
        assert_eq!(&data[1..], "🍺".as_bytes());
    }

    #[test]
    fn test_var_str_reserves_prefix_and_body_once() {
        let mut writer = Writer::with_alloc_size(1);
        let name = "Hallertauer Mittelfrüh ".repeat(8);
        writer.var_str(&name);
        let len = name.len();
        assert_eq!(writer.len(), var_uint_size(len as u32) + len);
        assert_eq!(writer.uint8.len(), (var_uint_size(len as u32) + len) * 2);
    }

    #[test]
    fn test_grows_past_alloc_size() {
        let mut writer = Writer::with_alloc_size(2);
        writer.buf(&[1, 2, 3, 4, 5]);
        writer.u16(0x0607);
        assert_eq!(writer.len(), 7);
        assert_eq!(writer.flush(), [1, 2, 3, 4, 5, 6, 7]);
        assert!(writer.is_empty());
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.flush();
        writer.u16(0xffff);
        writer.reset();
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x02]);
    }

    #[test]
    fn test_flush_multiple() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        assert_eq!(writer.flush(), [0x01]);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x02]);
    }
}
