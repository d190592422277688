//! Little-endian cursor over a replay buffer.

use crate::error::{Error, Result};

/// String indicator: empty string, nothing follows
pub const STRING_EMPTY: u8 = 0x00;
/// String indicator: ULEB128 length and UTF-8 bytes follow
pub const STRING_PRESENT: u8 = 0x0b;

/// Sequential reader over a byte slice.
///
/// Every fixed-width read fails with [`Error::UnexpectedEof`] when the buffer
/// is too short; the position is left unchanged in that case.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::UnexpectedEof {
                offset: self.position,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a 64-bit value stored as two little-endian 32-bit halves (low first)
    pub fn read_u64_halves(&mut self) -> Result<u64> {
        let halves: [u8; 8] = self.read_array()?;
        let low = u32::from_le_bytes([halves[0], halves[1], halves[2], halves[3]]);
        let high = u32::from_le_bytes([halves[4], halves[5], halves[6], halves[7]]);
        Ok((u64::from(high) << 32) | u64::from(low))
    }

    /// Read an unsigned LEB128 integer
    pub fn read_uleb128(&mut self) -> Result<u64> {
        let start = self.position;
        let mut value = 0u64;
        let mut shift = 0u32;

        loop {
            let byte = match self.read_u8() {
                Ok(byte) => byte,
                Err(e) => {
                    self.position = start;
                    return Err(e);
                }
            };

            if shift >= u64::BITS || (shift == 63 && byte & 0x7f > 1) {
                self.position = start;
                return Err(Error::MalformedLength {
                    offset: start,
                    message: "ULEB128 value exceeds 64 bits".to_string(),
                });
            }
            value |= u64::from(byte & 0x7f) << shift;

            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Read a length-prefixed string.
    ///
    /// `0x00` is the empty string, `0x0b` is followed by a ULEB128 length and
    /// that many UTF-8 bytes. Any other indicator also reads as empty, with
    /// only the indicator consumed. Invalid UTF-8 is replaced, not rejected.
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.position;
        let indicator = self.read_u8()?;
        if indicator != STRING_PRESENT {
            return Ok(String::new());
        }

        let result = self.read_uleb128().and_then(|len| {
            let len = usize::try_from(len).map_err(|_| Error::MalformedLength {
                offset: start + 1,
                message: format!("string length {} does not fit in memory", len),
            })?;
            self.read_bytes(len)
        });

        match result {
            Ok(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            Err(e) => {
                self.position = start;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives_little_endian() {
        let data = [
            0x07, // u8
            0x34, 0x12, // u16
            0xFE, 0xFF, 0xFF, 0xFF, // i32 -2
            0x78, 0x56, 0x34, 0x12, // u32
        ];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_i32().unwrap(), -2);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_u64_halves() {
        let data = [0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u64_halves().unwrap(), 2 * (1u64 << 32) + 1);
    }

    #[test]
    fn test_read_past_end_fails_without_advancing() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&data);
        reader.read_u8().unwrap();
        let err = reader.read_i32().unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedEof {
                offset: 1,
                needed: 4,
                remaining: 2
            }
        ));
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_read_uleb128() {
        let mut reader = ByteReader::new(&[0x05]);
        assert_eq!(reader.read_uleb128().unwrap(), 5);

        let mut reader = ByteReader::new(&[0xE5, 0x8E, 0x26]);
        assert_eq!(reader.read_uleb128().unwrap(), 624_485);
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_read_uleb128_overflow() {
        let data = [0xFF; 11];
        let mut reader = ByteReader::new(&data);
        let err = reader.read_uleb128().unwrap_err();
        assert!(matches!(err, Error::MalformedLength { offset: 0, .. }));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_uleb128_tenth_byte() {
        // Ten bytes reach bit 63, only the lowest payload bit still fits
        let mut data = [0x80u8; 10];
        data[9] = 0x01;
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_uleb128().unwrap(), 1u64 << 63);

        let mut data = [0xFFu8; 10];
        data[9] = 0x01;
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_uleb128().unwrap(), u64::MAX);

        data[9] = 0x02;
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            reader.read_uleb128().unwrap_err(),
            Error::MalformedLength { offset: 0, .. }
        ));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_uleb128_truncated() {
        let mut reader = ByteReader::new(&[0x80, 0x80]);
        assert!(matches!(
            reader.read_uleb128().unwrap_err(),
            Error::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_read_string_empty_indicator() {
        let mut reader = ByteReader::new(&[STRING_EMPTY, 0xAA]);
        assert_eq!(reader.read_string().unwrap(), "");
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_read_string_present() {
        let mut data = vec![STRING_PRESENT, 5];
        data.extend_from_slice(b"hello");
        data.push(0xFF);
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_string().unwrap(), "hello");
        // indicator + one length byte + payload
        assert_eq!(reader.position(), 1 + 1 + 5);
    }

    #[test]
    fn test_read_string_multibyte_length() {
        let text = "x".repeat(200);
        let mut data = vec![STRING_PRESENT, 0xC8, 0x01];
        data.extend_from_slice(text.as_bytes());
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_string().unwrap(), text);
        assert_eq!(reader.position(), 1 + 2 + 200);
    }

    #[test]
    fn test_read_string_unknown_indicator_is_empty() {
        let mut reader = ByteReader::new(&[0x42, 0x05]);
        assert_eq!(reader.read_string().unwrap(), "");
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_read_string_truncated_payload() {
        let data = [STRING_PRESENT, 10, b'a', b'b'];
        let mut reader = ByteReader::new(&data);
        let err = reader.read_string().unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_string_invalid_utf8_is_replaced() {
        let data = [STRING_PRESENT, 2, 0xC3, 0x28];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_string().unwrap(), "\u{FFFD}(");
    }
}
