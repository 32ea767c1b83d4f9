use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LE, ReadBytesExt};

use crate::error::{DecodeError, Result};

/// Largest accepted string length field, terminator included.
pub const MAX_STRING_LEN: i32 = 64 * 1024;

/// Sequential little-endian reader that tracks its absolute offset so
/// failures can report where they happened.
pub struct LittleEndianReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> LittleEndianReader<R> {
    /// Wrap a source assumed to be positioned at offset 0.
    pub fn new(inner: R) -> Self {
        Self::at(inner, 0)
    }

    pub fn at(inner: R, position: u64) -> Self {
        Self { inner, position }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    fn track<T>(&mut self, width: u64, result: io::Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.position += width;
                Ok(value)
            }
            Err(source) => Err(DecodeError::UnexpectedEof {
                offset: self.position,
                source,
            }),
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        let result = self.inner.read_exact(&mut buf);
        self.track(n as u64, result)?;
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let result = self.inner.read_exact(&mut buf);
        self.track(N as u64, result)?;
        Ok(buf)
    }

    /// Consume `n` reserved bytes. Reads rather than seeks so a short stream
    /// is reported instead of silently positioned past its end.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let copied = io::copy(&mut self.inner.by_ref().take(n), &mut io::sink());
        match copied {
            Ok(count) if count == n => {
                self.position += n;
                Ok(())
            }
            Ok(count) => Err(DecodeError::UnexpectedEof {
                offset: self.position + count,
                source: io::ErrorKind::UnexpectedEof.into(),
            }),
            Err(source) => Err(DecodeError::UnexpectedEof {
                offset: self.position,
                source,
            }),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let result = self.inner.read_u8();
        self.track(1, result)
    }

    /// One byte, any nonzero value is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let result = self.inner.read_u16::<LE>();
        self.track(2, result)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let result = self.inner.read_i32::<LE>();
        self.track(4, result)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let result = self.inner.read_u32::<LE>();
        self.track(4, result)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let result = self.inner.read_i64::<LE>();
        self.track(8, result)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let result = self.inner.read_u64::<LE>();
        self.track(8, result)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let result = self.inner.read_f32::<LE>();
        self.track(4, result)
    }

    /// Read an i32-length-prefixed string. The length counts the trailing
    /// null terminator, which is dropped from the result. Bytes that are not
    /// valid UTF-8 are replaced rather than rejected.
    pub fn read_string(&mut self) -> Result<String> {
        let offset = self.position;
        let len = self.read_i32()?;
        if len == 0 {
            return Ok(String::new());
        }
        if !(0..=MAX_STRING_LEN).contains(&len) {
            return Err(DecodeError::InvalidLength {
                what: "string",
                length: len.into(),
                offset,
            });
        }

        let bytes = self.read_bytes(len as usize)?;
        let text = &bytes[..bytes.len() - 1];
        Ok(String::from_utf8_lossy(text).into_owned())
    }

    /// 16 raw bytes rendered as 32 lowercase hex characters.
    pub fn read_guid_hex(&mut self) -> Result<String> {
        let bytes: [u8; 16] = self.read_array()?;
        Ok(hex::encode(bytes))
    }

    /// Read an i32 element count and reject negative or oversized values.
    pub fn read_count(&mut self, what: &'static str, limit: usize) -> Result<usize> {
        let offset = self.position;
        let count = self.read_i32()?;
        check_count(what, count.into(), limit, offset)
    }
}

impl<R: Read + Seek> LittleEndianReader<R> {
    /// Wrap a seekable source at whatever offset it is currently at.
    pub fn from_stream(mut inner: R) -> Result<Self> {
        let position = inner
            .stream_position()
            .map_err(|source| DecodeError::SeekFailure { offset: 0, source })?;
        Ok(Self::at(inner, position))
    }

    /// The next 4 bytes as a little-endian u32, without consuming them.
    pub fn peek_u32(&mut self) -> Result<u32> {
        let value = self.read_u32()?;
        self.seek(SeekFrom::Current(-4))?;
        Ok(value)
    }

    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        match self.inner.seek(pos) {
            Ok(position) => {
                self.position = position;
                Ok(position)
            }
            Err(source) => Err(DecodeError::SeekFailure {
                offset: self.position,
                source,
            }),
        }
    }
}

pub(crate) fn check_count(
    what: &'static str,
    count: i64,
    limit: usize,
    offset: u64,
) -> Result<usize> {
    match usize::try_from(count) {
        Ok(n) if n <= limit => Ok(n),
        _ => Err(DecodeError::InvalidLength {
            what,
            length: count,
            offset,
        }),
    }
}
