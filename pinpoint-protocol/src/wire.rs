//! Little-endian field cursors over packet bytes

use heapless::String;

use crate::packet::PacketError;

pub(crate) struct WireWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WireWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn written(&self) -> usize {
        self.pos
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), PacketError> {
        let end = self.pos + bytes.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(PacketError::BufferTooSmall)?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    pub fn put_u8(&mut self, value: u8) -> Result<(), PacketError> {
        self.put(&[value])
    }

    pub fn put_u32(&mut self, value: u32) -> Result<(), PacketError> {
        self.put(&value.to_le_bytes())
    }

    pub fn put_f64(&mut self, value: f64) -> Result<(), PacketError> {
        self.put(&value.to_le_bytes())
    }

    /// Write `bytes` and pad with NUL up to `width`
    pub fn put_padded(&mut self, bytes: &[u8], width: usize) -> Result<(), PacketError> {
        debug_assert!(bytes.len() <= width);
        self.put(bytes)?;
        for _ in bytes.len()..width {
            self.put_u8(0)?;
        }
        Ok(())
    }
}

pub(crate) struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], PacketError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice(N)?);
        Ok(out)
    }

    fn slice(&mut self, len: usize) -> Result<&'a [u8], PacketError> {
        let end = self.pos + len;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| PacketError::Incomplete {
                needed: end - self.buf.len(),
            })?;
        self.pos = end;
        Ok(bytes)
    }

    pub fn u8(&mut self) -> Result<u8, PacketError> {
        Ok(self.take::<1>()?[0])
    }

    pub fn u32(&mut self) -> Result<u32, PacketError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    pub fn f64(&mut self) -> Result<f64, PacketError> {
        Ok(f64::from_le_bytes(self.take()?))
    }

    /// Read a NUL-padded UTF-8 field of `width` bytes
    pub fn padded_str<const N: usize>(&mut self, width: usize) -> Result<String<N>, PacketError> {
        let raw = self.slice(width)?;
        let len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let text = core::str::from_utf8(&raw[..len]).map_err(|_| PacketError::InvalidText)?;

        let mut s = String::new();
        s.push_str(text).map_err(|_| PacketError::InvalidText)?;
        Ok(s)
    }
}
