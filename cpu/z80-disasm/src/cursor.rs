/// Returned when an instruction needs more bytes than the buffer has left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted;

pub type CursorResult<T> = Result<T, Exhausted>;

/// Forward-only reader over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(buffer: &'a [u8], position: usize) -> Self {
        Self { buffer, position }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// # Errors
    ///
    /// Returns [`Exhausted`] if no bytes remain.
    pub fn read_u8(&mut self) -> CursorResult<u8> {
        let &byte = self.buffer.get(self.position).ok_or(Exhausted)?;
        self.position += 1;
        Ok(byte)
    }

    /// # Errors
    ///
    /// Returns [`Exhausted`] if no bytes remain.
    pub fn read_i8(&mut self) -> CursorResult<i8> {
        self.read_u8().map(|byte| byte as i8)
    }

    /// Reads a little-endian word. Consumes nothing unless both bytes are available.
    ///
    /// # Errors
    ///
    /// Returns [`Exhausted`] if fewer than 2 bytes remain.
    pub fn read_u16_le(&mut self) -> CursorResult<u16> {
        if self.remaining() < 2 {
            return Err(Exhausted);
        }

        let lsb = self.read_u8()?;
        let msb = self.read_u8()?;
        Ok(u16::from_le_bytes([lsb, msb]))
    }

    /// Bytes read between `start` and the current position.
    #[must_use]
    pub fn consumed_since(&self, start: usize) -> &'a [u8] {
        let end = self.position.min(self.buffer.len());
        &self.buffer[start.min(end)..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_position() {
        let mut cursor = ByteCursor::new(&[0x12, 0xFE, 0x34, 0x56], 0);

        assert_eq!(cursor.read_u8(), Ok(0x12));
        assert_eq!(cursor.read_i8(), Ok(-2));
        assert_eq!(cursor.read_u16_le(), Ok(0x5634));
        assert_eq!(cursor.position(), 4);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.read_u8(), Err(Exhausted));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn word_read_does_not_consume_single_byte() {
        let mut cursor = ByteCursor::new(&[0xC3, 0x00], 1);

        assert_eq!(cursor.read_u16_le(), Err(Exhausted));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.read_u8(), Ok(0x00));
    }

    #[test]
    fn start_past_end_is_exhausted() {
        let mut cursor = ByteCursor::new(&[0x00], 5);

        assert!(cursor.is_exhausted());
        assert_eq!(cursor.read_u8(), Err(Exhausted));
        assert_eq!(cursor.consumed_since(5), &[] as &[u8]);
    }

    #[test]
    fn consumed_since_returns_read_bytes() {
        let buffer = [0xDD, 0xCB, 0x00, 0x46];
        let mut cursor = ByteCursor::new(&buffer, 0);
        cursor.read_u8().unwrap();
        cursor.read_u8().unwrap();
        cursor.read_i8().unwrap();

        assert_eq!(cursor.consumed_since(0), &[0xDD, 0xCB, 0x00]);
        assert_eq!(cursor.consumed_since(1), &[0xCB, 0x00]);
    }
}
