//! Bit-level I/O.
//!
//! The codec never touches bytes directly: it reads and writes groups of
//! 1 to 32 bits, most-significant bit first, through [`BitSource`] and
//! [`BitSink`]. [`BitReader`] and [`BitWriter`] adapt any `std::io` stream.

use std::io::{self, Read, Seek, SeekFrom, Write};

/// Widest bit group a single read or write may carry.
pub const MAX_BITS: u32 = 32;

/// A readable, rewindable stream of bits.
pub trait BitSource {
    /// Read `n` bits (1..=32) as an unsigned integer.
    ///
    /// Returns `Ok(None)` once the stream cannot supply `n` more bits.
    fn read_bits(&mut self, n: u32) -> io::Result<Option<u32>>;

    /// Rewind to the start so the same input can be read again.
    fn reset(&mut self) -> io::Result<()>;
}

/// A writable stream of bits.
pub trait BitSink {
    /// Write the low `n` bits (1..=32) of `value`, most-significant first.
    fn write_bits(&mut self, n: u32, value: u32) -> io::Result<()>;

    /// Pad the last partial byte with zeros and flush. Idempotent.
    fn close(&mut self) -> io::Result<()>;
}

impl<T: BitSource + ?Sized> BitSource for &mut T {
    fn read_bits(&mut self, n: u32) -> io::Result<Option<u32>> {
        (**self).read_bits(n)
    }

    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }
}

impl<T: BitSink + ?Sized> BitSink for &mut T {
    fn write_bits(&mut self, n: u32, value: u32) -> io::Result<()> {
        (**self).write_bits(n, value)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

fn check_width(n: u32) -> io::Result<()> {
    if n == 0 || n > MAX_BITS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("bit group width {n} outside 1..={MAX_BITS}"),
        ));
    }
    Ok(())
}

#[inline]
fn low_mask(n: u32) -> u64 {
    (1u64 << n) - 1
}

/// MSB-first bit reader over a seekable byte stream.
pub struct BitReader<R> {
    inner: R,
    acc: u64,
    nbits: u32,
    bits_read: u64,
}

impl<R: Read + Seek> BitReader<R> {
    /// Wrap `inner`. Buffer it yourself if reads are expensive.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            acc: 0,
            nbits: 0,
            bits_read: 0,
        }
    }

    /// Bits handed out since construction or the last reset.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Unwrap the underlying stream. Buffered bits are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.inner.read_exact(&mut byte) {
            Ok(()) => Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<R: Read + Seek> BitSource for BitReader<R> {
    fn read_bits(&mut self, n: u32) -> io::Result<Option<u32>> {
        check_width(n)?;
        while self.nbits < n {
            match self.next_byte()? {
                Some(b) => {
                    self.acc = (self.acc << 8) | u64::from(b);
                    self.nbits += 8;
                }
                None => {
                    // A short read ends the stream; partial bits are dropped.
                    self.acc = 0;
                    self.nbits = 0;
                    return Ok(None);
                }
            }
        }
        self.nbits -= n;
        let value = (self.acc >> self.nbits) & low_mask(n);
        self.acc &= low_mask(self.nbits);
        self.bits_read += u64::from(n);
        Ok(Some(value as u32))
    }

    fn reset(&mut self) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(0))?;
        self.acc = 0;
        self.nbits = 0;
        self.bits_read = 0;
        Ok(())
    }
}

/// MSB-first bit writer over a byte stream.
///
/// Dropping an unclosed writer closes it and discards any error; call
/// [`BitSink::close`] to observe failures.
pub struct BitWriter<W: Write> {
    inner: W,
    acc: u64,
    nbits: u32,
    bits_written: u64,
    closed: bool,
}

impl<W: Write> BitWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            acc: 0,
            nbits: 0,
            bits_written: 0,
            closed: false,
        }
    }

    /// Bits accepted so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bits(&mut self, n: u32, value: u32) -> io::Result<()> {
        check_width(n)?;
        if self.closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write to closed bit sink",
            ));
        }
        self.acc = (self.acc << n) | (u64::from(value) & low_mask(n));
        self.nbits += n;
        self.bits_written += u64::from(n);

        // At most 39 pending bits, so at most 4 whole bytes per call.
        let mut buf = [0u8; 5];
        let mut len = 0;
        while self.nbits >= 8 {
            self.nbits -= 8;
            buf[len] = (self.acc >> self.nbits) as u8;
            len += 1;
        }
        self.acc &= low_mask(self.nbits);
        self.inner.write_all(&buf[..len])
    }

    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.nbits > 0 {
            let byte = (self.acc << (8 - self.nbits)) as u8;
            self.acc = 0;
            self.nbits = 0;
            self.inner.write_all(&[byte])?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
