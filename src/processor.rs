//! Compress and decompress entry points.

use std::io::Cursor;

use tracing::{debug, info};

use crate::bitio::{BitReader, BitSink, BitSource, BitWriter};
use crate::codes::{BitPath, CodeTable};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::header::{read_header, write_header};
use crate::transcode::{decode_body, encode_body};
use crate::tree::HuffmanTree;
use crate::{BITS_PER_INT, HUFF_TREE};

/// Drives the full pipeline in both directions.
///
/// Each call builds its own frequency table, tree and code table; nothing
/// is shared between calls.
#[derive(Clone, Debug, Default)]
pub struct HuffProcessor {
    config: Config,
}

impl HuffProcessor {
    /// Create a processor with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this processor was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compress all of `source` into `sink`.
    ///
    /// Reads the source twice: once to count, then again after a reset to
    /// encode. The sink is closed whether or not compression succeeds.
    /// Returns the number of input bytes.
    pub fn compress<R: BitSource, W: BitSink>(&self, mut source: R, mut sink: W) -> Result<u64> {
        let result = self.compress_inner(&mut source, &mut sink);
        let closed = sink.close();
        let n = result?;
        closed?;
        Ok(n)
    }

    fn compress_inner<R: BitSource, W: BitSink>(
        &self,
        source: &mut R,
        sink: &mut W,
    ) -> Result<u64> {
        let freqs = FrequencyTable::from_source(source)?;
        let tree = HuffmanTree::from_frequencies(&freqs);
        let codes = CodeTable::from_tree(&tree);
        debug!(
            input_bytes = freqs.total() - 1,
            symbols = codes.len(),
            "built code table"
        );
        self.log_codes(&codes);

        sink.write_bits(BITS_PER_INT, HUFF_TREE)?;
        write_header(&tree, sink)?;

        source.reset()?;
        let n = encode_body(&codes, source, sink)?;
        debug!(bytes = n, "encoded body");
        Ok(n)
    }

    /// Decompress `source` into `sink`.
    ///
    /// The sink is closed whether or not decompression succeeds; on error
    /// its contents must not be trusted. Returns the number of bytes written.
    ///
    /// # Errors
    /// - [`Error::BadHeaderMagic`] if the stream does not start with
    ///   [`HUFF_TREE`]. Nothing past the magic is read.
    /// - [`Error::HeaderTruncated`] if the stream ends in the magic or header.
    /// - [`Error::MissingSentinel`] if the body ends before end-of-stream.
    /// - [`Error::MalformedHeader`] for headers no compressor would write.
    pub fn decompress<R: BitSource, W: BitSink>(&self, mut source: R, mut sink: W) -> Result<u64> {
        let result = self.decompress_inner(&mut source, &mut sink);
        let closed = sink.close();
        let n = result?;
        closed?;
        Ok(n)
    }

    fn decompress_inner<R: BitSource, W: BitSink>(
        &self,
        source: &mut R,
        sink: &mut W,
    ) -> Result<u64> {
        let magic = source
            .read_bits(BITS_PER_INT)?
            .ok_or(Error::HeaderTruncated)?;
        if magic != HUFF_TREE {
            return Err(Error::BadHeaderMagic { found: magic });
        }

        let tree = read_header(source)?;
        debug!(symbols = tree.leaf_count(), "read tree header");
        if self.config.log_encodings() {
            self.log_codes(&CodeTable::from_tree(&tree));
        }

        let n = decode_body(&tree, source, sink)?;
        debug!(bytes = n, "decoded body");
        Ok(n)
    }

    fn log_codes(&self, codes: &CodeTable) {
        if !self.config.log_encodings() {
            return;
        }
        for (symbol, path) in codes.iter() {
            info!(symbol, code = %BitPath(path), "encoding");
        }
    }
}

/// Compress an in-memory buffer with the default configuration.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    HuffProcessor::default()
        .compress(BitReader::new(Cursor::new(data)), BitWriter::new(&mut out))?;
    Ok(out)
}

/// Decompress an in-memory buffer with the default configuration.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    HuffProcessor::default()
        .decompress(BitReader::new(Cursor::new(data)), BitWriter::new(&mut out))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use std::io;

    /// Source over a fixed list of bit groups that counts reads.
    struct Scripted {
        groups: Vec<u32>,
        pos: usize,
        reads: usize,
    }

    impl BitSource for Scripted {
        fn read_bits(&mut self, _n: u32) -> io::Result<Option<u32>> {
            self.reads += 1;
            let v = self.groups.get(self.pos).copied();
            self.pos += 1;
            Ok(v)
        }

        fn reset(&mut self) -> io::Result<()> {
            self.pos = 0;
            Ok(())
        }
    }

    /// Sink that only records whether it was closed.
    #[derive(Default)]
    struct Recording {
        bits: u64,
        closed: bool,
    }

    impl BitSink for Recording {
        fn write_bits(&mut self, n: u32, _value: u32) -> io::Result<()> {
            self.bits += u64::from(n);
            Ok(())
        }

        fn close(&mut self) -> io::Result<()> {
            self.closed = true;
            Ok(())
        }
    }

    #[test]
    fn test_small_roundtrip() {
        let data = [65u8, 65, 66, 65];
        let packed = compress_bytes(&data).unwrap();
        // 32 magic + 33 header + 7 body = 72 bits
        assert_eq!(packed.len(), 9);
        assert_eq!(&packed[..4], &HUFF_TREE.to_be_bytes());
        assert_eq!(decompress_bytes(&packed).unwrap(), data);
    }

    #[test]
    fn test_empty_roundtrip() {
        let packed = compress_bytes(&[]).unwrap();
        // 32 magic + 10 header, padded
        assert_eq!(packed.len(), 6);
        assert_eq!(decompress_bytes(&packed).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_bad_magic_stops_reading() {
        let mut source = Scripted {
            groups: vec![0xdead_beef, 0, 1, 2, 3],
            pos: 0,
            reads: 0,
        };
        let mut sink = Recording::default();
        let err = HuffProcessor::default()
            .decompress(&mut source, &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::BadHeaderMagic { found: 0xdead_beef }));
        assert_eq!(source.reads, 1);
        assert_eq!(sink.bits, 0);
        assert!(sink.closed);
    }

    #[test]
    fn test_short_stream_is_truncated_header() {
        let err = decompress_bytes(&[0xfa, 0xce]).unwrap_err();
        assert!(matches!(err, Error::HeaderTruncated));
    }

    #[test]
    fn test_sink_closed_on_body_error() {
        let packed = compress_bytes(b"some text to chop").unwrap();
        let cut = &packed[..packed.len() - 1];
        let mut sink = Recording::default();
        let err = HuffProcessor::default()
            .decompress(BitReader::new(Cursor::new(cut)), &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::MissingSentinel));
        assert!(sink.closed);
    }

    #[test]
    fn test_compress_closes_sink() {
        let mut sink = Recording::default();
        let n = HuffProcessor::new(Config::new().with_verbosity(Verbosity::Encodings))
            .compress(BitReader::new(Cursor::new(&b"abc"[..])), &mut sink)
            .unwrap();
        assert_eq!(n, 3);
        assert!(sink.closed);
        assert!(sink.bits > 32);
    }

    #[test]
    fn test_output_is_deterministic() {
        let data = b"abracadabra, alakazam";
        assert_eq!(compress_bytes(data).unwrap(), compress_bytes(data).unwrap());
    }
}
