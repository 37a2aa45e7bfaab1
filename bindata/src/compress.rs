//! Compression applied to source bytes before they are written as a literal.
use std::{
    fmt,
    io::{self, Read, Write},
};

use flate2::write::GzEncoder;

use crate::{
    error::{Error, Result},
    writer::ByteWriter,
};

/// The default gzip level used by [`Compression::deflate`].
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

const CHUNK_SIZE: usize = 8 * 1024;

/// How the source bytes are transformed before they are embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Embed the bytes as they are.
    None,
    /// Embed a gzip stream; the accessor inflates it on first call.
    Deflate { level: u32 },
}

impl Default for Compression {
    fn default() -> Self {
        Self::deflate()
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("uncompressed"),
            Self::Deflate { level } => write!(f, "gzip level {level}"),
        }
    }
}

impl Compression {
    /// Gzip at [`DEFAULT_COMPRESSION_LEVEL`].
    #[must_use]
    pub const fn deflate() -> Self {
        Self::Deflate {
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Maps the boolean `compress` switch onto a strategy.
    #[must_use]
    pub const fn from_flag(compress: bool) -> Self {
        if compress { Self::deflate() } else { Self::None }
    }

    #[must_use]
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::Deflate { .. })
    }

    /// Drains `input` through this strategy into `output`.
    ///
    /// Returns the number of source bytes consumed.
    ///
    /// # Errors
    /// [`Error::SourceRead`] if `input` fails, [`Error::DestinationWrite`] if
    /// the writer behind `output` fails and [`Error::Compression`] if the
    /// encoder fails on its own.
    pub fn transform<R, W>(self, mut input: R, output: ByteWriter<W>) -> Result<(u64, ByteWriter<W>)>
    where
        R: Read,
        W: Write,
    {
        match self {
            Self::None => {
                let mut output = output;
                let consumed = pump(&mut input, &mut output, |w, e| classify(w, e))?;
                Ok((consumed, output))
            }
            Self::Deflate { level } => {
                let level = flate2::Compression::new(level.min(9));
                let mut encoder = GzEncoder::new(output, level);
                let consumed = pump(&mut input, &mut encoder, |enc, e| classify(enc.get_ref(), e))?;
                match encoder.try_finish() {
                    Ok(()) => {}
                    Err(e) => return Err(classify(encoder.get_ref(), e)),
                }
                let output = encoder.finish().map_err(Error::Compression)?;
                Ok((consumed, output))
            }
        }
    }
}

fn classify<W: Write>(writer: &ByteWriter<W>, err: io::Error) -> Error {
    if writer.sink_failed() {
        Error::DestinationWrite(err)
    } else {
        Error::Compression(err)
    }
}

/// Copies `input` into `output`, keeping read and write failures apart.
fn pump<R, W, F>(input: &mut R, output: &mut W, on_write_error: F) -> Result<u64>
where
    R: Read,
    W: Write,
    F: Fn(&W, io::Error) -> Error,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut consumed = 0u64;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::SourceRead(e)),
        };
        if let Err(e) = output.write_all(&buf[..n]) {
            return Err(on_write_error(&*output, e));
        }
        consumed += n as u64;
    }
    Ok(consumed)
}

/// Inflates gzip data that was compressed when the source was generated.
///
/// This function backs compressed generated accessors and the
/// [`embed!`](crate::embed) macro. It is not intended to be called directly
/// by user code.
///
/// # Panics
///
/// Panics if the provided data is not valid gzip data. Embedded data is
/// produced by this crate, so this indicates a corrupt binary or a bug.
#[doc(hidden)]
#[must_use]
pub fn decompress(compressed_data: &'static [u8]) -> Vec<u8> {
    let mut data = Vec::new();
    flate2::read::GzDecoder::new(compressed_data)
        .read_to_end(&mut data)
        .expect("BUG: bindata: failed to decompress embedded data. The binary is corrupt.");
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_tokens(text: &str) -> Vec<u8> {
        text.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| u8::from_str_radix(t.trim_start_matches("0x"), 16).unwrap())
            .collect()
    }

    #[test]
    fn none_is_passthrough() {
        let (n, out) = Compression::None
            .transform(&b"abc"[..], ByteWriter::new(Vec::new(), ""))
            .unwrap();
        assert_eq!(n, 3);
        let text = String::from_utf8(out.finish().unwrap()).unwrap();
        assert_eq!(parse_tokens(&text), b"abc");
    }

    #[test]
    fn deflate_round_trips_and_shrinks() {
        let input = vec![b'a'; 300];
        let (n, out) = Compression::deflate()
            .transform(&input[..], ByteWriter::new(Vec::new(), ""))
            .unwrap();
        assert_eq!(n, 300);
        assert!(out.written() < 300);

        let text = String::from_utf8(out.finish().unwrap()).unwrap();
        let compressed: &'static [u8] = Box::leak(parse_tokens(&text).into_boxed_slice());
        assert_eq!(decompress(compressed), input);
    }

    #[test]
    fn deflate_of_empty_input_is_valid_gzip() {
        let (_, out) = Compression::deflate()
            .transform(io::empty(), ByteWriter::new(Vec::new(), ""))
            .unwrap();
        let text = String::from_utf8(out.finish().unwrap()).unwrap();
        let compressed: &'static [u8] = Box::leak(parse_tokens(&text).into_boxed_slice());
        assert!(decompress(compressed).is_empty());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("unreadable"))
        }
    }

    #[test]
    fn read_failure_is_source_error() {
        for compression in [Compression::None, Compression::deflate()] {
            let err = compression
                .transform(FailingReader, ByteWriter::new(Vec::new(), ""))
                .unwrap_err();
            assert!(matches!(err, Error::SourceRead(_)), "{compression}: {err:?}");
        }
    }

    /// Accepts `remaining` bytes, then fails every write.
    #[derive(Debug)]
    struct Limited {
        remaining: usize,
    }

    impl Write for Limited {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("full"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Pseudo-random bytes that gzip cannot shrink much.
    fn noise(len: usize) -> Vec<u8> {
        let mut state = 0x2545_f491_u32;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect()
    }

    #[test]
    fn sink_failure_is_destination_error() {
        let input = noise(100 * 1024);
        for compression in [Compression::None, Compression::deflate()] {
            let err = compression
                .transform(&input[..], ByteWriter::new(Limited { remaining: 50 }, ""))
                .unwrap_err();
            assert!(matches!(err, Error::DestinationWrite(_)), "{compression}: {err:?}");
        }
    }

    #[test]
    fn sink_failure_through_translate() {
        let input = noise(100 * 1024);
        for compression in [Compression::None, Compression::deflate()] {
            // Enough room for the header, so the failure hits the literal.
            let err = crate::Request::new("assets", "noise")
                .compression(compression)
                .translate(&input[..], Limited { remaining: 1024 })
                .unwrap_err();
            assert!(matches!(err, Error::DestinationWrite(_)), "{compression}: {err:?}");
        }
    }

    #[test]
    #[should_panic(expected = "BUG: bindata")]
    fn corrupt_data_panics() {
        let _ = decompress(b"definitely not gzip");
    }

    #[test]
    fn flag_mapping() {
        assert_eq!(Compression::from_flag(false), Compression::None);
        assert!(Compression::from_flag(true).is_compressed());
    }
}
