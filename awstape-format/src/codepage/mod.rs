//! Byte-for-byte transliteration between ASCII and EBCDIC.
//!
//! Every input byte maps to exactly one output byte through a fixed 256-entry
//! table, so the engine carries no state between calls and output is always
//! the same length as the input.

mod stream;
mod tables;

use std::fmt;
use std::str::FromStr;

pub use self::stream::TransformWriter;
use self::tables::{ASCII_TO_EBCDIC_MAP, EBCDIC_TO_ASCII_MAP};
use crate::TransformError;

/// Translates ASCII to EBCDIC.
pub static ASCII_TO_EBCDIC: Transliterator = Transliterator::new(&ASCII_TO_EBCDIC_MAP);

/// Translates EBCDIC to ASCII.
pub static EBCDIC_TO_ASCII: Transliterator = Transliterator::new(&EBCDIC_TO_ASCII_MAP);

/// How far a successful [`Transformer::transform`] call got.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Progress {
    pub written: usize,
    pub consumed: usize,
}

/// A streaming byte transform working on caller-supplied buffers.
pub trait Transformer {
    /// Transform as much of `src` into `dst` as fits.
    ///
    /// `Ok` means all of `src` was consumed. If `dst` fills up first the call
    /// stops and returns [`TransformError::DestinationFull`] with the counts
    /// so far; drain `dst` and call again with the rest of `src`.
    fn transform(&self, dst: &mut [u8], src: &[u8], at_eof: bool)
        -> Result<Progress, TransformError>;

    /// Drop any state carried between calls.
    fn reset(&self) {}

    /// Run the whole of `src` through the transform into a new buffer.
    fn transform_bytes(&self, src: &[u8]) -> Result<Vec<u8>, TransformError> {
        let mut out = Vec::with_capacity(src.len());
        let mut scratch = [0u8; 4096];
        let mut rest = src;

        loop {
            match self.transform(&mut scratch, rest, true) {
                Ok(progress) => {
                    out.extend_from_slice(&scratch[..progress.written]);
                    return Ok(out);
                }
                Err(TransformError::DestinationFull { written, consumed }) => {
                    if written == 0 && consumed == 0 {
                        return Err(TransformError::DestinationFull { written, consumed });
                    }
                    out.extend_from_slice(&scratch[..written]);
                    rest = &rest[consumed..];
                }
            }
        }
    }
}

impl<T: Transformer + ?Sized> Transformer for &T {
    #[inline(always)]
    fn transform(
        &self,
        dst: &mut [u8],
        src: &[u8],
        at_eof: bool,
    ) -> Result<Progress, TransformError> {
        (**self).transform(dst, src, at_eof)
    }

    #[inline(always)]
    fn reset(&self) {
        (**self).reset()
    }
}

/// Table-driven single-byte substitution.
#[derive(Clone, Copy)]
pub struct Transliterator {
    table: &'static [u8; 256],
}

impl Transliterator {
    pub const fn new(table: &'static [u8; 256]) -> Transliterator {
        Transliterator { table }
    }

    #[inline(always)]
    pub fn map_byte(&self, byte: u8) -> u8 {
        self.table[byte as usize]
    }

    #[inline(always)]
    pub fn table(&self) -> &'static [u8; 256] {
        self.table
    }
}

impl Transformer for Transliterator {
    fn transform(
        &self,
        dst: &mut [u8],
        src: &[u8],
        _at_eof: bool,
    ) -> Result<Progress, TransformError> {
        let n = dst.len().min(src.len());

        for (d, s) in dst[..n].iter_mut().zip(&src[..n]) {
            *d = self.table[*s as usize];
        }

        if n < src.len() {
            Err(TransformError::DestinationFull {
                written: n,
                consumed: n,
            })
        } else {
            Ok(Progress {
                written: n,
                consumed: n,
            })
        }
    }
}

impl fmt::Debug for Transliterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if std::ptr::eq(self.table, &ASCII_TO_EBCDIC_MAP) {
            "ascii-to-ebcdic"
        } else if std::ptr::eq(self.table, &EBCDIC_TO_ASCII_MAP) {
            "ebcdic-to-ascii"
        } else {
            "custom"
        };
        f.debug_tuple("Transliterator").field(&name).finish()
    }
}

/// The two built-in conversions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Codepage {
    AsciiToEbcdic,
    EbcdicToAscii,
}

impl Codepage {
    pub const fn available_variants() -> &'static [&'static str] {
        &["a2e", "ascii-to-ebcdic", "e2a", "ebcdic-to-ascii"]
    }

    #[inline(always)]
    pub fn transliterator(self) -> &'static Transliterator {
        match self {
            Codepage::AsciiToEbcdic => &ASCII_TO_EBCDIC,
            Codepage::EbcdicToAscii => &EBCDIC_TO_ASCII,
        }
    }

    #[inline(always)]
    pub fn reverse(self) -> Codepage {
        match self {
            Codepage::AsciiToEbcdic => Codepage::EbcdicToAscii,
            Codepage::EbcdicToAscii => Codepage::AsciiToEbcdic,
        }
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Codepage::AsciiToEbcdic => "ascii-to-ebcdic",
            Codepage::EbcdicToAscii => "ebcdic-to-ascii",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown codepage conversion: {0}")]
pub struct ParseCodepageError(String);

impl FromStr for Codepage {
    type Err = ParseCodepageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a2e" | "ascii-to-ebcdic" => Ok(Codepage::AsciiToEbcdic),
            "e2a" | "ebcdic-to-ascii" => Ok(Codepage::EbcdicToAscii),
            _ => Err(ParseCodepageError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_BYTES: &[u8] = b"htape Transform test";
    const EBCDIC_BYTES: &[u8] = &[
        0x88, 0xa3, 0x81, 0x97, 0x85, 0x40, 0xe3, 0x99, 0x81, 0x95, 0xa2, 0x86, 0x96, 0x99, 0x94,
        0x40, 0xa3, 0x85, 0xa2, 0xa3,
    ];

    #[test]
    fn ascii_to_ebcdic() {
        let res = ASCII_TO_EBCDIC.transform_bytes(ASCII_BYTES).unwrap();
        assert_eq!(res, EBCDIC_BYTES);
    }

    #[test]
    fn ebcdic_to_ascii() {
        let res = EBCDIC_TO_ASCII.transform_bytes(EBCDIC_BYTES).unwrap();
        assert_eq!(res, ASCII_BYTES);
    }

    #[test]
    fn default_maps_identity() {
        for i in 0..=255u8 {
            let eb = ASCII_TO_EBCDIC.map_byte(i);
            let res = EBCDIC_TO_ASCII.map_byte(eb);

            // ASCII 0xb4 goes out as EBCDIC 0x15, which comes back as LF.
            let expected = if i == 0xb4 { 0x0a } else { i };
            assert_eq!(
                res, expected,
                "identity mapping failed for {:#04x} (EBCDIC: {:#04x})",
                i, eb
            );
        }
        assert_eq!(ASCII_TO_EBCDIC.map_byte(0xb4), 0x15);
        assert_eq!(EBCDIC_TO_ASCII.map_byte(0x15), 0x0a);
    }

    #[test]
    fn ascii_to_ebcdic_is_a_permutation() {
        let mut seen = [false; 256];
        for &b in ASCII_TO_EBCDIC.table().iter() {
            assert!(!seen[b as usize], "{:#04x} mapped twice", b);
            seen[b as usize] = true;
        }
    }

    #[test]
    fn destination_full_then_resume() {
        let mut dst = [0u8; 8];
        let err = ASCII_TO_EBCDIC
            .transform(&mut dst, ASCII_BYTES, true)
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::DestinationFull {
                written: 8,
                consumed: 8
            }
        );
        assert_eq!(&dst[..], &EBCDIC_BYTES[..8]);

        let mut rest = [0u8; 32];
        let progress = ASCII_TO_EBCDIC
            .transform(&mut rest, &ASCII_BYTES[8..], true)
            .unwrap();
        assert_eq!(progress.written, ASCII_BYTES.len() - 8);
        assert_eq!(progress.consumed, ASCII_BYTES.len() - 8);
        assert_eq!(&rest[..progress.written], &EBCDIC_BYTES[8..]);
    }

    #[test]
    fn at_eof_does_not_matter() {
        let mut a = [0u8; 20];
        let mut b = [0u8; 20];
        let pa = EBCDIC_TO_ASCII.transform(&mut a, EBCDIC_BYTES, false).unwrap();
        let pb = EBCDIC_TO_ASCII.transform(&mut b, EBCDIC_BYTES, true).unwrap();
        EBCDIC_TO_ASCII.reset();
        assert_eq!(pa, pb);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_source() {
        let progress = ASCII_TO_EBCDIC.transform(&mut [], &[], true).unwrap();
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn empty_destination() {
        let err = ASCII_TO_EBCDIC.transform(&mut [], b"x", true).unwrap_err();
        assert_eq!(
            err,
            TransformError::DestinationFull {
                written: 0,
                consumed: 0
            }
        );
    }

    #[test]
    fn long_input_crosses_scratch_buffer() {
        let src = (0..10_000u32).map(|x| (x % 256) as u8).collect::<Vec<_>>();
        let out = ASCII_TO_EBCDIC.transform_bytes(&src).unwrap();
        assert_eq!(out.len(), src.len());
        for (s, o) in src.iter().zip(&out) {
            assert_eq!(ASCII_TO_EBCDIC.map_byte(*s), *o);
        }
    }

    #[test]
    fn parse_codepage() {
        assert_eq!("a2e".parse::<Codepage>().unwrap(), Codepage::AsciiToEbcdic);
        assert_eq!(
            "ebcdic-to-ascii".parse::<Codepage>().unwrap(),
            Codepage::EbcdicToAscii
        );
        assert!("utf-8".parse::<Codepage>().is_err());
        for name in Codepage::available_variants() {
            assert!(name.parse::<Codepage>().is_ok(), "{} should parse", name);
        }
        assert_eq!(Codepage::AsciiToEbcdic.reverse(), Codepage::EbcdicToAscii);
        assert_eq!(Codepage::EbcdicToAscii.to_string(), "ebcdic-to-ascii");
    }

    #[test]
    fn codepage_picks_table() {
        let res = Codepage::AsciiToEbcdic
            .transliterator()
            .transform_bytes(b"A")
            .unwrap();
        assert_eq!(res, vec![0xc1]);
        assert_eq!(format!("{:?}", EBCDIC_TO_ASCII), "Transliterator(\"ebcdic-to-ascii\")");
    }
}
