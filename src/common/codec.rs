use std::cmp::min;

use super::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    /// Most compact mode able to represent every byte of the data
    pub fn classify(data: &[u8]) -> Self {
        if !data.is_empty() && data.iter().all(|&b| Self::Numeric.contains(b)) {
            Self::Numeric
        } else if data.iter().all(|&b| Self::Alphanumeric.contains(b)) {
            Self::Alphanumeric
        } else {
            Self::Byte
        }
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        ALPHANUMERIC_CHARS.iter().position(|&c| c == char).unwrap_or_default() as u16
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => ALPHANUMERIC_CHARS.contains(&byte),
            Self::Byte => true,
        }
    }

    /// Bit length of the payload once encoded in this mode
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10 + 2) / 3,
            Self::Alphanumeric => (len * 11 + 1) / 2,
            Self::Byte => len * 8,
        }
    }
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::Mode::{self, *};

    #[test_case(b"0123456789", Numeric)]
    #[test_case(b"HELLO WORLD", Alphanumeric)]
    #[test_case(b"$%*+-./: 42", Alphanumeric)]
    #[test_case(b"Hello, world!", Byte)]
    #[test_case(b"https://example.com", Byte)]
    #[test_case(b"HTTPS://EXAMPLE.COM", Alphanumeric)]
    #[test_case("\u{1f30e}".as_bytes(), Byte)]
    fn test_classify(data: &[u8], exp: Mode) {
        assert_eq!(Mode::classify(data), exp);
    }

    #[test]
    fn test_numeric_encoding() {
        assert_eq!(Numeric.encode_chunk(b"012"), 12);
        assert_eq!(Numeric.encode_chunk(b"67"), 67);
        assert_eq!(Numeric.encode_chunk(b"8"), 8);
    }

    #[test]
    fn test_alphanumeric_encoding() {
        assert_eq!(Alphanumeric.encode_chunk(b"HE"), 17 * 45 + 14);
        assert_eq!(Alphanumeric.encode_chunk(b"::"), 44 * 45 + 44);
        assert_eq!(Alphanumeric.encode_chunk(b"D"), 13);
    }

    #[test]
    fn test_byte_encoding() {
        assert_eq!(Byte.encode_chunk(b"a"), 97);
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Numeric.encoded_len(3), 10);
        assert_eq!(Numeric.encoded_len(4), 14);
        assert_eq!(Numeric.encoded_len(5), 17);
        assert_eq!(Alphanumeric.encoded_len(2), 11);
        assert_eq!(Alphanumeric.encoded_len(3), 17);
        assert_eq!(Byte.encoded_len(3), 24);
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Encodes the data in its most compact mode into the smallest version that
/// fits, padded to the full data capacity
pub fn encode(data: &[u8], ec_level: ECLevel) -> QRResult<(BitStream, Version)> {
    let mode = Mode::classify(data);
    let version = find_version(data.len(), mode, ec_level)?;
    let encoded = encode_with_version(data, ec_level, version)?;
    Ok((encoded, version))
}

pub fn encode_with_version(data: &[u8], ec_level: ECLevel, version: Version) -> QRResult<BitStream> {
    let mode = Mode::classify(data);
    if data.len() > version.char_capacity(ec_level, mode) {
        return Err(QRError::CapacityOverflow);
    }

    let bit_capacity = version.data_bit_capacity(ec_level);
    let mut bs = BitStream::new(bit_capacity);
    push_header(&mut bs, version, mode, data.len());
    match mode {
        Mode::Numeric => push_numeric_data(&mut bs, data),
        Mode::Alphanumeric => push_alphanumeric_data(&mut bs, data),
        Mode::Byte => push_byte_data(&mut bs, data),
    }
    push_terminator(&mut bs);
    push_padding_bits(&mut bs);
    push_padding_codewords(&mut bs);

    assert_eq!(
        bs.len(),
        bit_capacity,
        "Encoded length doesn't match data capacity of version {version} {ec_level:?}"
    );

    Ok(bs)
}

pub fn find_version(len: usize, mode: Mode, ec_level: ECLevel) -> QRResult<Version> {
    Version::all().find(|v| len <= v.char_capacity(ec_level, mode)).ok_or(QRError::DataTooLong)
}

fn push_header(bs: &mut BitStream, version: Version, mode: Mode, char_count: usize) {
    bs.push_bits(mode as u16, version.mode_len());
    let char_count_bit_len = version.char_count_bit_len(mode);
    debug_assert!(char_count < (1 << char_count_bit_len), "Char count exceeds bit length");
    bs.push_bits(char_count as u16, char_count_bit_len);
}

fn push_numeric_data(bs: &mut BitStream, data: &[u8]) {
    for chunk in data.chunks(3) {
        let len = Mode::Numeric.encoded_len(chunk.len());
        bs.push_bits(Mode::Numeric.encode_chunk(chunk), len);
    }
}

fn push_alphanumeric_data(bs: &mut BitStream, data: &[u8]) {
    for chunk in data.chunks(2) {
        let len = Mode::Alphanumeric.encoded_len(chunk.len());
        bs.push_bits(Mode::Alphanumeric.encode_chunk(chunk), len);
    }
}

fn push_byte_data(bs: &mut BitStream, data: &[u8]) {
    bs.extend(data);
}

fn push_terminator(bs: &mut BitStream) {
    let term_len = min(4, bs.capacity() - bs.len());
    bs.push_bits(0, term_len);
}

fn push_padding_bits(bs: &mut BitStream) {
    let offset = bs.len() & 7;
    if offset > 0 {
        bs.push_bits(0, 8 - offset);
    }
}

fn push_padding_codewords(bs: &mut BitStream) {
    debug_assert!(bs.len() & 7 == 0, "Stream should be byte aligned before padding codewords");

    let remain_byte_capacity = (bs.capacity() - bs.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        bs.push_bits(pc as u16, 8);
    });
}

#[cfg(test)]
mod encode_tests {
    use super::{encode, encode_with_version, find_version, Mode};
    use crate::common::{
        error::QRError,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_encode_alphanumeric() {
        let (bs, ver) = encode(b"HELLO WORLD", ECLevel::M).unwrap();
        assert_eq!(ver, Version(1));
        assert_eq!(
            bs.data(),
            &[32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17]
        );
    }

    #[test]
    fn test_encode_numeric() {
        let bs = encode_with_version(b"01234567", ECLevel::M, Version(1)).unwrap();
        assert_eq!(&bs.data()[..5], &[0b0001_0000, 0b0010_0000, 0b0000_1100, 0b0101_0110, 0b0110_0001]);
        assert_eq!(bs.data()[5], 0b1000_0000);
        assert_eq!(&bs.data()[6..8], &[0xEC, 0x11]);
    }

    #[test]
    fn test_encode_byte() {
        let (bs, ver) = encode(b"https://example.com", ECLevel::M).unwrap();
        assert_eq!(ver, Version(2));
        assert_eq!(bs.len(), 28 * 8);
        // Mode 0100, count 00010011, then 'h' = 0x68
        assert_eq!(&bs.data()[..3], &[0b0100_0001, 0b0011_0110, 0b1000_0111]);
    }

    #[test]
    fn test_terminator_truncated_at_capacity() {
        // 17 bytes fill v1-L to 4 + 8 + 136 = 148 of 152 bits, leaving room for the full terminator
        let bs = encode_with_version(&[b'a'; 17], ECLevel::L, Version(1)).unwrap();
        assert_eq!(bs.len(), 152);
        assert_eq!(*bs.data().last().unwrap(), 0b0001_0000);

        // 41 digits take 4 + 10 + 137 = 151 bits, leaving one terminator bit
        let bs = encode_with_version(&[b'9'; 41], ECLevel::L, Version(1)).unwrap();
        assert_eq!(bs.len(), 152);
    }

    #[test]
    fn test_find_version() {
        assert_eq!(find_version(14, Mode::Byte, ECLevel::M), Ok(Version(1)));
        assert_eq!(find_version(15, Mode::Byte, ECLevel::M), Ok(Version(2)));
        assert_eq!(find_version(2331, Mode::Byte, ECLevel::M), Ok(Version(40)));
        assert_eq!(find_version(2332, Mode::Byte, ECLevel::M), Err(QRError::DataTooLong));
        assert_eq!(find_version(7089, Mode::Numeric, ECLevel::L), Ok(Version(40)));
        assert_eq!(find_version(3058, Mode::Numeric, ECLevel::H), Err(QRError::DataTooLong));
    }

    #[test]
    fn test_encode_with_version_overflow() {
        let res = encode_with_version(&[b'a'; 15], ECLevel::M, Version(1));
        assert_eq!(res, Err(QRError::CapacityOverflow));
    }

    #[test]
    fn test_pad_codewords_alternate() {
        let bs = encode_with_version(b"1", ECLevel::L, Version(1)).unwrap();
        let data = bs.data();
        assert_eq!(data.len(), 19);
        for (i, &b) in data[3..].iter().enumerate() {
            assert_eq!(b, if i % 2 == 0 { 0xEC } else { 0x11 });
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

pub static ALPHANUMERIC_CHARS: [u8; 45] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
