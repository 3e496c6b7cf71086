//! Crockford base32 and hexadecimal codecs over the 16-byte ULID representation.

use crate::ParseError;

/// Crockford's base32 alphabet in the canonical (uppercase) form.
const BASE32_DIGITS: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Byte positions of the dashes in the 8-4-4-4-12 form.
const GUID_DASHES: [usize; 4] = [8, 13, 18, 23];

/// Sentinel marking a byte that is not a digit.
const NO_DIGIT: u8 = 0xff;

/// Maps ASCII bytes to base32 digit values, accepting lowercase letters and the `I`, `L`, and
/// `O` aliases.
const DECODE_BASE32: [u8; 256] = {
    let mut table = [NO_DIGIT; 256];
    let mut i = 0;
    while i < BASE32_DIGITS.len() {
        let c = BASE32_DIGITS[i];
        table[c as usize] = i as u8;
        table[c.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    table[b'I' as usize] = 1;
    table[b'i' as usize] = 1;
    table[b'L' as usize] = 1;
    table[b'l' as usize] = 1;
    table[b'O' as usize] = 0;
    table[b'o' as usize] = 0;
    table
};

/// Renders 128 bits as 26 base32 digits, the first of which carries the top three bits only.
pub(crate) const fn encode_base32(bytes: &[u8; 16]) -> [u8; 26] {
    let n = u128::from_be_bytes(*bytes);
    let mut buffer = [0u8; 26];
    let mut i = 0;
    while i < buffer.len() {
        buffer[i] = BASE32_DIGITS[((n >> (125 - 5 * i)) & 31) as usize];
        i += 1;
    }
    buffer
}

pub(crate) fn decode_base32(src: &str) -> Result<[u8; 16], ParseError> {
    let src = src.as_bytes();
    if src.len() != 26 {
        return Err(ParseError::InvalidLength(src.len()));
    }

    let mut n = 0u128;
    for (index, &c) in src.iter().enumerate() {
        let digit = DECODE_BASE32[c as usize];
        if digit == NO_DIGIT {
            return Err(ParseError::InvalidChar { index });
        }
        n = (n << 5) | digit as u128;
    }

    // checked after the alphabet so a junk first byte is reported as such
    if DECODE_BASE32[src[0] as usize] > 7 {
        return Err(ParseError::Overflow);
    }
    Ok(n.to_be_bytes())
}

/// Renders 16 bytes as 32 lowercase hex digits grouped 8-4-4-4-12.
pub(crate) fn encode_hex(bytes: &[u8; 16]) -> [u8; 36] {
    let mut buffer = [0u8; 36];
    let mut buf_iter = buffer.iter_mut();
    for (i, &e) in bytes.iter().enumerate() {
        let e = e as usize;
        if let Some(b) = buf_iter.next() {
            *b = HEX_DIGITS[e >> 4];
        }
        if let Some(b) = buf_iter.next() {
            *b = HEX_DIGITS[e & 15];
        }
        if i == 3 || i == 5 || i == 7 || i == 9 {
            if let Some(b) = buf_iter.next() {
                *b = b'-';
            }
        }
    }
    buffer
}

/// Parses the dashed 8-4-4-4-12 form or the bare 32-digit form, in either case.
pub(crate) fn decode_hex(src: &str) -> Result<[u8; 16], ParseError> {
    let src = src.as_bytes();
    let dashed = match src.len() {
        36 => true,
        32 => false,
        len => return Err(ParseError::InvalidLength(len)),
    };

    let mut dst = [0u8; 16];
    let mut nibbles = 0;
    for (index, &c) in src.iter().enumerate() {
        if dashed && GUID_DASHES.contains(&index) {
            if c != b'-' {
                return Err(ParseError::InvalidSeparator { index });
            }
            continue;
        }

        let digit = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            b'-' => return Err(ParseError::InvalidSeparator { index }),
            _ => return Err(ParseError::InvalidChar { index }),
        };
        dst[nibbles / 2] |= digit << (4 * (1 - nibbles % 2));
        nibbles += 1;
    }
    debug_assert_eq!(nibbles, 32);
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::{decode_base32, decode_hex, encode_base32, encode_hex};
    use crate::ParseError;

    /// Decodes relaxed Crockford aliases and lowercase letters
    #[test]
    fn decodes_relaxed_crockford_aliases_and_lowercase_letters() {
        let canonical = decode_base32("01ARYZ6S4128T5CY4GNF6YY093").unwrap();
        assert_eq!(decode_base32("01aryz6s4128t5cy4gnf6yy093"), Ok(canonical));
        assert_eq!(decode_base32("O1ARYZ6S4I28T5CY4GNF6YYO93"), Ok(canonical));
        assert_eq!(decode_base32("oLaryz6s4l28t5cy4gnf6yyo93"), Ok(canonical));
    }

    /// Reports the offending index of an invalid digit
    #[test]
    fn reports_the_offending_index_of_an_invalid_digit() {
        assert_eq!(
            decode_base32("01ARYZ6S4128T5CY4GNF6YY09U"),
            Err(ParseError::InvalidChar { index: 25 })
        );
        assert_eq!(
            decode_base32("U1ARYZ6S4128T5CY4GNF6YY093"),
            Err(ParseError::InvalidChar { index: 0 })
        );
        assert_eq!(
            decode_base32("01ARYZ6S4128T5-Y4GNF6YY093"),
            Err(ParseError::InvalidChar { index: 14 })
        );
    }

    /// Rejects leading digits that overflow 128 bits
    #[test]
    fn rejects_leading_digits_that_overflow_128_bits() {
        assert!(decode_base32("7ZZZZZZZZZZZZZZZZZZZZZZZZZ").is_ok());
        for lead in ["8", "9", "A", "Z", "z"] {
            let text = format!("{}0000000000000000000000000", lead);
            assert_eq!(decode_base32(&text), Err(ParseError::Overflow));
        }
    }

    /// Rejects multi-byte characters by byte length
    #[test]
    fn rejects_multi_byte_characters_by_byte_length() {
        assert_eq!(
            decode_base32("01ARYZ6S4128T5CY4GNF6YY09\u{00e9}"),
            Err(ParseError::InvalidLength(27))
        );
        assert_eq!(
            decode_base32("01ARYZ6S4128T5CY4GNF6YY0\u{00e9}"),
            Err(ParseError::InvalidChar { index: 24 })
        );
    }

    /// Keeps the first base32 digit below eight
    #[test]
    fn keeps_the_first_base32_digit_below_eight() {
        assert_eq!(encode_base32(&[0xff; 16])[0], b'7');
        assert_eq!(encode_base32(&[0x1f; 16])[0], b'0');
        assert_eq!(encode_base32(&[0x20; 16])[0], b'1');
    }

    /// Encodes hex groups at fixed dash positions
    #[test]
    fn encodes_hex_groups_at_fixed_dash_positions() {
        assert_eq!(
            &encode_hex(&[0xab; 16]),
            b"abababab-abab-abab-abab-abababababab"
        );

        let bytes: [u8; 16] = core::array::from_fn(|i| i as u8);
        let mut nibbles = 0;
        for (i, &c) in encode_hex(&bytes).iter().enumerate() {
            if [8, 13, 18, 23].contains(&i) {
                assert_eq!(c, b'-', "index {}", i);
            } else {
                let e = bytes[nibbles / 2] >> (4 * (1 - nibbles % 2)) & 15;
                assert_eq!(c, b"0123456789abcdef"[e as usize], "index {}", i);
                nibbles += 1;
            }
        }
        assert_eq!(nibbles, 32);
    }

    /// Rejects malformed GUID strings with specific errors
    #[test]
    fn rejects_malformed_guid_strings_with_specific_errors() {
        assert_eq!(
            decode_hex("01563df3-6481-1234-5678-90abcdef012"),
            Err(ParseError::InvalidLength(35))
        );
        assert_eq!(
            decode_hex("01563df36-481-1234-5678-90abcdef0123"),
            Err(ParseError::InvalidSeparator { index: 8 })
        );
        assert_eq!(
            decode_hex("01563df3-6481-1234-5678_90abcdef0123"),
            Err(ParseError::InvalidSeparator { index: 23 })
        );
        assert_eq!(
            decode_hex("01563df3-6481-1234-5678-90abcdef012g"),
            Err(ParseError::InvalidChar { index: 35 })
        );
        assert_eq!(
            decode_hex("01563df3648112345678-0abcdef0123"),
            Err(ParseError::InvalidSeparator { index: 20 })
        );
    }
}
