//! Semi-octet packing for dial digits (3GPP TS 23.040 §9.1.2.3): pairs of
//! digits pack little-endian (first character in the low nibble), with a
//! trailing `0xF` filling an odd-length digit string.
use crate::error::Cause;

const ALPHABET: &[u8] = b"0123456789*#abc";
const FILL: u8 = 0x0F;

fn digit_value(b: u8) -> Result<u8, Cause> {
    ALPHABET
        .iter()
        .position(|&a| a == b)
        .map(|p| p as u8)
        .ok_or(Cause::InvalidDigit)
}

fn value_digit(v: u8) -> u8 {
    ALPHABET[v as usize]
}

/// Pack a dial-digit string into semi-octets. Appends an `0xF`-filled high
/// nibble if `src` has an odd length.
pub fn encode(src: &[u8]) -> Result<Vec<u8>, Cause> {
    let mut out = Vec::with_capacity((src.len() + 1) / 2);
    let mut chunks = src.chunks(2);
    for chunk in &mut chunks {
        let low = digit_value(chunk[0])?;
        let high = if chunk.len() == 2 { digit_value(chunk[1])? } else { FILL };
        out.push(low | (high << 4));
    }
    Ok(out)
}

/// Decode up to `dst_len` digits from `src`, reading `ceil(dst_len / 2)`
/// source octets. An intra-stream `F` nibble is skipped; when `dst_len` is
/// odd the final source octet's high nibble must be the `0xF` pad.
///
/// Returns the decoded digits and the number of source octets consumed.
pub fn decode(src: &[u8], dst_len: usize) -> Result<(Vec<u8>, usize), Cause> {
    let n_octets = (dst_len + 1) / 2;
    if src.len() < n_octets {
        return Err(Cause::Underflow);
    }
    let mut out = Vec::with_capacity(dst_len);
    for (i, &octet) in src[..n_octets].iter().enumerate() {
        let low = octet & 0x0F;
        let high = (octet >> 4) & 0x0F;
        let is_last_octet = i + 1 == n_octets;
        let odd_tail = is_last_octet && dst_len % 2 == 1;

        if low != FILL {
            out.push(value_digit(digit_in_range(low)?));
        }
        if odd_tail {
            if high != FILL {
                return Err(Cause::InvalidDigit);
            }
        } else if high != FILL {
            out.push(value_digit(digit_in_range(high)?));
        }
    }
    Ok((out, n_octets))
}

fn digit_in_range(v: u8) -> Result<u8, Cause> {
    if (v as usize) < ALPHABET.len() {
        Ok(v)
    } else {
        Err(Cause::InvalidDigit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_even_length() {
        let s = b"123456";
        let packed = encode(s).unwrap();
        let (digits, read) = decode(&packed, s.len()).unwrap();
        assert_eq!(digits, s);
        assert_eq!(read, packed.len());
    }

    #[test]
    fn round_trips_odd_length_with_trailing_fill() {
        let s = b"12345";
        let packed = encode(s).unwrap();
        assert_eq!(*packed.last().unwrap() >> 4, 0xF);
        let (digits, _) = decode(&packed, s.len()).unwrap();
        assert_eq!(digits, s);
    }

    #[test]
    fn rejects_non_alphabet_bytes() {
        assert_eq!(encode(b"12x4"), Err(Cause::InvalidDigit));
    }

    #[test]
    fn missing_fill_is_rejected() {
        // odd dst_len=1 but high nibble isn't 0xF
        assert_eq!(decode(&[0x21], 1), Err(Cause::InvalidDigit));
    }

    #[test]
    fn star_hash_and_letters_round_trip() {
        let s = b"*#abc1";
        let packed = encode(s).unwrap();
        let (digits, _) = decode(&packed, s.len()).unwrap();
        assert_eq!(digits, s);
    }
}
