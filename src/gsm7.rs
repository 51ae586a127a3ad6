//! GSM 7-bit alphabet transcoder: UTF-8 <-> unpacked septets, parameterized
//! by a `(locking, shift)` table pair and a strict/lenient mode. Lenient
//! mode substitutes the replacement character for codepoints missing from
//! both tables; strict mode rejects them.
use crate::charset::NationalLanguage;
use crate::error::Cause;

const ESCAPE: u8 = 0x1B;

/// Decode unpacked septets into a `String`, using `locking` for the base
/// table and `shift` for characters following an escape (`0x1B`).
///
/// A dangling escape at end-of-input decodes to space. Double escape
/// (`1B 1B`) decodes to space. In `strict` mode, a septet (or shifted
/// septet) absent from the active table is an error instead of decoding to
/// space.
pub fn decode(
    septets: &[u8],
    locking: NationalLanguage,
    shift: NationalLanguage,
    strict: bool,
) -> Result<String, Cause> {
    let locking_table = locking.locking();
    let shift_table = shift.shift();
    let mut out = String::with_capacity(septets.len());
    let mut i = 0;
    while i < septets.len() {
        let s = septets[i];
        if s == ESCAPE {
            match septets.get(i + 1) {
                None => {
                    out.push(' ');
                    i += 1;
                }
                Some(&ESCAPE) => {
                    out.push(' ');
                    i += 2;
                }
                Some(&next) => {
                    match shift_table.decode(next) {
                        Some(ch) => out.push(ch),
                        None if strict => return Err(Cause::InvalidSeptet),
                        None => out.push(' '),
                    }
                    i += 2;
                }
            }
        } else {
            match locking_table.decode(s) {
                Some(ch) => out.push(ch),
                None if strict => return Err(Cause::InvalidSeptet),
                None => out.push(' '),
            }
            i += 1;
        }
    }
    Ok(out)
}

/// Encode a `str` into unpacked septets. Every code point must be present
/// in either `locking` or `shift`; a code point representable in neither
/// fails with [`Cause::InvalidUtf8`] (this function never downgrades
/// characters to a lossy approximation).
pub fn encode(
    text: &str,
    locking: NationalLanguage,
    shift: NationalLanguage,
) -> Result<Vec<u8>, Cause> {
    let locking_table = locking.locking();
    let shift_table = shift.shift();
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if let Some(s) = locking_table.encode(ch) {
            out.push(s);
        } else if let Some(s) = shift_table.encode(ch) {
            out.push(ESCAPE);
            out.push(s);
        } else {
            return Err(Cause::InvalidUtf8);
        }
    }
    Ok(out)
}

/// `true` iff every code point in `text` encodes under the Default
/// locking/shift pair — the test the high-level encoder's `alphabet = auto`
/// option uses to decide GSM-7 vs UCS-2.
pub fn fits_default_alphabet(text: &str) -> bool {
    encode(text, NationalLanguage::Default, NationalLanguage::Default).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_ascii() {
        let s = "Hello, World! 123";
        let enc = encode(s, NationalLanguage::Default, NationalLanguage::Default).unwrap();
        let dec = decode(&enc, NationalLanguage::Default, NationalLanguage::Default, true).unwrap();
        assert_eq!(dec, s);
    }

    #[test]
    fn round_trips_shifted_characters() {
        let s = "100\u{20AC} [test]";
        let enc = encode(s, NationalLanguage::Default, NationalLanguage::Default).unwrap();
        let dec = decode(&enc, NationalLanguage::Default, NationalLanguage::Default, true).unwrap();
        assert_eq!(dec, s);
    }

    #[test]
    fn dangling_escape_decodes_to_space() {
        let dec = decode(&[ESCAPE], NationalLanguage::Default, NationalLanguage::Default, true).unwrap();
        assert_eq!(dec, " ");
    }

    #[test]
    fn double_escape_decodes_to_space() {
        let dec = decode(&[ESCAPE, ESCAPE], NationalLanguage::Default, NationalLanguage::Default, true).unwrap();
        assert_eq!(dec, " ");
    }

    #[test]
    fn strict_mode_rejects_unmapped_septet() {
        // 0x1B followed by a value absent from the shift table
        let err = decode(&[ESCAPE, 0x00], NationalLanguage::Default, NationalLanguage::Default, true);
        assert_eq!(err, Err(Cause::InvalidSeptet));
    }

    #[test]
    fn lenient_mode_substitutes_space() {
        let dec = decode(&[ESCAPE, 0x00], NationalLanguage::Default, NationalLanguage::Default, false).unwrap();
        assert_eq!(dec, " ");
    }

    #[test]
    fn encode_never_fails_on_representable_text_but_rejects_others() {
        assert!(fits_default_alphabet("Hello world"));
        assert!(!fits_default_alphabet("日本語"));
    }
}
