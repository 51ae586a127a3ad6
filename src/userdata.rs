//! User Data codec: the DCS-driven choice between GSM-7, 8-bit, and UCS-2,
//! header-aware padding (3GPP TS 23.038 §4, TS 23.040 §9.2.3.24).
use crate::error::{Cause, DecodeError, EncodeError};
use crate::septet;
use crate::udh::UserDataHeader;
use encoding::all::{ISO_8859_1, UTF_16BE};
use encoding::{DecoderTrap, EncoderTrap, Encoding};

/// The alphabet a DCS byte selects.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Alphabet {
    Gsm7,
    EightBit,
    Ucs2,
}

/// Data Coding Scheme (3GPP TS 23.038 §4). Only the "general data coding"
/// group is interpreted structurally; any other coding group is treated as
/// 8-bit, the conservative fallback most modems apply to codings they don't
/// otherwise recognize.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dcs {
    pub alphabet: Alphabet,
    pub message_class: Option<u8>,
}

impl Dcs {
    pub fn gsm7() -> Self {
        Dcs { alphabet: Alphabet::Gsm7, message_class: None }
    }

    pub fn ucs2() -> Self {
        Dcs { alphabet: Alphabet::Ucs2, message_class: None }
    }

    pub fn as_u8(self) -> u8 {
        let alphabet_bits = match self.alphabet {
            Alphabet::Gsm7 => 0b00,
            Alphabet::EightBit => 0b01,
            Alphabet::Ucs2 => 0b10,
        };
        let mut b = alphabet_bits << 2;
        if let Some(class) = self.message_class {
            b |= 0b0001_0000 | (class & 0b11);
        }
        b
    }

    pub fn from_u8(b: u8) -> Self {
        if b & 0b1100_0000 != 0 {
            // Not the general data coding group (e.g. message waiting
            // indication groups): fall back to 8-bit, per the module doc.
            return Dcs { alphabet: Alphabet::EightBit, message_class: None };
        }
        let alphabet = match (b >> 2) & 0b11 {
            0b00 => Alphabet::Gsm7,
            0b01 => Alphabet::EightBit,
            0b10 => Alphabet::Ucs2,
            _ => Alphabet::EightBit,
        };
        let message_class = if b & 0b0001_0000 != 0 { Some(b & 0b11) } else { None };
        Dcs { alphabet, message_class }
    }
}

/// `payload` holds septets (one value per byte, top bit clear) for
/// [`Alphabet::Gsm7`], and raw octets otherwise — the wire's "ud"
/// field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub header: UserDataHeader,
    pub alphabet: Alphabet,
    pub payload: Vec<u8>,
}

impl UserData {
    /// GSM-7 fill bits needed so septet data starts on a septet boundary
    /// after `header_octets` raw header octets.
    fn gsm7_fill_bits(header_octets: usize) -> u8 {
        ((7 - (header_octets * 8) % 7) % 7) as u8
    }

    /// Encode to `(user_data_length, wire_bytes)`; `wire_bytes` excludes the
    /// UDL octet itself (the TPDU codec writes that separately, since its
    /// position relative to the validity period differs per variant).
    pub fn marshal(&self) -> Result<(u8, Vec<u8>), EncodeError> {
        let header_bytes = if self.header.is_empty() {
            Vec::new()
        } else {
            self.header.marshal()?
        };
        match self.alphabet {
            Alphabet::Gsm7 => {
                let fill_bits = Self::gsm7_fill_bits(header_bytes.len());
                let packed = if header_bytes.is_empty() {
                    septet::pack(&self.payload, 0)
                } else {
                    septet::pack(&self.payload, fill_bits)
                };
                let header_septet_equiv = if header_bytes.is_empty() {
                    0
                } else {
                    (header_bytes.len() * 8 + fill_bits as usize) / 7
                };
                let udl = header_septet_equiv + self.payload.len();
                if udl > 255 {
                    return Err(EncodeError::new("ud", Cause::InvalidInteger));
                }
                let mut wire = header_bytes;
                wire.extend_from_slice(&packed);
                Ok((udl as u8, wire))
            }
            Alphabet::EightBit => {
                let mut wire = header_bytes;
                wire.extend_from_slice(&self.payload);
                if wire.len() > 255 {
                    return Err(EncodeError::new("ud", Cause::InvalidInteger));
                }
                Ok((wire.len() as u8, wire))
            }
            Alphabet::Ucs2 => {
                let mut wire = header_bytes;
                wire.extend_from_slice(&self.payload);
                if wire.len() > 255 {
                    return Err(EncodeError::new("ud", Cause::InvalidInteger));
                }
                Ok((wire.len() as u8, wire))
            }
        }
    }

    /// Decode, given the UDL octet's value, whether the UDHI flag was set,
    /// the selected alphabet, and the remaining TPDU bytes starting at the
    /// user data field. Returns the decoded `UserData` and bytes consumed.
    pub fn unmarshal(
        udl: u8,
        udhi: bool,
        alphabet: Alphabet,
        src: &[u8],
        offset: usize,
    ) -> Result<(Self, usize), DecodeError> {
        let (header, header_octets) = if udhi {
            let (h, n) = UserDataHeader::unmarshal(src, offset)?;
            (h, n)
        } else {
            (UserDataHeader::default(), 0)
        };
        match alphabet {
            Alphabet::Gsm7 => {
                let fill_bits = Self::gsm7_fill_bits(header_octets);
                let header_septet_equiv = if header_octets == 0 {
                    0
                } else {
                    (header_octets * 8 + fill_bits as usize) / 7
                };
                let payload_septets = (udl as usize).saturating_sub(header_septet_equiv);
                let packed_region = &src[header_octets..];
                let needed_bits = fill_bits as usize + 7 * payload_septets;
                let needed_octets = (needed_bits + 7) / 8;
                if packed_region.len() < needed_octets {
                    return Err(DecodeError::new("ud", offset + header_octets, Cause::Underflow));
                }
                let unpacked = septet::unpack(&packed_region[..needed_octets], fill_bits);
                let payload = unpacked[..payload_septets.min(unpacked.len())].to_vec();
                Ok((
                    UserData { header, alphabet, payload },
                    header_octets + needed_octets,
                ))
            }
            Alphabet::EightBit | Alphabet::Ucs2 => {
                let payload_len = (udl as usize).saturating_sub(header_octets);
                let start = header_octets;
                let end = start + payload_len;
                if src.len() < end {
                    return Err(DecodeError::new("ud", offset + start, Cause::Underflow));
                }
                let payload = src[start..end].to_vec();
                Ok((UserData { header, alphabet, payload }, end))
            }
        }
    }

    /// Decode the payload as text, per `self.alphabet`. GSM-7 transcoding
    /// (locking/shift table selection) is the high-level decoder's job;
    /// this just does the identity/UCS-2 legs, since those don't depend on
    /// national-language selection.
    pub fn decode_ucs2(&self) -> Result<String, DecodeError> {
        UTF_16BE
            .decode(&self.payload, DecoderTrap::Strict)
            .map_err(|_| DecodeError::new("ud", 0, Cause::InvalidUtf8))
    }

    pub fn encode_ucs2(text: &str) -> Result<Vec<u8>, EncodeError> {
        UTF_16BE
            .encode(text, EncoderTrap::Strict)
            .map_err(|_| EncodeError::new("ud", Cause::InvalidUtf8))
    }

    /// Decode 8-bit user data through the identity transform: each octet is
    /// its own code point (3GPP TS 23.038 §4), since 8-bit data carries no
    /// text encoding of its own. This never fails — every byte value maps
    /// to a Latin-1 code point.
    pub fn decode_identity(&self) -> String {
        ISO_8859_1.decode(&self.payload, DecoderTrap::Strict).expect("ISO-8859-1 covers every byte")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dcs_gsm7_no_class_round_trips() {
        let dcs = Dcs::gsm7();
        assert_eq!(dcs.as_u8(), 0x00);
        assert_eq!(Dcs::from_u8(0x00), dcs);
    }

    #[test]
    fn dcs_ucs2_round_trips() {
        let dcs = Dcs::ucs2();
        assert_eq!(Dcs::from_u8(dcs.as_u8()).alphabet, Alphabet::Ucs2);
    }

    #[test]
    fn gsm7_without_header_round_trips() {
        let ud = UserData {
            header: UserDataHeader::default(),
            alphabet: Alphabet::Gsm7,
            payload: vec![0x48, 0x65, 0x6C, 0x6C, 0x6F], // "Hello"
        };
        let (udl, wire) = ud.marshal().unwrap();
        assert_eq!(udl, 5);
        assert_eq!(wire, vec![0xC8, 0x32, 0x9B, 0xFD, 0x06]);
        let (decoded, consumed) = UserData::unmarshal(udl, false, Alphabet::Gsm7, &wire, 0).unwrap();
        assert_eq!(consumed, wire.len());
        assert_eq!(decoded.payload, ud.payload);
    }

    #[test]
    fn gsm7_with_header_round_trips() {
        use crate::udh::{Concatenation, UserDataHeader};
        let header = UserDataHeader::concatenation(Concatenation {
            reference: 7,
            total: 2,
            sequence: 1,
            wide_reference: false,
        });
        let payload: Vec<u8> = (0..20).map(|i| (i * 3) % 0x80).collect();
        let ud = UserData { header, alphabet: Alphabet::Gsm7, payload: payload.clone() };
        let (udl, wire) = ud.marshal().unwrap();
        let (decoded, consumed) =
            UserData::unmarshal(udl, true, Alphabet::Gsm7, &wire, 0).unwrap();
        assert_eq!(consumed, wire.len());
        assert_eq!(decoded.payload, payload);
        assert_eq!(decoded.header, ud.header);
    }

    #[test]
    fn eight_bit_round_trips() {
        let ud = UserData {
            header: UserDataHeader::default(),
            alphabet: Alphabet::EightBit,
            payload: vec![1, 2, 3, 4, 5],
        };
        let (udl, wire) = ud.marshal().unwrap();
        assert_eq!(udl, 5);
        let (decoded, _) = UserData::unmarshal(udl, false, Alphabet::EightBit, &wire, 0).unwrap();
        assert_eq!(decoded.payload, ud.payload);
    }

    #[test]
    fn ucs2_text_round_trips() {
        let text = "héllo";
        let bytes = UserData::encode_ucs2(text).unwrap();
        let ud = UserData { header: UserDataHeader::default(), alphabet: Alphabet::Ucs2, payload: bytes };
        assert_eq!(ud.decode_ucs2().unwrap(), text);
    }
}
