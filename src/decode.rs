//! High-level decoding: turn a complete, ordered group of TPDU segments
//! (as produced by [`crate::collector::Collector`]) back into text.
//! Payload octets from every segment are concatenated into one continuous
//! stream before transcoding, rather than transcoding each segment
//! separately and joining strings, since a GSM-7 escape sequence or UCS-2
//! code unit can span a segment boundary (3GPP TS 23.040 §9.2.3.24.1).
use crate::charset::NationalLanguage;
use crate::error::{Cause, DecodeError};
use crate::gsm7;
use crate::tpdu::Tpdu;
use crate::userdata::{Alphabet, Dcs, UserData};

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    pub text: String,
    pub address: String,
    pub national_language: Option<NationalLanguage>,
}

fn address_and_ud(tpdu: &Tpdu) -> Result<(String, &UserData), DecodeError> {
    match tpdu {
        Tpdu::Submit(t) => Ok((t.destination_address.digits.clone(), &t.user_data)),
        Tpdu::Deliver(t) => Ok((t.originating_address.digits.clone(), &t.user_data)),
        _ => Err(DecodeError::new("tpdu", 0, Cause::InvalidHeader)),
    }
}

/// Decode a complete, sequence-ordered group of segments into one string.
/// All segments must share the same originating/destination address and
/// DCS alphabet; the first segment's
/// national-language IE, if any, governs transcoding for the whole group.
pub fn decode(segments: &[Tpdu]) -> Result<DecodedMessage, DecodeError> {
    if segments.is_empty() {
        return Err(DecodeError::new("segments", 0, Cause::Underflow));
    }
    let (address, first_ud) = address_and_ud(&segments[0])?;
    let dcs = dcs_of(&segments[0])?;
    for seg in &segments[1..] {
        let (addr, _) = address_and_ud(seg)?;
        if addr != address {
            return Err(DecodeError::new("address", 0, Cause::InvalidHeader));
        }
        if dcs_of(seg)?.alphabet != dcs.alphabet {
            return Err(DecodeError::new("dcs", 0, Cause::InvalidHeader));
        }
    }
    let national_language = first_ud.header.national_language().map(|(lang, _)| lang);
    let (locking, shift) = match first_ud.header.national_language() {
        Some((lang, true)) => (lang, NationalLanguage::Default),
        Some((lang, false)) => (NationalLanguage::Default, lang),
        None => (NationalLanguage::Default, NationalLanguage::Default),
    };
    let text = match dcs.alphabet {
        Alphabet::Gsm7 => {
            let mut septets = Vec::new();
            for seg in segments {
                let (_, ud) = address_and_ud(seg)?;
                septets.extend_from_slice(&ud.payload);
            }
            gsm7::decode(&septets, locking, shift, false)
                .map_err(|c| DecodeError::new("ud", 0, c))?
        }
        Alphabet::Ucs2 => {
            let mut bytes = Vec::new();
            for seg in segments {
                let (_, ud) = address_and_ud(seg)?;
                bytes.extend_from_slice(&ud.payload);
            }
            let ud = UserData { header: Default::default(), alphabet: Alphabet::Ucs2, payload: bytes };
            ud.decode_ucs2()?
        }
        Alphabet::EightBit => {
            let mut bytes = Vec::new();
            for seg in segments {
                let (_, ud) = address_and_ud(seg)?;
                bytes.extend_from_slice(&ud.payload);
            }
            let ud = UserData { header: Default::default(), alphabet: Alphabet::EightBit, payload: bytes };
            ud.decode_identity()
        }
    };
    Ok(DecodedMessage { text, address, national_language })
}

fn dcs_of(tpdu: &Tpdu) -> Result<Dcs, DecodeError> {
    match tpdu {
        Tpdu::Submit(t) => Ok(t.data_coding_scheme),
        Tpdu::Deliver(t) => Ok(t.data_coding_scheme),
        _ => Err(DecodeError::new("dcs", 0, Cause::InvalidHeader)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::encode::{encode, EncodeOptions};

    #[test]
    fn round_trips_a_single_segment_message() {
        let opt = EncodeOptions::new(Address::international("555"));
        let segments = encode("Hello world", &opt).unwrap();
        let decoded = decode(&segments).unwrap();
        assert_eq!(decoded.text, "Hello world");
        assert_eq!(decoded.address, "555");
    }

    #[test]
    fn round_trips_a_concatenated_message() {
        let text: String = (0..400).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        let opt = EncodeOptions::new(Address::international("555"));
        let segments = encode(&text, &opt).unwrap();
        assert!(segments.len() > 1);
        let decoded = decode(&segments).unwrap();
        assert_eq!(decoded.text, text);
    }

    #[test]
    fn round_trips_ucs2_message() {
        let opt = EncodeOptions::new(Address::international("555"));
        let segments = encode("日本語", &opt).unwrap();
        let decoded = decode(&segments).unwrap();
        assert_eq!(decoded.text, "日本語");
    }

    #[test]
    fn eight_bit_payload_decodes_through_identity_transform() {
        use crate::tpdu::{Submit, ValidityPeriod};
        use crate::udh::UserDataHeader;

        let tpdu = Tpdu::Submit(Submit {
            reject_duplicates: false,
            status_report_request: false,
            reply_path: false,
            message_reference: 1,
            destination_address: Address::international("555"),
            protocol_identifier: 0,
            data_coding_scheme: Dcs { alphabet: Alphabet::EightBit, message_class: None },
            validity_period: ValidityPeriod::NotPresent,
            user_data: UserData {
                header: UserDataHeader::default(),
                alphabet: Alphabet::EightBit,
                payload: vec![0x68, 0x69],
            },
        });
        let decoded = decode(&[tpdu]).unwrap();
        assert_eq!(decoded.text, "hi");
    }

    #[test]
    fn mismatched_addresses_are_rejected() {
        let opt_a = EncodeOptions::new(Address::international("111"));
        let opt_b = EncodeOptions::new(Address::international("222"));
        let a = encode("hi", &opt_a).unwrap().remove(0);
        let b = encode("there", &opt_b).unwrap().remove(0);
        let err = decode(&[a, b]).unwrap_err();
        assert_eq!(err.cause, Cause::InvalidHeader);
    }
}
