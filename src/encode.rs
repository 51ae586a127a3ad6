//! High-level message encoding: turn a `str` into one or more [`Submit`] or
//! [`Deliver`] TPDUs, auto-selecting the alphabet and splitting into a
//! concatenated SMS when the text overruns a single segment's budget (3GPP
//! TS 23.040 §9.2.3.24.1).
use crate::address::Address;
use crate::charset::NationalLanguage;
use crate::error::{Cause, EncodeError, EncodeResult};
use crate::gsm7;
use crate::timestamp::Timestamp;
use crate::tpdu::{Deliver, Submit, Tpdu, ValidityPeriod};
use crate::udh::{Concatenation, UserDataHeader};
use crate::userdata::{Alphabet, Dcs, UserData};

/// Single-segment septet/octet/UCS-2-unit budgets.
const GSM7_SINGLE_BUDGET: usize = 160;
const UCS2_SINGLE_BUDGET: usize = 70;
/// Concatenated-segment budgets after the 6-octet concatenation UDH.
const GSM7_CONCAT_BUDGET: usize = 153;
const UCS2_CONCAT_BUDGET: usize = 67;
/// Concatenated-segment budgets after the 7-octet UDH a 16-bit reference needs.
const GSM7_CONCAT_BUDGET_WIDE: usize = 152;
const UCS2_CONCAT_BUDGET_WIDE: usize = 66;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AlphabetChoice {
    Auto,
    Gsm7,
    Ucs2,
}

/// Which TPDU variant the encoder produces.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EncodeDirection {
    Submit,
    Deliver,
}

/// Encoder configuration. Mirrors [`Submit`]/[`Deliver`]'s field sets,
/// minus what the segmentation loop computes (UDH, user data, message
/// reference unless pinned).
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub direction: EncodeDirection,
    /// Destination address (`direction = Submit`) or originating address
    /// (`direction = Deliver`).
    pub address: Address,
    pub alphabet: AlphabetChoice,
    pub national_language: NationalLanguage,
    pub protocol_identifier: u8,
    pub validity_period: ValidityPeriod,
    pub status_report_request: bool,
    pub reply_path: bool,
    /// `direction = Deliver` only; defaults to an all-zero timestamp when
    /// unset, since this crate has no notion of "now" (see [`Timestamp`]).
    pub service_centre_timestamp: Option<Timestamp>,
    /// Use a 16-bit concatenation reference instead of the default 8-bit
    /// one. Auto-enabled when a pinned `reference` exceeds 255, since IEI
    /// `0x08` is the only concatenation element that can carry it.
    pub wide_reference: bool,
    /// Pin the message reference / concatenation reference instead of
    /// drawing one from `rand` (useful for deterministic tests).
    pub reference: Option<u16>,
}

impl EncodeOptions {
    pub fn new(address: Address) -> Self {
        EncodeOptions {
            direction: EncodeDirection::Submit,
            address,
            alphabet: AlphabetChoice::Auto,
            national_language: NationalLanguage::Default,
            protocol_identifier: 0,
            validity_period: ValidityPeriod::NotPresent,
            status_report_request: false,
            reply_path: false,
            service_centre_timestamp: None,
            wide_reference: false,
            reference: None,
        }
    }

    fn needs_wide_reference(&self) -> bool {
        self.wide_reference || matches!(self.reference, Some(r) if r > 255)
    }
}

fn split_buffer<T: Clone>(mut buf: Vec<T>, max_len: usize) -> Vec<Vec<T>> {
    let mut out = Vec::new();
    while buf.len() > max_len {
        let tail = buf.split_off(max_len);
        out.push(std::mem::replace(&mut buf, tail));
    }
    out.push(buf);
    out
}

fn concat_reference(opt: &EncodeOptions) -> u16 {
    match opt.reference {
        Some(r) => r,
        None if opt.needs_wide_reference() => rand::random::<u16>(),
        None => rand::random::<u8>() as u16,
    }
}

/// Encode `text` into one or more TPDUs, ready for [`PduModeFrame`] or
/// direct transmission.
///
/// [`PduModeFrame`]: crate::pdumode::PduModeFrame
pub fn encode(text: &str, opt: &EncodeOptions) -> EncodeResult<Vec<Tpdu>> {
    let use_gsm7 = match opt.alphabet {
        AlphabetChoice::Gsm7 => true,
        AlphabetChoice::Ucs2 => false,
        AlphabetChoice::Auto => gsm7::fits_default_alphabet(text),
    };
    if use_gsm7 {
        let septets = gsm7::encode(text, opt.national_language, opt.national_language)
            .map_err(|c| EncodeError::new("ud", c))?;
        encode_gsm7(septets, opt)
    } else {
        let units = UserData::encode_ucs2(text)?;
        encode_ucs2(units, opt)
    }
}

fn build_tpdu(opt: &EncodeOptions, dcs: Dcs, header: UserDataHeader, payload: Vec<u8>) -> Tpdu {
    let alphabet = dcs.alphabet;
    let user_data = UserData { header, alphabet, payload };
    match opt.direction {
        EncodeDirection::Submit => Tpdu::Submit(Submit {
            reject_duplicates: false,
            status_report_request: opt.status_report_request,
            reply_path: opt.reply_path,
            message_reference: rand::random(),
            destination_address: opt.address.clone(),
            protocol_identifier: opt.protocol_identifier,
            data_coding_scheme: dcs,
            validity_period: opt.validity_period,
            user_data,
        }),
        EncodeDirection::Deliver => Tpdu::Deliver(Deliver {
            more_messages_to_send: true,
            status_report_indication: opt.status_report_request,
            reply_path: opt.reply_path,
            originating_address: opt.address.clone(),
            protocol_identifier: opt.protocol_identifier,
            data_coding_scheme: dcs,
            service_centre_timestamp: opt.service_centre_timestamp.unwrap_or(Timestamp {
                year: 0,
                month: 0,
                day: 0,
                hour: 0,
                minute: 0,
                second: 0,
                timezone_quarters: 0,
            }),
            user_data,
        }),
    }
}

fn encode_gsm7(septets: Vec<u8>, opt: &EncodeOptions) -> EncodeResult<Vec<Tpdu>> {
    let dcs = Dcs::gsm7();
    if septets.len() <= GSM7_SINGLE_BUDGET {
        return Ok(vec![build_tpdu(opt, dcs, UserDataHeader::default(), septets)]);
    }
    let reference = concat_reference(opt);
    let wide_reference = opt.needs_wide_reference();
    let budget = if wide_reference { GSM7_CONCAT_BUDGET_WIDE } else { GSM7_CONCAT_BUDGET };
    let parts = split_buffer(septets, budget);
    let total = parts.len();
    if total > 255 {
        return Err(EncodeError::new("ud", Cause::InvalidInteger));
    }
    Ok(parts
        .into_iter()
        .enumerate()
        .map(|(i, payload)| {
            let header = UserDataHeader::concatenation(Concatenation {
                reference,
                total: total as u8,
                sequence: i as u8 + 1,
                wide_reference,
            });
            build_tpdu(opt, dcs, header, payload)
        })
        .collect())
}

fn encode_ucs2(bytes: Vec<u8>, opt: &EncodeOptions) -> EncodeResult<Vec<Tpdu>> {
    let byte_budget_single = UCS2_SINGLE_BUDGET * 2;
    let dcs = Dcs::ucs2();
    if bytes.len() <= byte_budget_single {
        return Ok(vec![build_tpdu(opt, dcs, UserDataHeader::default(), bytes)]);
    }
    let reference = concat_reference(opt);
    let wide_reference = opt.needs_wide_reference();
    let concat_units = if wide_reference { UCS2_CONCAT_BUDGET_WIDE } else { UCS2_CONCAT_BUDGET };
    let parts = split_buffer(bytes, concat_units * 2);
    let total = parts.len();
    if total > 255 {
        return Err(EncodeError::new("ud", Cause::InvalidInteger));
    }
    Ok(parts
        .into_iter()
        .enumerate()
        .map(|(i, payload)| {
            let header = UserDataHeader::concatenation(Concatenation {
                reference,
                total: total as u8,
                sequence: i as u8 + 1,
                wide_reference,
            });
            build_tpdu(opt, dcs, header, payload)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_of(t: &Tpdu) -> &Submit {
        match t {
            Tpdu::Submit(s) => s,
            _ => panic!("expected Submit"),
        }
    }

    #[test]
    fn short_ascii_fits_one_gsm7_segment() {
        let opt = EncodeOptions::new(Address::international("12345"));
        let segments = encode("Hello world", &opt).unwrap();
        assert_eq!(segments.len(), 1);
        let s = submit_of(&segments[0]);
        assert!(s.user_data.header.is_empty());
        assert_eq!(s.data_coding_scheme.alphabet, Alphabet::Gsm7);
    }

    #[test]
    fn non_gsm7_text_falls_back_to_ucs2() {
        let opt = EncodeOptions::new(Address::international("12345"));
        let segments = encode("日本語", &opt).unwrap();
        assert_eq!(submit_of(&segments[0]).data_coding_scheme.alphabet, Alphabet::Ucs2);
    }

    #[test]
    fn exactly_161_ascii_chars_splits_into_two_segments() {
        let text: String = std::iter::repeat('a').take(161).collect();
        let opt = EncodeOptions::new(Address::international("12345"));
        let segments = encode(&text, &opt).unwrap();
        assert_eq!(segments.len(), 2);
        for s in &segments {
            let c = submit_of(s).user_data.header.concatenation_data().unwrap();
            assert_eq!(c.total, 2);
        }
        assert_eq!(submit_of(&segments[0]).user_data.header.concatenation_data().unwrap().sequence, 1);
        assert_eq!(submit_of(&segments[1]).user_data.header.concatenation_data().unwrap().sequence, 2);
    }

    #[test]
    fn exactly_306_ascii_chars_splits_into_two_segments() {
        let text: String = std::iter::repeat('a').take(306).collect();
        let opt = EncodeOptions::new(Address::international("12345"));
        let segments = encode(&text, &opt).unwrap();
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn exactly_307_ascii_chars_splits_into_three_segments() {
        let text: String = std::iter::repeat('a').take(307).collect();
        let opt = EncodeOptions::new(Address::international("12345"));
        let segments = encode(&text, &opt).unwrap();
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn pinned_reference_is_reused_across_segments() {
        let text: String = std::iter::repeat('a').take(200).collect();
        let mut opt = EncodeOptions::new(Address::international("12345"));
        opt.reference = Some(42);
        let segments = encode(&text, &opt).unwrap();
        for s in &segments {
            assert_eq!(submit_of(s).user_data.header.concatenation_data().unwrap().reference, 42);
        }
    }

    #[test]
    fn deliver_direction_produces_deliver_tpdus() {
        let mut opt = EncodeOptions::new(Address::international("12345"));
        opt.direction = EncodeDirection::Deliver;
        let segments = encode("Hello", &opt).unwrap();
        assert_eq!(segments.len(), 1);
        match &segments[0] {
            Tpdu::Deliver(_) => {}
            _ => panic!("expected Deliver"),
        }
    }

    #[test]
    fn large_pinned_reference_auto_widens() {
        let text: String = std::iter::repeat('a').take(200).collect();
        let mut opt = EncodeOptions::new(Address::international("12345"));
        opt.reference = Some(1000);
        let segments = encode(&text, &opt).unwrap();
        for s in &segments {
            let c = submit_of(s).user_data.header.concatenation_data().unwrap();
            assert!(c.wide_reference);
            assert_eq!(c.reference, 1000);
        }
    }

    #[test]
    fn wide_reference_segment_wire_stays_within_140_octets() {
        let text: String = std::iter::repeat('a').take(200).collect();
        let mut opt = EncodeOptions::new(Address::international("12345"));
        opt.reference = Some(1000);
        let segments = encode(&text, &opt).unwrap();
        for s in &segments {
            let (_, wire) = submit_of(s).user_data.marshal().unwrap();
            assert!(wire.len() <= 140, "segment wire is {} octets", wire.len());
        }
    }
}
