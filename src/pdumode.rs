//! PDU-mode framing: the SMSC address that precedes every TPDU when a modem
//! hands bytes over in PDU mode (3GPP TS 27.005 §4.3). Its length octet
//! counts SMSC octets (TOA + packed digits), not digits the way
//! [`Address`]'s length octet does.
use crate::address::{Address, AddressType};
use crate::error::{Cause, DecodeError, DecodeResult, EncodeResult};
use crate::semioctet;
use crate::tpdu::{Direction, Tpdu};

/// A full PDU-mode frame: an optional SMSC address, then a TPDU.
#[derive(Debug, Clone, PartialEq)]
pub struct PduModeFrame {
    /// `None` means "use the SMSC currently configured on the device" (a
    /// zero-length SMSC field).
    pub smsc: Option<Address>,
    pub tpdu: Tpdu,
}

impl PduModeFrame {
    pub fn marshal(&self) -> EncodeResult<Vec<u8>> {
        let mut out = match &self.smsc {
            None => vec![0],
            Some(addr) => {
                let digits = semioctet::encode(addr.digits.as_bytes()).map_err(|c| {
                    crate::error::EncodeError::new("smsc.digits", c)
                })?;
                let mut framed = Vec::with_capacity(2 + digits.len());
                framed.push((1 + digits.len()) as u8);
                framed.push(addr.toa.as_u8());
                framed.extend(digits);
                framed
            }
        };
        out.extend(self.tpdu.marshal()?);
        Ok(out)
    }

    pub fn unmarshal(src: &[u8], direction: Direction) -> DecodeResult<(Self, usize)> {
        if src.is_empty() {
            return Err(DecodeError::new("smsc", 0, Cause::Underflow));
        }
        let smsc_octets = src[0] as usize;
        if smsc_octets == 0 {
            let (tpdu, n) = Tpdu::unmarshal(&src[1..], direction)?;
            return Ok((PduModeFrame { smsc: None, tpdu }, 1 + n));
        }
        if src.len() < 1 + smsc_octets {
            return Err(DecodeError::new("smsc", 0, Cause::Underflow));
        }
        let toa = AddressType::from_u8(src[1]);
        let digit_octets = smsc_octets - 1;
        let digit_span = &src[2..2 + digit_octets];
        let (digits, _) = semioctet::decode(digit_span, digit_octets * 2)
            .map_err(|c| DecodeError::new("smsc.digits", 2, c))?;
        let digits = String::from_utf8(digits).expect("semioctet alphabet is ASCII");
        let addr = Address { toa, digits };
        let consumed_smsc = 1 + smsc_octets;
        let (tpdu, n) = Tpdu::unmarshal(&src[consumed_smsc..], direction)?;
        Ok((PduModeFrame { smsc: Some(addr), tpdu }, consumed_smsc + n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tpdu::Submit;
    use crate::address::Address as Addr;
    use crate::udh::UserDataHeader;
    use crate::userdata::{Alphabet, Dcs, UserData};
    use crate::tpdu::ValidityPeriod;

    fn sample_submit() -> Tpdu {
        Tpdu::Submit(Submit {
            reject_duplicates: false,
            status_report_request: false,
            reply_path: false,
            message_reference: 0,
            destination_address: Addr::international("12345"),
            protocol_identifier: 0,
            data_coding_scheme: Dcs::gsm7(),
            validity_period: ValidityPeriod::NotPresent,
            user_data: UserData {
                header: UserDataHeader::default(),
                alphabet: Alphabet::Gsm7,
                payload: vec![0x48, 0x65, 0x6C, 0x6C, 0x6F],
            },
        })
    }

    #[test]
    fn zero_length_smsc_round_trips() {
        let frame = PduModeFrame { smsc: None, tpdu: sample_submit() };
        let bytes = frame.marshal().unwrap();
        assert_eq!(bytes[0], 0);
        let (decoded, consumed) = PduModeFrame::unmarshal(&bytes, Direction::MobileOriginated).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, frame);
    }

    #[test]
    fn present_smsc_round_trips_with_odd_digit_count() {
        let frame = PduModeFrame { smsc: Some(Addr::international("12345")), tpdu: sample_submit() };
        let bytes = frame.marshal().unwrap();
        let (decoded, consumed) = PduModeFrame::unmarshal(&bytes, Direction::MobileOriginated).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, frame);
    }

    #[test]
    fn present_smsc_round_trips_with_even_digit_count() {
        let frame = PduModeFrame { smsc: Some(Addr::international("123456")), tpdu: sample_submit() };
        let bytes = frame.marshal().unwrap();
        let (decoded, _) = PduModeFrame::unmarshal(&bytes, Direction::MobileOriginated).unwrap();
        assert_eq!(decoded, frame);
    }
}
