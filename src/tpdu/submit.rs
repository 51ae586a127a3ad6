//! SMS-SUBMIT (3GPP TS 23.040 §9.2.2.2): the mobile-originated TPDU that
//! carries an outgoing message to the service centre.
use super::{mti_octet, Mti, RP_BIT, UDHI_BIT};
use crate::address::Address;
use crate::error::{Cause, DecodeError, DecodeResult, EncodeError, EncodeResult, Rewrap};
use crate::timestamp::Timestamp;
use crate::userdata::{Alphabet, Dcs, UserData};

/// Validity period, in the three shapes TP-VPF selects (3GPP TS 23.040
/// §9.2.3.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityPeriod {
    NotPresent,
    /// A relative period: the raw TP-VP octet, interpreted per the table in
    /// §9.2.3.12.1 (this crate does not resolve it to a `Duration` — that
    /// table is a presentation concern, not wire semantics).
    Relative(u8),
    /// Enhanced format: 7 raw octets, mostly vendor/feature-specific
    /// (§9.2.3.12.3). Carried opaquely.
    Enhanced([u8; 7]),
    Absolute(Timestamp),
}

impl ValidityPeriod {
    fn format_bits(&self) -> u8 {
        match self {
            ValidityPeriod::NotPresent => 0b00,
            ValidityPeriod::Enhanced(_) => 0b01,
            ValidityPeriod::Relative(_) => 0b10,
            ValidityPeriod::Absolute(_) => 0b11,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submit {
    pub reject_duplicates: bool,
    pub status_report_request: bool,
    pub reply_path: bool,
    pub message_reference: u8,
    pub destination_address: Address,
    pub protocol_identifier: u8,
    pub data_coding_scheme: Dcs,
    pub validity_period: ValidityPeriod,
    pub user_data: UserData,
}

impl Submit {
    pub fn marshal(&self) -> EncodeResult<Vec<u8>> {
        let extra = ((self.reject_duplicates as u8) << 2)
            | (self.validity_period.format_bits() << 3)
            | ((self.status_report_request as u8) << 5);
        let first_octet = mti_octet(
            Mti::SubmitOrSubmitReport,
            !self.user_data.header.is_empty(),
            self.reply_path,
            extra,
        );
        let mut out = vec![first_octet, self.message_reference];
        out.extend(self.destination_address.marshal()?);
        out.push(self.protocol_identifier);
        out.push(self.data_coding_scheme.as_u8());
        match self.validity_period {
            ValidityPeriod::NotPresent => {}
            ValidityPeriod::Relative(v) => out.push(v),
            ValidityPeriod::Enhanced(bytes) => out.extend_from_slice(&bytes),
            ValidityPeriod::Absolute(ts) => out.extend_from_slice(&ts.marshal()?),
        }
        let (udl, ud_wire) = self.user_data.marshal()?;
        out.push(udl);
        out.extend(ud_wire);
        Ok(out)
    }

    pub fn unmarshal(src: &[u8]) -> DecodeResult<(Self, usize)> {
        if src.len() < 2 {
            return Err(DecodeError::new("mr", 1, Cause::Underflow));
        }
        let first_octet = src[0];
        let reject_duplicates = first_octet & 0b0000_0100 != 0;
        let status_report_request = first_octet & 0b0010_0000 != 0;
        let reply_path = first_octet & RP_BIT != 0;
        let udhi = first_octet & UDHI_BIT != 0;
        let vpf = (first_octet >> 3) & 0b11;
        let message_reference = src[1];
        let mut pos = 2;
        let (destination_address, n) = Address::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("da"))?;
        pos += n;
        if src.len() < pos + 2 {
            return Err(DecodeError::new("pid", pos, Cause::Underflow));
        }
        let protocol_identifier = src[pos];
        pos += 1;
        let data_coding_scheme = Dcs::from_u8(src[pos]);
        pos += 1;
        let validity_period = match vpf {
            0b00 => ValidityPeriod::NotPresent,
            0b10 => {
                if src.len() < pos + 1 {
                    return Err(DecodeError::new("vp", pos, Cause::Underflow));
                }
                let v = src[pos];
                pos += 1;
                ValidityPeriod::Relative(v)
            }
            0b01 => {
                if src.len() < pos + 7 {
                    return Err(DecodeError::new("vp", pos, Cause::Underflow));
                }
                let mut bytes = [0u8; 7];
                bytes.copy_from_slice(&src[pos..pos + 7]);
                pos += 7;
                ValidityPeriod::Enhanced(bytes)
            }
            _ => {
                let (ts, n) = Timestamp::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("vp"))?;
                pos += n;
                ValidityPeriod::Absolute(ts)
            }
        };
        if src.len() < pos + 1 {
            return Err(DecodeError::new("udl", pos, Cause::Underflow));
        }
        let udl = src[pos];
        pos += 1;
        let (user_data, n) =
            UserData::unmarshal(udl, udhi, data_coding_scheme.alphabet, &src[pos..], pos)
                .map_err(|e| e.rewrap("ud"))?;
        pos += n;
        Ok((
            Submit {
                reject_duplicates,
                status_report_request,
                reply_path,
                message_reference,
                destination_address,
                protocol_identifier,
                data_coding_scheme,
                validity_period,
                user_data,
            },
            pos,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::udh::UserDataHeader;

    fn sample() -> Submit {
        Submit {
            reject_duplicates: false,
            status_report_request: false,
            reply_path: false,
            message_reference: 0,
            destination_address: Address::international("12345"),
            protocol_identifier: 0,
            data_coding_scheme: Dcs::gsm7(),
            validity_period: ValidityPeriod::NotPresent,
            user_data: UserData {
                header: UserDataHeader::default(),
                alphabet: Alphabet::Gsm7,
                payload: vec![0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x20, 0x77, 0x6F, 0x72, 0x6C, 0x64],
            },
        }
    }

    #[test]
    fn scenario_1_hex_round_trips() {
        // 01 00 05 91 21 43 f5 00 00 0b c8 32 9b fd 06 dd df 72 36 19
        let hex = "010005912143f500000bc8329bfd06dddf723619";
        let bytes: Vec<u8> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect();
        let (submit, consumed) = Submit::unmarshal(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(submit.destination_address.digits, "12345");
        assert_eq!(submit.data_coding_scheme.alphabet, Alphabet::Gsm7);
        assert_eq!(submit.user_data.payload.len(), 11);
        let re_marshaled = submit.marshal().unwrap();
        assert_eq!(re_marshaled, bytes);
    }

    #[test]
    fn round_trips_with_relative_validity_period() {
        let mut s = sample();
        s.validity_period = ValidityPeriod::Relative(0xA7);
        let bytes = s.marshal().unwrap();
        let (decoded, consumed) = Submit::unmarshal(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, s);
    }

    #[test]
    fn round_trips_with_absolute_validity_period() {
        let mut s = sample();
        s.validity_period = ValidityPeriod::Absolute(Timestamp {
            year: 26,
            month: 1,
            day: 15,
            hour: 8,
            minute: 30,
            second: 0,
            timezone_quarters: 4,
        });
        let bytes = s.marshal().unwrap();
        let (decoded, _) = Submit::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.validity_period, s.validity_period);
    }

    #[test]
    fn udhi_flag_tracks_header_presence() {
        use crate::udh::{Concatenation, UserDataHeader};
        let mut s = sample();
        s.user_data.header = UserDataHeader::concatenation(Concatenation {
            reference: 1,
            total: 2,
            sequence: 1,
            wide_reference: false,
        });
        let bytes = s.marshal().unwrap();
        assert_ne!(bytes[0] & UDHI_BIT, 0);
        let (decoded, _) = Submit::unmarshal(&bytes).unwrap();
        assert!(!decoded.user_data.header.is_empty());
    }
}
