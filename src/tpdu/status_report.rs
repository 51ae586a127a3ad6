//! SMS-STATUS-REPORT (3GPP TS 23.040 §9.2.2.3): the mobile-terminated TPDU
//! a service centre sends back to report the fate of a previously
//! submitted message.
use super::{mti_octet, Mti, UDHI_BIT};
use crate::address::Address;
use crate::error::{Cause, DecodeError, DecodeResult, EncodeResult, Rewrap};
use crate::timestamp::Timestamp;
use crate::userdata::{Dcs, UserData};

const PI_PID: u8 = 0b0000_0001;
const PI_DCS: u8 = 0b0000_0010;
const PI_UD: u8 = 0b0000_0100;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub more_messages_to_send: bool,
    /// TP-SRQ: `true` if this report is the result of an SMS-COMMAND rather
    /// than an SMS-SUBMIT.
    pub status_report_qualifier: bool,
    pub message_reference: u8,
    pub recipient_address: Address,
    pub service_centre_timestamp: Timestamp,
    pub discharge_time: Timestamp,
    pub status: u8,
    /// TP-PID, TP-DCS, and TP-UD are gated by TP-PI (§9.2.3.27); this crate
    /// mirrors that asymmetry with `Option` rather than always-present
    /// defaulted fields.
    pub protocol_identifier: Option<u8>,
    pub data_coding_scheme: Option<Dcs>,
    pub user_data: Option<UserData>,
}

impl StatusReport {
    pub fn marshal(&self) -> EncodeResult<Vec<u8>> {
        let udhi = match &self.user_data {
            Some(ud) => !ud.header.is_empty(),
            None => false,
        };
        let extra = ((!self.more_messages_to_send as u8) << 2) | ((self.status_report_qualifier as u8) << 5);
        let first_octet = mti_octet(Mti::CommandOrStatusReport, udhi, false, extra);
        let mut out = vec![first_octet, self.message_reference];
        out.extend(self.recipient_address.marshal()?);
        out.extend_from_slice(&self.service_centre_timestamp.marshal()?);
        out.extend_from_slice(&self.discharge_time.marshal()?);
        out.push(self.status);
        let mut pi = 0u8;
        if self.protocol_identifier.is_some() {
            pi |= PI_PID;
        }
        if self.data_coding_scheme.is_some() {
            pi |= PI_DCS;
        }
        if self.user_data.is_some() {
            pi |= PI_UD;
        }
        // TP-PI is present iff it would gate at least one optional (§9.2.3.27).
        if pi == 0 {
            return Ok(out);
        }
        out.push(pi);
        if let Some(pid) = self.protocol_identifier {
            out.push(pid);
        }
        if let Some(dcs) = self.data_coding_scheme {
            out.push(dcs.as_u8());
        }
        if let Some(ud) = &self.user_data {
            let (udl, wire) = ud.marshal()?;
            out.push(udl);
            out.extend(wire);
        }
        Ok(out)
    }

    pub fn unmarshal(src: &[u8]) -> DecodeResult<(Self, usize)> {
        if src.len() < 2 {
            return Err(DecodeError::new("mr", src.len(), Cause::Underflow));
        }
        let first_octet = src[0];
        let more_messages_to_send = first_octet & 0b0000_0100 == 0;
        let status_report_qualifier = first_octet & 0b0010_0000 != 0;
        let udhi = first_octet & UDHI_BIT != 0;
        let message_reference = src[1];
        let mut pos = 2;
        let (recipient_address, n) = Address::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("ra"))?;
        pos += n;
        let (service_centre_timestamp, n) =
            Timestamp::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("scts"))?;
        pos += n;
        let (discharge_time, n) = Timestamp::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("dt"))?;
        pos += n;
        if src.len() < pos + 1 {
            return Err(DecodeError::new("status", pos, Cause::Underflow));
        }
        let status = src[pos];
        pos += 1;
        // TP-PI itself is optional: a PDU can legitimately end right after
        // TP-ST, meaning none of TP-PID/TP-DCS/TP-UD are present either.
        let pi = if pos < src.len() {
            let v = src[pos];
            pos += 1;
            v
        } else {
            0
        };
        let protocol_identifier = if pi & PI_PID != 0 {
            if src.len() < pos + 1 {
                return Err(DecodeError::new("pid", pos, Cause::Underflow));
            }
            let v = src[pos];
            pos += 1;
            Some(v)
        } else {
            None
        };
        let data_coding_scheme = if pi & PI_DCS != 0 {
            if src.len() < pos + 1 {
                return Err(DecodeError::new("dcs", pos, Cause::Underflow));
            }
            let v = Dcs::from_u8(src[pos]);
            pos += 1;
            Some(v)
        } else {
            None
        };
        let user_data = if pi & PI_UD != 0 {
            if src.len() < pos + 1 {
                return Err(DecodeError::new("udl", pos, Cause::Underflow));
            }
            let udl = src[pos];
            pos += 1;
            let alphabet = data_coding_scheme.map(|d| d.alphabet).unwrap_or(crate::userdata::Alphabet::EightBit);
            let (ud, n) = UserData::unmarshal(udl, udhi, alphabet, &src[pos..], pos).map_err(|e| e.rewrap("ud"))?;
            pos += n;
            Some(ud)
        } else {
            None
        };
        Ok((
            StatusReport {
                more_messages_to_send,
                status_report_qualifier,
                message_reference,
                recipient_address,
                service_centre_timestamp,
                discharge_time,
                status,
                protocol_identifier,
                data_coding_scheme,
                user_data,
            },
            pos,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(day: u8) -> Timestamp {
        Timestamp { year: 26, month: 1, day, hour: 0, minute: 0, second: 0, timezone_quarters: 0 }
    }

    fn sample() -> StatusReport {
        StatusReport {
            more_messages_to_send: true,
            status_report_qualifier: false,
            message_reference: 9,
            recipient_address: Address::international("447700900123"),
            service_centre_timestamp: ts(1),
            discharge_time: ts(2),
            status: 0,
            protocol_identifier: None,
            data_coding_scheme: None,
            user_data: None,
        }
    }

    #[test]
    fn round_trips_without_optional_fields() {
        let r = sample();
        let bytes = r.marshal().unwrap();
        assert_eq!(*bytes.last().unwrap(), r.status); // no TP-PI octet at all
        let (decoded, consumed) = StatusReport::unmarshal(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, r);
    }

    #[test]
    fn accepts_wire_truncated_right_after_status() {
        let r = sample();
        let bytes = r.marshal().unwrap();
        let (decoded, consumed) = StatusReport::unmarshal(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert!(decoded.protocol_identifier.is_none());
        assert!(decoded.data_coding_scheme.is_none());
        assert!(decoded.user_data.is_none());
    }

    #[test]
    fn round_trips_with_all_optional_fields() {
        use crate::udh::UserDataHeader;
        use crate::userdata::Alphabet;
        let mut r = sample();
        r.protocol_identifier = Some(0);
        r.data_coding_scheme = Some(Dcs::gsm7());
        r.user_data = Some(UserData {
            header: UserDataHeader::default(),
            alphabet: Alphabet::Gsm7,
            payload: vec![0x4F, 0x4B],
        });
        let bytes = r.marshal().unwrap();
        let (decoded, consumed) = StatusReport::unmarshal(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, r);
    }
}
