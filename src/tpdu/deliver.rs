//! SMS-DELIVER (3GPP TS 23.040 §9.2.2.1): the mobile-terminated TPDU
//! carrying an incoming message from the service centre.
use super::{mti_octet, Mti, RP_BIT, UDHI_BIT};
use crate::address::Address;
use crate::error::{Cause, DecodeError, DecodeResult, EncodeResult, Rewrap};
use crate::timestamp::Timestamp;
use crate::userdata::{Dcs, UserData};

#[derive(Debug, Clone, PartialEq)]
pub struct Deliver {
    /// TP-MMS: `false` means more messages are waiting at the service
    /// centre for this MS.
    pub more_messages_to_send: bool,
    pub status_report_indication: bool,
    pub reply_path: bool,
    pub originating_address: Address,
    pub protocol_identifier: u8,
    pub data_coding_scheme: Dcs,
    pub service_centre_timestamp: Timestamp,
    pub user_data: UserData,
}

impl Deliver {
    pub fn marshal(&self) -> EncodeResult<Vec<u8>> {
        let extra = ((!self.more_messages_to_send as u8) << 2)
            | ((self.status_report_indication as u8) << 5);
        let first_octet = mti_octet(
            Mti::DeliverOrDeliverReport,
            !self.user_data.header.is_empty(),
            self.reply_path,
            extra,
        );
        let mut out = vec![first_octet];
        out.extend(self.originating_address.marshal()?);
        out.push(self.protocol_identifier);
        out.push(self.data_coding_scheme.as_u8());
        out.extend_from_slice(&self.service_centre_timestamp.marshal()?);
        let (udl, ud_wire) = self.user_data.marshal()?;
        out.push(udl);
        out.extend(ud_wire);
        Ok(out)
    }

    pub fn unmarshal(src: &[u8]) -> DecodeResult<(Self, usize)> {
        if src.is_empty() {
            return Err(DecodeError::new("first_octet", 0, Cause::Underflow));
        }
        let first_octet = src[0];
        let more_messages_to_send = first_octet & 0b0000_0100 == 0;
        let status_report_indication = first_octet & 0b0010_0000 != 0;
        let reply_path = first_octet & RP_BIT != 0;
        let udhi = first_octet & UDHI_BIT != 0;
        let mut pos = 1;
        let (originating_address, n) = Address::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("oa"))?;
        pos += n;
        if src.len() < pos + 2 {
            return Err(DecodeError::new("pid", pos, Cause::Underflow));
        }
        let protocol_identifier = src[pos];
        pos += 1;
        let data_coding_scheme = Dcs::from_u8(src[pos]);
        pos += 1;
        let (service_centre_timestamp, n) =
            Timestamp::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("scts"))?;
        pos += n;
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
            Deliver {
                more_messages_to_send,
                status_report_indication,
                reply_path,
                originating_address,
                protocol_identifier,
                data_coding_scheme,
                service_centre_timestamp,
                user_data,
            },
            pos,
        ))
    }
}
