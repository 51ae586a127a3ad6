//! SMS-COMMAND (3GPP TS 23.040 §9.2.2.4): a mobile-originated TPDU that
//! asks the service centre to act on a previously submitted message (e.g.
//! cancel a status report request) rather than carrying user text.
use super::{mti_octet, Mti};
use crate::address::Address;
use crate::error::{Cause, DecodeError, DecodeResult, EncodeError, EncodeResult, Rewrap};

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub status_report_request: bool,
    pub message_reference: u8,
    pub protocol_identifier: u8,
    pub command_type: u8,
    pub message_number: u8,
    pub destination_address: Address,
    pub command_data: Vec<u8>,
}

impl Command {
    pub fn marshal(&self) -> EncodeResult<Vec<u8>> {
        let extra = (self.status_report_request as u8) << 5;
        let first_octet = mti_octet(Mti::CommandOrStatusReport, false, false, extra);
        let mut out = vec![first_octet, self.message_reference, self.protocol_identifier];
        out.push(self.command_type);
        out.push(self.message_number);
        out.extend(self.destination_address.marshal()?);
        if self.command_data.len() > 255 {
            return Err(EncodeError::new("cd", Cause::InvalidInteger));
        }
        out.push(self.command_data.len() as u8);
        out.extend_from_slice(&self.command_data);
        Ok(out)
    }

    pub fn unmarshal(src: &[u8]) -> DecodeResult<(Self, usize)> {
        if src.len() < 5 {
            return Err(DecodeError::new("mn", src.len().min(4), Cause::Underflow));
        }
        let first_octet = src[0];
        let status_report_request = first_octet & 0b0010_0000 != 0;
        let message_reference = src[1];
        let protocol_identifier = src[2];
        let command_type = src[3];
        let message_number = src[4];
        let mut pos = 5;
        let (destination_address, n) = Address::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("da"))?;
        pos += n;
        if src.len() < pos + 1 {
            return Err(DecodeError::new("cdl", pos, Cause::Underflow));
        }
        let cdl = src[pos] as usize;
        pos += 1;
        if src.len() < pos + cdl {
            return Err(DecodeError::new("cd", pos, Cause::Underflow));
        }
        let command_data = src[pos..pos + cdl].to_vec();
        pos += cdl;
        Ok((
            Command {
                status_report_request,
                message_reference,
                protocol_identifier,
                command_type,
                message_number,
                destination_address,
                command_data,
            },
            pos,
        ))
    }
}
