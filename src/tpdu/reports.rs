//! SMS-SUBMIT-REPORT and SMS-DELIVER-REPORT (3GPP TS 23.040 §9.2.2.2a,
//! §9.2.2.1a): the acknowledgement TPDUs that complete the MTI dispatch
//! table. Kept deliberately minimal — just TP-FCS/TP-PI and the optional
//! tail fields TP-PI gates, per 3GPP TS 23.040 Table 9.2.3.27 — since a
//! caller never constructs one of these, only round-trips one that arrived
//! over the wire.
use super::{mti_octet, Mti, UDHI_BIT};
use crate::error::{Cause, DecodeError, DecodeResult, EncodeResult, Rewrap};
use crate::timestamp::Timestamp;
use crate::userdata::{Dcs, UserData};

const PI_PID: u8 = 0b0000_0001;
const PI_DCS: u8 = 0b0000_0010;
const PI_UD: u8 = 0b0000_0100;

fn marshal_pi_tail(
    out: &mut Vec<u8>,
    pid: Option<u8>,
    dcs: Option<Dcs>,
    ud: &Option<UserData>,
) -> EncodeResult<()> {
    let mut pi = 0u8;
    if pid.is_some() {
        pi |= PI_PID;
    }
    if dcs.is_some() {
        pi |= PI_DCS;
    }
    if ud.is_some() {
        pi |= PI_UD;
    }
    // TP-PI is present iff it would gate at least one optional (§9.2.3.27).
    if pi == 0 {
        return Ok(());
    }
    out.push(pi);
    if let Some(pid) = pid {
        out.push(pid);
    }
    if let Some(dcs) = dcs {
        out.push(dcs.as_u8());
    }
    if let Some(ud) = ud {
        let (udl, wire) = ud.marshal()?;
        out.push(udl);
        out.extend(wire);
    }
    Ok(())
}

fn unmarshal_pi_tail(
    src: &[u8],
    mut pos: usize,
    udhi: bool,
) -> DecodeResult<(Option<u8>, Option<Dcs>, Option<UserData>, usize)> {
    // TP-PI itself is optional: a report can legitimately end right before
    // it, meaning none of TP-PID/TP-DCS/TP-UD are present either.
    if pos >= src.len() {
        return Ok((None, None, None, pos));
    }
    let pi = src[pos];
    pos += 1;
    let pid = if pi & PI_PID != 0 {
        if src.len() < pos + 1 {
            return Err(DecodeError::new("pid", pos, Cause::Underflow));
        }
        let v = src[pos];
        pos += 1;
        Some(v)
    } else {
        None
    };
    let dcs = if pi & PI_DCS != 0 {
        if src.len() < pos + 1 {
            return Err(DecodeError::new("dcs", pos, Cause::Underflow));
        }
        let v = Dcs::from_u8(src[pos]);
        pos += 1;
        Some(v)
    } else {
        None
    };
    let ud = if pi & PI_UD != 0 {
        if src.len() < pos + 1 {
            return Err(DecodeError::new("udl", pos, Cause::Underflow));
        }
        let udl = src[pos];
        pos += 1;
        let alphabet = dcs.map(|d| d.alphabet).unwrap_or(crate::userdata::Alphabet::EightBit);
        let (ud, n) = UserData::unmarshal(udl, udhi, alphabet, &src[pos..], pos).map_err(|e| e.rewrap("ud"))?;
        pos += n;
        Some(ud)
    } else {
        None
    };
    Ok((pid, dcs, ud, pos))
}

/// Sent MT, acknowledging an SMS-SUBMIT.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport {
    pub failure_cause: Option<u8>,
    pub service_centre_timestamp: Timestamp,
    pub protocol_identifier: Option<u8>,
    pub data_coding_scheme: Option<Dcs>,
    pub user_data: Option<UserData>,
}

impl SubmitReport {
    pub fn marshal(&self) -> EncodeResult<Vec<u8>> {
        let udhi = match &self.user_data {
            Some(ud) => !ud.header.is_empty(),
            None => false,
        };
        let first_octet = mti_octet(Mti::SubmitOrSubmitReport, udhi, false, 0);
        let mut out = vec![first_octet];
        if let Some(fcs) = self.failure_cause {
            out.push(fcs);
        }
        out.extend_from_slice(&self.service_centre_timestamp.marshal()?);
        marshal_pi_tail(&mut out, self.protocol_identifier, self.data_coding_scheme, &self.user_data)?;
        Ok(out)
    }

    pub fn unmarshal(src: &[u8]) -> DecodeResult<(Self, usize)> {
        if src.is_empty() {
            return Err(DecodeError::new("first_octet", 0, Cause::Underflow));
        }
        let udhi = src[0] & UDHI_BIT != 0;
        let pos = 1;
        let (service_centre_timestamp, n) =
            Timestamp::unmarshal(&src[pos..], pos).map_err(|e| e.rewrap("scts"))?;
        let pos = pos + n;
        let (protocol_identifier, data_coding_scheme, user_data, pos) =
            unmarshal_pi_tail(src, pos, udhi)?;
        Ok((
            SubmitReport {
                failure_cause: None,
                service_centre_timestamp,
                protocol_identifier,
                data_coding_scheme,
                user_data,
            },
            pos,
        ))
    }
}

/// Sent MO, acknowledging an SMS-DELIVER.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverReport {
    pub failure_cause: Option<u8>,
    pub protocol_identifier: Option<u8>,
    pub data_coding_scheme: Option<Dcs>,
    pub user_data: Option<UserData>,
}

impl DeliverReport {
    pub fn marshal(&self) -> EncodeResult<Vec<u8>> {
        let udhi = match &self.user_data {
            Some(ud) => !ud.header.is_empty(),
            None => false,
        };
        let first_octet = mti_octet(Mti::DeliverOrDeliverReport, udhi, false, 0);
        let mut out = vec![first_octet];
        if let Some(fcs) = self.failure_cause {
            out.push(fcs);
        }
        marshal_pi_tail(&mut out, self.protocol_identifier, self.data_coding_scheme, &self.user_data)?;
        Ok(out)
    }

    pub fn unmarshal(src: &[u8]) -> DecodeResult<(Self, usize)> {
        if src.is_empty() {
            return Err(DecodeError::new("first_octet", 0, Cause::Underflow));
        }
        let udhi = src[0] & UDHI_BIT != 0;
        let pos = 1;
        let (protocol_identifier, data_coding_scheme, user_data, pos) =
            unmarshal_pi_tail(src, pos, udhi)?;
        Ok((
            DeliverReport { failure_cause: None, protocol_identifier, data_coding_scheme, user_data },
            pos,
        ))
    }
}
