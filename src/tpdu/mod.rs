//! TPDU message codec: variant-dispatch encode/decode of Submit, Deliver,
//! Command, StatusReport (3GPP TS 23.040 §9.2). `Tpdu` is a closed,
//! exhaustively-dispatched enum over the six `(MTI, direction)`
//! combinations rather than an open registry, since the set of TPDU shapes
//! is fixed by the protocol.
mod command;
mod deliver;
mod reports;
mod status_report;
mod submit;

pub use command::Command;
pub use deliver::Deliver;
pub use reports::{DeliverReport, SubmitReport};
pub use status_report::StatusReport;
pub use submit::{Submit, ValidityPeriod};

use crate::error::{Cause, DecodeError, EncodeError};

/// Which end of the link produced (or will consume) a TPDU. Never derived
/// from the wire; always supplied by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    MobileOriginated,
    MobileTerminated,
}

/// The two-bit Message Type Indicator, before direction resolves it to a
/// concrete variant (3GPP TS 23.040 §9.2.3.1).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Mti {
    DeliverOrDeliverReport = 0b00,
    SubmitOrSubmitReport = 0b01,
    CommandOrStatusReport = 0b10,
    Reserved = 0b11,
}

impl Mti {
    fn from_bits(b: u8) -> Self {
        match b & 0b11 {
            0b00 => Mti::DeliverOrDeliverReport,
            0b01 => Mti::SubmitOrSubmitReport,
            0b10 => Mti::CommandOrStatusReport,
            _ => Mti::Reserved,
        }
    }

    fn bits(self) -> u8 {
        self as u8
    }
}

/// A closed sum of the six TPDU shapes the MTI table
/// distinguishes. [`Submit`], [`Deliver`], [`Command`], and
/// [`StatusReport`] are the fully-specified data model;
/// [`SubmitReport`] and [`DeliverReport`] exist so `unmarshal` can dispatch
/// exhaustively on every `(mti, direction)` pair — they
/// carry the minimal fields 3GPP TS 23.040 §9.2.2 defines for the
/// acknowledgement TPDUs, not the richer field set of the four primary
/// variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Tpdu {
    Submit(Submit),
    SubmitReport(SubmitReport),
    Deliver(Deliver),
    DeliverReport(DeliverReport),
    Command(Command),
    StatusReport(StatusReport),
}

impl Tpdu {
    pub fn direction(&self) -> Direction {
        match self {
            Tpdu::Submit(_) | Tpdu::DeliverReport(_) | Tpdu::Command(_) => Direction::MobileOriginated,
            Tpdu::SubmitReport(_) | Tpdu::Deliver(_) | Tpdu::StatusReport(_) => Direction::MobileTerminated,
        }
    }

    pub fn marshal(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Tpdu::Submit(t) => t.marshal(),
            Tpdu::SubmitReport(t) => t.marshal(),
            Tpdu::Deliver(t) => t.marshal(),
            Tpdu::DeliverReport(t) => t.marshal(),
            Tpdu::Command(t) => t.marshal(),
            Tpdu::StatusReport(t) => t.marshal(),
        }
    }

    /// Dispatch on the first octet's MTI bits and the caller-supplied
    /// `direction`, since the MTI bits alone are ambiguous between a
    /// mobile-originated and mobile-terminated TPDU.
    pub fn unmarshal(src: &[u8], direction: Direction) -> Result<(Self, usize), DecodeError> {
        if src.is_empty() {
            return Err(DecodeError::new("first_octet", 0, Cause::Underflow));
        }
        let mti = Mti::from_bits(src[0]);
        use Direction::*;
        use Mti::*;
        match (mti, direction) {
            (DeliverOrDeliverReport, MobileTerminated) => {
                let (t, n) = Deliver::unmarshal(src)?;
                Ok((Tpdu::Deliver(t), n))
            }
            (DeliverOrDeliverReport, MobileOriginated) => {
                let (t, n) = DeliverReport::unmarshal(src)?;
                Ok((Tpdu::DeliverReport(t), n))
            }
            (SubmitOrSubmitReport, MobileOriginated) => {
                let (t, n) = Submit::unmarshal(src)?;
                Ok((Tpdu::Submit(t), n))
            }
            (SubmitOrSubmitReport, MobileTerminated) => {
                let (t, n) = SubmitReport::unmarshal(src)?;
                Ok((Tpdu::SubmitReport(t), n))
            }
            (CommandOrStatusReport, MobileOriginated) => {
                let (t, n) = Command::unmarshal(src)?;
                Ok((Tpdu::Command(t), n))
            }
            (CommandOrStatusReport, MobileTerminated) => {
                let (t, n) = StatusReport::unmarshal(src)?;
                Ok((Tpdu::StatusReport(t), n))
            }
            (Reserved, _) => Err(DecodeError::new("first_octet", 0, Cause::InvalidOctet)),
        }
    }
}

pub(crate) fn mti_octet(mti: Mti, udhi: bool, rp: bool, extra: u8) -> u8 {
    let mut b = mti.bits() | (extra & 0b0011_1100);
    if udhi {
        b |= 0b0100_0000;
    }
    if rp {
        b |= 0b1000_0000;
    }
    b
}

pub(crate) const UDHI_BIT: u8 = 0b0100_0000;
pub(crate) const RP_BIT: u8 = 0b1000_0000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mti_round_trips_through_bits() {
        assert_eq!(Mti::from_bits(0b01), Mti::SubmitOrSubmitReport);
        assert_eq!(Mti::from_bits(0b00), Mti::DeliverOrDeliverReport);
        assert_eq!(Mti::from_bits(0b10), Mti::CommandOrStatusReport);
    }

    #[test]
    fn empty_input_is_underflow() {
        let err = Tpdu::unmarshal(&[], Direction::MobileOriginated).unwrap_err();
        assert_eq!(err.cause, Cause::Underflow);
    }
}
