//! Service Centre Timestamp codec: 7 octets, each BCD with the semi-octet
//! nibble swap, plus a signed BCD timezone (3GPP TS 23.040 §9.2.3.11).
use crate::bcd;
use crate::error::{Cause, DecodeError, EncodeError};

/// A decoded SCTS. `year` is the raw two-digit value; callers resolve the
/// GSM century rollover themselves, since this crate has no
/// notion of "now".
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Timezone offset in quarter-hours, `-79..=79`.
    pub timezone_quarters: i8,
}

impl Timestamp {
    pub fn marshal(&self) -> Result<[u8; 7], EncodeError> {
        let enc = |field: &'static str, v: u8| -> Result<u8, EncodeError> {
            bcd::encode(v as i32).map_err(|c| EncodeError::new(field, c))
        };
        Ok([
            enc("timestamp.year", self.year)?,
            enc("timestamp.month", self.month)?,
            enc("timestamp.day", self.day)?,
            enc("timestamp.hour", self.hour)?,
            enc("timestamp.minute", self.minute)?,
            enc("timestamp.second", self.second)?,
            bcd::encode_signed(self.timezone_quarters as i32)
                .map_err(|c| EncodeError::new("timestamp.timezone", c))?,
        ])
    }

    pub fn unmarshal(src: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
        if src.len() < 7 {
            return Err(DecodeError::new("timestamp", offset, Cause::Underflow));
        }
        let dec = |field: &'static str, at: usize, b: u8| -> Result<u8, DecodeError> {
            bcd::decode(b).map(|v| v as u8).map_err(|c| DecodeError::new(field, offset + at, c))
        };
        let year = dec("timestamp.year", 0, src[0])?;
        let month = dec("timestamp.month", 1, src[1])?;
        let day = dec("timestamp.day", 2, src[2])?;
        let hour = dec("timestamp.hour", 3, src[3])?;
        let minute = dec("timestamp.minute", 4, src[4])?;
        let second = dec("timestamp.second", 5, src[5])?;
        let timezone_quarters = bcd::decode_signed(src[6])
            .map_err(|c| DecodeError::new("timestamp.timezone", offset + 6, c))? as i8;
        Ok((
            Timestamp { year, month, day, hour, minute, second, timezone_quarters },
            7,
        ))
    }
}
