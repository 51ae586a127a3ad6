//! Address codec: a typed subscriber number (3GPP TS 23.040 §9.1.2.5),
//! including the alphanumeric (GSM-7-packed) address case.
use crate::error::{Cause, DecodeError, EncodeError};
use crate::{gsm7, semioctet, septet};
use crate::charset::NationalLanguage;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TypeOfNumber {
    Unknown = 0b000,
    International = 0b001,
    National = 0b010,
    Network = 0b011,
    Subscriber = 0b100,
    Alphanumeric = 0b101,
    Abbreviated = 0b110,
    Reserved = 0b111,
}

impl TypeOfNumber {
    fn from_bits(b: u8) -> Self {
        match b {
            0b000 => TypeOfNumber::Unknown,
            0b001 => TypeOfNumber::International,
            0b010 => TypeOfNumber::National,
            0b011 => TypeOfNumber::Network,
            0b100 => TypeOfNumber::Subscriber,
            0b101 => TypeOfNumber::Alphanumeric,
            0b110 => TypeOfNumber::Abbreviated,
            _ => TypeOfNumber::Reserved,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NumberingPlan {
    Unknown = 0b0000,
    IsdnTelephone = 0b0001,
    Data = 0b0011,
    Telex = 0b0100,
    National = 0b1000,
    Private = 0b1001,
    Ermes = 0b1010,
    Reserved = 0b1111,
}

impl NumberingPlan {
    fn from_bits(b: u8) -> Self {
        match b {
            0b0000 => NumberingPlan::Unknown,
            0b0001 => NumberingPlan::IsdnTelephone,
            0b0011 => NumberingPlan::Data,
            0b0100 => NumberingPlan::Telex,
            0b1000 => NumberingPlan::National,
            0b1001 => NumberingPlan::Private,
            0b1010 => NumberingPlan::Ermes,
            _ => NumberingPlan::Reserved,
        }
    }
}

/// Type-of-address octet: always has its high bit set on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AddressType {
    pub type_of_number: TypeOfNumber,
    pub numbering_plan: NumberingPlan,
}

impl Default for AddressType {
    fn default() -> Self {
        AddressType {
            type_of_number: TypeOfNumber::International,
            numbering_plan: NumberingPlan::IsdnTelephone,
        }
    }
}

impl AddressType {
    pub fn as_u8(self) -> u8 {
        0b1000_0000 | ((self.type_of_number as u8) << 4) | (self.numbering_plan as u8)
    }

    pub fn from_u8(b: u8) -> Self {
        AddressType {
            type_of_number: TypeOfNumber::from_bits((b >> 4) & 0b111),
            numbering_plan: NumberingPlan::from_bits(b & 0b1111),
        }
    }

    pub fn alphanumeric() -> Self {
        AddressType {
            type_of_number: TypeOfNumber::Alphanumeric,
            numbering_plan: NumberingPlan::Unknown,
        }
    }
}

/// A typed subscriber number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub toa: AddressType,
    pub digits: String,
}

impl Address {
    pub fn new(toa: AddressType, digits: impl Into<String>) -> Self {
        Address { toa, digits: digits.into() }
    }

    /// A plain international number: type-of-number international, ISDN
    /// numbering plan.
    pub fn international(digits: impl Into<String>) -> Self {
        Address {
            toa: AddressType {
                type_of_number: TypeOfNumber::International,
                numbering_plan: NumberingPlan::IsdnTelephone,
            },
            digits: digits.into(),
        }
    }

    pub fn is_alphanumeric(&self) -> bool {
        self.toa.type_of_number == TypeOfNumber::Alphanumeric
    }

    /// Serialize: one-octet length (digit count, or for alphanumeric,
    /// packed-septet octet count x2), one-octet TOA, then digits.
    pub fn marshal(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        if self.digits.is_empty() {
            out.push(0);
            out.push(self.toa.as_u8());
            return Ok(out);
        }
        if self.is_alphanumeric() {
            let septets = gsm7::encode(&self.digits, NationalLanguage::Default, NationalLanguage::Default)
                .map_err(|c| EncodeError::new("address.digits", c))?;
            let packed = septet::pack(&septets, 0);
            out.push((packed.len() * 2) as u8);
            out.push(self.toa.as_u8());
            out.extend(packed);
        } else {
            let packed = semioctet::encode(self.digits.as_bytes())
                .map_err(|c| EncodeError::new("address.digits", c))?;
            out.push(self.digits.len() as u8);
            out.push(self.toa.as_u8());
            out.extend(packed);
        }
        Ok(out)
    }

    /// Deserialize an address field starting at `src[0]`. `base_offset` is
    /// added to any reported error offset so nested decodes point at their
    /// absolute position in the original buffer.
    pub fn unmarshal(src: &[u8], base_offset: usize) -> Result<(Self, usize), DecodeError> {
        if src.is_empty() {
            return Err(DecodeError::new("address.length", base_offset, Cause::Underflow));
        }
        let len = src[0] as usize;
        if len == 0 {
            if src.len() < 2 {
                return Err(DecodeError::new("address.toa", base_offset + 1, Cause::Underflow));
            }
            let toa = AddressType::from_u8(src[1]);
            return Ok((Address { toa, digits: String::new() }, 2));
        }
        if src.len() < 2 {
            return Err(DecodeError::new("address.toa", base_offset + 1, Cause::Underflow));
        }
        let toa = AddressType::from_u8(src[1]);
        if toa.type_of_number == TypeOfNumber::Alphanumeric {
            // `len` is the packed-septet octet count times two (§4.6).
            let n_octets = (len + 1) / 2;
            let data_start = 2;
            let data_end = data_start + n_octets;
            if src.len() < data_end {
                return Err(DecodeError::new("address.digits", base_offset + 2, Cause::Underflow));
            }
            let n_septets = (n_octets * 8) / 7;
            let septets = septet::unpack(&src[data_start..data_end], 0);
            let septets = &septets[..n_septets.min(septets.len())];
            let digits = gsm7::decode(septets, NationalLanguage::Default, NationalLanguage::Default, false)
                .map_err(|c| DecodeError::new("address.digits", base_offset + 2, c))?;
            Ok((Address { toa, digits }, data_end))
        } else {
            let n_octets = (len + 1) / 2;
            let data_start = 2;
            let data_end = data_start + n_octets;
            if src.len() < data_end {
                return Err(DecodeError::new("address.digits", base_offset + 2, Cause::Underflow));
            }
            let (digits, _) = semioctet::decode(&src[data_start..data_end], len)
                .map_err(|c| DecodeError::new("address.digits", base_offset + 2, c))?;
            let digits = String::from_utf8(digits).expect("semioctet alphabet is ASCII");
            Ok((Address { toa, digits }, data_end))
        }
    }
}
