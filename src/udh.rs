//! User Data Header codec (3GPP TS 23.040 §9.2.3.24): concatenation
//! (8-bit and 16-bit reference) and national-language locking/single-shift
//! information elements.
use crate::charset::NationalLanguage;
use crate::error::{Cause, DecodeError, EncodeError};

/// Concatenation information element semantic (IEI `0x00` or `0x08`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concatenation {
    pub reference: u16,
    pub total: u8,
    pub sequence: u8,
    /// `true` if this used the 16-bit-reference IEI (`0x08`).
    pub wide_reference: bool,
}

/// One raw information element: an identifier and up to 255 bytes of data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationElement {
    pub iei: u8,
    pub data: Vec<u8>,
}

pub const IEI_CONCAT_8BIT: u8 = 0x00;
pub const IEI_CONCAT_16BIT: u8 = 0x08;
pub const IEI_NATIONAL_SINGLE_SHIFT: u8 = 0x24;
pub const IEI_NATIONAL_LOCKING_SHIFT: u8 = 0x25;

/// An ordered sequence of information elements. Present iff the owning
/// TPDU's UDHI flag is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDataHeader {
    pub elements: Vec<InformationElement>,
}

impl UserDataHeader {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build a single-element header carrying a concatenation IE.
    pub fn concatenation(c: Concatenation) -> Self {
        let data = if c.wide_reference {
            vec![
                (c.reference >> 8) as u8,
                (c.reference & 0xFF) as u8,
                c.total,
                c.sequence,
            ]
        } else {
            vec![c.reference as u8, c.total, c.sequence]
        };
        let iei = if c.wide_reference { IEI_CONCAT_16BIT } else { IEI_CONCAT_8BIT };
        UserDataHeader { elements: vec![InformationElement { iei, data }] }
    }

    pub fn concatenation_data(&self) -> Option<Concatenation> {
        for el in &self.elements {
            if el.iei == IEI_CONCAT_8BIT && el.data.len() == 3 {
                return Some(Concatenation {
                    reference: el.data[0] as u16,
                    total: el.data[1],
                    sequence: el.data[2],
                    wide_reference: false,
                });
            }
            if el.iei == IEI_CONCAT_16BIT && el.data.len() == 4 {
                return Some(Concatenation {
                    reference: ((el.data[0] as u16) << 8) | el.data[1] as u16,
                    total: el.data[2],
                    sequence: el.data[3],
                    wide_reference: true,
                });
            }
        }
        None
    }

    /// The national-language identifier carried by a single-shift or
    /// locking-shift element, if any (IEIs `0x24`/`0x25`).
    pub fn national_language(&self) -> Option<(NationalLanguage, bool)> {
        for el in &self.elements {
            let is_locking = match el.iei {
                IEI_NATIONAL_SINGLE_SHIFT => false,
                IEI_NATIONAL_LOCKING_SHIFT => true,
                _ => continue,
            };
            if let Some(&nli) = el.data.first() {
                if let Some(lang) = NationalLanguage::from_id(nli) {
                    return Some((lang, is_locking));
                }
            }
        }
        None
    }

    /// Serialize to wire format: a length octet, then each element as
    /// `iei, len, data`.
    pub fn marshal(&self) -> Result<Vec<u8>, EncodeError> {
        let mut body = Vec::new();
        for el in &self.elements {
            if el.data.len() > 255 {
                return Err(EncodeError::new("ud_header", Cause::InvalidHeader));
            }
            body.push(el.iei);
            body.push(el.data.len() as u8);
            body.extend_from_slice(&el.data);
        }
        if body.len() > 255 {
            return Err(EncodeError::new("ud_header", Cause::InvalidHeader));
        }
        let mut out = Vec::with_capacity(body.len() + 1);
        out.push(body.len() as u8);
        out.extend(body);
        Ok(out)
    }

    /// Parse a header from `src`, where `src[0]` is the UDH length octet.
    /// Returns the header and the number of bytes consumed (length octet +
    /// declared length).
    pub fn unmarshal(src: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
        if src.is_empty() {
            return Err(DecodeError::new("ud_header", offset, Cause::Underflow));
        }
        let len = src[0] as usize;
        if src.len() < 1 + len {
            return Err(DecodeError::new("ud_header", offset, Cause::Underflow));
        }
        let body = &src[1..1 + len];
        let mut elements = Vec::new();
        let mut pos = 0;
        while pos < body.len() {
            if pos + 2 > body.len() {
                return Err(DecodeError::new("ud_header", offset + 1 + pos, Cause::InvalidHeader));
            }
            let iei = body[pos];
            let el_len = body[pos + 1] as usize;
            let data_start = pos + 2;
            let data_end = data_start + el_len;
            if data_end > body.len() {
                return Err(DecodeError::new("ud_header", offset + 1 + pos, Cause::InvalidHeader));
            }
            elements.push(InformationElement { iei, data: body[data_start..data_end].to_vec() });
            pos = data_end;
        }
        Ok((UserDataHeader { elements }, 1 + len))
    }
}
