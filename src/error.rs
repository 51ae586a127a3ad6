//! Error handling: a `failure::Fail` enum with a `#[fail(display = ...)]`
//! on every variant, so a [`DecodeError`]/[`EncodeError`] can be printed
//! without a caller ever reaching for `Debug`.
use failure::Fail;

/// The leaf failure a primitive codec reports. Never constructed directly by
/// callers; always wrapped in a [`DecodeError`] or [`EncodeError`].
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum Cause {
    /// Input ended before a required field could be read.
    #[fail(display = "unexpected end of input")]
    Underflow,
    /// A semi-octet digit, or digit string, used a byte outside the dial
    /// alphabet (`0-9 * # a b c`).
    #[fail(display = "invalid digit")]
    InvalidDigit,
    /// A BCD octet had a nibble greater than 9.
    #[fail(display = "invalid BCD octet")]
    InvalidOctet,
    /// An integer was outside the range a codec can represent.
    #[fail(display = "integer out of range")]
    InvalidInteger,
    /// A strict-mode GSM-7 decode hit a septet absent from the active table.
    #[fail(display = "invalid septet")]
    InvalidSeptet,
    /// A GSM-7 encode hit a code point absent from both the locking and
    /// shift tables in use.
    #[fail(display = "character not representable in GSM-7 alphabet")]
    InvalidUtf8,
    /// A user-data-header element's declared length overran the header.
    #[fail(display = "invalid user data header")]
    InvalidHeader,
    /// The DCS byte selected an alphabet outside {GSM-7, 8-bit, UCS-2}.
    #[fail(display = "unsupported alphabet")]
    UnsupportedAlphabet,
    /// A collector running in strict mode saw the same `(ref, seq)` twice.
    #[fail(display = "duplicate segment")]
    DuplicateSegment,
}

/// A decode failure: which field, at what absolute octet offset into the
/// input, and why.
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
#[fail(display = "failed to decode field `{}` at offset {}: {}", field, offset, cause)]
pub struct DecodeError {
    pub field: &'static str,
    pub offset: usize,
    #[cause]
    pub cause: Cause,
}

impl DecodeError {
    pub fn new(field: &'static str, offset: usize, cause: Cause) -> Self {
        DecodeError { field, offset, cause }
    }
}

/// An encode failure: which field, and why.
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
#[fail(display = "failed to encode field `{}`: {}", field, cause)]
pub struct EncodeError {
    pub field: &'static str,
    #[cause]
    pub cause: Cause,
}

impl EncodeError {
    pub fn new(field: &'static str, cause: Cause) -> Self {
        EncodeError { field, cause }
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Raised when a `DecodeError` or `EncodeError` from one field needs
/// rewrapping under the name of the composite field that contains it (e.g.
/// an `Address` failure surfacing as the TPDU's `da` field).
pub(crate) trait Rewrap<T> {
    fn rewrap(self, field: &'static str) -> T;
}

impl Rewrap<DecodeError> for DecodeError {
    fn rewrap(self, field: &'static str) -> DecodeError {
        DecodeError::new(field, self.offset, self.cause)
    }
}

impl Rewrap<EncodeError> for EncodeError {
    fn rewrap(self, field: &'static str) -> EncodeError {
        EncodeError::new(field, self.cause)
    }
}
