//! Encode, decode, and reassemble SMS TPDUs (3GPP TS 23.038 / TS 23.040) in
//! PDU mode.
//!
//! The module tree follows the protocol layering bottom-up: primitive
//! codecs ([`bcd`], [`semioctet`], [`septet`], [`charset`], [`gsm7`]) feed
//! the field-level codecs ([`address`], [`timestamp`], [`udh`],
//! [`userdata`]), which feed the message-level codec ([`tpdu`]) and its
//! PDU-mode framing ([`pdumode`]). [`encode`], [`decode`], and [`collector`]
//! sit on top as the programmatic surface most callers want.
#[macro_use]
extern crate log;
extern crate encoding;
extern crate failure;
#[macro_use]
extern crate failure_derive;
extern crate rand;

pub mod address;
pub mod bcd;
pub mod charset;
pub mod collector;
pub mod decode;
pub mod encode;
pub mod error;
pub mod gsm7;
pub mod pdumode;
pub mod semioctet;
pub mod septet;
pub mod timestamp;
pub mod tpdu;
pub mod udh;
pub mod userdata;

pub use address::{Address, AddressType, NumberingPlan, TypeOfNumber};
pub use charset::NationalLanguage;
pub use collector::{Collector, CollectorConfig};
pub use decode::{decode as decode_message, DecodedMessage};
pub use encode::{encode as encode_message, AlphabetChoice, EncodeDirection, EncodeOptions};
pub use error::{Cause, DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use pdumode::PduModeFrame;
pub use timestamp::Timestamp;
pub use tpdu::{Command, Deliver, DeliverReport, Direction, StatusReport, Submit, SubmitReport, Tpdu, ValidityPeriod};
pub use udh::{Concatenation, InformationElement, UserDataHeader};
pub use userdata::{Alphabet, Dcs, UserData};
