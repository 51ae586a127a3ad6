//! Concatenated-SMS reassembly (3GPP TS 23.040 §9.2.3.24.1). A plain struct
//! owned by a single caller: no internal locking, no background task.
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::{Cause, DecodeError};
use crate::tpdu::Tpdu;
use crate::userdata::Alphabet;

/// Identifies one in-flight concatenated message: the originating/destination
/// address (whichever direction supplies one), the CSMS reference, and the
/// DCS alphabet — two senders can reuse the same reference
/// against the same address in different alphabets without colliding.
/// 8-bit and 16-bit references are kept in the same numeric space since
/// 3GPP never has both active for the same (address, reference) pair in
/// practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PipeKey {
    address: String,
    reference: u16,
    alphabet: Alphabet,
}

struct Pipe {
    total: u8,
    segments: HashMap<u8, Tpdu>,
    first_seen: Instant,
}

/// Reassembly engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct CollectorConfig {
    /// Drop an incomplete pipe once it's been open this long.
    pub timeout: Duration,
    /// Reject a segment whose `(reference, sequence)` has already been
    /// seen, instead of silently overwriting it.
    pub strict: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig { timeout: Duration::from_secs(24 * 60 * 60), strict: false }
    }
}

/// A snapshot of one in-flight pipe, for diagnostics.
#[derive(Debug, Clone)]
pub struct PipeStatus {
    pub address: String,
    pub reference: u16,
    pub total: u8,
    pub received: u8,
    pub age: Duration,
}

/// Reassembles concatenated TPDU segments into complete ordered groups.
/// Not `Send`/`Sync`-guarded internally — one `Collector` belongs to one
/// caller, wrapped in a `Mutex` by that caller if it needs to cross threads.
pub struct Collector {
    config: CollectorConfig,
    pipes: HashMap<PipeKey, Pipe>,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Collector { config, pipes: HashMap::new() }
    }

    fn address_of(tpdu: &Tpdu) -> Option<String> {
        match tpdu {
            Tpdu::Submit(t) => Some(t.destination_address.digits.clone()),
            Tpdu::Deliver(t) => Some(t.originating_address.digits.clone()),
            _ => None,
        }
    }

    fn concatenation(tpdu: &Tpdu) -> Option<crate::udh::Concatenation> {
        match tpdu {
            Tpdu::Submit(t) => t.user_data.header.concatenation_data(),
            Tpdu::Deliver(t) => t.user_data.header.concatenation_data(),
            _ => None,
        }
    }

    fn alphabet_of(tpdu: &Tpdu) -> Alphabet {
        match tpdu {
            Tpdu::Submit(t) => t.data_coding_scheme.alphabet,
            Tpdu::Deliver(t) => t.data_coding_scheme.alphabet,
            _ => Alphabet::Gsm7,
        }
    }

    /// Feed one TPDU in. Returns `Some(segments)`, in sequence order, once
    /// every part of its group has arrived; `None` while the group is still
    /// incomplete. A TPDU with no concatenation header is treated as a
    /// complete one-segment group and returned immediately.
    pub fn collect(&mut self, tpdu: Tpdu) -> Result<Option<Vec<Tpdu>>, DecodeError> {
        self.evict_expired();
        let concat = match Self::concatenation(&tpdu) {
            Some(c) => c,
            None => return Ok(Some(vec![tpdu])),
        };
        let address = Self::address_of(&tpdu).unwrap_or_default();
        let alphabet = Self::alphabet_of(&tpdu);
        let key = PipeKey { address, reference: concat.reference, alphabet };
        let pipe = self.pipes.entry(key.clone()).or_insert_with(|| {
            debug!("opening reassembly pipe for reference {}", concat.reference);
            Pipe { total: concat.total, segments: HashMap::new(), first_seen: Instant::now() }
        });
        if pipe.segments.contains_key(&concat.sequence) {
            if self.config.strict {
                warn!("duplicate segment {} for reference {}", concat.sequence, concat.reference);
                return Err(DecodeError::new("ud_header", 0, Cause::DuplicateSegment));
            }
        }
        pipe.segments.insert(concat.sequence, tpdu);
        if pipe.segments.len() as u8 >= pipe.total {
            let pipe = self.pipes.remove(&key).expect("just inserted");
            let mut ordered: Vec<(u8, Tpdu)> = pipe.segments.into_iter().collect();
            ordered.sort_by_key(|(seq, _)| *seq);
            Ok(Some(ordered.into_iter().map(|(_, t)| t).collect()))
        } else {
            Ok(None)
        }
    }

    fn evict_expired(&mut self) {
        let timeout = self.config.timeout;
        self.pipes.retain(|key, pipe| {
            let expired = pipe.first_seen.elapsed() > timeout;
            if expired {
                warn!("dropping incomplete reassembly pipe for reference {} (timed out)", key.reference);
            }
            !expired
        });
    }

    /// Snapshot every pipe currently open, for diagnostics.
    pub fn pipes(&self) -> Vec<PipeStatus> {
        self.pipes
            .iter()
            .map(|(key, pipe)| PipeStatus {
                address: key.address.clone(),
                reference: key.reference,
                total: pipe.total,
                received: pipe.segments.len() as u8,
                age: pipe.first_seen.elapsed(),
            })
            .collect()
    }

    /// Discard all in-flight pipes.
    pub fn close(&mut self) {
        self.pipes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::encode::{encode, EncodeOptions};
    use crate::tpdu::Submit;

    fn submits_for(text: &str, reference: u16) -> Vec<Tpdu> {
        let mut opt = EncodeOptions::new(Address::international("555"));
        opt.reference = Some(reference);
        encode(text, &opt).unwrap()
    }

    #[test]
    fn single_segment_message_returns_immediately() {
        let mut c = Collector::new(CollectorConfig::default());
        let segments = submits_for("short", 1);
        assert_eq!(segments.len(), 1);
        let out = c.collect(segments.into_iter().next().unwrap()).unwrap();
        assert!(out.is_some());
    }

    #[test]
    fn out_of_order_segments_reassemble_in_sequence() {
        let mut c = Collector::new(CollectorConfig::default());
        let text: String = std::iter::repeat('a').take(306).collect();
        let mut segments = submits_for(&text, 7);
        assert_eq!(segments.len(), 2);
        let second = segments.pop().unwrap();
        let first = segments.pop().unwrap();
        assert!(c.collect(second).unwrap().is_none());
        let complete = c.collect(first).unwrap().unwrap();
        assert_eq!(complete.len(), 2);
        if let Tpdu::Submit(Submit { user_data, .. }) = &complete[0] {
            assert_eq!(user_data.header.concatenation_data().unwrap().sequence, 1);
        } else {
            panic!("expected submit");
        }
    }

    #[test]
    fn duplicate_segment_is_rejected_in_strict_mode() {
        let mut c = Collector::new(CollectorConfig { strict: true, ..CollectorConfig::default() });
        let text: String = std::iter::repeat('a').take(306).collect();
        let segments = submits_for(&text, 3);
        let first = segments[0].clone();
        c.collect(first.clone()).unwrap();
        let err = c.collect(first).unwrap_err();
        assert_eq!(err.cause, Cause::DuplicateSegment);
    }

    #[test]
    fn pipes_snapshot_reports_partial_progress() {
        let mut c = Collector::new(CollectorConfig::default());
        let text: String = std::iter::repeat('a').take(306).collect();
        let segments = submits_for(&text, 9);
        c.collect(segments[0].clone()).unwrap();
        let status = c.pipes();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].received, 1);
        assert_eq!(status[0].total, 2);
    }
}
