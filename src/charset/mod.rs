//! Character-set table registry (3GPP TS 23.038), keyed by national language
//! identifier. Tables are stored once as static arrays in [`tables`], and
//! [`NationalLanguage`] selects which locking/shift pair an encode/decode
//! operation uses.
mod tables;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use tables::TableEntry;

/// National Language Identifier (3GPP TS 23.038 §6.2.1). `Default` is NLI 0;
/// the others are 3GPP-assigned identifiers for the subset of national
/// tables this crate carries data for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NationalLanguage {
    Default,
    Turkish,
    Spanish,
}

impl NationalLanguage {
    /// 3GPP TS 23.038 NLI value for this identifier.
    pub fn id(self) -> u8 {
        match self {
            NationalLanguage::Default => 0,
            NationalLanguage::Turkish => 1,
            NationalLanguage::Spanish => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(NationalLanguage::Default),
            1 => Some(NationalLanguage::Turkish),
            2 => Some(NationalLanguage::Spanish),
            _ => None,
        }
    }

    fn locking_raw(self) -> &'static [TableEntry] {
        match self {
            NationalLanguage::Default => tables::DEFAULT_LOCKING,
            NationalLanguage::Turkish => tables::TURKISH_LOCKING,
            NationalLanguage::Spanish => tables::SPANISH_LOCKING,
        }
    }

    fn shift_raw(self) -> &'static [TableEntry] {
        match self {
            NationalLanguage::Default => tables::DEFAULT_SHIFT,
            NationalLanguage::Turkish => tables::TURKISH_SHIFT,
            NationalLanguage::Spanish => tables::SPANISH_SHIFT,
        }
    }

    /// The locking-shift table (septet -> char, and its inverse) for this
    /// language.
    pub fn locking(self) -> &'static Table {
        table_for(self, TableKind::Locking)
    }

    /// The single-shift table (septet -> char, and its inverse) for this
    /// language.
    pub fn shift(self) -> &'static Table {
        table_for(self, TableKind::Shift)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
enum TableKind {
    Locking,
    Shift,
}

/// A bidirectional septet <-> code point mapping. The forward map
/// (septet -> char) is exactly the static data; the reverse map is built
/// once, taking the smallest septet for any code point reachable by more
/// than one septet (first table in iteration order wins).
pub struct Table {
    forward: &'static [TableEntry],
    reverse: HashMap<char, u8>,
}

impl Table {
    fn build(entries: &'static [TableEntry]) -> Self {
        let mut reverse = HashMap::with_capacity(entries.len());
        for &(septet, ch) in entries {
            reverse
                .entry(ch)
                .and_modify(|existing: &mut u8| {
                    if septet < *existing {
                        *existing = septet;
                    }
                })
                .or_insert(septet);
        }
        Table { forward: entries, reverse }
    }

    pub fn decode(&self, septet: u8) -> Option<char> {
        self.forward
            .iter()
            .find(|&&(s, _)| s == septet)
            .map(|&(_, c)| c)
    }

    pub fn encode(&self, ch: char) -> Option<u8> {
        self.reverse.get(&ch).copied()
    }
}

fn table_for(lang: NationalLanguage, kind: TableKind) -> &'static Table {
    static CACHE: OnceLock<std::sync::Mutex<HashMap<(NationalLanguage, TableKind), &'static Table>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| std::sync::Mutex::new(HashMap::new()));
    let mut guard = cache.lock().expect("charset table cache poisoned");
    if let Some(t) = guard.get(&(lang, kind)) {
        return t;
    }
    let entries = match kind {
        TableKind::Locking => lang.locking_raw(),
        TableKind::Shift => lang.shift_raw(),
    };
    let table: &'static Table = Box::leak(Box::new(Table::build(entries)));
    guard.insert((lang, kind), table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locking_round_trips_ascii() {
        let t = NationalLanguage::Default.locking();
        assert_eq!(t.decode(0x41), Some('A'));
        assert_eq!(t.encode('A'), Some(0x41));
    }

    #[test]
    fn default_shift_has_euro_sign() {
        let t = NationalLanguage::Default.shift();
        assert_eq!(t.decode(0x65), Some('\u{20AC}'));
        assert_eq!(t.encode('\u{20AC}'), Some(0x65));
    }

    #[test]
    fn turkish_locking_differs_from_default() {
        let turkish = NationalLanguage::Turkish.locking();
        assert_eq!(turkish.decode(0x04), Some('ě'));
    }

    #[test]
    fn reverse_lookup_picks_smallest_septet_on_ambiguity() {
        // Spanish locking aliases Default, whose reverse map is already
        // unambiguous; exercise the tie-break path directly instead.
        let entries: &'static [TableEntry] = &[(0x05, 'x'), (0x02, 'x')];
        let table = Table::build(entries);
        assert_eq!(table.encode('x'), Some(0x02));
    }
}
