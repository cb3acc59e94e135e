//! Phoneme table for the NSX-39 lyric protocol.
//!
//! Codes are positional: the base catalog is numbered from 0 in the vendor's
//! order, then two fixed-offset blocks are laid over it. Reordering the
//! catalog changes what the device sings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::trace;

/// Vendor catalog, one row per mora group. Code = index.
#[rustfmt::skip]
const BASE_CATALOG: &[&str] = &[
    "あ", "い", "う", "え", "お",
    "か", "き", "く", "け", "こ",
    "が", "ぎ", "ぐ", "げ", "ご",
    "きゃ", "きゅ", "きょ",
    "ぎゃ", "ぎゅ", "ぎょ",
    "さ", "すぃ", "す", "せ", "そ",
    "ざ", "ずぃ", "ず", "ぜ", "ぞ",
    "しゃ", "し", "しゅ", "しぇ", "しょ",
    "じゃ", "じ", "じゅ", "じぇ", "じょ",
    "た", "てぃ", "とぅ", "て", "と",
    "だ", "でぃ", "どぅ", "で", "ど",
    "てゅ", "でゅ",
    "ちゃ", "ち", "ちゅ", "ちぇ", "ちょ",
    "つぁ", "つぃ", "つ", "つぇ", "つぉ",
    "な", "に", "ぬ", "ね", "の",
    "にゃ", "にゅ", "にょ",
    "は", "ひ", "ふ", "へ", "ほ",
    "ば", "び", "ぶ", "べ", "ぼ",
    "ぱ", "ぴ", "ぷ", "ぺ", "ぽ",
    "ひゃ", "ひゅ", "ひょ",
    "びゃ", "びゅ", "びょ",
    "ぴゃ", "ぴゅ", "ぴょ",
    "ふぁ", "ふぃ", "ふゅ", "ふぇ", "ふぉ",
    "ま", "み", "む", "め", "も",
    "みゃ", "みゅ", "みょ",
    "や", "ゆ", "よ",
    "ら", "り", "る", "れ", "ろ",
    "りゃ", "りゅ", "りょ",
    "わ", "うぃ", "うぇ", "うぉ", "ん",
];

/// Extended fricatives (づ row).
pub const EXTENDED_FRICATIVE_OFFSET: u8 = 0x1A;
const EXTENDED_FRICATIVES: &[&str] = &["づぁ", "づぃ", "づ", "づぇ", "づぉ"];

/// Archaic kana plus the nasal-final assimilation markers.
pub const SPECIAL_TOKEN_OFFSET: u8 = 0x78;
const SPECIAL_TOKENS: &[&str] = &["ゐ", "ゑ", "を", "N\\", "m", "N", "J", "n"];

/// One phonetic unit as understood by the synthesizer (7-bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PhonemeCode(u8);

impl PhonemeCode {
    pub const MAX: u8 = 0x7F;

    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::CodeOutOfRange(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PhonemeCode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PhonemeCode> for u8 {
    fn from(code: PhonemeCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for PhonemeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Immutable unit → code mapping.
///
/// Build the stock table with [`PhonemeTable::build`], borrow the shared
/// instance with [`PhonemeTable::global`], or assemble a custom bank with
/// [`PhonemeTable::builder`]. There is no way to mutate a table once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonemeTable {
    /// Entries in first-insertion order.
    entries: Vec<(String, PhonemeCode)>,
    index: HashMap<String, usize>,
    /// Length of the longest unit, in chars.
    longest_unit: usize,
}

impl PhonemeTable {
    pub fn builder() -> PhonemeTableBuilder {
        PhonemeTableBuilder::default()
    }

    /// The stock NSX-39 table. Pure: every call yields an equal table.
    pub fn build() -> Self {
        Self::builder()
            .block(0, BASE_CATALOG.iter().copied())
            .block(EXTENDED_FRICATIVE_OFFSET, EXTENDED_FRICATIVES.iter().copied())
            .block(SPECIAL_TOKEN_OFFSET, SPECIAL_TOKENS.iter().copied())
            .freeze()
            .expect("BUG: stock catalog should fit in 7 bits")
    }

    /// Process-wide stock table, built on first use.
    pub fn global() -> &'static PhonemeTable {
        static TABLE: OnceLock<PhonemeTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    pub fn lookup(&self, unit: &str) -> Result<PhonemeCode> {
        self.get(unit)
            .ok_or_else(|| Error::UnknownPhoneme(unit.to_string()))
    }

    pub fn get(&self, unit: &str) -> Option<PhonemeCode> {
        self.index.get(unit).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.index.contains_key(unit)
    }

    /// First unit (in catalog order) carrying `code`. Several units may share
    /// a code once the offset blocks are applied.
    pub fn unit_for(&self, code: PhonemeCode) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(unit, _)| unit.as_str())
    }

    pub fn longest_unit(&self) -> usize {
        self.longest_unit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PhonemeCode)> {
        self.entries.iter().map(|(unit, code)| (unit.as_str(), *code))
    }
}

impl Default for PhonemeTable {
    fn default() -> Self {
        Self::build()
    }
}

/// Collects numbered blocks of units; later blocks overwrite earlier codes
/// for the same unit.
#[derive(Debug, Default)]
pub struct PhonemeTableBuilder {
    blocks: Vec<(u8, Vec<String>)>,
}

impl PhonemeTableBuilder {
    /// Number `units` sequentially from `start`.
    pub fn block<I, S>(mut self, start: u8, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks
            .push((start, units.into_iter().map(Into::into).collect()));
        self
    }

    pub fn freeze(self) -> Result<PhonemeTable> {
        let mut entries: Vec<(String, PhonemeCode)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut longest_unit = 0;

        for (start, units) in self.blocks {
            for (offset, unit) in units.into_iter().enumerate() {
                let raw = usize::from(start) + offset;
                let code = u8::try_from(raw)
                    .map_err(|_| Error::CodeOutOfRange(u8::MAX))
                    .and_then(PhonemeCode::new)?;

                longest_unit = longest_unit.max(unit.chars().count());
                match index.get(&unit) {
                    Some(&i) => {
                        trace!(unit = %unit, old = %entries[i].1, new = %code, "phoneme overwritten");
                        entries[i].1 = code;
                    }
                    None => {
                        index.insert(unit.clone(), entries.len());
                        entries.push((unit, code));
                    }
                }
            }
        }

        Ok(PhonemeTable {
            entries,
            index,
            longest_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_catalog_positions() {
        let table = PhonemeTable::build();
        assert_eq!(table.lookup("あ").unwrap().value(), 0);
        assert_eq!(table.lookup("お").unwrap().value(), 4);
        assert_eq!(table.lookup("か").unwrap().value(), 5);
        assert_eq!(table.lookup("きゃ").unwrap().value(), 15);
        assert_eq!(table.lookup("さ").unwrap().value(), 21);
        assert_eq!(table.lookup("ん").unwrap().value(), 0x7B);
    }

    #[test]
    fn test_offset_blocks() {
        let table = PhonemeTable::build();
        assert_eq!(table.lookup("づぁ").unwrap().value(), 0x1A);
        assert_eq!(table.lookup("づぉ").unwrap().value(), 0x1E);
        assert_eq!(table.lookup("ゐ").unwrap().value(), 0x78);
        assert_eq!(table.lookup("N\\").unwrap().value(), 0x7B);
        assert_eq!(table.lookup("n").unwrap().value(), 0x7F);
    }

    #[test]
    fn test_unknown_phoneme() {
        let table = PhonemeTable::build();
        assert_eq!(
            table.lookup("x"),
            Err(Error::UnknownPhoneme("x".to_string()))
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(PhonemeTable::build(), PhonemeTable::build());
        assert_eq!(PhonemeTable::global(), &PhonemeTable::build());
    }

    #[test]
    fn test_all_codes_are_data_bytes() {
        let table = PhonemeTable::build();
        assert_eq!(table.len(), BASE_CATALOG.len() + 5 + 8);
        assert!(table.iter().all(|(_, code)| code.value() <= 0x7F));
    }

    #[test]
    fn test_longest_unit() {
        assert_eq!(PhonemeTable::build().longest_unit(), 2);
    }

    #[test]
    fn test_later_block_overwrites() {
        let table = PhonemeTable::builder()
            .block(0, ["a", "b"])
            .block(10, ["b"])
            .freeze()
            .unwrap();
        assert_eq!(table.lookup("a").unwrap().value(), 0);
        assert_eq!(table.lookup("b").unwrap().value(), 10);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_block_past_seven_bits_rejected() {
        let result = PhonemeTable::builder().block(0x7F, ["x", "y"]).freeze();
        assert!(matches!(result, Err(Error::CodeOutOfRange(_))));
    }

    #[test]
    fn test_unit_for_prefers_catalog_order() {
        let table = PhonemeTable::build();
        let code = PhonemeCode::new(0x7B).unwrap();
        assert_eq!(table.unit_for(code), Some("ん"));
    }

    #[test]
    fn test_code_range() {
        assert!(PhonemeCode::new(0x7F).is_ok());
        assert_eq!(PhonemeCode::new(0x80), Err(Error::CodeOutOfRange(0x80)));
    }
}
