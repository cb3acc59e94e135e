//! Lyric text → phoneme codes → lyric SysEx.

use crate::error::{Error, Result};
use crate::message::{ExclusiveMessage, DEFAULT_MAX_PHONEMES};
use crate::phoneme::{PhonemeCode, PhonemeTable};
use tracing::debug;

/// One matched unit of the lyric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub unit: String,
    /// Char index into the lyric as given, whitespace included.
    pub position: usize,
}

/// Encodes lyrics against a borrowed table.
///
/// # Example
/// ```ignore
/// let encoder = LyricEncoder::new(PhonemeTable::global());
/// let sysex = encoder.encode("なつがすぎ かぜあざみ")?;
/// session.send_exclusive(sysex.as_bytes())?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LyricEncoder<'t> {
    table: &'t PhonemeTable,
    max_phonemes: Option<usize>,
}

impl<'t> LyricEncoder<'t> {
    /// Uses the device's lyric buffer size as the length limit.
    pub fn new(table: &'t PhonemeTable) -> Self {
        Self {
            table,
            max_phonemes: Some(DEFAULT_MAX_PHONEMES),
        }
    }

    /// `None` disables the length check.
    pub fn max_phonemes(mut self, max: Option<usize>) -> Self {
        self.max_phonemes = max;
        self
    }

    pub fn table(&self) -> &'t PhonemeTable {
        self.table
    }

    /// Split `text` into units by greedy longest match. Whitespace is dropped
    /// first and carries no meaning.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let (stripped, origin): (String, Vec<usize>) = text
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| (c, i))
            .unzip();
        tokenize_stripped(self.table, &stripped, &origin)
    }

    pub fn encode(&self, text: &str) -> Result<ExclusiveMessage> {
        let tokens = self.tokenize(text)?;

        if let Some(max) = self.max_phonemes {
            if tokens.len() > max {
                return Err(Error::LyricTooLong {
                    count: tokens.len(),
                    max,
                });
            }
        }

        let codes = tokens
            .iter()
            .map(|t| self.table.lookup(&t.unit))
            .collect::<Result<Vec<PhonemeCode>>>()?;

        debug!(phonemes = codes.len(), "lyric encoded");
        Ok(ExclusiveMessage::from_codes(&codes))
    }
}

/// Encode without a length limit.
pub fn encode(text: &str, table: &PhonemeTable) -> Result<ExclusiveMessage> {
    LyricEncoder::new(table).max_phonemes(None).encode(text)
}

/// `origin[i]` is the caller's char index of the i-th char of `text`.
fn tokenize_stripped(table: &PhonemeTable, text: &str, origin: &[usize]) -> Result<Vec<Token>> {
    // Byte offset of every char boundary, including the end.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = bounds.len() - 1;

    let mut tokens = Vec::with_capacity(char_count);
    let mut pos = 0;

    while pos < char_count {
        let longest = table.longest_unit().min(char_count - pos);
        let matched = (1..=longest).rev().find_map(|len| {
            let unit = &text[bounds[pos]..bounds[pos + len]];
            table.contains(unit).then_some((len, unit))
        });

        match matched {
            Some((len, unit)) => {
                tokens.push(Token {
                    unit: unit.to_string(),
                    position: origin[pos],
                });
                pos += len;
            }
            None => {
                let found = text[bounds[pos]..].chars().next().unwrap_or_default();
                return Err(Error::UnmappedText {
                    position: origin[pos],
                    found,
                });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::HEADER;

    fn abc_table() -> PhonemeTable {
        PhonemeTable::builder()
            .block(0, ["あ", "い", "う"])
            .freeze()
            .unwrap()
    }

    #[test]
    fn test_encode_simple() {
        let msg = encode("あいう", &abc_table()).unwrap();
        let mut expected = HEADER.to_vec();
        expected.extend([0, 1, 2, 0xF7]);
        assert_eq!(msg.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_empty_text() {
        let msg = encode("", &abc_table()).unwrap();
        assert_eq!(msg.len(), HEADER.len() + 1);
        assert_eq!(msg.phoneme_count(), 0);

        let msg = encode(" \n\u{3000} ", &abc_table()).unwrap();
        assert_eq!(msg.phoneme_count(), 0);
    }

    #[test]
    fn test_whitespace_ignored() {
        let table = abc_table();
        assert_eq!(
            encode("あ い\u{3000}う\n", &table).unwrap(),
            encode("あいう", &table).unwrap()
        );
    }

    #[test]
    fn test_longest_match_wins() {
        let table = PhonemeTable::global();
        let tokens = LyricEncoder::new(table).tokenize("きゃき").unwrap();
        let units: Vec<&str> = tokens.iter().map(|t| t.unit.as_str()).collect();
        assert_eq!(units, vec!["きゃ", "き"]);
        assert_eq!(tokens[1].position, 2);

        let msg = encode("きゃき", table).unwrap();
        assert_eq!(msg.phoneme_bytes(), &[15, 6]);
    }

    #[test]
    fn test_ascii_special_tokens() {
        let table = PhonemeTable::global();
        let msg = encode("N\\N", table).unwrap();
        assert_eq!(msg.phoneme_bytes(), &[0x7B, 0x7D]);
    }

    #[test]
    fn test_unmapped_position() {
        let err = encode("あい x う", &abc_table()).unwrap_err();
        assert_eq!(
            err,
            Error::UnmappedText {
                position: 3,
                found: 'x'
            }
        );
    }

    #[test]
    fn test_positions_count_whitespace() {
        let tokens = LyricEncoder::new(&abc_table())
            .tokenize(" あ\u{3000}い\nう")
            .unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 3, 5]);

        let err = encode("あ\n\nえ", &abc_table()).unwrap_err();
        assert_eq!(
            err,
            Error::UnmappedText {
                position: 3,
                found: 'え'
            }
        );
    }

    #[test]
    fn test_lone_small_kana_is_unmapped() {
        let err = encode("ゃ", PhonemeTable::global()).unwrap_err();
        assert!(matches!(err, Error::UnmappedText { position: 0, .. }));
    }

    #[test]
    fn test_length_limit() {
        let table = abc_table();
        let encoder = LyricEncoder::new(&table).max_phonemes(Some(2));
        assert_eq!(
            encoder.encode("あいう"),
            Err(Error::LyricTooLong { count: 3, max: 2 })
        );
        assert!(encoder.encode("あい").is_ok());
    }

    #[test]
    fn test_deterministic() {
        let text = "なつがすぎ かぜあざみ";
        let table = PhonemeTable::global();
        assert_eq!(encode(text, table).unwrap(), encode(text, table).unwrap());
    }
}
