//! Golden phoneme table: every unit of the NSX-39 catalog and its code.

use uta_lyric::{encode, Error, LyricEncoder, PhonemeTable};

#[rustfmt::skip]
const GOLDEN: &[(&str, u8)] = &[
    ("あ", 0x00),
    ("い", 0x01),
    ("う", 0x02),
    ("え", 0x03),
    ("お", 0x04),
    ("か", 0x05),
    ("き", 0x06),
    ("く", 0x07),
    ("け", 0x08),
    ("こ", 0x09),
    ("が", 0x0A),
    ("ぎ", 0x0B),
    ("ぐ", 0x0C),
    ("げ", 0x0D),
    ("ご", 0x0E),
    ("きゃ", 0x0F),
    ("きゅ", 0x10),
    ("きょ", 0x11),
    ("ぎゃ", 0x12),
    ("ぎゅ", 0x13),
    ("ぎょ", 0x14),
    ("さ", 0x15),
    ("すぃ", 0x16),
    ("す", 0x17),
    ("せ", 0x18),
    ("そ", 0x19),
    ("ざ", 0x1A),
    ("ずぃ", 0x1B),
    ("ず", 0x1C),
    ("ぜ", 0x1D),
    ("ぞ", 0x1E),
    ("しゃ", 0x1F),
    ("し", 0x20),
    ("しゅ", 0x21),
    ("しぇ", 0x22),
    ("しょ", 0x23),
    ("じゃ", 0x24),
    ("じ", 0x25),
    ("じゅ", 0x26),
    ("じぇ", 0x27),
    ("じょ", 0x28),
    ("た", 0x29),
    ("てぃ", 0x2A),
    ("とぅ", 0x2B),
    ("て", 0x2C),
    ("と", 0x2D),
    ("だ", 0x2E),
    ("でぃ", 0x2F),
    ("どぅ", 0x30),
    ("で", 0x31),
    ("ど", 0x32),
    ("てゅ", 0x33),
    ("でゅ", 0x34),
    ("ちゃ", 0x35),
    ("ち", 0x36),
    ("ちゅ", 0x37),
    ("ちぇ", 0x38),
    ("ちょ", 0x39),
    ("つぁ", 0x3A),
    ("つぃ", 0x3B),
    ("つ", 0x3C),
    ("つぇ", 0x3D),
    ("つぉ", 0x3E),
    ("な", 0x3F),
    ("に", 0x40),
    ("ぬ", 0x41),
    ("ね", 0x42),
    ("の", 0x43),
    ("にゃ", 0x44),
    ("にゅ", 0x45),
    ("にょ", 0x46),
    ("は", 0x47),
    ("ひ", 0x48),
    ("ふ", 0x49),
    ("へ", 0x4A),
    ("ほ", 0x4B),
    ("ば", 0x4C),
    ("び", 0x4D),
    ("ぶ", 0x4E),
    ("べ", 0x4F),
    ("ぼ", 0x50),
    ("ぱ", 0x51),
    ("ぴ", 0x52),
    ("ぷ", 0x53),
    ("ぺ", 0x54),
    ("ぽ", 0x55),
    ("ひゃ", 0x56),
    ("ひゅ", 0x57),
    ("ひょ", 0x58),
    ("びゃ", 0x59),
    ("びゅ", 0x5A),
    ("びょ", 0x5B),
    ("ぴゃ", 0x5C),
    ("ぴゅ", 0x5D),
    ("ぴょ", 0x5E),
    ("ふぁ", 0x5F),
    ("ふぃ", 0x60),
    ("ふゅ", 0x61),
    ("ふぇ", 0x62),
    ("ふぉ", 0x63),
    ("ま", 0x64),
    ("み", 0x65),
    ("む", 0x66),
    ("め", 0x67),
    ("も", 0x68),
    ("みゃ", 0x69),
    ("みゅ", 0x6A),
    ("みょ", 0x6B),
    ("や", 0x6C),
    ("ゆ", 0x6D),
    ("よ", 0x6E),
    ("ら", 0x6F),
    ("り", 0x70),
    ("る", 0x71),
    ("れ", 0x72),
    ("ろ", 0x73),
    ("りゃ", 0x74),
    ("りゅ", 0x75),
    ("りょ", 0x76),
    ("わ", 0x77),
    ("うぃ", 0x78),
    ("うぇ", 0x79),
    ("うぉ", 0x7A),
    ("ん", 0x7B),
    ("づぁ", 0x1A),
    ("づぃ", 0x1B),
    ("づ", 0x1C),
    ("づぇ", 0x1D),
    ("づぉ", 0x1E),
    ("ゐ", 0x78),
    ("ゑ", 0x79),
    ("を", 0x7A),
    ("N\\", 0x7B),
    ("m", 0x7C),
    ("N", 0x7D),
    ("J", 0x7E),
    ("n", 0x7F),
];

#[test]
fn test_golden_table_complete() {
    let table = PhonemeTable::global();
    assert_eq!(table.len(), GOLDEN.len());

    for &(unit, code) in GOLDEN {
        assert_eq!(
            table.lookup(unit).map(|c| c.value()),
            Ok(code),
            "unit {unit:?} should map to {code:#04x}"
        );
    }
}

#[test]
fn test_every_unit_encodes_alone() {
    let table = PhonemeTable::global();
    for &(unit, code) in GOLDEN {
        let msg = encode(unit, table).unwrap();
        assert_eq!(msg.phoneme_bytes(), &[code], "unit {unit:?}");
    }
}

/// The lyric sung by the demo driver.
#[test]
fn test_demo_lyric() {
    let text = "なつがすぎ かぜあざみ だれのあこがれに さまよう\
                あおぞらに のこされた わたしのこころは なつもよう";
    let msg = LyricEncoder::new(PhonemeTable::global()).encode(text).unwrap();

    assert_eq!(msg.phoneme_count(), 45);
    assert_eq!(&msg.phoneme_bytes()[..5], &[0x3F, 0x3C, 0x0A, 0x17, 0x0B]);
    assert_eq!(*msg.as_bytes().last().unwrap(), 0xF7);
}

#[test]
fn test_unsupported_script_reports_position() {
    let err = encode("さくらsakura", PhonemeTable::global()).unwrap_err();
    assert_eq!(
        err,
        Error::UnmappedText {
            position: 3,
            found: 's'
        }
    );
}
