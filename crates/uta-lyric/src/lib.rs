//! Lyric subsystem for the uta singing driver.
//!
//! Maps kana lyrics onto the NSX-39 phoneme catalog and frames them as the
//! lyric-write System Exclusive message the device expects.
//!
//! # Example
//!
//! ```ignore
//! use uta_lyric::{LyricEncoder, PhonemeTable};
//!
//! let sysex = LyricEncoder::new(PhonemeTable::global()).encode("さくら さくら")?;
//! assert_eq!(sysex.phoneme_count(), 6);
//! ```

pub mod error;
pub use error::{Error, Result};

mod phoneme;
pub use phoneme::{
    PhonemeCode, PhonemeTable, PhonemeTableBuilder, EXTENDED_FRICATIVE_OFFSET,
    SPECIAL_TOKEN_OFFSET,
};

mod encoder;
pub use encoder::{encode, LyricEncoder, Token};

pub mod message;
pub use message::{ExclusiveMessage, DEFAULT_MAX_PHONEMES};
