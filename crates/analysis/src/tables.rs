//! Static character tables used by normalization and language detection.
//!
//! Everything here is a domain constant: symbol sets stripped before
//! detection, the two substitution tables, and the Traditional to Simplified
//! Chinese conversion.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use zhconv::{zhconv, Variant};

/// Chinese full-width punctuation stripped before detection.
pub const CHINESE_SYMBOLS: &str = "～！、，。？￥…×—·．：；“”‘’（）〈〉《》「」『』【】〔〕";

/// ASCII punctuation stripped before detection.
pub const ENGLISH_SYMBOLS: &str = "`~!@#$%^&*()-=_+[]\\{}|;':\",./<>?";

/// Other symbols stripped before detection.
pub const SPECIAL_SYMBOLS: &str = "£";

static SYMBOL_SET: Lazy<HashSet<char>> = Lazy::new(|| {
    CHINESE_SYMBOLS
        .chars()
        .chain(ENGLISH_SYMBOLS.chars())
        .chain(SPECIAL_SYMBOLS.chars())
        .collect()
});

/// Whether `c` belongs to one of the detection symbol sets.
pub fn is_symbol(c: char) -> bool {
    SYMBOL_SET.contains(&c)
}

/// Whether `c` is an emoji or an emoji presentation component
/// (variation selector, zero-width joiner, keycap, tag).
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1F02F // Mahjong tiles
            | 0x1F0A0..=0x1F0FF // Playing cards
            | 0x1F100..=0x1F1FF // Enclosed alphanumeric supplement, regional indicators
            | 0x1F200..=0x1F2FF // Enclosed ideographic supplement
            | 0x1F300..=0x1F5FF // Misc symbols and pictographs
            | 0x1F600..=0x1F64F // Emoticons
            | 0x1F680..=0x1F6FF // Transport and map
            | 0x1F700..=0x1F77F // Alchemical
            | 0x1F780..=0x1F7FF // Geometric shapes extended
            | 0x1F800..=0x1F8FF // Supplemental arrows-C
            | 0x1F900..=0x1F9FF // Supplemental symbols and pictographs
            | 0x1FA00..=0x1FA6F // Chess symbols
            | 0x1FA70..=0x1FAFF // Symbols and pictographs extended-A
            | 0x2600..=0x26FF // Misc symbols
            | 0x2700..=0x27BF // Dingbats
            | 0x2B00..=0x2BFF // Misc symbols and arrows
            | 0x2300..=0x23FF // Misc technical
            | 0x3030
            | 0x303D
            | 0x3297
            | 0x3299
            | 0x200D // Zero-width joiner
            | 0x20E3 // Combining enclosing keycap
            | 0xFE0E..=0xFE0F // Variation selectors
            | 0xE0020..=0xE007F // Tags
    )
}

/// Named substitution tables applied by the normalizer, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubstitutionTable {
    /// Typographic punctuation variants folded to ASCII.
    Punctuation,
    /// Decorative letter look-alikes that NFKC leaves alone.
    Symbol,
}

impl SubstitutionTable {
    /// All tables in application order.
    pub const ALL: [SubstitutionTable; 2] = [Self::Punctuation, Self::Symbol];

    /// The character map for this table.
    pub fn map(self) -> &'static HashMap<char, char> {
        match self {
            Self::Punctuation => &PUNCTUATION_MAP,
            Self::Symbol => &SYMBOL_MAP,
        }
    }

    /// Replace `c` if the table has an entry for it.
    pub fn substitute(self, c: char) -> char {
        self.map().get(&c).copied().unwrap_or(c)
    }
}

const SPECIAL_PUNCTUATION: &[(char, char)] = &[
    ('\u{2010}', '-'), // hyphen
    ('\u{2011}', '-'), // non-breaking hyphen
    ('\u{2012}', '-'), // figure dash
    ('\u{2013}', '-'), // en dash
    ('\u{2015}', '-'), // horizontal bar
    ('\u{2212}', '-'), // minus sign
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{201A}', '\''),
    ('\u{201B}', '\''),
    ('\u{2032}', '\''), // prime
    ('\u{00B4}', '\''), // acute accent
    ('\u{201E}', '"'),
    ('\u{201F}', '"'),
    ('\u{2033}', '"'), // double prime
    ('\u{00AB}', '"'),
    ('\u{00BB}', '"'),
    ('\u{2039}', '<'),
    ('\u{203A}', '>'),
    ('\u{2022}', '.'), // bullet
    ('\u{2027}', '.'), // hyphenation point
    ('\u{00B7}', '.'), // middle dot
    ('\u{00A1}', '!'),
    ('\u{01C3}', '!'), // latin retroflex click
    ('\u{00BF}', '?'),
    ('\u{037E}', ';'), // greek question mark
    ('\u{02D0}', ':'), // modifier triangular colon
    ('\u{0589}', ':'), // armenian full stop
    ('\u{2236}', ':'), // ratio
    ('\u{02DC}', '~'), // small tilde
    ('\u{223C}', '~'), // tilde operator
    ('\u{2044}', '/'), // fraction slash
    ('\u{2215}', '/'), // division slash
    ('\u{29F8}', '/'),
    ('\u{2216}', '\\'),
    ('\u{29F9}', '\\'),
];

const SPECIAL_SYMBOL_LETTERS: &[(char, char)] = &[
    ('\u{1D00}', 'a'), // small capital a
    ('\u{0299}', 'b'),
    ('\u{1D04}', 'c'),
    ('\u{1D05}', 'd'),
    ('\u{1D07}', 'e'),
    ('\u{A730}', 'f'),
    ('\u{0262}', 'g'),
    ('\u{029C}', 'h'),
    ('\u{026A}', 'i'),
    ('\u{1D0A}', 'j'),
    ('\u{1D0B}', 'k'),
    ('\u{029F}', 'l'),
    ('\u{1D0D}', 'm'),
    ('\u{0274}', 'n'),
    ('\u{1D0F}', 'o'),
    ('\u{1D18}', 'p'),
    ('\u{01EB}', 'q'),
    ('\u{0280}', 'r'),
    ('\u{A731}', 's'),
    ('\u{1D1B}', 't'),
    ('\u{1D1C}', 'u'),
    ('\u{1D20}', 'v'),
    ('\u{1D21}', 'w'),
    ('\u{028F}', 'y'),
    ('\u{1D22}', 'z'),
    ('\u{0251}', 'a'), // latin alpha
    ('\u{0261}', 'g'), // script g
    ('\u{0237}', 'j'), // dotless j
    ('\u{0269}', 'i'), // latin iota
    ('\u{028B}', 'v'), // v with hook
    ('\u{0250}', 'a'), // turned a
    ('\u{01DD}', 'e'), // turned e
    ('\u{0279}', 'r'), // turned r
    ('\u{0287}', 't'), // turned t
    ('\u{028E}', 'y'), // turned y
    ('\u{2C6F}', 'A'), // turned A
    ('\u{018E}', 'E'), // reversed E
    ('\u{2200}', 'A'), // for all
    ('\u{2203}', 'E'), // there exists
    ('\u{2208}', 'e'), // element of
    ('\u{2229}', 'n'), // intersection
    ('\u{222A}', 'u'), // union
    ('\u{0180}', 'b'),
    ('\u{00A9}', 'c'), // copyright sign
    ('\u{00AE}', 'r'), // registered sign
];

static PUNCTUATION_MAP: Lazy<HashMap<char, char>> =
    Lazy::new(|| SPECIAL_PUNCTUATION.iter().copied().collect());

static SYMBOL_MAP: Lazy<HashMap<char, char>> =
    Lazy::new(|| SPECIAL_SYMBOL_LETTERS.iter().copied().collect());

/// Convert Traditional Chinese to Simplified with the OpenCC-derived
/// character and phrase tables of `zhconv`. Text in other scripts passes
/// through.
pub fn to_simplified(text: &str) -> String {
    zhconv(text, Variant::ZhHans)
}
