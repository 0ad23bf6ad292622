use std::{fmt::Display, ops::Range};

use serde::{Deserialize, Serialize};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Span,
};

/// Character set the input buffer is encoded in.
///
/// The lexer works on raw bytes; the charset only decides which byte
/// sequences are valid and how token text is decoded for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    #[default]
    Utf8mb4,
    /// UTF-8 restricted to the Basic Multilingual Plane.
    Utf8mb3,
    Latin1,
    Ascii,
    Binary,
}

/// Charset names accepted after a `_` introducer. Wider than the set of
/// charsets the lexer can validate input in.
const INTRODUCER_NAMES: &[&str] = &[
    "utf8mb4", "utf8mb3", "utf8", "latin1", "ascii", "binary", "gbk", "gb18030", "utf16",
    "utf16le", "utf32", "ucs2", "big5", "cp1250", "cp1251", "cp1252", "koi8r", "sjis", "euckr",
];

impl Charset {
    /// Case-insensitive lookup. `utf8` is an alias of `utf8mb3`.
    pub fn from_name(name: &str) -> Option<Charset> {
        match name.to_ascii_lowercase().as_str() {
            "utf8mb4" => Some(Charset::Utf8mb4),
            "utf8mb3" | "utf8" => Some(Charset::Utf8mb3),
            "latin1" => Some(Charset::Latin1),
            "ascii" => Some(Charset::Ascii),
            "binary" => Some(Charset::Binary),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8mb4 => "utf8mb4",
            Charset::Utf8mb3 => "utf8mb3",
            Charset::Latin1 => "latin1",
            Charset::Ascii => "ascii",
            Charset::Binary => "binary",
        }
    }

    /// Whether `name` may follow a `_` charset introducer.
    pub fn is_introducer_name(name: &str) -> bool {
        INTRODUCER_NAMES.contains(&name.to_ascii_lowercase().as_str())
    }

    /// Byte ranges of `input` that are not valid in this charset, in order.
    /// Each range covers exactly one invalid sequence (or one run of bytes
    /// outside the ASCII range for `Ascii`).
    pub fn invalid_ranges(self, input: &[u8]) -> Vec<Range<usize>> {
        match self {
            Charset::Latin1 | Charset::Binary => vec![],
            Charset::Ascii => ascii_invalid_ranges(input),
            Charset::Utf8mb4 => utf8_invalid_ranges(input, false),
            Charset::Utf8mb3 => utf8_invalid_ranges(input, true),
        }
    }

    /// Decodes token bytes for display. Invalid sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Latin1 | Charset::Binary => bytes.iter().map(|&b| b as char).collect(),
            Charset::Ascii | Charset::Utf8mb4 | Charset::Utf8mb3 => {
                String::from_utf8_lossy(bytes).into_owned()
            }
        }
    }
}

fn ascii_invalid_ranges(input: &[u8]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = vec![];

    for (i, byte) in input.iter().enumerate() {
        if byte.is_ascii() {
            continue;
        }
        match ranges.last_mut() {
            Some(last) if last.end == i => last.end = i + 1,
            _ => ranges.push(i..i + 1),
        }
    }

    ranges
}

fn utf8_invalid_ranges(input: &[u8], bmp_only: bool) -> Vec<Range<usize>> {
    let mut ranges = vec![];
    let mut offset = 0;

    while offset < input.len() {
        let (valid, invalid) = match std::str::from_utf8(&input[offset..]) {
            Ok(valid) => (valid, None),
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                // from_utf8 already validated this prefix
                let valid = std::str::from_utf8(&input[offset..offset + valid_up_to]).unwrap_or("");
                let bad_len = err
                    .error_len()
                    .unwrap_or(input.len() - offset - valid_up_to);
                let bad_start = offset + valid_up_to;
                (valid, Some(bad_start..bad_start + bad_len))
            }
        };

        if bmp_only {
            for (i, ch) in valid.char_indices() {
                if ch.len_utf8() == 4 {
                    ranges.push(offset + i..offset + i + 4);
                }
            }
        }

        match invalid {
            Some(range) => {
                offset = range.end;
                ranges.push(range);
            }
            None => break,
        }
    }

    ranges
}

impl Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<String> for Charset {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Charset::from_name(&name)
            .ok_or_else(|| Error::new(ErrorImpl::UnknownCharset { name }, Span::default()))
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.name().to_string()
    }
}
