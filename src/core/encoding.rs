// src/core/encoding.rs
//
// Byte payloads (dashboard exports, the federal code table) arrive in
// whatever encoding the tool that wrote them liked. Decoders here are strict:
// a decoder either accepts the whole payload or reports failure, so callers
// can walk a fixed fallback list and take the first one that works.

use crate::error::{IngestError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// BOM-aware; little-endian when there is no BOM.
    Utf16,
    Utf16Le,
    Cp1252,
}

impl TextEncoding {
    /// Order used for tab-delimited exports.
    pub const EXPORT_FALLBACK: [TextEncoding; 4] =
        [TextEncoding::Utf8, TextEncoding::Utf16, TextEncoding::Utf16Le, TextEncoding::Cp1252];

    /// Order used for plain CSV files.
    pub const CSV_FALLBACK: [TextEncoding; 2] = [TextEncoding::Utf8, TextEncoding::Cp1252];

    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Utf16Le => "utf-16-le",
            TextEncoding::Cp1252 => "cp1252",
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_owned)
            }
            TextEncoding::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, false),
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, true),
                _ => decode_utf16(bytes, false),
            },
            TextEncoding::Utf16Le => {
                decode_utf16(bytes, false).map(|s| s.trim_start_matches('\u{FEFF}').to_string())
            }
            TextEncoding::Cp1252 => bytes.iter().map(|&b| cp1252_char(b)).collect(),
        }
    }
}

/// Decode with the first encoding in `order` that accepts every byte.
pub fn decode_first(bytes: &[u8], order: &[TextEncoding]) -> Result<(String, TextEncoding)> {
    order
        .iter()
        .find_map(|&enc| enc.decode(bytes).map(|text| (text, enc)))
        .ok_or_else(|| IngestError::Decode {
            tried: order.iter().map(|e| e.label()).collect::<Vec<_>>().join(", "),
        })
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            let arr = [pair[0], pair[1]];
            if big_endian { u16::from_be_bytes(arr) } else { u16::from_le_bytes(arr) }
        })
        .collect();
    String::from_utf16(&units).ok()
}

/// Windows-1252. Five bytes in the C1 range are unassigned and fail decoding.
fn cp1252_char(b: u8) -> Option<char> {
    const C1: [u16; 32] = [
        0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021,
        0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0,
        0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
        0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
    ];
    match b {
        0x80..=0x9F => match C1[(b - 0x80) as usize] {
            0 => None,
            cp => char::from_u32(cp as u32),
        },
        _ => Some(b as char),
    }
}
