//! Base64 VLQ coding used by the `mappings` field of Source Map v3.

use crate::SourceMapError;

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_SHIFT: u32 = 5;
const VLQ_CONTINUATION_BIT: u8 = 1 << VLQ_SHIFT;
const VLQ_MASK: u8 = VLQ_CONTINUATION_BIT - 1;

fn base64_value(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'a'..=b'z' => Some(c - b'a' + 26),
        b'0'..=b'9' => Some(c - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Appends the VLQ encoding of `value` to `out`.
pub fn encode(value: i64, out: &mut String) {
    let mut rest: u64 = if value < 0 {
        (value.unsigned_abs() << 1) | 1
    } else {
        (value as u64) << 1
    };

    loop {
        let mut digit = (rest & u64::from(VLQ_MASK)) as u8;
        rest >>= VLQ_SHIFT;
        if rest > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(BASE64_ALPHABET[digit as usize] as char);
        if rest == 0 {
            break;
        }
    }
}

/// Decodes every VLQ value in one comma-free segment.
pub fn decode_segment(segment: &str) -> Result<Vec<i64>, SourceMapError> {
    let mut values = Vec::with_capacity(5);
    let mut accumulated: u64 = 0;
    let mut shift = 0u32;

    for c in segment.bytes() {
        let digit = base64_value(c).ok_or(SourceMapError::InvalidVlqDigit(c as char))?;
        if shift > 30 {
            return Err(SourceMapError::VlqOverflow(segment.to_string()));
        }
        accumulated |= u64::from(digit & VLQ_MASK) << shift;

        if digit & VLQ_CONTINUATION_BIT != 0 {
            shift += VLQ_SHIFT;
            continue;
        }

        let magnitude = (accumulated >> 1) as i64;
        values.push(if accumulated & 1 == 1 {
            -magnitude
        } else {
            magnitude
        });
        accumulated = 0;
        shift = 0;
    }

    if shift != 0 {
        return Err(SourceMapError::TruncatedSegment(segment.to_string()));
    }

    Ok(values)
}
