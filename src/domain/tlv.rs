//! Sequential two-digit Tag-Length-Value scanner for EMV QR payloads.
//!
//! Records are laid out back to back as `TT LL V...` where the tag and length
//! are two characters each and the value is exactly `LL` characters long.

use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};

const HEADER_LEN: usize = 4;

/// One scanned record. Built once during a scan and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlvRecord {
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Length")]
    pub length: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl TlvRecord {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            tag: tag.into(),
            length: format!("{:02}", value.chars().count()),
            value,
        }
    }

    /// Re-encodes the record exactly as it appeared in the payload.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.tag, self.length, self.value)
    }
}

/// Iterator over the records of a TLV string.
///
/// Yields an error at the first structural problem and stops afterwards.
pub struct TlvScanner<'a> {
    input: &'a str,
    cursor: usize,
    failed: bool,
}

impl<'a> TlvScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            failed: false,
        }
    }

    fn next_record(&mut self) -> Result<TlvRecord> {
        let rest = &self.input[self.cursor..];
        if rest.len() < HEADER_LEN {
            return Err(PaymentError::MalformedInput("truncated header".to_string()));
        }
        let (tag, length) = match (rest.get(0..2), rest.get(2..HEADER_LEN)) {
            (Some(tag), Some(length)) => (tag, length),
            _ => return Err(PaymentError::MalformedInput("truncated header".to_string())),
        };
        if !length.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PaymentError::MalformedInput(
                "invalid length field".to_string(),
            ));
        }
        let value_len: usize = length
            .parse()
            .map_err(|_| PaymentError::MalformedInput("invalid length field".to_string()))?;

        let value = rest
            .get(HEADER_LEN..)
            .and_then(|body| {
                let end = body.char_indices().nth(value_len).map(|(i, _)| i);
                match end {
                    Some(end) => body.get(..end),
                    None if body.chars().count() == value_len => Some(body),
                    None => None,
                }
            })
            .ok_or_else(|| {
                PaymentError::MalformedInput("value shorter than declared length".to_string())
            })?;

        self.cursor += HEADER_LEN + value.len();
        Ok(TlvRecord {
            tag: tag.to_string(),
            length: length.to_string(),
            value: value.to_string(),
        })
    }
}

impl Iterator for TlvScanner<'_> {
    type Item = Result<TlvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.input.len() {
            return None;
        }
        let record = self.next_record();
        if record.is_err() {
            self.failed = true;
        }
        Some(record)
    }
}

/// Scans the whole string and returns every record in order.
pub fn scan(input: &str) -> Result<Vec<TlvRecord>> {
    TlvScanner::new(input).collect()
}

/// Returns the value of the first record tagged `tag`.
///
/// Records before the match must be well formed; anything after it is not
/// inspected.
pub fn find_value(input: &str, tag: &str) -> Result<String> {
    if tag.len() != 2 {
        return Err(PaymentError::MalformedInput(format!(
            "tag must be two characters, got {tag:?}"
        )));
    }
    for record in TlvScanner::new(input) {
        let record = record?;
        if record.tag == tag {
            return Ok(record.value);
        }
    }
    Err(PaymentError::NotFound(tag.to_string()))
}
