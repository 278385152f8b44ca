use crate::domain::payment::PayInput;
use crate::error::{PaymentError, Result};
use std::io::{BufRead, BufReader, Read};

/// Reads payment requests from a JSON Lines source.
///
/// Each non-blank line holds one `{"bar_code": "..."}` object. A bad line
/// yields an error for that line only; reading continues with the next one.
pub struct RequestReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<PayInput>> {
        self.reader
            .lines()
            .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
            .map(|line| {
                let line = line?;
                serde_json::from_str(&line).map_err(PaymentError::from)
            })
    }
}
