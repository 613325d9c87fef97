use crate::domain::session::SessionEvent;
use crate::error::{Result, VendingError};
use std::io::Read;

/// Source of a recorded vending session for replay through a terminal.
///
/// Expects the header `action, denomination, product, amount`. Whitespace is
/// trimmed, rows may omit trailing columns and empty fields read as absent.
pub struct SessionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SessionReader<R> {
    /// Wraps a recorded session, one operator or customer action per row.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Yields the session's actions in recorded order, ready to be replayed.
    ///
    /// A malformed row yields an error and the stream carries on with the next one.
    pub fn events(self) -> impl Iterator<Item = Result<SessionEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VendingError::from))
    }
}
