use thiserror::Error;

/// Failures coming out of the worksheet datastore. `Connection` is the only
/// fatal condition in the system: the interaction halts with a visible
/// message and is not retried.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("datastore connection error: {0}")]
    Connection(String),

    #[error("worksheet `{0}` could not be decoded: {1}")]
    Codec(String, String),
}

/// Failures from the market quote lookup. Callers swallow these and show a
/// static hint instead; there is no distinction surfaced between a bad
/// symbol and a network failure.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("quote service error: {0}")]
    Service(String),

    #[error("no last price in response for `{0}`")]
    NoPrice(String),
}
