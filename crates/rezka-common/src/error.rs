//! Common error types used throughout rezka-client.
//!
//! This module provides a unified error type covering the four failure
//! classes of the extraction engine: page fetch failures, markup/script
//! extraction failures, caller parameter validation, and stream retrieval
//! failures reported by the origin.

/// Common error type for rezka-client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page or AJAX request failed at the network or HTTP-status level.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Expected markup or script structure was absent or malformed.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The caller supplied insufficient or inconsistent parameters.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The origin explicitly reported failure, or its packed stream
    /// descriptor could not be decoded.
    #[error("Stream error: {0}")]
    Stream(String),
}

impl Error {
    /// Create a new Fetch error.
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new Extraction error.
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new Stream error.
    pub fn stream<S: Into<String>>(msg: S) -> Self {
        Self::Stream(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::fetch("status 503");
        assert_eq!(err.to_string(), "Fetch error: status 503");

        let err = Error::extraction("no CDN initializer found");
        assert_eq!(err.to_string(), "Extraction error: no CDN initializer found");

        let err = Error::validation("season is required");
        assert_eq!(err.to_string(), "Validation error: season is required");

        let err = Error::stream("no usable streams");
        assert_eq!(err.to_string(), "Stream error: no usable streams");
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(Error::fetch("x"), Error::Fetch(_)));
        assert!(matches!(Error::extraction("x"), Error::Extraction(_)));
        assert!(matches!(Error::validation("x"), Error::Validation(_)));
        assert!(matches!(Error::stream("x"), Error::Stream(_)));
    }

    #[test]
    fn test_result_type() {
        fn ok_fn() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(ok_fn().unwrap(), 42);

        fn err_fn() -> Result<i32> {
            Err(Error::stream("origin said no"))
        }
        assert!(err_fn().is_err());
    }

    #[test]
    fn test_error_string_into() {
        let err = Error::extraction(String::from("bad markup"));
        assert_eq!(err.to_string(), "Extraction error: bad markup");
    }
}
