//! Two-shaped outcome of a fetch.

use crate::{error::RequestError, metadata::Metadata};

/// Either a decoded value with its response metadata, or an error. There is
/// no partial success.
#[derive(Debug)]
pub enum FetchResult<T> {
    Success { value: T, metadata: Metadata },
    Failure(RequestError),
}

impl<T> FetchResult<T> {
    /// `(Some, Some)` on success, `(None, None)` on failure.
    pub fn value(&self) -> (Option<&T>, Option<&Metadata>) {
        match self {
            FetchResult::Success { value, metadata } => (Some(value), Some(metadata)),
            FetchResult::Failure(_) => (None, None),
        }
    }

    pub fn error(&self) -> Option<&RequestError> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::Failure(error) => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    pub fn into_result(self) -> Result<(T, Metadata), RequestError> {
        match self {
            FetchResult::Success { value, metadata } => Ok((value, metadata)),
            FetchResult::Failure(error) => Err(error),
        }
    }
}

impl<T> From<FetchResult<T>> for Result<(T, Metadata), RequestError> {
    fn from(result: FetchResult<T>) -> Self {
        result.into_result()
    }
}

impl<T> From<Result<(T, Metadata), RequestError>> for FetchResult<T> {
    fn from(result: Result<(T, Metadata), RequestError>) -> Self {
        match result {
            Ok((value, metadata)) => FetchResult::Success { value, metadata },
            Err(error) => FetchResult::Failure(error),
        }
    }
}
