use super::error::FetchError;

/// View-local state of a single load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    /// User-facing error text; the view offers a retry.
    Failed(String),
    /// Server-declared "no data", shown as a neutral notice.
    Empty(String),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, FetchError>, fallback: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(FetchError::Empty(message)) => Self::Empty(message),
            Err(err) => Self::Failed(err.user_message(fallback)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Loading
    }
}
