//! Client-side failures and the messages shown for them.

/// Where a fetch failed, decided from the transport error itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    Connectivity,
    /// Non-2xx status or a body that did not decode
    Upstream,
    Unknown,
}

impl FetchErrorKind {
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Timeout => {
                "Request timed out. Please check your internet connection and try again."
            }
            Self::Connectivity => {
                "Network connection failed. Please check your internet connection and try again."
            }
            Self::Upstream | Self::Unknown => "Failed to fetch taxi ranks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?}: {detail}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub detail: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            FetchErrorKind::Timeout
        } else if error.is_connect() {
            FetchErrorKind::Connectivity
        } else if error.is_status() || error.is_decode() {
            FetchErrorKind::Upstream
        } else {
            FetchErrorKind::Unknown
        };
        Self::new(kind, error.to_string())
    }
}

/// What the map screen shows when it cannot show ranks.
///
/// `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("Location permission is required to find nearby taxi ranks")]
    LocationDenied,

    #[error("Unable to get your location. Please check your device settings.")]
    LocationUnavailable,

    #[error("{}", .0.user_message())]
    Fetch(#[from] FetchError),
}

#[derive(Debug, thiserror::Error)]
pub enum ClientConfigError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
