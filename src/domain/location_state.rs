use crate::domain::{Address, GeoFix};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const PERMISSION_DENIED_MESSAGE: &str = "location permission denied";

/// Progress of a single location acquisition.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationState {
    #[default]
    Pending,
    Denied {
        message: String,
    },
    FixAcquired {
        fix: GeoFix,
    },
    Ready {
        fix: GeoFix,
        address: Option<Address>,
    },
    FixUnavailable {
        message: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationStatus {
    Pending,
    Denied,
    FixAcquired,
    Ready,
    FixUnavailable,
}

impl LocationState {
    pub fn denied() -> Self {
        LocationState::Denied {
            message: PERMISSION_DENIED_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> LocationStatus {
        match self {
            LocationState::Pending => LocationStatus::Pending,
            LocationState::Denied { .. } => LocationStatus::Denied,
            LocationState::FixAcquired { .. } => LocationStatus::FixAcquired,
            LocationState::Ready { .. } => LocationStatus::Ready,
            LocationState::FixUnavailable { .. } => LocationStatus::FixUnavailable,
        }
    }

    pub fn fix(&self) -> Option<&GeoFix> {
        match self {
            LocationState::FixAcquired { fix } | LocationState::Ready { fix, .. } => Some(fix),
            _ => None,
        }
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            LocationState::Ready { address, .. } => address.as_ref(),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LocationState::Denied { message } | LocationState::FixUnavailable { message } => Some(message),
            _ => None,
        }
    }

    /// True once no further transition happens without a retry.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            LocationState::Denied { .. } | LocationState::Ready { .. } | LocationState::FixUnavailable { .. }
        )
    }
}

impl Display for LocationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LocationStatus::Pending => "pending",
            LocationStatus::Denied => "denied",
            LocationStatus::FixAcquired => "fix acquired",
            LocationStatus::Ready => "ready",
            LocationStatus::FixUnavailable => "fix unavailable",
        };
        write!(f, "{}", name)
    }
}
