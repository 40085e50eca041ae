//! Topics: the fixed set of channels the device talks on.
//!
//! | Topic | Wire name | Direction |
//! |-------|-----------|-----------|
//! | [`Light`](Topic::Light) | `home/light` | inbound |
//! | [`Fan`](Topic::Fan) | `home/fan` | inbound |
//! | [`TemperatureRequest`](Topic::TemperatureRequest) | `home/temperature/request` | inbound |
//! | [`TemperatureResponse`](Topic::TemperatureResponse) | `home/temperature/response` | outbound |
//! | [`Climate`](Topic::Climate) | `home/ac` | inbound |

use std::fmt;

pub const LIGHT: &str = "home/light";
pub const FAN: &str = "home/fan";
pub const TEMPERATURE_REQUEST: &str = "home/temperature/request";
pub const TEMPERATURE_RESPONSE: &str = "home/temperature/response";
pub const CLIMATE: &str = "home/ac";

/// A topic resolved from its wire name.
///
/// Anything outside the known set is kept verbatim in
/// [`Unknown`](Self::Unknown) so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    Light,
    Fan,
    TemperatureRequest,
    TemperatureResponse,
    Climate,
    Unknown(String),
}

impl Topic {
    /// Topics subscribed to after every fresh session, in subscription order.
    pub const SUBSCRIPTIONS: [Self; 4] = [
        Self::Light,
        Self::Fan,
        Self::TemperatureRequest,
        Self::Climate,
    ];

    /// Resolve a wire name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            LIGHT => Self::Light,
            FAN => Self::Fan,
            TEMPERATURE_REQUEST => Self::TemperatureRequest,
            TEMPERATURE_RESPONSE => Self::TemperatureResponse,
            CLIMATE => Self::Climate,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Light => LIGHT,
            Self::Fan => FAN,
            Self::TemperatureRequest => TEMPERATURE_REQUEST,
            Self::TemperatureResponse => TEMPERATURE_RESPONSE,
            Self::Climate => CLIMATE,
            Self::Unknown(name) => name,
        }
    }

    /// Whether this is one of the five known topics.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
