//! Display categories for statuses and service types.

use civic_api_models::ServiceType;
use serde::Serialize;

/// Badge style attached to a status value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// Finished successfully.
    Success,
    /// Waiting or in progress.
    Warning,
    /// Needs attention or was refused.
    Danger,
    /// Informational; also the fallback for unknown values.
    Info,
}

impl Badge {
    /// Short style name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

/// Colour family attached to a service type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Certificates.
    Blue,
    /// Utilities.
    Green,
    /// Grievance services.
    Orange,
    /// Anything unmapped.
    Neutral,
}

impl Tone {
    /// Short colour name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Neutral => "gray",
        }
    }
}

/// Colour family for a service type; unknown types are neutral.
#[must_use]
pub const fn service_type_tone(service_type: &ServiceType) -> Tone {
    match service_type {
        ServiceType::Certificate => Tone::Blue,
        ServiceType::Utility => Tone::Green,
        ServiceType::Grievance => Tone::Orange,
        ServiceType::Other(_) => Tone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_types_map_to_tones_with_neutral_fallback() {
        assert_eq!(service_type_tone(&ServiceType::Certificate), Tone::Blue);
        assert_eq!(service_type_tone(&ServiceType::Utility), Tone::Green);
        assert_eq!(service_type_tone(&ServiceType::Grievance), Tone::Orange);
        assert_eq!(
            service_type_tone(&ServiceType::Other("certificate".into())),
            Tone::Neutral
        );
        assert_eq!(Tone::Neutral.as_str(), "gray");
    }
}
