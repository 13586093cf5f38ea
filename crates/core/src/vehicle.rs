//! Vehicle and captain-availability domain types.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Vehicle type
// ---------------------------------------------------------------------------

/// Kinds of vehicle a captain can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Motorcycle,
    Car,
    Auto,
}

/// All valid vehicle type strings.
const VALID_VEHICLE_TYPES: &[&str] = &["motorcycle", "car", "auto"];

impl VehicleType {
    /// Return the vehicle type as a lowercase string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Motorcycle => "motorcycle",
            Self::Car => "car",
            Self::Auto => "auto",
        }
    }

    /// Parse a vehicle type from a string slice.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "motorcycle" => Ok(Self::Motorcycle),
            "car" => Ok(Self::Car),
            "auto" => Ok(Self::Auto),
            _ => Err(CoreError::Validation(format!(
                "Invalid vehicle type '{s}'. Must be one of: {}",
                VALID_VEHICLE_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Captain status
// ---------------------------------------------------------------------------

/// Whether a captain is currently accepting rides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptainStatus {
    Available,
    Unavailable,
}

impl CaptainStatus {
    /// Return the status as a lowercase string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    /// Parse a status from a string slice.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(CoreError::Validation(format!(
                "Invalid captain status '{s}'. Must be 'available' or 'unavailable'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_type_round_trips_through_parse() {
        for s in ["motorcycle", "car", "auto"] {
            let parsed = VehicleType::parse(s).expect("known type should parse");
            assert_eq!(parsed.as_str(), s);
        }
    }

    #[test]
    fn unknown_vehicle_type_is_a_validation_error() {
        let err = VehicleType::parse("boat").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("motorcycle, car, auto"));
    }

    #[test]
    fn captain_status_round_trips_through_parse() {
        for s in ["available", "unavailable"] {
            let parsed = CaptainStatus::parse(s).expect("known status should parse");
            assert_eq!(parsed.as_str(), s);
        }
    }

    #[test]
    fn unknown_captain_status_is_rejected() {
        assert!(CaptainStatus::parse("busy").is_err());
    }
}
