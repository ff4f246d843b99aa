use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::CoreError;

/// Lifecycle status shared by NetBox devices and IP addresses.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Planned,
    Staged,
    Offline,
    Failed,
    Decommissioning,
}

impl Status {
    /// Parse a caller-supplied status, failing with the full list of valid
    /// values.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::from_str(value).map_err(|_| CoreError::InvalidStatus {
            requested: value.to_owned(),
            valid: Self::names(),
        })
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Valid values in canonical order.
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(Self::as_str).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_lifecycle_label() {
        for label in [
            "active",
            "planned",
            "staged",
            "offline",
            "failed",
            "decommissioning",
        ] {
            assert_eq!(Status::parse(label).unwrap().as_str(), label);
        }
    }

    #[test]
    fn rejects_unknown_and_miscased_values() {
        for bad in ["retired", "Active", "ACTIVE", ""] {
            let err = Status::parse(bad).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidStatus { ref requested, ref valid }
                    if requested == bad && valid.len() == 6),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn invalid_status_message_lists_values_in_order() {
        let err = Status::parse("retired").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status 'retired'. Must be one of: active, planned, staged, offline, failed, decommissioning"
        );
    }

    #[test]
    fn default_is_active_and_serializes_lowercase() {
        assert_eq!(Status::default(), Status::Active);
        assert_eq!(
            serde_json::to_value(Status::Decommissioning).unwrap(),
            serde_json::json!("decommissioning")
        );
    }
}
