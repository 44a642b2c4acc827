// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed catalogue of room fields editable through the confirmation
//! protocol, and the server-side normalization rules for proposed values.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::OpsError;
use crate::types::{Priority, RoomType, TaskStatus};

/// A field that `updateRoomData` may propose a change to.
///
/// Wire names are the human-readable forms shown in previews
/// ("Room Type", "Check In Time", ...). Any other field name fails with
/// [`OpsError::InvalidField`] before any store read happens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "title_case")]
pub enum EditableField {
    RoomType,
    Priority,
    Status,
    RoomStatus,
    Linen,
    CheckInTime,
    CheckOutTime,
}

impl EditableField {
    /// Parses a wire field name, mapping failure to `InvalidField`.
    pub fn parse(name: &str) -> Result<Self, OpsError> {
        Self::from_str(name).map_err(|_| OpsError::InvalidField(name.to_string()))
    }

    /// The task column this field maps onto.
    pub fn column(self) -> &'static str {
        match self {
            EditableField::RoomType => "room_type",
            EditableField::Priority => "priority",
            EditableField::Status => "status",
            EditableField::RoomStatus => "room_status",
            EditableField::Linen => "linen",
            EditableField::CheckInTime => "check_in",
            EditableField::CheckOutTime => "check_out",
        }
    }

    /// Normalizes a proposed value per the field-specific rules.
    ///
    /// Enum-like fields are uppercased with whitespace runs collapsed to a
    /// single underscore. Status special-cases the literal "TO DO": the
    /// general rule would produce "TO_DO", which is not a valid status
    /// token. Time fields pass through trimmed.
    pub fn normalize(self, value: &str) -> String {
        match self {
            EditableField::Status => {
                let upper = value.trim().to_uppercase();
                if upper == "TO DO" {
                    return "TODO".to_string();
                }
                collapse_to_snake(&upper)
            }
            EditableField::RoomType
            | EditableField::Priority
            | EditableField::RoomStatus
            | EditableField::Linen => collapse_to_snake(&value.trim().to_uppercase()),
            EditableField::CheckInTime | EditableField::CheckOutTime => {
                value.trim().to_string()
            }
        }
    }

    /// Validates that a normalized value is admissible for this field.
    ///
    /// Status, priority, and room type are closed catalogues; a value that
    /// does not parse would poison every task row it fans out to, so it is
    /// rejected before any write. Room status, linen, and the time fields
    /// accept free text.
    pub fn check_value(self, normalized: &str) -> Result<(), OpsError> {
        let ok = match self {
            EditableField::Status => TaskStatus::from_str(normalized).is_ok(),
            EditableField::Priority => Priority::from_str(normalized).is_ok(),
            EditableField::RoomType => RoomType::from_str(normalized).is_ok(),
            _ => true,
        };
        if ok {
            Ok(())
        } else {
            Err(OpsError::Validation(format!(
                "{normalized:?} is not a valid value for {self}"
            )))
        }
    }
}

/// Replaces runs of whitespace with a single underscore.
fn collapse_to_snake(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn wire_names_are_title_case() {
        assert_eq!(EditableField::RoomType.to_string(), "Room Type");
        assert_eq!(EditableField::CheckInTime.to_string(), "Check In Time");
        assert_eq!(EditableField::parse("Linen").unwrap(), EditableField::Linen);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = EditableField::parse("Nonexistent").unwrap_err();
        assert!(matches!(err, OpsError::InvalidField(ref name) if name == "Nonexistent"));
    }

    #[test]
    fn status_to_do_special_case() {
        assert_eq!(EditableField::Status.normalize("TO DO"), "TODO");
        assert_eq!(EditableField::Status.normalize("to do"), "TODO");
        assert_eq!(EditableField::Status.normalize(" To Do "), "TODO");
    }

    #[test]
    fn status_general_rule_uppercases_and_underscores() {
        assert_eq!(EditableField::Status.normalize("in progress"), "IN_PROGRESS");
        assert_eq!(
            EditableField::Status.normalize("READY for Inspection"),
            "READY_FOR_INSPECTION"
        );
        assert_eq!(
            EditableField::Status.normalize("do  not   disturb"),
            "DO_NOT_DISTURB"
        );
    }

    #[test]
    fn enum_like_fields_normalize() {
        assert_eq!(EditableField::Linen.normalize("yes"), "YES");
        assert_eq!(EditableField::RoomStatus.normalize("stay over"), "STAY_OVER");
        assert_eq!(EditableField::RoomType.normalize("deluxe"), "DELUXE");
    }

    #[test]
    fn time_fields_pass_through() {
        assert_eq!(EditableField::CheckInTime.normalize(" 14:00 "), "14:00");
        assert_eq!(EditableField::CheckOutTime.normalize("11:30"), "11:30");
    }

    #[test]
    fn closed_catalogue_values_are_checked() {
        assert!(EditableField::Status.check_value("TODO").is_ok());
        assert!(EditableField::Status.check_value("WHATEVER").is_err());
        assert!(EditableField::Priority.check_value("HIGH").is_ok());
        assert!(EditableField::Priority.check_value("URGENT").is_err());
        assert!(EditableField::RoomType.check_value("SUITE").is_ok());
        // Free-text fields accept anything.
        assert!(EditableField::RoomStatus.check_value("DEPARTURE").is_ok());
        assert!(EditableField::Linen.check_value("NO").is_ok());
    }

    #[test]
    fn every_field_maps_to_a_distinct_column() {
        let mut cols: Vec<&str> = EditableField::iter().map(|f| f.column()).collect();
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(cols.len(), 7);
    }
}
