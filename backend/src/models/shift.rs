use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A selectable shift option as the host lists it (`text` = label, `value` = uuid).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftOption {
    #[serde(rename = "value")]
    pub uuid: String,
    #[serde(rename = "text")]
    pub label: String,
}

/// The encoded companion row of a shift option:
/// `shiftGroupName|shiftGroupUUID|<reserved>|start|end|order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftValue {
    #[serde(rename = "value")]
    pub uuid: String,
    pub text: String,
}

impl ShiftValue {
    pub fn encode(
        group_name: &str,
        group_uuid: &str,
        uuid: &str,
        start: &str,
        end: &str,
        order: &str,
    ) -> Self {
        Self {
            uuid: uuid.to_string(),
            text: [group_name, group_uuid, uuid, start, end, order].join("|"),
        }
    }
}

/// Raw input to the resolver: option rows plus their encoded values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCatalog {
    pub options: Vec<ShiftOption>,
    pub values: Vec<ShiftValue>,
}

impl ShiftCatalog {
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// A named time-of-day interval belonging to a shift group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDefinition {
    pub uuid: String,
    pub label: String,
    #[serde(rename = "shiftGroupUUID")]
    pub shift_group_uuid: String,
    pub shift_group_name: String,
    pub start: time::Time,
    pub end: time::Time,
    pub order: i32,
}

impl ShiftDefinition {
    /// Hour-only comparison: 06:30-06:10 is not considered crossing.
    pub fn crosses_midnight(&self) -> bool {
        self.start.hour() > self.end.hour()
    }
}

/// A shift anchored to absolute timestamps. Only valid for the instant it was
/// resolved at, since `is_active` depends on the wall clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedShift {
    #[serde(flatten)]
    pub shift: ShiftDefinition,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
    pub is_active: bool,
}

impl ResolvedShift {
    pub fn uuid(&self) -> &str {
        &self.shift.uuid
    }

    pub fn group_uuid(&self) -> &str {
        &self.shift.shift_group_uuid
    }

    pub fn time_range(&self) -> TimeRangeUpdate {
        TimeRangeUpdate {
            from: self.start_date.unix_timestamp() * 1000,
            to: self.end_date.unix_timestamp() * 1000,
            uuid: Some(self.shift.uuid.clone()),
        }
    }
}

/// Resolved shifts keyed by group uuid, in first-seen input order.
pub type ShiftGroups = IndexMap<String, Vec<ResolvedShift>>;

/// Time-range change for the host to apply. `uuid` is absent for partial
/// (start-only / end-only) updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeUpdate {
    pub from: i64,
    pub to: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}
