use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    error::{AppError, Result},
    models::shift::{ShiftCatalog, ShiftOption, ShiftValue},
};

/// The shift mapping document a panel is configured with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftMapping {
    #[serde(rename = "static", default)]
    pub static_shifts: Option<StaticShifts>,
    #[serde(default)]
    pub values: Option<MappingValues>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticShifts {
    #[serde(default)]
    pub shifts: Vec<StaticShift>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingValues {
    pub site_uuid: Option<String>,
}

/// One shift of the static mapping. Every field that ends up in the encoded
/// value row must be free of the `|` separator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StaticShift {
    #[serde(default)]
    #[validate(does_not_contain(pattern = "|", message = "group must not contain '|'"))]
    pub group: String,
    #[validate(
        length(min = 1, message = "group_uuid is required"),
        does_not_contain(pattern = "|", message = "group_uuid must not contain '|'")
    )]
    pub group_uuid: String,
    #[validate(
        length(min = 1, message = "uuid is required"),
        does_not_contain(pattern = "|", message = "uuid must not contain '|'")
    )]
    pub uuid: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "startTime")]
    #[validate(
        length(min = 1, message = "startTime is required"),
        does_not_contain(pattern = "|", message = "startTime must not contain '|'")
    )]
    pub start_time: String,
    #[serde(rename = "endTime")]
    #[validate(
        length(min = 1, message = "endTime is required"),
        does_not_contain(pattern = "|", message = "endTime must not contain '|'")
    )]
    pub end_time: String,
    #[validate(custom(function = "order_has_no_separator"))]
    pub order: OrderValue,
}

fn order_has_no_separator(order: &OrderValue) -> std::result::Result<(), ValidationError> {
    match order {
        OrderValue::Text(s) if s.contains('|') => {
            let mut err = ValidationError::new("separator");
            err.message = Some("order must not contain '|'".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Shift order as written in the document; hand-edited mappings use both
/// `1` and `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for OrderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderValue::Number(n) => write!(f, "{}", n),
            OrderValue::Text(s) => f.write_str(s),
        }
    }
}

impl ShiftMapping {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(AppError::Mapping("shift mapping is empty".into()));
        }

        let mapping: ShiftMapping = serde_json::from_str(raw)?;
        for shift in mapping.static_shifts() {
            shift.validate()?;
        }

        Ok(mapping)
    }

    pub fn static_shifts(&self) -> &[StaticShift] {
        self.static_shifts
            .as_ref()
            .map(|s| s.shifts.as_slice())
            .unwrap_or_default()
    }

    pub fn site_uuid(&self) -> Option<&str> {
        self.values
            .as_ref()
            .and_then(|v| v.site_uuid.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Options and encoded values for every static shift, in document order.
    pub fn catalog(&self) -> ShiftCatalog {
        let shifts = self.static_shifts();

        ShiftCatalog {
            options: shifts
                .iter()
                .map(|s| ShiftOption {
                    uuid: s.uuid.clone(),
                    label: s.label.clone(),
                })
                .collect(),
            values: shifts
                .iter()
                .map(|s| {
                    ShiftValue::encode(
                        &s.group,
                        &s.group_uuid,
                        &s.uuid,
                        &s.start_time,
                        &s.end_time,
                        &s.order.to_string(),
                    )
                })
                .collect(),
        }
    }
}
