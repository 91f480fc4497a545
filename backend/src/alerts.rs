//! Warnings the host shows next to the selector.
//!
//! Kinds carry stable numeric ids so a host can remember which ones the user
//! dismissed across reloads.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::shift::ShiftCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    DuplicateShiftNames,
    InvalidRange,
    Mapping,
    ShiftValues,
    Unconfigured,
    RealtimeManualUpdate,
}

impl AlertKind {
    pub fn id(&self) -> u8 {
        match self {
            AlertKind::DuplicateShiftNames => 1,
            AlertKind::InvalidRange => 2,
            AlertKind::Mapping => 3,
            AlertKind::ShiftValues => 4,
            AlertKind::Unconfigured => 5,
            AlertKind::RealtimeManualUpdate => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub level: AlertLevel,
    pub text: String,
}

impl Alert {
    pub fn warning(kind: AlertKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            level: AlertLevel::Warning,
            text: text.into(),
        }
    }

    pub fn danger(kind: AlertKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            level: AlertLevel::Danger,
            text: text.into(),
        }
    }
}

/// At most one alert per kind; raising the same kind again replaces it.
#[derive(Debug, Clone, Default)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
    closed: HashSet<AlertKind>,
}

impl AlertBoard {
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn get(&self, kind: AlertKind) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.kind == kind)
    }

    pub fn raise(&mut self, alert: Alert) {
        if self.alerts.contains(&alert) {
            return;
        }

        tracing::warn!(id = alert.kind.id(), "{}", alert.text);
        self.alerts.retain(|a| a.kind != alert.kind);
        self.alerts.push(alert);
    }

    pub fn reset(&mut self, kind: AlertKind) {
        self.alerts.retain(|a| a.kind != kind);
    }

    /// Dismissed by the user. The duplicate-names check stays silent afterwards.
    pub fn close(&mut self, kind: AlertKind) {
        self.reset(kind);
        self.closed.insert(kind);
    }

    pub fn is_closed(&self, kind: AlertKind) -> bool {
        self.closed.contains(&kind)
    }

    /// Re-evaluate the catalog-level warnings.
    pub fn check_catalog(&mut self, catalog: &ShiftCatalog, site_uuid: Option<&str>) {
        if catalog.options.is_empty() {
            self.raise(Alert::warning(
                AlertKind::Unconfigured,
                format!(
                    "No shifts available for this site {}",
                    site_uuid.unwrap_or_default()
                )
                .trim_end()
                .to_string(),
            ));
        } else {
            self.reset(AlertKind::Unconfigured);
        }

        if !catalog.options.is_empty() && catalog.values.is_empty() {
            self.raise(Alert::warning(
                AlertKind::ShiftValues,
                format!(
                    "Couldn't retrieve shift values for site with UUID: {}",
                    site_uuid.unwrap_or("unknown")
                ),
            ));
        } else {
            self.reset(AlertKind::ShiftValues);
        }

        if catalog.values.is_empty()
            || catalog.options.is_empty()
            || self.is_closed(AlertKind::DuplicateShiftNames)
        {
            return;
        }

        if catalog.values.len() != catalog.options.len() {
            let text = if catalog.options.len() > 1 {
                "You are missing shifts because some shift names are not unique. Please make sure all shifts have unique names!"
            } else {
                "No shifts available. Please check your shift options variable."
            };
            self.raise(Alert::warning(AlertKind::DuplicateShiftNames, text));
        } else {
            self.reset(AlertKind::DuplicateShiftNames);
        }
    }
}
