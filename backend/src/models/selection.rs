use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    models::shift::{ResolvedShift, TimeRangeUpdate},
    store::{QueryStore, GROUP_KEY, SHIFT_KEY},
};

/// Selection state owned by the host and passed into every selector call.
///
/// The `initiated` and `last_refresh` fields replace what used to be
/// process-wide flags, so independent panels never share them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub explicit_group: Option<String>,
    pub explicit_shift: Option<String>,
    pub auto_select: bool,
    pub last_applied_shift: Option<String>,
    /// Set by the host when a duplicate panel instance is detected.
    pub render_blocked: bool,
    pub initiated: bool,
    pub last_refresh: Option<String>,
}

impl SelectionState {
    pub fn new(auto_select: bool) -> Self {
        Self {
            auto_select,
            ..Self::default()
        }
    }

    /// Re-read the round-tripped overrides. Empty values count as absent.
    pub fn sync_from<S: QueryStore + ?Sized>(&mut self, store: &S) {
        self.explicit_group = store.get(GROUP_KEY).filter(|v| !v.is_empty());
        self.explicit_shift = store.get(SHIFT_KEY).filter(|v| !v.is_empty());
    }

    /// Record `shift` as applied and return the window to publish.
    pub fn apply(&mut self, shift: &ResolvedShift) -> TimeRangeUpdate {
        self.last_applied_shift = Some(shift.uuid().to_string());
        self.explicit_shift = Some(shift.uuid().to_string());
        shift.time_range()
    }
}

/// Which bound(s) of the host time range a manual selection replaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePart {
    #[default]
    Both,
    From,
    To,
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatePart::Both => "both",
            DatePart::From => "from",
            DatePart::To => "to",
        })
    }
}

impl FromStr for DatePart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(DatePart::Both),
            "from" => Ok(DatePart::From),
            "to" => Ok(DatePart::To),
            other => Err(format!("unknown date part '{}'", other)),
        }
    }
}
