use anyhow::Context;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::macros::format_description;

use crate::{models::selection::DatePart, realtime::RefreshInterval};

/// Behaviour options of one selector panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelOptions {
    pub is_auto_select_shift: bool,
    pub auto_select_shift_group: Option<String>,
    pub is_option_group_label_trimmed: bool,
    pub refresh_interval: RefreshInterval,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub panel: PanelOptions,
    /// Raw shift mapping document.
    pub mapping: String,
    pub timezone: Tz,
    pub production_date: Option<time::Date>,
    /// Which bound(s) a manual selection replaces.
    pub date_part: DatePart,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mapping = match (var("SHIFT_MAPPING"), var("SHIFT_MAPPING_FILE")) {
            (Some(raw), _) if !raw.trim().is_empty() => raw,
            (_, Some(path)) => std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read SHIFT_MAPPING_FILE {}", path))?,
            _ => anyhow::bail!("SHIFT_MAPPING or SHIFT_MAPPING_FILE must be set"),
        };

        let timezone_name = var("SHIFT_TIMEZONE").unwrap_or_else(|| "UTC".into());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| anyhow::anyhow!("SHIFT_TIMEZONE '{}' is not a known time zone", timezone_name))?;

        let production_date = var("PRODUCTION_DATE")
            .filter(|s| !s.trim().is_empty())
            .map(|s| time::Date::parse(s.trim(), format_description!("[year]-[month]-[day]")))
            .transpose()
            .context("PRODUCTION_DATE must be formatted as YYYY-MM-DD")?;

        let refresh_interval = var("REFRESH_INTERVAL")
            .map(|s| s.parse::<RefreshInterval>())
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("REFRESH_INTERVAL must be one of 5s, 10s, 30s, 1m, 30m, 1h, 6h, 12h, 24h")?
            .unwrap_or_default();

        let date_part = var("SHIFT_DATE_PART")
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<DatePart>())
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("SHIFT_DATE_PART must be one of both, from, to")?
            .unwrap_or_default();

        Ok(Self {
            panel: PanelOptions {
                is_auto_select_shift: flag(&var, "AUTO_SELECT_SHIFT")?,
                auto_select_shift_group: var("AUTO_SELECT_SHIFT_GROUP")
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                is_option_group_label_trimmed: flag(&var, "OPTION_GROUP_LABEL_TRIMMED")?,
                refresh_interval,
            },
            mapping,
            timezone,
            production_date,
            date_part,
        })
    }
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<bool> {
    match var(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => anyhow::bail!("{} must be a boolean, got '{}'", key, other),
    }
}
