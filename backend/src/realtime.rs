//! Periodic re-selection while real-time auto-select is on.

use std::{fmt, future::Future, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;

use crate::{
    clock::Clock,
    error::Result,
    models::shift::TimeRangeUpdate,
    panel::ShiftPanel,
    store::QueryStore,
};

/// Refresh cadences offered to panel authors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "String")]
pub enum RefreshInterval {
    FiveSeconds,
    TenSeconds,
    ThirtySeconds,
    #[default]
    OneMinute,
    ThirtyMinutes,
    OneHour,
    SixHours,
    TwelveHours,
    OneDay,
}

impl RefreshInterval {
    pub const ALL: [RefreshInterval; 9] = [
        RefreshInterval::FiveSeconds,
        RefreshInterval::TenSeconds,
        RefreshInterval::ThirtySeconds,
        RefreshInterval::OneMinute,
        RefreshInterval::ThirtyMinutes,
        RefreshInterval::OneHour,
        RefreshInterval::SixHours,
        RefreshInterval::TwelveHours,
        RefreshInterval::OneDay,
    ];

    pub fn as_millis(&self) -> u64 {
        const SECOND: u64 = 1000;
        const MINUTE: u64 = 60 * SECOND;
        const HOUR: u64 = 60 * MINUTE;

        match self {
            RefreshInterval::FiveSeconds => 5 * SECOND,
            RefreshInterval::TenSeconds => 10 * SECOND,
            RefreshInterval::ThirtySeconds => 30 * SECOND,
            RefreshInterval::OneMinute => MINUTE,
            RefreshInterval::ThirtyMinutes => 30 * MINUTE,
            RefreshInterval::OneHour => HOUR,
            RefreshInterval::SixHours => 6 * HOUR,
            RefreshInterval::TwelveHours => 12 * HOUR,
            RefreshInterval::OneDay => 24 * HOUR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshInterval::FiveSeconds => "5s",
            RefreshInterval::TenSeconds => "10s",
            RefreshInterval::ThirtySeconds => "30s",
            RefreshInterval::OneMinute => "1m",
            RefreshInterval::ThirtyMinutes => "30m",
            RefreshInterval::OneHour => "1h",
            RefreshInterval::SixHours => "6h",
            RefreshInterval::TwelveHours => "12h",
            RefreshInterval::OneDay => "24h",
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.as_millis())
    }
}

impl fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefreshInterval {
    type Err = String;

    /// Accepts the short form (`5s`, `1m`, `24h`, also `1d`) or milliseconds.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s == "1d" {
            return Ok(RefreshInterval::OneDay);
        }
        if let Some(interval) = Self::ALL.into_iter().find(|i| i.as_str() == s) {
            return Ok(interval);
        }

        s.parse::<u64>()
            .ok()
            .and_then(|ms| Self::ALL.into_iter().find(|i| i.as_millis() == ms))
            .ok_or_else(|| format!("unsupported refresh interval '{}'", s))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterval {
    Millis(u64),
    Text(String),
}

impl TryFrom<RawInterval> for RefreshInterval {
    type Error = String;

    fn try_from(raw: RawInterval) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawInterval::Millis(ms) => ms.to_string().parse(),
            RawInterval::Text(s) => s.parse(),
        }
    }
}

impl From<RefreshInterval> for String {
    fn from(interval: RefreshInterval) -> Self {
        interval.as_str().to_string()
    }
}

/// Tick `panel` every `interval` until `shutdown` resolves.
///
/// The first tick fires immediately. Ticks missed while the host was busy are
/// skipped rather than replayed. A programmer error ends the loop; other
/// errors are logged and the next tick retries.
pub async fn run<S, C, F, U>(
    panel: &mut ShiftPanel<S, C>,
    interval: RefreshInterval,
    shutdown: F,
    mut on_update: U,
) -> Result<()>
where
    S: QueryStore,
    C: Clock,
    F: Future<Output = ()>,
    U: FnMut(&TimeRangeUpdate),
{
    let mut ticker = tokio::time::interval(interval.duration());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Real-time shift selection stopped");
                return Ok(());
            }
            _ = ticker.tick() => {
                match panel.tick() {
                    Ok(Some(update)) => on_update(&update),
                    Ok(None) => {}
                    Err(e) if e.is_programmer_error() => {
                        tracing::error!(error = %e, "Real-time shift selection aborted");
                        return Err(e);
                    }
                    Err(e) => tracing::warn!(error = %e, "Shift selection tick failed"),
                }
            }
        }
    }
}
