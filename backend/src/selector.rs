//! Picks the group to track and the shift within it that is active now.

use time::OffsetDateTime;

use crate::{
    models::{
        selection::SelectionState,
        shift::{ResolvedShift, ShiftGroups},
    },
    resolver,
};

/// Outcome of one selection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection<'a> {
    pub group: Option<String>,
    pub active: Option<&'a ResolvedShift>,
    /// True when `active` differs from the last applied shift and may be published.
    pub emit: bool,
}

/// The first group in input order.
pub fn default_group(groups: &ShiftGroups) -> Option<&str> {
    groups.keys().next().map(String::as_str)
}

/// Explicit override first, then the auto-select group if it resolved, then
/// the default group. An explicit group wins even when it has no shifts.
pub fn effective_group<'a>(
    groups: &'a ShiftGroups,
    explicit_group: Option<&'a str>,
    auto_select_group: Option<&'a str>,
) -> Option<&'a str> {
    if let Some(group) = explicit_group.filter(|g| !g.is_empty()) {
        return Some(group);
    }

    auto_select_group
        .filter(|g| groups.contains_key(*g))
        .or_else(|| default_group(groups))
}

/// First shift flagged active, in list order.
pub fn active_shift<'a>(groups: &'a ShiftGroups, group: &str) -> Option<&'a ResolvedShift> {
    groups.get(group)?.iter().find(|s| s.is_active)
}

/// Run the selection for `state`. The auto-select group only counts while
/// auto-select is on. `now` re-validates the flagged shift in case the clock
/// moved since resolution.
pub fn select_active<'a>(
    groups: &'a ShiftGroups,
    state: &SelectionState,
    auto_select_group: Option<&str>,
    now: OffsetDateTime,
) -> Selection<'a> {
    let auto_select_group = auto_select_group.filter(|_| state.auto_select);
    let Some(group) = effective_group(groups, state.explicit_group.as_deref(), auto_select_group)
        .map(str::to_string)
    else {
        return Selection::default();
    };

    let active = active_shift(groups, &group);
    let emit = active.is_some_and(|shift| {
        state.last_applied_shift.as_deref() != Some(shift.uuid())
            && resolver::is_active_at(&shift.shift, now)
            && !state.render_blocked
    });

    Selection {
        group: Some(group),
        active,
        emit,
    }
}
