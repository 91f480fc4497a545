mod common;

use shiftselect_backend::{
    clock::FixedClock,
    models::{selection::SelectionState, shift::{ShiftCatalog, ShiftGroups}},
    resolver,
    selector::{self, default_group, effective_group},
};
use time::{macros::datetime, OffsetDateTime};

use common::catalog;

/// G1 has a shift active at 10:00, G2 does not.
fn g1_first() -> ShiftCatalog {
    catalog()
        .shift("Group 1", "G1", "g1-morning", "Morning", "06:00:00", "14:00:00", 1)
        .shift("Group 1", "G1", "g1-rest", "Rest", "14:00:00", "06:00:00", 2)
        .shift("Group 2", "G2", "g2-afternoon", "Afternoon", "14:00:00", "22:00:00", 1)
        .shift("Group 2", "G2", "g2-night", "Night", "22:00:00", "06:00:00", 2)
        .build()
}

fn g2_first() -> ShiftCatalog {
    catalog()
        .shift("Group 2", "G2", "g2-afternoon", "Afternoon", "14:00:00", "22:00:00", 1)
        .shift("Group 2", "G2", "g2-night", "Night", "22:00:00", "06:00:00", 2)
        .shift("Group 1", "G1", "g1-morning", "Morning", "06:00:00", "14:00:00", 1)
        .build()
}

const TEN_AM: OffsetDateTime = datetime!(2024-03-10 10:00 UTC);

fn resolved(catalog: &ShiftCatalog, now: OffsetDateTime) -> ShiftGroups {
    resolver::resolve(catalog, &FixedClock::new(now), now, false).unwrap()
}

fn auto_state() -> SelectionState {
    SelectionState::new(true)
}

#[test]
fn default_group_is_first_in_input_order() {
    assert_eq!(default_group(&resolved(&g1_first(), TEN_AM)), Some("G1"));
    assert_eq!(default_group(&resolved(&g2_first(), TEN_AM)), Some("G2"));
    assert_eq!(default_group(&ShiftGroups::new()), None);
}

#[test]
fn active_shift_of_default_group_is_selected() {
    let groups = resolved(&g1_first(), TEN_AM);
    let selection = selector::select_active(&groups, &auto_state(), None, TEN_AM);

    assert_eq!(selection.group.as_deref(), Some("G1"));
    assert_eq!(selection.active.map(|s| s.uuid()), Some("g1-morning"));
    assert!(selection.emit);
}

#[test]
fn nothing_is_selected_when_default_group_has_no_active_shift() {
    let groups = resolved(&g2_first(), TEN_AM);
    let selection = selector::select_active(&groups, &auto_state(), None, TEN_AM);

    assert_eq!(selection.group.as_deref(), Some("G2"));
    assert!(selection.active.is_none());
    assert!(!selection.emit);
}

#[test]
fn explicit_group_wins_even_without_an_active_shift() {
    let groups = resolved(&g1_first(), TEN_AM);
    let state = SelectionState {
        explicit_group: Some("G2".into()),
        ..auto_state()
    };

    let selection = selector::select_active(&groups, &state, Some("G1"), TEN_AM);

    assert_eq!(selection.group.as_deref(), Some("G2"));
    assert!(selection.active.is_none());
    assert!(!selection.emit);
}

#[test]
fn auto_select_group_beats_the_default_group() {
    let groups = resolved(&g2_first(), TEN_AM);
    let selection = selector::select_active(&groups, &auto_state(), Some("G1"), TEN_AM);

    assert_eq!(selection.group.as_deref(), Some("G1"));
    assert_eq!(selection.active.map(|s| s.uuid()), Some("g1-morning"));
}

#[test]
fn auto_select_group_is_ignored_when_auto_select_is_off() {
    let groups = resolved(&g2_first(), TEN_AM);
    let selection = selector::select_active(&groups, &SelectionState::new(false), Some("G1"), TEN_AM);

    assert_eq!(selection.group.as_deref(), Some("G2"));
    assert!(selection.active.is_none());
}

#[test]
fn unresolvable_auto_select_group_falls_back_to_default() {
    let groups = resolved(&g1_first(), TEN_AM);
    assert_eq!(effective_group(&groups, None, Some("missing")), Some("G1"));
    assert_eq!(effective_group(&groups, Some(""), None), Some("G1"));
    assert_eq!(effective_group(&groups, Some("elsewhere"), Some("G1")), Some("elsewhere"));
}

#[test]
fn already_applied_shift_is_not_emitted_again() {
    let groups = resolved(&g1_first(), TEN_AM);
    let state = SelectionState {
        last_applied_shift: Some("g1-morning".into()),
        ..auto_state()
    };

    for _ in 0..3 {
        let selection = selector::select_active(&groups, &state, None, TEN_AM);
        assert_eq!(selection.active.map(|s| s.uuid()), Some("g1-morning"));
        assert!(!selection.emit);
    }
}

#[test]
fn blocked_rendering_suppresses_emission() {
    let groups = resolved(&g1_first(), TEN_AM);
    let state = SelectionState {
        render_blocked: true,
        ..auto_state()
    };

    let selection = selector::select_active(&groups, &state, None, TEN_AM);
    assert!(selection.active.is_some());
    assert!(!selection.emit);
}

#[test]
fn shift_that_ended_since_resolution_is_not_emitted() {
    let groups = resolved(&g1_first(), datetime!(2024-03-10 13:59:59 UTC));
    let selection =
        selector::select_active(&groups, &auto_state(), None, datetime!(2024-03-10 14:00:01 UTC));

    assert_eq!(selection.active.map(|s| s.uuid()), Some("g1-morning"));
    assert!(!selection.emit);
}

#[test]
fn first_of_overlapping_active_shifts_wins() {
    let catalog = catalog()
        .shift("Group 1", "G1", "long", "Long", "00:00:00", "23:00:00", 1)
        .shift("Group 1", "G1", "short", "Short", "09:00:00", "11:00:00", 2)
        .build();
    let groups = resolved(&catalog, TEN_AM);

    let selection = selector::select_active(&groups, &auto_state(), None, TEN_AM);
    assert_eq!(selection.active.map(|s| s.uuid()), Some("long"));
}

#[test]
fn empty_mapping_selects_nothing() {
    let groups = ShiftGroups::new();
    let selection = selector::select_active(&groups, &auto_state(), Some("G1"), TEN_AM);

    assert_eq!(selection, selector::Selection::default());
}
