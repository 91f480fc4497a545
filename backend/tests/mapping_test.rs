mod common;

use shiftselect_backend::{
    alerts::{Alert, AlertBoard, AlertKind, AlertLevel},
    models::mapping::{OrderValue, ShiftMapping},
    AppError,
};

use common::STATIC_MAPPING;

#[test]
fn static_mapping_encodes_one_value_row_per_shift() {
    let mapping = ShiftMapping::parse(STATIC_MAPPING).unwrap();
    let catalog = mapping.catalog();

    assert_eq!(catalog.options.len(), 3);
    assert_eq!(catalog.values.len(), 3);
    assert_eq!(catalog.options[2].uuid, "shift_uuid_3");
    assert_eq!(catalog.options[2].label, "Night Custom");
    assert_eq!(
        catalog.values[2].text,
        "Group 2 eg. Winter|uuid_2|shift_uuid_3|22:00:00|06:00:00|2"
    );
    assert_eq!(catalog.values[0].uuid, "shift_uuid_1");
}

#[test]
fn order_accepts_numbers_and_strings() {
    let mapping = ShiftMapping::parse(STATIC_MAPPING).unwrap();
    let orders: Vec<&OrderValue> = mapping.static_shifts().iter().map(|s| &s.order).collect();

    assert_eq!(orders[0], &OrderValue::Number(1));
    assert_eq!(orders[2], &OrderValue::Text("2".into()));
}

#[test]
fn mapping_without_static_shifts_has_an_empty_catalog() {
    let mapping = ShiftMapping::parse(r#"{"values": {"site_uuid": "site-7"}}"#).unwrap();

    assert!(mapping.catalog().is_empty());
    assert_eq!(mapping.site_uuid(), Some("site-7"));

    let blank_site = ShiftMapping::parse(r#"{"values": {"site_uuid": ""}}"#).unwrap();
    assert_eq!(blank_site.site_uuid(), None);
}

#[test]
fn empty_document_is_a_mapping_error() {
    assert!(matches!(ShiftMapping::parse("   "), Err(AppError::Mapping(_))));
    assert!(matches!(ShiftMapping::parse("[1, 2"), Err(AppError::Json(_))));
}

#[test]
fn shifts_missing_identifiers_fail_validation() {
    let raw = r#"{"static": {"shifts": [{
        "group": "Summer",
        "group_uuid": "",
        "uuid": "s1",
        "label": "Morning",
        "startTime": "06:00:00",
        "endTime": "14:00:00",
        "order": 1
    }]}}"#;

    let err = ShiftMapping::parse(raw).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let alert = err.into_alert();
    assert_eq!(alert.kind, AlertKind::Mapping);
    assert_eq!(alert.level, AlertLevel::Danger);
    assert!(alert.text.contains("group_uuid is required"));
}

#[test]
fn separator_in_an_encoded_field_fails_validation() {
    let raw = r#"{"static": {"shifts": [{
        "group": "Summer | North",
        "group_uuid": "uuid_1",
        "uuid": "s1",
        "label": "Morning | early",
        "startTime": "06:00:00",
        "endTime": "14:00:00",
        "order": "1|2"
    }]}}"#;

    let err = ShiftMapping::parse(raw).unwrap_err();
    let alert = err.into_alert();

    assert_eq!(alert.kind, AlertKind::Mapping);
    assert!(alert.text.contains("group must not contain '|'"));
    assert!(alert.text.contains("order must not contain '|'"));
    assert!(!alert.text.contains("label"), "labels are not encoded");
}

#[test]
fn alert_board_replaces_by_kind_and_ignores_duplicates() {
    let mut board = AlertBoard::default();

    board.raise(Alert::warning(AlertKind::ShiftValues, "first"));
    board.raise(Alert::warning(AlertKind::ShiftValues, "first"));
    assert_eq!(board.alerts().len(), 1);

    board.raise(Alert::danger(AlertKind::ShiftValues, "second"));
    assert_eq!(board.alerts().len(), 1);
    assert_eq!(board.get(AlertKind::ShiftValues).unwrap().text, "second");

    board.raise(Alert::danger(AlertKind::Mapping, "mapping"));
    board.reset(AlertKind::ShiftValues);
    assert_eq!(board.alerts().len(), 1);
    assert_eq!(board.alerts()[0].kind.id(), 3);
}

#[test]
fn programmer_errors_are_distinguished_from_data_errors() {
    let window = AppError::InvalidWindow {
        uuid: "night".into(),
        start: time::macros::datetime!(2024-03-10 22:00 UTC),
        end: time::macros::datetime!(2024-03-10 06:00 UTC),
    };

    assert!(window.is_programmer_error());
    assert!(!AppError::Mapping("bad".into()).is_programmer_error());
    assert!(!AppError::NotFound("shift".into()).is_programmer_error());
}
