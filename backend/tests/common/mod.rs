#![allow(dead_code)]

use shiftselect_backend::{
    clock::FixedClock,
    config::PanelOptions,
    models::shift::{ShiftCatalog, ShiftOption, ShiftValue},
    panel::ShiftPanel,
    store::MemoryStore,
};
use time::OffsetDateTime;

pub const SUMMER: &str = "uuid_summer";
pub const WINTER: &str = "uuid_winter";

pub const MORNING: &str = "shift_morning";
pub const AFTERNOON: &str = "shift_afternoon";
pub const NIGHT: &str = "shift_night";
pub const WINTER_DAY: &str = "shift_winter_day";
pub const WINTER_NIGHT: &str = "shift_winter_night";

/// The static mapping example panel authors start from.
pub const STATIC_MAPPING: &str = r#"{
    "static": {
        "shifts": [
            {
                "group": "Group 1 eg. Summer",
                "group_uuid": "uuid_1",
                "uuid": "shift_uuid_1",
                "label": "Morning Custom",
                "startTime": "06:00:00",
                "endTime": "14:00:00",
                "order": 1
            },
            {
                "group": "Group 2 eg. Winter",
                "group_uuid": "uuid_2",
                "uuid": "shift_uuid_2",
                "label": "Afternoon Custom",
                "startTime": "14:00:00",
                "endTime": "22:00:00",
                "order": 1
            },
            {
                "group": "Group 2 eg. Winter",
                "group_uuid": "uuid_2",
                "uuid": "shift_uuid_3",
                "label": "Night Custom",
                "startTime": "22:00:00",
                "endTime": "06:00:00",
                "order": "2"
            }
        ]
    }
}"#;

#[derive(Default)]
pub struct CatalogBuilder {
    catalog: ShiftCatalog,
}

pub fn catalog() -> CatalogBuilder {
    CatalogBuilder::default()
}

impl CatalogBuilder {
    pub fn shift(
        mut self,
        group_name: &str,
        group_uuid: &str,
        uuid: &str,
        label: &str,
        start: &str,
        end: &str,
        order: i32,
    ) -> Self {
        self.catalog.options.push(ShiftOption {
            uuid: uuid.to_string(),
            label: label.to_string(),
        });
        self.catalog.values.push(ShiftValue::encode(
            group_name,
            group_uuid,
            uuid,
            start,
            end,
            &order.to_string(),
        ));
        self
    }

    /// An option whose value row is missing.
    pub fn orphan_option(mut self, uuid: &str, label: &str) -> Self {
        self.catalog.options.push(ShiftOption {
            uuid: uuid.to_string(),
            label: label.to_string(),
        });
        self
    }

    /// An option with a hand-written value row.
    pub fn raw(mut self, uuid: &str, label: &str, text: &str) -> Self {
        self.catalog.options.push(ShiftOption {
            uuid: uuid.to_string(),
            label: label.to_string(),
        });
        self.catalog.values.push(ShiftValue {
            uuid: uuid.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn build(self) -> ShiftCatalog {
        self.catalog
    }
}

/// Summer: morning/afternoon/night covering the whole day.
/// Winter: a long day shift and a night shift.
pub fn two_groups() -> ShiftCatalog {
    catalog()
        .shift("Summer", SUMMER, MORNING, "Morning", "06:00:00", "14:00:00", 1)
        .shift("Summer", SUMMER, AFTERNOON, "Afternoon", "14:00:00", "22:00:00", 2)
        .shift("Summer", SUMMER, NIGHT, "Night", "22:00:00", "06:00:00", 3)
        .shift("Winter", WINTER, WINTER_DAY, "Day", "07:00:00", "19:00:00", 1)
        .shift("Winter", WINTER, WINTER_NIGHT, "Night", "19:00:00", "07:00:00", 2)
        .build()
}

pub fn millis(instant: OffsetDateTime) -> i64 {
    instant.unix_timestamp() * 1000
}

pub fn realtime_options(group: Option<&str>) -> PanelOptions {
    PanelOptions {
        is_auto_select_shift: true,
        auto_select_shift_group: group.map(str::to_string),
        ..PanelOptions::default()
    }
}

pub fn panel(
    options: PanelOptions,
    store: MemoryStore,
    now: OffsetDateTime,
    catalog: ShiftCatalog,
) -> ShiftPanel<MemoryStore, FixedClock> {
    let mut panel = ShiftPanel::new(options, store, FixedClock::new(now));
    panel.set_catalog(catalog);
    panel
}
