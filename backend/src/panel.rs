//! One shift selector instance: its catalog, selection state and host store.

use time::{Date, OffsetDateTime};

use crate::{
    alerts::{Alert, AlertBoard, AlertKind},
    clock::Clock,
    config::PanelOptions,
    error::{AppError, Result},
    models::{
        mapping::ShiftMapping,
        selection::{DatePart, SelectionState},
        shift::{ShiftCatalog, ShiftGroups, TimeRangeUpdate},
    },
    resolver, selector,
    store::{self, QueryMap, QueryStore, FROM_KEY, GROUP_KEY, REFRESH_KEY, TO_KEY},
};

pub struct ShiftPanel<S, C> {
    options: PanelOptions,
    catalog: ShiftCatalog,
    site_uuid: Option<String>,
    store: S,
    clock: C,
    state: SelectionState,
    production_date: OffsetDateTime,
    date_part: DatePart,
    alerts: AlertBoard,
}

impl<S: QueryStore, C: Clock> ShiftPanel<S, C> {
    /// The production date starts at the store's `from` bound when it holds
    /// an absolute value, otherwise at the current instant.
    pub fn new(options: PanelOptions, store: S, clock: C) -> Self {
        let production_date = store::read_millis(&store, FROM_KEY)
            .and_then(|ms| OffsetDateTime::from_unix_timestamp(ms / 1000).ok())
            .map(|instant| clock.localize(instant))
            .unwrap_or_else(|| clock.now());

        let mut state = SelectionState::new(options.is_auto_select_shift);
        state.sync_from(&store);

        Self {
            options,
            catalog: ShiftCatalog::default(),
            site_uuid: None,
            store,
            clock,
            state,
            production_date,
            date_part: DatePart::default(),
            alerts: AlertBoard::default(),
        }
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn production_date(&self) -> OffsetDateTime {
        self.production_date
    }

    pub fn date_part(&self) -> DatePart {
        self.date_part
    }

    pub fn alerts(&self) -> &[Alert] {
        self.alerts.alerts()
    }

    pub fn close_alert(&mut self, kind: AlertKind) {
        self.alerts.close(kind);
    }

    /// Parse and install a shift mapping document. On failure the previous
    /// catalog stays in place and a mapping alert is raised.
    pub fn load_mapping(&mut self, raw: &str) -> Result<()> {
        match ShiftMapping::parse(raw) {
            Ok(mapping) => {
                self.alerts.reset(AlertKind::Mapping);
                self.site_uuid = mapping.site_uuid().map(str::to_string);
                self.set_catalog(mapping.catalog());
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                self.alerts.raise(e.into_alert());
                Err(AppError::Mapping(message))
            }
        }
    }

    pub fn set_catalog(&mut self, catalog: ShiftCatalog) {
        self.catalog = catalog;
        self.alerts
            .check_catalog(&self.catalog, self.site_uuid.as_deref());
    }

    /// Move the production date to `date`, keeping its local time of day.
    pub fn set_production_date(&mut self, date: Date) {
        self.production_date = self.clock.at_local(date, self.production_date.time());
    }

    pub fn set_date_part(&mut self, part: DatePart) {
        self.date_part = part;
    }

    pub fn set_render_blocked(&mut self, blocked: bool) {
        self.state.render_blocked = blocked;
    }

    /// Shifts anchored to the current production date.
    pub fn shifts(&self) -> Result<ShiftGroups> {
        resolver::resolve(
            &self.catalog,
            &self.clock,
            self.production_date,
            self.options.is_option_group_label_trimmed,
        )
    }

    /// The store's refresh value, else the configured one in auto-select mode.
    pub fn refresh_param(&self) -> Option<String> {
        self.store
            .get(REFRESH_KEY)
            .filter(|r| !r.is_empty())
            .or_else(|| {
                self.options
                    .is_auto_select_shift
                    .then(|| self.options.refresh_interval.to_string())
            })
    }

    fn auto_select_group(&self) -> Option<&str> {
        self.options.auto_select_shift_group.as_deref()
    }

    /// One real-time pass: re-anchor to now, select, and publish a changed
    /// active shift. No-op unless auto-select is enabled.
    pub fn tick(&mut self) -> Result<Option<TimeRangeUpdate>> {
        if !self.options.is_auto_select_shift {
            return Ok(None);
        }

        let now = self.clock.now();
        self.production_date = now;
        self.state.sync_from(&self.store);

        let groups = resolver::resolve(
            &self.catalog,
            &self.clock,
            now,
            self.options.is_option_group_label_trimmed,
        )?;

        if !self.state.initiated {
            self.initiate(&groups);
        }

        let selection = selector::select_active(&groups, &self.state, self.auto_select_group(), now);
        let Some(shift) = selection.active.filter(|_| selection.emit) else {
            if selection.active.is_none() {
                tracing::debug!(group = ?selection.group, "No active shift");
            }
            return Ok(None);
        };

        let update = self.state.apply(shift);
        tracing::info!(
            uuid = %shift.uuid(),
            label = %shift.shift.label,
            from = update.from,
            to = update.to,
            "Active shift changed"
        );
        self.publish(&update, selection.group.as_deref());

        Ok(Some(update))
    }

    /// First real-time pass: pin the tracked group and refresh cadence in the store.
    fn initiate(&mut self, groups: &ShiftGroups) {
        let mut partial = QueryMap::new();

        if self.state.explicit_group.is_none() {
            if let Some(group) = selector::effective_group(groups, None, self.auto_select_group()) {
                partial.insert(GROUP_KEY.into(), group.to_string());
            }
        }

        if let Some(refresh) = self.refresh_param() {
            partial.insert(REFRESH_KEY.into(), refresh.clone());
            self.state.last_refresh = Some(refresh);
        }

        if !partial.is_empty() {
            self.store.set(partial);
            self.state.sync_from(&self.store);
        }
        self.state.initiated = true;
    }

    /// Manual selection of shift `uuid` against the production date.
    ///
    /// Refused with an alert while auto-select is on. Start-only and end-only
    /// updates keep the other bound from the store and carry no uuid.
    pub fn select_shift(&mut self, uuid: &str) -> Result<Option<TimeRangeUpdate>> {
        let shift = self
            .catalog
            .options
            .iter()
            .find(|o| o.uuid == uuid)
            .and_then(|o| {
                resolver::parse_shift(o, &self.catalog.values, self.options.is_option_group_label_trimmed)
            })
            .ok_or_else(|| AppError::NotFound(format!("Shift {} not found", uuid)))?;

        if self.options.is_auto_select_shift {
            self.alerts.raise(Alert::danger(
                AlertKind::RealtimeManualUpdate,
                "Currently the selector is in realtime mode. Disable real-time shift auto-select to pick shifts manually.",
            ));
            return Ok(None);
        }

        let resolved = resolver::resolve_shift(&shift, &self.clock, self.production_date)?;
        let mut update = resolved.time_range();
        match self.date_part {
            DatePart::Both => {}
            DatePart::From => {
                update.to = store::read_millis(&self.store, TO_KEY).unwrap_or(update.to);
                update.uuid = None;
            }
            DatePart::To => {
                update.from = store::read_millis(&self.store, FROM_KEY).unwrap_or(update.from);
                update.uuid = None;
            }
        }

        if update.from == update.to {
            self.alerts.raise(Alert::danger(
                AlertKind::InvalidRange,
                format!(
                    "From ({}) to ({}) is an invalid date-time range selection! Please try again.",
                    update.from, update.to
                ),
            ));
            return Ok(None);
        }
        self.alerts.reset(AlertKind::InvalidRange);

        let group = match self.date_part {
            DatePart::Both => {
                self.state.apply(&resolved);
                Some(resolved.group_uuid())
            }
            DatePart::From | DatePart::To => None,
        };
        self.publish(&update, group);

        Ok(Some(update))
    }

    /// Write `update` to the store. The refresh value is only rewritten when it
    /// changed since the last write.
    fn publish(&mut self, update: &TimeRangeUpdate, group: Option<&str>) {
        let refresh = self
            .refresh_param()
            .filter(|r| self.state.last_refresh.as_deref() != Some(r.as_str()));

        store::write_time_range(&mut self.store, update, refresh.as_deref());
        if let Some(refresh) = refresh {
            self.state.last_refresh = Some(refresh);
        }

        if let Some(group) = group {
            let mut partial = QueryMap::new();
            partial.insert(GROUP_KEY.into(), group.to_string());
            self.store.set(partial);
        }
        self.state.sync_from(&self.store);
    }
}
