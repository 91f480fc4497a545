//! Anchors recurring shift definitions to absolute timestamps.
//!
//! Two reference points are involved. The production date decides which
//! calendar day a shift is anchored to. The wall clock alone decides whether a
//! shift is active, compared on a fixed calendar day so that only the
//! time-of-day matters.

use time::{macros::date, Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};

use crate::{
    clock::Clock,
    error::{AppError, Result},
    models::shift::{
        ResolvedShift, ShiftCatalog, ShiftDefinition, ShiftGroups, ShiftOption, ShiftValue,
    },
};

/// Neutral day for time-of-day comparisons.
const FAKE_EPOCH: Date = date!(2020 - 01 - 01);

const FIELD_COUNT: usize = 6;

/// Parse `HH:MM:SS` or `HH:MM`.
pub fn parse_time_of_day(raw: &str) -> Option<Time> {
    let mut parts = raw.trim().split(':');
    let hour = parts.next()?.trim().parse::<u8>().ok()?;
    let minute = parts.next()?.trim().parse::<u8>().ok()?;
    let second = match parts.next() {
        Some(s) => s.trim().parse::<u8>().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    Time::from_hms(hour, minute, second).ok()
}

/// Remove the group's display name from an option label.
pub fn trim_group_label(label: &str, group_name: &str) -> String {
    if group_name.trim().is_empty() {
        return label.trim().to_string();
    }

    label
        .replace(group_name.trim(), "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the definition behind `option` from its encoded value row.
///
/// Returns `None` when no value row matches the option's uuid or the row does
/// not hold exactly six fields with valid times and order.
pub fn parse_shift(
    option: &ShiftOption,
    values: &[ShiftValue],
    trim_group_label_from_option_label: bool,
) -> Option<ShiftDefinition> {
    let Some(value) = values.iter().find(|v| v.uuid == option.uuid) else {
        tracing::debug!(uuid = %option.uuid, "No value row for shift option, dropping");
        return None;
    };

    let fields: Vec<&str> = value.text.split('|').collect();
    if fields.len() != FIELD_COUNT {
        tracing::debug!(
            uuid = %option.uuid,
            fields = fields.len(),
            "Malformed shift value row, dropping"
        );
        return None;
    }

    let (Some(start), Some(end), Ok(order)) = (
        parse_time_of_day(fields[3]),
        parse_time_of_day(fields[4]),
        fields[5].trim().parse::<i32>(),
    ) else {
        tracing::debug!(uuid = %option.uuid, row = %value.text, "Unparseable shift value row, dropping");
        return None;
    };

    let group_name = fields[0].to_string();
    let label = if trim_group_label_from_option_label {
        trim_group_label(&option.label, &group_name)
    } else {
        option.label.clone()
    };

    Some(ShiftDefinition {
        uuid: option.uuid.clone(),
        label,
        shift_group_uuid: fields[1].to_string(),
        shift_group_name: group_name,
        start,
        end,
        order,
    })
}

/// Absolute window of `shift` on the production date's calendar day, read
/// as wall-clock time in the clock's zone.
///
/// When the batch holds a midnight-crossing shift and this shift crosses, the
/// end moves to the next day if the production date's hour is past the end
/// hour, otherwise the start moves to the previous day.
pub fn anchor<C: Clock + ?Sized>(
    shift: &ShiftDefinition,
    clock: &C,
    production_date: OffsetDateTime,
    has_next_day_shift: bool,
) -> Result<(OffsetDateTime, OffsetDateTime)> {
    let production_date = clock.localize(production_date);
    let day = production_date.date();
    let crossing = has_next_day_shift && shift.crosses_midnight();

    let (mut start_day, mut end_day) = (day, day);
    if crossing {
        if production_date.hour() > shift.end.hour() {
            end_day = day.next_day().ok_or_else(|| out_of_range(shift, day))?;
        } else {
            start_day = day.previous_day().ok_or_else(|| out_of_range(shift, day))?;
        }
    }

    let start_date = clock.at_local(start_day, shift.start);
    let end_date = clock.at_local(end_day, shift.end);

    if crossing && end_date <= start_date {
        return Err(AppError::InvalidWindow {
            uuid: shift.uuid.clone(),
            start: start_date,
            end: end_date,
        });
    }

    Ok((start_date, end_date))
}

fn out_of_range(shift: &ShiftDefinition, day: Date) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "shift {} cannot be anchored next to {}",
        shift.uuid,
        day
    ))
}

/// Whether `now`'s time-of-day falls inside `[start, end)` of `shift`.
pub fn is_active_at(shift: &ShiftDefinition, now: OffsetDateTime) -> bool {
    let mut start = PrimitiveDateTime::new(FAKE_EPOCH, shift.start);
    let mut end = PrimitiveDateTime::new(FAKE_EPOCH, shift.end);
    let current = PrimitiveDateTime::new(FAKE_EPOCH, now.time());

    if shift.crosses_midnight() {
        if now.hour() <= 23 && current >= start {
            end += Duration::DAY;
        } else {
            start -= Duration::DAY;
        }
    }

    start <= current && current < end
}

/// Resolve a single definition, as done for a manual selection.
pub fn resolve_shift<C: Clock + ?Sized>(
    shift: &ShiftDefinition,
    clock: &C,
    production_date: OffsetDateTime,
) -> Result<ResolvedShift> {
    let (start_date, end_date) = anchor(shift, clock, production_date, shift.crosses_midnight())?;

    Ok(ResolvedShift {
        shift: shift.clone(),
        start_date,
        end_date,
        is_active: is_active_at(shift, clock.now()),
    })
}

/// Resolve every parseable option, grouped by shift group uuid. Activity is
/// judged against `clock.now()`.
///
/// Unparseable rows are dropped. Groups keep first-seen order and shifts keep
/// input order; sorting by `order` is left to the caller.
pub fn resolve<C: Clock + ?Sized>(
    catalog: &ShiftCatalog,
    clock: &C,
    production_date: OffsetDateTime,
    trim_group_label_from_option_label: bool,
) -> Result<ShiftGroups> {
    let now = clock.now();
    let shifts: Vec<ShiftDefinition> = catalog
        .options
        .iter()
        .filter_map(|option| parse_shift(option, &catalog.values, trim_group_label_from_option_label))
        .collect();

    let has_next_day_shift = shifts.iter().any(ShiftDefinition::crosses_midnight);

    let mut groups = ShiftGroups::new();
    for shift in shifts {
        let (start_date, end_date) = anchor(&shift, clock, production_date, has_next_day_shift)?;
        let is_active = is_active_at(&shift, now);

        groups
            .entry(shift.shift_group_uuid.clone())
            .or_default()
            .push(ResolvedShift {
                shift,
                start_date,
                end_date,
                is_active,
            });
    }

    Ok(groups)
}
