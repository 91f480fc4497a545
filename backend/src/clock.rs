use chrono::{NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Source of the current instant, expressed in the site's local offset.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;

    /// Express `instant` in the local offset in effect at that instant.
    fn localize(&self, instant: OffsetDateTime) -> OffsetDateTime {
        instant.to_offset(self.now().offset())
    }

    /// The instant a local wall-clock reading `date` `time` denotes.
    fn at_local(&self, date: Date, time: Time) -> OffsetDateTime {
        PrimitiveDateTime::new(date, time).assume_offset(self.now().offset())
    }
}

/// Wall clock bound to an IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        let seconds = self
            .tz
            .timestamp_opt(instant.unix_timestamp(), 0)
            .single()
            .map(|dt| dt.offset().fix().local_minus_utc())
            .unwrap_or(0);

        UtcOffset::from_whole_seconds(seconds).unwrap_or(UtcOffset::UTC)
    }

    /// Offset for a local reading. Ambiguous readings take the earlier
    /// instant; readings inside a gap take the offset in effect before it.
    fn offset_for_local(&self, local: PrimitiveDateTime) -> UtcOffset {
        let seconds = naive(local)
            .and_then(|naive| {
                self.tz
                    .offset_from_local_datetime(&naive)
                    .earliest()
                    .or_else(|| {
                        self.tz
                            .offset_from_local_datetime(&(naive - chrono::Duration::hours(1)))
                            .earliest()
                    })
            })
            .map(|offset| offset.fix().local_minus_utc())
            .unwrap_or(0);

        UtcOffset::from_whole_seconds(seconds).unwrap_or(UtcOffset::UTC)
    }
}

fn naive(local: PrimitiveDateTime) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(
        local.year(),
        u32::from(u8::from(local.month())),
        u32::from(local.day()),
    )?
    .and_hms_nano_opt(
        u32::from(local.hour()),
        u32::from(local.minute()),
        u32::from(local.second()),
        local.nanosecond(),
    )
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        self.localize(OffsetDateTime::now_utc())
    }

    fn localize(&self, instant: OffsetDateTime) -> OffsetDateTime {
        instant.to_offset(self.offset_at(instant))
    }

    fn at_local(&self, date: Date, time: Time) -> OffsetDateTime {
        let local = PrimitiveDateTime::new(date, time);
        self.localize(local.assume_offset(self.offset_for_local(local)))
    }
}

/// A clock frozen at one instant; `advance` moves it forward.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: OffsetDateTime,
}

impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: OffsetDateTime) {
        self.now = now;
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now
    }
}
