use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Source of "now" for services and tests.
///
/// The system clock reports calendar days in the local offset; a fixed clock
/// uses UTC so tests do not depend on the machine's time zone.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Offset used to decide which calendar day a timestamp falls on.
    #[must_use]
    pub fn calendar_offset(&self) -> FixedOffset {
        match self {
            Clock::System => Local::now().offset().fix(),
            Clock::Fixed(_) => Utc.fix(),
        }
    }

    /// Today's date in the clock's calendar offset.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        calendar_day(self.now(), self.calendar_offset())
    }

    /// Moves a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Calendar date of `at` as seen from `offset`.
#[must_use]
pub fn calendar_day(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
