use {
    serde::{Deserialize, Serialize},
    std::{
        fmt,
        ops::{Add, Sub},
    },
};

/// The number of seconds in a minute.
const SECONDS_PER_MINUTE: u64 = 60;
/// The number of minutes in an hour.
const MINUTES_PER_HOUR: u64 = 60;
/// The number of hours in a day.
const HOURS_PER_DAY: u64 = 24;
/// The number of days in a week.
const DAYS_PER_WEEK: u64 = 7;

/// UNIX epoch timestamp, in second precision.
///
/// A timestamp is simply a duration between a point of time and the UNIX epoch,
/// so here we define timestamp simply as an alias to [`Duration`](crate::Duration).
pub type Timestamp = Duration;

/// A span of time, in second precision.
///
/// Token contracts measure time in whole seconds (block timestamps), so we do
/// the same. Serialized to JSON as a plain integer number of seconds.
#[derive(
    Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct Duration(u64);

impl Duration {
    pub const MAX: Self = Self(u64::MAX);
    pub const ZERO: Self = Self(0);

    pub const fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    pub const fn from_minutes(minutes: u64) -> Self {
        Self::from_seconds(minutes * SECONDS_PER_MINUTE)
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self::from_minutes(hours * MINUTES_PER_HOUR)
    }

    pub const fn from_days(days: u64) -> Self {
        Self::from_hours(days * HOURS_PER_DAY)
    }

    pub const fn from_weeks(weeks: u64) -> Self {
        Self::from_days(weeks * DAYS_PER_WEEK)
    }

    pub const fn into_seconds(self) -> u64 {
        self.0
    }

    pub const fn into_minutes(self) -> u64 {
        self.into_seconds() / SECONDS_PER_MINUTE
    }

    pub const fn into_hours(self) -> u64 {
        self.into_minutes() / MINUTES_PER_HOUR
    }

    pub const fn into_days(self) -> u64 {
        self.into_hours() / HOURS_PER_DAY
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

/// Saturates at [`Duration::MAX`].
impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

/// Saturates at [`Duration::ZERO`].
impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use crate::{Duration, JsonDeExt, JsonSerExt, ResultExt, Timestamp};

    #[test]
    fn unit_conversions() {
        assert_eq!(Duration::from_days(1).into_seconds(), 86_400);
        assert_eq!(Duration::from_weeks(1).into_days(), 7);
        assert_eq!(Duration::from_hours(36).into_days(), 1);
        assert_eq!(Duration::from_minutes(90).into_hours(), 1);
    }

    #[test]
    fn arithmetic_saturates() {
        let t = Timestamp::from_seconds(100);

        assert_eq!(t - Duration::from_seconds(150), Timestamp::ZERO);
        assert_eq!(Duration::MAX + t, Duration::MAX);
        assert_eq!(t.checked_add(Duration::MAX), None);
    }

    #[test]
    fn serialization_works() {
        const TIMESTAMP: Timestamp = Timestamp::from_seconds(1732770602);
        const TIMESTAMP_JSON: &str = "1732770602";

        TIMESTAMP.to_json_string().should_succeed_and_equal(TIMESTAMP_JSON);
        TIMESTAMP_JSON
            .deserialize_json::<Timestamp>()
            .should_succeed_and_equal(TIMESTAMP);
    }
}
