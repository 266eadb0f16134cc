//! Service time handling for GTFS schedules.
//!
//! GTFS provides times as "H:MM:SS" strings where the hour component may
//! exceed 23 to denote a service rolling past midnight (a trip departing
//! at 25:10:00 runs at 01:10 the next calendar day but belongs to the
//! previous service day). This module represents such times as plain
//! seconds past midnight with no 24-hour wraparound.

use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A schedule time as seconds past midnight of the service day.
///
/// Ordering is plain numeric ordering on seconds, so times past midnight
/// (hour ≥ 24) sort after every same-day time, which is exactly the
/// comparison the transfer-feasibility check needs.
///
/// # Examples
///
/// ```
/// use bus_planner::domain::ServiceTime;
///
/// let t = ServiceTime::parse("08:05:30").unwrap();
/// assert_eq!(t.seconds(), 8 * 3600 + 5 * 60 + 30);
/// assert_eq!(t.to_string(), "08:05:30");
///
/// // Hours past midnight are valid
/// let late = ServiceTime::parse("25:10:00").unwrap();
/// assert!(late > t);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceTime(u32);

impl ServiceTime {
    /// Creates a time from raw seconds past midnight.
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Parse a time from "H+:MM:SS" format.
    ///
    /// Hours are one or more digits with no upper bound below parse
    /// overflow; minutes and seconds are exactly two digits below 60.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_planner::domain::ServiceTime;
    ///
    /// assert!(ServiceTime::parse("00:00:00").is_ok());
    /// assert!(ServiceTime::parse("8:15:00").is_ok());
    /// assert!(ServiceTime::parse("26:45:59").is_ok());
    ///
    /// assert!(ServiceTime::parse("08:15").is_err());
    /// assert!(ServiceTime::parse("08:61:00").is_err());
    /// assert!(ServiceTime::parse("8h15m").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split(':');
        let (hours, minutes, seconds) = match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), Some(sec)) => (h, m, sec),
            _ => return Err(TimeError::new("expected H:MM:SS format")),
        };
        if parts.next().is_some() {
            return Err(TimeError::new("too many components"));
        }

        let hours = parse_digits(hours).ok_or_else(|| TimeError::new("invalid hour digits"))?;

        let minutes = parse_two_digits(minutes)
            .ok_or_else(|| TimeError::new("minutes must be two digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let seconds = parse_two_digits(seconds)
            .ok_or_else(|| TimeError::new("seconds must be two digits"))?;
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Ok(Self(hours * 3600 + minutes * 60 + seconds))
    }

    /// Returns the total seconds past midnight.
    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// Returns the whole minutes past midnight.
    ///
    /// Durations between schedule times are computed on whole minutes,
    /// matching how the times are displayed to riders.
    pub fn total_minutes(&self) -> u32 {
        self.0 / 60
    }

    /// Whole minutes elapsed since `earlier`, saturating at zero.
    pub fn minutes_since(&self, earlier: ServiceTime) -> u32 {
        self.total_minutes().saturating_sub(earlier.total_minutes())
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_two_digits(s: &str) -> Option<u32> {
    if s.len() != 2 {
        return None;
    }
    parse_digits(s)
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0 / 3600,
            (self.0 / 60) % 60,
            self.0 % 60
        )
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert_eq!(ServiceTime::parse("00:00:00").unwrap().seconds(), 0);
        assert_eq!(ServiceTime::parse("08:05:30").unwrap().seconds(), 29130);
        assert_eq!(ServiceTime::parse("23:59:59").unwrap().seconds(), 86399);
    }

    #[test]
    fn parse_single_digit_hour() {
        assert_eq!(
            ServiceTime::parse("8:05:30").unwrap(),
            ServiceTime::parse("08:05:30").unwrap()
        );
    }

    #[test]
    fn parse_past_midnight() {
        let t = ServiceTime::parse("25:10:00").unwrap();
        assert_eq!(t.seconds(), 25 * 3600 + 10 * 60);
        assert!(t > ServiceTime::parse("23:59:59").unwrap());
    }

    #[test]
    fn reject_malformed() {
        assert!(ServiceTime::parse("").is_err());
        assert!(ServiceTime::parse("08:05").is_err());
        assert!(ServiceTime::parse("08:05:30:00").is_err());
        assert!(ServiceTime::parse("ab:05:30").is_err());
        assert!(ServiceTime::parse("08:5:30").is_err());
        assert!(ServiceTime::parse("08:60:00").is_err());
        assert!(ServiceTime::parse("08:00:60").is_err());
        assert!(ServiceTime::parse("-8:00:00").is_err());
    }

    #[test]
    fn display_pads_components() {
        assert_eq!(ServiceTime::from_seconds(0).to_string(), "00:00:00");
        assert_eq!(ServiceTime::parse("8:05:03").unwrap().to_string(), "08:05:03");
        assert_eq!(ServiceTime::parse("25:10:00").unwrap().to_string(), "25:10:00");
    }

    #[test]
    fn minutes_since_floors_to_whole_minutes() {
        let dep = ServiceTime::parse("08:00:30").unwrap();
        let arr = ServiceTime::parse("08:10:00").unwrap();
        // 08:10 - 08:00 on the wall clock, not 9.5 minutes rounded
        assert_eq!(arr.minutes_since(dep), 10);
        assert_eq!(dep.minutes_since(arr), 0);
    }

    #[test]
    fn ordering_is_numeric() {
        let a = ServiceTime::parse("08:00:00").unwrap();
        let b = ServiceTime::parse("08:00:01").unwrap();
        assert!(a < b);
        assert_eq!(a, ServiceTime::from_seconds(28800));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse returns the original time
        #[test]
        fn roundtrip(secs in 0u32..200_000) {
            let t = ServiceTime::from_seconds(secs);
            prop_assert_eq!(ServiceTime::parse(&t.to_string()).unwrap(), t);
        }

        /// Parsing computes h*3600 + m*60 + s with no wraparound
        #[test]
        fn seconds_law(h in 0u32..48, m in 0u32..60, s in 0u32..60) {
            let t = ServiceTime::parse(&format!("{h:02}:{m:02}:{s:02}")).unwrap();
            prop_assert_eq!(t.seconds(), h * 3600 + m * 60 + s);
        }

        /// Out-of-range minutes are always rejected
        #[test]
        fn bad_minutes_rejected(h in 0u32..48, m in 60u32..100, s in 0u32..60) {
            let bad = format!("{:02}:{}:{:02}", h, m, s);
            prop_assert!(ServiceTime::parse(&bad).is_err());
        }

        /// Garbage never parses
        #[test]
        fn garbage_rejected(s in "[a-z ]{1,12}") {
            prop_assert!(ServiceTime::parse(&s).is_err());
        }
    }
}
