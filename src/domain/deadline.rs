//! Quadrant deadlines.
//!
//! Every quadrant has an implied due time relative to "now":
//!
//! ```text
//! immediate  now + 25 minutes
//! today      today 23:59:59.999
//! week       upcoming Sunday 20:00
//! month      last day of the month 23:59:59.999
//! ```
//!
//! Deadlines are recomputed from a caller-supplied `now` on every render and
//! never cached. All wall-clock fields are interpreted in `now`'s time zone.

use super::enums::Quadrant;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Length of an immediate-quadrant slot
pub const IMMEDIATE_WINDOW_MINUTES: i64 = 25;

/// Hour of the weekly review on Sunday
pub const WEEK_DEADLINE_HOUR: u32 = 20;

/// What the week deadline is when `now` is already a Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SundayPolicy {
    /// Sunday rolls over to the following Sunday (always in the future)
    #[default]
    NextWeek,
    /// Sunday means today at 20:00, which is in the past after 20:00
    SameDay,
}

/// Compute the deadline for a quadrant
pub fn deadline_for<Tz: TimeZone>(
    quadrant: Quadrant,
    now: &DateTime<Tz>,
    policy: SundayPolicy,
) -> DateTime<Tz> {
    match quadrant {
        Quadrant::Immediate => now.clone() + Duration::minutes(IMMEDIATE_WINDOW_MINUTES),
        Quadrant::Today => end_of_day(now, now.date_naive()),
        Quadrant::Week => {
            let today = now.date_naive();
            let days_until_sunday = (7 - today.weekday().num_days_from_sunday()) % 7;
            let days = match (days_until_sunday, policy) {
                (0, SundayPolicy::NextWeek) => 7,
                (n, _) => n,
            };
            let sunday = today + Duration::days(days as i64);
            let at = sunday.and_hms_opt(WEEK_DEADLINE_HOUR, 0, 0);
            at.and_then(|naive| resolve_local(now, naive))
                .unwrap_or_else(|| now.clone())
        }
        Quadrant::Month => end_of_day(now, last_day_of_month(now.date_naive())),
    }
}

/// Deadline for a raw quadrant tag; unknown tags fall back to `now`
pub fn deadline_for_tag<Tz: TimeZone>(
    tag: &str,
    now: &DateTime<Tz>,
    policy: SundayPolicy,
) -> DateTime<Tz> {
    match Quadrant::from_tag(tag) {
        Some(quadrant) => deadline_for(quadrant, now, policy),
        None => now.clone(),
    }
}

/// Render a deadline like "Sun, Mar 9 20:00"
pub fn format_deadline<Tz: TimeZone>(deadline: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    deadline.format("%a, %b %-d %H:%M").to_string()
}

fn end_of_day<Tz: TimeZone>(now: &DateTime<Tz>, date: NaiveDate) -> DateTime<Tz> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| resolve_local(now, naive))
        .unwrap_or_else(|| now.clone())
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Map a wall-clock time into `now`'s zone. Ambiguous times take the earlier
/// instant; times skipped by a DST jump move forward by an hour.
fn resolve_local<Tz: TimeZone>(now: &DateTime<Tz>, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_immediate_is_25_minutes_out() {
        let now = at(2024, 3, 6, 10, 0);
        let deadline = deadline_for(Quadrant::Immediate, &now, SundayPolicy::NextWeek);
        assert_eq!(deadline, at(2024, 3, 6, 10, 25));
    }

    #[test]
    fn test_today_is_end_of_day() {
        let now = at(2024, 3, 6, 10, 0);
        let deadline = deadline_for(Quadrant::Today, &now, SundayPolicy::NextWeek);
        assert_eq!(deadline.date_naive(), now.date_naive());
        assert_eq!(
            (deadline.hour(), deadline.minute(), deadline.second()),
            (23, 59, 59)
        );
        assert_eq!(deadline.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_week_midweek_goes_to_coming_sunday() {
        // 2024-03-06 is a Wednesday
        let now = at(2024, 3, 6, 10, 0);
        let deadline = deadline_for(Quadrant::Week, &now, SundayPolicy::NextWeek);
        assert_eq!(deadline, at(2024, 3, 10, 20, 0));
        assert_eq!(deadline.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_week_saturday_goes_to_tomorrow() {
        let now = at(2024, 3, 9, 23, 0);
        let deadline = deadline_for(Quadrant::Week, &now, SundayPolicy::NextWeek);
        assert_eq!(deadline, at(2024, 3, 10, 20, 0));
    }

    #[test]
    fn test_week_on_sunday_next_week_policy() {
        let now = at(2024, 3, 10, 9, 0);
        let deadline = deadline_for(Quadrant::Week, &now, SundayPolicy::NextWeek);
        assert_eq!(deadline, at(2024, 3, 17, 20, 0));
    }

    #[test]
    fn test_week_on_sunday_same_day_policy() {
        let now = at(2024, 3, 10, 9, 0);
        let deadline = deadline_for(Quadrant::Week, &now, SundayPolicy::SameDay);
        assert_eq!(deadline, at(2024, 3, 10, 20, 0));

        // The same-day policy can land behind us on a Sunday evening
        let late = at(2024, 3, 10, 21, 0);
        assert!(deadline_for(Quadrant::Week, &late, SundayPolicy::SameDay) < late);
    }

    #[test]
    fn test_month_handles_leap_february_and_december() {
        let feb = deadline_for(Quadrant::Month, &at(2024, 2, 10, 8, 0), SundayPolicy::NextWeek);
        assert_eq!(feb.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let dec = deadline_for(Quadrant::Month, &at(2023, 12, 31, 8, 0), SundayPolicy::NextWeek);
        assert_eq!(dec.date_naive(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(dec.hour(), 23);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_now() {
        let now = at(2024, 3, 6, 10, 0);
        assert_eq!(deadline_for_tag("someday", &now, SundayPolicy::NextWeek), now);
        assert_eq!(
            deadline_for_tag("today", &now, SundayPolicy::NextWeek),
            deadline_for(Quadrant::Today, &now, SundayPolicy::NextWeek)
        );
    }

    #[test]
    fn test_deadlines_never_precede_now_with_default_policy() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        // Walk a year in 7-hour steps to hit every weekday at varied hours
        for step in 0..(366 * 24 / 7) {
            let now = start + Duration::hours(7 * step);
            for q in Quadrant::all() {
                let deadline = deadline_for(*q, &now, SundayPolicy::NextWeek);
                assert!(deadline >= now, "{:?} deadline {} is before {}", q, deadline, now);
                assert_eq!(deadline, deadline_for(*q, &now, SundayPolicy::NextWeek));
            }
        }
    }

    #[test]
    fn test_format_deadline() {
        assert_eq!(format_deadline(&at(2024, 3, 10, 20, 0)), "Sun, Mar 10 20:00");
    }
}
