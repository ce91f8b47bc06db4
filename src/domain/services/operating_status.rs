use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};
use crate::domain::models::hours::{DateOverride, OperatingStatus, WeeklyHours};
use crate::error::AppError;

const MINUTES_PER_DAY: u32 = 1440;
const SOON_WINDOW_MIN: u32 = 30;

/// Computes a clinic's display status at `now` (clinic-local wall clock).
///
/// A date override for `now`'s calendar date fully short-circuits the weekly
/// schedule. Otherwise each shift for the weekday is tried in the order
/// supplied; the first shift yielding a non-closed status wins. No shift
/// matching anything means closed, as does an empty schedule.
pub fn evaluate(
    weekly: &[WeeklyHours],
    overrides: &[DateOverride],
    now: NaiveDateTime,
) -> Result<OperatingStatus, AppError> {
    let day_of_week = now.weekday().num_days_from_monday() as i32;
    let current = now.hour() * 60 + now.minute();

    if let Some(rule) = overrides.iter().find(|o| o.date == now.date()) {
        if rule.is_closed {
            return Ok(OperatingStatus::Closed);
        }
        // An override without both bounds is a closure for that date.
        let (Some(open_raw), Some(close_raw)) = (rule.open_time.as_deref(), rule.close_time.as_deref()) else {
            return Ok(OperatingStatus::Closed);
        };
        return Ok(classify(current, minute_of_day(open_raw)?, minute_of_day(close_raw)?));
    }

    for shift in weekly.iter().filter(|s| s.day_of_week == day_of_week) {
        let open = minute_of_day(&shift.open_time)?;
        let close = minute_of_day(&shift.close_time)?;
        match classify(current, open, close) {
            OperatingStatus::Closed => continue,
            status => return Ok(status),
        }
    }

    Ok(OperatingStatus::Closed)
}

/// Closing-soon takes precedence over opening-soon, which takes precedence
/// over the plain in-window check. The proximity checks are symmetric, so an
/// instant shortly after opening still reports opening-soon.
fn classify(current: u32, open: u32, close: u32) -> OperatingStatus {
    if within_soon_window(current, close) {
        OperatingStatus::ClosingSoon
    } else if within_soon_window(current, open) {
        OperatingStatus::OpeningSoon
    } else if open <= current && current <= close {
        OperatingStatus::Open
    } else {
        OperatingStatus::Closed
    }
}

/// Circular minute-of-day distance, so shifts straddling midnight report
/// proximity correctly ("23:55" is 15 minutes from "00:10", not 1435).
fn within_soon_window(current: u32, target: u32) -> bool {
    let diff = current.abs_diff(target);
    diff.min(MINUTES_PER_DAY - diff) <= SOON_WINDOW_MIN
}

fn minute_of_day(value: &str) -> Result<u32, AppError> {
    // %H tolerates single digits; the comparison invariant wants "09:00".
    if value.len() != 5 {
        return Err(AppError::Validation(format!("Invalid time '{}', expected HH:MM", value)));
    }
    let parsed = NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid time '{}', expected HH:MM", value)))?;
    Ok(parsed.hour() * 60 + parsed.minute())
}

/// Validates a wall-clock time string as zero-padded 24-hour "HH:MM".
pub fn validate_time(value: &str) -> Result<(), AppError> {
    minute_of_day(value).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2025-03-10 is a Monday, 2025-03-16 a Sunday.
    fn at(date: &str, time: &str) -> NaiveDateTime {
        let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let t = NaiveTime::parse_from_str(time, "%H:%M").unwrap();
        d.and_time(t)
    }

    fn shift(day_of_week: i32, open: &str, close: &str) -> WeeklyHours {
        WeeklyHours::new("clinic-1".to_string(), day_of_week, open.to_string(), close.to_string())
    }

    fn override_for(date: &str) -> DateOverride {
        DateOverride::new(
            "clinic-1".to_string(),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
    }

    #[test]
    fn no_hours_is_closed() {
        let status = evaluate(&[], &[], at("2025-03-10", "12:00")).unwrap();
        assert_eq!(status, OperatingStatus::Closed);
    }

    #[test]
    fn inside_window_is_open() {
        let weekly = vec![shift(0, "09:00", "17:00")];
        let status = evaluate(&weekly, &[], at("2025-03-10", "12:00")).unwrap();
        assert_eq!(status, OperatingStatus::Open);
    }

    #[test]
    fn opening_soon_boundary() {
        let weekly = vec![shift(0, "09:00", "17:00")];
        assert_eq!(
            evaluate(&weekly, &[], at("2025-03-10", "08:35")).unwrap(),
            OperatingStatus::OpeningSoon
        );
        assert_eq!(
            evaluate(&weekly, &[], at("2025-03-10", "08:29")).unwrap(),
            OperatingStatus::Closed
        );
    }

    #[test]
    fn closing_soon_boundary_is_inclusive() {
        let weekly = vec![shift(0, "09:00", "17:00")];
        assert_eq!(
            evaluate(&weekly, &[], at("2025-03-10", "16:45")).unwrap(),
            OperatingStatus::ClosingSoon
        );
        assert_eq!(
            evaluate(&weekly, &[], at("2025-03-10", "16:30")).unwrap(),
            OperatingStatus::ClosingSoon
        );
        assert_eq!(
            evaluate(&weekly, &[], at("2025-03-10", "16:29")).unwrap(),
            OperatingStatus::Open
        );
    }

    #[test]
    fn closed_override_short_circuits_weekly_hours() {
        let weekly = vec![shift(0, "09:00", "17:00")];
        let mut rule = override_for("2025-03-10");
        rule.is_closed = true;
        let status = evaluate(&weekly, &[rule], at("2025-03-10", "12:00")).unwrap();
        assert_eq!(status, OperatingStatus::Closed);
    }

    #[test]
    fn override_without_bounds_is_a_closure() {
        let weekly = vec![shift(0, "09:00", "17:00")];
        let rule = override_for("2025-03-10"); // is_closed=false, no bounds
        let status = evaluate(&weekly, &[rule], at("2025-03-10", "12:00")).unwrap();
        assert_eq!(status, OperatingStatus::Closed);
    }

    #[test]
    fn override_special_hours_apply_instead_of_weekly() {
        let weekly = vec![shift(0, "09:00", "17:00")];
        let mut rule = override_for("2025-03-10");
        rule.open_time = Some("10:00".to_string());
        rule.close_time = Some("13:00".to_string());
        let overrides = vec![rule];

        // 09:15 would be open under weekly hours, but the override governs.
        assert_eq!(
            evaluate(&weekly, &overrides, at("2025-03-10", "09:15")).unwrap(),
            OperatingStatus::Closed
        );
        assert_eq!(
            evaluate(&weekly, &overrides, at("2025-03-10", "09:45")).unwrap(),
            OperatingStatus::OpeningSoon
        );
        assert_eq!(
            evaluate(&weekly, &overrides, at("2025-03-10", "11:00")).unwrap(),
            OperatingStatus::Open
        );
        assert_eq!(
            evaluate(&weekly, &overrides, at("2025-03-10", "12:50")).unwrap(),
            OperatingStatus::ClosingSoon
        );
    }

    #[test]
    fn override_applies_only_on_its_date() {
        let weekly = vec![shift(0, "09:00", "17:00")];
        let mut rule = override_for("2025-03-11");
        rule.is_closed = true;
        let status = evaluate(&weekly, &[rule], at("2025-03-10", "12:00")).unwrap();
        assert_eq!(status, OperatingStatus::Open);
    }

    #[test]
    fn split_shifts_gap_is_closed() {
        let weekly = vec![shift(0, "09:00", "12:00"), shift(0, "14:00", "18:00")];
        assert_eq!(
            evaluate(&weekly, &[], at("2025-03-10", "13:00")).unwrap(),
            OperatingStatus::Closed
        );
        assert_eq!(
            evaluate(&weekly, &[], at("2025-03-10", "15:00")).unwrap(),
            OperatingStatus::Open
        );
        assert_eq!(
            evaluate(&weekly, &[], at("2025-03-10", "13:40")).unwrap(),
            OperatingStatus::OpeningSoon
        );
    }

    #[test]
    fn sunday_shifts_are_reachable() {
        let weekly = vec![shift(6, "10:00", "14:00")];
        let status = evaluate(&weekly, &[], at("2025-03-16", "11:00")).unwrap();
        assert_eq!(status, OperatingStatus::Open);
    }

    #[test]
    fn other_weekday_does_not_match() {
        let weekly = vec![shift(1, "09:00", "17:00")];
        let status = evaluate(&weekly, &[], at("2025-03-10", "12:00")).unwrap();
        assert_eq!(status, OperatingStatus::Closed);
    }

    #[test]
    fn closing_soon_wraps_midnight() {
        let weekly = vec![shift(0, "18:00", "00:10")];
        let status = evaluate(&weekly, &[], at("2025-03-10", "23:55")).unwrap();
        assert_eq!(status, OperatingStatus::ClosingSoon);
    }

    #[test]
    fn malformed_time_is_rejected() {
        let weekly = vec![shift(0, "9am", "17:00")];
        let result = evaluate(&weekly, &[], at("2025-03-10", "12:00"));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let weekly = vec![shift(0, "09:00", "17:00")];
        let now = at("2025-03-10", "16:45");
        assert_eq!(
            evaluate(&weekly, &[], now).unwrap(),
            evaluate(&weekly, &[], now).unwrap()
        );
    }

    #[test]
    fn validate_time_accepts_only_padded_24h() {
        assert!(validate_time("09:00").is_ok());
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("9:00").is_err());
        assert!(validate_time("midnight").is_err());
    }
}
