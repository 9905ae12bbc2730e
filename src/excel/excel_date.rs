// src/excel/excel_date.rs

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Try to interpret a cell string as a date, a time, or a full datetime,
/// returning the Excel serial value plus its number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let dt_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            let serial = naive_datetime_to_excel_serial(&dt);
            return Some(("yyyy-mm-dd hh:mm:ss", serial));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        let serial = naive_datetime_to_excel_serial(&dt);
        return Some(("yyyy-mm-dd", serial));
    }

    let time_formats = ["%H:%M:%S", "%H:%M"];

    for fmt in time_formats.iter() {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            let seconds = t.num_seconds_from_midnight() as f64;
            return Some(("hh:mm:ss", seconds / 86400.0));
        }
    }

    None
}

/// Inverse direction, used when reading cells that Excel stores as
/// date/time serials: render the serial back into the same strings
/// `parse_to_excel_date` accepts.
///
/// Serials below 1.0 carry no date part and come back as `HH:MM:SS`;
/// whole-day serials come back as `YYYY-MM-DD`; anything else as
/// `YYYY-MM-DD HH:MM:SS`. Sub-second precision is rounded away.
pub(crate) fn excel_serial_to_string(serial: f64) -> String {
    let mut days = serial.floor() as i64;
    let mut secs = ((serial - days as f64) * 86400.0).round() as i64;
    if secs >= 86400 {
        days += 1;
        secs = 0;
    }

    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if days == 0 {
        return format!("{:02}:{:02}:{:02}", h, m, s);
    }

    let date = excel_epoch().date() + Duration::days(days);
    if secs == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        format!("{} {:02}:{:02}:{:02}", date.format("%Y-%m-%d"), h, m, s)
    }
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let duration = *dt - excel_epoch();

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}

fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
