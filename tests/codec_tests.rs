use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use timebook::core::codec;

fn prague() -> Tz {
    "Europe/Prague".parse().expect("known zone")
}

#[test]
fn round_trip_prague_winter() {
    let tz = prague();
    let ts = codec::parse("2024-01-15", "08:30:45", tz).expect("parse");
    assert_eq!(
        codec::format(&ts, tz),
        ("2024-01-15".to_string(), "08:30:45".to_string())
    );
}

#[test]
fn round_trip_prague_summer() {
    let tz = prague();
    let ts = codec::parse("2024-07-15", "23:59:59", tz).expect("parse");
    assert_eq!(
        codec::format(&ts, tz),
        ("2024-07-15".to_string(), "23:59:59".to_string())
    );
}

#[test]
fn round_trip_utc() {
    let tz = chrono_tz::UTC;
    let ts = codec::parse("2024-03-01", "00:00:00", tz).expect("parse");
    assert_eq!(
        codec::format(&ts, tz),
        ("2024-03-01".to_string(), "00:00:00".to_string())
    );
}

#[test]
fn prague_winter_is_utc_plus_one() {
    let ts = codec::parse("2024-01-15", "08:00:00", prague()).expect("parse");
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 7, 0, 0).unwrap());
}

#[test]
fn prague_summer_is_utc_plus_two() {
    let ts = codec::parse("2024-07-15", "08:00:00", prague()).expect("parse");
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 7, 15, 6, 0, 0).unwrap());
}

#[test]
fn short_time_form_is_accepted() {
    let tz = chrono_tz::UTC;
    let short = codec::parse("2024-01-01", "08:30", tz).expect("parse short");
    let long = codec::parse("2024-01-01", "08:30:00", tz).expect("parse long");
    assert_eq!(short, long);
}

#[test]
fn date_cell_with_time_suffix_uses_date_token() {
    // Excel sometimes types a date cell as a full datetime serial.
    let tz = chrono_tz::UTC;
    let ts = codec::parse("2024-01-01 00:00:00", "08:30:00", tz).expect("parse");
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap());
}

#[test]
fn malformed_date_is_an_error() {
    let tz = chrono_tz::UTC;
    assert!(codec::parse("2024-13-99", "08:00:00", tz).is_err());
    assert!(codec::parse("yesterday", "08:00:00", tz).is_err());
}

#[test]
fn malformed_time_is_an_error() {
    let tz = chrono_tz::UTC;
    assert!(codec::parse("2024-01-01", "8 o'clock", tz).is_err());
    assert!(codec::parse("2024-01-01", "25:00:00", tz).is_err());
}
