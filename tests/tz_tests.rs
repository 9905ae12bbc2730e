use timebook::core::tz::{DEFAULT_ZONE, lookup_zone_alias, resolve_workbook_timezone};

#[test]
fn fixed_zone_is_resolved() {
    assert_eq!(
        resolve_workbook_timezone("Europe/London"),
        chrono_tz::Europe::London
    );
    assert_eq!(
        resolve_workbook_timezone(" America/New_York "),
        chrono_tz::America::New_York
    );
}

#[test]
fn unknown_zone_falls_back_to_default() {
    assert_eq!(resolve_workbook_timezone("Mars/Olympus_Mons"), DEFAULT_ZONE);
}

#[test]
fn windows_display_names_map_to_iana() {
    assert_eq!(
        lookup_zone_alias("Central European Standard Time"),
        Some("Europe/Prague")
    );
    assert_eq!(lookup_zone_alias("GMT Standard Time"), Some("Europe/London"));
    assert_eq!(lookup_zone_alias("Klingon Standard Time"), None);
}

#[test]
fn system_sentinel_resolves_to_some_zone() {
    // Whatever the host reports, resolution must not panic and must yield
    // a usable zone (possibly the fallback).
    let _ = resolve_workbook_timezone("system");
    let _ = resolve_workbook_timezone("SYSTEM");
}
