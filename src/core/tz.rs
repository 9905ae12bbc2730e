//! Workbook timezone resolution.
//!
//! Storage is always UTC; this zone only decides how date/time strings in
//! the workbook are rendered and parsed. Pure function of configuration +
//! host environment, no side effects beyond a console warning on fallback.

use crate::ui::messages::warning;
use chrono_tz::Tz;

/// Used when neither the configured zone nor the host zone can be resolved.
pub const DEFAULT_ZONE: Tz = chrono_tz::Europe::Prague;

/// Host zone names that are not canonical IANA identifiers, as reported by
/// some Windows hosts. Only the handful seen in the field; anything else
/// falls through to DEFAULT_ZONE.
const WINDOWS_ZONE_ALIASES: &[(&str, &str)] = &[
    ("Central European Standard Time", "Europe/Prague"),
    ("Central European Time", "Europe/Prague"),
    ("Central Europe Standard Time", "Europe/Prague"),
    ("W. Europe Standard Time", "Europe/Berlin"),
    ("GMT Standard Time", "Europe/London"),
    ("Eastern Standard Time", "America/New_York"),
];

/// Resolve the configured `excel_timezone` value: an IANA zone name, or the
/// sentinel `"system"` for the host machine's local zone.
pub fn resolve_workbook_timezone(configured: &str) -> Tz {
    if configured.trim().eq_ignore_ascii_case("system") {
        return system_timezone();
    }

    match configured.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            warning(format!(
                "Unknown timezone '{}', falling back to {}",
                configured, DEFAULT_ZONE
            ));
            DEFAULT_ZONE
        }
    }
}

/// Look a non-IANA host zone name up in the alias table.
pub fn lookup_zone_alias(name: &str) -> Option<&'static str> {
    WINDOWS_ZONE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, iana)| *iana)
}

fn system_timezone() -> Tz {
    let name = match iana_time_zone::get_timezone() {
        Ok(name) => name,
        Err(e) => {
            warning(format!(
                "Could not determine system timezone ({}), falling back to {}",
                e, DEFAULT_ZONE
            ));
            return DEFAULT_ZONE;
        }
    };

    if let Ok(tz) = name.parse::<Tz>() {
        return tz;
    }

    if let Some(iana) = lookup_zone_alias(&name)
        && let Ok(tz) = iana.parse::<Tz>()
    {
        return tz;
    }

    warning(format!(
        "System timezone '{}' is not a known zone, falling back to {}",
        name, DEFAULT_ZONE
    ));
    DEFAULT_ZONE
}
