//! Parsing for the `--expires` argument.
//!
//! Two input shapes are accepted: a full RFC 3339 instant, or the masked
//! `MM/DD/YYYY HH:MM` form the original expiry picker used, interpreted in
//! the machine's local time zone. Instants in the past are rejected - an
//! already-expired banner would never be shown.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

const FORMAT_MASKED: &str = "%m/%d/%Y %H:%M";

pub fn parse_expiry(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let instant = if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        parsed.with_timezone(&Utc)
    } else {
        let naive = NaiveDateTime::parse_from_str(raw, FORMAT_MASKED)
            .map_err(|_| "The expiration is invalid".to_string())?;
        naive
            .and_local_timezone(Local)
            .single()
            .ok_or_else(|| "The expiration is invalid".to_string())?
            .with_timezone(&Utc)
    };

    if instant < now {
        return Err("The expiration is in the past".to_string());
    }

    Ok(instant)
}
