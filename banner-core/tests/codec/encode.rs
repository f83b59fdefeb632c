//! Encoding tests: key derivation, wire casing and the indefinite-banner
//! contract (absent expirationDate, never null).

use banner_core::banner::{Banner, Level, Priority};
use banner_core::codec::encode;
use chrono::{TimeZone, Utc};

fn fixed_banner() -> Banner {
    Banner {
        priority: Priority::P1,
        level: Level::Warning,
        message_id: "1692388123456".to_string(),
        message: "[go](http://x.com) **now**".to_string(),
        expiration_date: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
    }
}

#[test]
fn encoded_entry_shape() {
    let entry = encode(&fixed_banner());
    insta::assert_snapshot!(serde_json::to_string_pretty(&entry).unwrap(), @r#"
    {
      "GlobalMessageBanners/p1-1692388123456": {
        "level": "Warning",
        "message": "<a href='http://x.com'>go</a> <strong>now</strong>",
        "expirationDate": "2030-01-01T00:00:00.000Z"
      }
    }
    "#);
}

#[test]
fn key_derivation_uses_priority_and_message_id() {
    let banner = Banner {
        priority: Priority::P0,
        message_id: "42".to_string(),
        ..Banner::new()
    };
    let entry = encode(&banner);
    assert!(entry.contains_key("GlobalMessageBanners/p0-42"));
    assert_eq!(entry.len(), 1);
}

#[test]
fn changing_priority_changes_the_key() {
    let mut banner = fixed_banner();
    let before = banner.storage_key();
    banner.priority = Priority::P0;
    let entry = encode(&banner);
    assert!(!entry.contains_key(&before));
    assert!(entry.contains_key("GlobalMessageBanners/p0-1692388123456"));
}

#[test]
fn indefinite_banner_omits_expiration_entirely() {
    let mut banner = fixed_banner();
    banner.expiration_date = None;

    let entry = encode(&banner);
    let json = serde_json::to_value(&entry).unwrap();
    let body = &json["GlobalMessageBanners/p1-1692388123456"];

    assert!(body.get("expirationDate").is_none());
    assert_eq!(body["level"], "Warning");
}

#[test]
fn level_casing_is_canonical_on_the_wire() {
    for (level, expected) in [
        (Level::Info, "Info"),
        (Level::Warning, "Warning"),
        (Level::Error, "Error"),
    ] {
        let mut banner = fixed_banner();
        banner.level = level;
        let entry = encode(&banner);
        let body = entry.values().next().unwrap();
        assert_eq!(body.level, expected);
    }
}

#[test]
fn encode_does_not_mutate_the_record() {
    let banner = fixed_banner();
    let copy = banner.clone();
    let _ = encode(&banner);
    assert_eq!(banner, copy);
}
