//! Decode tests and the full entity round trip through the wire shape.

use std::collections::BTreeMap;

use banner_core::banner::{Banner, Level, Priority};
use banner_core::codec::{decode_all, decode_entry, encode, BannerBatch, WebBanner};
use banner_core::error::DecodeError;
use chrono::{TimeZone, Utc};

fn batch_of(value: BTreeMap<String, WebBanner>) -> Option<BannerBatch> {
    Some(BannerBatch {
        count: value.len() as u64,
        value: Some(value),
    })
}

#[test]
fn entity_round_trip_preserves_every_field() {
    let banner = Banner {
        priority: Priority::P1,
        level: Level::Warning,
        message_id: "1692388123456".to_string(),
        message: "[go](http://x.com) **now**".to_string(),
        expiration_date: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
    };

    let decoded = decode_all(batch_of(encode(&banner))).unwrap();

    assert!(decoded.rejected.is_empty());
    assert_eq!(decoded.banners, vec![banner]);
}

#[test]
fn indefinite_banner_round_trips_as_none() {
    let banner = Banner {
        priority: Priority::P2,
        level: Level::Info,
        message_id: "7".to_string(),
        message: "plain words".to_string(),
        expiration_date: None,
    };

    let decoded = decode_all(batch_of(encode(&banner))).unwrap();
    assert_eq!(decoded.banners[0].expiration_date, None);
}

#[test]
fn decode_normalizes_level_casing() {
    let body = WebBanner {
        level: "wArNiNg".to_string(),
        message: "msg".to_string(),
        expiration_date: None,
    };
    let banner = decode_entry("p0-1", &body).unwrap();
    assert_eq!(banner.level, Level::Warning);
}

#[test]
fn decode_rejects_unknown_level() {
    let body = WebBanner {
        level: "bogus".to_string(),
        message: "msg".to_string(),
        expiration_date: None,
    };
    assert_eq!(
        decode_entry("p0-1", &body),
        Err(DecodeError::UnknownLevel("bogus".to_string()))
    );
}

#[test]
fn decode_converts_message_to_markdown() {
    let body = WebBanner {
        level: "Error".to_string(),
        message: "<strong>down</strong> until <a href='http://x.com'>then</a>".to_string(),
        expiration_date: None,
    };
    let banner = decode_entry("p2-9", &body).unwrap();
    assert_eq!(banner.message, "**down** until [then](http://x.com)");
}

#[test]
fn decode_accepts_bare_and_namespaced_keys() {
    let body = WebBanner {
        level: "Info".to_string(),
        message: String::new(),
        expiration_date: None,
    };

    let bare = decode_entry("p1-55", &body).unwrap();
    let namespaced = decode_entry("GlobalMessageBanners/p1-55", &body).unwrap();

    assert_eq!(bare.priority, Priority::P1);
    assert_eq!(bare.message_id, "55");
    assert_eq!(bare, namespaced);
}

#[test]
fn decode_parses_expiration_to_the_instant() {
    let body = WebBanner {
        level: "Info".to_string(),
        message: String::new(),
        expiration_date: Some("2030-01-01T00:00:00.000Z".to_string()),
    };
    let banner = decode_entry("p2-1", &body).unwrap();
    assert_eq!(
        banner.expiration_date,
        Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn decode_all_reports_missing_batch() {
    assert_eq!(decode_all(None), Err(DecodeError::MissingBatch));
}

#[test]
fn decode_all_keeps_good_rows_next_to_bad_ones() {
    let mut value = BTreeMap::new();
    value.insert(
        "p0-ok".to_string(),
        WebBanner {
            level: "Error".to_string(),
            message: "still here".to_string(),
            expiration_date: None,
        },
    );
    value.insert(
        "p1-expired-badly".to_string(),
        WebBanner {
            level: "Info".to_string(),
            message: String::new(),
            expiration_date: Some("tomorrow-ish".to_string()),
        },
    );
    value.insert(
        "not a key".to_string(),
        WebBanner {
            level: "Info".to_string(),
            message: String::new(),
            expiration_date: None,
        },
    );

    let decoded = decode_all(batch_of(value)).unwrap();

    assert_eq!(decoded.banners.len(), 1);
    assert_eq!(decoded.banners[0].message_id, "ok");
    assert_eq!(decoded.rejected.len(), 2);
    assert!(decoded
        .rejected
        .iter()
        .any(|(key, err)| key == "p1-expired-badly"
            && *err == DecodeError::InvalidDate("tomorrow-ish".to_string())));
    assert!(decoded
        .rejected
        .iter()
        .any(|(key, err)| key == "not a key"
            && *err == DecodeError::MalformedKey("not a key".to_string())));
}
