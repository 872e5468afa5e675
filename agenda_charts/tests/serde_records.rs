// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading loosely typed records and options from JSON.

#![cfg(feature = "serde")]

use agenda_charts::{
    ChartOptions, MemberRecord, PartyId, PartyRecord, normalize_members, normalize_parties,
};

#[test]
fn party_numbers_may_be_strings_or_missing() {
    let records: Vec<PartyRecord> = serde_json::from_str(
        r#"[
            {"score": "-12.5", "volume": 40, "size": "7", "name": "Left", "id": 3},
            {"score": 20, "volume": null, "name": "Right"},
            {"score": "n/a", "size": 9}
        ]"#,
    )
    .unwrap();

    assert_eq!(records[0].score, Some(-12.5));
    assert_eq!(records[0].id, Some(PartyId(3)));
    assert_eq!(records[1].volume, None);
    assert_eq!(records[2].score, None, "unparseable strings are missing");

    let parties = normalize_parties(&records);
    let names: Vec<_> = parties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["", "Left", "Right"]);
    assert_eq!(parties[1].score, -12);
    assert_eq!(parties[2].size, 0);
}

#[test]
fn member_party_fields_accept_camel_case() {
    let records: Vec<MemberRecord> = serde_json::from_str(
        r#"[
            {"score": 5, "volume": "2", "name": "b", "partyId": 1, "partyName": "P", "rank": "1"},
            {"score": -5, "volume": 3, "name": "a", "party_id": 2, "id": 11}
        ]"#,
    )
    .unwrap();

    let members = normalize_members(&records);
    assert_eq!(members[0].name, "a");
    assert_eq!(members[0].party_id, Some(PartyId(2)));
    assert_eq!(members[0].id, Some(11));
    assert_eq!(members[1].party, "P");
    assert_eq!(members[1].party_id, Some(PartyId(1)));
    assert_eq!(members[1].volume, 2.0);
    assert_eq!(members[1].rank, 1.0);
}

#[test]
fn options_fill_in_defaults() {
    let options: ChartOptions = serde_json::from_str(
        r#"{
            "width": 800,
            "padding": {"x": 10},
            "domains": {"min": -50, "max": 50},
            "ranges": {"r_max": 20},
            "no_axes": true
        }"#,
    )
    .unwrap();

    assert_eq!(options.width, 800.0);
    assert_eq!(options.height, 200.0);
    assert_eq!(options.padding.x, 10.0);
    assert_eq!(options.padding.y, 30.0);
    assert_eq!(options.domains.min, Some(-50.0));
    assert_eq!(options.domains.med, None);
    assert_eq!(options.ranges.r_max, Some(20.0));
    assert!(options.no_axes);
    assert_eq!(options.bar_padding, 1.0);
}
