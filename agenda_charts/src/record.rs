// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input records and the dataset normalizer.
//!
//! Input records are loosely typed: every field may be missing, and numbers may arrive as
//! strings. Normalization turns them into fixed-shape [`Party`] / [`Member`] rows in the order
//! the charts paint them.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Identifier of a party, shared by a party record and the members that belong to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(transparent))]
pub struct PartyId(pub i64);

impl From<i64> for PartyId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// A party as supplied by the data source.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct PartyRecord {
    /// Left–right score.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "loose_f64"))]
    pub score: Option<f64>,
    /// Activity volume.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "loose_f64"))]
    pub volume: Option<f64>,
    /// Party size (seats).
    #[cfg_attr(feature = "serde", serde(deserialize_with = "loose_f64"))]
    pub size: Option<f64>,
    /// Display name.
    pub name: Option<String>,
    /// Party id.
    pub id: Option<PartyId>,
}

impl PartyRecord {
    /// Convenience constructor with every field present.
    pub fn new(score: f64, volume: f64, size: f64, name: impl Into<String>, id: i64) -> Self {
        Self {
            score: Some(score),
            volume: Some(volume),
            size: Some(size),
            name: Some(name.into()),
            id: Some(PartyId(id)),
        }
    }
}

/// A member as supplied by the data source.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct MemberRecord {
    /// Left–right score.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "loose_f64"))]
    pub score: Option<f64>,
    /// Activity volume.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "loose_f64"))]
    pub volume: Option<f64>,
    /// Rank within the party.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "loose_f64"))]
    pub rank: Option<f64>,
    /// Display name.
    pub name: Option<String>,
    /// Party display name.
    #[cfg_attr(feature = "serde", serde(alias = "partyName"))]
    pub party: Option<String>,
    /// Id of the member's party.
    #[cfg_attr(feature = "serde", serde(alias = "partyId"))]
    pub party_id: Option<PartyId>,
    /// Member id.
    pub id: Option<i64>,
}

impl MemberRecord {
    /// Convenience constructor for the fields the charts draw from.
    pub fn new(score: f64, volume: f64, name: impl Into<String>, party_id: i64) -> Self {
        Self {
            score: Some(score),
            volume: Some(volume),
            name: Some(name.into()),
            party_id: Some(PartyId(party_id)),
            ..Self::default()
        }
    }

    /// Sets the rank.
    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Sets the party display name.
    pub fn with_party(mut self, party: impl Into<String>) -> Self {
        self.party = Some(party.into());
        self
    }

    /// Sets the member id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// A normalized party row. Numeric fields are whole numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    /// Left–right score, truncated toward zero.
    pub score: i64,
    /// Activity volume, truncated toward zero.
    pub volume: i64,
    /// Party size, truncated toward zero.
    pub size: i64,
    /// Display name (empty if missing).
    pub name: String,
    /// Party id.
    pub id: Option<PartyId>,
}

impl From<&PartyRecord> for Party {
    fn from(r: &PartyRecord) -> Self {
        Self {
            score: truncate(r.score),
            volume: truncate(r.volume),
            size: truncate(r.size),
            name: r.name.clone().unwrap_or_default(),
            id: r.id,
        }
    }
}

/// A normalized member row. Missing numbers are `NaN`.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    /// Left–right score.
    pub score: f64,
    /// Activity volume.
    pub volume: f64,
    /// Rank within the party.
    pub rank: f64,
    /// Display name (empty if missing).
    pub name: String,
    /// Party display name (empty if missing).
    pub party: String,
    /// Id of the member's party.
    pub party_id: Option<PartyId>,
    /// Member id.
    pub id: Option<i64>,
}

impl From<&MemberRecord> for Member {
    fn from(r: &MemberRecord) -> Self {
        Self {
            score: r.score.unwrap_or(f64::NAN),
            volume: r.volume.unwrap_or(f64::NAN),
            rank: r.rank.unwrap_or(f64::NAN),
            name: r.name.clone().unwrap_or_default(),
            party: r.party.clone().unwrap_or_default(),
            party_id: r.party_id,
            id: r.id,
        }
    }
}

/// Normalizes parties: numbers truncated, largest party first.
///
/// Parties of equal size keep their input order.
pub fn normalize_parties(records: &[PartyRecord]) -> Vec<Party> {
    let mut out: Vec<Party> = records.iter().map(Party::from).collect();
    out.sort_by(|a, b| b.size.cmp(&a.size));
    out
}

/// Normalizes members: numbers kept as floats, lowest score first.
///
/// Members without a score sort after every scored member; ties keep their input order.
pub fn normalize_members(records: &[MemberRecord]) -> Vec<Member> {
    let mut out: Vec<Member> = records.iter().map(Member::from).collect();
    out.sort_by(|a, b| score_order(a.score, b.score));
    out
}

fn score_order(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the normalization; NaN becomes 0 and overflow saturates"
)]
fn truncate(v: Option<f64>) -> i64 {
    v.map_or(0, |v| v as i64)
}

/// Deserializes a number, a numeric string, or `null`.
///
/// Strings that do not parse as a number become `None`.
#[cfg(feature = "serde")]
fn loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(v)) => Some(v),
        Some(Loose::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn parties_sort_largest_first() {
        let parties = normalize_parties(&[
            PartyRecord::new(50.0, 10.0, 5.0, "A", 1),
            PartyRecord::new(-20.0, 20.0, 8.0, "B", 2),
        ]);
        let names: Vec<_> = parties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn party_numbers_truncate_toward_zero() {
        let parties = normalize_parties(&[PartyRecord::new(-12.9, 7.99, 3.5, "C", 3)]);
        assert_eq!(parties[0].score, -12);
        assert_eq!(parties[0].volume, 7);
        assert_eq!(parties[0].size, 3);
    }

    #[test]
    fn missing_party_fields_default() {
        let parties = normalize_parties(&[PartyRecord::default()]);
        assert_eq!(
            parties[0],
            Party {
                score: 0,
                volume: 0,
                size: 0,
                name: String::new(),
                id: None,
            }
        );
    }

    #[test]
    fn equal_sizes_keep_input_order() {
        let parties = normalize_parties(&[
            PartyRecord::new(0.0, 0.0, 4.0, "first", 1),
            PartyRecord::new(0.0, 0.0, 9.0, "big", 2),
            PartyRecord::new(0.0, 0.0, 4.0, "second", 3),
        ]);
        let names: Vec<_> = parties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["big", "first", "second"]);
    }

    #[test]
    fn members_sort_by_score_with_unscored_last() {
        let members = normalize_members(&[
            MemberRecord {
                name: Some("unscored".into()),
                ..MemberRecord::default()
            },
            MemberRecord::new(30.0, 1.0, "right", 1),
            MemberRecord::new(-30.0, 1.0, "left", 2),
            MemberRecord::new(30.0, 2.0, "right too", 1),
        ]);
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["left", "right", "right too", "unscored"]);
        assert!(members[3].volume.is_nan(), "missing numbers stay NaN");
    }

    #[test]
    fn member_scores_keep_fractions() {
        let members = normalize_members(&[MemberRecord::new(12.75, 3.5, "m", 1)]);
        assert_eq!(members[0].score, 12.75);
        assert_eq!(members[0].volume, 3.5);
    }
}
