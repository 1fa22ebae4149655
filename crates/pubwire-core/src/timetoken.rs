//! Timetokens: the service's 64-bit clock, also used as a paging cursor.
//!
//! The service is not consistent about the JSON type of a timetoken: subscribe
//! cursors and action payloads send decimal strings, presence events send
//! integers. The serde helpers here accept both and always emit integers.

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Service clock value (17-digit, 100ns resolution).
pub type Timetoken = u64;

struct TimetokenVisitor;

impl<'de> Visitor<'de> for TimetokenVisitor {
    type Value = Timetoken;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a timetoken as an unsigned integer or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timetoken, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timetoken, E> {
        u64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timetoken, E> {
        v.parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

/// `#[serde(with = "timetoken")]`
pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timetoken, D::Error> {
    d.deserialize_any(TimetokenVisitor)
}

/// `#[serde(with = "timetoken")]`
pub fn serialize<S: Serializer>(tt: &Timetoken, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(*tt)
}

/// `#[serde(default, with = "timetoken::option")]`
pub mod option {
    use super::*;

    #[derive(Deserialize)]
    struct Lenient(#[serde(with = "crate::timetoken")] Timetoken);

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timetoken>, D::Error> {
        Ok(Option::<Lenient>::deserialize(d)?.map(|l| l.0))
    }

    pub fn serialize<S: Serializer>(tt: &Option<Timetoken>, s: S) -> Result<S::Ok, S::Error> {
        match tt {
            Some(v) => s.serialize_some(v),
            None => s.serialize_none(),
        }
    }
}

/// Timetoken plus the region that issued it (`{"t": .., "r": ..}` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimetokenRegion {
    #[serde(rename = "t", with = "crate::timetoken")]
    pub timetoken: Timetoken,
    #[serde(rename = "r", default)]
    pub region: u32,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn accepts_string_and_integer() {
        let a: TimetokenRegion = serde_json::from_str(r#"{"t":"15610547826970050","r":4}"#).unwrap();
        let b: TimetokenRegion = serde_json::from_str(r#"{"t":15610547826970050,"r":4}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.timetoken, 15610547826970050);
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<TimetokenRegion>(r#"{"t":-1}"#).is_err());
        assert!(serde_json::from_str::<TimetokenRegion>(r#"{"t":"soon"}"#).is_err());
    }
}
