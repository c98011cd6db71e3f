//! User records and their identifiers.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Server-assigned identifier of a [`User`].
///
/// Serializes as the bare UUID string, so it works both as a record field
/// and as a JSON object key when the whole store is listed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// A fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Accepts every textual form [`Uuid::parse_str`] does: hyphenated, simple,
/// braced and `urn:uuid:`.
impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A stored user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
    pub id: UserId,
}

/// Body of create and update requests.
///
/// Decoding is forgiving about everything but types:
/// - a `null` body, missing fields and `null` fields keep their zero value;
/// - field names match without regard to ASCII case (`FirstName` works);
/// - unknown fields, `id` included, are ignored.
///
/// A field of the wrong type, or a body that is not an object, is an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserInput {
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
}

impl<'de> Deserialize<'de> for UserInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(InputVisitor)
    }
}

struct InputVisitor;

impl<'de> Visitor<'de> for InputVisitor {
    type Value = UserInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a user object")
    }

    fn visit_none<E: de::Error>(self) -> Result<UserInput, E> {
        Ok(UserInput::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<UserInput, E> {
        Ok(UserInput::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<UserInput, D::Error> {
        deserializer.deserialize_map(self)
    }

    // Keys are taken in document order, so a later spelling of a field wins.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<UserInput, A::Error> {
        let mut input = UserInput::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("firstname") {
                if let Some(v) = map.next_value::<Option<String>>()? {
                    input.firstname = v;
                }
            } else if key.eq_ignore_ascii_case("lastname") {
                if let Some(v) = map.next_value::<Option<String>>()? {
                    input.lastname = v;
                }
            } else if key.eq_ignore_ascii_case("age") {
                if let Some(v) = map.next_value::<Option<i64>>()? {
                    input.age = v;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(input)
    }
}

impl UserInput {
    /// Builds the full record under `id`.
    pub fn into_user(self, id: UserId) -> User {
        User {
            firstname: self.firstname,
            lastname: self.lastname,
            age: self.age,
            id,
        }
    }
}
