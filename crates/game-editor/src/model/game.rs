//! Wire types for the remote `/games` collection.

use chrono::{DateTime, Utc};
use resource_client::RemoteResource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of platforms the collection accepts.
///
/// Serialized under exactly the strings the remote stores, so the wire shape
/// matches what the select control in a hosting UI offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "PC")]
    Pc,
    PlayStation,
    Xbox,
    #[serde(rename = "Nintendo Switch")]
    NintendoSwitch,
    Mobile,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Pc,
        Platform::PlayStation,
        Platform::Xbox,
        Platform::NintendoSwitch,
        Platform::Mobile,
    ];

    /// The wire string for this platform.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::PlayStation => "PlayStation",
            Platform::Xbox => "Xbox",
            Platform::NintendoSwitch => "Nintendo Switch",
            Platform::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform string that is not one of the known wire values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Platform must be one of: PC, PlayStation, Xbox, Nintendo Switch, Mobile")]
pub struct UnknownPlatform;

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or(UnknownPlatform)
    }
}

/// A stored game, as the remote returns it.
///
/// `genre` and `developer` are optional on the wire; an absent key and a
/// present-but-blank string are distinct states (blank means the value was
/// explicitly cleared).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub released: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
}

/// Payload for `POST /games`: a full record sans id.
///
/// Blank optionals are omitted entirely; on creation there is nothing to
/// clear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameCreate {
    pub name: String,
    pub platform: Platform,
    pub released: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
}

/// Payload for `PUT /games/{id}`: a sparse field set.
///
/// `None` fields are omitted from the serialized body, so a one-field patch
/// serializes to exactly one key and the remote merges it into the stored
/// record. `Some("")` on an optional field *is* carried: it clears the stored
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GamePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
}

impl RemoteResource for Game {
    type Create = GameCreate;
    type Patch = GamePatch;
    const COLLECTION: &'static str = "games";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn platform_round_trips_through_wire_strings() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>(), Ok(platform));
        }
        assert_eq!("SEGA Genesis".parse::<Platform>(), Err(UnknownPlatform));
    }

    #[test]
    fn single_field_patch_serializes_to_one_key() {
        let patch = GamePatch {
            genre: Some("RPG".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "genre": "RPG" })
        );
    }

    #[test]
    fn blank_optional_patch_carries_the_clearing_value() {
        let patch = GamePatch {
            developer: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "developer": "" })
        );
    }

    #[test]
    fn game_decodes_with_absent_optionals() {
        let game: Game = serde_json::from_value(json!({
            "id": "3",
            "name": "Outer Wilds",
            "platform": "PC",
            "released": "2019-05-28T00:00:00Z",
        }))
        .unwrap();
        assert_eq!(game.genre, None);
        assert_eq!(
            game.released,
            Utc.with_ymd_and_hms(2019, 5, 28, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn create_payload_omits_blank_optionals() {
        let create = GameCreate {
            name: "Hades".into(),
            platform: Platform::Pc,
            released: Utc.with_ymd_and_hms(2020, 9, 17, 0, 0, 0).unwrap(),
            genre: None,
            developer: None,
        };
        let body = serde_json::to_value(&create).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Hades",
                "platform": "PC",
                "released": "2020-09-17T00:00:00Z",
            })
        );
    }
}
