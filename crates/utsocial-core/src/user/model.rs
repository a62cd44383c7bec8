//! User domain model.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// An authenticated member of the network.
///
/// `id` is the identity key. `username`, `bio` and `profile_picture` are the
/// fields the profile editor may change; everything else is fixed once the
/// account exists.
///
/// The JSON shape matches what the authentication service returns and what
/// the session store persists: camelCase keys, optional fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier. Numeric ids from the service are kept as text.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Kept as sent by the service, which may omit the time or the offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
}

impl User {
    /// Creates a user with only the required identity fields.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            profile_picture: None,
            bio: None,
            join_date: None,
        }
    }

    /// Sets the bio.
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Calendar day of `join_date`, if it parses as an RFC 3339 timestamp,
    /// a timestamp without offset, or a plain date.
    pub fn joined_on(&self) -> Option<NaiveDate> {
        let raw = self.join_date.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|at| at.date_naive())
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|at| at.date())
            })
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }

    /// First letter of the username, upper-cased, for avatar placeholders.
    pub fn initial(&self) -> Option<char> {
        self.username.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_user() {
        let user: User =
            serde_json::from_str(r#"{"id":"u1","username":"alice","email":"a@b.com"}"#).unwrap();
        assert_eq!(user, User::new("u1", "alice", "a@b.com"));
    }

    #[test]
    fn test_numeric_id_is_kept_as_text() {
        let user: User = serde_json::from_str(
            r#"{"id":42,"username":"bob","email":"b@c.com","hashed_password":"x"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "42");
    }

    #[test]
    fn test_optional_fields_use_camel_case_and_are_omitted_when_absent() {
        let user = User::new("u1", "alice", "a@b.com");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("bio").is_none());
        assert!(json.get("profilePicture").is_none());

        let user = user.with_bio("hello");
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""bio":"hello""#));

        let parsed: User = serde_json::from_str(
            r#"{"id":"u1","username":"alice","email":"a@b.com","profilePicture":"p.png"}"#,
        )
        .unwrap();
        assert_eq!(parsed.profile_picture.as_deref(), Some("p.png"));
    }

    #[test]
    fn test_join_date_accepts_any_service_format() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15);
        for raw in [
            "2023-01-15",
            "2023-01-15T10:20:30",
            "2023-01-15T10:20:30.123456",
            "2023-01-15T10:20:30Z",
            "2023-01-15T10:20:30+02:00",
        ] {
            let json = format!(
                r#"{{"id":"u1","username":"alice","email":"a@b.com","joinDate":"{}"}}"#,
                raw
            );
            let user: User = serde_json::from_str(&json).unwrap();
            assert_eq!(user.join_date.as_deref(), Some(raw));
            assert_eq!(user.joined_on(), expected, "{}", raw);
        }
    }

    #[test]
    fn test_unparseable_join_date_is_kept_as_text() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","username":"alice","email":"a@b.com","joinDate":"last spring"}"#,
        )
        .unwrap();
        assert_eq!(user.join_date.as_deref(), Some("last spring"));
        assert_eq!(user.joined_on(), None);
    }

    #[test]
    fn test_initial() {
        assert_eq!(User::new("u1", "alice", "a@b.com").initial(), Some('A'));
        assert_eq!(User::new("u1", "", "a@b.com").initial(), None);
    }
}
