//! Feed domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SocialError;
use crate::user::User;

/// Professional domain a post belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Career {
    #[serde(rename = "Software Development")]
    SoftwareDevelopment,
    #[serde(rename = "Business Development")]
    BusinessDevelopment,
    #[serde(rename = "Industrial Maintenance")]
    IndustrialMaintenance,
    #[serde(rename = "Gastronomy")]
    Gastronomy,
}

impl Career {
    pub const ALL: [Career; 4] = [
        Career::SoftwareDevelopment,
        Career::BusinessDevelopment,
        Career::IndustrialMaintenance,
        Career::Gastronomy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SoftwareDevelopment => "Software Development",
            Self::BusinessDevelopment => "Business Development",
            Self::IndustrialMaintenance => "Industrial Maintenance",
            Self::Gastronomy => "Gastronomy",
        }
    }
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Career {
    type Err = SocialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Career::ALL
            .into_iter()
            .find(|career| career.as_str() == s.trim())
            .ok_or_else(|| SocialError::not_found("career", s))
    }
}

/// Career filter for the feed. `All` exists only here; a post always carries
/// a concrete `Career`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CareerFilter {
    #[default]
    All,
    Only(Career),
}

impl CareerFilter {
    /// Every selectable filter, `All` first.
    pub fn options() -> Vec<CareerFilter> {
        std::iter::once(CareerFilter::All)
            .chain(Career::ALL.into_iter().map(CareerFilter::Only))
            .collect()
    }

    pub fn matches(self, career: Career) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == career,
        }
    }

    /// Career given to a post written while this filter is selected.
    pub fn career_for_new_post(self) -> Career {
        match self {
            Self::All => Career::SoftwareDevelopment,
            Self::Only(career) => career,
        }
    }
}

impl fmt::Display for CareerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(career) => career.fmt(f),
        }
    }
}

impl FromStr for CareerFilter {
    type Err = SocialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "All" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl From<Career> for CareerFilter {
    fn from(career: Career) -> Self {
        Self::Only(career)
    }
}

/// File attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_id: String,
    pub filename: String,
    pub content_type: String,
}

impl Attachment {
    pub fn new(
        file_id: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// A post in the feed.
///
/// `author` is a snapshot of the user at posting time. Later profile edits
/// do not rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    pub career: Career,
    #[serde(rename = "user")]
    pub author: User,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub reaction_count: u32,
}

impl Post {
    /// A fresh post with no attachments and zero counters.
    pub fn new(content: impl Into<String>, career: Career, author: User) -> Self {
        Self {
            id: format!("post-{}", Uuid::new_v4()),
            content: content.into(),
            career,
            author,
            attachments: Vec::new(),
            created_at: Utc::now(),
            comment_count: 0,
            reaction_count: 0,
        }
    }
}

/// A comment on a post. The owning post is implied by where it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    #[serde(rename = "user")]
    pub author: User,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(content: impl Into<String>, author: User) -> Self {
        Self {
            id: format!("comment-{}", Uuid::new_v4()),
            content: content.into(),
            author,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_career_parse_and_display() {
        for career in Career::ALL {
            assert_eq!(career.to_string().parse::<Career>().unwrap(), career);
        }
        assert!("All".parse::<Career>().is_err());
        assert!("Cooking".parse::<Career>().is_err());
    }

    #[test]
    fn test_career_serializes_as_display_name() {
        let json = serde_json::to_string(&Career::IndustrialMaintenance).unwrap();
        assert_eq!(json, r#""Industrial Maintenance""#);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("All".parse::<CareerFilter>().unwrap(), CareerFilter::All);
        assert_eq!(
            "Gastronomy".parse::<CareerFilter>().unwrap(),
            CareerFilter::Only(Career::Gastronomy)
        );
        assert!("Everything".parse::<CareerFilter>().is_err());
    }

    #[test]
    fn test_filter_options_start_with_all() {
        let options = CareerFilter::options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], CareerFilter::All);
        assert_eq!(options[0].to_string(), "All");
    }

    #[test]
    fn test_career_for_new_post() {
        assert_eq!(
            CareerFilter::All.career_for_new_post(),
            Career::SoftwareDevelopment
        );
        assert_eq!(
            CareerFilter::Only(Career::Gastronomy).career_for_new_post(),
            Career::Gastronomy
        );
    }

    #[test]
    fn test_post_json_shape() {
        let post = Post::new("hello", Career::Gastronomy, User::new("u1", "alice", "a@b.com"));
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["user"]["username"], "alice");
        assert_eq!(json["commentCount"], 0);
        assert_eq!(json["career"], "Gastronomy");
        assert!(post.id.starts_with("post-"));
    }

    #[test]
    fn test_new_ids_are_unique() {
        let author = User::new("u1", "alice", "a@b.com");
        let a = Comment::new("one", author.clone());
        let b = Comment::new("two", author);
        assert_ne!(a.id, b.id);
    }
}
