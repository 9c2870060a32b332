//! Domain entities. Pure data structures for the news desk.
//!
//! No provider/IO types here — adapters map wire formats into these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// News category. Closed set; drives which retrieval prompt is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    General,
    Politics,
    Economy,
    International,
    Security,
    Health,
    Energy,
    Crisis,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::General,
        Category::Politics,
        Category::Economy,
        Category::International,
        Category::Security,
        Category::Health,
        Category::Energy,
        Category::Crisis,
    ];

    /// Literal token interpolated into the retrieval prompt.
    pub fn prompt_token(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Politics => "Politics",
            Category::Economy => "Economy",
            Category::International => "International",
            Category::Security => "Security",
            Category::Health => "Health",
            Category::Energy => "Energy",
            Category::Crisis => "Crisis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt_token())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive match on the prompt token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.prompt_token().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown category: {}", needle))
    }
}

/// Source reference returned by the provider's search grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingCitation {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A single news summary. Created wholesale from a batch response; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Free-text provenance labels (outlet names), not necessarily URLs.
    pub sources: Vec<String>,
    pub url: String,
    pub timestamp: String,
    pub category: Category,
    pub is_verified: bool,
    pub verification_details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding: Option<Vec<GroundingCitation>>,
}

impl NewsItem {
    pub fn badge(&self) -> Badge {
        if self.is_verified {
            Badge::Verified
        } else {
            Badge::Pending
        }
    }

    pub fn citations(&self) -> &[GroundingCitation] {
        self.grounding.as_deref().unwrap_or(&[])
    }
}

/// Verification badge variant shown next to a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Verified,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(verified: bool) -> NewsItem {
        NewsItem {
            id: "1".to_string(),
            title: "Border incident".to_string(),
            summary: "Summary".to_string(),
            sources: vec!["Reuters".to_string()],
            url: "https://news.example/1".to_string(),
            timestamp: "2026-10-18T09:00:00Z".to_string(),
            category: Category::Security,
            is_verified: verified,
            verification_details: "Single outlet so far".to_string(),
            grounding: None,
        }
    }

    #[test]
    fn test_category_tokens_round_trip() {
        for c in Category::ALL {
            assert_eq!(c.prompt_token().parse::<Category>().unwrap(), c);
        }
        assert_eq!(" security ".parse::<Category>().unwrap(), Category::Security);
        assert!("Sports".parse::<Category>().is_err());
    }

    #[test]
    fn test_badge_follows_verification_flag() {
        assert_eq!(item(true).badge(), Badge::Verified);
        assert_eq!(item(false).badge(), Badge::Pending);
    }

    #[test]
    fn test_news_item_wire_names() {
        let json = serde_json::to_value(item(false)).unwrap();
        assert_eq!(json["isVerified"], false);
        assert_eq!(json["verificationDetails"], "Single outlet so far");
        assert!(json.get("grounding").is_none());
    }

    #[test]
    fn test_citations_empty_without_grounding() {
        assert!(item(true).citations().is_empty());
    }
}
