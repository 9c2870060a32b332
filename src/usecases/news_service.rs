//! News retrieval: category -> grounded, schema-constrained batch of news items.
//!
//! - Builds the retrieval prompt and response schema
//! - Sends one generation request with web search enabled
//! - Parses the JSON array and stamps every item with the batch's grounding citations

use crate::adapters::ai::sanitize_json;
use crate::domain::{Category, DomainError, GroundingCitation, Language, LocaleBundle, NewsItem};
use crate::ports::{AiPort, ClockPort, GenerateRequest};
use crate::usecases::prompts::{news_prompt, news_schema};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// News item as the model emits it. Lenient: only `title` is mandatory.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNewsItem {
    #[serde(default)]
    id: Option<RawId>,
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    is_verified: bool,
    #[serde(default)]
    verification_details: String,
}

/// Models occasionally emit numeric ids despite the schema.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

/// Map the model's category string back onto the closed set. Unknown -> requested.
fn normalize_category(raw: Option<&str>, requested: Category) -> Category {
    raw.and_then(|s| {
        s.parse::<Category>()
            .ok()
            .or_else(|| LocaleBundle::category_from_label(s))
    })
    .unwrap_or(requested)
}

/// Parse a batch response and attach the shared citation list to every item.
///
/// Citations are per call, not per item: all items receive the same list.
pub fn parse_news_batch(
    text: &str,
    requested: Category,
    citations: &[GroundingCitation],
) -> Result<Vec<NewsItem>, DomainError> {
    let clean = sanitize_json(text);
    let raw: Vec<RawNewsItem> = serde_json::from_str(&clean).map_err(|e| {
        let preview: String = clean.chars().take(200).collect();
        warn!(error = %e, json = %preview, "news JSON parse failed");
        DomainError::Parse(format!("Failed to parse news JSON: {}", e))
    })?;

    let grounding = (!citations.is_empty()).then(|| citations.to_vec());
    let token = requested.prompt_token().to_lowercase();

    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(idx, item)| NewsItem {
            id: match item.id {
                Some(RawId::Text(s)) if !s.trim().is_empty() => s,
                Some(RawId::Number(n)) => n.to_string(),
                _ => format!("{}-{}", token, idx + 1),
            },
            title: item.title,
            summary: item.summary,
            sources: item.sources,
            url: item.url,
            timestamp: item.timestamp,
            category: normalize_category(item.category.as_deref(), requested),
            is_verified: item.is_verified,
            verification_details: item.verification_details,
            grounding: grounding.clone(),
        })
        .collect())
}

/// News retrieval orchestrator.
pub struct NewsService {
    ai: Arc<dyn AiPort>,
    clock: Arc<dyn ClockPort>,
}

impl NewsService {
    pub fn new(ai: Arc<dyn AiPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { ai, clock }
    }

    /// Fetch the current batch for `category`, written in `language`.
    ///
    /// Exactly one provider call per invocation. Errors are returned, never swallowed;
    /// the caller decides how to degrade.
    pub async fn fetch(
        &self,
        category: Category,
        language: Language,
    ) -> Result<Vec<NewsItem>, DomainError> {
        let today = self.clock.now().format("%Y-%m-%d").to_string();
        let request = GenerateRequest {
            prompt: news_prompt(category, language, &today),
            response_schema: Some(news_schema()),
            web_search: true,
        };

        info!(category = %category, language = language.code(), "requesting news batch");
        let response = self.ai.generate(&request).await?;
        let items = parse_news_batch(&response.text, category, &response.citations)?;

        info!(
            category = %category,
            items = items.len(),
            citations = response.citations.len(),
            "news batch received"
        );
        Ok(items)
    }
}
