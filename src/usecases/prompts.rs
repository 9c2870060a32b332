//! Prompt and schema construction for the two provider calls.

use crate::domain::{Category, Language};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::json;
use std::fmt;

/// Field names the news batch must carry, in schema order.
pub const NEWS_FIELDS: [&str; 9] = [
    "id",
    "title",
    "summary",
    "sources",
    "url",
    "timestamp",
    "category",
    "isVerified",
    "verificationDetails",
];

/// Retrieval instruction for one category.
pub fn news_prompt(category: Category, language: Language, today: &str) -> String {
    let token = category.prompt_token();
    format!(
        r#"You are the editor of a verified news desk. Today is {today}.
Use live web search to find the most recent and relevant news in the category "{token}".

## Rules
1. Report only confirmed facts. No rumours, no speculation, no opinion.
2. Double-source rule: set "isVerified" to true only when at least two independent, reputable outlets report the same facts. Otherwise set it to false. Explain the decision in "verificationDetails".
3. Keep a neutral, factual tone.
4. Write "title", "summary" and "verificationDetails" in {language}.
5. List the outlets that reported the story in "sources" (names, not URLs) and give the canonical article link in "url".
6. Set "category" to "{token}" for every item.

## Output Format
Respond with a JSON array only, 5 to 8 items, newest first. No markdown, no text outside the array.
Each item has the fields: {fields}."#,
        language = language.prompt_name(),
        fields = NEWS_FIELDS.join(", "),
    )
}

/// Response schema for the news batch (provider's OpenAPI subset).
pub fn news_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "sources": { "type": "ARRAY", "items": { "type": "STRING" } },
                "url": { "type": "STRING" },
                "timestamp": { "type": "STRING" },
                "category": { "type": "STRING" },
                "isVerified": { "type": "BOOLEAN" },
                "verificationDetails": { "type": "STRING" }
            },
            "required": NEWS_FIELDS,
        }
    })
}

/// System instruction for the analyst chat. Embeds the wall-clock time it was built at;
/// the session keeps this text for its whole lifetime.
pub fn analyst_system_instruction<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let date = now.format("%A, %d %B %Y");
    let time = now.format("%H:%M:%S");
    let iso = now
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    format!(
        r#"You are Mr. Daniel, a senior news analyst.
Current date: {date}. Current time: {time}. ISO timestamp: {iso}.

- Be professional, concise and neutral.
- Use live web search on every answer; never rely only on prior knowledge for current events.
- If a claim cannot be confirmed by reliable sources, say explicitly that it is not yet verified instead of speculating.
- Always reply in the language the user writes in."#
    )
}
