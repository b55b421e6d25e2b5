use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// The seven record collections the listings API exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
    Jobs,
    Results,
    AdmitCards,
    AnswerKeys,
    Syllabus,
    StudyNotes,
    ImportantLinks,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::Jobs,
        ContentType::Results,
        ContentType::AdmitCards,
        ContentType::AnswerKeys,
        ContentType::Syllabus,
        ContentType::StudyNotes,
        ContentType::ImportantLinks,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "jobs" | "job" => Some(Self::Jobs),
            "results" | "result" => Some(Self::Results),
            "admit-cards" | "admit-card" | "admitcards" => Some(Self::AdmitCards),
            "answer-keys" | "answer-key" | "answerkeys" => Some(Self::AnswerKeys),
            "syllabus" => Some(Self::Syllabus),
            "study-notes" | "notes" => Some(Self::StudyNotes),
            "important-links" | "links" => Some(Self::ImportantLinks),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Jobs => "/jobs",
            Self::Results => "/results",
            Self::AdmitCards => "/admit-cards",
            Self::AnswerKeys => "/answer-keys",
            Self::Syllabus => "/syllabus",
            Self::StudyNotes => "/study-materials/notes",
            Self::ImportantLinks => "/important-links",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Results => "results",
            Self::AdmitCards => "admit cards",
            Self::AnswerKeys => "answer keys",
            Self::Syllabus => "syllabus",
            Self::StudyNotes => "study notes",
            Self::ImportantLinks => "important links",
        }
    }
}

/// One listing entity as returned by the API. Records are immutable once
/// fetched; display strings (formatted dates, resolved category names) are
/// derived fresh on every render rather than stored back.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, alias = "_id", deserialize_with = "de_id")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    // jobs carry applyLink, the download-style collections carry downloadLink
    #[serde(default, alias = "downloadLink")]
    pub apply_link: Option<String>,
    #[serde(default)]
    pub exam_date: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub posted_date: Option<String>,
    #[serde(default)]
    pub last_date: Option<String>,
}

// ids arrive as strings from the document store but as numbers from older
// admin seeds; accept both
fn de_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub const CATEGORY_CODES: [&str; 7] = [
    "central", "state", "banking", "railway", "defence", "teaching", "police",
];

/// Resolves a category code to its display name. Unknown codes pass through
/// unchanged.
pub fn resolve_category(code: &str) -> &str {
    match code {
        "central" => "Central Government",
        "state" => "State Government",
        "banking" => "Banking",
        "railway" => "Railway",
        "defence" => "Defence",
        "teaching" => "Teaching",
        "police" => "Police",
        other => other,
    }
}

/// Formats an ISO-8601 date as e.g. "Mar 5, 2024" in a fixed English locale.
/// Absent or unparseable input renders "N/A"; a parse failure is logged and
/// never propagates.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "N/A".to_string();
    };
    match parse_date(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => {
            tracing::warn!(value = raw, "unparseable date, rendering N/A");
            "N/A".to_string()
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
