//! Wire contract and thin client for the dream-interpretation backend.
//!
//! The interpretation service is an external collaborator sharing the same
//! application; this module only speaks its JSON contract and performs no
//! generation of its own.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::Language;

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("dream text must not be empty")]
    EmptyDream,

    #[error("interpretation failed: {0}")]
    Failed(String),

    #[error("malformed interpretation response: {0}")]
    MalformedResponse(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl InterpretError {
    /// Short, actionable message for the UI, distinct from the diagnostic
    /// detail in the `Display` impl.
    pub fn user_message(&self, language: Language) -> &'static str {
        match (self, language) {
            (InterpretError::EmptyDream, Language::En) => "Describe your dream first",
            (InterpretError::EmptyDream, Language::Fi) => "Kuvaile ensin untasi",
            (InterpretError::Failed(_), Language::En)
            | (InterpretError::MalformedResponse(_), Language::En) => {
                "Interpretation failed, try again"
            }
            (InterpretError::Failed(_), Language::Fi)
            | (InterpretError::MalformedResponse(_), Language::Fi) => {
                "Tulkinta epäonnistui, yritä uudelleen"
            }
            (InterpretError::Network(_), Language::En) => "Connection problem, try again",
            (InterpretError::Network(_), Language::Fi) => "Yhteysongelma, yritä uudelleen",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationRequest {
    pub dream: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_premium: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Peaceful,
    Joyful,
    Anxious,
    Frightening,
    Melancholic,
    Confused,
    Hopeful,
    Mysterious,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeArea {
    Relationships,
    Career,
    Health,
    PersonalGrowth,
    Creativity,
    Finances,
    Spirituality,
    Family,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInsight {
    pub symbol: String,
    pub meaning: String,
    pub relevance: Relevance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalAnalysis {
    pub primary_emotion: String,
    pub secondary_emotions: Vec<String>,
    pub subconscious: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jungian_perspective: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeConnection {
    pub area: LifeArea,
    pub insight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_suggestion: Option<String>,
}

/// Full structured interpretation returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub summary: String,
    pub mood: Mood,
    /// 1–5 items
    pub symbols: Vec<SymbolInsight>,
    pub emotional_analysis: EmotionalAnalysis,
    /// 1–3 items
    pub life_connections: Vec<LifeConnection>,
    pub key_message: String,
    /// 1–3 items
    pub reflection_questions: Vec<String>,
    /// 1–5 items
    pub tags: Vec<String>,
    /// Extended analysis, shape owned by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<serde_json::Value>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpreterStatus {
    Ready,
    MissingApiKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterHealth {
    pub status: InterpreterStatus,
    pub provider: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    code: Option<String>,
}

pub struct InterpretationClient {
    http: reqwest::Client,
    base_url: String,
}

impl InterpretationClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, InterpretError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Submit a dream for structured interpretation.
    ///
    /// Empty dreams are rejected locally; the backend would answer
    /// `400 MISSING_DREAM` anyway, so no round trip is spent on them.
    pub async fn interpret(
        &self,
        request: &InterpretationRequest,
    ) -> Result<Interpretation, InterpretError> {
        if request.dream.trim().is_empty() {
            return Err(InterpretError::EmptyDream);
        }

        let url = format!("{}/interpret", self.base_url);
        info!("requesting interpretation ({} chars)", request.dream.len());

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let parsed = serde_json::from_str::<ErrorBody>(&body).ok();
            let message = parsed
                .as_ref()
                .and_then(|b| b.error.clone())
                .unwrap_or_else(|| format!("interpretation service returned {status}"));
            if let Some(code) = parsed.and_then(|b| b.code) {
                warn!("interpretation rejected ({status}, {code}): {message}");
            } else {
                warn!("interpretation rejected ({status}): {message}");
            }
            return Err(InterpretError::Failed(message));
        }

        serde_json::from_str(&body).map_err(|e| InterpretError::MalformedResponse(e.to_string()))
    }

    /// Health check: whether the backend's upstream credential is configured
    pub async fn health(&self) -> Result<InterpreterHealth, InterpretError> {
        let url = format!("{}/interpret", self.base_url);
        let response = self.http.get(&url).send().await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| InterpretError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = InterpretationRequest {
            dream: "I was flying over water".to_string(),
            language: Some(Language::Fi),
            include_premium: Some(true),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["dream"], "I was flying over water");
        assert_eq!(json["language"], "fi");
        assert_eq!(json["includePremium"], true);
    }

    #[test]
    fn test_request_omits_unset_options() {
        let request = InterpretationRequest {
            dream: "falling".to_string(),
            language: None,
            include_premium: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("language"));
        assert!(!json.contains("includePremium"));
    }

    #[test]
    fn test_interpretation_deserializes() {
        let body = r#"{
            "summary": "A dream about release",
            "mood": "peaceful",
            "symbols": [
                {"symbol": "water", "meaning": "emotion", "relevance": "high"}
            ],
            "emotionalAnalysis": {
                "primaryEmotion": "relief",
                "secondaryEmotions": ["calm"],
                "subconscious": "letting go",
                "jungianPerspective": "anima integration"
            },
            "lifeConnections": [
                {"area": "personal_growth", "insight": "transition underway"}
            ],
            "keyMessage": "Trust the current",
            "reflectionQuestions": ["What are you releasing?"],
            "tags": ["water", "flying"],
            "confidence": "medium"
        }"#;

        let parsed: Interpretation = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.mood, Mood::Peaceful);
        assert_eq!(parsed.symbols.len(), 1);
        assert_eq!(parsed.symbols[0].relevance, Relevance::High);
        assert_eq!(parsed.life_connections[0].area, LifeArea::PersonalGrowth);
        assert!(parsed.life_connections[0].action_suggestion.is_none());
        assert!(parsed.premium.is_none());
        assert_eq!(parsed.confidence, Confidence::Medium);
    }

    #[test]
    fn test_health_status_parses() {
        let body = r#"{"status":"missing_api_key","provider":"openai","model":"gpt-4o-mini","type":"chat"}"#;
        let health: InterpreterHealth = serde_json::from_str(body).unwrap();
        assert_eq!(health.status, InterpreterStatus::MissingApiKey);
        assert_eq!(health.kind, "chat");
    }
}
