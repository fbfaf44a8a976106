//! The blocking critique client.
//!
//! With an API key configured, requests go to the Gemini
//! `generateContent` endpoint with the response schema attached. Without
//! one, the service sleeps briefly and returns the canned sample critique
//! through the same normalization path, so the rest of the app exercises
//! identical code either way.

use std::time::Duration;

use serde_json::{json, Value};

use crate::error::CritiqueError;
use crate::prompt::{build_prompt, EssayInputs, SYSTEM_INSTRUCTION};
use crate::sample::sample_response;
use crate::schema::{normalize, response_schema, AnalysisResponse};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const MOCK_DELAY: Duration = Duration::from_millis(1500);

pub struct CritiqueService {
    api_key: Option<String>,
    model: String,
    endpoint: String,
    mock_delay: Duration,
    client: reqwest::blocking::Client,
}

impl CritiqueService {
    /// Reads `GEMINI_API_KEY` from the environment. An unset or empty key
    /// puts the service in offline mode.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            log::warn!("GEMINI_API_KEY not set, critiques will use sample data");
        }
        Self::new(api_key)
    }

    pub fn new(api_key: Option<String>) -> Self {
        CritiqueService {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            mock_delay: MOCK_DELAY,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.api_key.is_none()
    }

    #[cfg(test)]
    fn without_delay() -> Self {
        let mut svc = Self::new(None);
        svc.mock_delay = Duration::ZERO;
        svc
    }

    /// Run one critique. Blocks until the model answers, so call this
    /// from a worker thread, not the UI thread.
    pub fn critique(&self, inputs: &EssayInputs) -> Result<AnalysisResponse, CritiqueError> {
        if inputs.essay_text.trim().is_empty() {
            return Err(CritiqueError::EmptyEssay);
        }

        let raw = match &self.api_key {
            None => {
                log::info!("returning sample critique (offline mode)");
                std::thread::sleep(self.mock_delay);
                serde_json::to_value(sample_response()).map_err(CritiqueError::service)?
            }
            Some(key) => self.request(key, inputs)?,
        };

        normalize(raw, inputs.ultra)
    }

    fn request(&self, key: &str, inputs: &EssayInputs) -> Result<Value, CritiqueError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, key
        );
        let body = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "parts": [{ "text": build_prompt(inputs) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            },
        });

        log::debug!("requesting critique from {}", self.model);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(CritiqueError::service)?
            .error_for_status()
            .map_err(CritiqueError::service)?;

        let envelope: Value = response.json().map_err(CritiqueError::service)?;
        let text = envelope["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| CritiqueError::service("response contained no candidate text"))?;

        serde_json::from_str(text.trim()).map_err(CritiqueError::service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_essay_rejected_before_any_work() {
        let svc = CritiqueService::without_delay();
        let inputs = EssayInputs {
            essay_text: "   \n  ".to_string(),
            ..Default::default()
        };
        assert_eq!(svc.critique(&inputs), Err(CritiqueError::EmptyEssay));
    }

    #[test]
    fn test_offline_critique_returns_sample() {
        let svc = CritiqueService::without_delay();
        let inputs = EssayInputs {
            essay_text: "A short essay.".to_string(),
            ..Default::default()
        };
        let resp = svc.critique(&inputs).unwrap();
        assert_eq!(resp, sample_response());
    }

    #[test]
    fn test_offline_ultra_gets_placeholder_extras() {
        let svc = CritiqueService::without_delay();
        let inputs = EssayInputs {
            essay_text: "A short essay.".to_string(),
            ultra: true,
            ..Default::default()
        };
        let resp = svc.critique(&inputs).unwrap();
        assert!(resp.ultra_extras.is_some());
    }

    #[test]
    fn test_from_key_presence() {
        assert!(CritiqueService::new(None).is_offline());
        assert!(!CritiqueService::new(Some("k".into())).is_offline());
    }
}
