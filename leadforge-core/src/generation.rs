//! Payloads for the AI generation endpoints.

use crate::errors::{require, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default template used by the creation flow.
pub const DEFAULT_TEMPLATE_ID: &str = "modern-guide";

/// Body of `POST /api/generate-pdf/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfRequest {
    /// Template key.
    pub template_id: String,
    /// Lead magnet the PDF is generated for.
    pub lead_magnet_id: String,
    /// Let the backend write the copy instead of using answers verbatim.
    pub use_ai_content: bool,
    /// Questionnaire answers keyed by question.
    #[serde(default)]
    pub user_answers: Map<String, Value>,
}

impl PdfRequest {
    /// Create a request for the default template with AI content enabled.
    pub fn new(lead_magnet_id: impl Into<String>) -> Self {
        Self {
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            lead_magnet_id: lead_magnet_id.into(),
            use_ai_content: true,
            user_answers: Map::new(),
        }
    }

    /// Set the template.
    #[must_use]
    pub fn template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }

    /// Toggle AI-written content.
    #[must_use]
    pub fn use_ai_content(mut self, enabled: bool) -> Self {
        self.use_ai_content = enabled;
        self
    }

    /// Record an answer.
    #[must_use]
    pub fn answer(mut self, question: impl Into<String>, answer: impl Into<Value>) -> Self {
        self.user_answers.insert(question.into(), answer.into());
        self
    }

    /// The lead magnet and template must be set.
    pub fn validate(&self) -> ValidationResult {
        require("lead_magnet_id", &self.lead_magnet_id)?;
        require("template_id", &self.template_id)
    }
}

/// Body of `POST /api/generate-slogan/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SloganRequest {
    /// Questionnaire answers that describe the offer.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub user_answers: Map<String, Value>,
    /// Additional context fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SloganRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer.
    #[must_use]
    pub fn answer(mut self, question: impl Into<String>, answer: impl Into<Value>) -> Self {
        self.user_answers.insert(question.into(), answer.into());
        self
    }

    /// Set an arbitrary top-level field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Response of `POST /api/generate-slogan/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SloganResponse {
    /// The preferred slogan.
    #[serde(default)]
    pub slogan: String,
    /// Alternatives, if the backend produced any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use serde_json::json;

    #[test]
    fn test_pdf_request_defaults() {
        let req = PdfRequest::new("12").answer("audience", "small firms");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["template_id"], DEFAULT_TEMPLATE_ID);
        assert_eq!(json["lead_magnet_id"], "12");
        assert_eq!(json["use_ai_content"], true);
        assert_eq!(json["user_answers"]["audience"], "small firms");
    }

    #[test]
    fn test_pdf_request_requires_lead_magnet() {
        assert_eq!(
            PdfRequest::new("").validate(),
            Err(ValidationError::missing("lead_magnet_id"))
        );
        assert!(PdfRequest::new("1").template("classic").validate().is_ok());
    }

    #[test]
    fn test_slogan_response_tolerates_missing_alternatives() {
        let resp: SloganResponse = serde_json::from_value(json!({"slogan": "Grow faster"})).unwrap();
        assert_eq!(resp.slogan, "Grow faster");
        assert!(resp.alternatives.is_empty());
    }

    #[test]
    fn test_slogan_request_flattens_fields() {
        let req = SloganRequest::new().field("firm_name", "Acme");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, json!({"firm_name": "Acme"}));
    }
}
