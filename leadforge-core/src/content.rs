//! Dashboard and content records.
//!
//! The backend schema evolves faster than this client, so every record keeps
//! the fields it does not know about in `extra` and serializes them back
//! unchanged.

use crate::identifier::{deserialize_id, deserialize_opt_id};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Lead magnets owned by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_lead_magnets: Option<u64>,
    /// Lead magnets currently published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_lead_magnets: Option<u64>,
    /// Downloads across all lead magnets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_downloads: Option<u64>,
    /// Leads captured across all lead magnets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leads_generated: Option<u64>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A generated or draft lead magnet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadMagnet {
    /// Backend primary key.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Title shown in listings.
    #[serde(default)]
    pub title: String,
    /// Workflow status (e.g. `draft`, `completed`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Template the lead magnet was built from.
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub template: Option<String>,
    /// Creation timestamp as sent by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A PDF template available for generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template key, e.g. `modern-guide`.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Thumbnail or preview image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Branding and contact data used when generating content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirmProfile {
    /// Firm name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firm_name: Option<String>,
    /// Public website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Industry or practice area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Primary brand colour (hex).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_brand_color: Option<String>,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FirmProfile {
    /// Set the firm name.
    #[must_use]
    pub fn firm_name(mut self, name: impl Into<String>) -> Self {
        self.firm_name = Some(name.into());
        self
    }

    /// Set the website.
    #[must_use]
    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    /// Set the industry.
    #[must_use]
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Set an arbitrary extra field.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_dashboard_keeps_unknown_fields() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "total_lead_magnets": 3,
            "recent_activity": [{"kind": "download"}],
        }))
        .unwrap();
        assert_eq!(stats.total_lead_magnets, Some(3));
        assert_eq!(stats.total_downloads, None);
        assert!(stats.extra.contains_key("recent_activity"));
    }

    #[test]
    fn test_lead_magnet_list() {
        let items: Vec<LeadMagnet> = serde_json::from_value(json!([
            {"id": 1, "title": "Tax Guide", "status": "completed", "template": 4},
            {"id": "2", "title": "Checklist"},
        ]))
        .unwrap();
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].template.as_deref(), Some("4"));
        assert_eq!(items[1].status, None);
    }

    #[test]
    fn test_firm_profile_round_trip_preserves_extra() {
        let input = json!({"firm_name": "Acme", "tagline": "We build"});
        let profile: FirmProfile = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&profile).unwrap(), input);
    }

    #[test]
    fn test_firm_profile_builder() {
        let profile = FirmProfile::default()
            .firm_name("Acme")
            .industry("Accounting")
            .extra("years_in_business", 12);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["firm_name"], "Acme");
        assert_eq!(json["years_in_business"], 12);
        assert!(json.get("website").is_none());
    }
}
