//! Firm profile endpoint.

use leadforge_client::{endpoints, AuthClient, ClientError, ClientResult};
use leadforge_core::FirmProfile;
use tracing::info;

/// Read and update the firm profile used for branding generated content.
#[derive(Debug, Clone)]
pub struct FirmProfileApi {
    client: AuthClient,
}

impl FirmProfileApi {
    /// Create the API on top of `client`.
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    /// `GET /api/firm-profile/`. A user who never saved a profile gets `None`.
    pub async fn get(&self) -> ClientResult<Option<FirmProfile>> {
        match self.client.get_json(endpoints::FIRM_PROFILE).await {
            Ok(profile) => Ok(Some(profile)),
            Err(ClientError::Server { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `PUT /api/firm-profile/`, returning the stored profile.
    pub async fn update(&self, profile: &FirmProfile) -> ClientResult<FirmProfile> {
        let saved: Option<FirmProfile> = self.client.put_json(endpoints::FIRM_PROFILE, profile).await?;
        info!("Firm profile updated");
        Ok(saved.unwrap_or_else(|| profile.clone()))
    }
}
