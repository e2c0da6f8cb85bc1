use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::CrmClient;
use crate::config::HubSpotConfig;
use crate::error::{CrmError, CrmResult};
use course_actions_shared::{
    AssociationBatch, AssociationBatchResponse, PropertyDefinition, PropertyUpdate, SearchRequest,
    SearchResponse,
};

/// HubSpot CRM v3 client authenticated with a private-app access token
pub struct HubSpotClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HubSpotClient {
    pub fn new(config: &HubSpotConfig) -> CrmResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> CrmResult<T> {
        let response = request.bearer_auth(&self.access_token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CrmError::from_status(status.as_u16(), resource, body));
        }

        debug!(resource, status = status.as_u16(), "HubSpot call succeeded");

        // Some writes answer 2xx with no content
        let body = if body.trim().is_empty() { "null".to_string() } else { body };

        serde_json::from_str(&body).map_err(|source| CrmError::Decode {
            context: resource.to_string(),
            source,
        })
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        resource: &str,
    ) -> CrmResult<T> {
        self.send(self.client.post(self.url(path)).json(body), resource)
            .await
    }
}

#[async_trait]
impl CrmClient for HubSpotClient {
    async fn get_property(
        &self,
        object_type: &str,
        property_name: &str,
    ) -> CrmResult<PropertyDefinition> {
        let path = format!("/crm/v3/properties/{}/{}", object_type, property_name);
        let resource = format!("Property {}/{}", object_type, property_name);
        self.send(self.client.get(self.url(&path)), &resource).await
    }

    async fn update_property(
        &self,
        object_type: &str,
        property_name: &str,
        update: &PropertyUpdate,
    ) -> CrmResult<serde_json::Value> {
        let path = format!("/crm/v3/properties/{}/{}", object_type, property_name);
        let resource = format!("Property {}/{}", object_type, property_name);
        self.send(self.client.patch(self.url(&path)).json(update), &resource)
            .await
    }

    async fn search(&self, object_type: &str, request: &SearchRequest) -> CrmResult<SearchResponse> {
        let path = format!("/crm/v3/objects/{}/search", object_type);
        let resource = format!("Object type {}", object_type);
        self.post(&path, request, &resource).await
    }

    async fn create_associations(
        &self,
        from_object_type: &str,
        to_object_type: &str,
        batch: &AssociationBatch,
    ) -> CrmResult<AssociationBatchResponse> {
        let path = format!(
            "/crm/v3/associations/{}/{}/batch/create",
            from_object_type, to_object_type
        );
        let resource = format!("Association {} -> {}", from_object_type, to_object_type);
        self.post(&path, batch, &resource).await
    }
}
