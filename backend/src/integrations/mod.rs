pub mod hubspot;

use async_trait::async_trait;

use crate::error::CrmResult;
use course_actions_shared::{
    AssociationBatch, AssociationBatchResponse, PropertyDefinition, PropertyUpdate, SearchRequest,
    SearchResponse,
};

pub use hubspot::HubSpotClient;

/// The slice of the CRM API the workflow actions depend on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CrmClient: Send + Sync {
    async fn get_property(
        &self,
        object_type: &str,
        property_name: &str,
    ) -> CrmResult<PropertyDefinition>;

    /// Overwrites the remote definition's writable attributes with `update`.
    /// The response is only logged, so it stays untyped.
    async fn update_property(
        &self,
        object_type: &str,
        property_name: &str,
        update: &PropertyUpdate,
    ) -> CrmResult<serde_json::Value>;

    async fn search(&self, object_type: &str, request: &SearchRequest) -> CrmResult<SearchResponse>;

    async fn create_associations(
        &self,
        from_object_type: &str,
        to_object_type: &str,
        batch: &AssociationBatch,
    ) -> CrmResult<AssociationBatchResponse>;
}
