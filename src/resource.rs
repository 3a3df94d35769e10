//! The per-resource client trait.
//!
//! [`AdminResource`] is implemented once per backend resource (see
//! [`crate::catalog`]). Implementations are empty marker types: the
//! associated types pick the list and create models, and the constants pin
//! down the wire contract that resource's backend route expects — path
//! names, whether creation posts a JSON body or individual query
//! parameters, and which delete convention (if any) the route offers. The
//! default method bodies then cover every resource.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::ApiClient;
use crate::envelope::Ack;
use crate::errors::ApiError;
use crate::models::RecordId;

/// How a resource's create endpoint takes its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStyle {
    /// POST with the payload as a JSON body (simple entities).
    JsonBody,
    /// POST with each scalar field as a query parameter and an empty body
    /// (link tables).
    QueryParams,
}

/// Which delete convention a resource's backend route offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRoute {
    /// The route has no delete endpoint.
    None,
    /// HTTP DELETE to the given path with `?id=`.
    Delete(&'static str),
    /// HTTP POST to the given delete path with `?id=`.
    PostQuery(&'static str),
}

/// Create payloads report which mandatory fields are still empty, so the
/// shell can reject a submit before any request is issued.
pub trait RequiredFields {
    /// Names of required fields that are empty or unset, in form order.
    fn missing_required(&self) -> Vec<&'static str>;
}

/// List models that expose their record id, for optimistic local removal.
pub trait Identified {
    /// The record's id.
    fn record_id(&self) -> &RecordId;
}

/// One backend resource: its models, its paths, and its wire quirks.
#[async_trait]
pub trait AdminResource: Send + Sync {
    /// Row type returned by the list endpoint.
    type ListModel: DeserializeOwned + Send + 'static;
    /// Payload type accepted by the create endpoint.
    type CreateModel: Serialize + RequiredFields + Default + Send + Sync;

    const RESOURCE_NAME_SINGULAR: &str;
    const RESOURCE_NAME_PLURAL: &str;

    /// Path of the authenticated list endpoint, relative to the base URL.
    const LIST_PATH: &'static str;
    /// Path of the create endpoint.
    const CREATE_PATH: &'static str;
    /// Payload convention of the create endpoint.
    const CREATE_STYLE: CreateStyle = CreateStyle::JsonBody;
    /// Delete convention, if the route offers one.
    const DELETE_ROUTE: DeleteRoute = DeleteRoute::None;

    /// Fetch the full collection.
    async fn list_all(client: &ApiClient) -> Result<Vec<Self::ListModel>, ApiError> {
        client.get_list(Self::LIST_PATH).await
    }

    /// Create a record. The canonical id and any server-computed fields are
    /// only known after a reload, so this returns just the acknowledgment.
    async fn create(client: &ApiClient, model: &Self::CreateModel) -> Result<Ack, ApiError> {
        match Self::CREATE_STYLE {
            CreateStyle::JsonBody => client.post_json(Self::CREATE_PATH, model).await,
            CreateStyle::QueryParams => client.post_query(Self::CREATE_PATH, model).await,
        }
    }

    /// Delete a record by id, using whichever verb the route expects.
    async fn delete(client: &ApiClient, id: &RecordId) -> Result<Ack, ApiError> {
        match Self::DELETE_ROUTE {
            DeleteRoute::None => Err(ApiError::unsupported(
                Self::RESOURCE_NAME_SINGULAR,
                "delete",
            )),
            DeleteRoute::Delete(path) => client.delete_by_id(path, id).await,
            DeleteRoute::PostQuery(path) => client.post_delete_by_id(path, id).await,
        }
    }
}
