// ── Dispatch layer ──
//
// One method per exposed operation. Every method validates its inputs
// (kind lookup, status check) before touching the network, performs at
// most one round trip, and returns NetBox's decoded answer unmodified.

use netbox_api::NetboxClient;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::composite::{IpAssignment, NewDevice, NewInterface};
use crate::config::GatewayConfig;
use crate::error::CoreError;
use crate::model::{FilterSet, ObjectId, ObjectPayload, query_pairs};
use crate::registry::ObjectType;

/// Fixed path of NetBox's change log. Not part of the kind vocabulary.
pub const CHANGE_LOG_PATH: &str = "core/object-changes";

/// Typed pass-through from tool calls to the NetBox REST API.
///
/// Holds no state besides the HTTP client; clone it freely and call it
/// from as many tasks as needed.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: NetboxClient,
}

impl Gateway {
    /// Build the HTTP client described by `config`.
    pub fn connect(config: &GatewayConfig) -> Result<Self, CoreError> {
        let client =
            NetboxClient::from_token(config.url.as_str(), &config.token, &config.transport())?;
        info!(url = %client.base_url(), "NetBox gateway ready");
        Ok(Self { client })
    }

    // ── Primitive operations ─────────────────────────────────────────

    /// List objects of a kind, filtered by `filters`. Returns the page
    /// envelope (`count`, `next`, `previous`, `results`) as NetBox sent it.
    pub async fn list_objects(
        &self,
        object_type: &str,
        filters: &FilterSet,
    ) -> Result<Value, CoreError> {
        let kind = ObjectType::resolve(object_type)?;
        debug!(%kind, filters = filters.len(), "listing objects");

        let params = query_pairs(filters);
        dispatch(self.client.get(kind.collection_path(), &params)).await
    }

    pub async fn get_object(&self, object_type: &str, id: ObjectId) -> Result<Value, CoreError> {
        let kind = ObjectType::resolve(object_type)?;
        debug!(%kind, %id, "fetching object");

        dispatch(self.client.get(&kind.object_path(id), &[])).await
    }

    pub async fn create_object(
        &self,
        object_type: &str,
        payload: &ObjectPayload,
    ) -> Result<Value, CoreError> {
        let kind = ObjectType::resolve(object_type)?;
        self.create(kind, payload).await
    }

    /// Partial update: only the keys present in `payload` change.
    pub async fn update_object(
        &self,
        object_type: &str,
        id: ObjectId,
        payload: &ObjectPayload,
    ) -> Result<Value, CoreError> {
        let kind = ObjectType::resolve(object_type)?;
        debug!(%kind, %id, fields = payload.len(), "updating object");

        dispatch(self.client.patch(&kind.object_path(id), payload)).await
    }

    /// Create many objects with a single POST of a JSON array.
    ///
    /// Whether NetBox applies the batch atomically is up to NetBox; any
    /// failure comes back as one `RemoteRequestFailed`.
    pub async fn bulk_create_objects(
        &self,
        object_type: &str,
        payloads: &[ObjectPayload],
    ) -> Result<Vec<Value>, CoreError> {
        let kind = ObjectType::resolve(object_type)?;
        debug!(%kind, count = payloads.len(), "bulk creating objects");

        dispatch(self.client.post(kind.collection_path(), payloads)).await
    }

    /// Query the change log (`core/object-changes`).
    pub async fn query_change_log(&self, filters: &FilterSet) -> Result<Value, CoreError> {
        debug!(filters = filters.len(), "querying change log");

        let params = query_pairs(filters);
        dispatch(self.client.get(CHANGE_LOG_PATH, &params)).await
    }

    // ── Composite operations ─────────────────────────────────────────

    pub async fn create_network_device(&self, device: NewDevice) -> Result<Value, CoreError> {
        let payload = device.into_payload()?;
        self.create(NewDevice::object_type(), &payload).await
    }

    pub async fn create_interface(&self, interface: NewInterface) -> Result<Value, CoreError> {
        let payload = interface.into_payload();
        self.create(NewInterface::object_type(), &payload).await
    }

    pub async fn assign_ip_to_interface(
        &self,
        assignment: IpAssignment,
    ) -> Result<Value, CoreError> {
        let payload = assignment.into_payload()?;
        self.create(IpAssignment::object_type(), &payload).await
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn create(&self, kind: ObjectType, payload: &ObjectPayload) -> Result<Value, CoreError> {
        debug!(%kind, fields = payload.len(), "creating object");
        dispatch(self.client.post(kind.collection_path(), payload)).await
    }
}

/// Await one request and translate its failure into the core taxonomy.
async fn dispatch<T>(
    request: impl Future<Output = Result<T, netbox_api::Error>>,
) -> Result<T, CoreError> {
    request.await.map_err(|err| {
        let err = CoreError::from(err);
        warn!(error = %err, "NetBox request failed");
        err
    })
}
