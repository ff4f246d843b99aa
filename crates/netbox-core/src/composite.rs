// ── Composite request builders ──
//
// Friendlier inputs for the three most common writes. Each one only shapes
// an `ObjectPayload` (plus a status check where a status is accepted); the
// gateway then hands it to a single `create_object` call. Optional text
// fields that are empty are left out of the payload entirely, because
// NetBox treats "absent" and "empty" differently.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::CoreError;
use crate::model::ObjectPayload;
use crate::registry::ObjectType;
use crate::status::Status;

/// `assigned_object_type` for IP addresses bound to a device interface.
pub const INTERFACE_CONTENT_TYPE: &str = "dcim.interface";

/// Default interface type when the caller doesn't name one.
pub const DEFAULT_INTERFACE_TYPE: &str = "1000base-t";

fn default_status() -> String {
    Status::default().as_str().to_owned()
}

fn default_interface_type() -> String {
    DEFAULT_INTERFACE_TYPE.to_owned()
}

fn default_enabled() -> bool {
    true
}

fn insert_if_present(payload: &mut ObjectPayload, key: &str, value: String) {
    if !value.is_empty() {
        payload.insert(key.to_owned(), Value::String(value));
    }
}

/// A device to create, by foreign-key ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDevice {
    pub name: String,
    pub device_type_id: u64,
    pub site_id: u64,
    pub role_id: u64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub description: String,
}

impl NewDevice {
    /// Required fields only; status `active`, no serial or description.
    pub fn new(name: impl Into<String>, device_type_id: u64, site_id: u64, role_id: u64) -> Self {
        Self {
            name: name.into(),
            device_type_id,
            site_id,
            role_id,
            status: default_status(),
            serial: String::new(),
            description: String::new(),
        }
    }

    pub const fn object_type() -> ObjectType {
        ObjectType::Devices
    }

    pub fn into_payload(self) -> Result<ObjectPayload, CoreError> {
        let status = Status::parse(&self.status)?;

        let mut payload = ObjectPayload::new();
        payload.insert("name".into(), Value::String(self.name));
        payload.insert("device_type".into(), json!(self.device_type_id));
        payload.insert("site".into(), json!(self.site_id));
        payload.insert("role".into(), json!(self.role_id));
        payload.insert("status".into(), json!(status));
        insert_if_present(&mut payload, "serial", self.serial);
        insert_if_present(&mut payload, "description", self.description);
        Ok(payload)
    }
}

/// An interface to add to an existing device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewInterface {
    pub device_id: u64,
    pub name: String,
    #[serde(rename = "type", default = "default_interface_type")]
    pub interface_type: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub description: String,
}

impl NewInterface {
    pub fn new(device_id: u64, name: impl Into<String>) -> Self {
        Self {
            device_id,
            name: name.into(),
            interface_type: default_interface_type(),
            enabled: true,
            description: String::new(),
        }
    }

    pub const fn object_type() -> ObjectType {
        ObjectType::Interfaces
    }

    pub fn into_payload(self) -> ObjectPayload {
        let mut payload = ObjectPayload::new();
        payload.insert("device".into(), json!(self.device_id));
        payload.insert("name".into(), Value::String(self.name));
        payload.insert("type".into(), Value::String(self.interface_type));
        payload.insert("enabled".into(), Value::Bool(self.enabled));
        insert_if_present(&mut payload, "description", self.description);
        payload
    }
}

/// An IP address (with prefix length) to create and bind to an interface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IpAssignment {
    pub interface_id: u64,
    pub ip_address: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub dns_name: String,
}

impl IpAssignment {
    pub fn new(interface_id: u64, ip_address: impl Into<String>) -> Self {
        Self {
            interface_id,
            ip_address: ip_address.into(),
            status: default_status(),
            dns_name: String::new(),
        }
    }

    pub const fn object_type() -> ObjectType {
        ObjectType::IpAddresses
    }

    pub fn into_payload(self) -> Result<ObjectPayload, CoreError> {
        let status = Status::parse(&self.status)?;

        let mut payload = ObjectPayload::new();
        payload.insert("address".into(), Value::String(self.ip_address));
        payload.insert("status".into(), json!(status));
        payload.insert(
            "assigned_object_type".into(),
            Value::String(INTERFACE_CONTENT_TYPE.to_owned()),
        );
        payload.insert("assigned_object_id".into(), json!(self.interface_id));
        insert_if_present(&mut payload, "dns_name", self.dns_name);
        Ok(payload)
    }
}
