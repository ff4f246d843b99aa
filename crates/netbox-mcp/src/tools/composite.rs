// Convenience tools for the common device / interface / IP writes.

use serde_json::{Value, json};

use netbox_core::composite::DEFAULT_INTERFACE_TYPE;
use netbox_core::{CoreError, Gateway, IpAssignment, NewDevice, NewInterface, Status};

use super::{ToolDefinition, ToolError, decode};

pub const CREATE_NETWORK_DEVICE: &str = "create_network_device";
pub const CREATE_INTERFACE: &str = "create_interface";
pub const ASSIGN_IP_TO_INTERFACE: &str = "assign_ip_to_interface";

pub(super) async fn call(
    gateway: &Gateway,
    name: &str,
    arguments: Value,
) -> Result<Result<Value, CoreError>, ToolError> {
    let outcome = match name {
        CREATE_NETWORK_DEVICE => {
            let device: NewDevice = decode(name, arguments)?;
            gateway.create_network_device(device).await
        }
        CREATE_INTERFACE => {
            let interface: NewInterface = decode(name, arguments)?;
            gateway.create_interface(interface).await
        }
        ASSIGN_IP_TO_INTERFACE => {
            let assignment: IpAssignment = decode(name, arguments)?;
            gateway.assign_ip_to_interface(assignment).await
        }
        _ => return Err(ToolError::UnknownTool(name.to_owned())),
    };
    Ok(outcome)
}

fn status_schema(what: &str) -> Value {
    json!({
        "type": "string",
        "enum": Status::names(),
        "default": Status::default().as_str(),
        "description": format!("{what} status")
    })
}

fn id_schema(description: &str) -> Value {
    json!({ "type": "integer", "minimum": 0, "description": description })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: CREATE_NETWORK_DEVICE.to_owned(),
            description: "Create a new network device in NetBox with simplified parameters. \
                          Example: name \"R1\", device_type_id 1, site_id 1, role_id 1, \
                          serial \"FTX1234567\", description \"Core Router\"."
                .to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Device name (e.g. \"R1\", \"SW-CORE-01\")" },
                    "device_type_id": id_schema("ID of the device type"),
                    "site_id": id_schema("ID of the site where the device is located"),
                    "role_id": id_schema("ID of the device role (e.g. Router, Switch, Firewall)"),
                    "status": status_schema("Device"),
                    "serial": { "type": "string", "description": "Serial number" },
                    "description": { "type": "string", "description": "Device description" }
                },
                "required": ["name", "device_type_id", "site_id", "role_id"]
            }),
        },
        ToolDefinition {
            name: CREATE_INTERFACE.to_owned(),
            description: "Create a new interface on an existing device in NetBox.".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "device_id": id_schema("ID of the device to add the interface to"),
                    "name": { "type": "string", "description": "Interface name (e.g. \"GigabitEthernet0/0\", \"Eth1/1\")" },
                    "type": {
                        "type": "string",
                        "default": DEFAULT_INTERFACE_TYPE,
                        "description": "Interface type (e.g. \"1000base-t\", \"10gbase-x-sfpp\")"
                    },
                    "enabled": { "type": "boolean", "default": true, "description": "Whether the interface is enabled" },
                    "description": { "type": "string", "description": "Interface description" }
                },
                "required": ["device_id", "name"]
            }),
        },
        ToolDefinition {
            name: ASSIGN_IP_TO_INTERFACE.to_owned(),
            description: "Create an IP address and assign it to a device interface in NetBox."
                .to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "interface_id": id_schema("ID of the interface to assign the IP to"),
                    "ip_address": { "type": "string", "description": "IP address with prefix length (e.g. \"192.168.1.1/24\")" },
                    "status": status_schema("IP address"),
                    "dns_name": { "type": "string", "description": "DNS name for the IP address" }
                },
                "required": ["interface_id", "ip_address"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_enum_lists_every_status() {
        let schema = status_schema("Device");
        let values: Vec<&str> = schema["enum"]
            .as_array()
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        assert_eq!(values, Status::names());
        assert_eq!(schema["default"], "active");
    }

    #[test]
    fn device_requires_foreign_keys() {
        let err = decode::<NewDevice>(CREATE_NETWORK_DEVICE, json!({ "name": "R1" })).unwrap_err();
        assert!(err.to_string().contains("device_type_id"), "{err}");
    }

    #[test]
    fn interface_type_is_taken_from_type_key() {
        let iface: NewInterface = decode(
            CREATE_INTERFACE,
            json!({ "device_id": 1, "name": "Eth1/1", "type": "10gbase-x-sfpp" }),
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(iface.interface_type, "10gbase-x-sfpp");
        assert!(iface.enabled);
    }
}
