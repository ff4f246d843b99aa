// Generic object tools: one per primitive gateway operation.

use serde::Deserialize;
use serde_json::{Value, json};

use netbox_core::{CoreError, FilterSet, Gateway, ObjectId, ObjectPayload, ObjectType};

use super::{ToolDefinition, ToolError, decode};

pub const GET_OBJECTS: &str = "netbox_get_objects";
pub const GET_OBJECT_BY_ID: &str = "netbox_get_object_by_id";
pub const GET_CHANGELOGS: &str = "netbox_get_changelogs";
pub const CREATE_OBJECT: &str = "create_netbox_object";
pub const UPDATE_OBJECT: &str = "update_netbox_object";
pub const BULK_CREATE_OBJECTS: &str = "bulk_create_netbox_objects";

const CHANGELOG_FILTERS: &str = "\
Filtering options include:
- user_id: ID of the user who made the change
- user: username of the user who made the change
- changed_object_type_id: content type ID of the changed object
- changed_object_id: ID of the changed object
- object_repr: object representation (usually contains the object name)
- action: create, update or delete
- time_before: changes made before this time (ISO 8601)
- time_after: changes made after this time (ISO 8601)
- q: search term matched against the object representation

Example, all changes to device 123:
{\"changed_object_type_id\": \"dcim.device\", \"changed_object_id\": 123}

Each entry carries id, user, user_name, request_id, action,
changed_object_type, changed_object_id, object_repr, prechange_data,
postchange_data and time.";

// ── Arguments ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GetObjectsArgs {
    object_type: String,
    #[serde(default)]
    filters: FilterSet,
}

#[derive(Debug, Deserialize)]
struct GetObjectByIdArgs {
    object_type: String,
    object_id: ObjectId,
}

#[derive(Debug, Deserialize)]
struct ChangelogArgs {
    #[serde(default)]
    filters: FilterSet,
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    object_type: String,
    data: ObjectPayload,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    object_type: String,
    object_id: ObjectId,
    data: ObjectPayload,
}

#[derive(Debug, Deserialize)]
struct BulkCreateArgs {
    object_type: String,
    data: Vec<ObjectPayload>,
}

// ── Dispatch ────────────────────────────────────────────────────────

pub(super) async fn call(
    gateway: &Gateway,
    name: &str,
    arguments: Value,
) -> Result<Result<Value, CoreError>, ToolError> {
    let outcome = match name {
        GET_OBJECTS => {
            let args: GetObjectsArgs = decode(name, arguments)?;
            gateway.list_objects(&args.object_type, &args.filters).await
        }
        GET_OBJECT_BY_ID => {
            let args: GetObjectByIdArgs = decode(name, arguments)?;
            gateway.get_object(&args.object_type, args.object_id).await
        }
        GET_CHANGELOGS => {
            let args: ChangelogArgs = decode(name, arguments)?;
            gateway.query_change_log(&args.filters).await
        }
        CREATE_OBJECT => {
            let args: CreateArgs = decode(name, arguments)?;
            gateway.create_object(&args.object_type, &args.data).await
        }
        UPDATE_OBJECT => {
            let args: UpdateArgs = decode(name, arguments)?;
            gateway
                .update_object(&args.object_type, args.object_id, &args.data)
                .await
        }
        BULK_CREATE_OBJECTS => {
            let args: BulkCreateArgs = decode(name, arguments)?;
            gateway
                .bulk_create_objects(&args.object_type, &args.data)
                .await
                .map(Value::Array)
        }
        _ => return Err(ToolError::UnknownTool(name.to_owned())),
    };
    Ok(outcome)
}

// ── Definitions ─────────────────────────────────────────────────────

fn object_type_schema() -> Value {
    json!({
        "type": "string",
        "description": "NetBox object type (e.g. \"devices\", \"ip-addresses\")"
    })
}

fn object_id_schema(action: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 0,
        "description": format!("Numeric ID of the object to {action}")
    })
}

fn with_catalog(summary: &str) -> String {
    format!(
        "{summary}\n\nValid object_type values:\n\n{}",
        ObjectType::catalog()
    )
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_OBJECTS.to_owned(),
            description: with_catalog(
                "Get objects from NetBox by type and filters. Filters follow the NetBox API \
                 filtering options for each object type; list values repeat the parameter.",
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "object_type": object_type_schema(),
                    "filters": {
                        "type": "object",
                        "description": "Filters to apply, e.g. {\"site\": \"nyc\", \"status\": \"active\"}"
                    }
                },
                "required": ["object_type"]
            }),
        },
        ToolDefinition {
            name: GET_OBJECT_BY_ID.to_owned(),
            description: with_catalog(
                "Get detailed information about a specific NetBox object by its ID.",
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "object_type": object_type_schema(),
                    "object_id": object_id_schema("fetch")
                },
                "required": ["object_type", "object_id"]
            }),
        },
        ToolDefinition {
            name: GET_CHANGELOGS.to_owned(),
            description: format!(
                "Get object change records (changelogs) from NetBox based on filters.\n\n\
                 {CHANGELOG_FILTERS}"
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filters": {
                        "type": "object",
                        "description": "Change log filters, e.g. {\"action\": \"delete\"}"
                    }
                }
            }),
        },
        ToolDefinition {
            name: CREATE_OBJECT.to_owned(),
            description: with_catalog(
                "Create a new NetBox object. Example VLAN data: \
                 {\"vid\": 100, \"name\": \"User Access\", \"site\": 1, \"status\": \"active\"}",
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "object_type": object_type_schema(),
                    "data": {
                        "type": "object",
                        "description": "Object fields according to the NetBox API"
                    }
                },
                "required": ["object_type", "data"]
            }),
        },
        ToolDefinition {
            name: UPDATE_OBJECT.to_owned(),
            description: with_catalog(
                "Update an existing NetBox object by its ID. Only the given fields change.",
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "object_type": object_type_schema(),
                    "object_id": object_id_schema("update"),
                    "data": {
                        "type": "object",
                        "description": "Fields to change"
                    }
                },
                "required": ["object_type", "object_id", "data"]
            }),
        },
        ToolDefinition {
            name: BULK_CREATE_OBJECTS.to_owned(),
            description: with_catalog(
                "Create multiple NetBox objects of one type in a single request.",
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "object_type": object_type_schema(),
                    "data": {
                        "type": "array",
                        "items": { "type": "object" },
                        "description": "Objects to create, e.g. [{\"name\": \"a\"}, {\"name\": \"b\"}]"
                    }
                },
                "required": ["object_type", "data"]
            }),
        },
    ]
}
