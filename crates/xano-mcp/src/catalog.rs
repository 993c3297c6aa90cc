//! Built-in Metadata API tools.
//!
//! Populates the registry with the bridge's tool set at process start.
//! Each tool maps to a GET route under the API base and names the payload
//! key its callers pattern-match on.

use crate::client::{MetaTool, Operation, Route, Segment};
use crate::error::McpError;
use crate::tools::{ParamSpec, ToolRegistry, ToolSpec};
use std::sync::Arc;
use xano_core::{ApiConfig, CredentialResolver};

use crate::client::Segment::{Arg, Literal};

const INSTANCE_NAME: (&str, &str) = ("instance_name", "The name of the Xano instance");
const DATABASE_NAME: (&str, &str) = ("database_name", "The name of the Xano database (workspace)");
const TABLE_NAME: (&str, &str) = ("table_name", "The name of the table");
const RECORD_ID: (&str, &str) = ("record_id", "The ID of the record");
const FILE_ID: (&str, &str) = ("file_id", "The ID of the file");

struct MetaToolDef {
    name: &'static str,
    description: &'static str,
    params: &'static [(&'static str, &'static str)],
    route: Vec<Segment>,
    payload_key: &'static str,
    operation: Operation,
}

fn builtin_tools() -> Vec<MetaToolDef> {
    vec![
        MetaToolDef {
            name: "xano_list_instances",
            description: "List all Xano instances associated with the account.",
            params: &[],
            route: vec![Literal("instance")],
            payload_key: "instances",
            operation: Operation {
                label: "list instances",
                gerund: "listing instances",
            },
        },
        MetaToolDef {
            name: "xano_get_instance_details",
            description: "Get details for a specific Xano instance.",
            params: &[INSTANCE_NAME],
            route: vec![Literal("instance"), Arg("instance_name")],
            payload_key: "instance",
            operation: Operation {
                label: "get instance details",
                gerund: "getting instance details",
            },
        },
        MetaToolDef {
            name: "xano_list_databases",
            description: "List all databases (workspaces) in a specific Xano instance.",
            params: &[INSTANCE_NAME],
            route: vec![Literal("instance"), Arg("instance_name"), Literal("database")],
            payload_key: "databases",
            operation: Operation {
                label: "list databases",
                gerund: "listing databases",
            },
        },
        MetaToolDef {
            name: "xano_list_tables",
            description: "List all tables in a specific Xano database (workspace).",
            params: &[INSTANCE_NAME, DATABASE_NAME],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("table"),
            ],
            payload_key: "tables",
            operation: Operation {
                label: "list tables",
                gerund: "listing tables",
            },
        },
        MetaToolDef {
            name: "xano_get_database_details",
            description: "Get details for a specific Xano database (workspace).",
            params: &[INSTANCE_NAME, DATABASE_NAME],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
            ],
            payload_key: "database",
            operation: Operation {
                label: "get database details",
                gerund: "getting database details",
            },
        },
        MetaToolDef {
            name: "xano_get_table_details",
            description: "Get details for a specific Xano table.",
            params: &[INSTANCE_NAME, DATABASE_NAME, TABLE_NAME],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("table"),
                Arg("table_name"),
            ],
            payload_key: "table",
            operation: Operation {
                label: "get table details",
                gerund: "getting table details",
            },
        },
        MetaToolDef {
            name: "xano_get_table_schema",
            description: "Get the schema for a specific Xano table.",
            params: &[INSTANCE_NAME, DATABASE_NAME, TABLE_NAME],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("table"),
                Arg("table_name"),
                Literal("schema"),
            ],
            payload_key: "schema",
            operation: Operation {
                label: "get table schema",
                gerund: "getting table schema",
            },
        },
        MetaToolDef {
            name: "xano_list_indexes",
            description: "List all indexes for a specific Xano table.",
            params: &[INSTANCE_NAME, DATABASE_NAME, TABLE_NAME],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("table"),
                Arg("table_name"),
                Literal("index"),
            ],
            payload_key: "indexes",
            operation: Operation {
                label: "list indexes",
                gerund: "listing indexes",
            },
        },
        MetaToolDef {
            name: "xano_browse_table_content",
            description: "Browse the content of a specific Xano table.",
            params: &[INSTANCE_NAME, DATABASE_NAME, TABLE_NAME],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("table"),
                Arg("table_name"),
                Literal("content"),
            ],
            payload_key: "content",
            operation: Operation {
                label: "browse table content",
                gerund: "browsing table content",
            },
        },
        MetaToolDef {
            name: "xano_get_table_record",
            description: "Get a specific record from a Xano table.",
            params: &[INSTANCE_NAME, DATABASE_NAME, TABLE_NAME, RECORD_ID],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("table"),
                Arg("table_name"),
                Literal("content"),
                Arg("record_id"),
            ],
            payload_key: "record",
            operation: Operation {
                label: "get table record",
                gerund: "getting table record",
            },
        },
        MetaToolDef {
            name: "xano_list_files",
            description: "List files within a specific Xano database (workspace).",
            params: &[INSTANCE_NAME, DATABASE_NAME],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("file"),
            ],
            payload_key: "files",
            operation: Operation {
                label: "list files",
                gerund: "listing files",
            },
        },
        MetaToolDef {
            name: "xano_get_file_details",
            description: "Get details for a specific file in a Xano database (workspace).",
            params: &[INSTANCE_NAME, DATABASE_NAME, FILE_ID],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("file"),
                Arg("file_id"),
            ],
            payload_key: "file",
            operation: Operation {
                label: "get file details",
                gerund: "getting file details",
            },
        },
        MetaToolDef {
            name: "xano_browse_request_history",
            description: "Browse request history for a specific Xano database (workspace).",
            params: &[INSTANCE_NAME, DATABASE_NAME],
            route: vec![
                Literal("instance"),
                Arg("instance_name"),
                Literal("database"),
                Arg("database_name"),
                Literal("request_history"),
            ],
            payload_key: "request_history",
            operation: Operation {
                label: "browse request history",
                gerund: "browsing request history",
            },
        },
    ]
}

/// Register the built-in Metadata API tools.
pub fn register_meta_tools(
    registry: &mut ToolRegistry,
    config: &ApiConfig,
    credentials: &CredentialResolver,
) -> Result<(), McpError> {
    for def in builtin_tools() {
        let spec = ToolSpec {
            name: def.name,
            description: def.description,
            params: def
                .params
                .iter()
                .map(|&(name, description)| ParamSpec::required(name, description))
                .collect(),
        };
        let handler = MetaTool::new(
            config.clone(),
            credentials.clone(),
            Route::new(def.route),
            def.payload_key,
            def.operation,
        );
        registry.register(spec, Arc::new(handler))?;
    }
    tracing::info!(tool_count = registry.len(), "registered Metadata API tools");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registers_all_builtin_tools() {
        let mut registry = ToolRegistry::new();
        register_meta_tools(
            &mut registry,
            &ApiConfig::default(),
            &CredentialResolver::default(),
        )
        .unwrap();

        assert_eq!(registry.len(), 13);
        for name in [
            "xano_list_instances",
            "xano_get_instance_details",
            "xano_list_databases",
            "xano_get_database_details",
            "xano_list_tables",
            "xano_get_table_details",
            "xano_get_table_schema",
            "xano_list_indexes",
            "xano_browse_table_content",
            "xano_get_table_record",
            "xano_list_files",
            "xano_get_file_details",
            "xano_browse_request_history",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_record_lookup_requires_all_identifiers() {
        let mut registry = ToolRegistry::new();
        register_meta_tools(
            &mut registry,
            &ApiConfig::default(),
            &CredentialResolver::default(),
        )
        .unwrap();

        let defs = registry.definitions();
        let record = defs
            .iter()
            .find(|d| d.name == "xano_get_table_record")
            .unwrap();
        assert_eq!(
            record.input_schema["required"],
            json!(["instance_name", "database_name", "table_name", "record_id"])
        );
    }

    #[test]
    fn test_list_tables_requires_both_identifiers() {
        let mut registry = ToolRegistry::new();
        register_meta_tools(
            &mut registry,
            &ApiConfig::default(),
            &CredentialResolver::default(),
        )
        .unwrap();

        let defs = registry.definitions();
        let list_tables = defs.iter().find(|d| d.name == "xano_list_tables").unwrap();
        assert_eq!(
            list_tables.input_schema["required"],
            json!(["instance_name", "database_name"])
        );
    }

    #[test]
    fn test_double_registration_is_rejected() {
        let mut registry = ToolRegistry::new();
        let config = ApiConfig::default();
        let credentials = CredentialResolver::default();
        register_meta_tools(&mut registry, &config, &credentials).unwrap();
        let err = register_meta_tools(&mut registry, &config, &credentials).unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool { .. }));
    }
}
