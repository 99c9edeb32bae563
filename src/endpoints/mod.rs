//! Built-in endpoint catalog
//!
//! Per-endpoint configuration tables for the RDS query surface: path
//! template, verb, pagination family, record array path, and the field
//! rule set. The fetcher treats all of this as configuration; nothing
//! endpoint-specific lives in the fetch loop.

pub mod records;

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::fetch::{FetchRequest, Fetcher};
use crate::normalize::{self, FieldRule, RuleSet};
use crate::pagination::{PaginationConfig, StopRule};
use crate::template;
use crate::types::{JsonObject, JsonValue, StringMap, Verb};
use std::collections::HashMap;

/// Configuration table for one query endpoint
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    /// Catalog key
    pub name: &'static str,
    /// Path template with `{project_id}`-style placeholders
    pub path: &'static str,
    /// HTTP verb (some read-only queries use POST per the API contract)
    pub verb: Verb,
    /// Dot path of the record array within each response
    pub records_path: &'static str,
    /// Pagination family for the given page size
    pub pagination: fn(u32) -> PaginationConfig,
    /// Field rules producing the endpoint's fixed output key set
    pub rules: fn() -> RuleSet,
}

impl EndpointSpec {
    /// Build a fetch request for this endpoint.
    ///
    /// `vars` supplies the placeholder values (project id, instance id);
    /// `query` carries server-side filter parameters.
    pub fn request(
        &self,
        vars: &HashMap<String, String>,
        query: &StringMap,
        page_size: u32,
    ) -> Result<FetchRequest> {
        let path = template::render(self.path, vars)?;
        let mut request = FetchRequest::new(path, self.records_path)
            .verb(self.verb)
            .pagination((self.pagination)(page_size));

        if self.verb.uses_body() {
            for (key, value) in query {
                request = request.body_field(key.clone(), value.clone());
            }
        } else {
            for (key, value) in query {
                request = request.query(key.clone(), value.clone());
            }
        }

        Ok(request)
    }

    /// Fetch, normalize and client-side-filter this endpoint's records.
    pub async fn read(
        &self,
        fetcher: &Fetcher,
        service: &ServiceConfig,
        vars: &HashMap<String, String>,
        query: &StringMap,
        predicates: &HashMap<String, JsonValue>,
    ) -> Result<Vec<JsonObject>> {
        let mut all_vars = service.path_vars();
        all_vars.extend(vars.clone());

        let request = self.request(&all_vars, query, service.page_size)?;
        let raw = fetcher.fetch_all(&request).await?;
        let normalized = normalize::normalize(&raw, &(self.rules)());
        if predicates.is_empty() {
            Ok(normalized)
        } else {
            Ok(normalize::filter(&normalized, predicates))
        }
    }

    /// Like [`read`](Self::read), but a 404 from the API becomes an empty
    /// result instead of an error. Used where a missing sub-resource is
    /// legitimately absent rather than a failure.
    pub async fn read_or_empty(
        &self,
        fetcher: &Fetcher,
        service: &ServiceConfig,
        vars: &HashMap<String, String>,
        query: &StringMap,
        predicates: &HashMap<String, JsonValue>,
    ) -> Result<Vec<JsonObject>> {
        match self.read(fetcher, service, vars, query, predicates).await {
            Ok(records) => Ok(records),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

/// The built-in catalog
pub const CATALOG: &[EndpointSpec] = &[
    EndpointSpec {
        name: "databases",
        path: "v3/{project_id}/instances/{instance_id}/databases",
        verb: Verb::Get,
        records_path: "databases",
        pagination: |n| PaginationConfig::page_number(n, StopRule::UnderPageSize),
        rules: database_rules,
    },
    EndpointSpec {
        name: "accounts",
        path: "v3/{project_id}/instances/{instance_id}/db_user/detail",
        verb: Verb::Get,
        records_path: "users",
        pagination: |n| PaginationConfig::page_number(n, StopRule::UnderPageSize),
        rules: account_rules,
    },
    EndpointSpec {
        name: "backups",
        path: "v3/{project_id}/backups",
        verb: Verb::Get,
        records_path: "backups",
        pagination: |n| PaginationConfig::offset(n, StopRule::total_count("total_count")),
        rules: backup_rules,
    },
    EndpointSpec {
        name: "publications",
        path: "v3/{project_id}/instances/{instance_id}/replication/publications",
        verb: Verb::Get,
        records_path: "publications",
        pagination: |n| PaginationConfig::offset(n, StopRule::UnderPageSize),
        rules: publication_rules,
    },
    EndpointSpec {
        name: "slow_logs",
        path: "v3/{project_id}/instances/{instance_id}/slowlog",
        verb: Verb::Post,
        records_path: "slow_log_list",
        pagination: |n| PaginationConfig::marker(n, "line_num"),
        rules: slow_log_rules,
    },
    EndpointSpec {
        name: "error_logs",
        path: "v3/{project_id}/instances/{instance_id}/errorlog",
        verb: Verb::Get,
        records_path: "error_log_list",
        pagination: |n| PaginationConfig::page_number(n, StopRule::UnderPageSize),
        rules: error_log_rules,
    },
    EndpointSpec {
        name: "storage_types",
        path: "v3/{project_id}/storage-type/{database_name}",
        verb: Verb::Get,
        records_path: "storage_type",
        pagination: |_| PaginationConfig::None,
        rules: storage_type_rules,
    },
    EndpointSpec {
        name: "flavors",
        path: "v3/{project_id}/flavors/{database_name}",
        verb: Verb::Get,
        records_path: "flavors",
        pagination: |_| PaginationConfig::None,
        rules: flavor_rules,
    },
];

/// Look up a catalog entry by name
pub fn find(name: &str) -> Option<&'static EndpointSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

fn database_rules() -> RuleSet {
    RuleSet::new()
        .field("name")
        .rule(FieldRule::field("character_set").default_value("utf8"))
        .field("comment")
}

fn account_rules() -> RuleSet {
    RuleSet::new()
        .field("name")
        .field("comment")
        .rule(FieldRule::field("hosts").default_value(JsonValue::Array(Vec::new())))
}

fn backup_rules() -> RuleSet {
    RuleSet::new()
        .field("id")
        .field("name")
        .rule(FieldRule::renamed("backup_type", "type"))
        .field("status")
        .rule(FieldRule::field("size").default_value(0))
        .field("instance_id")
        .field("begin_time")
        .field("end_time")
        .rule(FieldRule::renamed("engine", "datastore.type"))
        .rule(FieldRule::renamed("engine_version", "datastore.version"))
}

fn publication_rules() -> RuleSet {
    RuleSet::new()
        .field("id")
        .field("status")
        .field("publication_name")
        .field("publication_database")
        .rule(FieldRule::field("subscription_count").default_value(0))
        .rule(FieldRule::field("is_select_all_table").default_value(false))
}

fn slow_log_rules() -> RuleSet {
    RuleSet::new()
        .rule(FieldRule::field("count").default_value(0))
        .field("time")
        .field("query_sample")
        .field("type")
        .field("database")
        .field("users")
        .field("line_num")
}

fn error_log_rules() -> RuleSet {
    RuleSet::new().field("time").field("level").field("content")
}

fn storage_type_rules() -> RuleSet {
    RuleSet::new()
        .field("name")
        .rule(FieldRule::field("az_status").default_value(JsonObject::new()))
        .rule(FieldRule::field("support_compute_group_type").default_value(JsonValue::Array(Vec::new())))
}

fn flavor_rules() -> RuleSet {
    RuleSet::new()
        .rule(FieldRule::field("vcpus").default_value(""))
        .rule(FieldRule::field("ram").default_value(0))
        .field("spec_code")
        .field("instance_mode")
        .rule(FieldRule::field("az_status").default_value(JsonObject::new()))
}
