// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # rdskit
//!
//! A toolkit for querying Huawei Cloud RDS APIs: paginated fetch,
//! record normalization, client-side filtering, async job polling and
//! per-instance mutation serialization.
//!
//! ## Features
//!
//! - **Paginated Fetch**: offset/limit, page/limit and marker cursors with
//!   per-endpoint termination rules
//! - **Normalization**: declarative field rules mapping raw records to a
//!   fixed output key set with defaults
//! - **Client-Side Filtering**: conjunctive equality over fields the API
//!   cannot filter server-side
//! - **Job Polling**: poll async workflow jobs to completion with a deadline
//! - **Mutation Locking**: serialize mutations per instance id
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rdskit::{endpoints, ApiClient, Fetcher, Result, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let service = ServiceConfig::new(
//!         "https://rds.cn-north-1.myhuaweicloud.com",
//!         "cn-north-1",
//!         "my-project-id",
//!     )
//!     .with_token("...");
//!
//!     let fetcher = Fetcher::new(ApiClient::from_service(&service)?);
//!     let spec = endpoints::find("databases").unwrap();
//!
//!     let vars = [("instance_id".to_string(), "inst-1".to_string())].into();
//!     let databases = spec
//!         .read(&fetcher, &service, &vars, &Default::default(), &Default::default())
//!         .await?;
//!
//!     for db in databases {
//!         println!("{db:?}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Service configuration
pub mod config;

/// Path template interpolation
pub mod template;

/// Dot-path JSON extraction
pub mod search;

/// HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Paginated fetch loop
pub mod fetch;

/// Record normalization and filtering
pub mod normalize;

/// Built-in endpoint catalog
pub mod endpoints;

/// Async job polling
pub mod poll;

/// Per-instance lock registry
pub mod lock;

/// Serialized mutation dispatch
pub mod mutation;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use endpoints::EndpointSpec;
pub use fetch::{FetchRequest, Fetcher};
pub use http::{ApiClient, RequestConfig};
pub use lock::InstanceLocks;
pub use mutation::MutationDispatcher;
pub use normalize::{FieldRule, RuleSet};
pub use pagination::{PaginationConfig, StopRule};
pub use poll::{wait_for_job, JobProbe, JobStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
