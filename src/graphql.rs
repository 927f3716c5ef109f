pub mod request;
pub use request::{GraphQLError, GraphQLRequest, GraphQLResponse, Operation, OperationKind};
pub mod error;
pub use error::{ClientError, NetworkError};
pub mod transport;
pub use transport::{HttpTransport, Transport};
pub mod links;
pub use links::{AuthLink, ErrorLink};
pub mod cache;
pub use cache::{MergePolicy, NormalizedCache, TypePolicies};
pub mod client;
pub use client::{FetchPolicy, GraphQLClient};
pub mod operations;
