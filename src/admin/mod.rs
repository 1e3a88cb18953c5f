// Provider admin API boundary
pub mod client;
pub mod endpoint;
pub mod traits;

pub use client::HttpAdminClient;
pub use endpoint::{AdminRoute, Endpoint};
pub use traits::AdminApi;
