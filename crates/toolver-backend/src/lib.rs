mod error;
mod registry;
mod resolve;
mod traits;
mod types;

pub use error::{BackendError, GENERIC_FAILURE_CODE};
pub use registry::PluginRegistry;
pub use resolve::{LatestRequest, ResolveError, select_latest};
pub use traits::ToolPlugin;
pub use types::{Tool, VersionOrdering};
