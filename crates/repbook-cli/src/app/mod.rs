//! Application context and path resolution.

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::{load_config, missing_config_message, resolve_config_path, resolve_store_path};
