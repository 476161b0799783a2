//! Configuration for the vigil monitor.

mod loader;
mod schema;

pub use loader::{load_default, load_from_path, settings_path};
pub use schema::{DisplaySettings, MonitorSettings, ServerSettings, VigilSettings};
