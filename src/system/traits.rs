use anyhow::Result;
use std::path::Path;

use crate::endpoint::Direction;

/// Trait for default-endpoint queries - abstracts the MMDevice COM surface
pub trait AudioEndpointInterface {
    /// Get the endpoint ID of the current default device for a direction
    fn default_endpoint_id(&self, direction: Direction) -> Result<String>;

    /// Resolve an endpoint ID to its user-facing friendly name
    fn resolve_friendly_name(&self, endpoint_id: &str) -> Result<String>;
}

/// Trait for the dependent application's preference namespace - abstracts the registry
pub trait PreferenceStoreInterface {
    /// Check whether the per-user preference namespace exists at all
    fn namespace_exists(&self) -> Result<bool>;

    /// Read a single string value; None when the value is not present
    fn read_value(&self, name: &str) -> Result<Option<String>>;

    /// Write a single string value
    fn write_value(&self, name: &str, value: &str) -> Result<()>;
}

/// Trait for file system operations - abstracts std::fs for testability
pub trait FileSystemInterface {
    /// Read the entire contents of a configuration file
    fn read_config_file(&self, path: &Path) -> Result<String>;

    /// Write configuration content to a file
    fn write_config_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Check if a configuration file exists
    fn config_file_exists(&self, path: &Path) -> bool;

    /// Create the directory structure for config files
    fn create_config_dir(&self, path: &Path) -> Result<()>;
}

/// Trait for the blocking wait between poll attempts
pub trait SystemClockInterface {
    /// Sleep for the specified number of milliseconds; not cancellable
    fn sleep_ms(&self, milliseconds: u64);
}
