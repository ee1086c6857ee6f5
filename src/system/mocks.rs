use anyhow::Result;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::endpoint::Direction;
use crate::system::traits::{
    AudioEndpointInterface, FileSystemInterface, PreferenceStoreInterface, SystemClockInterface,
};

/// Mock audio system for testing - provides controllable endpoint behavior
#[derive(Clone)]
pub struct MockAudioSystem {
    pub default_endpoints: Arc<Mutex<HashMap<Direction, String>>>,
    pub friendly_names: Arc<Mutex<HashMap<String, String>>>,
    pub scripted_defaults: Arc<Mutex<HashMap<Direction, VecDeque<Option<String>>>>>,
    pub default_queries: Arc<Mutex<Vec<Direction>>>,
    pub name_queries: Arc<Mutex<Vec<String>>>,
    pub should_fail_name_lookup: Arc<Mutex<bool>>,
}

impl MockAudioSystem {
    pub fn new() -> Self {
        Self {
            default_endpoints: Arc::new(Mutex::new(HashMap::new())),
            friendly_names: Arc::new(Mutex::new(HashMap::new())),
            scripted_defaults: Arc::new(Mutex::new(HashMap::new())),
            default_queries: Arc::new(Mutex::new(Vec::new())),
            name_queries: Arc::new(Mutex::new(Vec::new())),
            should_fail_name_lookup: Arc::new(Mutex::new(false)),
        }
    }

    /// Set the steady default endpoint for a direction
    pub fn set_default_endpoint(&self, direction: Direction, endpoint_id: &str, friendly_name: &str) {
        self.default_endpoints
            .lock()
            .unwrap()
            .insert(direction, endpoint_id.to_string());
        self.friendly_names
            .lock()
            .unwrap()
            .insert(endpoint_id.to_string(), friendly_name.to_string());
    }

    /// Remove the default endpoint for a direction (queries become unavailable)
    pub fn clear_default_endpoint(&self, direction: Direction) {
        self.default_endpoints.lock().unwrap().remove(&direction);
    }

    /// Queue per-query results for a direction; None simulates an unavailable
    /// endpoint. Once the queue drains, queries fall back to the steady default.
    pub fn script_default_endpoints(&self, direction: Direction, results: Vec<Option<&str>>) {
        let mut scripted = self.scripted_defaults.lock().unwrap();
        let queue = scripted.entry(direction).or_default();
        for result in results {
            queue.push_back(result.map(|id| id.to_string()));
        }
    }

    /// Map an endpoint ID to a friendly name
    pub fn set_friendly_name(&self, endpoint_id: &str, friendly_name: &str) {
        self.friendly_names
            .lock()
            .unwrap()
            .insert(endpoint_id.to_string(), friendly_name.to_string());
    }

    /// Configure the mock to fail friendly name lookups
    pub fn set_name_lookup_failure(&self, should_fail: bool) {
        *self.should_fail_name_lookup.lock().unwrap() = should_fail;
    }

    /// Get all default endpoint queries that were made
    pub fn get_default_queries(&self) -> Vec<Direction> {
        self.default_queries.lock().unwrap().clone()
    }

    /// Get all friendly name lookups that were made
    pub fn get_name_queries(&self) -> Vec<String> {
        self.name_queries.lock().unwrap().clone()
    }

    /// Clear all query histories
    pub fn clear_query_history(&self) {
        self.default_queries.lock().unwrap().clear();
        self.name_queries.lock().unwrap().clear();
    }
}

impl AudioEndpointInterface for MockAudioSystem {
    fn default_endpoint_id(&self, direction: Direction) -> Result<String> {
        self.default_queries.lock().unwrap().push(direction);

        if let Some(queue) = self.scripted_defaults.lock().unwrap().get_mut(&direction) {
            if let Some(next) = queue.pop_front() {
                return next
                    .ok_or_else(|| anyhow::anyhow!("Mock {} endpoint unavailable", direction));
            }
        }

        self.default_endpoints
            .lock()
            .unwrap()
            .get(&direction)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Mock {} endpoint unavailable", direction))
    }

    fn resolve_friendly_name(&self, endpoint_id: &str) -> Result<String> {
        self.name_queries.lock().unwrap().push(endpoint_id.to_string());

        if *self.should_fail_name_lookup.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock name lookup failure"));
        }

        self.friendly_names
            .lock()
            .unwrap()
            .get(endpoint_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Mock endpoint {} has no name", endpoint_id))
    }
}

impl Default for MockAudioSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock preference store for testing - an in-memory preference namespace
#[derive(Clone)]
pub struct MockPreferenceStore {
    pub namespace_present: Arc<Mutex<bool>>,
    pub values: Arc<Mutex<HashMap<String, String>>>,
    pub namespace_checks: Arc<Mutex<u32>>,
    pub read_calls: Arc<Mutex<Vec<String>>>,
    pub write_calls: Arc<Mutex<Vec<(String, String)>>>,
    pub denied_fields: Arc<Mutex<Vec<String>>>,
}

impl MockPreferenceStore {
    pub fn new() -> Self {
        Self {
            namespace_present: Arc::new(Mutex::new(false)),
            values: Arc::new(Mutex::new(HashMap::new())),
            namespace_checks: Arc::new(Mutex::new(0)),
            read_calls: Arc::new(Mutex::new(Vec::new())),
            write_calls: Arc::new(Mutex::new(Vec::new())),
            denied_fields: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create the namespace without seeding any values
    pub fn create_namespace(&self) {
        *self.namespace_present.lock().unwrap() = true;
    }

    /// Seed a value, creating the namespace as the application would
    pub fn set_stored_value(&self, name: &str, value: &str) {
        *self.namespace_present.lock().unwrap() = true;
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    /// Get the current stored value for a name
    pub fn stored_value(&self, name: &str) -> Option<String> {
        self.values.lock().unwrap().get(name).cloned()
    }

    /// Deny writes to a specific value name
    pub fn deny_writes_to(&self, name: &str) {
        self.denied_fields.lock().unwrap().push(name.to_string());
    }

    /// Get the number of namespace existence checks that were made
    pub fn get_namespace_checks(&self) -> u32 {
        *self.namespace_checks.lock().unwrap()
    }

    /// Get all value reads that were made
    pub fn get_read_calls(&self) -> Vec<String> {
        self.read_calls.lock().unwrap().clone()
    }

    /// Get all value writes that were made
    pub fn get_write_calls(&self) -> Vec<(String, String)> {
        self.write_calls.lock().unwrap().clone()
    }

    /// Clear all call histories
    pub fn clear_call_history(&self) {
        *self.namespace_checks.lock().unwrap() = 0;
        self.read_calls.lock().unwrap().clear();
        self.write_calls.lock().unwrap().clear();
    }
}

impl PreferenceStoreInterface for MockPreferenceStore {
    fn namespace_exists(&self) -> Result<bool> {
        *self.namespace_checks.lock().unwrap() += 1;
        Ok(*self.namespace_present.lock().unwrap())
    }

    fn read_value(&self, name: &str) -> Result<Option<String>> {
        self.read_calls.lock().unwrap().push(name.to_string());
        Ok(self.values.lock().unwrap().get(name).cloned())
    }

    fn write_value(&self, name: &str, value: &str) -> Result<()> {
        self.write_calls
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));

        if self.denied_fields.lock().unwrap().iter().any(|f| f == name) {
            return Err(anyhow::anyhow!("Mock write access denied for {}", name));
        }

        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

impl Default for MockPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock file system for testing - provides controllable file operations
#[derive(Clone)]
pub struct MockFileSystem {
    pub files: Arc<Mutex<HashMap<PathBuf, String>>>,
    pub read_calls: Arc<Mutex<Vec<PathBuf>>>,
    pub write_calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
    pub directory_creation_calls: Arc<Mutex<Vec<PathBuf>>>,
    pub should_fail_read: Arc<Mutex<bool>>,
    pub should_fail_write: Arc<Mutex<bool>>,
    pub should_fail_create_dir: Arc<Mutex<bool>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            read_calls: Arc::new(Mutex::new(Vec::new())),
            write_calls: Arc::new(Mutex::new(Vec::new())),
            directory_creation_calls: Arc::new(Mutex::new(Vec::new())),
            should_fail_read: Arc::new(Mutex::new(false)),
            should_fail_write: Arc::new(Mutex::new(false)),
            should_fail_create_dir: Arc::new(Mutex::new(false)),
        }
    }

    /// Add a file to the mock file system
    pub fn add_file<P: AsRef<Path>>(&self, path: P, content: String) {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), content);
    }

    /// Remove a file from the mock file system
    pub fn remove_file<P: AsRef<Path>>(&self, path: P) {
        self.files
            .lock()
            .unwrap()
            .remove(&path.as_ref().to_path_buf());
    }

    /// Get all read calls that were made
    pub fn get_read_calls(&self) -> Vec<PathBuf> {
        self.read_calls.lock().unwrap().clone()
    }

    /// Get all write calls that were made
    pub fn get_write_calls(&self) -> Vec<(PathBuf, String)> {
        self.write_calls.lock().unwrap().clone()
    }

    /// Get all directory creation calls that were made
    pub fn get_directory_creation_calls(&self) -> Vec<PathBuf> {
        self.directory_creation_calls.lock().unwrap().clone()
    }

    /// Clear all call histories
    pub fn clear_call_history(&self) {
        self.read_calls.lock().unwrap().clear();
        self.write_calls.lock().unwrap().clear();
        self.directory_creation_calls.lock().unwrap().clear();
    }

    /// Configure the mock to fail read operations
    pub fn set_read_failure(&self, should_fail: bool) {
        *self.should_fail_read.lock().unwrap() = should_fail;
    }

    /// Configure the mock to fail write operations
    pub fn set_write_failure(&self, should_fail: bool) {
        *self.should_fail_write.lock().unwrap() = should_fail;
    }

    /// Configure the mock to fail directory creation
    pub fn set_create_dir_failure(&self, should_fail: bool) {
        *self.should_fail_create_dir.lock().unwrap() = should_fail;
    }

    /// Check if a file exists in the mock system
    pub fn file_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.files
            .lock()
            .unwrap()
            .contains_key(&path.as_ref().to_path_buf())
    }
}

impl FileSystemInterface for MockFileSystem {
    fn read_config_file(&self, path: &Path) -> Result<String> {
        self.read_calls.lock().unwrap().push(path.to_path_buf());

        if *self.should_fail_read.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock read failure"));
        }

        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
    }

    fn write_config_file(&self, path: &Path, content: &str) -> Result<()> {
        self.write_calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), content.to_string()));

        if *self.should_fail_write.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock write failure"));
        }

        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn config_file_exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(&path.to_path_buf())
    }

    fn create_config_dir(&self, path: &Path) -> Result<()> {
        self.directory_creation_calls
            .lock()
            .unwrap()
            .push(path.to_path_buf());

        if *self.should_fail_create_dir.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock create directory failure"));
        }

        Ok(())
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock clock for testing - records sleep requests without waiting
#[derive(Clone)]
pub struct MockSystemClock {
    pub sleep_calls: Arc<Mutex<Vec<u64>>>,
}

impl MockSystemClock {
    pub fn new() -> Self {
        Self {
            sleep_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all sleep calls that were made
    pub fn get_sleep_calls(&self) -> Vec<u64> {
        self.sleep_calls.lock().unwrap().clone()
    }

    /// Total milliseconds the poller would have blocked for
    pub fn total_sleep_ms(&self) -> u64 {
        self.sleep_calls.lock().unwrap().iter().sum()
    }

    /// Clear sleep call history
    pub fn clear_sleep_calls(&self) {
        self.sleep_calls.lock().unwrap().clear();
    }
}

impl SystemClockInterface for MockSystemClock {
    fn sleep_ms(&self, milliseconds: u64) {
        // Don't actually sleep in tests
        self.sleep_calls.lock().unwrap().push(milliseconds);
    }
}

impl Default for MockSystemClock {
    fn default() -> Self {
        Self::new()
    }
}
