//! Runtime configuration.

use serde::{Deserialize, Serialize};

/// Limits applied by the task runtime.
///
/// # Examples
///
/// ```
/// use task_runtime::task::services::TaskRuntimeConfig;
///
/// let config = TaskRuntimeConfig::default();
/// assert_eq!(config.page_size(None), 25);
/// assert_eq!(config.page_size(Some(1_000)), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRuntimeConfig {
    /// Page size used when a listing does not request one.
    pub default_page_size: usize,
    /// Largest page a listing may return.
    pub max_page_size: usize,
    /// Maximum task name length in characters.
    pub max_name_length: usize,
}

impl Default for TaskRuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRuntimeConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_page_size: 25,
            max_page_size: 100,
            max_name_length: 255,
        }
    }

    /// Sets the default page size.
    #[must_use]
    pub const fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the maximum page size.
    #[must_use]
    pub const fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Sets the maximum task name length.
    #[must_use]
    pub const fn with_max_name_length(mut self, length: usize) -> Self {
        self.max_name_length = length;
        self
    }

    /// Resolves the effective page size for a listing request.
    ///
    /// The result always lies in `1..=max_page_size`, so a request for zero
    /// items still returns the first matching task.
    #[must_use]
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}
