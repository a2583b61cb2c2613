//! Flattening configuration types.

/// Default separator between path segments.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for the [`Flattener`](crate::Flattener).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenConfig {
    /// Separator joining a parent key and a child key.
    pub separator: String,
    /// Maximum nesting depth before flattening fails.
    pub max_depth: usize,
    /// Visit mapping entries sorted by rendered key instead of insertion order.
    pub sort_map_keys: bool,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            sort_map_keys: false,
        }
    }
}

impl FlattenConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> FlattenConfigBuilder {
        FlattenConfigBuilder::default()
    }
}

/// Builder for [`FlattenConfig`].
#[derive(Debug, Clone, Default)]
pub struct FlattenConfigBuilder {
    separator: Option<String>,
    max_depth: Option<usize>,
    sort_map_keys: Option<bool>,
}

impl FlattenConfigBuilder {
    /// Set the key separator.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set whether mapping entries are visited in key order.
    #[must_use]
    pub const fn sort_map_keys(mut self, sort: bool) -> Self {
        self.sort_map_keys = Some(sort);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> FlattenConfig {
        let defaults = FlattenConfig::default();
        FlattenConfig {
            separator: self.separator.unwrap_or(defaults.separator),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            sort_map_keys: self.sort_map_keys.unwrap_or(defaults.sort_map_keys),
        }
    }
}
