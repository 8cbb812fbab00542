//! Configuration for sparse matrix storage

/// How the CSR value/column arrays grow when their capacity is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Grow by exactly one slot per new nonzero
    Exact,
    /// Double the capacity (amortised constant-time growth)
    Doubling,
}

impl GrowthPolicy {
    /// Capacity to reserve when `current` slots are full and one more is needed
    pub fn next_capacity(&self, current: usize) -> usize {
        match self {
            GrowthPolicy::Exact => current.saturating_add(1),
            GrowthPolicy::Doubling => current.saturating_mul(2).max(4),
        }
    }

    /// Parse a policy name as used in environment overrides
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(GrowthPolicy::Exact),
            "doubling" | "double" => Some(GrowthPolicy::Doubling),
            _ => None,
        }
    }
}

/// Storage configuration shared by every format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Growth strategy for CSR/CSC backing arrays
    pub growth: GrowthPolicy,

    /// Number of value slots reserved up front
    pub initial_capacity: usize,

    /// Dense conversion logs progress every this many cells
    pub progress_interval: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            growth: GrowthPolicy::Doubling,
            initial_capacity: 0,
            progress_interval: 10_000,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the growth policy
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Set the initial capacity
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the dense conversion progress interval (0 is treated as 1)
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Defaults overridden by `SPARSESTORE_GROWTH` and `SPARSESTORE_PROGRESS`
    ///
    /// Unrecognised values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(growth) = std::env::var("SPARSESTORE_GROWTH")
            .ok()
            .and_then(|v| GrowthPolicy::from_name(&v))
        {
            config.growth = growth;
        }

        if let Some(interval) = std::env::var("SPARSESTORE_PROGRESS")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            config = config.with_progress_interval(interval);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.growth, GrowthPolicy::Doubling);
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.progress_interval, 10_000);
    }

    #[test]
    fn test_growth_policies() {
        assert_eq!(GrowthPolicy::Exact.next_capacity(0), 1);
        assert_eq!(GrowthPolicy::Exact.next_capacity(7), 8);
        assert_eq!(GrowthPolicy::Doubling.next_capacity(0), 4);
        assert_eq!(GrowthPolicy::Doubling.next_capacity(8), 16);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(GrowthPolicy::from_name("Exact"), Some(GrowthPolicy::Exact));
        assert_eq!(GrowthPolicy::from_name(" doubling "), Some(GrowthPolicy::Doubling));
        assert_eq!(GrowthPolicy::from_name("triple"), None);
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new()
            .with_growth(GrowthPolicy::Exact)
            .with_initial_capacity(32)
            .with_progress_interval(0);

        assert_eq!(config.growth, GrowthPolicy::Exact);
        assert_eq!(config.initial_capacity, 32);
        assert_eq!(config.progress_interval, 1);
    }
}
