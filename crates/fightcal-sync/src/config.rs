//! Sync engine configuration.

/// Settings for pushing fight events to a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Number of concurrent calendar insert workers.
    pub workers: usize,

    /// Look up each fight by its content key before inserting, and skip
    /// fights already on the calendar.
    pub skip_existing: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            skip_existing: true,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builder: set the existing-event check.
    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    /// Worker count to spawn for a batch of `jobs` events.
    pub fn workers_for(&self, jobs: usize) -> usize {
        self.workers.max(1).min(jobs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.workers, 4);
        assert!(config.skip_existing);
    }

    #[test]
    fn custom_config() {
        let config = SyncConfig::new().with_workers(8).with_skip_existing(false);
        assert_eq!(config.workers, 8);
        assert!(!config.skip_existing);
    }

    #[test]
    fn workers_bounded_by_batch() {
        let config = SyncConfig::new().with_workers(4);
        assert_eq!(config.workers_for(2), 2);
        assert_eq!(config.workers_for(10), 4);
        assert_eq!(config.workers_for(0), 1);
        assert_eq!(SyncConfig::new().with_workers(0).workers_for(5), 1);
    }
}
