use crate::config::Config;
use crate::error::Result;
use crate::events::TopologySnapshot;
use std::sync::Arc;

/// Trait for monitor sources that can run in different modes
#[async_trait::async_trait]
pub trait MonitorQueryTrait {
    /// Query the current monitor topology
    async fn query(&mut self) -> Result<TopologySnapshot>;
}

/// Factory function to create an appropriate monitor query based on the dry_run flag
pub fn create_monitor_query(
    config: Arc<Config>,
    dry_run: bool,
) -> Result<Box<dyn MonitorQueryTrait + Send + Sync>> {
    if dry_run {
        Ok(Box::new(super::dry_monitor_query::DryRunMonitorQuery::new(
            config,
        )))
    } else {
        Ok(Box::new(super::hyprctl::HyprctlQuery::new(config)))
    }
}
