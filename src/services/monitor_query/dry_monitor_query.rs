use crate::config::Config;
use crate::error::Result;
use crate::events::TopologySnapshot;
use std::sync::Arc;
use tracing::info;

use super::r#trait::MonitorQueryTrait;

/// Сколько тиков подряд держится каждая фейковая топология
const TICKS_PER_TOPOLOGY: usize = 5;

pub struct DryRunMonitorQuery {
    topologies: Vec<TopologySnapshot>,
    tick: usize,
}

impl DryRunMonitorQuery {
    pub fn new(config: Arc<Config>) -> Self {
        info!("Dry-run режим - MonitorQuery работает в режиме эмуляции");

        let internal = config.monitors.internal_description.as_str();
        let external = config.monitors.external_description.as_str();

        let mut docked = vec![external.to_string()];
        docked.extend(
            (1..config.monitors.external_monitor_count).map(|i| format!("Dry-run Monitor {}", i)),
        );

        let topologies = vec![
            TopologySnapshot::from_descriptions([internal]),
            // Кратковременное состояние во время подключения дока
            TopologySnapshot::from_descriptions([internal, external]),
            TopologySnapshot::from_descriptions(docked),
        ];

        Self { topologies, tick: 0 }
    }
}

#[async_trait::async_trait]
impl MonitorQueryTrait for DryRunMonitorQuery {
    async fn query(&mut self) -> Result<TopologySnapshot> {
        let index = (self.tick / TICKS_PER_TOPOLOGY) % self.topologies.len();
        self.tick = self.tick.wrapping_add(1);

        let snapshot = TopologySnapshot::new(self.topologies[index].monitors.clone());
        if self.tick % TICKS_PER_TOPOLOGY == 1 {
            info!("Dry-run: эмулируем топологию {}", snapshot);
        }
        Ok(snapshot)
    }
}
