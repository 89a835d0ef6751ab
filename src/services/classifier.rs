use crate::config::Config;
use crate::events::{Classification, ConfigurationState, TopologySnapshot};
use std::path::PathBuf;

/// Сопоставляет набор мониторов с одной из известных конфигураций.
/// Не имеет состояния: результат зависит только от снимка.
#[derive(Debug, Clone)]
pub struct Classifier {
    internal_description: String,
    external_description: String,
    external_monitor_count: usize,
    internal_config: PathBuf,
    external_config: PathBuf,
}

impl Classifier {
    pub fn new(config: &Config) -> Self {
        Self {
            internal_description: config.monitors.internal_description.trim().to_string(),
            external_description: config.monitors.external_description.trim().to_string(),
            external_monitor_count: config.monitors.external_monitor_count,
            internal_config: config.bar.internal_config.clone(),
            external_config: config.bar.external_config.clone(),
        }
    }

    pub fn classify(&self, snapshot: &TopologySnapshot) -> Classification {
        // Один монитор - только встроенная панель ноутбука
        if snapshot.len() == 1
            && snapshot.descriptions().next() == Some(self.internal_description.as_str())
        {
            return Classification::recognized(
                ConfigurationState::Internal,
                self.internal_config.clone(),
            );
        }

        if snapshot.len() == self.external_monitor_count
            && snapshot
                .descriptions()
                .any(|desc| desc == self.external_description)
        {
            return Classification::recognized(
                ConfigurationState::External,
                self.external_config.clone(),
            );
        }

        Classification::unset()
    }
}
