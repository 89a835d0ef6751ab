use crate::config::Config;
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::r#trait::{BarLauncherTrait, TerminationOutcome};

pub struct DryRunBarLauncher {
    config: Arc<Config>,
}

impl DryRunBarLauncher {
    pub fn new(config: Arc<Config>) -> Self {
        info!("Dry-run режим - процессы панели не запускаются и не завершаются");
        Self { config }
    }
}

#[async_trait::async_trait]
impl BarLauncherTrait for DryRunBarLauncher {
    async fn terminate(&self, process_name: &str) -> TerminationOutcome {
        info!("Dry-run: {} -x {}", self.config.bar.kill_command, process_name);
        TerminationOutcome::Terminated
    }

    async fn launch(&self, config_path: &Path) -> Result<Option<u32>> {
        info!(
            "Dry-run: {} --config {}",
            self.config.bar.binary,
            config_path.display()
        );
        Ok(None)
    }
}
