use crate::config::Config;
use crate::error::Result;
use crate::events::TopologySnapshot;
use crate::services::command::output_with_timeout;
use crate::{debug_if_enabled, switch_error};
use std::sync::Arc;
use tokio::process::Command;

use super::r#trait::MonitorQueryTrait;

pub struct HyprctlQuery {
    config: Arc<Config>,
}

impl HyprctlQuery {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn create_command(&self) -> Command {
        let mut cmd = Command::new(&self.config.compositor.command);
        cmd.args(&self.config.compositor.args);
        cmd
    }

    pub async fn get_monitors(&self) -> Result<TopologySnapshot> {
        let program = &self.config.compositor.command;

        let output = output_with_timeout(self.create_command(), program, self.config.command_timeout())
            .await
            .map_err(|e| match e {
                crate::error::SwitchError::Io(io) => switch_error!(query, "{} не найден: {}", program, io),
                other => other,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(switch_error!(
                query,
                "{} вернул ошибку ({}): {}",
                program,
                output.status,
                stderr.trim()
            ));
        }

        let snapshot = TopologySnapshot::from_json(&output.stdout)?;
        debug_if_enabled!("{} вернул {} мониторов: {}", program, snapshot.len(), snapshot);

        Ok(snapshot)
    }
}

#[async_trait::async_trait]
impl MonitorQueryTrait for HyprctlQuery {
    async fn query(&mut self) -> Result<TopologySnapshot> {
        self.get_monitors().await
    }
}
