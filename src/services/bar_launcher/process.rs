use crate::config::Config;
use crate::error::{Result, SwitchError};
use crate::services::command::output_with_timeout;
use crate::switch_error;
use std::path::Path;
use std::process::{Output, Stdio};
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

use super::r#trait::{BarLauncherTrait, TerminationOutcome};

/// Код выхода pkill, когда ни один процесс не совпал
const PKILL_NO_MATCH: i32 = 1;

pub struct ProcessBarLauncher {
    config: Arc<Config>,
}

impl ProcessBarLauncher {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn create_launch_command(&self, config_path: &Path) -> Command {
        let mut cmd = Command::new(&self.config.bar.binary);
        cmd.arg("--config").arg(config_path).stdin(Stdio::null());
        detach(&mut cmd);
        cmd
    }
}

/// Отдельная группа процессов: сигналы группе демона не доходят до панели
#[cfg(unix)]
fn detach(cmd: &mut Command) {
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn detach(_cmd: &mut Command) {}

fn termination_outcome(kill_command: &str, output: &Output) -> TerminationOutcome {
    if output.status.success() {
        return TerminationOutcome::Terminated;
    }

    match output.status.code() {
        Some(PKILL_NO_MATCH) => TerminationOutcome::NotRunning {
            status: Some(PKILL_NO_MATCH),
        },
        Some(code) => TerminationOutcome::Failed {
            reason: format!(
                "{} вернул код {}: {}",
                kill_command,
                code,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        },
        // Без кода выхода - процесс убит сигналом
        None => TerminationOutcome::Failed {
            reason: format!("{} прерван: {}", kill_command, output.status),
        },
    }
}

#[async_trait::async_trait]
impl BarLauncherTrait for ProcessBarLauncher {
    async fn terminate(&self, process_name: &str) -> TerminationOutcome {
        let kill_command = &self.config.bar.kill_command;

        let mut cmd = Command::new(kill_command);
        cmd.args(["-x", process_name]);

        match output_with_timeout(cmd, kill_command, self.config.command_timeout()).await {
            Ok(output) => termination_outcome(kill_command, &output),
            Err(SwitchError::Io(e)) => TerminationOutcome::Failed {
                reason: format!("{} не найден: {}", kill_command, e),
            },
            Err(e) => TerminationOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    async fn launch(&self, config_path: &Path) -> Result<Option<u32>> {
        let binary = &self.config.bar.binary;
        debug!("Запускаем {} --config {}", binary, config_path.display());

        // Дочерний процесс не ожидается: tokio сам подберёт его после выхода
        let child = self
            .create_launch_command(config_path)
            .spawn()
            .map_err(|e| switch_error!(launch, "{}: {}", binary, e))?;

        Ok(child.id())
    }
}
