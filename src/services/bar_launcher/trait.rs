use crate::config::Config;
use crate::error::Result;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Итог попытки завершить старую панель. Ни один вариант не прерывает перезапуск.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationOutcome {
    Terminated,
    /// pkill не нашёл подходящих процессов
    NotRunning { status: Option<i32> },
    Failed { reason: String },
}

impl fmt::Display for TerminationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationOutcome::Terminated => write!(f, "процесс завершён"),
            TerminationOutcome::NotRunning { status: Some(code) } => {
                write!(f, "процесс не найден (код {})", code)
            }
            TerminationOutcome::NotRunning { status: None } => write!(f, "процесс не найден"),
            TerminationOutcome::Failed { reason } => write!(f, "{}", reason),
        }
    }
}

/// Trait for status bar launchers that can run in different modes
#[async_trait::async_trait]
pub trait BarLauncherTrait {
    /// Terminate every running process whose name matches exactly
    async fn terminate(&self, process_name: &str) -> TerminationOutcome;

    /// Start a detached bar process with the given config, returning its PID if known
    async fn launch(&self, config_path: &Path) -> Result<Option<u32>>;
}

/// Factory function to create an appropriate bar launcher based on the dry_run flag
pub fn create_bar_launcher(
    config: Arc<Config>,
    dry_run: bool,
) -> Result<Box<dyn BarLauncherTrait + Send + Sync>> {
    if dry_run {
        Ok(Box::new(super::dry_bar_launcher::DryRunBarLauncher::new(
            config,
        )))
    } else {
        Ok(Box::new(super::process::ProcessBarLauncher::new(config)))
    }
}
