use crate::error::{Result, SwitchError};
use crate::switch_error;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Запускает внешнюю команду и ждёт её завершения не дольше `timeout`.
/// Процесс убивается, если время вышло.
pub async fn output_with_timeout(mut cmd: Command, label: &str, timeout: Duration) -> Result<Output> {
    cmd.kill_on_drop(true);

    debug!("Выполняем {} (таймаут {:?})", label, timeout);

    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(SwitchError::Io(e)),
        Err(_) => Err(switch_error!(timeout, "{} не завершился за {:?}", label, timeout)),
    }
}
