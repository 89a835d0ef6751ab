//! Тестовые двойники для MonitorQuery и BarLauncher

use crate::error::Result;
use crate::events::TopologySnapshot;
use crate::services::bar_launcher::{BarLauncherTrait, TerminationOutcome};
use crate::services::monitor_query::MonitorQueryTrait;
use crate::switch_error;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const INTERNAL: &str = "Chimei Innolux Corporation 0x1777";
pub const EXTERNAL: &str = "Dell Inc. DELL U2419H 2MSF7R2";

pub fn internal_topology() -> TopologySnapshot {
    TopologySnapshot::from_descriptions([INTERNAL])
}

pub fn external_topology() -> TopologySnapshot {
    TopologySnapshot::from_descriptions([INTERNAL, "ASUS VG249", EXTERNAL, "BenQ GW2480"])
}

pub fn repeat(topology: fn() -> TopologySnapshot, count: usize) -> Vec<Result<TopologySnapshot>> {
    (0..count).map(|_| Ok(topology())).collect()
}

/// Отдаёт заранее заданные ответы по одному на тик
pub struct ScriptedQuery {
    responses: VecDeque<Result<TopologySnapshot>>,
}

impl ScriptedQuery {
    pub fn new(responses: Vec<Result<TopologySnapshot>>) -> Self {
        Self {
            responses: responses.into(),
        }
    }
}

#[async_trait::async_trait]
impl MonitorQueryTrait for ScriptedQuery {
    async fn query(&mut self) -> Result<TopologySnapshot> {
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(switch_error!(query, "сценарий исчерпан")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherCall {
    Terminate(String),
    Launch(PathBuf),
}

#[derive(Debug)]
struct LauncherState {
    calls: Vec<LauncherCall>,
    failures_left: usize,
    termination: TerminationOutcome,
}

/// Записывает вызовы; первые `failures` запусков завершаются ошибкой
#[derive(Debug, Clone)]
pub struct RecordingLauncher {
    state: Arc<Mutex<LauncherState>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::failing(0)
    }

    pub fn failing(failures: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(LauncherState {
                calls: Vec::new(),
                failures_left: failures,
                termination: TerminationOutcome::Terminated,
            })),
        }
    }

    pub fn with_termination(self, outcome: TerminationOutcome) -> Self {
        self.state.lock().termination = outcome;
        self
    }

    pub fn calls(&self) -> Vec<LauncherCall> {
        self.state.lock().calls.clone()
    }

    /// Число попыток запуска, включая неудачные
    pub fn launches(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, LauncherCall::Launch(_)))
            .count()
    }
}

#[async_trait::async_trait]
impl BarLauncherTrait for RecordingLauncher {
    async fn terminate(&self, process_name: &str) -> TerminationOutcome {
        let mut state = self.state.lock();
        state.calls.push(LauncherCall::Terminate(process_name.to_string()));
        state.termination.clone()
    }

    async fn launch(&self, config_path: &Path) -> Result<Option<u32>> {
        let mut state = self.state.lock();
        state.calls.push(LauncherCall::Launch(config_path.to_path_buf()));

        if state.failures_left > 0 {
            state.failures_left -= 1;
            return Err(switch_error!(launch, "waybar: No such file or directory"));
        }

        Ok(Some(4242))
    }
}
