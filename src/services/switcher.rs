use crate::config::Config;
use crate::error::Result;
use crate::events::{Classification, ConfigurationState};
use crate::services::bar_launcher::{BarLauncherTrait, TerminationOutcome};
use crate::services::debouncer::{AppliedState, Decision, Debouncer};
use crate::services::monitor_query::MonitorQueryTrait;
use crate::services::Classifier;
use crate::debug_if_enabled;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Итог обработки одного тика
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuationResult {
    NoAction,
    Pending {
        candidate: ConfigurationState,
        count: u32,
    },
    Restarted {
        state: ConfigurationState,
        pid: Option<u32>,
    },
}

/// Связывает опрос мониторов, классификацию, антидребезг и перезапуск панели
pub struct BarSwitcher {
    query: Box<dyn MonitorQueryTrait + Send + Sync>,
    launcher: Box<dyn BarLauncherTrait + Send + Sync>,
    classifier: Classifier,
    debouncer: Debouncer,
    process_name: String,
    restart_delay: Duration,
}

impl BarSwitcher {
    pub fn new(
        config: &Config,
        query: Box<dyn MonitorQueryTrait + Send + Sync>,
        launcher: Box<dyn BarLauncherTrait + Send + Sync>,
    ) -> Self {
        info!(
            "Инициализация BarSwitcher (порог стабильности: {} тиков)",
            config.polling.stable_threshold
        );

        Self {
            query,
            launcher,
            classifier: Classifier::new(config),
            debouncer: Debouncer::new(config.polling.stable_threshold),
            process_name: config.bar.process_name.clone(),
            restart_delay: config.restart_delay(),
        }
    }

    pub fn applied_state(&self) -> &AppliedState {
        self.debouncer.state()
    }

    /// Один тик: опрос, классификация, возможный перезапуск.
    /// Ошибки запроса не меняют состояние.
    pub async fn tick(&mut self) -> Result<ActuationResult> {
        let snapshot = self.query.query().await?;
        let classification = self.classifier.classify(&snapshot);
        debug_if_enabled!("Топология {} -> {}", snapshot, classification);

        self.observe(classification).await
    }

    pub async fn observe(&mut self, classification: Classification) -> Result<ActuationResult> {
        match self.debouncer.observe(classification.state) {
            Decision::Reset | Decision::Applied => Ok(ActuationResult::NoAction),
            Decision::Pending { candidate, count } => {
                debug!("Кандидат {} стабилен {} тиков подряд", candidate, count);
                Ok(ActuationResult::Pending { candidate, count })
            }
            Decision::Actuate(state) => {
                let Some(config_path) = classification.config_path else {
                    warn!("Для конфигурации {} не задан путь, перезапуск пропущен", state);
                    return Ok(ActuationResult::NoAction);
                };

                info!(
                    "Обнаружена смена конфигурации: {} (предыдущая: {}). Перезапускаем {}...",
                    state,
                    self.debouncer.state().last_config,
                    self.process_name
                );

                match self.restart(&config_path).await {
                    Ok(pid) => {
                        self.debouncer.mark_applied(state);
                        info!("{} перезапущен с конфигурацией {}", self.process_name, state);
                        Ok(ActuationResult::Restarted { state, pid })
                    }
                    Err(e) => {
                        error!(
                            "Ошибка перезапуска {} с конфигурацией {}: {}",
                            self.process_name, state, e
                        );
                        Err(e)
                    }
                }
            }
        }
    }

    /// Строго последовательно: завершить старую панель, затем запустить новую
    async fn restart(&self, config_path: &Path) -> Result<Option<u32>> {
        match self.launcher.terminate(&self.process_name).await {
            TerminationOutcome::Terminated => debug!("Старый процесс {} завершён", self.process_name),
            outcome => warn!(
                "Не удалось завершить {} (возможно, он не запущен): {}",
                self.process_name, outcome
            ),
        }

        if !self.restart_delay.is_zero() {
            tokio::time::sleep(self.restart_delay).await;
        }

        let pid = self.launcher.launch(config_path).await?;
        match pid {
            Some(pid) => info!(
                "Запущен {} (PID {}) с конфигом {}",
                self.process_name,
                pid,
                config_path.display()
            ),
            None => info!(
                "Запущен {} с конфигом {}",
                self.process_name,
                config_path.display()
            ),
        }

        Ok(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwitchError;
    use crate::services::test_support::{
        external_topology, internal_topology, repeat, LauncherCall, RecordingLauncher, ScriptedQuery,
    };
    use crate::events::TopologySnapshot;
    use ConfigurationState::{External, Internal, Unset};

    fn switcher_with(
        topologies: Vec<Result<TopologySnapshot>>,
        launcher: RecordingLauncher,
    ) -> BarSwitcher {
        BarSwitcher::new(
            &Config::default(),
            Box::new(ScriptedQuery::new(topologies)),
            Box::new(launcher),
        )
    }

    async fn run_ticks(switcher: &mut BarSwitcher, count: usize) -> Vec<Result<ActuationResult>> {
        let mut results = Vec::new();
        for _ in 0..count {
            results.push(switcher.tick().await);
        }
        results
    }

    #[test]
    fn test_switcher_can_move_into_spawned_task() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BarSwitcher>();

        let mut switcher = switcher_with(Vec::new(), RecordingLauncher::new());
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .unwrap();
        let result = runtime.block_on(async move {
            tokio::spawn(async move { switcher.tick().await.is_err() }).await
        });
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn test_three_internal_ticks_restart_once() {
        let launcher = RecordingLauncher::new();
        let mut switcher = switcher_with(repeat(internal_topology, 3), launcher.clone());

        let results = run_ticks(&mut switcher, 3).await;

        assert_eq!(launcher.launches(), 1);
        assert!(matches!(results[0], Ok(ActuationResult::Pending { count: 1, .. })));
        assert!(matches!(results[1], Ok(ActuationResult::Pending { count: 2, .. })));
        assert!(matches!(
            results[2],
            Ok(ActuationResult::Restarted { state: Internal, .. })
        ));
        assert_eq!(switcher.applied_state().last_config, Internal);

        let config = Config::default();
        assert_eq!(
            launcher.calls(),
            vec![
                LauncherCall::Terminate("waybar".to_string()),
                LauncherCall::Launch(config.bar.internal_config),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_restarts_while_stable() {
        let launcher = RecordingLauncher::new();
        let mut switcher = switcher_with(repeat(internal_topology, 10), launcher.clone());

        run_ticks(&mut switcher, 10).await;
        assert_eq!(launcher.launches(), 1);
    }

    #[tokio::test]
    async fn test_unset_tick_resets_and_external_fires_on_fifth_tick() {
        let launcher = RecordingLauncher::new();
        let lone_unknown = TopologySnapshot::from_descriptions(["BOE 0x0747"]);
        let mut switcher = switcher_with(
            vec![
                Ok(external_topology()),
                Ok(lone_unknown),
                Ok(external_topology()),
                Ok(external_topology()),
                Ok(external_topology()),
            ],
            launcher.clone(),
        );

        let results = run_ticks(&mut switcher, 5).await;

        assert_eq!(results[1].as_ref().unwrap(), &ActuationResult::NoAction);
        for result in &results[..4] {
            assert!(!matches!(result, Ok(ActuationResult::Restarted { .. })));
        }
        assert!(matches!(
            results[4],
            Ok(ActuationResult::Restarted { state: External, .. })
        ));
        assert_eq!(launcher.launches(), 1);
    }

    #[tokio::test]
    async fn test_query_failure_leaves_state_unchanged() {
        let launcher = RecordingLauncher::new();
        let decode = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let mut switcher = switcher_with(
            vec![
                Ok(internal_topology()),
                Ok(internal_topology()),
                Err(crate::switch_error!(query, "hyprctl: нет сокета")),
                Err(SwitchError::Decode(decode)),
                Ok(internal_topology()),
            ],
            launcher.clone(),
        );

        let results = run_ticks(&mut switcher, 4).await;
        assert!(results[2].as_ref().unwrap_err().is_query_failure());
        assert!(results[3].as_ref().unwrap_err().is_query_failure());
        assert_eq!(switcher.applied_state().stable_count, 2);

        // Ошибки запроса не прерывают накопление стабильности
        let last = switcher.tick().await.unwrap();
        assert!(matches!(last, ActuationResult::Restarted { state: Internal, .. }));
    }

    #[tokio::test]
    async fn test_launch_failure_retries_on_next_tick() {
        let launcher = RecordingLauncher::failing(1);
        let mut switcher = switcher_with(repeat(external_topology, 6), launcher.clone());

        let results = run_ticks(&mut switcher, 3).await;
        assert!(matches!(results[2], Err(SwitchError::Launch(_))));
        assert_eq!(switcher.applied_state().last_config, Unset);

        // Счётчик уже за порогом - повтор сразу на следующем тике
        let retry = switcher.tick().await.unwrap();
        assert!(matches!(retry, ActuationResult::Restarted { state: External, .. }));
        assert_eq!(switcher.applied_state().last_config, External);

        run_ticks(&mut switcher, 2).await;
        assert_eq!(launcher.launches(), 2);
    }

    #[tokio::test]
    async fn test_termination_failure_does_not_block_launch() {
        let launcher = RecordingLauncher::new().with_termination(TerminationOutcome::NotRunning {
            status: Some(1),
        });
        let mut switcher = switcher_with(repeat(internal_topology, 3), launcher.clone());

        let results = run_ticks(&mut switcher, 3).await;
        assert!(matches!(results[2], Ok(ActuationResult::Restarted { .. })));
        assert_eq!(launcher.launches(), 1);
    }

    #[tokio::test]
    async fn test_switches_between_topologies() {
        let launcher = RecordingLauncher::new();
        let mut topologies = repeat(internal_topology, 3);
        topologies.extend(repeat(external_topology, 3));
        topologies.extend(repeat(internal_topology, 3));
        let mut switcher = switcher_with(topologies, launcher.clone());

        run_ticks(&mut switcher, 9).await;

        let config = Config::default();
        let launched: Vec<_> = launcher
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                LauncherCall::Launch(path) => Some(path),
                LauncherCall::Terminate(_) => None,
            })
            .collect();
        assert_eq!(
            launched,
            vec![
                config.bar.internal_config.clone(),
                config.bar.external_config,
                config.bar.internal_config,
            ]
        );
    }
}
