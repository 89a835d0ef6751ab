use crate::services::switcher::{ActuationResult, BarSwitcher};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Источник тиков опроса
#[async_trait::async_trait]
pub trait TickSource {
    /// Ждёт следующий тик; `false` - источник исчерпан
    async fn next_tick(&mut self) -> bool;
}

/// Тики по таймеру tokio. Пропущенные тики не догоняются.
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait::async_trait]
impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Статистика работы цикла
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub failures: u64,
    pub restarts: u64,
}

pub struct PollingLoop<S> {
    source: S,
    switcher: BarSwitcher,
}

/// Управление запущенным циклом
pub struct PollingHandle {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<(BarSwitcher, LoopStats)>,
}

impl<S> PollingLoop<S>
where
    S: TickSource + Send + 'static,
{
    pub fn new(source: S, switcher: BarSwitcher) -> Self {
        Self { source, switcher }
    }

    pub fn start(self) -> PollingHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(self.run(stop_rx));
        PollingHandle { stop_tx, handle }
    }

    async fn run(mut self, mut stop_rx: watch::Receiver<bool>) -> (BarSwitcher, LoopStats) {
        info!("Цикл опроса мониторов запущен");
        let mut stats = LoopStats::default();

        loop {
            tokio::select! {
                biased;
                // Ошибка changed() означает, что PollingHandle удалён
                _ = stop_rx.changed() => break,
                has_tick = self.source.next_tick() => {
                    if !has_tick {
                        debug!("Источник тиков исчерпан");
                        break;
                    }
                }
            }

            // Тик выполняется целиком, остановка проверяется только между тиками
            stats.ticks += 1;
            match self.switcher.tick().await {
                Ok(ActuationResult::Restarted { .. }) => stats.restarts += 1,
                Ok(_) => {}
                Err(e) if e.is_query_failure() => {
                    stats.failures += 1;
                    error!("Ошибка получения списка мониторов: {}", e);
                }
                Err(e) => {
                    // Ошибка перезапуска уже залогирована BarSwitcher
                    stats.failures += 1;
                    debug!("Тик {} завершился ошибкой: {}", stats.ticks, e);
                }
            }
        }

        info!(
            "Цикл опроса остановлен: тиков {}, ошибок {}, перезапусков {}",
            stats.ticks, stats.failures, stats.restarts
        );
        (self.switcher, stats)
    }
}

impl PollingHandle {
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    pub async fn join(self) -> Result<(BarSwitcher, LoopStats), tokio::task::JoinError> {
        self.handle.await
    }
}
