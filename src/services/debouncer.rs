use crate::events::ConfigurationState;

/// Состояние, переживающее тики: что применено и сколько тиков подряд держится кандидат
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedState {
    /// Конфигурация, с которой панель реально перезапущена
    pub last_config: ConfigurationState,
    pub pending: Option<ConfigurationState>,
    pub stable_count: u32,
}

/// Решение по одному тику
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Топология не распознана, счётчик сброшен
    Reset,
    /// Текущая конфигурация уже применена
    Applied,
    Pending {
        candidate: ConfigurationState,
        count: u32,
    },
    Actuate(ConfigurationState),
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    threshold: u32,
    state: AppliedState,
}

impl Debouncer {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            state: AppliedState::default(),
        }
    }

    pub fn state(&self) -> &AppliedState {
        &self.state
    }

    pub fn observe(&mut self, current: ConfigurationState) -> Decision {
        if current == ConfigurationState::Unset {
            self.clear_pending();
            return Decision::Reset;
        }

        // Повторное подтверждение применённой конфигурации прерывает кандидата
        if current == self.state.last_config {
            self.clear_pending();
            return Decision::Applied;
        }

        if self.state.pending == Some(current) {
            self.state.stable_count = self.state.stable_count.saturating_add(1);
        } else {
            self.state.pending = Some(current);
            self.state.stable_count = 1;
        }

        // После неудачного запуска счётчик остаётся за порогом: повтор на каждом тике
        if self.state.stable_count >= self.threshold {
            Decision::Actuate(current)
        } else {
            Decision::Pending {
                candidate: current,
                count: self.state.stable_count,
            }
        }
    }

    /// Фиксирует успешный перезапуск панели
    pub fn mark_applied(&mut self, applied: ConfigurationState) {
        self.state.last_config = applied;
        self.clear_pending();
    }

    fn clear_pending(&mut self) {
        self.state.pending = None;
        self.state.stable_count = 0;
    }
}
