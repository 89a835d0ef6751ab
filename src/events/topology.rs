use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Один монитор из ответа композитора
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorReport {
    pub description: String,
}

impl MonitorReport {
    pub fn new(description: impl AsRef<str>) -> Self {
        Self {
            description: description.as_ref().trim().to_string(),
        }
    }
}

impl fmt::Display for MonitorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.description)
    }
}

/// Мониторы одного опроса в порядке, в котором их вернул композитор
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologySnapshot {
    pub monitors: Vec<MonitorReport>,
}

impl TopologySnapshot {
    pub fn new(monitors: Vec<MonitorReport>) -> Self {
        Self { monitors }
    }

    pub fn from_descriptions<I, S>(descriptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(descriptions.into_iter().map(MonitorReport::new).collect())
    }

    /// Разбор JSON-массива `hyprctl monitors -j`. Используется только поле `description`
    pub fn from_json(payload: &[u8]) -> serde_json::Result<Self> {
        let monitors: Vec<MonitorReport> = serde_json::from_slice(payload)?;
        Ok(Self::from_descriptions(
            monitors.into_iter().map(|m| m.description),
        ))
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.monitors.iter().map(|m| m.description.as_str())
    }
}

impl fmt::Display for TopologySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.monitors.iter().map(|m| m.to_string()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Распознанная конфигурация мониторов
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationState {
    #[default]
    Unset,
    Internal,
    External,
}

impl fmt::Display for ConfigurationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigurationState::Unset => "unset",
            ConfigurationState::Internal => "internal",
            ConfigurationState::External => "external",
        };
        f.write_str(name)
    }
}

/// Результат классификации: состояние и путь к конфигу панели (нет пути для Unset)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub state: ConfigurationState,
    pub config_path: Option<PathBuf>,
}

impl Classification {
    pub fn unset() -> Self {
        Self {
            state: ConfigurationState::Unset,
            config_path: None,
        }
    }

    pub fn recognized(state: ConfigurationState, config_path: PathBuf) -> Self {
        debug_assert!(state != ConfigurationState::Unset);
        Self {
            state,
            config_path: Some(config_path),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.config_path {
            Some(path) => write!(f, "{} ({})", self.state, path.display()),
            None => write!(f, "{}", self.state),
        }
    }
}
