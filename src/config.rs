use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub compositor: CompositorConfig,
    pub monitors: MonitorsConfig,
    pub bar: BarConfig,
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Команда, возвращающая список мониторов в JSON
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompositorConfig {
    pub command: String,
    pub args: Vec<String>,
}

/// Идентификаторы известных мониторов (поле `description` у hyprctl)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonitorsConfig {
    pub internal_description: String,
    pub external_description: String,
    pub external_monitor_count: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BarConfig {
    /// Точное имя процесса для pkill -x
    pub process_name: String,
    pub binary: String,
    pub kill_command: String,
    pub internal_config: PathBuf,
    pub external_config: PathBuf,
    #[serde(default)]
    pub restart_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollingConfig {
    pub interval_ms: u64,
    pub stable_threshold: u32,
    pub command_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let waybar_dir = waybar_config_dir();

        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            compositor: CompositorConfig {
                command: "hyprctl".to_string(),
                args: vec!["monitors".to_string(), "-j".to_string()],
            },
            monitors: MonitorsConfig {
                internal_description: "Chimei Innolux Corporation 0x1777".to_string(),
                external_description: "Dell Inc. DELL U2419H 2MSF7R2".to_string(),
                external_monitor_count: 4,
            },
            bar: BarConfig {
                process_name: "waybar".to_string(),
                binary: "waybar".to_string(),
                kill_command: "pkill".to_string(),
                internal_config: waybar_dir.join("config-internal-monitor"),
                external_config: waybar_dir.join("config-ext-monitor"),
                restart_delay_ms: 0,
            },
            polling: PollingConfig {
                interval_ms: 1000,
                stable_threshold: 3,
                command_timeout_ms: 5000,
            },
        }
    }
}

fn waybar_config_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config/waybar"),
        None => PathBuf::from(".config/waybar"),
    }
}

impl Config {
    /// Встроенные значения, затем TOML-файл (необязательный), затем переменные BAR_SWITCHER_*
    pub fn figment<P: AsRef<Path>>(config_path: P) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path.as_ref()))
            .merge(Env::prefixed("BAR_SWITCHER_").split("__"))
    }

    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        Self::from_figment(Self::figment(config_path))
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "pretty" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        if self.compositor.command.trim().is_empty() {
            anyhow::bail!("compositor.command не может быть пустым");
        }

        if self.monitors.external_monitor_count == 0 {
            anyhow::bail!("external_monitor_count должно быть больше 0");
        }

        if self.bar.process_name.trim().is_empty() {
            anyhow::bail!("bar.process_name не может быть пустым");
        }

        if self.bar.binary.trim().is_empty() {
            anyhow::bail!("bar.binary не может быть пустым");
        }

        if self.bar.kill_command.trim().is_empty() {
            anyhow::bail!("bar.kill_command не может быть пустым");
        }

        if self.polling.interval_ms < 100 {
            anyhow::bail!("interval_ms должно быть минимум 100");
        }

        if self.polling.stable_threshold == 0 {
            anyhow::bail!("stable_threshold должно быть больше 0");
        }

        if self.polling.command_timeout_ms == 0 {
            anyhow::bail!("command_timeout_ms должно быть больше 0");
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.polling.command_timeout_ms)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.bar.restart_delay_ms)
    }
}
