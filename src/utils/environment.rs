use crate::config::Config;
use crate::trace_if_enabled;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Проверить окружение сессии. Все находки - предупреждения, запуск не прерывается.
pub fn check_environment(config: &Config) -> Vec<String> {
    info!("Проверка окружения...");

    let mut warnings = Vec::new();

    for binary in [
        &config.compositor.command,
        &config.bar.kill_command,
        &config.bar.binary,
    ] {
        match find_executable(binary) {
            Some(path) => info!("{} найден: {}", binary, path.display()),
            None => warnings.push(format!("{} не найден в PATH", binary)),
        }
    }

    if is_hyprctl(&config.compositor.command)
        && std::env::var_os("HYPRLAND_INSTANCE_SIGNATURE").is_none()
    {
        warnings.push(
            "HYPRLAND_INSTANCE_SIGNATURE не задан - hyprctl не сможет подключиться к Hyprland"
                .to_string(),
        );
    }

    for warning in &warnings {
        warn!("⚠️  {}", warning);
    }

    if warnings.is_empty() {
        info!("Проверка окружения завершена успешно");
    }

    warnings
}

fn is_hyprctl(command: &str) -> bool {
    Path::new(command)
        .file_name()
        .map(|name| name == "hyprctl")
        .unwrap_or(false)
}

/// Ищет исполняемый файл так же, как это делает shell
pub fn find_executable(binary: &str) -> Option<PathBuf> {
    if binary.contains('/') {
        let path = PathBuf::from(binary);
        return is_executable(&path).then_some(path);
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(binary))
        .find(|candidate| {
            trace_if_enabled!("Проверяем {}", candidate.display());
            is_executable(candidate)
        })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
