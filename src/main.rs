use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::Config;
use services::{
    create_bar_launcher,
    create_monitor_query,
    BarSwitcher,
    IntervalTicks,
    PollingLoop,
};

#[derive(Parser, Debug)]
#[command(name = "bar-switcher")]
#[command(about = "Перезапускает waybar с конфигурацией под подключённые мониторы")]
struct Args {
    /// Путь к файлу конфигурации (необязательный)
    #[arg(short, long, default_value = "bar-switcher.toml")]
    config: String,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск bar-switcher v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    } else {
        utils::environment::check_environment(&config);
    }

    let query = create_monitor_query(config.clone(), args.dry_run)
        .context("Не удалось создать источник списка мониторов")?;
    let launcher = create_bar_launcher(config.clone(), args.dry_run)
        .context("Не удалось создать запускатель панели")?;
    let switcher = BarSwitcher::new(&config, query, launcher);

    let polling = PollingLoop::new(IntervalTicks::new(config.poll_interval()), switcher);
    let handle = polling.start();

    info!("Опрос мониторов каждые {:?}", config.poll_interval());

    // Ожидание сигнала завершения
    match wait_for_shutdown().await {
        Ok(signal) => info!("Получен сигнал завершения ({})", signal),
        Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
    }

    info!("Завершение работы...");
    handle.stop();

    // Запущенная панель отсоединена и продолжает работать
    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    match tokio::time::timeout(shutdown_timeout, handle.join()).await {
        Ok(Ok((switcher, _))) => info!(
            "Цикл опроса завершён, применённая конфигурация: {}",
            switcher.applied_state().last_config
        ),
        Ok(Err(e)) => error!("Цикл опроса завершился аварийно: {}", e),
        Err(_) => warn!("Таймаут при завершении цикла опроса"),
    }

    info!("bar-switcher завершил работу");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|_| "Ctrl+C"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "Ctrl+C")
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let fmt_layer = tracing_subscriber::fmt::layer();
    let fmt_layer = match format {
        "pretty" => fmt_layer.pretty().boxed(),
        _ => fmt_layer.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
