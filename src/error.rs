use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка запроса мониторов: {0}")]
    Query(String),

    #[error("Некорректный ответ композитора: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Не удалось запустить панель: {0}")]
    Launch(String),

    #[error("Превышено время ожидания: {0}")]
    Timeout(String),
}

impl SwitchError {
    /// Ошибки, после которых тик просто пропускается
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            SwitchError::Query(_) | SwitchError::Decode(_) | SwitchError::Timeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SwitchError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! switch_error {
    (query, $($arg:tt)*) => {
        $crate::error::SwitchError::Query(format!($($arg)*))
    };
    (launch, $($arg:tt)*) => {
        $crate::error::SwitchError::Launch(format!($($arg)*))
    };
    (timeout, $($arg:tt)*) => {
        $crate::error::SwitchError::Timeout(format!($($arg)*))
    };
}
