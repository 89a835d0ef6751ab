//! MonitorQuery: получение списка мониторов от композитора.
//!
//! Модуль отвечает ТОЛЬКО за запуск команды композитора и разбор её ответа
//! в TopologySnapshot. Классификация и решение о перезапуске панели
//! находятся в Classifier и BarSwitcher.

mod dry_monitor_query;
mod hyprctl;
mod r#trait;

pub use self::r#trait::{create_monitor_query, MonitorQueryTrait};
