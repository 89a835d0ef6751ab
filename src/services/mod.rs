pub mod bar_launcher;
pub mod classifier;
pub mod command;
pub mod debouncer;
pub mod monitor_query;
pub mod polling_loop;
pub mod switcher;

#[cfg(test)]
pub mod test_support;

pub use bar_launcher::create_bar_launcher;
pub use classifier::Classifier;
pub use monitor_query::create_monitor_query;
pub use polling_loop::{IntervalTicks, PollingLoop};
pub use switcher::BarSwitcher;
