mod dry_bar_launcher;
mod process;
mod r#trait;

pub use self::r#trait::{create_bar_launcher, BarLauncherTrait, TerminationOutcome};
