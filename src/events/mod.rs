pub mod topology;

pub use topology::{Classification, ConfigurationState, TopologySnapshot};
