//! Domain facades.
//!
//! These combine the derivation engine with configuration, snapshot files,
//! and the task backend.

mod config;
mod snapshot;
mod tasks;
mod view;

pub use config::{apply_setting, ConfigDomain, CONFIG_KEYS};
pub use snapshot::{parse_snapshot, read_snapshot};
pub use tasks::TasksDomain;
pub use view::{compose_view, compose_view_in, ViewComposer};
