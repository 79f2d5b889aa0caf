#![doc = include_str!("../README.md")]

pub mod config;
pub mod controller;
pub mod events;
pub mod forms;
pub mod host;
pub mod language;
pub mod menu;
pub mod scroll;
mod utils;

#[cfg(feature = "client")]
mod frontend;

#[cfg(feature = "diagnostics")]
pub use self::frontend::setup_logging;

pub mod prelude {
    pub use crate::config::PageConfig;
    pub use crate::controller::PageController;
    pub use crate::controller::run_when_ready;
    pub use crate::events::EventRegistry;
    pub use crate::host::EventKind;
    pub use crate::host::EventSource;
    pub use crate::host::Host;
    pub use crate::host::HostError;
    pub use crate::host::PageElement;
    pub use crate::host::PageEvent;
    pub use crate::language::Locale;
}
