//! Core of the Material Symbols updater: keeps the design document's icon components in
//! sync with the published icon set.

pub mod config;
pub mod fetcher;
pub mod host_api;
pub mod identifier;
pub mod main_loop;
pub mod memory_host;
pub mod net;
pub mod orchestrator;
pub mod protocol;
pub mod replacer;
pub mod selection;
pub mod settings;
pub mod url_builder;

pub use crate::config::PluginConfig;
pub use crate::fetcher::{FetchError, HttpFetcher, IconFetcher};
pub use crate::host_api::{DocumentHost, HostError, HostNode, HostNodeType, NodeId};
pub use crate::main_loop::MainLoop;
pub use crate::memory_host::MemoryDocument;
pub use crate::net::{BridgeError, NetworkThread};
pub use crate::orchestrator::{run_update, RunState, UpdateError, UpdateRequest};
pub use crate::protocol::{InboundMsg, OutboundMsg, INBOUND_CAP, OUTBOUND_CAP};
pub use crate::settings::{JsonFileStore, MemoryStore, SettingsError, SettingsStore};
pub use crate::url_builder::{build_icon_url, DEFAULT_BASE_URL};

use tracing_subscriber::EnvFilter;

/// Installs the `RUST_LOG`-driven subscriber used by the binaries.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
