use std::net::SocketAddr;

pub const INBOUND_CAP: usize = 256;
pub const OUTBOUND_CAP: usize = 256;

pub enum InboundMsg {
    ClientConnected { socket_addr: SocketAddr },
    ClientDisconnected,
    /// Host notification that the page selection changed.
    SelectionChanged,
    Request { req: UiRequest },
}

pub enum OutboundMsg {
    Send { event: PluginEvent },
}

pub use symbols_protocol::{
    ErrorCode, NodeKind, ParameterSet, PluginEvent, ProgressPhase, SelectableNode, StyleFamily,
    UiRequest, DEFAULT_GRADE, DEFAULT_WEIGHT,
};
