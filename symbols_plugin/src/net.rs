use crate::config::DEFAULT_UI_ADDR;
use crate::protocol::{ErrorCode, InboundMsg, OutboundMsg, PluginEvent, UiRequest};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use tungstenite::protocol::Message;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("ui bridge bind failed on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("ui bridge io error: {0}")]
    Io(#[from] std::io::Error),
}

struct ActiveClient {
    ws: tungstenite::WebSocket<TcpStream>,
    socket_addr: SocketAddr,
}

/// WebSocket bridge between the UI surface and the main loop. One client at a time; a new
/// connection replaces the previous one.
pub struct NetworkThread {
    shutdown: Arc<AtomicBool>,
    join_handle: Mutex<Option<JoinHandle<()>>>,
    listen_addr: SocketAddr,
}

impl NetworkThread {
    pub fn spawn(in_tx: Sender<InboundMsg>, out_rx: Receiver<OutboundMsg>) -> Result<Self, BridgeError> {
        Self::spawn_with_addr(DEFAULT_UI_ADDR, in_tx, out_rx)
    }

    pub fn spawn_with_addr(
        addr: &str,
        in_tx: Sender<InboundMsg>,
        out_rx: Receiver<OutboundMsg>,
    ) -> Result<Self, BridgeError> {
        let listener = TcpListener::bind(addr).map_err(|source| BridgeError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        listener.set_nonblocking(true)?;
        let listen_addr = listener.local_addr()?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_for_thread = Arc::clone(&shutdown);

        let join_handle =
            thread::spawn(move || run_server(listener, in_tx, out_rx, shutdown_for_thread));

        Ok(Self {
            shutdown,
            join_handle: Mutex::new(Some(join_handle)),
            listen_addr,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Ok(mut h) = self.join_handle.lock() {
            if let Some(h) = h.take() {
                let _ = h.join();
            }
        }
    }
}

impl Drop for NetworkThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_server(
    listener: TcpListener,
    in_tx: Sender<InboundMsg>,
    out_rx: Receiver<OutboundMsg>,
    shutdown: Arc<AtomicBool>,
) {
    let mut active: Option<ActiveClient> = None;

    while !shutdown.load(Ordering::Relaxed) {
        loop {
            match listener.accept() {
                Ok((stream, socket_addr)) => {
                    // The accepted socket must block (with timeouts) for the handshake.
                    let _ = stream.set_nonblocking(false);
                    let _ = stream.set_nodelay(true);
                    let _ = stream.set_read_timeout(Some(Duration::from_millis(30)));
                    let _ = stream.set_write_timeout(Some(Duration::from_millis(200)));

                    let ws = match tungstenite::accept(stream) {
                        Ok(ws) => ws,
                        Err(e) => {
                            warn!("ui handshake failed: {e}");
                            continue;
                        }
                    };

                    if let Some(mut prev) = active.take() {
                        debug!(addr = %prev.socket_addr, "replacing ui client");
                        let _ = prev.ws.close(None);
                        let _ = in_tx.try_send(InboundMsg::ClientDisconnected);
                    }

                    if in_tx
                        .try_send(InboundMsg::ClientConnected { socket_addr })
                        .is_err()
                    {
                        let mut ws = ws;
                        let _ = send_event(&mut ws, &busy_error());
                        let _ = ws.close(None);
                        continue;
                    }

                    active = Some(ActiveClient { ws, socket_addr });
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    warn!("ui accept failed: {e}");
                    break;
                }
            }
        }

        if let Some(client) = active.as_mut() {
            loop {
                match out_rx.try_recv() {
                    Ok(OutboundMsg::Send { event }) => {
                        if send_event(&mut client.ws, &event).is_err() {
                            let _ = client.ws.close(None);
                            active = None;
                            let _ = in_tx.try_send(InboundMsg::ClientDisconnected);
                            break;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }
        }

        // At most one inbound frame per pass; the read timeout keeps the loop moving.
        if let Some(client) = active.as_mut() {
            match client.ws.read() {
                Ok(msg) => {
                    if handle_inbound(&in_tx, client, msg).is_err() {
                        let _ = client.ws.close(None);
                        active = None;
                        let _ = in_tx.try_send(InboundMsg::ClientDisconnected);
                    }
                }
                Err(tungstenite::Error::Io(e))
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(_) => {
                    active = None;
                    let _ = in_tx.try_send(InboundMsg::ClientDisconnected);
                }
            }
        } else {
            thread::sleep(Duration::from_millis(25));
        }
    }

    if let Some(mut client) = active {
        let _ = client.ws.close(None);
    }
}

fn handle_inbound(
    in_tx: &Sender<InboundMsg>,
    client: &mut ActiveClient,
    msg: Message,
) -> Result<(), ()> {
    let text = match msg {
        Message::Text(s) => s,
        Message::Binary(_) => return Ok(()),
        Message::Ping(payload) => {
            let _ = client.ws.send(Message::Pong(payload));
            return Ok(());
        }
        Message::Pong(_) => return Ok(()),
        Message::Close(_) => return Err(()),
        Message::Frame(_) => return Ok(()),
    };

    let req: UiRequest = match serde_json::from_str(&text) {
        Ok(r) => r,
        Err(e) => {
            let _ = send_event(
                &mut client.ws,
                &PluginEvent::Error {
                    msg: format!("invalid request: {e}"),
                    code: ErrorCode::InvalidRequest,
                },
            );
            return Ok(());
        }
    };

    let droppable = matches!(req, UiRequest::GetSelection | UiRequest::Resize { .. });
    if in_tx.try_send(InboundMsg::Request { req }).is_err() && !droppable {
        let _ = send_event(&mut client.ws, &busy_error());
    }

    Ok(())
}

fn busy_error() -> PluginEvent {
    PluginEvent::Error {
        msg: "plugin busy".to_string(),
        code: ErrorCode::Busy,
    }
}

fn send_event(ws: &mut tungstenite::WebSocket<TcpStream>, event: &PluginEvent) -> Result<(), ()> {
    let payload = serde_json::to_string(event).map_err(|_| ())?;
    ws.send(Message::Text(payload.into())).map_err(|_| ())
}
