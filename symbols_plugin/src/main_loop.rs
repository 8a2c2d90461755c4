use crate::config::DEFAULT_UI_SIZE;
use crate::fetcher::IconFetcher;
use crate::host_api::DocumentHost;
use crate::orchestrator::{self, RunState, UpdateRequest};
use crate::protocol::{InboundMsg, OutboundMsg, ParameterSet, PluginEvent, UiRequest};
use crate::selection::{self, SelectionSnapshot};
use crate::settings::{self, SettingsStore};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tracing::{debug, info};

pub struct MainLoop {
    inbound_rx: Receiver<InboundMsg>,
    outbound_tx: Sender<OutboundMsg>,
    fetcher: Box<dyn IconFetcher>,
    settings: Box<dyn SettingsStore>,
    base_url: String,

    params: ParameterSet,
    last_selection: SelectionSnapshot,
    run_state: RunState,
    clients_seen: usize,
}

impl MainLoop {
    pub fn new(
        inbound_rx: Receiver<InboundMsg>,
        outbound_tx: Sender<OutboundMsg>,
        fetcher: impl IconFetcher + 'static,
        settings: impl SettingsStore + 'static,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            inbound_rx,
            outbound_tx,
            fetcher: Box::new(fetcher),
            settings: Box::new(settings),
            base_url: base_url.into(),
            params: ParameterSet::default(),
            last_selection: SelectionSnapshot::default(),
            run_state: RunState::Idle,
            clients_seen: 0,
        }
    }

    /// Plugin startup: size the UI, restore parameters and publish the initial state.
    pub fn start(&mut self, api: &dyn DocumentHost) {
        let (width, height) = DEFAULT_UI_SIZE;
        api.resize_ui(width, height);

        self.params = settings::load_parameters(self.settings.as_ref());
        self.send(PluginEvent::SettingsLoaded {
            parameters: self.params,
        });
        self.refresh_selection(api);
    }

    /// Handles every queued message in arrival order. An update request is run to completion
    /// before the next message is looked at, so a second request queues behind the first.
    pub async fn tick(&mut self, api: &dyn DocumentHost) {
        loop {
            match self.inbound_rx.try_recv() {
                Ok(msg) => self.handle_inbound(api, msg).await,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    pub fn parameters(&self) -> ParameterSet {
        self.params
    }

    pub fn last_selection(&self) -> &SelectionSnapshot {
        &self.last_selection
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    async fn handle_inbound(&mut self, api: &dyn DocumentHost, msg: InboundMsg) {
        match msg {
            InboundMsg::ClientConnected { socket_addr } => {
                info!(%socket_addr, "ui connected");
                self.clients_seen += 1;
                // The first client receives the startup announcement still queued by `start`.
                if self.clients_seen > 1 {
                    self.send(PluginEvent::SettingsLoaded {
                        parameters: self.params,
                    });
                }
                self.send(self.last_selection.to_event());
            }
            InboundMsg::ClientDisconnected => debug!("ui disconnected"),
            InboundMsg::SelectionChanged => self.refresh_selection(api),
            InboundMsg::Request { req } => self.handle_request(api, req).await,
        }
    }

    pub async fn handle_request(&mut self, api: &dyn DocumentHost, req: UiRequest) {
        match req {
            UiRequest::GetSelection => self.refresh_selection(api),
            UiRequest::UpdateIcons { parameters, nodes } => {
                self.params = parameters.clamped();
                settings::save_parameters(self.settings.as_ref(), &self.params);

                let request = UpdateRequest {
                    parameters: self.params,
                    nodes,
                };
                let tx = self.outbound_tx.clone();
                let mut emit = |event: PluginEvent| {
                    let _ = tx.try_send(OutboundMsg::Send { event });
                };

                self.run_state = RunState::Running;
                self.run_state = orchestrator::run_update(
                    api,
                    self.fetcher.as_ref(),
                    &self.base_url,
                    &request,
                    &mut emit,
                )
                .await;
            }
            UiRequest::Resize { width, height } => api.resize_ui(width, height),
        }
    }

    fn refresh_selection(&mut self, api: &dyn DocumentHost) {
        self.last_selection = selection::scan_selection(api);
        self.send(self.last_selection.to_event());
    }

    fn send(&self, event: PluginEvent) {
        // Best-effort: a full queue means no UI is draining it.
        let _ = self.outbound_tx.try_send(OutboundMsg::Send { event });
    }
}
