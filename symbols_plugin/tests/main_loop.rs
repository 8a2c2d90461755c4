mod common;

use common::{MapFetcher, BASE_URL, TWO_SHAPES_SVG};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::net::{Ipv4Addr, SocketAddr};
use symbols_plugin::protocol::{ParameterSet, PluginEvent, StyleFamily, UiRequest};
use symbols_plugin::settings::load_parameters;
use symbols_plugin::{
    build_icon_url, HostNodeType, InboundMsg, JsonFileStore, MainLoop, MemoryDocument, MemoryStore,
    OutboundMsg, RunState,
};

struct Harness {
    in_tx: Sender<InboundMsg>,
    out_rx: Receiver<OutboundMsg>,
    main_loop: MainLoop,
}

fn harness(fetcher: MapFetcher, store: impl symbols_plugin::SettingsStore + 'static) -> Harness {
    let (in_tx, in_rx) = bounded(symbols_plugin::INBOUND_CAP);
    let (out_tx, out_rx) = bounded(symbols_plugin::OUTBOUND_CAP);
    Harness {
        in_tx,
        out_rx,
        main_loop: MainLoop::new(in_rx, out_tx, fetcher, store, BASE_URL),
    }
}

impl Harness {
    fn request(&self, req: UiRequest) {
        self.in_tx.try_send(InboundMsg::Request { req }).unwrap();
    }

    fn drain(&self) -> Vec<PluginEvent> {
        self.out_rx
            .try_iter()
            .map(|OutboundMsg::Send { event }| event)
            .collect()
    }
}

fn completions(events: &[PluginEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            PluginEvent::UpdateComplete { count } => Some(*count),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn start_restores_settings_and_reports_selection() {
    let store = MemoryStore::new();
    let saved = ParameterSet {
        style: StyleFamily::Rounded,
        fill: true,
        ..ParameterSet::default()
    };
    symbols_plugin::settings::save_parameters(&store, &saved);

    let doc = MemoryDocument::new();
    let comp = doc.add_node(None, "home", HostNodeType::Component);
    doc.set_selection(&[comp.as_str()]);

    let mut h = harness(MapFetcher::new(), store);
    h.main_loop.start(&doc);

    assert_eq!(doc.ui_size(), Some((320, 480)));
    assert_eq!(h.main_loop.parameters(), saved);
    let events = h.drain();
    assert_eq!(events[0], PluginEvent::SettingsLoaded { parameters: saved });
    match &events[1] {
        PluginEvent::SelectionChanged {
            nodes,
            has_unsupported_nodes,
        } => {
            assert_eq!(nodes.len(), 1);
            assert!(!has_unsupported_nodes);
        }
        other => panic!("expected selection-changed, got: {other:?}"),
    }
}

#[tokio::test]
async fn update_request_persists_clamped_parameters_and_runs() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");

    let doc = MemoryDocument::new();
    let comp = doc.add_node(None, "home", HostNodeType::Component);
    doc.set_selection(&[comp.as_str()]);

    let sent = ParameterSet {
        weight: 1000,
        size: 24,
        ..ParameterSet::default()
    };
    let stored = sent.clamped();
    let fetcher = MapFetcher::new().with(build_icon_url(BASE_URL, "home", &stored), TWO_SHAPES_SVG);

    let mut h = harness(fetcher, JsonFileStore::new(&settings_path));
    h.main_loop.start(&doc);
    let nodes = h.main_loop.last_selection().nodes.clone();
    h.drain();

    h.request(UiRequest::UpdateIcons {
        parameters: sent,
        nodes,
    });
    h.main_loop.tick(&doc).await;

    assert_eq!(h.main_loop.parameters().weight, 700);
    assert_eq!(load_parameters(&JsonFileStore::new(&settings_path)), stored);
    assert_eq!(h.main_loop.run_state(), &RunState::Completed { count: 1 });
    assert_eq!(completions(&h.drain()), vec![1]);
    assert_eq!(doc.child_names(&comp), vec!["path", "circle"]);
}

#[tokio::test]
async fn queued_update_requests_run_one_after_another() {
    let doc = MemoryDocument::new();
    let a = doc.add_node(None, "home", HostNodeType::Component);
    let b = doc.add_node(None, "search", HostNodeType::Component);
    let params = ParameterSet::default();
    let fetcher = MapFetcher::new()
        .with(build_icon_url(BASE_URL, "home", &params), TWO_SHAPES_SVG)
        .with(build_icon_url(BASE_URL, "search", &params), TWO_SHAPES_SVG);
    let requested = fetcher.requested.clone();

    let mut h = harness(fetcher, MemoryStore::new());

    doc.set_selection(&[a.as_str(), b.as_str()]);
    h.request(UiRequest::GetSelection);
    h.main_loop.tick(&doc).await;
    let nodes = h.main_loop.last_selection().nodes.clone();

    h.request(UiRequest::UpdateIcons {
        parameters: params,
        nodes: nodes[..1].to_vec(),
    });
    h.request(UiRequest::UpdateIcons {
        parameters: params,
        nodes: nodes.clone(),
    });
    h.main_loop.tick(&doc).await;

    let events = h.drain();
    assert_eq!(completions(&events), vec![1, 2]);
    let urls = requested.lock().unwrap().clone();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].contains("/home/"));
    assert!(urls[2].contains("/search/"));
}

#[tokio::test]
async fn selection_notifications_rescan_the_document() {
    let doc = MemoryDocument::new();
    let comp = doc.add_node(None, "home", HostNodeType::Component);
    let group = doc.add_node(None, "group", HostNodeType::Group);
    let mut h = harness(MapFetcher::new(), MemoryStore::new());

    doc.set_selection(&[comp.as_str(), group.as_str()]);
    h.in_tx.try_send(InboundMsg::SelectionChanged).unwrap();
    h.main_loop.tick(&doc).await;

    let snapshot = h.main_loop.last_selection();
    assert_eq!(snapshot.nodes.len(), 1);
    assert!(snapshot.has_unsupported_nodes);
    assert_eq!(h.drain(), vec![snapshot.to_event()]);
}

#[tokio::test]
async fn resize_is_forwarded_to_the_host() {
    let doc = MemoryDocument::new();
    let mut h = harness(MapFetcher::new(), MemoryStore::new());

    h.request(UiRequest::Resize {
        width: 400,
        height: 640,
    });
    h.main_loop.tick(&doc).await;

    assert_eq!(doc.ui_size(), Some((400, 640)));
    assert!(h.drain().is_empty());
}

#[tokio::test]
async fn settings_are_announced_once_per_ui_client() {
    let doc = MemoryDocument::new();
    let mut h = harness(MapFetcher::new(), MemoryStore::new());
    h.main_loop.start(&doc);

    let connected = |port: u16| InboundMsg::ClientConnected {
        socket_addr: SocketAddr::new(Ipv4Addr::LOCALHOST.into(), port),
    };
    let settings_loaded = |events: &[PluginEvent]| {
        events
            .iter()
            .filter(|e| matches!(e, PluginEvent::SettingsLoaded { .. }))
            .count()
    };

    h.in_tx.try_send(connected(50001)).unwrap();
    h.main_loop.tick(&doc).await;
    let first_client = h.drain();
    assert_eq!(settings_loaded(&first_client), 1);
    assert!(matches!(
        first_client.last(),
        Some(PluginEvent::SelectionChanged { .. })
    ));

    h.in_tx.try_send(InboundMsg::ClientDisconnected).unwrap();
    h.in_tx.try_send(connected(50002)).unwrap();
    h.main_loop.tick(&doc).await;
    assert_eq!(settings_loaded(&h.drain()), 1);
}
