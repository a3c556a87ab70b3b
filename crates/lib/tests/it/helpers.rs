use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use postbox::{
    SystemClock,
    frontend::{self, FrontendState},
    relay::{Relay, RelaySender},
    store::{Entries, JsonFileStore, MessageStore},
};

pub const INDEX_BODY: &str = "<h1>Home</h1>";
pub const MESSAGE_BODY: &str = "<form method=\"post\" action=\"/message\"></form>";
pub const ERROR_BODY: &str = "<h1>Not found</h1>";
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Lay out `templates/` and `static/` under `root` and return their paths.
pub fn write_site(root: &Path) -> (PathBuf, PathBuf) {
    let templates = root.join("templates");
    let assets = root.join("static");
    std::fs::create_dir_all(&templates).unwrap();
    std::fs::create_dir_all(assets.join("img")).unwrap();

    std::fs::write(templates.join("index.html"), INDEX_BODY).unwrap();
    std::fs::write(templates.join("message.html"), MESSAGE_BODY).unwrap();
    std::fs::write(templates.join("error.html"), ERROR_BODY).unwrap();

    std::fs::write(assets.join("style.css"), "body { margin: 0; }").unwrap();
    std::fs::write(assets.join("app.js"), "console.log('hi');").unwrap();
    std::fs::write(assets.join("img/logo.png"), PNG_BYTES).unwrap();
    std::fs::write(assets.join("notes.txt"), "plain").unwrap();

    (templates, assets)
}

/// Open the store in `storage_dir`, bind a relay on an ephemeral port and
/// spawn its loop.
pub async fn start_relay(storage_dir: &Path) -> (SocketAddr, JsonFileStore) {
    let store = JsonFileStore::open(storage_dir, "data.json").await.unwrap();
    let relay = Relay::bind(
        ([127, 0, 0, 1], 0).into(),
        Arc::new(store.clone()),
        Arc::new(SystemClock),
    )
    .await
    .unwrap();
    let addr = relay.local_addr().unwrap();
    tokio::spawn(relay.run());
    (addr, store)
}

/// Serve the front-end on an ephemeral port.
pub async fn start_frontend(templates: &Path, assets: &Path, relay_addr: SocketAddr) -> SocketAddr {
    let sender = RelaySender::bind(relay_addr).await.unwrap();
    let state = FrontendState::new(templates, assets, sender);
    let app = frontend::router(state, 16);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// HTTP client that reports redirects instead of following them.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Poll the store until it holds `count` entries.
pub async fn wait_for_entries(store: &JsonFileStore, count: usize) -> Entries {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(entries) = store.load().await
            && entries.len() >= count
        {
            return entries;
        }
        if tokio::time::Instant::now() > deadline {
            panic!(
                "store at {} never reached {count} entries",
                store.path().display()
            );
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Send a raw datagram to the relay.
pub async fn send_raw(relay_addr: SocketAddr, payload: &[u8]) {
    let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(payload, relay_addr).await.unwrap();
}
