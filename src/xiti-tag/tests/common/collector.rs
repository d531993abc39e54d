use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Clone, Default)]
struct Hits(Arc<Mutex<Vec<String>>>);

/// Local stand-in for the Xiti collector. Records the raw query string of
/// every hit and answers 500 for pages named `Broken`.
pub struct Collector {
    addr: SocketAddr,
    hits: Hits,
    handle: JoinHandle<()>,
}

impl Collector {
    pub async fn start() -> Self {
        let hits = Hits::default();
        let app = Router::new()
            .route("/hit.xiti", get(record))
            .with_state(hits.clone());

        // 0: means port will be picked by the OS
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, hits, handle }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/hit.xiti", self.addr)
    }

    pub fn queries(&self) -> Vec<String> {
        self.hits.0.lock().unwrap().clone()
    }
}

impl Drop for Collector {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(State(hits): State<Hits>, RawQuery(query): RawQuery) -> StatusCode {
    let query = query.unwrap_or_default();
    let broken = super::params(&query).get("p").map(String::as_str) == Some("'Broken'");
    hits.0.lock().unwrap().push(query);

    if broken {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}
