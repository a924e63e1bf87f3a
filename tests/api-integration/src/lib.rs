//! In-process harness: serves the catalog API on an ephemeral local port.

use std::net::SocketAddr;
use std::sync::Once;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use farmfresh_client::api::CatalogClient;
use farmfresh_server::{router, seed, AppState, MemStore};

static TRACING: Once = Once::new();

/// Route server logs to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A running server. Aborted on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the seed catalog.
    pub async fn start() -> TestServer {
        let store = seed::seeded_store().expect("seed data is valid");
        Self::with_store(store).await
    }

    pub async fn with_store(store: MemStore) -> TestServer {
        Self::with_router(router(AppState::new(store))).await
    }

    /// Serve an arbitrary router, for exercising the client against
    /// misbehaving servers.
    pub async fn with_router(app: Router) -> TestServer {
        init_tracing();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server failed");
        });
        TestServer { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path` (which starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.base_url(), Duration::from_secs(5)).expect("valid base url")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
