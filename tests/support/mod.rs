// One-time server bootstrap shared by every integration test in this
// binary. Tests run on their own tokio runtimes, so the server gets a
// dedicated OS thread and runtime that outlive all of them.
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

/// Starts the server on first call and returns its base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        // Point the ledger at a temp file and drop the tick throttle so
        // repeated polls never wait on wall-clock gaps.
        let ledger = std::env::temp_dir().join(format!(
            "hunt-integration-{}.csv",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&ledger);
        // SAFETY: runs once, before the server thread or any test
        // reads the environment.
        unsafe {
            std::env::set_var("SCORE_LEDGER_PATH", &ledger);
            std::env::set_var("UPDATE_INTERVAL_MS", "0");
        }

        // The server thread publishes its OS-assigned address here.
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Ephemeral port, so parallel test binaries never clash.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                beast_hunt_server::run(listener).await.expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// First wait for the thread to publish its address, then poll the
// socket until it accepts, so no test races the bind.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
