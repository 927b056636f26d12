use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Kpis {
    total: Option<f64>,
    conversion: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RepCount {
    label: Option<String>,
    count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DashboardPayload {
    kpis: Kpis,
    by_rep: Vec<RepCount>,
}

const DEFAULT_BLOCK: &str = r#"{
  "kpis": {"total": 40, "approved": 12, "deals": 10, "reps": 3, "conversion": 25, "clients": 120, "upcoming": 4, "by_rep_total": 40},
  "by_rep": [{"label": "Alice", "count": 20}, {"label": "Bob", "count": 15}, {"label": "", "count": 5}],
  "trend": {"labels": ["2026-01", "2026-02", "2026-03"], "visits": [10, 20, 40], "deals": [2, 4, 10]},
  "recent": [{"dt": "2026-03-30 09:15", "rep": "Alice", "account": null, "doctor": "Dr. X", "outcome": "Won"}],
  "upcoming": [{"date": "2026-04-02T10:00:00Z", "rep": "Bob", "plan": "Clinic tour", "obj": ""}]
}"#;

const WEEK_BLOCK: &str = r#"{"kpis": {"total": 7}, "by_rep": [{"label": "Cara", "count": 7}]}"#;

/// Dashboard binary running against a seeded data directory. One instance
/// is shared by every test in this file.
struct TestServer {
    base_url: String,
    child: Child,
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));
static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER_PID: AtomicI32 = AtomicI32::new(0);

impl TestServer {
    async fn shared() -> Arc<Self> {
        let mut slot = SERVER.lock().await;
        match slot.as_ref() {
            Some(server) => Arc::clone(server),
            None => {
                let server = Arc::new(Self::start().await);
                *slot = Some(Arc::clone(&server));
                server
            }
        }
    }

    async fn start() -> Self {
        // Reserve a port by binding and releasing it before the child claims it.
        let port = TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("reserve port")
            .port();

        let child = Command::new(env!("CARGO_BIN_EXE_sales_dashboard"))
            .env("PORT", port.to_string())
            .env("DASHBOARD_DATA_DIR", seeded_data_dir())
            .env("DASHBOARD_ACCENT", "#ff6b4a")
            .env("RUST_LOG", "info")
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("failed to spawn dashboard");
        kill_at_exit(child.id());

        let server = Self {
            base_url: format!("http://127.0.0.1:{port}"),
            child,
        };
        server.wait_ready().await;
        server
    }

    async fn wait_ready(&self) {
        let client = Client::new();
        let started = Instant::now();
        while started.elapsed() < Duration::from_secs(3) {
            let ready = client
                .get(format!("{}/api/dashboard", self.base_url))
                .send()
                .await
                .is_ok_and(|resp| resp.status().is_success());
            if ready {
                return;
            }
            sleep(Duration::from_millis(100)).await;
        }
        panic!("dashboard did not start listening on {}", self.base_url);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

// The shared server lives in a static and is never dropped, so the child is
// signalled from an exit hook instead.
#[cfg(unix)]
fn kill_at_exit(pid: u32) {
    extern "C" fn terminate() {
        let pid = SERVER_PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }

    if SERVER_PID.swap(pid as i32, Ordering::SeqCst) == 0 {
        unsafe {
            libc::atexit(terminate);
        }
    }
}

#[cfg(not(unix))]
fn kill_at_exit(_pid: u32) {}

fn seeded_data_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("sales_dashboard_http_{}_{}", std::process::id(), nanos));
    std::fs::create_dir_all(&path).expect("create data dir");
    std::fs::write(path.join("dashboard.json"), DEFAULT_BLOCK).unwrap();
    std::fs::write(path.join("7.json"), WEEK_BLOCK).unwrap();
    std::fs::write(path.join("90.json"), "{not json").unwrap();
    path
}

async fn page(server: &TestServer, path: &str) -> String {
    let response = Client::new()
        .get(format!("{}{path}", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.text().await.unwrap()
}

#[tokio::test]
async fn http_dashboard_renders_default_window() {
    let _guard = TEST_LOCK.lock().await;
    let server = TestServer::shared().await;

    let html = page(&server, "/").await;
    assert!(html.contains(r#"id="k_total">40<"#));
    assert!(html.contains(r#"id="conv">25%<"#));
    assert!(html.contains(r#"id="repTotal">40 visits<"#));
    assert!(html.contains(r#"style="width:100%" title="20""#));
    assert!(html.contains(r#"style="width:75%" title="15""#));
    assert!(html.contains(r#"<span class="barlbl">—</span>"#));
    assert!(html.contains("<td>2026-03-30 09:15</td><td>Alice</td><td>—</td><td>Dr. X</td><td>Won</td>"));
    assert!(html.contains("<td>2026-04-02</td><td>Bob</td><td>Clinic tour</td><td>—</td>"));
    assert!(html.contains(r##"stroke="#ff6b4a""##));
    assert!(html.contains(r##"stroke="#00d18f""##));
    assert!(html.contains(r#"<option value="30" data-href="/?range=30" selected>"#));
}

#[tokio::test]
async fn http_range_selects_window_data() {
    let _guard = TEST_LOCK.lock().await;
    let server = TestServer::shared().await;

    let html = page(&server, "/?range=7&dpr=2").await;
    assert!(html.contains(r#"id="k_total">7<"#));
    assert!(html.contains(r#"<span class="barlbl">Cara</span>"#));
    assert!(html.contains(r#"viewBox="0 0 1280 520""#));
    assert!(html.contains(r#"data-href="/?dpr=2&amp;range=all""#));

    let payload: DashboardPayload = Client::new()
        .get(format!("{}/api/dashboard?range=7", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(payload.kpis.total, Some(7.0));
    assert_eq!(payload.kpis.conversion, None);
    assert_eq!(payload.by_rep.len(), 1);
    assert_eq!(payload.by_rep[0].label.as_deref(), Some("Cara"));
    assert_eq!(payload.by_rep[0].count, Some(7));
}

#[tokio::test]
async fn http_malformed_data_keeps_default_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = TestServer::shared().await;

    let html = page(&server, "/?range=90").await;
    assert!(html.contains(r#"id="k_total">—<"#));
    assert!(!html.contains(r#"class="barrow""#));
    assert!(!html.contains("<path"));

    let response = Client::new()
        .get(format!("{}/api/dashboard?range=90", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
