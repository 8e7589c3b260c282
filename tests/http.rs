use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Summary {
    total_text: String,
    glyph: String,
}

#[derive(Debug, Deserialize)]
struct DeviceStatus {
    id: String,
    on: bool,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RankedDevice {
    id: String,
    percentage: u8,
}

#[derive(Debug, Deserialize)]
struct ChartConfig {
    categories: Vec<String>,
    values: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartView {
    revision: u64,
    config: Option<ChartConfig>,
}

#[derive(Debug, Deserialize)]
struct Charts {
    usage: ChartView,
    hourly: ChartView,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    theme: String,
    period: String,
    summary: Option<Summary>,
    devices: Vec<DeviceStatus>,
    ranking: Vec<RankedDevice>,
    charts: Charts,
    simulation_running: bool,
}

impl Snapshot {
    fn device(&self, id: &str) -> &DeviceStatus {
        self.devices
            .iter()
            .find(|device| device.id == id)
            .expect("device in snapshot")
    }
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_prefs_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "energy_dashboard_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_energy_dashboard"))
        .env("PORT", port.to_string())
        .env("DASHBOARD_PREFS_PATH", unique_prefs_path())
        // keep background ticks out of the way; tests step the simulation explicitly
        .env("DASHBOARD_TICK_MS", "3600000")
        .env("DASHBOARD_SEED", "17")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_snapshot(client: &Client, server: &TestServer) -> Snapshot {
    client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_snapshot(
    client: &Client,
    server: &TestServer,
    path: &str,
    body: Option<serde_json::Value>,
) -> Snapshot {
    let mut request = client.post(format!("{}{path}", server.base_url));
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.send().await.unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_switch_period_updates_chart_and_total() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let month = post_snapshot(
        &client,
        &server,
        "/api/period",
        Some(serde_json::json!({ "period": "month" })),
    )
    .await;
    assert_eq!(month.period, "month");
    let usage = month.charts.usage.config.as_ref().expect("usage chart");
    assert_eq!(usage.categories.len(), 4);
    assert_eq!(usage.values, vec![210.2, 195.8, 218.4, 223.1]);
    let summary = month.summary.as_ref().expect("summary");
    assert_eq!(summary.total_text, "847.5");
    assert_eq!(summary.glyph, "📈");

    let ignored = post_snapshot(
        &client,
        &server,
        "/api/period",
        Some(serde_json::json!({ "period": "decade" })),
    )
    .await;
    assert_eq!(ignored.period, "month");

    let week = post_snapshot(
        &client,
        &server,
        "/api/period",
        Some(serde_json::json!({ "period": "week" })),
    )
    .await;
    assert_eq!(week.period, "week");
    assert_eq!(week.charts.usage.config.expect("usage chart").values.len(), 7);
}

#[tokio::test]
async fn http_toggle_theme_twice_restores_theme() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_snapshot(&client, &server).await;
    let toggled = post_snapshot(&client, &server, "/api/theme/toggle", None).await;
    assert_ne!(toggled.theme, before.theme);
    assert!(toggled.charts.usage.revision > before.charts.usage.revision);
    assert!(toggled.charts.hourly.revision > before.charts.hourly.revision);

    let restored = post_snapshot(&client, &server, "/api/theme/toggle", None).await;
    assert_eq!(restored.theme, before.theme);

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(&format!(r#"data-theme="{}""#, restored.theme)));
}

#[tokio::test]
async fn http_toggle_device_respects_protected_fridge() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_snapshot(&client, &server).await;
    let tv_before = before.device("tv").on;

    let toggled = post_snapshot(&client, &server, "/api/devices/tv/toggle", None).await;
    let tv = toggled.device("tv");
    assert_eq!(tv.on, !tv_before);
    assert_eq!(tv.status, if tv.on { "On" } else { "Off" });
    assert_eq!(
        toggled.ranking.iter().any(|entry| entry.id == "tv"),
        tv.on
    );
    assert_eq!(toggled.ranking.first().map(|entry| entry.percentage), Some(100));

    let fridge = post_snapshot(&client, &server, "/api/devices/fridge/toggle", None).await;
    assert!(fridge.device("fridge").on);

    let unknown = post_snapshot(&client, &server, "/api/devices/sauna/toggle", None).await;
    assert_eq!(unknown.devices.len(), before.devices.len());

    let restored = post_snapshot(&client, &server, "/api/devices/tv/toggle", None).await;
    assert_eq!(restored.device("tv").on, tv_before);
}

#[tokio::test]
async fn http_simulation_tick_and_chart_lookup() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let ticked = post_snapshot(&client, &server, "/api/simulation/tick", None).await;
    assert!(ticked.ranking.iter().all(|entry| entry.percentage <= 100));
    assert!(ticked.charts.hourly.config.is_some());

    let hourly: ChartView = client
        .get(format!("{}/api/charts/hourly", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hourly.config.expect("hourly chart").values.len(), 24);

    let missing = client
        .get(format!("{}/api/charts/pie", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_simulation_stop_is_reported() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let stopped = post_snapshot(&client, &server, "/api/simulation/stop", None).await;
    assert!(!stopped.simulation_running);

    // manual ticks still work once the periodic task is gone
    let ticked = post_snapshot(&client, &server, "/api/simulation/tick", None).await;
    assert!(!ticked.simulation_running);
}
