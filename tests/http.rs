use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const PINNED_TODAY: &str = "2024-02-29";

#[derive(Debug, Deserialize)]
struct StreakResponse {
    current: u32,
    best: u32,
    next_milestone: u32,
}

#[derive(Debug, Deserialize)]
struct GoalResponse {
    key: String,
    target: u32,
    current: u32,
    progress_percent: u8,
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

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/health")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_day_tracker"))
        .env("PORT", port.to_string())
        .env("BIND_ADDR", "127.0.0.1")
        .env("TRACKER_TODAY", PINNED_TODAY)
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

#[tokio::test]
async fn http_dashboard_defaults_to_pinned_month() {
    let server = shared_server().await;
    let client = Client::new();

    let view: Value = client
        .post(format!("{}/api/dashboard", server.base_url))
        .json(&json!({
            "activities": [{ "activity_date": PINNED_TODAY, "leetcode_solved": 2 }]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view["year"], 2024);
    assert_eq!(view["month"], 2);

    let calendar = view["calendar"].as_array().expect("calendar array");
    assert_eq!(calendar.len(), 29);
    let last = &calendar[28];
    assert_eq!(last["day"], 29);
    assert_eq!(last["has_activity"], true);
    assert_eq!(last["effort_minutes"], 60);
    assert_eq!(last["intensity"], 2);

    assert_eq!(view["today"]["leetcode"], 2);
    assert_eq!(view["today"]["total_solved"], 2);
    assert_eq!(view["streak"]["next_milestone"], 7);
    assert_eq!(view["overview"]["active_days"], 1);
}

#[tokio::test]
async fn http_goals_report_percentages() {
    let server = shared_server().await;
    let client = Client::new();

    let goals: Vec<GoalResponse> = client
        .post(format!("{}/api/goals", server.base_url))
        .json(&json!({
            "goals": { "leetcode_problems": 20, "contest_participation": 2 },
            "progress": {
                "total_leetcode_solved": 5,
                "total_contests_participated": 3,
                "total_study_minutes": 90
            }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(goals.len(), 6);
    let by_key = |key: &str| goals.iter().find(|goal| goal.key == key).unwrap();

    let leetcode = by_key("leetcode_problems");
    assert_eq!((leetcode.target, leetcode.current, leetcode.progress_percent), (20, 5, 25));

    let contests = by_key("contest_participation");
    assert_eq!(contests.progress_percent, 100);

    let study = by_key("daily_study_minutes");
    assert_eq!((study.target, study.current, study.progress_percent), (0, 90, 0));
}

#[tokio::test]
async fn http_streak_milestones() {
    let server = shared_server().await;
    let client = Client::new();

    let empty: StreakResponse = client
        .post(format!("{}/api/streak", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!((empty.current, empty.best, empty.next_milestone), (0, 0, 7));

    let long: StreakResponse = client
        .post(format!("{}/api/streak", server.base_url))
        .json(&json!({ "current_streak": 400 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!((long.current, long.best, long.next_milestone), (400, 400, 450));
}

#[tokio::test]
async fn http_rejects_invalid_input() {
    let server = shared_server().await;
    let client = Client::new();

    let duplicate = client
        .post(format!("{}/api/calendar", server.base_url))
        .json(&json!({
            "year": 2024,
            "month": 3,
            "activities": [
                { "activity_date": "2024-03-04", "study_minutes": 10 },
                { "activity_date": "2024-03-04", "study_minutes": 20 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

    let negative = client
        .post(format!("{}/api/goals", server.base_url))
        .json(&json!({ "goals": { "leetcode_problems": -1 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
    let message = negative.text().await.unwrap();
    assert!(message.contains("leetcode_problems"));

    let bad_month = client
        .post(format!("{}/api/calendar", server.base_url))
        .json(&json!({ "year": 2024, "month": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_month.status(), StatusCode::BAD_REQUEST);

    let bad_year = client
        .post(format!("{}/api/calendar", server.base_url))
        .json(&json!({ "year": 3000000000i64, "month": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_year.status(), StatusCode::BAD_REQUEST);

    let not_json = client
        .post(format!("{}/api/goals", server.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);
    assert!(not_json.text().await.unwrap().starts_with("malformed payload"));

    let fractional = client
        .post(format!("{}/api/goals", server.base_url))
        .json(&json!({ "goals": { "leetcode_problems": 2.5 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(fractional.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_milestones_list() {
    let server = shared_server().await;
    let milestones: Vec<u32> = Client::new()
        .get(format!("{}/api/milestones", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(milestones, vec![7, 14, 30, 50, 100, 200, 365]);
}
