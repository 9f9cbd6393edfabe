use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/devlink-api");
        cmd.env("DEVLINK_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees MONGODB_URI and JWT_SECRET
        // from .env (loaded by the server itself)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready even when degraded; suites that need the database
                // check database_ready first
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// True when the spawned server reports a healthy database. Lifecycle suites
/// self-skip when this is false so the rest of the suite still runs without
/// a MongoDB instance.
pub async fn database_ready(server: &TestServer) -> Result<bool> {
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    Ok(res.status() == StatusCode::OK)
}

/// Unique email per call so suites can re-run against a dirty database.
#[allow(dead_code)]
pub fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}+{}@example.com", prefix, nanos)
}

/// Register a throwaway account; returns its bearer token.
#[allow(dead_code)]
pub async fn register_user(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<String> {
    let payload = serde_json::json!({
        "name": name,
        "email": unique_email(name),
        "password": "sekrit99"
    });
    let res = client
        .post(format!("{}/api/users", base_url))
        .json(&payload)
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "registration failed with {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    body.get("token")
        .and_then(|t| t.as_str())
        .map(String::from)
        .context("registration response missing token")
}
