#![allow(dead_code)]

use model_health::core::config::{Config, save_config};
use serde_json::Value;
use std::env;
use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;

const ISOLATED_VARS: [&str; 4] = [
    "MODEL_HEALTH_PROJECT_ROOT",
    "MODEL_HEALTH_CONFIG_DIR",
    "MODEL_HEALTH_ENV_FILE",
    "SIMPLISMART_API_KEY",
];

/// Integration test harness configuring an isolated project root and config directory.
pub struct CliTestContext {
    root: TempDir,
    original: Vec<(&'static str, Option<OsString>)>,
}

impl CliTestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp root for tests");
        let original = ISOLATED_VARS.iter().map(|key| (*key, env::var_os(key))).collect();
        unsafe {
            // SAFETY: integration tests mutate process environment serially.
            env::set_var("MODEL_HEALTH_PROJECT_ROOT", root.path());
            env::set_var("MODEL_HEALTH_CONFIG_DIR", root.path().join("config"));
            env::remove_var("MODEL_HEALTH_ENV_FILE");
            env::remove_var("SIMPLISMART_API_KEY");
        }
        Self { root, original }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("output")
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root().join(".tmp")
    }

    pub fn set_api_key(&self, key: &str) {
        unsafe {
            // SAFETY: restored on drop; tests are serialized.
            env::set_var("SIMPLISMART_API_KEY", key);
        }
    }

    pub fn save_config(&self, config: &Config) {
        save_config(config).expect("save_config should succeed");
    }
}

impl Drop for CliTestContext {
    fn drop(&mut self) {
        for (key, value) in &self.original {
            match value {
                Some(value) => unsafe {
                    // SAFETY: restoration happens after tests finish using the variable.
                    env::set_var(key, value);
                },
                None => unsafe {
                    // SAFETY: restoration happens after tests finish using the variable.
                    env::remove_var(key);
                },
            }
        }
    }
}

/// Canned reply for one route of the stub server.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    delay: Option<Duration>,
}

impl StubResponse {
    pub fn text(status: u16, body: &str) -> Self {
        Self::bytes(status, "text/plain; charset=utf-8", body.as_bytes().to_vec())
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self::bytes(status, "application/json", body.to_string().into_bytes())
    }

    pub fn bytes(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self { status, content_type, body, delay: None }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// OpenAI-style completion carrying `content` in the first choice.
    pub fn completion(content: &str) -> Self {
        Self::json(
            200,
            serde_json::json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
            }),
        )
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

/// Minimal HTTP/1.1 server answering fixed routes and recording every request.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn start(routes: Vec<(&'static str, StubResponse)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("stub listener should bind");
        let addr = listener.local_addr().expect("stub listener should have an address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let routes = Arc::new(routes);

        let handle = {
            let requests = Arc::clone(&requests);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || {
                for stream in listener.incoming() {
                    if shutdown.load(Ordering::SeqCst) {
                        break;
                    }
                    let Ok(stream) = stream else { continue };
                    let requests = Arc::clone(&requests);
                    let routes = Arc::clone(&routes);
                    thread::spawn(move || serve_connection(stream, &routes, &requests));
                }
            })
        };

        Self { addr, requests, shutdown, handle: Some(handle) }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<CapturedRequest> {
        self.requests().into_iter().filter(|request| request.path == path).collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve_connection(
    stream: TcpStream,
    routes: &[(&'static str, StubResponse)],
    requests: &Mutex<Vec<CapturedRequest>>,
) {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();
    let path = target.split('?').next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap_or(0) == 0 {
            break;
        }
        if header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    requests.lock().expect("request log poisoned").push(CapturedRequest {
        method,
        path: path.clone(),
        headers,
        body,
    });

    let response = routes
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, response)| response.clone())
        .unwrap_or_else(|| StubResponse::text(404, "not found"));

    if let Some(delay) = response.delay {
        thread::sleep(delay);
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.content_type,
        response.body.len()
    );
    let stream = reader.get_mut();
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&response.body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// A URL on a port nothing listens on.
pub fn unreachable_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("probe listener should bind");
    let addr = listener.local_addr().expect("probe listener should have an address");
    drop(listener);
    format!("http://{addr}{path}")
}

/// Point every endpoint and candidate list of a default config at `server`.
pub fn config_for(server: &StubServer) -> Config {
    let mut config = Config::default();
    config.gateway.base_url = server.url("/v1");
    config.audio_service.url = server.url("/whisper");
    config.text.sources =
        vec![server.url("/texts/frankenstein.txt"), server.url("/texts/alice.txt")];
    config.audio.sources = vec![server.url("/audio/hello.ogg"), server.url("/audio/weather.ogg")];
    config.image.sources = vec![server.url("/images/receipt.jpg"), server.url("/images/fax.png")];
    config.timeouts.fetch_secs = 5;
    config.timeouts.download_secs = 5;
    config.timeouts.inference_secs = 5;
    config
}

pub const LONG_DOCUMENT_CHARS: usize = 5000;
pub const AUDIO_BYTES: &[u8] = b"OggS\x00\x02fake-vorbis-payload";
pub const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-payload";

/// Routes where every upstream answers successfully.
pub fn healthy_routes() -> Vec<(&'static str, StubResponse)> {
    let document = "It was a dark and stormy night. ".repeat(LONG_DOCUMENT_CHARS / 10);
    vec![
        ("/texts/frankenstein.txt", StubResponse::text(200, &document)),
        ("/texts/alice.txt", StubResponse::text(200, &document)),
        ("/audio/hello.ogg", StubResponse::bytes(200, "audio/ogg", AUDIO_BYTES.to_vec())),
        ("/audio/weather.ogg", StubResponse::bytes(200, "audio/ogg", AUDIO_BYTES.to_vec())),
        ("/images/receipt.jpg", StubResponse::bytes(200, "image/jpeg", IMAGE_BYTES.to_vec())),
        ("/images/fax.png", StubResponse::bytes(200, "image/png", IMAGE_BYTES.to_vec())),
        ("/v1/chat/completions", StubResponse::completion(&"model output ".repeat(100))),
        (
            "/whisper",
            StubResponse::json(200, serde_json::json!({"text": "hello ".repeat(100)})),
        ),
    ]
}

/// Replace the response for `path` in a route list.
pub fn override_route(
    mut routes: Vec<(&'static str, StubResponse)>,
    path: &'static str,
    response: StubResponse,
) -> Vec<(&'static str, StubResponse)> {
    routes.retain(|(route, _)| *route != path);
    routes.push((path, response));
    routes
}

/// Every file currently in `dir`, or nothing if it does not exist.
pub fn list_dir(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|entry| entry.ok().map(|e| e.path())).collect(),
        Err(_) => Vec::new(),
    }
}
