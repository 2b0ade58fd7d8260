//! Canned provider responses and a loopback HTTP server for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const CURRENT_JSON: &str = r#"{
    "name": "London",
    "sys": {"country": "GB"},
    "main": {"temp": 12.5, "feels_like": 11.49, "humidity": 81, "pressure": 1012},
    "wind": {"speed": 4.12},
    "weather": [{"description": "light rain", "icon": "10d"}]
}"#;

/// Forecast feed covering six dates from 2024-03-01, eight samples each.
pub fn forecast_json() -> String {
    let mut points = Vec::new();
    for day in 1..=6 {
        for slot in 0..8 {
            let hour = slot * 3;
            points.push(format!(
                r#"{{"dt_txt": "2024-03-{:02} {:02}:00:00", "main": {{"temp_min": {}, "temp_max": {}}}, "weather": [{{"description": "day {} at {}", "icon": "0{}d"}}]}}"#,
                day,
                hour,
                day as f64 - slot as f64 * 0.5,
                day as f64 + slot as f64,
                day,
                hour,
                (slot % 4) + 1
            ));
        }
    }
    format!(r#"{{"cod": "200", "list": [{}]}}"#, points.join(","))
}

#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Route {
    pub fn ok(path: &'static str, body: impl Into<String>) -> Self {
        Self {
            path,
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(path: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            ..Self::ok(path, body)
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// The usual pair of successful endpoints.
pub fn happy_routes() -> Vec<Route> {
    vec![
        Route::ok("/data/2.5/weather", CURRENT_JSON),
        Route::ok("/data/2.5/forecast", forecast_json()),
    ]
}

pub struct TestServer {
    pub base_url: String,
    /// Request targets (path and query) in arrival order
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `routes` on an ephemeral loopback port. Unknown paths get a 404.
pub async fn serve(routes: Vec<Route>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                log.lock().unwrap().push(target.clone());

                let (status, body, delay) = match routes.iter().find(|r| target.starts_with(r.path)) {
                    Some(route) => (route.status, route.body.clone(), route.delay),
                    None => (404, r#"{"cod": "404", "message": "no such route"}"#.to_string(), None),
                };
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                let response = format!(
                    "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    TestServer {
        base_url: format!("http://{}", addr),
        requests,
    }
}
