//! Local HTTP stand-in for the buoy and forecast providers
//!
//! Serves `/realtime2/{id}.txt`, `/points/{lat},{lon}` and the two gridpoint
//! forecast products, counting every hit by path.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use sail_risk_backend::config::UpstreamConfig;
use sail_risk_backend::Config;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const REALTIME_REPORT: &str = "\
#YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
#yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi  hPa    ft
2024 06 01 12 00 270  5.0  7.0   1.0     9    MM 280 1015.2  20.0  19.0    MM   MM   MM    MM
";

pub const OFFLINE_PAGE: &str = "<html>station offline</html>";

struct StubState {
    base_url: String,
    reports: HashMap<String, String>,
    hourly_periods: Value,
    text_periods: Value,
    hits: Mutex<HashMap<String, usize>>,
}

impl StubState {
    fn record(&self, path: String) {
        *self.hits.lock().unwrap().entry(path).or_default() += 1;
    }
}

pub struct StubUpstream {
    addr: SocketAddr,
    state: Arc<StubState>,
}

#[derive(Default)]
pub struct StubBuilder {
    reports: HashMap<String, String>,
    hourly_periods: Option<Value>,
    text_periods: Option<Value>,
}

impl StubBuilder {
    pub fn report(mut self, station_id: &str, text: &str) -> Self {
        self.reports.insert(station_id.to_string(), text.to_string());
        self
    }

    pub fn hourly(mut self, periods: Value) -> Self {
        self.hourly_periods = Some(periods);
        self
    }

    pub fn text(mut self, periods: Value) -> Self {
        self.text_periods = Some(periods);
        self
    }

    pub async fn start(self) -> StubUpstream {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(StubState {
            base_url: format!("http://{}", addr),
            reports: self.reports,
            hourly_periods: self.hourly_periods.unwrap_or_else(|| json!([])),
            text_periods: self.text_periods.unwrap_or_else(|| json!([])),
            hits: Mutex::new(HashMap::new()),
        });

        let app = Router::new()
            .route("/realtime2/:file", get(report))
            .route("/points/:coords", get(points))
            .route("/gridpoints/hourly", get(hourly))
            .route("/gridpoints/text", get(text))
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubUpstream { addr, state }
    }
}

impl StubUpstream {
    pub fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            ndbc_base_url: format!("http://{}/realtime2", self.addr),
            nws_base_url: format!("http://{}", self.addr),
            ..Default::default()
        }
    }

    pub fn config(&self) -> Config {
        Config {
            upstream: self.upstream_config(),
            ..Default::default()
        }
    }

    /// Requests served for one path so far
    pub fn hits(&self, path: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    pub fn report_hits(&self, station_id: &str) -> usize {
        self.hits(&format!("/realtime2/{}.txt", station_id))
    }
}

async fn report(
    State(stub): State<Arc<StubState>>,
    Path(file): Path<String>,
) -> (StatusCode, String) {
    stub.record(format!("/realtime2/{}", file));
    let station_id = file.trim_end_matches(".txt");
    match stub.reports.get(station_id) {
        Some(text) => (StatusCode::OK, text.clone()),
        None => (StatusCode::NOT_FOUND, "Not Found".to_string()),
    }
}

async fn points(State(stub): State<Arc<StubState>>, Path(coords): Path<String>) -> Json<Value> {
    stub.record(format!("/points/{}", coords));
    Json(json!({
        "properties": {
            "forecast": format!("{}/gridpoints/text", stub.base_url),
            "forecastHourly": format!("{}/gridpoints/hourly", stub.base_url),
        }
    }))
}

async fn hourly(State(stub): State<Arc<StubState>>) -> Json<Value> {
    stub.record("/gridpoints/hourly".to_string());
    Json(json!({ "properties": { "periods": stub.hourly_periods } }))
}

async fn text(State(stub): State<Arc<StubState>>) -> Json<Value> {
    stub.record("/gridpoints/text".to_string());
    Json(json!({ "properties": { "periods": stub.text_periods } }))
}
