/*!
 * In-process stand-in for the Baidu translate endpoint.
 *
 * Records every form it receives and answers with a scripted reply.
 */

use axum::{extract::State, http::StatusCode, routing::post, Form, Router};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// What the stub answers
#[derive(Debug, Clone)]
pub enum StubReply {
    /// 200 with this JSON body
    Json(String),
    /// Arbitrary status and body
    Status(u16, String),
    /// Sleep before answering 200 with the body
    Delayed(Duration, String),
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub struct StubServer {
    pub url: String,
    forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl StubServer {
    /// Start the stub on an ephemeral local port
    pub async fn start(reply: StubReply) -> StubServer {
        let forms = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            forms: forms.clone(),
        };

        let app = Router::new()
            .route("/api/trans/vip/translate", post(handle))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        StubServer {
            url: format!("http://{}/api/trans/vip/translate", addr),
            forms,
        }
    }

    /// Forms received so far, oldest first
    pub fn forms(&self) -> Vec<HashMap<String, String>> {
        self.forms.lock().clone()
    }
}

async fn handle(
    State(state): State<StubState>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.forms.lock().push(form);

    match state.reply {
        StubReply::Json(body) => (StatusCode::OK, body),
        StubReply::Status(code, body) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        ),
        StubReply::Delayed(delay, body) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, body)
        }
    }
}

/// A local URL nothing listens on
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}/api/trans/vip/translate", addr)
}
