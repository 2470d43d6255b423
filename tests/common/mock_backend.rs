use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use bytes::Bytes;
use futures::stream;
use ollama_mcp_gateway::io_struct::ChatRequest;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

/// What the mock chat endpoint answers with.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Body sent as-is, one chunk per entry.
    Chunks(Vec<String>),
    /// Empty body with this status.
    Status(u16),
}

impl MockReply {
    /// Each entry becomes one newline-terminated chunk.
    pub fn lines(lines: &[&str]) -> Self {
        MockReply::Chunks(lines.iter().map(|l| format!("{}\n", l)).collect())
    }
}

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    received: Arc<Mutex<Vec<ChatRequest>>>,
}

/// In-process stand-in for the Ollama `/api/chat` endpoint.
pub struct MockBackend {
    pub url: String,
    received: Arc<Mutex<Vec<ChatRequest>>>,
    handle: ServerHandle,
}

impl MockBackend {
    pub async fn start(reply: MockReply) -> std::io::Result<Self> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            received: received.clone(),
        };

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .route("/api/chat", web::post().to(chat_handler))
        })
        .workers(1)
        .listen(listener)?
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Ok(MockBackend {
            url: format!("http://127.0.0.1:{}/api/chat", port),
            received,
            handle,
        })
    }

    pub fn received(&self) -> Vec<ChatRequest> {
        self.received.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn chat_handler(req: web::Json<ChatRequest>, state: web::Data<MockState>) -> HttpResponse {
    state.received.lock().unwrap().push(req.into_inner());
    match &state.reply {
        MockReply::Status(code) => {
            HttpResponse::build(actix_web::http::StatusCode::from_u16(*code).unwrap()).finish()
        }
        MockReply::Chunks(chunks) => {
            let body = chunks
                .iter()
                .map(|c| Ok::<_, Infallible>(Bytes::from(c.clone())))
                .collect::<Vec<_>>();
            HttpResponse::Ok()
                .content_type("application/x-ndjson")
                .streaming(stream::iter(body))
        }
    }
}

/// A URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/chat", port)
}
