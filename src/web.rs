mod pages;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use eyre::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::pipeline::Pipeline;
use crate::resolve_video_reference;
use crate::session::{AccountStore, Session};
use crate::summarize::clamp_word_bound;

use pages::{Notice, NotesView};

pub const SESSION_COOKIE: &str = "ytnotes_session";

pub struct AppState {
    pipeline: Pipeline,
    accounts: Option<Mutex<AccountStore>>,
    sessions: Mutex<HashMap<String, Session>>,
    default_word_bound: u32,
}

impl AppState {
    pub fn new(pipeline: Pipeline, default_word_bound: u32) -> Self {
        Self {
            pipeline,
            accounts: None,
            sessions: Mutex::new(HashMap::new()),
            default_word_bound: clamp_word_bound(default_word_bound),
        }
    }

    /// Same form, behind a username/password login
    pub fn gated(pipeline: Pipeline, default_word_bound: u32, accounts: AccountStore) -> Self {
        Self {
            accounts: Some(Mutex::new(accounts)),
            ..Self::new(pipeline, default_word_bound)
        }
    }

    pub fn is_gated(&self) -> bool {
        self.accounts.is_some()
    }

    /// Identify the caller's session. Nothing is stored until there is state to keep.
    async fn attach(&self, headers: &HeaderMap) -> SessionHandle {
        if let Some(id) = session_cookie(headers)
            && self.sessions.lock().await.contains_key(&id)
        {
            return SessionHandle { id, is_new: false };
        }

        SessionHandle {
            id: uuid::Uuid::new_v4().to_string(),
            is_new: true,
        }
    }

    async fn snapshot(&self, handle: &SessionHandle) -> Session {
        self.sessions
            .lock()
            .await
            .get(&handle.id)
            .cloned()
            .unwrap_or_else(|| Session::with_word_bound(self.default_word_bound))
    }

    /// Apply `f` to the stored session, creating it if needed
    async fn update<R>(&self, handle: &SessionHandle, f: impl FnOnce(&mut Session) -> R) -> R {
        let default_word_bound = self.default_word_bound;
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .entry(handle.id.clone())
            .or_insert_with(|| Session::with_word_bound(default_word_bound));
        f(session)
    }

    /// Apply `f` only if the session is already stored
    async fn modify<R>(&self, handle: &SessionHandle, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.sessions.lock().await.get_mut(&handle.id).map(f)
    }

    /// Hand out the cookie once a new session has actually been stored
    async fn respond(&self, handle: &SessionHandle, body: impl IntoResponse) -> Response {
        let mut response = body.into_response();
        if handle.is_new && self.sessions.lock().await.contains_key(&handle.id) {
            let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", handle.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        response
    }
}

struct SessionHandle {
    id: String,
    is_new: bool,
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

#[derive(Debug, Deserialize)]
struct SummarizeForm {
    url: String,
    words: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SignUpForm {
    username: String,
    password: String,
    confirm: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

fn notes_view<'a>(
    session: &'a Session,
    url: &'a str,
    show_outcome: bool,
    notice: Option<&'a Notice>,
) -> NotesView<'a> {
    let outcome = session.last_outcome.as_ref().filter(|_| show_outcome);
    let thumbnail = match outcome {
        Some(outcome) => Some(outcome.video.thumbnail_url()),
        None => resolve_video_reference(url).ok().map(|v| v.thumbnail_url()),
    };
    NotesView {
        username: session.username(),
        word_bound: session.word_bound,
        url,
        thumbnail,
        outcome,
        notice,
    }
}

async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let handle = state.attach(&headers).await;
    let session = state.snapshot(&handle).await;

    if state.is_gated() && !session.is_logged_in() {
        return state.respond(&handle, Html(pages::login_page(None))).await;
    }

    let url = session
        .last_outcome
        .as_ref()
        .map(|o| o.video.watch_url())
        .unwrap_or_default();
    let view = notes_view(&session, &url, true, None);
    state.respond(&handle, Html(pages::notes_page(&view))).await
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<SummarizeForm>,
) -> Response {
    let handle = state.attach(&headers).await;
    let mut session = state.snapshot(&handle).await;

    if state.is_gated() && !session.is_logged_in() {
        return state.respond(&handle, Redirect::to("/")).await;
    }

    let word_bound = clamp_word_bound(form.words.unwrap_or(session.word_bound));
    session.word_bound = word_bound;
    state.modify(&handle, |stored| stored.word_bound = word_bound).await;

    let url = form.url.trim();
    let (notice, show_outcome) = if url.is_empty() {
        (Some(Notice::warning("Please enter a valid YouTube video link.")), false)
    } else {
        match state.pipeline.run(url, word_bound).await {
            Ok(outcome) => {
                info!("Notes ready for {}", outcome.video);
                session.retain(outcome.clone());
                state
                    .update(&handle, |stored| {
                        stored.word_bound = word_bound;
                        stored.retain(outcome);
                    })
                    .await;
                (None, true)
            }
            Err(e) => {
                warn!("Request for {url} failed: {e}");
                (Some(Notice::error(e.to_string())), false)
            }
        }
    };

    let view = notes_view(&session, url, show_outcome, notice.as_ref());
    state.respond(&handle, Html(pages::notes_page(&view))).await
}

async fn login(State(state): State<Arc<AppState>>, headers: HeaderMap, Form(form): Form<LoginForm>) -> Response {
    let Some(accounts) = &state.accounts else {
        return Redirect::to("/").into_response();
    };

    let handle = state.attach(&headers).await;
    let mut session = state.snapshot(&handle).await;
    let result = session.log_in(&*accounts.lock().await, &form.username, &form.password);

    match result {
        Ok(()) => {
            state.update(&handle, |stored| *stored = session).await;
            state.respond(&handle, Redirect::to("/")).await
        }
        Err(e) => {
            warn!("Failed login for {}", form.username);
            Html(pages::login_page(Some(&Notice::error(e.to_string())))).into_response()
        }
    }
}

async fn signup(State(state): State<Arc<AppState>>, Form(form): Form<SignUpForm>) -> Response {
    let Some(accounts) = &state.accounts else {
        return Redirect::to("/").into_response();
    };

    let result = accounts
        .lock()
        .await
        .sign_up(&form.username, &form.password, &form.confirm);

    let notice = match result {
        Ok(()) => Notice::success("Account created successfully! Please log in."),
        Err(e) => Notice::error(e.to_string()),
    };
    Html(pages::login_page(Some(&notice))).into_response()
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let handle = state.attach(&headers).await;
    state.modify(&handle, Session::log_out).await;
    Redirect::to("/").into_response()
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/summarize", post(summarize))
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let gated = state.is_gated();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving on http://{addr} (login required: {gated})");
    axum::serve(listener, router(Arc::new(state))).await?;
    Ok(())
}
