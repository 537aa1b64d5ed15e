use crate::render::{self, PageView};
use axum::extract::{Form, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use pulse_lib::feed::compose_feed;
use pulse_lib::identity::{self, ResolveOutcome};
use pulse_lib::posting;
use pulse_lib::profile::{AccountType, AvatarStyle};
use pulse_lib::quote::{HttpQuoteSource, QuoteSource, DEFAULT_SYMBOL};
use pulse_lib::repo::{PostRepository, ProfileRepository, SheetPosts, SheetProfiles};
use pulse_lib::session::Session;
use pulse_lib::sheet::SledSheetStore;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{event, instrument, Level};

/// Everything one interaction needs: both repositories, the quote source,
/// the current session, and a one-shot notice for the next render.
pub struct AppState {
    profiles: SheetProfiles<SledSheetStore>,
    posts: SheetPosts<SledSheetStore>,
    quotes: HttpQuoteSource,
    session: RwLock<Option<Session>>,
    notice: RwLock<Option<String>>,
}

type SharedState = Arc<AppState>;

pub async fn start_webserver(
    addr: String,
    store: SledSheetStore,
    quotes: HttpQuoteSource,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        profiles: SheetProfiles::new(store.clone()),
        posts: SheetPosts::new(store),
        quotes,
        session: RwLock::new(None),
        notice: RwLock::new(None),
    });

    let cors = CorsLayer::new().allow_origin(Any);

    let app = Router::new()
        .route("/", get(front_page))
        .route("/enter", post(enter))
        .route("/profile", post(update_profile))
        .route("/post", post(submit))
        .route("/logout", post(logout))
        .layer(cors)
        .with_state(state);

    axum::Server::bind(&addr.parse()?)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

#[derive(Deserialize, Debug)]
struct FrontQuery {
    symbol: Option<String>,
}

#[derive(Deserialize, Debug)]
struct EnterForm {
    username: String,
    account_type: String,
}

#[derive(Deserialize, Debug)]
struct ProfileForm {
    pfp: String,
    style: String,
}

#[derive(Deserialize, Debug)]
struct PostForm {
    text: String,
}

/// The whole page, rendered from freshly read worksheet state on every hit.
#[instrument(skip(state))]
async fn front_page(
    State(state): State<SharedState>,
    Query(query): Query<FrontQuery>,
) -> Response {
    event!(Level::INFO, "Rendering front page");

    let profiles = match state.profiles.all().await {
        Ok(p) => p,
        Err(e) => return render::connection_error(&e).into_response(),
    };
    let posts = match state.posts.all().await {
        Ok(p) => p,
        Err(e) => return render::connection_error(&e).into_response(),
    };

    let session = state.session.read().await.clone();
    let notice = state.notice.write().await.take();

    let viewer = session
        .as_ref()
        .and_then(|s| profiles.iter().find(|p| p.username == s.username));

    // Quote failures of any kind degrade to the static hint.
    let symbol = query.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
    let price = state.quotes.last_price(&symbol).await.ok();

    let feed: Vec<_> = compose_feed(&posts, &profiles).collect();

    Html(render::page(&PageView {
        session: session.as_ref(),
        viewer,
        notice,
        feed: &feed,
        symbol: &symbol,
        price,
    }))
    .into_response()
}

#[instrument(skip(state, form))]
async fn enter(State(state): State<SharedState>, Form(form): Form<EnterForm>) -> Response {
    event!(Level::INFO, "Processing enter request");

    let account_type = AccountType::from_cell(&form.account_type);
    match identity::resolve(&state.profiles, &form.username, account_type).await {
        Ok(ResolveOutcome::SignedIn(session)) => {
            *state.session.write().await = Some(session);
        }
        Ok(ResolveOutcome::Created) => {
            *state.notice.write().await =
                Some("Identity Created! Click Enter again.".to_string());
        }
        Ok(ResolveOutcome::EmptyUsername) => {}
        Err(e) => return render::connection_error(&e).into_response(),
    }
    Redirect::to("/").into_response()
}

#[instrument(skip(state, form))]
async fn update_profile(
    State(state): State<SharedState>,
    Form(form): Form<ProfileForm>,
) -> Response {
    event!(Level::INFO, "Processing profile update");

    let session = state.session.read().await.clone();
    if let Some(session) = session {
        let style = AvatarStyle::from_cell(&form.style);
        if let Err(e) =
            identity::update_appearance(&state.profiles, &session, &form.pfp, style).await
        {
            return render::connection_error(&e).into_response();
        }
    }
    Redirect::to("/").into_response()
}

#[instrument(skip(state, form))]
async fn submit(State(state): State<SharedState>, Form(form): Form<PostForm>) -> Response {
    event!(Level::INFO, "Processing post submission");

    let session = state.session.read().await.clone();
    let author = session.as_ref().map(|s| s.username.as_str()).unwrap_or("");
    match posting::submit_post(&state.posts, author, &form.text).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => render::connection_error(&e).into_response(),
    }
}

#[instrument(skip(state))]
async fn logout(State(state): State<SharedState>) -> Redirect {
    *state.session.write().await = None;
    Redirect::to("/")
}
