//! HTTP routes.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sheetkeep_domain::CharacterId;
use sheetkeep_shared::{
    AuthGrantView, AuthUserView, CharacterCard, CreatedCharacter, CredentialsRequest, ErrorBody,
    RedirectTarget, SheetCommand, SheetStateView,
};

use crate::app::App;
use crate::infrastructure::ports::{AuthGrant, AuthUser, IdentityError, RepoError};
use crate::use_cases::{AuthContext, AuthError, RosterError, SheetError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/auth/sign-in", post(sign_in))
        .route("/api/auth/sign-up", post(sign_up))
        .route("/api/auth/sign-out", post(sign_out))
        .route("/api/auth/me", get(me))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/{id}",
            axum::routing::delete(delete_character),
        )
        .route(
            "/api/characters/{id}/sheet",
            get(open_sheet).delete(close_sheet),
        )
        .route("/api/characters/{id}/sheet/commands", post(apply_command))
        .route("/api/characters/{id}/sheet/flush", post(flush_sheet))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Auth extractor
// =============================================================================

/// The caller's auth context, resolved from an `Authorization: Bearer` header.
///
/// Never rejects; a missing or dead token is `Anonymous`.
pub struct Auth {
    pub ctx: AuthContext,
    pub token: Option<String>,
}

impl Auth {
    fn user(&self) -> Result<&AuthUser, ApiError> {
        self.ctx
            .user()
            .ok_or_else(|| ApiError::Unauthorized("Not signed in".to_string()))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

impl FromRequestParts<Arc<App>> for Auth {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        app: &Arc<App>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts);
        let ctx = app.use_cases.auth.context_for(token.as_deref()).await;
        Ok(Auth { ctx, token })
    }
}

// =============================================================================
// Auth
// =============================================================================

fn grant_view(grant: AuthGrant) -> AuthGrantView {
    AuthGrantView {
        token: grant.token,
        user: AuthUserView::new(grant.user.uid, grant.user.email),
    }
}

async fn sign_in(
    State(app): State<Arc<App>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthGrantView>, ApiError> {
    let grant = app
        .use_cases
        .auth
        .sign_in(&request.email, &request.password)
        .await?;
    Ok(Json(grant_view(grant)))
}

async fn sign_up(
    State(app): State<Arc<App>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthGrantView>), ApiError> {
    let grant = app
        .use_cases
        .auth
        .sign_up(&request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(grant_view(grant))))
}

async fn sign_out(State(app): State<Arc<App>>, auth: Auth) -> Result<StatusCode, ApiError> {
    let token = auth
        .token
        .ok_or_else(|| ApiError::Unauthorized("Not signed in".to_string()))?;
    app.use_cases.auth.sign_out(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn me(auth: Auth) -> Result<Json<AuthUserView>, ApiError> {
    let user = auth.user()?;
    Ok(Json(AuthUserView::new(user.uid.clone(), user.email.clone())))
}

// =============================================================================
// Roster
// =============================================================================

async fn list_characters(
    State(app): State<Arc<App>>,
    auth: Auth,
) -> Result<Json<Vec<CharacterCard>>, ApiError> {
    Ok(Json(app.use_cases.roster.list(&auth.ctx).await?))
}

async fn create_character(
    State(app): State<Arc<App>>,
    auth: Auth,
) -> Result<(StatusCode, Json<CreatedCharacter>), ApiError> {
    let id = app.use_cases.roster.create(&auth.ctx).await?;
    Ok((StatusCode::CREATED, Json(CreatedCharacter { id })))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    auth: Auth,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = CharacterId::new(id);
    let user = auth.user()?;
    app.use_cases.roster.delete(&auth.ctx, &id).await?;
    // Only once the document is gone. A save racing the delete finds no row.
    app.use_cases.sheet.discard(user, &id).await;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Sheet
// =============================================================================

fn sheet_response(view: SheetStateView) -> Response {
    let status = match &view {
        SheetStateView::Ready(_) => StatusCode::OK,
        SheetStateView::Loading { .. } => StatusCode::ACCEPTED,
        SheetStateView::Redirecting {
            target: RedirectTarget::Login,
            ..
        } => StatusCode::UNAUTHORIZED,
        SheetStateView::Redirecting {
            target: RedirectTarget::Roster,
            ..
        } => StatusCode::NOT_FOUND,
    };
    (status, Json(view)).into_response()
}

async fn open_sheet(
    State(app): State<Arc<App>>,
    auth: Auth,
    Path(id): Path<String>,
) -> Response {
    let view = app.use_cases.sheet.open(&auth.ctx, &CharacterId::new(id)).await;
    sheet_response(view)
}

async fn apply_command(
    State(app): State<Arc<App>>,
    auth: Auth,
    Path(id): Path<String>,
    Json(command): Json<SheetCommand>,
) -> Result<Response, ApiError> {
    let view = app
        .use_cases
        .sheet
        .apply(&auth.ctx, &CharacterId::new(id), command)
        .await?;
    Ok(sheet_response(view))
}

async fn flush_sheet(
    State(app): State<Arc<App>>,
    auth: Auth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let view = app
        .use_cases
        .sheet
        .flush(&auth.ctx, &CharacterId::new(id))
        .await?;
    Ok(sheet_response(view))
}

async fn close_sheet(
    State(app): State<Arc<App>>,
    auth: Auth,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .sheet
        .close(&auth.ctx, &CharacterId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    /// 401 pointing the browser at the sign-in page
    Unauthorized(String),
    Conflict(String),
    /// The sheet is loading or redirecting
    NotReady(SheetStateView),
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::new("Not found").with_redirect(RedirectTarget::Roster)),
            )
                .into_response(),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(msg))).into_response()
            }
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody::new(msg).with_redirect(RedirectTarget::Login)),
            )
                .into_response(),
            ApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(ErrorBody::new(msg))).into_response()
            }
            ApiError::NotReady(view) => sheet_response(view),
            ApiError::Unavailable(msg) => {
                tracing::warn!(error = %msg, "Service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorBody::new("Service unavailable")),
                )
                    .into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Internal error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthenticated => ApiError::Unauthorized(e.to_string()),
            AuthError::Identity(IdentityError::InvalidCredentials) => {
                ApiError::Unauthorized(e.to_string())
            }
            AuthError::Identity(IdentityError::EmailInUse(_)) => ApiError::Conflict(e.to_string()),
            AuthError::Identity(IdentityError::InvalidEmail)
            | AuthError::Identity(IdentityError::WeakPassword { .. }) => {
                ApiError::BadRequest(e.to_string())
            }
            AuthError::Identity(IdentityError::Unavailable(msg)) => ApiError::Unavailable(msg),
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(e: RosterError) -> Self {
        match e {
            RosterError::Unauthenticated => ApiError::Unauthorized(e.to_string()),
            RosterError::NotFound(_) => ApiError::NotFound,
            RosterError::Repo(e) => e.into(),
        }
    }
}

impl From<SheetError> for ApiError {
    fn from(e: SheetError) -> Self {
        match e {
            SheetError::Unauthenticated => ApiError::Unauthorized(e.to_string()),
            SheetError::NotReady(view) => ApiError::NotReady(view),
            SheetError::Domain(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{SequentialRandom, SystemClock};
    use crate::infrastructure::documents::InMemoryCharacterStore;
    use crate::infrastructure::identity::LocalIdentityProvider;
    use crate::infrastructure::ports::{CharacterStore, MockCharacterStore};
    use axum::body::Body;
    use axum::http::{Method, Request as HttpRequest};
    use serde_json::{json, Value};
    use sheetkeep_domain::{Character, CharacterDocument, UserId};
    use std::time::Duration;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn app() -> Router {
        let random = Arc::new(SequentialRandom::new());
        app_with(Arc::new(InMemoryCharacterStore::new(random.clone())), random).await
    }

    async fn app_with(store: Arc<dyn CharacterStore>, random: Arc<SequentialRandom>) -> Router {
        let app = Arc::new(App::new(
            store,
            Arc::new(LocalIdentityProvider::new(random)),
            Arc::new(SystemClock::new()),
            Duration::from_millis(1000),
        ));
        app.start().await.unwrap();
        routes().with_state(app)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = HttpRequest::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn signed_up(router: &Router) -> String {
        let (status, body) = send(
            router,
            Method::POST,
            "/api/auth/sign-up",
            None,
            Some(json!({"email": "reiner@altdorf.example", "password": "hunter22"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["display_name"], "reiner");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let router = app().await;
        let response = router
            .oneshot(HttpRequest::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn roster_without_a_token_points_at_sign_in() {
        let router = app().await;
        let (status, body) = send(&router, Method::GET, "/api/characters", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["redirect"], "/");
    }

    #[tokio::test]
    async fn anonymous_sheet_redirects_to_login() {
        let router = app().await;
        let (status, body) =
            send(&router, Method::GET, "/api/characters/c1/sheet", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["state"], "redirecting");
        assert_eq!(body["redirect"], "/");
    }

    #[tokio::test]
    async fn me_reports_the_signed_in_user_until_sign_out() {
        let router = app().await;
        let token = signed_up(&router).await;

        let (status, body) = send(&router, Method::GET, "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "reiner@altdorf.example");

        let (status, _) =
            send(&router, Method::POST, "/api/auth/sign-out", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, Method::GET, "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_sign_up_conflicts() {
        let router = app().await;
        signed_up(&router).await;
        let (status, _) = send(
            &router,
            Method::POST,
            "/api/auth/sign-up",
            None,
            Some(json!({"email": "reiner@altdorf.example", "password": "another1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn create_edit_and_delete_a_character() {
        let router = app().await;
        let token = signed_up(&router).await;

        let (status, created) =
            send(&router, Method::POST, "/api/characters", Some(&token), None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, cards) =
            send(&router, Method::GET, "/api/characters", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cards.as_array().unwrap().len(), 1);
        assert_eq!(cards[0]["name"], "New Character");

        let sheet_uri = format!("/api/characters/{id}/sheet");
        let (status, sheet) = send(&router, Method::GET, &sheet_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sheet["state"], "ready");
        assert_eq!(sheet["save_label"], "All changes saved");

        let (status, sheet) = send(
            &router,
            Method::POST,
            &format!("{sheet_uri}/commands"),
            Some(&token),
            Some(json!({
                "type": "edit_characteristic",
                "name": "WS",
                "field": "advances",
                "value": "10"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sheet["characteristics"]["columns"][0]["total"], 40);
        assert_eq!(sheet["save_status"]["state"], "pending");

        let (status, sheet) = send(
            &router,
            Method::POST,
            &format!("{sheet_uri}/flush"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sheet["save_status"]["state"], "saved");

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/api/characters/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&router, Method::GET, &sheet_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["redirect"], "/dashboard");
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_pending_edit() {
        // The first account created from a fresh SequentialRandom
        let owner = UserId::new(Uuid::from_u128(1).simple().to_string());
        let mut store = MockCharacterStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(CharacterDocument::from(Character::from_template(owner.clone())))));
        store
            .expect_delete()
            .times(1)
            .returning(|_| Err(RepoError::database("delete_character", "database is locked")));
        store.expect_update().times(1).returning(|_, _| Ok(()));
        let router = app_with(Arc::new(store), Arc::new(SequentialRandom::new())).await;
        let token = signed_up(&router).await;

        let sheet_uri = "/api/characters/c1/sheet";
        let (status, _) = send(
            &router,
            Method::POST,
            &format!("{sheet_uri}/commands"),
            Some(&token),
            Some(json!({"type": "set_identity", "field": "name", "value": "Gunther"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) =
            send(&router, Method::DELETE, "/api/characters/c1", Some(&token), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, sheet) =
            send(&router, Method::POST, &format!("{sheet_uri}/flush"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sheet["character"]["name"], "Gunther");
        assert_eq!(sheet["save_status"]["state"], "saved");
    }

    #[tokio::test]
    async fn out_of_range_row_edit_is_a_bad_request() {
        let router = app().await;
        let token = signed_up(&router).await;
        let (_, created) = send(&router, Method::POST, "/api/characters", Some(&token), None).await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/characters/{id}/sheet/commands"),
            Some(&token),
            Some(json!({"type": "delete_talent", "index": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("out of range"));
    }
}
