//! Server-rendered Pages
//!
//! Small HTML shells. The home page reflects login state, `/about` sits
//! behind the gate in redirect mode.

use std::sync::Arc;

use auth::domain::repository::AuthSessionRepository;
use auth::{AuthConfig, AuthMiddlewareState, AuthStatus, CurrentUser, GateFailure};
use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::response::Html;
use axum::{Router, routing::get};
use settings::{ConfigCache, ConfigSource, SettingsResult, keys};

const DEFAULT_SITE_NAME: &str = "Items";

pub struct PagesState<S> {
    pub settings: Arc<ConfigCache<S>>,
}

impl<S> Clone for PagesState<S> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
        }
    }
}

/// Page routes; `repo` and `config` back the session checks
pub fn pages_router<S, R>(
    settings: Arc<ConfigCache<S>>,
    repo: Arc<R>,
    config: Arc<AuthConfig>,
) -> Router
where
    S: ConfigSource + Send + Sync + 'static,
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let check = AuthMiddlewareState::new(repo.clone(), config.clone(), GateFailure::LOGIN_REDIRECT);
    let gate = AuthMiddlewareState::new(repo, config, GateFailure::LOGIN_REDIRECT);

    Router::new()
        .route(
            "/",
            get(home::<S>).route_layer(from_fn_with_state(check, auth::check_session::<R>)),
        )
        .route(
            "/about",
            get(about::<S>).route_layer(from_fn_with_state(gate, auth::require_session::<R>)),
        )
        .route("/items", get(items_page))
        .route("/login", get(login_page))
        .with_state(PagesState { settings })
}

async fn site_name<S>(settings: &ConfigCache<S>) -> SettingsResult<String>
where
    S: ConfigSource + Sync,
{
    settings.get_or(keys::SITE_NAME, DEFAULT_SITE_NAME).await
}

/// GET /
async fn home<S>(
    State(state): State<PagesState<S>>,
    status: AuthStatus,
) -> SettingsResult<Html<String>>
where
    S: ConfigSource + Send + Sync + 'static,
{
    let site = site_name(&state.settings).await?;

    let body = match &status.user {
        Some(user) => format!(
            r#"<p>Logged in as <strong>{}</strong>.</p>
<form method="post" action="/auth/logout"><button type="submit">Log out</button></form>"#,
            escape_html(&user.username)
        ),
        None => r#"<p><a href="/login">Log in</a></p>"#.to_string(),
    };

    Ok(Html(layout(&site, &site, &body)))
}

/// GET /about (gated)
async fn about<S>(
    State(state): State<PagesState<S>>,
    user: CurrentUser,
) -> SettingsResult<Html<String>>
where
    S: ConfigSource + Send + Sync + 'static,
{
    let site = site_name(&state.settings).await?;
    let name = if user.nickname.is_empty() {
        &user.username
    } else {
        &user.nickname
    };

    let body = format!(
        "<p>Hello, {}. This is {}.</p>",
        escape_html(name),
        escape_html(&site)
    );

    Ok(Html(layout(&format!("About {site}"), "About", &body)))
}

/// GET /items
async fn items_page() -> Html<String> {
    let body = r#"<ul id="items"></ul>
<form id="add"><input name="value" required><button type="submit">Add</button></form>
<script>
async function load() {
  const res = await fetch('/api/items');
  const items = await res.json();
  const list = document.getElementById('items');
  list.replaceChildren(...items.map(i => {
    const li = document.createElement('li');
    li.textContent = i.id + ': ' + i.value;
    return li;
  }));
}
document.getElementById('add').addEventListener('submit', async e => {
  e.preventDefault();
  const value = new FormData(e.target).get('value');
  await fetch('/api/items/add', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify({value}),
  });
  e.target.reset();
  load();
});
load();
</script>"#;

    Html(layout("Items", "Items", body))
}

/// GET /login
async fn login_page() -> Html<String> {
    let body = r#"<form id="login">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>
<p id="error"></p>
<script>
document.getElementById('login').addEventListener('submit', async e => {
  e.preventDefault();
  const form = new FormData(e.target);
  const res = await fetch('/auth/login', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify({username: form.get('username'), password: form.get('password')}),
  });
  if (res.ok) { window.location = '/'; }
  else { document.getElementById('error').textContent = 'Login failed'; }
});
</script>"#;

    Html(layout("Log in", "Log in", body))
}

fn layout(title: &str, heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{}</title></head>
<body>
<nav><a href="/">Home</a> | <a href="/items">Items</a> | <a href="/about">About</a></nav>
<h1>{}</h1>
{}
</body>
</html>"#,
        escape_html(title),
        escape_html(heading),
        body
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::InMemoryAuthRepository;
    use auth::domain::entity::auth_session::AuthSession;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use chrono::{Duration, Utc};
    use kernel::id::SessionId;
    use settings::StaticConfigSource;
    use tower::ServiceExt;

    const SECRET: &[u8] = b"pages-test-secret";

    fn app(repo: InMemoryAuthRepository) -> Router {
        let settings = Arc::new(ConfigCache::new(StaticConfigSource::new([(
            keys::SITE_NAME,
            "Shop <1>",
        )])));
        pages_router(
            settings,
            Arc::new(repo),
            Arc::new(AuthConfig::new(SECRET.to_vec())),
        )
    }

    async fn logged_in_cookie(repo: &InMemoryAuthRepository, username: &str) -> String {
        let now = Utc::now();
        let session = AuthSession {
            session_id: SessionId::new(),
            user_id: 1,
            username: username.to_string(),
            nickname: String::new(),
            role_id: 87,
            role_name: "member".into(),
            gender: String::new(),
            expires_at_ms: (now + Duration::hours(1)).timestamp_millis(),
            created_at: now,
        };
        let token = platform::crypto::sign_token(SECRET, &session.session_id.to_string());
        repo.insert_session(session).await;
        format!("session={token}")
    }

    async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app.clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn home_uses_site_name_and_login_state() {
        let repo = InMemoryAuthRepository::new();
        let app = app(repo.clone());

        let anonymous = text(get(&app, "/", None).await).await;
        assert!(anonymous.contains("<title>Shop &lt;1&gt;</title>"));
        assert!(anonymous.contains(r#"href="/login""#));

        let cookie = logged_in_cookie(&repo, "alice").await;
        let res = get(&app, "/", Some(&cookie)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(text(res).await.contains("<strong>alice</strong>"));
    }

    #[tokio::test]
    async fn about_redirects_anonymous_visitors() {
        let res = get(&app(InMemoryAuthRepository::new()), "/about", None).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn about_greets_logged_in_user() {
        let repo = InMemoryAuthRepository::new();
        let app = app(repo.clone());
        let cookie = logged_in_cookie(&repo, "bob").await;

        let res = get(&app, "/about", Some(&cookie)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(text(res).await.contains("Hello, bob."));
    }

    #[tokio::test]
    async fn static_pages_render() {
        let app = app(InMemoryAuthRepository::new());
        assert_eq!(get(&app, "/items", None).await.status(), StatusCode::OK);
        assert_eq!(get(&app, "/login", None).await.status(), StatusCode::OK);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }
}
