use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, CookieJar, Key, SameSite},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use mongodb::bson::DateTime as BsonDateTime;
use std::cell::RefCell;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::config::SessionConfig;
use crate::models::{FlashLevel, FlashMessage, SessionRecord};
use crate::repositories::SessionStore;
use crate::utils::AppError;

/// Per-request handle to the session. Cheap to clone; all clones share state.
#[derive(Clone, Default)]
pub struct Session(Rc<RefCell<SessionState>>);

#[derive(Clone, Debug, Default)]
struct SessionState {
    id: Option<String>,
    user_id: Option<String>,
    flash: Vec<FlashMessage>,
    last_modified: Option<BsonDateTime>,
    changed: bool,
    renew: bool,
    destroyed: bool,
}

impl Session {
    fn from_record(record: Option<SessionRecord>) -> Self {
        let state = match record {
            Some(r) => SessionState {
                id: Some(r.id),
                user_id: r.user_id,
                flash: r.flash,
                last_modified: Some(r.last_modified),
                ..Default::default()
            },
            None => SessionState::default(),
        };
        Session(Rc::new(RefCell::new(state)))
    }

    pub fn user_id(&self) -> Option<String> {
        self.0.borrow().user_id.clone()
    }

    /// Marks the session as logged in. The session id is regenerated on save.
    pub fn set_user_id(&self, user_id: String) {
        let mut state = self.0.borrow_mut();
        state.user_id = Some(user_id);
        state.changed = true;
        state.renew = true;
    }

    pub fn flash(&self, level: FlashLevel, message: impl Into<String>) {
        let mut state = self.0.borrow_mut();
        state.flash.push(FlashMessage { level, message: message.into() });
        state.changed = true;
    }

    /// Removes and returns pending flash messages
    pub fn take_flashes(&self) -> Vec<FlashMessage> {
        let mut state = self.0.borrow_mut();
        if state.flash.is_empty() {
            return Vec::new();
        }
        state.changed = true;
        std::mem::take(&mut state.flash)
    }

    pub fn destroy(&self) {
        let mut state = self.0.borrow_mut();
        state.destroyed = true;
        state.user_id = None;
        state.flash.clear();
    }

    fn snapshot(&self) -> SessionState {
        self.0.borrow().clone()
    }
}

impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = req.extensions().get::<Session>().cloned().unwrap_or_else(|| {
            log::warn!("⚠️  SessionMiddleware not mounted, using a detached session");
            Session::default()
        });
        ready(Ok(session))
    }
}

/// Cookie-keyed sessions persisted through a `SessionStore`.
///
/// The cookie carries the session id signed with a key derived from
/// `SessionConfig::secret`; cookies that fail verification are ignored.
pub struct SessionMiddleware {
    store: Arc<dyn SessionStore>,
    config: Rc<SessionConfig>,
    key: Rc<Key>,
}

impl SessionMiddleware {
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        let key = signing_key(&config);
        Self { store, config: Rc::new(config), key: Rc::new(key) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            store: Arc::clone(&self.store),
            config: Rc::clone(&self.config),
            key: Rc::clone(&self.key),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    store: Arc<dyn SessionStore>,
    config: Rc<SessionConfig>,
    key: Rc<Key>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let store = Arc::clone(&self.store);
        let config = Rc::clone(&self.config);
        let key = Rc::clone(&self.key);

        Box::pin(async move {
            let cookie_id = req
                .cookie(&config.cookie_name)
                .filter(|c| !c.value().is_empty())
                .and_then(|c| {
                    let id = verify_cookie(&key, c);
                    if id.is_none() {
                        log::warn!("⚠️  Rejected session cookie with a bad signature");
                    }
                    id
                });

            let record = match &cookie_id {
                Some(id) => store.load(id).await.unwrap_or_else(|e| {
                    log::error!("❌ Failed to load session: {}", e);
                    None
                }),
                None => None,
            };

            let session = Session::from_record(record);
            req.extensions_mut().insert(session.clone());

            let mut res = service.call(req).await?;

            if let Some(cookie) = persist(&session, store.as_ref(), &config).await? {
                res.response_mut().add_cookie(&sign_cookie(&key, cookie))?;
            }

            Ok(res)
        })
    }
}

/// Writes session changes back to the store and returns the cookie to send, if any
async fn persist(
    session: &Session,
    store: &dyn SessionStore,
    config: &SessionConfig,
) -> Result<Option<Cookie<'static>>, AppError> {
    let state = session.snapshot();
    let now = BsonDateTime::now();
    let expires = BsonDateTime::from_millis(now.timestamp_millis() + config.ttl_secs * 1000);

    if state.destroyed {
        return match state.id {
            Some(id) => {
                store.destroy(&id).await?;
                log::debug!("🗑️  Session destroyed");
                Ok(Some(removal_cookie(config)))
            }
            None => Ok(None),
        };
    }

    if state.changed {
        // saveUninitialized: false
        if state.id.is_none() && state.user_id.is_none() && state.flash.is_empty() {
            return Ok(None);
        }

        let id = match state.id {
            Some(old) if state.renew => {
                store.destroy(&old).await?;
                new_session_id()
            }
            Some(id) => id,
            None => new_session_id(),
        };

        let record = SessionRecord {
            id,
            user_id: state.user_id,
            flash: state.flash,
            expires,
            last_modified: now,
        };
        store.save(&record).await?;
        return Ok(Some(session_cookie(&record.id, config)));
    }

    if let (Some(id), Some(last)) = (state.id, state.last_modified) {
        let idle_ms = now.timestamp_millis() - last.timestamp_millis();
        if idle_ms >= config.touch_after_secs * 1000 {
            store.touch(&id, expires).await?;
            return Ok(Some(session_cookie(&id, config)));
        }
    }

    Ok(None)
}

pub const MIN_SECRET_LEN: usize = 32;

/// Derives the cookie signing key from the configured secret
pub fn signing_key(config: &SessionConfig) -> Key {
    if config.secret.len() < MIN_SECRET_LEN {
        log::error!("❌ Session secret too short, using a random key for this process");
        return Key::generate();
    }
    Key::derive_from(config.secret.as_bytes())
}

/// Signs a non-empty cookie value; removal cookies pass through unchanged
pub(crate) fn sign_cookie(key: &Key, cookie: Cookie<'static>) -> Cookie<'static> {
    if cookie.value().is_empty() {
        return cookie;
    }
    let name = cookie.name().to_string();
    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(cookie.clone());
    jar.get(&name).cloned().unwrap_or(cookie)
}

/// Returns the session id carried by a signed cookie, or `None` if tampered
pub(crate) fn verify_cookie(key: &Key, cookie: Cookie<'static>) -> Option<String> {
    let name = cookie.name().to_string();
    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    jar.signed(key).get(&name).map(|c| c.value().to_string())
}

fn new_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn session_cookie(id: &str, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), id.to_string())
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(config.ttl_secs))
        .finish()
}

fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), String::new())
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish()
}
