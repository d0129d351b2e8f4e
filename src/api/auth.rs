use actix_web::{web, HttpResponse};

use super::{page_context, redirect, AppState};
use crate::middleware::Session;
use crate::models::{FlashLevel, LoginForm, RegisterForm};
use crate::services::auth_service::{self, LoginOutcome};
use crate::utils::AppError;
use crate::views::{self, auth::{login_page, register_page}};

/// GET /user - registration form
pub async fn register_form(state: web::Data<AppState>, session: Session) -> HttpResponse {
    let ctx = page_context(&state, &session).await;
    views::html(register_page(&ctx))
}

/// POST /user
pub async fn register(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let Some((email, password)) = form.credentials() else {
        log::warn!("❌ Registration rejected: missing email or password");
        session.flash(FlashLevel::Error, "Email and password required");
        return Ok(redirect("/user"));
    };

    log::info!("📝 POST /user - email: {}", email);

    match auth_service::register(state.users.as_ref(), email, password, state.bcrypt_cost).await {
        Ok(_) => {
            session.flash(FlashLevel::Success, "Registered successfully!");
            Ok(redirect("/home"))
        }
        Err(AppError::Conflict(e)) => {
            log::warn!("❌ Registration failed: {}", e);
            session.flash(FlashLevel::Error, "Email already registered");
            Ok(redirect("/user"))
        }
        Err(e) => Err(e),
    }
}

/// GET /login - login form
pub async fn login_form(state: web::Data<AppState>, session: Session) -> HttpResponse {
    let ctx = page_context(&state, &session).await;
    views::html(login_page(&ctx))
}

/// POST /login
///
/// Failures answer with a bare status and text body, not a page.
pub async fn login(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let email = form.email.as_deref().map(str::trim).unwrap_or_default();
    let password = form.password.as_deref().unwrap_or_default();

    log::info!("🔐 POST /login - email: {}", email);

    if email.is_empty() {
        return Ok(plain_text(HttpResponse::BadRequest(), "Email not registered"));
    }

    match auth_service::login(state.users.as_ref(), email, password).await? {
        LoginOutcome::Authenticated(user) => {
            log::info!("✅ Login successful: {}", email);
            session.set_user_id(user.id_hex());
            Ok(redirect("/home"))
        }
        LoginOutcome::UnknownEmail => {
            log::warn!("❌ Login failed: {} - email not registered", email);
            Ok(plain_text(HttpResponse::BadRequest(), "Email not registered"))
        }
        LoginOutcome::WrongPassword => {
            log::warn!("❌ Login failed: {} - incorrect password", email);
            Ok(plain_text(HttpResponse::Unauthorized(), "Incorrect password"))
        }
    }
}

/// POST /logout
pub async fn logout(session: Session) -> HttpResponse {
    log::info!("👋 POST /logout");
    session.destroy();
    redirect("/home")
}

fn plain_text(mut builder: actix_web::HttpResponseBuilder, body: &'static str) -> HttpResponse {
    builder.content_type("text/plain; charset=utf-8").body(body)
}
