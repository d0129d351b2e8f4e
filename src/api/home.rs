use actix_web::{web, HttpResponse};

use super::{page_context, redirect, AppState};
use crate::middleware::Session;
use crate::views::{self, home::home_page};

/// GET / - sends visitors to the landing page
pub async fn index() -> HttpResponse {
    redirect("/home")
}

/// GET /home
pub async fn home(state: web::Data<AppState>, session: Session) -> HttpResponse {
    let ctx = page_context(&state, &session).await;
    views::html(home_page(&ctx))
}
