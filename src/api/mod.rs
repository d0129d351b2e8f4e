pub mod auth;
pub mod blogs;
pub mod health;
pub mod home;


use actix_web::{http::header, web, HttpResponse};
use std::sync::Arc;

use crate::middleware::Session;
use crate::repositories::{BlogRepository, UserRepository};
use crate::views::PageContext;

/// Shared handler state
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub bcrypt_cost: u32,
}

/// Registers every route of the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home::index))
        .route("/home", web::get().to(home::home))
        .route("/health", web::get().to(health::health_check))
        // Auth
        .service(
            web::resource("/user")
                .route(web::get().to(auth::register_form))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::post().to(auth::logout))
        // Blogs
        .service(
            web::resource("/blog")
                .route(web::get().to(blogs::list_blogs))
                .route(web::post().to(blogs::create_blog)),
        )
        .service(
            web::resource("/blog/{id}/edit")
                .route(web::get().to(blogs::edit_form))
                .route(web::put().to(blogs::update_blog)),
        )
        .route("/blog/{id}", web::delete().to(blogs::delete_blog));
}

/// 302 Found, like Express' `res.redirect`
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Builds the layout data: consumes pending flashes and resolves the current user
pub async fn page_context(state: &AppState, session: &Session) -> PageContext {
    let flashes = session.take_flashes();

    let current_user = match session
        .user_id()
        .and_then(|id| mongodb::bson::oid::ObjectId::parse_str(&id).ok())
    {
        Some(id) => match state.users.find_by_id(&id).await {
            Ok(user) => user.map(|u| u.email),
            Err(e) => {
                log::error!("❌ Error finding current user: {}", e);
                None
            }
        },
        None => None,
    };

    PageContext { current_user, flashes }
}
