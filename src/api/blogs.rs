use actix_web::{web, HttpResponse};
use mongodb::bson::oid::ObjectId;

use super::{page_context, redirect, AppState};
use crate::middleware::{LoggedIn, Session};
use crate::models::{BlogForm, FlashLevel};
use crate::utils::AppError;
use crate::views::{self, blog::{blog_edit_page, blog_list_page}};

/// GET /blog - posts of the logged-in user
pub async fn list_blogs(
    user: LoggedIn,
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let blogs = state.blogs.list_by_owner(&user.user_id).await?;
    log::debug!("📋 {} blogs for user {}", blogs.len(), user.user_id);

    let ctx = page_context(&state, &session).await;
    Ok(views::html(blog_list_page(&ctx, &blogs)))
}

/// POST /blog - create a post owned by the logged-in user
pub async fn create_blog(
    user: LoggedIn,
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<BlogForm>,
) -> Result<HttpResponse, AppError> {
    let Some((title, content)) = form.fields() else {
        session.flash(FlashLevel::Error, "Title and content required");
        return Ok(redirect("/blog"));
    };

    let blog = state.blogs.create(user.user_id, title, content).await?;
    log::info!("➕ Blog {} created by {}", blog.id_hex(), user.user_id);

    Ok(redirect("/"))
}

/// GET /blog/{id}/edit - only the owner gets the form
pub async fn edit_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let blog = match parse_id(&path) {
        Some(id) => state.blogs.find_by_id(&id).await?,
        None => None,
    };

    let owned = match (&blog, session.user_id()) {
        (Some(b), Some(uid)) => b.is_owned_by(&uid),
        _ => false,
    };

    match blog {
        Some(blog) if owned => {
            let ctx = page_context(&state, &session).await;
            Ok(views::html(blog_edit_page(&ctx, &blog)))
        }
        _ => {
            log::warn!("🚫 Edit denied for blog {}", path.as_str());
            session.flash(FlashLevel::Error, "Access denied");
            Ok(redirect("/blog"))
        }
    }
}

/// PUT /blog/{id}/edit
///
/// Ownership is NOT checked here, unlike the edit form. Known inconsistency.
pub async fn update_blog(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<BlogForm>,
) -> Result<HttpResponse, AppError> {
    let Some(id) = parse_id(&path) else {
        log::warn!("⚠️  Update with malformed blog id: {}", path.as_str());
        return Ok(redirect("/blog"));
    };

    let Some((title, content)) = form.fields() else {
        session.flash(FlashLevel::Error, "Title and content required");
        return Ok(redirect("/blog"));
    };

    if state.blogs.update(&id, title, content).await? {
        log::info!("💾 Blog {} updated", id);
    } else {
        log::warn!("⚠️  Blog {} not found for update", id);
    }

    Ok(redirect("/blog"))
}

/// DELETE /blog/{id}
///
/// Ownership is NOT checked here either.
pub async fn delete_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    match parse_id(&path) {
        Some(id) => {
            if state.blogs.delete(&id).await? {
                log::info!("❌ Blog {} deleted", id);
            } else {
                log::warn!("⚠️  Blog {} not found for delete", id);
            }
        }
        None => log::warn!("⚠️  Delete with malformed blog id: {}", path.as_str()),
    }

    Ok(redirect("/blog"))
}

fn parse_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw).ok()
}
