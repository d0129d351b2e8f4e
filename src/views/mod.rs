//! Server-rendered pages. Every value that reaches the markup goes through
//! `escape_html`.

pub mod auth;
pub mod blog;
pub mod home;

use actix_web::HttpResponse;
use htmlescape::encode_minimal as escape_html;

use crate::models::{FlashLevel, FlashMessage};

/// Data every page needs from the layout
#[derive(Debug, Default, Clone)]
pub struct PageContext {
    /// Email of the logged-in user
    pub current_user: Option<String>,
    pub flashes: Vec<FlashMessage>,
}

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn layout(title: &str, ctx: &PageContext, main: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n<title>{title} | Bloggers</title>\n</head>\n<body>\n{nav}\n{flashes}<main>\n{main}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
        nav = nav(ctx),
        flashes = flashes(&ctx.flashes),
        main = main,
    )
}

fn nav(ctx: &PageContext) -> String {
    match &ctx.current_user {
        Some(email) => format!(
            "<nav>\n<a href=\"/home\">Home</a>\n<a href=\"/blog\">My blogs</a>\n<span class=\"user\">{email}</span>\n<form action=\"/logout\" method=\"POST\"><button>Logout</button></form>\n</nav>",
            email = escape_html(email),
        ),
        None => "<nav>\n<a href=\"/home\">Home</a>\n<a href=\"/login\">Login</a>\n<a href=\"/user\">Register</a>\n</nav>".to_string(),
    }
}

fn flashes(messages: &[FlashMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            let class = match m.level {
                FlashLevel::Success => "success",
                FlashLevel::Error => "error",
            };
            format!(
                "<div class=\"flash {class}\" role=\"alert\">{msg}</div>\n",
                class = class,
                msg = escape_html(&m.message),
            )
        })
        .collect()
}
