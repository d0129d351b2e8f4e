use super::{layout, PageContext};

pub fn home_page(ctx: &PageContext) -> String {
    let main = match &ctx.current_user {
        Some(_) => "<h1>Welcome back</h1>\n<p><a href=\"/blog\">Go to your blogs</a></p>",
        None => "<h1>Bloggers</h1>\n<p>Write and keep your own posts. <a href=\"/user\">Register</a> or <a href=\"/login\">log in</a> to start.</p>",
    };
    layout("Home", ctx, main)
}
