use super::{layout, PageContext};

pub fn register_page(ctx: &PageContext) -> String {
    layout("Register", ctx, &credentials_form("Register", "/user", "Create account"))
}

pub fn login_page(ctx: &PageContext) -> String {
    layout("Login", ctx, &credentials_form("Login", "/login", "Log in"))
}

fn credentials_form(heading: &str, action: &str, submit: &str) -> String {
    format!(
        "<h1>{heading}</h1>\n<form action=\"{action}\" method=\"POST\">\n<label for=\"email\">Email</label>\n<input id=\"email\" type=\"email\" name=\"user[email]\" required />\n<label for=\"password\">Password</label>\n<input id=\"password\" type=\"password\" name=\"user[password]\" required />\n<button>{submit}</button>\n</form>",
    )
}
