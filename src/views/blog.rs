use htmlescape::encode_minimal as escape_html;

use super::{layout, PageContext};
use crate::models::Blog;

pub fn blog_list_page(ctx: &PageContext, blogs: &[Blog]) -> String {
    let items: String = if blogs.is_empty() {
        "<p class=\"empty\">No posts yet.</p>\n".to_string()
    } else {
        blogs
            .iter()
            .map(|b| {
                let id = b.id_hex();
                format!(
                    "<article>\n<h2>{title}</h2>\n<p>{content}</p>\n<a href=\"/blog/{id}/edit\">Edit</a>\n<form action=\"/blog/{id}?_method=DELETE\" method=\"POST\"><button>Delete</button></form>\n</article>\n",
                    title = escape_html(&b.title),
                    content = escape_html(&b.content),
                    id = id,
                )
            })
            .collect()
    };

    let main = format!(
        "<h1>My blogs</h1>\n<form action=\"/blog\" method=\"POST\">\n<input type=\"text\" name=\"blog[title]\" placeholder=\"Title\" required />\n<textarea name=\"blog[content]\" placeholder=\"Write something\" required></textarea>\n<button>Publish</button>\n</form>\n{items}",
        items = items,
    );
    layout("My blogs", ctx, &main)
}

pub fn blog_edit_page(ctx: &PageContext, blog: &Blog) -> String {
    let main = format!(
        "<h1>Edit post</h1>\n<form action=\"/blog/{id}/edit?_method=PUT\" method=\"POST\">\n<input type=\"text\" name=\"blog[title]\" value=\"{title}\" required />\n<textarea name=\"blog[content]\" required>{content}</textarea>\n<button>Save</button>\n</form>\n<a href=\"/blog\">Cancel</a>",
        id = blog.id_hex(),
        title = escape_html(&blog.title),
        content = escape_html(&blog.content),
    );
    layout("Edit post", ctx, &main)
}
