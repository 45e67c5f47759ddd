// SPDX-License-Identifier: Apache-2.0
//! Server-side HTML. One shared layout, one builder per page. Every piece
//! of interpolated text goes through [`escape_html`].

use crate::flash::Flash;
use quill_model::{Ad, Post, Settings};

pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
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

/// Escaped body text with line breaks preserved.
fn escape_multiline(input: &str) -> String {
    escape_html(input).replace('\n', "<br>\n")
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => format!(
            "<p class=\"flash {}\">{}</p>\n",
            flash.level.as_str(),
            escape_html(&flash.message)
        ),
        None => String::new(),
    }
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}{}\n</body>\n</html>\n",
        escape_html(title),
        flash_banner(flash),
        body
    )
}

fn ads_aside(ads: &[Ad]) -> String {
    if ads.is_empty() {
        return String::new();
    }
    let items: String = ads
        .iter()
        .map(|ad| format!("<li>{}</li>\n", escape_multiline(&ad.content)))
        .collect();
    format!("<aside class=\"ads\"><ul>\n{items}</ul></aside>\n")
}

pub(crate) fn index_page(
    settings: &Settings,
    posts: &[Post],
    ads: &[Ad],
    flash: Option<&Flash>,
) -> String {
    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                "<li><a href=\"/post/{}\">{}</a></li>\n",
                post.id,
                escape_html(&post.title)
            )
        })
        .collect();
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n{}<ul class=\"posts\">\n{}</ul>\n",
        escape_html(&settings.title),
        escape_html(&settings.description),
        ads_aside(ads),
        items
    );
    layout(&settings.title, flash, &body)
}

pub(crate) fn post_page(settings: &Settings, post: &Post, ads: &[Ad]) -> String {
    let body = format!(
        "<p><a href=\"/\">&larr; {}</a></p>\n<article>\n<h1>{}</h1>\n<p>{}</p>\n</article>\n{}",
        escape_html(&settings.title),
        escape_html(&post.title),
        escape_multiline(&post.content),
        ads_aside(ads)
    );
    layout(&post.title, None, &body)
}

pub(crate) fn not_found_page(settings: &Settings) -> String {
    let body = format!(
        "<h1>Post not found</h1>\n<p><a href=\"/\">Back to {}</a></p>\n",
        escape_html(&settings.title)
    );
    layout("Not found", None, &body)
}

pub(crate) fn login_page(flash: Option<&Flash>) -> String {
    let body = "<h1>Admin login</h1>\n\
        <form method=\"post\" action=\"/login\">\n\
        <label>Password <input type=\"password\" name=\"password\"></label>\n\
        <button type=\"submit\">Log in</button>\n\
        </form>\n";
    layout("Login", flash, body)
}

pub(crate) fn dashboard_page(
    settings: &Settings,
    posts: &[Post],
    ads: &[Ad],
    flash: Option<&Flash>,
) -> String {
    let rows: String = posts
        .iter()
        .map(|post| {
            format!(
                "<tr><td>{}</td><td>{}</td>\
                 <td><a href=\"/admin/edit_post/{}\">edit</a> \
                 <a href=\"/admin/delete_post/{}\">delete</a></td></tr>\n",
                post.id,
                escape_html(&post.title),
                post.id,
                post.id
            )
        })
        .collect();
    let ad_items: String = ads
        .iter()
        .map(|ad| format!("<li>{}</li>\n", escape_html(&ad.content)))
        .collect();
    let body = format!(
        "<h1>Dashboard</h1>\n\
         <nav><a href=\"/admin/new_post\">New post</a> | \
         <a href=\"/admin/ads\">Ads</a> | \
         <a href=\"/admin/settings\">Settings</a> | \
         <a href=\"/logout\">Log out</a></nav>\n\
         <h2>Posts</h2>\n<table>\n{rows}</table>\n\
         <h2>Ads</h2>\n<ul>\n{ad_items}</ul>\n"
    );
    layout(&settings.title, flash, &body)
}

pub(crate) fn editor_page(post: Option<&Post>, flash: Option<&Flash>) -> String {
    let (heading, action, title, content) = match post {
        Some(post) => (
            "Edit post",
            format!("/admin/edit_post/{}", post.id),
            escape_html(&post.title),
            escape_html(&post.content),
        ),
        None => (
            "New post",
            "/admin/new_post".to_string(),
            String::new(),
            String::new(),
        ),
    };
    let body = format!(
        "<h1>{heading}</h1>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label>\n\
         <label>Content <textarea name=\"content\">{content}</textarea></label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <p><a href=\"/admin\">Back to dashboard</a></p>\n"
    );
    layout(heading, flash, &body)
}

pub(crate) fn ads_page(ads: &[Ad], flash: Option<&Flash>) -> String {
    let items: String = ads
        .iter()
        .map(|ad| {
            format!(
                "<li>{} <a href=\"/admin/delete_ad/{}\">delete</a></li>\n",
                escape_html(&ad.content),
                ad.id
            )
        })
        .collect();
    let body = format!(
        "<h1>Ads</h1>\n<ul>\n{items}</ul>\n\
         <form method=\"post\" action=\"/admin/ads\">\n\
         <label>Content <textarea name=\"content\"></textarea></label>\n\
         <button type=\"submit\">Add ad</button>\n\
         </form>\n\
         <p><a href=\"/admin\">Back to dashboard</a></p>\n"
    );
    layout("Ads", flash, &body)
}

pub(crate) fn settings_page(settings: &Settings, flash: Option<&Flash>) -> String {
    let body = format!(
        "<h1>Settings</h1>\n\
         <form method=\"post\" action=\"/admin/settings\">\n\
         <label>Title <input type=\"text\" name=\"title\" value=\"{}\"></label>\n\
         <label>Description <input type=\"text\" name=\"description\" value=\"{}\"></label>\n\
         <label>New password <input type=\"password\" name=\"password\" placeholder=\"leave empty to keep\"></label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <p><a href=\"/admin\">Back to dashboard</a></p>\n",
        escape_html(&settings.title),
        escape_html(&settings.description)
    );
    layout("Settings", flash, &body)
}

pub(crate) fn error_page() -> String {
    layout(
        "Error",
        None,
        "<h1>Something went wrong</h1>\n<p><a href=\"/\">Back</a></p>\n",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape_html(r#"<b>&"'x"#),
            "&lt;b&gt;&amp;&quot;&#39;x"
        );
    }

    #[test]
    fn index_escapes_post_titles() {
        let settings = Settings::default();
        let posts = vec![Post {
            id: 1,
            title: "<script>".to_string(),
            content: String::new(),
        }];
        let page = index_page(&settings, &posts, &[], None);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn flash_banner_carries_level_class() {
        let flash = Flash::error("Wrong password");
        let page = login_page(Some(&flash));
        assert!(page.contains("class=\"flash error\""));
        assert!(page.contains("Wrong password"));
    }

    #[test]
    fn editor_prefills_when_editing() {
        let post = Post {
            id: 7,
            title: "T".to_string(),
            content: "C".to_string(),
        };
        let page = editor_page(Some(&post), None);
        assert!(page.contains("action=\"/admin/edit_post/7\""));
        assert!(page.contains("value=\"T\""));
        assert!(page.contains(">C</textarea>"));
    }

    #[test]
    fn post_content_keeps_line_breaks() {
        let settings = Settings::default();
        let post = Post {
            id: 1,
            title: "t".to_string(),
            content: "line one\nline two".to_string(),
        };
        let page = post_page(&settings, &post, &[]);
        assert!(page.contains("line one<br>\nline two"));
    }
}
