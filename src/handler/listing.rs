//! Directory listing module
//!
//! HTML index of a directory that has no index file.

use crate::handler::router::RequestContext;
use crate::http::{self, path::percent_encode};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt::Write;
use std::path::Path;
use tokio::fs;

/// Serve the listing of `dir`; `display_path` is the decoded URL path
pub async fn serve_listing(
    ctx: &RequestContext<'_>,
    dir: &Path,
    display_path: &str,
) -> Response<Full<Bytes>> {
    match read_entries(dir).await {
        Ok(entries) => http::response::build_html_response(
            render_listing(display_path, &entries),
            ctx.is_head,
        ),
        Err(e) => {
            logger::log_warning(&format!(
                "Cannot list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response()
        }
    }
}

/// Entry names, directories suffixed with `/`, sorted case-insensitively
async fn read_entries(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort_by_key(|name| name.to_lowercase());
    Ok(entries)
}

pub fn render_listing(display_path: &str, entries: &[String]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for name in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&percent_encode(name)),
            escape_html(name)
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;

    #[test]
    fn test_render_escapes_names() {
        let html = render_listing("/<dir>/", &["a&b.html".to_string(), "my pics/".to_string()]);
        assert!(html.contains("<title>Directory listing for /&lt;dir&gt;/</title>"));
        assert!(html.contains("<li><a href=\"a%26b.html\">a&amp;b.html</a></li>"));
        assert!(html.contains("<li><a href=\"my%20pics/\">my pics/</a></li>"));
    }

    #[tokio::test]
    async fn test_entries_sorted_and_marked() {
        let dir = TempDir::new("listing_entries");
        dir.write("b.html", "");
        dir.write("A.html", "");
        dir.mkdir("css");

        let entries = read_entries(dir.path()).await.unwrap();
        assert_eq!(entries, vec!["A.html", "b.html", "css/"]);
    }
}
