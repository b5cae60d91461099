//! Static file serving module
//!
//! Resolves a request path under the served root and builds the response:
//! files, index files, directory listings and redirects.

use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a GET or HEAD request from `root`
pub async fn serve(
    ctx: &RequestContext<'_>,
    root: &Path,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    let translated = path::translate_path(root, ctx.path);

    let Some(target) = resolve_within_root(root, &translated.fs_path, ctx.path).await else {
        return http::build_404_response();
    };

    let metadata = match fs::metadata(&target).await {
        Ok(m) => m,
        Err(_) => return http::build_404_response(),
    };

    if metadata.is_dir() {
        if !translated.trailing_slash {
            return http::build_301_response(&slash_location(ctx));
        }
        if let Some(index) = find_index_file(&target, index_files).await {
            return serve_file(ctx, &index).await;
        }
        return listing::serve_listing(ctx, &target, &translated.decoded).await;
    }

    // A trailing slash names a directory, never a file
    if translated.trailing_slash {
        return http::build_404_response();
    }

    serve_file(ctx, &target).await
}

/// Canonicalize `candidate` and make sure it is still inside `root`
///
/// Lexical cleanup already happened during translation; this catches
/// symlinks pointing out of the tree.
async fn resolve_within_root(root: &Path, candidate: &Path, request_path: &str) -> Option<PathBuf> {
    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Served directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // Missing files are the common 404, not worth a warning
    let canonical = fs::canonicalize(candidate).await.ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return None;
    }
    Some(canonical)
}

async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for name in index_files {
        let candidate = dir.join(name);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

/// Original path with a trailing slash, query preserved
///
/// Leading slashes collapse to one: `//host/` would be a protocol-relative
/// URL pointing at another host.
fn slash_location(ctx: &RequestContext<'_>) -> String {
    let path = format!("/{}", ctx.path.trim_start_matches('/'));
    match ctx.query {
        Some(q) => format!("{path}/?{q}"),
        None => format!("{path}/"),
    }
}

/// Serve a single regular file, honoring `If-Modified-Since`
async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    let modified = match fs::metadata(file_path).await.and_then(|m| m.modified()) {
        Ok(t) => Some(t),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return http::build_404_response(),
        Err(_) => None,
    };

    let last_modified = modified.map(cache::format_http_date).unwrap_or_default();
    if let Some(modified) = modified {
        if cache::is_not_modified(ctx.if_modified_since, modified) {
            return http::build_304_response(&last_modified);
        }
    }

    match fs::read(file_path).await {
        Ok(content) => http::response::build_file_response(
            Bytes::from(content),
            mime::content_type(file_path),
            &last_modified,
            ctx.is_head,
        ),
        Err(e) if e.kind() == io::ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;
    use http_body_util::BodyExt;

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            query: None,
            is_head: false,
            if_modified_since: None,
        }
    }

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string()]
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_serves_file_contents() {
        let dir = TempDir::new("static_file");
        dir.write("avatar.png", "not really a png");

        let resp = serve(&ctx("/avatar.png"), dir.path(), &index_files()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "image/png");
        assert!(resp.headers().contains_key("last-modified"));
        assert_eq!(body_of(resp).await, "not really a png");
    }

    #[tokio::test]
    async fn test_percent_encoded_name() {
        let dir = TempDir::new("static_encoded");
        dir.write("my avatar.txt", "spaced");

        let resp = serve(&ctx("/my%20avatar.txt"), dir.path(), &index_files()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_of(resp).await, "spaced");
    }

    #[tokio::test]
    async fn test_traversal_does_not_escape_root() {
        let base = TempDir::new("static_traversal");
        base.write("secret.txt", "top secret");
        let root = base.mkdir("public");

        for attempt in ["/../secret.txt", "/%2e%2e/secret.txt", "/..%2fsecret.txt"] {
            let resp = serve(&ctx(attempt), &root, &index_files()).await;
            assert_eq!(resp.status(), 404, "{attempt}");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_root_is_blocked() {
        let base = TempDir::new("static_symlink");
        let secret = base.write("secret.txt", "top secret");
        let root = base.mkdir("public");
        std::os::unix::fs::symlink(&secret, root.join("link.txt")).unwrap();

        let resp = serve(&ctx("/link.txt"), &root, &index_files()).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let dir = TempDir::new("static_redirect");
        dir.mkdir("img");

        let resp = serve(&ctx("/img"), dir.path(), &index_files()).await;
        assert_eq!(resp.status(), 301);
        assert_eq!(resp.headers()["location"], "/img/");

        let with_query = RequestContext {
            query: Some("v=1"),
            ..ctx("/img")
        };
        let resp = serve(&with_query, dir.path(), &index_files()).await;
        assert_eq!(resp.headers()["location"], "/img/?v=1");
    }

    #[tokio::test]
    async fn test_redirect_never_points_off_host() {
        let dir = TempDir::new("static_redirect_host");
        dir.mkdir("evil.example");

        for request_path in ["//evil.example", "///evil.example", "/%2Fevil.example"] {
            let resp = serve(&ctx(request_path), dir.path(), &index_files()).await;
            assert_eq!(resp.status(), 301, "{request_path}");
            let location = resp.headers()["location"].to_str().unwrap();
            assert!(!location.starts_with("//"), "{request_path} -> {location}");
        }

        let resp = serve(&ctx("//evil.example"), dir.path(), &index_files()).await;
        assert_eq!(resp.headers()["location"], "/evil.example/");
    }

    #[tokio::test]
    async fn test_directory_serves_index_file() {
        let dir = TempDir::new("static_index");
        dir.write("index.html", "<p>home</p>");

        let resp = serve(&ctx("/"), dir.path(), &index_files()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_of(resp).await, "<p>home</p>");
    }

    #[tokio::test]
    async fn test_directory_without_index_is_listed() {
        let dir = TempDir::new("static_listing");
        dir.write("test-review-system.html", "");

        let resp = serve(&ctx("/"), dir.path(), &index_files()).await;
        assert_eq!(resp.status(), 200);
        let body = String::from_utf8(body_of(resp).await.to_vec()).unwrap();
        assert!(body.contains("href=\"test-review-system.html\""));
    }

    #[tokio::test]
    async fn test_trailing_slash_on_file_is_404() {
        let dir = TempDir::new("static_file_slash");
        dir.write("a.html", "");

        let resp = serve(&ctx("/a.html/"), dir.path(), &index_files()).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_if_modified_since_returns_304() {
        let dir = TempDir::new("static_304");
        let file = dir.write("a.css", "body {}");
        let modified = std::fs::metadata(&file).unwrap().modified().unwrap();
        let header = cache::format_http_date(modified);

        let conditional = RequestContext {
            if_modified_since: Some(header.as_str()),
            ..ctx("/a.css")
        };
        let resp = serve(&conditional, dir.path(), &index_files()).await;
        assert_eq!(resp.status(), 304);
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_root_is_404() {
        let dir = TempDir::new("static_no_root");
        let root = dir.path().join("gone");

        let resp = serve(&ctx("/a.html"), &root, &index_files()).await;
        assert_eq!(resp.status(), 404);
    }
}
