//! Request classification over the static route tables.
//!
//! Both tables are process constants: loaded once, read for the process
//! lifetime.

/// Repositories that get a go-import meta page when requested with `?go-get=1`.
const META_REPOS: [&str; 3] = ["goget", "web", "vikunja"];

/// First path segment mapped to a path prefix at the canonical host.
const DIR_ROUTES: [(&str, &str); 2] = [
    ("desktop", "/vikunja/tree/main/desktop"),
    ("frontend", "/vikunja/tree/main/frontend"),
];

/// Whether `name` is one of the repositories served as a vanity import.
pub fn is_meta_repo(name: &str) -> bool {
    META_REPOS.contains(&name)
}

/// Target path prefix for a routed first segment, if any.
pub fn dir_route(segment: &str) -> Option<&'static str> {
    DIR_ROUTES
        .iter()
        .find(|(name, _)| *name == segment)
        .map(|(_, prefix)| *prefix)
}

/// What to do with an incoming request path.
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    /// Serve the go-import/go-source meta page for this repository.
    GoGetMeta { repo: &'a str },
    /// Redirect to this path at the canonical host.
    Directory { target: String },
    /// Redirect to the canonical host with the raw path appended.
    Fallback,
}

/// Classifies a path into one of the three handling cases.
///
/// Empty segments are discarded, so `/desktop` and `/desktop/` classify
/// identically. The meta page requires exactly one segment: `/vikunja/extra`
/// falls through even with `go-get=1` set.
pub fn classify(path: &str, go_get: bool) -> Route<'_> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if go_get && segments.len() == 1 && is_meta_repo(segments[0]) {
        return Route::GoGetMeta { repo: segments[0] };
    }

    if let Some((first, rest)) = segments.split_first() {
        if let Some(prefix) = dir_route(first) {
            let target = if rest.is_empty() {
                prefix.to_string()
            } else {
                format!("{}/{}", prefix, rest.join("/"))
            };
            return Route::Directory { target };
        }
    }

    Route::Fallback
}
