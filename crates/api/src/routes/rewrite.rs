//! Request-URI rewrite for actions reachable under any path prefix.
//!
//! Forms post relative to the page that rendered them, so
//! `/editarpessoa/7/salvarpessoa` must reach `/salvarpessoa`. The rewrite runs
//! before routing and before the access guard, so both see the canonical path.

use axum::extract::Request;
use axum::http::uri::{PathAndQuery, Uri};

/// Actions routed regardless of leading segments, with the number of path
/// segments that follow the action name.
pub const ANY_PREFIX_ACTIONS: &[(&str, usize)] = &[
    ("salvarpessoa", 0),
    ("pesquisarpessoa", 0),
    ("baixarcurriculo", 1),
    ("addfonepessoa", 1),
];

/// The canonical path for `path`, or `None` when it needs no rewrite.
pub fn collapsed_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    ANY_PREFIX_ACTIONS.iter().find_map(|(action, trailing)| {
        let action_idx = segments.len().checked_sub(trailing + 1)?;
        if action_idx == 0 || segments[action_idx] != *action {
            return None;
        }
        Some(format!("/{}", segments[action_idx..].join("/")))
    })
}

/// Rewrite the request URI to its canonical path, keeping the query string.
pub fn collapse_prefix(mut req: Request) -> Request {
    let Some(path) = collapsed_path(req.uri().path()) else {
        return req;
    };

    let path_and_query = match req.uri().query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };
    let mut parts = req.uri().clone().into_parts();
    parts.path_and_query = PathAndQuery::try_from(path_and_query).ok();

    match Uri::from_parts(parts) {
        Ok(uri) => {
            tracing::debug!(from = %req.uri(), to = %uri, "Collapsed path prefix");
            *req.uri_mut() = uri;
        }
        Err(e) => tracing::warn!(error = %e, uri = %req.uri(), "Could not rewrite URI"),
    }
    req
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn canonical_paths_are_left_alone() {
        assert_eq!(collapsed_path("/salvarpessoa"), None);
        assert_eq!(collapsed_path("/baixarcurriculo/3"), None);
        assert_eq!(collapsed_path("/listapessoas"), None);
        assert_eq!(collapsed_path("/"), None);
    }

    #[test]
    fn prefixed_actions_collapse() {
        assert_eq!(
            collapsed_path("/editarpessoa/7/salvarpessoa").as_deref(),
            Some("/salvarpessoa")
        );
        assert_eq!(
            collapsed_path("/a/b/c/pesquisarpessoa").as_deref(),
            Some("/pesquisarpessoa")
        );
        assert_eq!(
            collapsed_path("/telefones/4/addfonepessoa/4").as_deref(),
            Some("/addfonepessoa/4")
        );
        assert_eq!(
            collapsed_path("/editarpessoa/baixarcurriculo/9").as_deref(),
            Some("/baixarcurriculo/9")
        );
    }

    #[test]
    fn other_prefixed_routes_are_not_collapsed() {
        assert_eq!(collapsed_path("/x/listapessoas"), None);
        assert_eq!(collapsed_path("/x/addfonepessoa"), None);
    }

    #[test]
    fn rewrite_keeps_query_string() {
        let req = Request::builder()
            .uri("/editarpessoa/2/pesquisarpessoa?nomepesquisa=ana&page=1")
            .body(Body::empty())
            .unwrap();
        let req = collapse_prefix(req);
        assert_eq!(
            req.uri().to_string(),
            "/pesquisarpessoa?nomepesquisa=ana&page=1"
        );
    }
}
