/*
 * Responsibility
 * - AuthorizationPolicy: route pattern + method → 必要な capability の静的テーブル
 * - gate (access.rs) の後に評価する。first-match-wins:
 *   具体的なパターンを catch-all より先に登録する
 * - どのエントリにも合致しない場合は Authenticated (fail-closed)
 *
 * Capability:
 * - Public:        匿名でも認証済みでも通す
 * - Authenticated: AuthCtx が無ければ Unauthenticated
 * - Role(r):       AuthCtx があり r を持たなければ Forbidden
 *                  (認証はされているが権限が足りない、を区別して返す)
 */
use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Public,
    Authenticated,
    Role(&'static str),
}

pub const ROLE_ADMIN: &str = "ADMIN";

struct PolicyEntry {
    /// None = any method.
    methods: Option<Vec<Method>>,
    path: &'static str,
    capability: Capability,
}

impl PolicyEntry {
    fn matches(&self, method: &Method, path: &str) -> bool {
        let method_ok = match &self.methods {
            None => true,
            Some(methods) => methods.contains(method),
        };
        method_ok && path_matches(self.path, path)
    }
}

/// Process-wide, read-only after startup.
pub struct PolicyTable {
    entries: Vec<PolicyEntry>,
}

impl PolicyTable {
    /// The route policy of this service.
    pub fn standard() -> Self {
        use Capability::*;

        let mutating = || vec![Method::POST, Method::PUT, Method::DELETE];

        Self::from_entries(vec![
            // signup/login must be reachable before any credential exists
            (Some(vec![Method::POST]), "/api/1/auth/**", Public),
            // ratings are anonymous-by-IP, not tied to an account
            (
                Some(vec![Method::POST]),
                "/api/1/countries/{id}/rating",
                Public,
            ),
            // nested catalog writes: any logged-in user
            (
                Some(vec![Method::POST]),
                "/api/1/countries/{id}/dishes",
                Authenticated,
            ),
            (
                Some(vec![Method::POST]),
                "/api/1/countries/{id}/comments",
                Authenticated,
            ),
            // country catalog itself is admin-managed
            (Some(mutating()), "/api/1/countries/**", Role(ROLE_ADMIN)),
            // per-user favorites: always the calling user's own data,
            // so even reads need a principal. Must precede the GET catch-all
            (None, "/api/1/user/**", Authenticated),
            // all reads are public
            (Some(vec![Method::GET]), "/api/1/**", Public),
            // everything else (dish/comment edits etc.): logged-in users.
            // Same as the no-match default, spelled out.
            (None, "/**", Authenticated),
        ])
    }

    fn from_entries(
        entries: Vec<(Option<Vec<Method>>, &'static str, Capability)>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(methods, path, capability)| PolicyEntry {
                    methods,
                    path,
                    capability,
                })
                .collect(),
        }
    }

    /// Capability required for `method path`. First match wins; no match is
    /// Authenticated, never fail-open.
    pub fn required(&self, method: &Method, path: &str) -> Capability {
        self.entries
            .iter()
            .find(|e| e.matches(method, path))
            .map(|e| e.capability.clone())
            .unwrap_or(Capability::Authenticated)
    }
}

/// Segment matcher: `{x}` and `*` match exactly one segment, a trailing `**`
/// matches zero or more.
fn path_matches(pattern: &str, path: &str) -> bool {
    let mut path_segs = path.split('/').filter(|s| !s.is_empty());

    for pat_seg in pattern.split('/').filter(|s| !s.is_empty()) {
        if pat_seg == "**" {
            return true;
        }
        let Some(path_seg) = path_segs.next() else {
            return false;
        };
        let wildcard = pat_seg == "*" || (pat_seg.starts_with('{') && pat_seg.ends_with('}'));
        if !wildcard && pat_seg != path_seg {
            return false;
        }
    }

    path_segs.next().is_none()
}

/// Enforcement middleware. Runs after the authentication gate; only reads the
/// AuthCtx the gate may have attached.
pub async fn authorize(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let method = req.method();
    let path = req.uri().path();
    let ctx = req.extensions().get::<AuthCtx>();

    match state.policy.required(method, path) {
        Capability::Public => {}
        Capability::Authenticated => {
            if ctx.is_none() {
                warn!(%method, path, "unauthenticated request to protected route");
                return Err(AppError::Unauthenticated);
            }
        }
        Capability::Role(role) => match ctx {
            None => {
                warn!(%method, path, "unauthenticated request to role-protected route");
                return Err(AppError::Unauthenticated);
            }
            Some(ctx) if !ctx.has_role(role) => {
                warn!(%method, path, subject = %ctx.subject, role, "insufficient role");
                return Err(AppError::Forbidden);
            }
            Some(_) => {}
        },
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_matcher_basics() {
        assert!(path_matches("/api/1/countries/{id}", "/api/1/countries/7"));
        assert!(!path_matches("/api/1/countries/{id}", "/api/1/countries"));
        assert!(!path_matches(
            "/api/1/countries/{id}",
            "/api/1/countries/7/rating"
        ));
        assert!(path_matches("/api/1/countries/**", "/api/1/countries"));
        assert!(path_matches("/api/1/countries/**", "/api/1/countries/7/x/y"));
        assert!(!path_matches("/api/1/countries/**", "/api/1/dishes/7"));
        assert!(path_matches("/**", "/anything/at/all"));
    }

    #[test]
    fn first_match_wins_over_later_catch_alls() {
        let table = PolicyTable::standard();
        // rating is registered before the admin-only countries/** entry
        assert_eq!(
            table.required(&Method::POST, "/api/1/countries/7/rating"),
            Capability::Public
        );
        assert_eq!(
            table.required(&Method::POST, "/api/1/countries"),
            Capability::Role(ROLE_ADMIN)
        );
        assert_eq!(
            table.required(&Method::DELETE, "/api/1/countries/7"),
            Capability::Role(ROLE_ADMIN)
        );
    }

    #[test]
    fn reads_are_public_and_auth_routes_open() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.required(&Method::GET, "/api/1/countries/7"),
            Capability::Public
        );
        assert_eq!(
            table.required(&Method::GET, "/api/1/dishes/3"),
            Capability::Public
        );
        assert_eq!(
            table.required(&Method::POST, "/api/1/auth/login"),
            Capability::Public
        );
        assert_eq!(
            table.required(&Method::POST, "/api/1/auth/signup"),
            Capability::Public
        );
    }

    #[test]
    fn other_mutations_require_authentication() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.required(&Method::PUT, "/api/1/comments/5"),
            Capability::Authenticated
        );
        assert_eq!(
            table.required(&Method::DELETE, "/api/1/dishes/5"),
            Capability::Authenticated
        );
        assert_eq!(
            table.required(&Method::POST, "/api/1/countries/7/dishes"),
            Capability::Authenticated
        );
    }

    #[test]
    fn user_favorites_require_authentication_even_for_reads() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.required(&Method::GET, "/api/1/user/countries"),
            Capability::Authenticated
        );
        assert_eq!(
            table.required(&Method::GET, "/api/1/user/dishes"),
            Capability::Authenticated
        );
        assert_eq!(
            table.required(&Method::POST, "/api/1/user/countries/7"),
            Capability::Authenticated
        );
        assert_eq!(
            table.required(&Method::DELETE, "/api/1/user/dishes/7"),
            Capability::Authenticated
        );
    }

    #[test]
    fn no_match_defaults_to_authenticated_fail_closed() {
        let table = PolicyTable::from_entries(vec![(
            Some(vec![Method::GET]),
            "/api/1/**",
            Capability::Public,
        )]);
        assert_eq!(
            table.required(&Method::POST, "/totally/unknown"),
            Capability::Authenticated
        );
    }
}
