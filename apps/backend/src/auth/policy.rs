//! Route-level authorization policy.
//!
//! An ordered list of route rules, scanned in registration order; the
//! first rule whose pattern matches the request path decides the
//! outcome. Order is the sole disambiguation between overlapping
//! patterns (a narrow `/api/tasks/*/update-status` must sit above the
//! broad `/api/tasks/**`), so rules are modeled as an explicit sequence,
//! never a map. Built once at startup and read concurrently without
//! locking.

use crate::auth::principal::Principal;
use crate::domain::Role;

/// Outcome of a policy check. `Unauthenticated` maps to 401 at the
/// boundary, `Forbidden` to 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Unauthenticated,
    Forbidden,
}

/// A path pattern made of literal segments, `*` (exactly one segment)
/// and `**` (any remaining segments, including none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    AnyOne,
    AnyTail,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> RoutePattern {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "*" => Segment::AnyOne,
                "**" => Segment::AnyTail,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        RoutePattern { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        Self::match_segments(&self.segments, &parts)
    }

    fn match_segments(pattern: &[Segment], parts: &[&str]) -> bool {
        match pattern.split_first() {
            None => parts.is_empty(),
            Some((Segment::AnyTail, rest)) => {
                // `**` absorbs zero or more segments
                (0..=parts.len()).any(|skip| Self::match_segments(rest, &parts[skip..]))
            }
            Some((head, rest)) => match parts.split_first() {
                None => false,
                Some((part, tail)) => {
                    let head_matches = match head {
                        Segment::Literal(literal) => literal == part,
                        Segment::AnyOne => true,
                        Segment::AnyTail => unreachable!(),
                    };
                    head_matches && Self::match_segments(rest, tail)
                }
            },
        }
    }
}

/// One entry of the ordered route-role matrix. An empty role set means
/// the route is public.
#[derive(Debug, Clone)]
pub struct RouteRule {
    pattern: RoutePattern,
    required_roles: Vec<Role>,
}

impl RouteRule {
    pub fn public(pattern: &str) -> RouteRule {
        RouteRule {
            pattern: RoutePattern::parse(pattern),
            required_roles: Vec::new(),
        }
    }

    pub fn any_of(pattern: &str, roles: &[Role]) -> RouteRule {
        RouteRule {
            pattern: RoutePattern::parse(pattern),
            required_roles: roles.to_vec(),
        }
    }
}

/// The route-level policy engine: first-match scan over the rule list,
/// deny-by-default for unmatched paths (authenticated-only).
#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    rules: Vec<RouteRule>,
}

impl AuthorizationPolicy {
    pub fn new(rules: Vec<RouteRule>) -> AuthorizationPolicy {
        AuthorizationPolicy { rules }
    }

    /// The production route-role matrix. Ordering is the contract:
    /// public routes first, then the narrow task routes both roles may
    /// hit, then the admin-only remainder.
    pub fn default_matrix() -> AuthorizationPolicy {
        use Role::{Admin, User};
        AuthorizationPolicy::new(vec![
            RouteRule::public("/swagger-ui/**"),
            RouteRule::public("/v3/api-docs/**"),
            RouteRule::public("/health"),
            RouteRule::public("/api/user/register"),
            RouteRule::public("/api/user/login"),
            RouteRule::any_of("/api/admin/create-admin", &[User, Admin]),
            RouteRule::any_of("/api/tasks/*/update-status", &[User, Admin]),
            RouteRule::any_of("/api/tasks/*/add-comment", &[User, Admin]),
            RouteRule::any_of("/api/tasks/*", &[User, Admin]),
            RouteRule::any_of("/api/admin/**", &[Admin]),
            RouteRule::any_of("/api/tasks/**", &[Admin]),
            RouteRule::any_of("/api/user/**", &[User, Admin]),
        ])
    }

    pub fn authorize(&self, principal: &Principal, path: &str) -> Verdict {
        for rule in &self.rules {
            if !rule.pattern.matches(path) {
                continue;
            }
            if rule.required_roles.is_empty() {
                return Verdict::Allow;
            }
            return match principal.identity() {
                None => Verdict::Unauthenticated,
                Some(identity) if rule.required_roles.contains(&identity.role) => Verdict::Allow,
                Some(_) => Verdict::Forbidden,
            };
        }
        // No rule matched: any authenticated principal may pass.
        if principal.is_anonymous() {
            Verdict::Unauthenticated
        } else {
            Verdict::Allow
        }
    }
}
