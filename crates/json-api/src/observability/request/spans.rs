//! Route templates for span names, metric labels and the company span field.

use uuid::Uuid;

/// Length of a hex-encoded pending connection token.
const CORRELATION_TOKEN_LEN: usize = 64;

const COMPANIES_SEGMENT: &str = "companies";

/// What the request span records about a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RouteShape {
    /// Path with identifiers and tokens replaced by placeholders.
    pub(super) route: String,

    /// `"{method} {route}"`
    pub(super) span_name: String,

    /// Company addressed under `/companies/{uuid}`, if any.
    pub(super) company: Option<Uuid>,
}

pub(super) fn route_shape(method: &str, path: &str) -> RouteShape {
    let mut route = String::with_capacity(path.len());
    let mut company = None;
    let mut previous = "";

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        route.push('/');

        if let Ok(uuid) = Uuid::parse_str(segment) {
            if previous == COMPANIES_SEGMENT && company.is_none() {
                company = Some(uuid);
            }

            route.push_str("{uuid}");
        } else if is_correlation_token(segment) {
            route.push_str("{token}");
        } else {
            route.push_str(segment);
        }

        previous = segment;
    }

    if route.is_empty() {
        route.push('/');
    }

    RouteShape {
        span_name: format!("{method} {route}"),
        route,
        company,
    }
}

fn is_correlation_token(segment: &str) -> bool {
    segment.len() == CORRELATION_TOKEN_LEN && segment.bytes().all(|b| b.is_ascii_hexdigit())
}
