//! HTTP span helpers.

use uuid::Uuid;

/// Collapse identifiers in a request path so spans and metrics group by route.
///
/// `/users/orders/0190...` becomes `/users/orders/{uuid}`.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
