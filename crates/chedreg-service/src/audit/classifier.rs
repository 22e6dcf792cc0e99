//! Maps a route name and HTTP method to an [`ActivityKind`].

use chedreg_entity::audit::{ActivityKind, HttpMethod};

/// Route-name keywords, checked in order. The first keyword contained in the
/// lower-cased route name wins.
const RULES: [(&str, ActivityKind); 5] = [
    ("login", ActivityKind::Login),
    ("logout", ActivityKind::Logout),
    ("export", ActivityKind::Export),
    ("approve", ActivityKind::Approve),
    ("reject", ActivityKind::Reject),
];

/// Classify a request.
///
/// Keyword rules apply only to a present, non-empty route name; otherwise
/// the method decides.
pub fn classify(route_name: Option<&str>, method: HttpMethod) -> ActivityKind {
    if let Some(name) = route_name.filter(|n| !n.is_empty()) {
        let name = name.to_lowercase();
        if let Some((_, kind)) = RULES.iter().find(|(keyword, _)| name.contains(keyword)) {
            return *kind;
        }
    }

    match method {
        HttpMethod::Post => ActivityKind::Create,
        HttpMethod::Put | HttpMethod::Patch => ActivityKind::Update,
        HttpMethod::Delete => ActivityKind::Delete,
        _ => ActivityKind::View,
    }
}
