//! Human-readable page labels and description sentences.

use chedreg_entity::audit::ActivityKind;

/// Human label for the page a request targeted.
///
/// A route name such as `"programmes.approve"` becomes
/// `"Programmes / Approve"`. Without a route name the raw path is used.
pub fn humanize_page(route_name: Option<&str>, path: &str) -> String {
    match route_name.filter(|n| !n.is_empty()) {
        Some(name) => {
            let spaced = name.replace('.', " / ").replace(['-', '_'], " ");
            title_case(&spaced)
        }
        None => path.to_string(),
    }
}

/// Upper-case the first letter of every space-separated word and
/// lower-case the rest.
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"{Activity} {page}."`
pub fn describe(kind: ActivityKind, page: &str) -> String {
    format!("{} {}.", kind.label(), page)
}
