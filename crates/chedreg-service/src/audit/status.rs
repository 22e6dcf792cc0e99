//! Maps a response status code and activity to an [`Outcome`].

use chedreg_entity::audit::{ActivityKind, Outcome};

/// Resolve the outcome of a completed request.
pub fn resolve(status_code: u16, kind: ActivityKind) -> Outcome {
    if status_code >= 400 {
        Outcome::Failed
    } else if status_code >= 300 {
        Outcome::Warning
    } else if kind == ActivityKind::View {
        Outcome::Info
    } else {
        Outcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(resolve(500, ActivityKind::View), Outcome::Failed);
        assert_eq!(resolve(422, ActivityKind::Login), Outcome::Failed);
        assert_eq!(resolve(403, ActivityKind::Approve), Outcome::Failed);
        assert_eq!(resolve(302, ActivityKind::Create), Outcome::Warning);
        assert_eq!(resolve(399, ActivityKind::View), Outcome::Warning);
        assert_eq!(resolve(200, ActivityKind::View), Outcome::Info);
        assert_eq!(resolve(201, ActivityKind::Create), Outcome::Success);
        assert_eq!(resolve(204, ActivityKind::Delete), Outcome::Success);
    }
}
