//! Assertions over published client views.

use kanban_config::{ClientView, Fingerprint};
use serde::Serialize;

/// Assert that `view` is exactly the serialization of `public` and that its
/// fingerprint hashes those bytes.
///
/// # Panics
///
/// Panics when the view does not match.
pub fn assert_view_matches<T: Serialize>(view: &ClientView, public: &T) {
    let expected = serde_json::to_vec(public).unwrap_or_default();
    assert_eq!(view.json(), expected.as_slice(), "view json is stale");
    assert_view_self_consistent(view);
}

/// Assert that the fingerprint of `view` hashes its JSON.
///
/// # Panics
///
/// Panics when the fingerprint does not match the JSON.
pub fn assert_view_self_consistent(view: &ClientView) {
    assert_eq!(
        view.fingerprint(),
        &Fingerprint::of(view.json()),
        "fingerprint does not hash view json"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_config::PublicConfig;

    #[test]
    fn built_views_pass() {
        let public = PublicConfig::default();
        let view = ClientView::build("global", &public).expect("view builds");
        assert_view_matches(&view, &public);
    }

    #[test]
    #[should_panic(expected = "fingerprint does not hash view json")]
    fn mismatched_fingerprint_fails() {
        let view = ClientView::from_parts(b"{}".to_vec(), Fingerprint::from_raw("nope"));
        assert_view_self_consistent(&view);
    }
}
