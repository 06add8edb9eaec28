//! Aggregate settings version computation.
//!
//! Clients poll a single opaque token instead of diffing individual
//! settings. The token is a SHA-256 over the sorted `key:version` pairs of
//! the records in scope, so any version bump anywhere changes it.

use chrono::Utc;

use crate::models::SettingsVersion;

/// Computes the aggregate version token over `(key, version)` pairs.
///
/// Pairs are sorted by key before hashing, so the result is independent of
/// the order the store returns rows in.
pub fn compute_settings_version(mut pairs: Vec<(String, i32)>) -> SettingsVersion {
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let concatenated = pairs
        .iter()
        .map(|(key, version)| format!("{}:{}", key, version))
        .collect::<Vec<_>>()
        .join(";");

    SettingsVersion {
        version: shared::crypto::sha256_hex(&concatenated),
        count: pairs.len() as i64,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &[(&str, i32)]) -> Vec<(String, i32)> {
        input.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_deterministic() {
        let a = compute_settings_version(pairs(&[("site_name", 3), ("maintenance_mode", 1)]));
        let b = compute_settings_version(pairs(&[("site_name", 3), ("maintenance_mode", 1)]));
        assert_eq!(a.version, b.version);
        assert_eq!(a.count, 2);
    }

    #[test]
    fn test_order_independent() {
        let a = compute_settings_version(pairs(&[("a_key", 1), ("b_key", 2)]));
        let b = compute_settings_version(pairs(&[("b_key", 2), ("a_key", 1)]));
        assert_eq!(a.version, b.version);
    }

    #[test]
    fn test_version_bump_changes_hash() {
        let before = compute_settings_version(pairs(&[("site_name", 3), ("currency", 7)]));
        let after = compute_settings_version(pairs(&[("site_name", 4), ("currency", 7)]));
        assert_ne!(before.version, after.version);
    }

    #[test]
    fn test_new_key_changes_hash() {
        let before = compute_settings_version(pairs(&[("site_name", 3)]));
        let after = compute_settings_version(pairs(&[("site_name", 3), ("tagline", 1)]));
        assert_ne!(before.version, after.version);
        assert_eq!(after.count, 2);
    }

    #[test]
    fn test_empty_input() {
        let v = compute_settings_version(Vec::new());
        assert_eq!(v.count, 0);
        // SHA-256 of the empty string
        assert_eq!(
            v.version,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_renamed_key_changes_hash() {
        let a = compute_settings_version(pairs(&[("site_name", 3)]));
        let b = compute_settings_version(pairs(&[("site_title", 3)]));
        assert_ne!(a.version, b.version);
    }
}
