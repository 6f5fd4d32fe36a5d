//! Partial-update helpers
//!
//! JSON PATCH bodies need three states for a nullable column: key absent
//! (leave it), `null` (clear it) and a value (set it). Use
//! `Option<Option<T>>` with:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Patch {
//!     #[serde(default, deserialize_with = "kernel::patch::deserialize_some")]
//!     phone: Option<Option<String>>,
//! }
//!
//! let absent: Patch = serde_json::from_str("{}").unwrap();
//! assert_eq!(absent.phone, None);
//! let cleared: Patch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
//! assert_eq!(cleared.phone, Some(None));
//! ```

use serde::{Deserialize, Deserializer};

/// Wrap whatever is present (including `null`) in `Some`
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_three_states() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.note, None);

        let cleared: Patch = serde_json::from_str(r#"{"note":null}"#).unwrap();
        assert_eq!(cleared.note, Some(None));

        let set: Patch = serde_json::from_str(r#"{"note":"hi"}"#).unwrap();
        assert_eq!(set.note, Some(Some("hi".to_string())));
    }
}
