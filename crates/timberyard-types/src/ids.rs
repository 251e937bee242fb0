//! Type-safe identifier wrappers around [`String`].
//!
//! Every entity in the yard has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. The static dataset uses readable
//! slugs (`log-zone-pine-1`, `loader-3`) so the wrappers hold strings rather
//! than generated UUIDs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an inventory zone on the yard map.
    ZoneId
}

define_id! {
    /// Unique identifier for a one-way transport path.
    PathId
}

define_id! {
    /// Unique identifier for a loader vehicle.
    LoaderId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_matches_inner() {
        let id = ZoneId::new("log-zone-pine-1");
        assert_eq!(id.to_string(), "log-zone-pine-1");
        assert_eq!(id.as_str(), "log-zone-pine-1");
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let id = LoaderId::from("loader-1");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"loader-1\""));
        let restored: Result<LoaderId, _> = serde_json::from_str("\"loader-1\"");
        assert_eq!(restored.ok(), Some(id));
    }

    #[test]
    fn ids_order_lexicographically() {
        let a = PathId::from("path-a");
        let b = PathId::from("path-b");
        assert!(a < b);
    }
}
