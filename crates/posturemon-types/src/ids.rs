//! Type-safe identifier wrappers.
//!
//! Per-user entities (users, pets) carry UUID v7 identifiers. Catalog
//! entries (quests, achievements) are keyed by stable string slugs such as
//! `"micro-break"` or `"week-warrior"` so that persisted progress keeps
//! pointing at the same definition across releases.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Generates a newtype wrapper around a catalog slug.
macro_rules! define_slug {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like slug.
            pub fn new(slug: impl Into<String>) -> Self {
                Self(slug.into())
            }

            /// Borrow the slug.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(slug: &str) -> Self {
                Self(String::from(slug))
            }
        }

        impl From<String> for $name {
            fn from(slug: String) -> Self {
                Self(slug)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player profile.
    UserId
}

define_id! {
    /// Unique identifier for a virtual pet.
    PetId
}

define_slug! {
    /// Stable slug identifying a quest definition (e.g. `"micro-break"`).
    QuestId
}

define_slug! {
    /// Stable slug identifying an achievement definition (e.g. `"first-quest"`).
    AchievementId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_unique() {
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn uuid_id_display_matches_inner() {
        let id = PetId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn slug_serializes_as_plain_string() {
        let id = QuestId::from("micro-break");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"micro-break\""));
    }

    #[test]
    fn slug_roundtrip() {
        let id = AchievementId::new("week-warrior");
        let json = serde_json::to_string(&id).unwrap_or_default();
        let back: Result<AchievementId, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(id));
    }
}
