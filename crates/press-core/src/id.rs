//! Typed ID wrappers for content rows.
//!
//! Every table in the content schema keys its rows with a `BIGINT UNSIGNED`
//! column. Wrapping them keeps a post id from being passed where a meta id
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! typed_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Creates an id from its raw column value.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw column value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Zero is never assigned by the store and is used as "no reference".
            #[must_use]
            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

typed_id!(
    /// Identifier of a row in the posts table (`ID`).
    PostId
);

typed_id!(
    /// Identifier of a row in the postmeta table (`meta_id`).
    MetaId
);

typed_id!(
    /// Identifier of a row in the terms table (`term_id`).
    TermId
);

typed_id!(
    /// Identifier of a row in the term_taxonomy table (`term_taxonomy_id`).
    TermTaxonomyId
);
