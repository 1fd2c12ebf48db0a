// src/tables/definitions/identifiers.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares an opaque string identifier. Ids carry no ordering semantics
/// beyond what `BTreeMap` needs for deterministic iteration.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

opaque_id!(
    /// Key of one table record in the durable store.
    TableId
);
opaque_id!(
    /// Identifies a column within its table.
    ColumnId
);
opaque_id!(
    /// Key of a row in a table's row map.
    RowId
);
opaque_id!(
    /// Identifies a select option; this is what select cells store.
    OptionId
);
