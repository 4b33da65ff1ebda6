//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally passing a user ID where a complaint ID is expected.

/// Errors that can occur when parsing an entity ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("{entity} cannot be empty")]
    Empty {
        /// Human-readable entity label, e.g. "complaint id".
        entity: &'static str,
    },
    /// The input is not an integer.
    #[error("{entity} must be an integer (got '{value}')")]
    NotAnInteger {
        /// Human-readable entity label.
        entity: &'static str,
        /// The rejected input.
        value: String,
    },
    /// The input is zero or negative.
    #[error("{entity} must be positive (got {value})")]
    NotPositive {
        /// Human-readable entity label.
        entity: &'static str,
        /// The rejected value.
        value: i64,
    },
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around a positive `i32` with:
/// - `Serialize`/`Deserialize` (deserialization validates through `TryFrom<i32>`)
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - `new()` (validating), `as_i32()`
/// - `FromStr` that trims input and rejects empty, non-integer and
///   non-positive values with [`IdError`]
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use complaint_desk_core::define_id;
/// define_id!(TicketId, "ticket id");
///
/// let id: TicketId = " 42 ".parse().unwrap();
/// assert_eq!(id.as_i32(), 42);
/// assert!("".parse::<TicketId>().is_err());
/// assert!("abc".parse::<TicketId>().is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID, rejecting zero and negative values.
            ///
            /// # Errors
            ///
            /// Returns [`IdError::NotPositive`] if `id <= 0`.
            pub const fn new(id: i32) -> Result<Self, $crate::IdError> {
                if id <= 0 {
                    return Err($crate::IdError::NotPositive {
                        entity: $label,
                        value: id as i64,
                    });
                }
                Ok(Self(id))
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::IdError::Empty { entity: $label });
                }
                let id = trimmed
                    .parse::<i32>()
                    .map_err(|_| $crate::IdError::NotAnInteger {
                        entity: $label,
                        value: trimmed.to_owned(),
                    })?;
                Self::new(id)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::IdError;

            fn try_from(id: i32) -> ::core::result::Result<Self, Self::Error> {
                Self::new(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <i32 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self::new(id)?)
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <i32 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_id!(UserId, "user id");
define_id!(ComplaintId, "complaint id");
define_id!(AdminId, "admin id");
