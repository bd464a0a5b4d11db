//! Macro for the string newtypes used to name datasets and dimension types.
//!
//! Both wrappers reject empty (or all-whitespace) input at construction and
//! on deserialization, so downstream lookups never match against `""`.

/// Define a strongly-typed, non-empty name wrapper.
///
/// Generates the struct, a validating `Deserialize`, `new`/`try_new`/`as_str`,
/// `Display`, `Deref<Target = str>`, `AsRef<str>`, `Borrow<str>` and string
/// comparisons.
macro_rules! define_newtype_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                $Name::try_new(raw).ok_or_else(|| {
                    serde::de::Error::custom(concat!(stringify!($Name), " must not be blank"))
                })
            }
        }

        impl $Name {
            /// Create a new name, panicking if it is blank.
            ///
            /// Use [`try_new`](Self::try_new) for input read from files or the wire.
            pub fn new(name: impl Into<String>) -> Self {
                Self::try_new(name).expect(concat!(stringify!($Name), " must not be blank"))
            }

            /// Create a new name, returning `None` if it is blank.
            pub fn try_new(name: impl Into<String>) -> Option<Self> {
                let name = name.into();
                if name.trim().is_empty() {
                    None
                } else {
                    Some(Self(name))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

pub(crate) use define_newtype_string;
