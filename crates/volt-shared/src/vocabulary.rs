//! Closed value sets backed by a raw scalar.
//!
//! Every vocabulary gets `ALL` (declaration order), `as_raw`, a strict
//! `from_raw`, `Display` of the raw value, and serde through the raw value.
//! Ordering is opt-in: add `#[derive(PartialOrd, Ord)]` to rank variants by
//! declaration position.

macro_rules! str_vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $raw:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub const fn as_raw(self) -> &'static str {
                match self {
                    $( $name::$variant => $raw ),+
                }
            }

            pub fn from_raw(raw: &str) -> Result<Self, $crate::error::UnknownVariant> {
                match raw {
                    $( $raw => Ok($name::$variant), )+
                    _ => Err($crate::error::UnknownVariant::new(stringify!($name), raw)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_raw())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_raw(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_raw())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::from_raw(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

macro_rules! int_vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $raw:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub const fn as_raw(self) -> i64 {
                match self {
                    $( $name::$variant => $raw ),+
                }
            }

            pub fn from_raw(raw: i64) -> Result<Self, $crate::error::UnknownVariant> {
                match raw {
                    $( $raw => Ok($name::$variant), )+
                    _ => Err($crate::error::UnknownVariant::new(stringify!($name), raw)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_raw())
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value.as_raw()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.as_raw())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = i64::deserialize(deserializer)?;
                Self::from_raw(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use int_vocabulary;
pub(crate) use str_vocabulary;
