//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Several domain enums travel as lowercase strings (activity kinds in the
//! analytics payload, gate decisions in logs and response headers). This
//! macro keeps the string mapping in one place.
//!
//! # Example
//!
//! ```rust
//! use veriprint_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Web,
//!     Email,
//! }
//!
//! impl_wire_enum_conversions!(Channel {
//!     Web => "web",
//!     Email => "email",
//! });
//!
//! assert_eq!(Channel::Web.to_string(), "web");
//! assert_eq!("EMAIL".parse::<Channel>().unwrap(), Channel::Email);
//! ```

/// Implements Display and FromStr for a fieldless enum.
///
/// Parsing is case-insensitive; display is always the mapped string.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Stable wire representation.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Region {
        Header,
        Footer,
    }

    impl_wire_enum_conversions!(Region {
        Header => "header",
        Footer => "footer",
    });

    #[test]
    fn displays_wire_string() {
        assert_eq!(Region::Header.to_string(), "header");
        assert_eq!(Region::Footer.as_str(), "footer");
    }

    #[test]
    fn parses_any_case() {
        assert_eq!(Region::from_str("HEADER").unwrap(), Region::Header);
        assert_eq!(Region::from_str("FoOtEr").unwrap(), Region::Footer);
    }

    #[test]
    fn rejects_unknown() {
        let err = Region::from_str("sidebar").unwrap_err();
        assert!(err.contains("Invalid Region: sidebar"));
        assert!(Region::from_str("").is_err());
    }
    mod with_crate_result_alias {
        use std::str::FromStr;

        use crate::errors::{Result, VeriprintError};

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Placement {
            Inline,
            Attachment,
        }

        impl_wire_enum_conversions!(Placement {
            Inline => "inline",
            Attachment => "attachment",
        });

        #[test]
        fn expands_where_the_one_parameter_result_is_in_scope() -> Result<()> {
            let parsed = Placement::from_str("ATTACHMENT").map_err(VeriprintError::InvalidInput)?;
            assert_eq!(parsed, Placement::Attachment);
            assert_eq!(Placement::Inline.to_string(), "inline");
            assert!(Placement::from_str("download").is_err());
            Ok(())
        }
    }
}
