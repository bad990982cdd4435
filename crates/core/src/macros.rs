/// Declare a closed set of string tags as a `Copy` enum.
///
/// Generates serde renames, `ALL`, `as_str`, lenient `parse` (exact match,
/// `None` on unknown input), strict `parse_tag` returning
/// [`CoreError::Validation`](crate::error::CoreError), `Default` and
/// `Display`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $tag)] $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation of the tag.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $tag ),+
                }
            }

            /// Parse a tag, returning `None` for anything outside the allowlist.
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $( $tag => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Parse a tag, rejecting unknown values with a validation error.
            pub fn parse_tag(s: &str) -> Result<Self, $crate::error::CoreError> {
                Self::parse(s).ok_or_else(|| {
                    let allowed: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                    $crate::error::CoreError::Validation(format!(
                        "Invalid {} '{s}'. Must be one of: {}",
                        stringify!($name),
                        allowed.join(", ")
                    ))
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
