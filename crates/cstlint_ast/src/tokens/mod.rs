//! Token kinds of the supported formats.

/// Declares a token-kind enum together with its [`TokenKind`](crate::TokenKind)
/// impl. Names double as the serde representation.
macro_rules! token_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $text:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $crate::TokenKind for $name {
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            fn id(self) -> u32 {
                self as u32 + 1
            }

            fn catalog() -> &'static $crate::TokenCatalog<Self> {
                static CATALOG: std::sync::OnceLock<$crate::TokenCatalog<$name>> =
                    std::sync::OnceLock::new();
                CATALOG.get_or_init($crate::TokenCatalog::build)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::TokenKind::name(*self))
            }
        }
    };
}

mod property;
mod xml;

pub use property::PropertyToken;
pub use xml::XmlToken;
