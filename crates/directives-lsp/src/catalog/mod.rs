//! Static reference data for directives.
//!
//! Each table is defined once and read by both the completion and the hover
//! handlers, so suggestions and documentation always agree.

pub mod properties;
pub mod sdks;

pub use properties::{PROPERTIES, PropertyInfo, find_property, matching_properties};
pub use sdks::{SDKS, SdkInfo, find_sdk, matching_sdks};

/// The three directive keywords recognized in file-based apps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Package,
    Sdk,
    Property,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 3] = [Self::Package, Self::Sdk, Self::Property];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Sdk => "sdk",
            Self::Property => "property",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    pub fn syntax(self) -> &'static str {
        match self {
            Self::Package => "#:package <PackageId>@<Version>",
            Self::Sdk => "#:sdk <SdkName>[@<Version>]",
            Self::Property => "#:property <Name>=<Value>",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Package => "References a NuGet package from the file-based app.",
            Self::Sdk => {
                "Selects the MSBuild project SDK used to build the app. \
                 Defaults to `Microsoft.NET.Sdk` when omitted."
            }
            Self::Property => "Sets an MSBuild property for the implicit project.",
        }
    }

    /// Keywords starting with `prefix`, ignoring ASCII case.
    pub fn matching(prefix: &str) -> impl Iterator<Item = DirectiveKind> + '_ {
        Self::ALL.into_iter().filter(move |kind| {
            kind.keyword()
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }
}

/// Case-insensitive substring test used by the name tables.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
