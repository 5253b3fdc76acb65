//! Directive line classification.
//!
//! Completion looks at the text between the start of the line and the cursor
//! and decides which fragment is being typed. Hover parses the whole line.
//!
//! All columns are LSP UTF-16 offsets.

use crate::catalog::DirectiveKind;
use directives_core::{byte_to_utf16_offset, utf16_to_byte_offset};
use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp_server::ls_types::{Position, Range};

/// `#:` followed by a partial keyword
static DIRECTIVE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#:([A-Za-z]*)$").expect("invalid regex"));

/// `#:package <id>@<partial version>`
static PACKAGE_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#:package\s+([^\s@]+)@(\S*)$").expect("invalid regex"));

/// `#:package <partial id>`
static PACKAGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#:package\s+([^\s@]*)$").expect("invalid regex"));

/// `#:sdk <name>@<partial version>`
static SDK_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#:sdk\s+([^\s@]+)@(\S*)$").expect("invalid regex"));

/// `#:sdk <partial name>`
static SDK_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#:sdk\s+([^\s@]*)$").expect("invalid regex"));

/// `#:property <name>=<partial value>` or `#:property <name> <partial value>`
static PROPERTY_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*#:property\s+([^\s=]+)(?:\s*=\s*|\s+)([^\s=]*)$").expect("invalid regex")
});

/// `#:property <partial name>`
static PROPERTY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#:property\s+([^\s=]*)$").expect("invalid regex"));

/// A complete directive line: keyword, then name, then an optional value
/// after `@` (package, sdk) or `=`/whitespace (property).
static DIRECTIVE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*#:(package|sdk|property)(?:\s+([^\s@=]+)(?:(@|\s*=\s*|\s+)(\S*))?)?\s*$")
        .expect("invalid regex")
});

/// What the user is typing at the cursor.
///
/// Every variant carries `start`, the column where the typed fragment
/// begins. Completion items replace `start..cursor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    DirectiveName {
        prefix: String,
        start: u32,
    },
    PackageName {
        query: String,
        start: u32,
    },
    PackageVersion {
        package_id: String,
        prefix: String,
        start: u32,
    },
    Sdk {
        query: String,
        start: u32,
    },
    SdkVersion {
        sdk: String,
        prefix: String,
        start: u32,
    },
    PropertyName {
        prefix: String,
        start: u32,
    },
    PropertyValue {
        property: String,
        prefix: String,
        start: u32,
    },
}

impl CompletionContext {
    pub fn start(&self) -> u32 {
        match self {
            Self::DirectiveName { start, .. }
            | Self::PackageName { start, .. }
            | Self::PackageVersion { start, .. }
            | Self::Sdk { start, .. }
            | Self::SdkVersion { start, .. }
            | Self::PropertyName { start, .. }
            | Self::PropertyValue { start, .. } => *start,
        }
    }
}

/// Classifies the text from line start to cursor.
///
/// Returns `None` when the prefix is not inside a directive.
///
/// # Examples
///
/// ```
/// use directives_lsp::resolver::{CompletionContext, classify_prefix};
///
/// assert_eq!(
///     classify_prefix("#:package Humanizer@2."),
///     Some(CompletionContext::PackageVersion {
///         package_id: "Humanizer".into(),
///         prefix: "2.".into(),
///         start: 20,
///     })
/// );
/// assert_eq!(classify_prefix("var x = 1;"), None);
/// ```
pub fn classify_prefix(prefix: &str) -> Option<CompletionContext> {
    let col = |m: regex::Match<'_>| byte_to_utf16_offset(prefix, m.start());

    if let Some(caps) = DIRECTIVE_NAME.captures(prefix) {
        let typed = caps.get(1)?;
        return Some(CompletionContext::DirectiveName {
            prefix: typed.as_str().to_string(),
            start: col(typed),
        });
    }

    if let Some(caps) = PACKAGE_VERSION.captures(prefix) {
        let typed = caps.get(2)?;
        return Some(CompletionContext::PackageVersion {
            package_id: caps[1].to_string(),
            prefix: typed.as_str().to_string(),
            start: col(typed),
        });
    }

    if let Some(caps) = PACKAGE_NAME.captures(prefix) {
        let typed = caps.get(1)?;
        return Some(CompletionContext::PackageName {
            query: typed.as_str().to_string(),
            start: col(typed),
        });
    }

    if let Some(caps) = SDK_VERSION.captures(prefix) {
        let typed = caps.get(2)?;
        return Some(CompletionContext::SdkVersion {
            sdk: caps[1].to_string(),
            prefix: typed.as_str().to_string(),
            start: col(typed),
        });
    }

    if let Some(caps) = SDK_NAME.captures(prefix) {
        let typed = caps.get(1)?;
        return Some(CompletionContext::Sdk {
            query: typed.as_str().to_string(),
            start: col(typed),
        });
    }

    if let Some(caps) = PROPERTY_VALUE.captures(prefix) {
        let typed = caps.get(2)?;
        return Some(CompletionContext::PropertyValue {
            property: caps[1].to_string(),
            prefix: typed.as_str().to_string(),
            start: col(typed),
        });
    }

    if let Some(caps) = PROPERTY_NAME.captures(prefix) {
        let typed = caps.get(1)?;
        return Some(CompletionContext::PropertyName {
            prefix: typed.as_str().to_string(),
            start: col(typed),
        });
    }

    None
}

/// Classifies the cursor position within `line`.
///
/// `character` is a UTF-16 column; a column past the end of the line yields
/// `None`.
pub fn classify(line: &str, character: u32) -> Option<CompletionContext> {
    let end = utf16_to_byte_offset(line, character)?;
    classify_prefix(&line[..end])
}

/// A word of a directive line and where it sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub range: Range,
}

impl Token {
    /// Returns `true` if `position` lies within the token (end exclusive).
    pub fn contains(&self, position: Position) -> bool {
        position.line == self.range.start.line
            && self.range.start.character <= position.character
            && position.character < self.range.end.character
    }
}

/// A fully parsed directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// The keyword including its `#:` marker.
    pub keyword: Token,
    pub name: Option<Token>,
    /// Version for `#:package`/`#:sdk`, value for `#:property`.
    pub value: Option<Token>,
}

/// Parses one complete directive line.
///
/// A value only counts when written with the separator its directive uses:
/// `@` for packages and SDKs, `=` or whitespace for properties.
///
/// # Examples
///
/// ```
/// use directives_lsp::catalog::DirectiveKind;
/// use directives_lsp::resolver::parse_directive;
///
/// let directive = parse_directive("#:package Humanizer@2.14.1", 0).unwrap();
/// assert_eq!(directive.kind, DirectiveKind::Package);
/// assert_eq!(directive.name.unwrap().text, "Humanizer");
/// assert_eq!(directive.value.unwrap().text, "2.14.1");
/// ```
pub fn parse_directive(line: &str, line_number: u32) -> Option<Directive> {
    let caps = DIRECTIVE_LINE.captures(line)?;

    let token = |m: regex::Match<'_>, from: usize| Token {
        text: m.as_str().to_string(),
        range: Range::new(
            Position::new(line_number, byte_to_utf16_offset(line, from)),
            Position::new(line_number, byte_to_utf16_offset(line, m.end())),
        ),
    };

    let keyword_match = caps.get(1)?;
    let kind = DirectiveKind::from_keyword(keyword_match.as_str())?;
    // Include the `#:` marker in the keyword range.
    let keyword = token(keyword_match, keyword_match.start() - 2);

    let name = caps.get(2).map(|m| token(m, m.start()));

    let separator = caps.get(3).map(|m| m.as_str().trim());
    let separator_fits = match kind {
        DirectiveKind::Package | DirectiveKind::Sdk => separator == Some("@"),
        DirectiveKind::Property => separator.is_some_and(|s| s.is_empty() || s == "="),
    };
    let value = caps
        .get(4)
        .filter(|m| separator_fits && !m.as_str().is_empty())
        .map(|m| token(m, m.start()));

    Some(Directive {
        kind,
        keyword,
        name,
        value,
    })
}
