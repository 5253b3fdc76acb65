/// Package metadata from the NuGet search service.
///
/// Built once from a search result and never mutated. Identity is the
/// package id, compared case-insensitively as NuGet does.
///
/// # Examples
///
/// ```
/// use directives_nuget::types::PackageRecord;
///
/// let pkg = PackageRecord {
///     id: "Humanizer".into(),
///     latest_version: "2.14.1".into(),
///     description: Some("A micro-framework that turns your normal strings...".into()),
///     total_downloads: Some(500_000_000),
/// };
///
/// assert!(pkg.has_id("humanizer"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub id: String,
    /// Latest listed version; may carry a pre-release label.
    pub latest_version: String,
    pub description: Option<String>,
    /// Only used to rank suggestions.
    pub total_downloads: Option<u64>,
}

impl PackageRecord {
    /// Returns `true` if `id` names this package, ignoring ASCII case.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }

    /// Insertable `id@version` text for a `#:package` directive.
    pub fn directive_reference(&self) -> String {
        format!("{}@{}", self.id, self.latest_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humanizer() -> PackageRecord {
        PackageRecord {
            id: "Humanizer".into(),
            latest_version: "2.14.1".into(),
            description: None,
            total_downloads: Some(500_000_000),
        }
    }

    #[test]
    fn test_has_id_ignores_case() {
        let pkg = humanizer();
        assert!(pkg.has_id("HUMANIZER"));
        assert!(pkg.has_id("Humanizer"));
        assert!(!pkg.has_id("Humanizer.Core"));
    }

    #[test]
    fn test_directive_reference() {
        assert_eq!(humanizer().directive_reference(), "Humanizer@2.14.1");
    }
}
