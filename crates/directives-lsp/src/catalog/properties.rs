use super::contains_ignore_case;

/// A commonly set MSBuild property and its well-known values.
///
/// `values` is empty for free-form properties such as `AssemblyName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub values: &'static [&'static str],
}

const BOOL: &[&str] = &["true", "false"];

/// Properties offered for `#:property` directives.
pub static PROPERTIES: &[PropertyInfo] = &[
    PropertyInfo {
        name: "TargetFramework",
        description: "The framework the app targets.",
        values: &["net10.0", "net9.0", "net8.0"],
    },
    PropertyInfo {
        name: "LangVersion",
        description: "The C# language version accepted by the compiler.",
        values: &["latest", "preview", "default", "latestMajor", "14", "13", "12"],
    },
    PropertyInfo {
        name: "Nullable",
        description: "Controls the nullable reference types context.",
        values: &["enable", "disable", "warnings", "annotations"],
    },
    PropertyInfo {
        name: "ImplicitUsings",
        description: "Adds global usings for the namespaces of the selected SDK.",
        values: &["enable", "disable"],
    },
    PropertyInfo {
        name: "OutputType",
        description: "The kind of assembly produced.",
        values: &["Exe", "WinExe", "Library"],
    },
    PropertyInfo {
        name: "PublishAot",
        description: "Publishes the app as a native ahead-of-time compiled executable.",
        values: BOOL,
    },
    PropertyInfo {
        name: "PublishTrimmed",
        description: "Removes unused framework code when publishing self-contained.",
        values: BOOL,
    },
    PropertyInfo {
        name: "SelfContained",
        description: "Bundles the .NET runtime with the published app.",
        values: BOOL,
    },
    PropertyInfo {
        name: "RuntimeIdentifier",
        description: "The platform the app is built and published for.",
        values: &["win-x64", "win-arm64", "linux-x64", "linux-arm64", "osx-x64", "osx-arm64"],
    },
    PropertyInfo {
        name: "AllowUnsafeBlocks",
        description: "Allows code that uses the `unsafe` keyword.",
        values: BOOL,
    },
    PropertyInfo {
        name: "InvariantGlobalization",
        description: "Runs with invariant culture and no ICU dependency.",
        values: BOOL,
    },
    PropertyInfo {
        name: "TreatWarningsAsErrors",
        description: "Fails the build on any compiler warning.",
        values: BOOL,
    },
    PropertyInfo {
        name: "EnablePreviewFeatures",
        description: "Opts into preview runtime and library features.",
        values: BOOL,
    },
    PropertyInfo {
        name: "ServerGarbageCollection",
        description: "Uses the server garbage collector instead of workstation GC.",
        values: BOOL,
    },
    PropertyInfo {
        name: "UserSecretsId",
        description: "Identifier of the user secrets store used in development.",
        values: &[],
    },
    PropertyInfo {
        name: "AssemblyName",
        description: "Name of the output assembly. Defaults to the file name.",
        values: &[],
    },
    PropertyInfo {
        name: "RootNamespace",
        description: "Default namespace for generated code and embedded resources.",
        values: &[],
    },
];

impl PropertyInfo {
    /// Known values starting with `prefix`, ignoring ASCII case.
    pub fn matching_values<'a>(&self, prefix: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        let values: &'static [&'static str] = self.values;
        values.iter().copied().filter(move |value| {
            value
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }
}

/// Looks up a property by exact name, ignoring ASCII case.
pub fn find_property(name: &str) -> Option<&'static PropertyInfo> {
    PROPERTIES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Properties whose name contains `query`, ignoring case, in table order.
pub fn matching_properties(query: &str) -> impl Iterator<Item = &'static PropertyInfo> + '_ {
    PROPERTIES
        .iter()
        .filter(move |p| contains_ignore_case(p.name, query))
}
