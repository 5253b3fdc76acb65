use super::contains_ignore_case;

/// A known MSBuild project SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub docs_url: Option<&'static str>,
}

/// SDKs offered for `#:sdk` directives.
pub static SDKS: &[SdkInfo] = &[
    SdkInfo {
        name: "Microsoft.NET.Sdk",
        description: "The default SDK for console apps and class libraries.",
        docs_url: Some("https://learn.microsoft.com/dotnet/core/project-sdk/overview"),
    },
    SdkInfo {
        name: "Microsoft.NET.Sdk.Web",
        description: "ASP.NET Core web apps and APIs. Adds the shared framework and web defaults.",
        docs_url: Some("https://learn.microsoft.com/aspnet/core/razor-pages/web-sdk"),
    },
    SdkInfo {
        name: "Microsoft.NET.Sdk.Worker",
        description: "Long-running background services built on the generic host.",
        docs_url: Some("https://learn.microsoft.com/dotnet/core/extensions/workers"),
    },
    SdkInfo {
        name: "Microsoft.NET.Sdk.Razor",
        description: "Razor class libraries with components, pages and views.",
        docs_url: Some("https://learn.microsoft.com/aspnet/core/razor-pages/sdk"),
    },
    SdkInfo {
        name: "Microsoft.NET.Sdk.BlazorWebAssembly",
        description: "Blazor apps that run in the browser on WebAssembly.",
        docs_url: Some("https://learn.microsoft.com/aspnet/core/blazor/"),
    },
    SdkInfo {
        name: "Microsoft.NET.Sdk.WindowsDesktop",
        description: "Windows Forms and WPF desktop apps.",
        docs_url: None,
    },
    SdkInfo {
        name: "Aspire.AppHost.Sdk",
        description: ".NET Aspire app host that orchestrates distributed applications.",
        docs_url: Some("https://learn.microsoft.com/dotnet/aspire/"),
    },
    SdkInfo {
        name: "MSTest.Sdk",
        description: "MSTest test projects with the testing platform preconfigured.",
        docs_url: Some("https://learn.microsoft.com/dotnet/core/testing/unit-testing-mstest-sdk"),
    },
    SdkInfo {
        name: "Microsoft.Build.NoTargets",
        description: "Projects that build no assembly, for packaging or running custom targets.",
        docs_url: None,
    },
];

/// Looks up an SDK by exact name, ignoring ASCII case.
pub fn find_sdk(name: &str) -> Option<&'static SdkInfo> {
    SDKS.iter().find(|sdk| sdk.name.eq_ignore_ascii_case(name))
}

/// SDKs whose name contains `query`, ignoring case, in table order.
pub fn matching_sdks(query: &str) -> impl Iterator<Item = &'static SdkInfo> + '_ {
    SDKS.iter()
        .filter(move |sdk| contains_ignore_case(sdk.name, query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sdk_ignores_case() {
        let sdk = find_sdk("microsoft.net.sdk.web").unwrap();
        assert_eq!(sdk.name, "Microsoft.NET.Sdk.Web");
        assert!(find_sdk("Microsoft.NET.Sdk.Unknown").is_none());
    }

    #[test]
    fn test_matching_sdks_substring() {
        let names: Vec<_> = matching_sdks("web").map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["Microsoft.NET.Sdk.Web", "Microsoft.NET.Sdk.BlazorWebAssembly"]
        );

        let names: Vec<_> = matching_sdks("sdk.web").map(|s| s.name).collect();
        assert_eq!(names, vec!["Microsoft.NET.Sdk.Web"]);

        let names: Vec<_> = matching_sdks("ASPIRE").map(|s| s.name).collect();
        assert_eq!(names, vec!["Aspire.AppHost.Sdk"]);
    }

    #[test]
    fn test_empty_query_lists_everything() {
        assert_eq!(matching_sdks("").count(), SDKS.len());
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in SDKS.iter().enumerate() {
            for b in &SDKS[i + 1..] {
                assert!(!a.name.eq_ignore_ascii_case(b.name), "duplicate {}", a.name);
            }
        }
    }
}
