//! Hover handler implementation.
//!
//! Hover only answers when the cursor sits exactly on a directive keyword or
//! on the name that follows it.

use crate::catalog::{DirectiveKind, PropertyInfo, SdkInfo, find_property, find_sdk};
use crate::resolver::{Token, parse_directive};
use crate::state::ServerState;
use directives_core::line_at;
use directives_nuget::package_hover;
use std::sync::Arc;
use tower_lsp_server::ls_types::{Hover, HoverContents, HoverParams, MarkupContent, MarkupKind};

/// Handles hover requests.
pub async fn handle_hover(state: Arc<ServerState>, params: HoverParams) -> Option<Hover> {
    let uri = &params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    let content = state.document_text(uri)?;
    let line = line_at(&content, position.line)?;
    let directive = parse_directive(line, position.line)?;

    if directive.keyword.contains(position) {
        return Some(markdown_hover(
            keyword_hover(directive.kind),
            &directive.keyword,
        ));
    }

    let name = directive.name.as_ref().filter(|name| name.contains(position))?;
    let value = directive.value.as_ref().map(|v| v.text.as_str());

    let markdown = match directive.kind {
        DirectiveKind::Package => {
            let record = state.nuget().await.lookup_package(&name.text).await?;
            package_hover(&record, value)
        }
        DirectiveKind::Sdk => sdk_hover(find_sdk(&name.text)?, value),
        DirectiveKind::Property => property_hover(find_property(&name.text)?, value),
    };

    Some(markdown_hover(markdown, name))
}

fn markdown_hover(value: String, token: &Token) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(token.range),
    }
}

/// Hover markdown for a directive keyword.
pub fn keyword_hover(kind: DirectiveKind) -> String {
    format!(
        "**#:{}**\n\n{}\n\n```csharp\n{}\n```",
        kind.keyword(),
        kind.summary(),
        kind.syntax()
    )
}

/// Hover markdown for a known SDK.
pub fn sdk_hover(sdk: &SdkInfo, version: Option<&str>) -> String {
    let mut md = format!("# {}\n\n{}", sdk.name, sdk.description);

    if let Some(version) = version {
        md.push_str(&format!("\n\n**Version**: `{}`", version));
    }

    if let Some(url) = sdk.docs_url {
        md.push_str(&format!("\n\n[Documentation]({})", url));
    }

    md
}

/// Hover markdown for a known MSBuild property.
pub fn property_hover(property: &PropertyInfo, value: Option<&str>) -> String {
    let mut md = format!("# {}\n\n{}", property.name, property.description);

    if !property.values.is_empty() {
        md.push_str(&format!(
            "\n\n**Values**: `{}`",
            property.values.join("`, `")
        ));
    }

    if let Some(value) = value {
        md.push_str(&format!("\n\n**Current**: `{}`", value));
        if !property.values.is_empty()
            && !property.values.iter().any(|v| v.eq_ignore_ascii_case(value))
        {
            md.push_str(" (not a well-known value)");
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::{nuget_at, text_document_position};
    use std::str::FromStr;
    use tower_lsp_server::ls_types::{Position, Range, Uri};

    const DOCUMENT: &str = "#:sdk Microsoft.NET.Sdk.Web\n\
                            #:package Humanizer@2.13.14\n\
                            #:property Nullable=enable\n\
                            \n\
                            Console.WriteLine(\"hi\");\n";

    fn hover_params(uri: &Uri, line: u32, character: u32) -> HoverParams {
        HoverParams {
            text_document_position_params: text_document_position(uri, line, character),
            work_done_progress_params: Default::default(),
        }
    }

    fn markdown_of(hover: &Hover) -> &str {
        match &hover.contents {
            HoverContents::Markup(markup) => &markup.value,
            other => panic!("expected markup, got {:?}", other),
        }
    }

    fn state_with_document(state: ServerState) -> (Arc<ServerState>, Uri) {
        let uri = Uri::from_str("file:///app/hello.cs").unwrap();
        state.update_document(uri.clone(), DOCUMENT.to_string());
        (Arc::new(state), uri)
    }

    #[tokio::test]
    async fn test_hover_keyword() {
        let (state, uri) = state_with_document(ServerState::new());

        let hover = handle_hover(state, hover_params(&uri, 2, 4)).await.unwrap();
        assert!(markdown_of(&hover).starts_with("**#:property**"));
        assert_eq!(
            hover.range,
            Some(Range::new(Position::new(2, 0), Position::new(2, 10)))
        );
    }

    #[tokio::test]
    async fn test_hover_sdk() {
        let (state, uri) = state_with_document(ServerState::new());

        let hover = handle_hover(state, hover_params(&uri, 0, 12)).await.unwrap();
        let md = markdown_of(&hover);
        assert!(md.starts_with("# Microsoft.NET.Sdk.Web"));
        assert!(md.contains("[Documentation]"));
    }

    #[tokio::test]
    async fn test_hover_property_shows_current_value() {
        let (state, uri) = state_with_document(ServerState::new());

        let hover = handle_hover(state, hover_params(&uri, 2, 12)).await.unwrap();
        let md = markdown_of(&hover);
        assert!(md.starts_with("# Nullable"));
        assert!(md.contains("**Current**: `enable`"));
        assert!(!md.contains("not a well-known value"));
    }

    #[tokio::test]
    async fn test_hover_on_value_is_not_resolved() {
        let (state, uri) = state_with_document(ServerState::new());

        // Column 22 is inside "enable", not the property name.
        assert!(handle_hover(state, hover_params(&uri, 2, 22)).await.is_none());
    }

    #[tokio::test]
    async fn test_hover_outside_directives() {
        let (state, uri) = state_with_document(ServerState::new());

        assert!(handle_hover(Arc::clone(&state), hover_params(&uri, 3, 0)).await.is_none());
        assert!(handle_hover(Arc::clone(&state), hover_params(&uri, 4, 3)).await.is_none());
        assert!(handle_hover(state, hover_params(&uri, 40, 0)).await.is_none());
    }

    #[tokio::test]
    async fn test_hover_package() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/query")
            .match_query(mockito::Matcher::UrlEncoded(
                "q".into(),
                "packageid:Humanizer".into(),
            ))
            .with_status(200)
            .with_body(
                r#"{"data": [{"id": "Humanizer", "version": "2.14.1", "description": "Turns strings into human friendly text", "totalDownloads": 500000000}]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let (state, uri) = state_with_document(ServerState::with_nuget(nuget_at(&server.url())));

        let hover = handle_hover(Arc::clone(&state), hover_params(&uri, 1, 14))
            .await
            .unwrap();
        let md = markdown_of(&hover);
        assert!(md.starts_with("# Humanizer"));
        assert!(md.contains("**Requested**: `2.13.14` (update available)"));
        assert_eq!(
            hover.range,
            Some(Range::new(Position::new(1, 10), Position::new(1, 19)))
        );

        // Served from the package cache the second time.
        assert!(handle_hover(state, hover_params(&uri, 1, 14)).await.is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_hover_unknown_package() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/query")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let (state, uri) = state_with_document(ServerState::with_nuget(nuget_at(&server.url())));
        assert!(handle_hover(state, hover_params(&uri, 1, 14)).await.is_none());
    }

    #[test]
    fn test_keyword_hover() {
        let md = keyword_hover(DirectiveKind::Package);
        assert!(md.contains("NuGet package"));
        assert!(md.contains("#:package <PackageId>@<Version>"));
    }

    #[test]
    fn test_sdk_hover_with_version() {
        let sdk = find_sdk("Aspire.AppHost.Sdk").unwrap();
        let md = sdk_hover(sdk, Some("9.0.0"));
        assert!(md.contains("**Version**: `9.0.0`"));
    }

    #[test]
    fn test_property_hover_flags_unknown_value() {
        let nullable = find_property("Nullable").unwrap();
        let md = property_hover(nullable, Some("maybe"));
        assert!(md.contains("**Values**: `enable`, `disable`, `warnings`, `annotations`"));
        assert!(md.contains("`maybe` (not a well-known value)"));

        let free_form = find_property("AssemblyName").unwrap();
        assert!(!property_hover(free_form, Some("hello")).contains("well-known"));
    }
}
