//! Completion handler implementation.
//!
//! Classifies the cursor context on the current line and pulls suggestions
//! from NuGet or from the static catalogs.

use crate::catalog::{
    DirectiveKind, PropertyInfo, SdkInfo, find_property, matching_properties, matching_sdks,
};
use crate::config::DirectivesConfig;
use crate::resolver::{CompletionContext, classify};
use crate::state::ServerState;
use directives_core::{filter_versions, line_at};
use directives_nuget::{NugetClient, package_completion, version_completion};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp_server::ls_types::{
    CompletionItem, CompletionItemKind, CompletionParams, CompletionResponse, CompletionTextEdit,
    Documentation, MarkupContent, MarkupKind, Position, Range, TextEdit,
};

/// Handles completion requests.
///
/// Every request takes a ticket for its document before any lookup. If a
/// newer request for the same document was issued while this one waited
/// on the network, the result is dropped.
pub async fn handle_completion(
    state: Arc<ServerState>,
    params: CompletionParams,
    config: Arc<RwLock<DirectivesConfig>>,
) -> Option<CompletionResponse> {
    let uri = &params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    tracing::debug!(
        "completion request: uri={:?}, line={}, character={}",
        uri,
        position.line,
        position.character
    );

    let Some(content) = state.document_text(uri) else {
        tracing::warn!("completion: document not found: {:?}", uri);
        return None;
    };

    let ticket = state.sequencer.begin(uri.as_str());

    let line = line_at(&content, position.line)?;
    let context = classify(line, position.character)?;

    tracing::debug!("completion: context = {:?}", context);

    let max_versions = config.read().await.completion.max_versions;
    let nuget = state.nuget().await;
    let items = complete(&nuget, context, position, max_versions).await;

    if !state.sequencer.is_current(&ticket) {
        tracing::debug!(
            "completion: discarding stale result #{} for {:?}",
            ticket.sequence(),
            uri
        );
        return None;
    }

    tracing::debug!("completion: returning {} items", items.len());

    if items.is_empty() {
        None
    } else {
        Some(CompletionResponse::Array(items))
    }
}

/// Produces the suggestions for a classified context.
///
/// `cursor` is the request position; items replace the text between the
/// context's start column and the cursor.
pub async fn complete(
    nuget: &NugetClient,
    context: CompletionContext,
    cursor: Position,
    max_versions: usize,
) -> Vec<CompletionItem> {
    let range = Range::new(Position::new(cursor.line, context.start()), cursor);

    match context {
        CompletionContext::DirectiveName { prefix, .. } => DirectiveKind::matching(&prefix)
            .map(|kind| keyword_completion(kind, range))
            .collect(),

        CompletionContext::PackageName { query, .. } => {
            if query.trim().is_empty() {
                return Vec::new();
            }
            nuget
                .search_packages(&query)
                .await
                .iter()
                .enumerate()
                .map(|(index, record)| package_completion(record, index, range))
                .collect()
        }

        CompletionContext::PackageVersion {
            package_id, prefix, ..
        } => version_items(nuget, &package_id, &prefix, max_versions, range).await,

        CompletionContext::SdkVersion { sdk, prefix, .. } => {
            version_items(nuget, &sdk, &prefix, max_versions, range).await
        }

        CompletionContext::Sdk { query, .. } => matching_sdks(&query)
            .enumerate()
            .map(|(index, sdk)| sdk_completion(sdk, index, range))
            .collect(),

        CompletionContext::PropertyName { prefix, .. } => matching_properties(&prefix)
            .enumerate()
            .map(|(index, property)| property_completion(property, index, range))
            .collect(),

        CompletionContext::PropertyValue {
            property, prefix, ..
        } => {
            let Some(info) = find_property(&property) else {
                tracing::debug!("completion: unknown property {}", property);
                return Vec::new();
            };
            info.matching_values(&prefix)
                .enumerate()
                .map(|(index, value)| value_completion(info, value, index, range))
                .collect()
        }
    }
}

async fn version_items(
    nuget: &NugetClient,
    package_id: &str,
    prefix: &str,
    max_versions: usize,
    range: Range,
) -> Vec<CompletionItem> {
    let versions = nuget.fetch_versions(package_id).await;

    filter_versions(&versions, prefix, max_versions)
        .iter()
        .enumerate()
        .map(|(index, version)| version_completion(version, package_id, index, range))
        .collect()
}

fn markdown(value: String) -> Option<Documentation> {
    Some(Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value,
    }))
}

fn text_edit(range: Range, new_text: &str) -> Option<CompletionTextEdit> {
    Some(CompletionTextEdit::Edit(TextEdit {
        range,
        new_text: new_text.to_string(),
    }))
}

fn keyword_completion(kind: DirectiveKind, range: Range) -> CompletionItem {
    // Trailing space so the next completion fires right away.
    let insert = format!("{} ", kind.keyword());

    CompletionItem {
        label: kind.keyword().to_string(),
        kind: Some(CompletionItemKind::KEYWORD),
        detail: Some(kind.syntax().to_string()),
        documentation: markdown(kind.summary().to_string()),
        insert_text: Some(insert.clone()),
        text_edit: text_edit(range, &insert),
        ..Default::default()
    }
}

fn sdk_completion(sdk: &SdkInfo, index: usize, range: Range) -> CompletionItem {
    let mut doc = sdk.description.to_string();
    if let Some(url) = sdk.docs_url {
        doc.push_str(&format!("\n\n[Documentation]({})", url));
    }

    CompletionItem {
        label: sdk.name.to_string(),
        kind: Some(CompletionItemKind::MODULE),
        detail: Some("MSBuild project SDK".to_string()),
        documentation: markdown(doc),
        insert_text: Some(sdk.name.to_string()),
        text_edit: text_edit(range, sdk.name),
        sort_text: Some(format!("{:04}", index)),
        ..Default::default()
    }
}

fn property_completion(property: &PropertyInfo, index: usize, range: Range) -> CompletionItem {
    let mut doc = property.description.to_string();
    if !property.values.is_empty() {
        doc.push_str(&format!("\n\nValues: `{}`", property.values.join("`, `")));
    }

    CompletionItem {
        label: property.name.to_string(),
        kind: Some(CompletionItemKind::PROPERTY),
        detail: Some("MSBuild property".to_string()),
        documentation: markdown(doc),
        insert_text: Some(property.name.to_string()),
        text_edit: text_edit(range, property.name),
        sort_text: Some(format!("{:04}", index)),
        ..Default::default()
    }
}

fn value_completion(
    property: &PropertyInfo,
    value: &str,
    index: usize,
    range: Range,
) -> CompletionItem {
    CompletionItem {
        label: value.to_string(),
        kind: Some(CompletionItemKind::VALUE),
        detail: Some(format!("{} value", property.name)),
        insert_text: Some(value.to_string()),
        text_edit: text_edit(range, value),
        sort_text: Some(format!("{:04}", index)),
        ..Default::default()
    }
}
