//! LSP rendering of NuGet packages and versions.

use crate::client::package_url;
use crate::types::PackageRecord;
use tower_lsp_server::ls_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation, MarkupContent,
    MarkupKind, Range, TextEdit,
};

const MAX_DESCRIPTION_LEN: usize = 200;

/// Formats a download count compactly (`1.2K`, `3.4M`, `5.0B`).
///
/// # Examples
///
/// ```
/// use directives_nuget::format_downloads;
///
/// assert_eq!(format_downloads(999), "999");
/// assert_eq!(format_downloads(12_500), "12.5K");
/// assert_eq!(format_downloads(500_000_000), "500.0M");
/// ```
pub fn format_downloads(count: u64) -> String {
    match count {
        0..1_000 => count.to_string(),
        1_000..1_000_000 => format!("{:.1}K", count as f64 / 1_000.0),
        1_000_000..1_000_000_000 => format!("{:.1}M", count as f64 / 1_000_000.0),
        _ => format!("{:.1}B", count as f64 / 1_000_000_000.0),
    }
}

/// Sort key ranking more downloads first, ties broken by remote order.
fn package_sort_text(record: &PackageRecord, index: usize) -> String {
    let downloads = record.total_downloads.unwrap_or(0);
    format!("{:020}-{:04}", u64::MAX - downloads, index)
}

fn truncate_description(desc: &str) -> String {
    if desc.len() <= MAX_DESCRIPTION_LEN {
        return desc.to_string();
    }

    let mut end = MAX_DESCRIPTION_LEN;
    while end > 0 && !desc.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &desc[..end])
}

/// Builds the completion item for one package search result.
///
/// Accepting the item replaces `replace_range` (the typed query) with
/// `<id>@<latest>`, leaving the cursor after the version so it can be
/// edited in place.
///
/// `index` is the result's position in the remote response and only breaks
/// ties between packages with equal download counts.
pub fn package_completion(
    record: &PackageRecord,
    index: usize,
    replace_range: Range,
) -> CompletionItem {
    let insert = record.directive_reference();

    let mut detail = format!("v{}", record.latest_version);
    if let Some(downloads) = record.total_downloads {
        detail.push_str(&format!(" · {} downloads", format_downloads(downloads)));
    }

    let mut doc_parts = vec![format!("**{}** v{}", record.id, record.latest_version)];
    if let Some(desc) = &record.description {
        doc_parts.push(String::new());
        doc_parts.push(truncate_description(desc));
    }
    doc_parts.push(String::new());
    doc_parts.push(format!("[View on nuget.org]({})", package_url(&record.id)));

    CompletionItem {
        label: record.id.clone(),
        kind: Some(CompletionItemKind::MODULE),
        detail: Some(detail),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: doc_parts.join("\n"),
        })),
        insert_text: Some(insert.clone()),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit {
            range: replace_range,
            new_text: insert,
        })),
        sort_text: Some(package_sort_text(record, index)),
        filter_text: Some(record.id.clone()),
        ..Default::default()
    }
}

/// Builds the completion item for one entry of an already sorted version list.
///
/// `index` is the position in that list; the sort text keeps the list order
/// and the first entry is marked as the latest version.
pub fn version_completion(
    version: &str,
    package_id: &str,
    index: usize,
    replace_range: Range,
) -> CompletionItem {
    let is_latest = index == 0;
    let detail = if is_latest {
        format!("v{} (latest)", version)
    } else {
        format!("v{}", version)
    };

    CompletionItem {
        label: version.to_string(),
        kind: Some(CompletionItemKind::VALUE),
        detail: Some(detail),
        documentation: Some(Documentation::String(format!(
            "Version {} of {}",
            version, package_id
        ))),
        insert_text: Some(version.to_string()),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit {
            range: replace_range,
            new_text: version.to_string(),
        })),
        sort_text: Some(format!("{:04}", index)),
        preselect: is_latest.then_some(true),
        ..Default::default()
    }
}

/// Renders hover markdown for a package.
///
/// `requested_version` is the version written after `@` in the directive,
/// if any.
pub fn package_hover(record: &PackageRecord, requested_version: Option<&str>) -> String {
    let mut md = format!("# {}\n\n", record.id);

    if let Some(desc) = &record.description {
        md.push_str(desc);
        md.push_str("\n\n");
    }

    md.push_str(&format!("**Latest**: `{}`", record.latest_version));
    if let Some(requested) = requested_version.filter(|v| !v.is_empty()) {
        md.push_str(&format!("\n\n**Requested**: `{}`", requested));
        if requested != record.latest_version {
            md.push_str(" (update available)");
        }
    }

    if let Some(downloads) = record.total_downloads {
        md.push_str(&format!("\n\n**Downloads**: {}", format_downloads(downloads)));
    }

    md.push_str(&format!(
        "\n\n[View on nuget.org]({})",
        package_url(&record.id)
    ));

    md
}
