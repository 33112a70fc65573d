use super::super::{Element, text_util::{TrimDocumentWhitespace, concat_strings}};
use super::{HandlerResult, Handlers};

pub(super) fn headings_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let level = element
        .tag
        .strip_prefix('h')
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, 6);
    let content = handlers.walk_children(element.node, element.is_pre).content;
    // ATX headings are single-line.
    let content = content
        .trim_document_whitespace()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if content.is_empty() {
        return None;
    }
    Some(concat_strings!("\n\n", "#".repeat(level), " ", content, "\n\n").into())
}
