use super::super::{Element, text_util::concat_strings};
use super::{HandlerResult, Handlers};

pub(super) fn emphasis_handler(
    handlers: &dyn Handlers,
    element: Element,
    marker: &str,
) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node, element.is_pre).content;
    if content.is_empty() {
        return None;
    }
    // Markers must hug the text, so surrounding whitespace moves outside them.
    let trimmed_start = content.trim_start();
    let leading = &content[..content.len() - trimmed_start.len()];
    let inner = trimmed_start.trim_end();
    let trailing = &trimmed_start[inner.len()..];
    if inner.is_empty() {
        // Emphasis on whitespace alone is meaningless.
        return Some(concat_strings!(leading, trailing).into());
    }
    Some(concat_strings!(leading, marker, inner, marker, trailing).into())
}
