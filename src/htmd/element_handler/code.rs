use std::rc::Rc;

use markup5ever_rcdom::Node;

use super::super::{
    Element,
    node_util::{element_children, get_attr, parent_tag_name_equals, text_content},
    text_util::concat_strings,
};
use super::{HandlerResult, Handlers};

pub(super) fn code_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    // Inside <pre> the pre handler owns the raw text and the fence.
    if parent_tag_name_equals(element.node, &["pre"]) {
        return Some(text_content(element.node).into());
    }

    let content = handlers.walk_children(element.node, true).content;
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    // Longest run of backticks inside decides the delimiter length.
    let longest_run = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let delimiter = "`".repeat(longest_run + 1);
    let padding = if content.starts_with('`') || content.ends_with('`') {
        " "
    } else {
        ""
    };
    Some(concat_strings!(delimiter, padding, content, padding, delimiter).into())
}

pub(super) fn pre_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let code = text_content(element.node);
    let code = code.trim_matches('\n');
    if code.trim().is_empty() {
        return None;
    }
    let language = language_of(element.node)
        .or_else(|| {
            element_children(element.node)
                .iter()
                .find_map(language_of)
        })
        .unwrap_or_default();
    let fence = &handlers.options().fence;
    Some(concat_strings!("\n\n", fence, language, "\n", code, "\n", fence, "\n\n").into())
}

/// Language hint from `class="language-xxx"` or `class="lang-xxx"`.
fn language_of(node: &Rc<Node>) -> Option<String> {
    get_attr(node, "class")?
        .split_whitespace()
        .find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
                .map(str::to_string)
        })
}
