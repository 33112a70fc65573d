use std::borrow::Cow;
use std::rc::Rc;
use std::sync::LazyLock;

use ahash::AHashSet;
use log::warn;
use markup5ever_rcdom::{Node, NodeData};

use super::{
    ConversionPass,
    node_util::get_node_tag_name,
    text_util::{compress_whitespace, index_of_markdown_ordered_item_dot, is_markdown_atx_heading},
};

/// Most consecutive newlines allowed where two pieces of output meet.
const MAX_JOINED_NEWLINES: usize = 2;

/// Append the Markdown for `node` to `out`.
///
/// `trim_leading_spaces` drops leading spaces of a text node that starts a
/// block or follows one. Inside `pre` text is copied as is.
pub(crate) fn walk_node(
    node: &Rc<Node>,
    out: &mut String,
    pass: &ConversionPass<'_>,
    parent_tag: Option<&str>,
    trim_leading_spaces: bool,
    is_pre: bool,
) {
    match &node.data {
        NodeData::Document => {
            walk_children(node, out, pass, true, false);
            let kept = out.trim_end_matches(['\n', '\t', ' ']).len();
            out.truncate(kept);
        }
        NodeData::Text { contents } => {
            push_text(out, &contents.borrow(), trim_leading_spaces, is_pre);
        }
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs.borrow();
            if let Some(result) = pass.handle(node, &name.local, &attrs, 0, is_pre) {
                push_joined(out, result.content, is_pre);
            }
        }
        NodeData::ProcessingInstruction { target, .. } => {
            warn!(
                "Dropping processing instruction '{}' under <{}>",
                target,
                parent_tag.unwrap_or("#document")
            );
        }
        NodeData::Comment { .. } | NodeData::Doctype { .. } => {}
    }
}

/// Append the Markdown of every child of `node` to `out`.
pub(crate) fn walk_children(
    node: &Rc<Node>,
    out: &mut String,
    pass: &ConversionPass<'_>,
    parent_is_block: bool,
    is_pre: bool,
) {
    let parent_tag = get_node_tag_name(node);
    let mut at_block_boundary = parent_is_block && !is_pre;

    for child in node.children.borrow().iter() {
        let child_is_block = get_node_tag_name(child).is_some_and(is_block_element);
        if child_is_block {
            let kept = out.trim_end_matches(' ').len();
            out.truncate(kept);
        }

        let before = out.len();
        walk_node(child, out, pass, parent_tag, at_block_boundary, is_pre);
        // Children that produced nothing leave the boundary state alone.
        if out.len() != before {
            at_block_boundary = child_is_block;
        }
    }
}

fn push_text(out: &mut String, raw: &str, trim_leading_spaces: bool, is_pre: bool) {
    if is_pre {
        out.push_str(raw);
        return;
    }
    let escaped = escape_markdown(raw);
    let text = compress_whitespace(&escaped);
    let text: &str = if trim_leading_spaces || (out.ends_with(' ') && text.starts_with(' ')) {
        text.trim_start_matches(' ')
    } else {
        &text
    };
    out.push_str(text);
}

/// Append a handler's output, keeping at most two newlines where `out` and
/// `content` meet and a single space between adjacent inline pieces.
fn push_joined(out: &mut String, content: String, is_pre: bool) {
    if out.is_empty() {
        out.push_str(&content);
        return;
    }

    let trailing = out.bytes().rev().take_while(|&b| b == b'\n').count();
    let leading = content.bytes().take_while(|&b| b == b'\n').count();
    let mut skip = (trailing + leading)
        .saturating_sub(MAX_JOINED_NEWLINES)
        .min(leading);

    if !is_pre && trailing == 0 && leading == 0 && out.ends_with(' ') && content.starts_with(' ') {
        skip = 1;
    }
    out.push_str(&content[skip..]);
}

/// Backslash-escape text so it reads back as the same literal text.
///
/// Anywhere in the text: `\` `*` `_` `` ` `` `[` `]`. At the start, only
/// where they would open a construct: `=`, `~` and `>`; `-` or `+` followed
/// by a space; an ATX heading marker; the dot of an ordered-list marker.
fn escape_markdown(text: &str) -> Cow<'_, str> {
    const ANYWHERE: [char; 6] = ['\\', '*', '_', '`', '[', ']'];

    let Some(first) = text.chars().next() else {
        return Cow::Borrowed(text);
    };
    let risky_start = matches!(first, '=' | '~' | '>' | '-' | '+' | '#') || first.is_ascii_digit();
    if !risky_start && !text.contains(ANYWHERE) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if ANYWHERE.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    let prefix_backslash = match first {
        '=' | '~' | '>' => true,
        '-' | '+' => escaped[1..].starts_with(' '),
        '#' => is_markdown_atx_heading(&escaped),
        _ => false,
    };
    if prefix_backslash {
        escaped.insert(0, '\\');
    } else if let Some(dot) = index_of_markdown_ordered_item_dot(&escaped) {
        escaped.insert(dot, '\\');
    }
    Cow::Owned(escaped)
}

/// Tags that start an HTML block in CommonMark (section 4.6), plus `pre`
/// and the table parts.
static BLOCK_TAGS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    AHashSet::from_iter([
        "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption",
        "center", "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt",
        "fieldset", "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2",
        "h3", "h4", "h5", "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link",
        "main", "menu", "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param",
        "pre", "script", "search", "section", "style", "summary", "table", "tbody", "td",
        "textarea", "tfoot", "th", "thead", "title", "tr", "track", "ul",
    ])
});

pub(crate) fn is_block_element(tag: &str) -> bool {
    BLOCK_TAGS.contains(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(out: &str, content: &str) -> String {
        let mut out = out.to_string();
        push_joined(&mut out, content.to_string(), false);
        out
    }

    #[test]
    fn escapes_only_what_would_change_meaning() {
        assert_eq!(escape_markdown("a*b"), "a\\*b");
        assert_eq!(escape_markdown("- item"), "\\- item");
        assert_eq!(escape_markdown("-1"), "-1");
        assert_eq!(escape_markdown("1. one"), "1\\. one");
        assert_eq!(escape_markdown("# title"), "\\# title");
        assert_eq!(escape_markdown("a|b"), "a|b");
        assert!(matches!(escape_markdown("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn joins_cap_newlines_and_spaces() {
        assert_eq!(joined("a\n\n", "\n\nb"), "a\n\nb");
        assert_eq!(joined("a\n", "\n\nb"), "a\n\nb");
        assert_eq!(joined("a ", " b"), "a b");
        assert_eq!(joined("", "\n\nb"), "\n\nb");
    }
}
