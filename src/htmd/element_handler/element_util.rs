use super::super::{Element, dom_walker::is_block_element, text_util::concat_strings};
use crate::error::{ConvertError, ConvertResult};
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use markup5ever_rcdom::SerializableHandle;

// Given a node (which must be an element), serialize it (transform it back
// to HTML), including all of its descendants.
pub(crate) fn serialize_element(element: &Element) -> ConvertResult<String> {
    let so = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let mut bytes = vec![];
    let handle: SerializableHandle = SerializableHandle::from(element.node.clone());
    serialize(&mut bytes, &handle, so).map_err(|err| ConvertError::Serialize {
        tag: element.tag.to_string(),
        message: err.to_string(),
    })?;
    let html = String::from_utf8(bytes).map_err(|err| ConvertError::Serialize {
        tag: element.tag.to_string(),
        message: err.to_string(),
    })?;

    if !is_block_element(element.tag) {
        return Ok(html);
    }
    // A blank line terminates an HTML block (CommonMark 4.6), so only the
    // first newline of a whitespace run stays literal.
    Ok(concat_strings!("\n\n", escape_blank_lines(&html), "\n\n"))
}

fn escape_blank_lines(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut after_newline = false;
    for c in html.chars() {
        match c {
            '\n' if after_newline => result.push_str("&#10;"),
            '\n' => {
                after_newline = true;
                result.push('\n');
            }
            '\r' if after_newline => result.push_str("&#13;"),
            c if c.is_whitespace() => result.push(c),
            c => {
                after_newline = false;
                result.push(c);
            }
        }
    }
    result
}
