use std::rc::Rc;
use std::rc::Weak;

use markup5ever_rcdom::{Node, NodeData};

/// RAII guard to ensure the parent reference is restored even on panic.
///
/// `Node::parent` is a `Cell<Option<Weak<Node>>>`, so reading it means taking
/// the value out; the guard puts it back when it goes out of scope.
struct ParentGuard<'a> {
    node: &'a Rc<Node>,
    value: Option<Option<Weak<Node>>>,
}

impl Drop for ParentGuard<'_> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.node.parent.set(value);
        }
    }
}

impl<'a> ParentGuard<'a> {
    fn new(node: &'a Rc<Node>) -> Self {
        let value = node.parent.take();
        Self {
            node,
            value: Some(value),
        }
    }

    fn upgrade(&self) -> Option<Rc<Node>> {
        self.value.as_ref()?.as_ref()?.upgrade()
    }
}

pub(crate) fn get_node_tag_name(node: &Rc<Node>) -> Option<&str> {
    match &node.data {
        NodeData::Document => Some("html"),
        NodeData::Element { name, .. } => Some(&name.local),
        _ => None,
    }
}

/// Tag name of an element node. Unlike [`get_node_tag_name`], the document
/// node has no element name.
pub(crate) fn element_name(node: &Rc<Node>) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&name.local),
        _ => None,
    }
}

pub(crate) fn get_parent_node(node: &Rc<Node>) -> Option<Rc<Node>> {
    ParentGuard::new(node).upgrade()
}

/// Walk parent links upward until an element named `tag` is found.
pub(crate) fn find_ancestor(node: &Rc<Node>, tag: &str) -> Option<Rc<Node>> {
    let mut current = get_parent_node(node)?;
    loop {
        if element_name(&current) == Some(tag) {
            return Some(current);
        }
        current = get_parent_node(&current)?;
    }
}

/// Value of the attribute `name` on an element node.
pub(crate) fn get_attr(node: &Rc<Node>, name: &str) -> Option<String> {
    let NodeData::Element { attrs, .. } = &node.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| attr.value.to_string())
}

/// Element children of `node`, in document order.
pub(crate) fn element_children(node: &Rc<Node>) -> Vec<Rc<Node>> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// The first child that is an element, without collecting the others.
pub(crate) fn first_element_child(node: &Rc<Node>) -> Option<Rc<Node>> {
    node.children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
}

/// Children that carry structure: elements and text that is not blank.
/// Comments, processing instructions and whitespace-only text are skipped.
pub(crate) fn significant_children(node: &Rc<Node>) -> Vec<Rc<Node>> {
    node.children
        .borrow()
        .iter()
        .filter(|child| match &child.data {
            NodeData::Element { .. } => true,
            NodeData::Text { contents } => !contents.borrow().trim().is_empty(),
            _ => false,
        })
        .cloned()
        .collect()
}

/// The closest preceding sibling that is an element.
pub(crate) fn previous_element_sibling(node: &Rc<Node>) -> Option<Rc<Node>> {
    let parent = get_parent_node(node)?;
    let siblings = parent.children.borrow();
    let position = siblings.iter().position(|sibling| Rc::ptr_eq(sibling, node))?;
    let previous = siblings[..position]
        .iter()
        .rev()
        .find(|sibling| matches!(sibling.data, NodeData::Element { .. }))
        .cloned();
    previous
}

/// Concatenated text of every descendant text node, like DOM `textContent`.
pub(crate) fn text_content(node: &Rc<Node>) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Rc<Node>, text: &mut String) {
    match &node.data {
        NodeData::Text { contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in node.children.borrow().iter() {
                collect_text(child, text);
            }
        }
        _ => {}
    }
}

/// Whether any descendant of `node` (not `node` itself) is an element named `tag`.
pub(crate) fn contains_descendant(node: &Rc<Node>, tag: &str) -> bool {
    node.children
        .borrow()
        .iter()
        .any(|child| element_name(child) == Some(tag) || contains_descendant(child, tag))
}

// Check to see if node's parent's tag name matches one of the provided names.
pub(crate) fn parent_tag_name_equals(node: &Rc<Node>, tag_names: &[&str]) -> bool {
    get_parent_node(node)
        .as_ref()
        .and_then(get_node_tag_name)
        .is_some_and(|actual| tag_names.contains(&actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::htmd::parse_html;

    fn find_first(node: &Rc<Node>, tag: &str) -> Option<Rc<Node>> {
        if element_name(node) == Some(tag) {
            return Some(node.clone());
        }
        node.children
            .borrow()
            .iter()
            .find_map(|child| find_first(child, tag))
    }

    #[test]
    fn parent_lookup_restores_link() {
        let dom = parse_html("<table><tr><td>x</td></tr></table>").unwrap();
        let td = find_first(&dom.document, "td").unwrap();

        let first = get_parent_node(&td).unwrap();
        let second = get_parent_node(&td).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(element_name(&first), Some("tr"));
    }

    #[test]
    fn find_ancestor_stops_at_root() {
        let dom = parse_html("<p><em>x</em></p>").unwrap();
        let em = find_first(&dom.document, "em").unwrap();
        assert!(find_ancestor(&em, "table").is_none());
        assert!(find_ancestor(&em, "p").is_some());
    }

    #[test]
    fn first_element_child_skips_text_and_comments() {
        let dom = parse_html("<div> <!-- c --> text<span>a</span><em>b</em></div>").unwrap();
        let div = find_first(&dom.document, "div").unwrap();
        let first = first_element_child(&div).unwrap();
        assert_eq!(element_name(&first), Some("span"));

        let span = find_first(&dom.document, "span").unwrap();
        assert!(first_element_child(&span).is_none());
    }

    #[test]
    fn previous_element_sibling_skips_text() {
        let dom = parse_html("<table><thead></thead>\n <tbody><tr><td>a</td></tr></tbody></table>")
            .unwrap();
        let tbody = find_first(&dom.document, "tbody").unwrap();
        let previous = previous_element_sibling(&tbody).unwrap();
        assert_eq!(element_name(&previous), Some("thead"));
        assert!(parent_tag_name_equals(&tbody, &["table"]));
    }

    #[test]
    fn significant_children_ignore_blank_text() {
        let dom = parse_html("<div>\n  <span>a</span>\n</div>").unwrap();
        let div = find_first(&dom.document, "div").unwrap();
        assert_eq!(significant_children(&div).len(), 1);
        assert_eq!(text_content(&div).trim(), "a");
    }
}
