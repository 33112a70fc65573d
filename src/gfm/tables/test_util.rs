use std::rc::Rc;

use markup5ever_rcdom::{Node, RcDom};

use crate::htmd::{node_util::element_name, parse_html};

pub(crate) fn parse(html: &str) -> RcDom {
    parse_html(html).expect("test HTML parses")
}

/// Every element named `tag`, in document order.
pub(crate) fn find_all(dom: &RcDom, tag: &str) -> Vec<Rc<Node>> {
    fn visit(node: &Rc<Node>, tag: &str, found: &mut Vec<Rc<Node>>) {
        if element_name(node) == Some(tag) {
            found.push(node.clone());
        }
        for child in node.children.borrow().iter() {
            visit(child, tag, found);
        }
    }
    let mut found = Vec::new();
    visit(&dom.document, tag, &mut found);
    found
}
