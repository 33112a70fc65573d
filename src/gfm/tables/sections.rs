//! Table parts with no Markdown form of their own.

use crate::htmd::Element;
use crate::htmd::element_handler::{HandlerResult, Handlers};

/// `caption`, `colgroup` and `col` are dropped.
pub(crate) fn dropped_rule(_handlers: &dyn Handlers, _element: Element) -> Option<HandlerResult> {
    None
}

/// `thead`, `tbody` and `tfoot` contribute their rows unchanged.
pub(crate) fn section_rule(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    Some(handlers.walk_children(element.node, element.is_pre))
}
