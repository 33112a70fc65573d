use super::super::{Element, options::BrStyle};
use super::{HandlerResult, Handlers};

/// A hard line break, in the configured style.
pub(super) fn br_handler(handlers: &dyn Handlers, _element: Element) -> Option<HandlerResult> {
    let hard_break = match handlers.options().br_style {
        BrStyle::TwoSpaces => "  \n",
        BrStyle::Backslash => "\\\n",
    };
    Some(hard_break.into())
}
