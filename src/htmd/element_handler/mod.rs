//! Element handlers: the registry and the default rule set.

mod br;
mod code;
pub(crate) mod element_util;
mod emphasis;
mod headings;

use std::rc::Rc;

use ahash::{AHashMap, AHashSet};
use markup5ever_rcdom::Node;

use super::{Element, options::Options, pass::PassMemo, text_util::concat_strings};

/// Markdown produced for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResult {
    pub content: String,
}

impl From<String> for HandlerResult {
    fn from(content: String) -> Self {
        Self { content }
    }
}

impl From<&str> for HandlerResult {
    fn from(content: &str) -> Self {
        Self {
            content: content.to_owned(),
        }
    }
}

/// Converts one kind of element. Returning `None` drops the element.
///
/// Implemented for every `Fn(&dyn Handlers, Element) -> Option<HandlerResult>`,
/// so plain functions and closures can be registered directly.
pub trait ElementHandler: Send + Sync {
    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult>;
}

impl<F> ElementHandler for F
where
    F: Fn(&dyn Handlers, Element) -> Option<HandlerResult> + Send + Sync,
{
    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        self(handlers, element)
    }
}

/// What a handler can ask of the conversion it runs in.
pub trait Handlers {
    /// Convert `element` with the handler registered before the current one
    /// for its tag, or with the default treatment if there is none.
    fn fallback(&self, element: Element) -> Option<HandlerResult>;

    /// Markdown of the children of `node`. `is_pre` is set inside `pre` and
    /// `code`, where text is not escaped or collapsed.
    fn walk_children(&self, node: &Rc<Node>, is_pre: bool) -> HandlerResult;

    /// `element` serialized as HTML, if its tag was registered as kept.
    fn preserve(&self, element: &Element) -> Option<HandlerResult>;

    fn options(&self) -> &Options;

    /// Verdicts memoized for the lifetime of the current conversion.
    fn memo(&self) -> &PassMemo;
}

type HandlerFn = fn(&dyn Handlers, Element) -> Option<HandlerResult>;

/// Tags with no Markdown form whose contents are still wanted.
const BLOCK_CONTAINERS: &[&str] = &[
    "address", "article", "aside", "center", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "header", "main", "nav", "p", "section", "summary",
];

const DEFAULT_HANDLERS: &[(&[&str], HandlerFn)] = &[
    (&["code", "kbd", "samp"], code::code_handler),
    (&["pre"], code::pre_handler),
    (&["strong", "b"], strong_handler),
    (&["i", "em"], em_handler),
    (&["h1", "h2", "h3", "h4", "h5", "h6"], headings::headings_handler),
    (&["br"], br::br_handler),
    (&["html", "body"], transparent_handler),
    (BLOCK_CONTAINERS, block_handler),
    (&["head", "script", "style", "template"], drop_handler),
];

/// Handlers by tag plus the tags kept as raw HTML. Immutable once a
/// converter is built, and shared by all of its conversions.
pub(crate) struct HandlerRegistry {
    handlers: Vec<Box<dyn ElementHandler>>,
    /// Handler indices per tag, in registration order.
    by_tag: AHashMap<&'static str, Vec<usize>>,
    kept: AHashSet<&'static str>,
    pub(crate) options: Options,
}

impl HandlerRegistry {
    /// A registry holding the default rule set.
    pub(crate) fn with_defaults(options: Options) -> Self {
        let mut registry = Self {
            handlers: Vec::new(),
            by_tag: AHashMap::new(),
            kept: AHashSet::new(),
            options,
        };
        for &(tags, handler) in DEFAULT_HANDLERS {
            registry.register(tags.iter().copied(), Box::new(handler));
        }
        registry
    }

    pub(crate) fn register(
        &mut self,
        tags: impl IntoIterator<Item = &'static str>,
        handler: Box<dyn ElementHandler>,
    ) {
        let index = self.handlers.len();
        self.handlers.push(handler);
        for tag in tags {
            self.by_tag.entry(tag).or_default().push(index);
        }
    }

    pub(crate) fn keep(&mut self, tags: impl IntoIterator<Item = &'static str>) {
        self.kept.extend(tags);
    }

    /// The handler for `tag` after skipping the `skipped` most recent ones.
    pub(crate) fn lookup(&self, tag: &str, skipped: usize) -> Option<&dyn ElementHandler> {
        let index = *self.by_tag.get(tag)?.iter().rev().nth(skipped)?;
        Some(self.handlers[index].as_ref())
    }

    pub(crate) fn is_kept(&self, tag: &str) -> bool {
        self.kept.contains(tag)
    }
}

fn block_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node, element.is_pre).content;
    let content = content.trim_matches('\n');
    (!content.is_empty()).then(|| concat_strings!("\n\n", content, "\n\n").into())
}

fn transparent_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    Some(handlers.walk_children(element.node, element.is_pre))
}

fn strong_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    emphasis::emphasis_handler(handlers, element, "**")
}

fn em_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    emphasis::emphasis_handler(handlers, element, "*")
}

fn drop_handler(_handlers: &dyn Handlers, _element: Element) -> Option<HandlerResult> {
    None
}
