//! Rule-based HTML to Markdown engine.
//!
//! Each element is converted by the most recently registered handler for its
//! tag. Handlers compose the Markdown of their children through
//! [`Handlers::walk_children`], may defer to the handler registered before
//! them through [`Handlers::fallback`], and can emit an element as raw HTML
//! through [`Handlers::preserve`] when its tag was registered with
//! [`HtmlToMarkdownBuilder::keep`].
//!
//! ```rust
//! # use kodegen_gfm::htmd::HtmlToMarkdown;
//! let converter = HtmlToMarkdown::builder().build();
//! let markdown = converter.convert("<p>Hello <em>world</em></p>")?;
//! assert_eq!(markdown, "Hello *world*");
//! # Ok::<(), kodegen_gfm::ConvertError>(())
//! ```

pub(crate) mod dom_walker;
pub mod element_handler;
pub(crate) mod node_util;
pub mod options;
mod pass;
pub(crate) mod text_util;

use std::rc::Rc;

use html5ever::tendril::TendrilSink;
use html5ever::{Attribute, ParseOpts, parse_document};
use log::warn;
use markup5ever_rcdom::{Node, RcDom};

use crate::error::{ConvertError, ConvertResult};
use element_handler::{
    ElementHandler, HandlerRegistry, HandlerResult, Handlers, element_util::serialize_element,
};
use node_util::get_node_tag_name;
use options::Options;

pub use pass::PassMemo;

/// An element being converted, as seen by an [`ElementHandler`].
pub struct Element<'a> {
    pub node: &'a Rc<Node>,
    pub tag: &'a str,
    pub attrs: &'a [Attribute],
    /// How many handlers for this tag were skipped through `fallback`.
    pub skipped_handlers: usize,
    /// Whether the element sits inside `<pre>` or `<code>`.
    pub is_pre: bool,
}

/// Converts HTML documents to Markdown with a fixed set of handlers.
///
/// The handler registry is immutable once built. Each call to
/// [`convert`](Self::convert) runs its own [`ConversionPass`].
pub struct HtmlToMarkdown {
    pub(crate) registry: HandlerRegistry,
}

impl Default for HtmlToMarkdown {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl HtmlToMarkdown {
    #[must_use]
    pub fn builder() -> HtmlToMarkdownBuilder {
        HtmlToMarkdownBuilder::default()
    }

    pub fn options(&self) -> &Options {
        &self.registry.options
    }

    /// Convert an HTML document or fragment to Markdown.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Parse`] if the input cannot be read by the
    /// HTML parser.
    pub fn convert(&self, html: &str) -> ConvertResult<String> {
        let dom = parse_html(html)?;
        let pass = ConversionPass::new(&self.registry);
        Ok(pass.run(&dom.document))
    }
}

/// Builder for [`HtmlToMarkdown`].
#[derive(Default)]
pub struct HtmlToMarkdownBuilder {
    options: Options,
    handlers: Vec<(Vec<&'static str>, Box<dyn ElementHandler>)>,
    kept_tags: Vec<&'static str>,
}

impl HtmlToMarkdownBuilder {
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Register a handler for `tags`. It takes priority over every handler
    /// registered before it for the same tags.
    #[must_use]
    pub fn add_handler<Handler>(mut self, tags: Vec<&'static str>, handler: Handler) -> Self
    where
        Handler: ElementHandler + 'static,
    {
        self.handlers.push((tags, Box::new(handler)));
        self
    }

    /// Mark `tags` to be emitted as raw HTML when no handler converts them,
    /// and make [`Handlers::preserve`] available to their handlers.
    #[must_use]
    pub fn keep(mut self, tags: Vec<&'static str>) -> Self {
        self.kept_tags.extend(tags);
        self
    }

    /// Apply a plugin, a function that registers handlers on the builder.
    #[must_use]
    pub fn use_plugin(self, plugin: impl FnOnce(Self) -> Self) -> Self {
        plugin(self)
    }

    pub fn build(self) -> HtmlToMarkdown {
        let mut registry = HandlerRegistry::with_defaults(self.options);
        for (tags, handler) in self.handlers {
            registry.register(tags, handler);
        }
        registry.keep(self.kept_tags);
        HtmlToMarkdown { registry }
    }
}

/// State of one conversion: the shared handler registry plus the memo that
/// lives exactly as long as this pass.
pub struct ConversionPass<'a> {
    registry: &'a HandlerRegistry,
    memo: PassMemo,
}

impl<'a> ConversionPass<'a> {
    pub(crate) fn new(registry: &'a HandlerRegistry) -> Self {
        Self {
            registry,
            memo: PassMemo::default(),
        }
    }

    fn run(&self, document: &Rc<Node>) -> String {
        let mut buffer = String::new();
        dom_walker::walk_node(document, &mut buffer, self, None, true, false);
        buffer.trim_start_matches('\n').to_string()
    }

    pub(crate) fn handle(
        &self,
        node: &Rc<Node>,
        tag: &str,
        attrs: &[Attribute],
        skipped_handlers: usize,
        is_pre: bool,
    ) -> Option<HandlerResult> {
        let element = Element {
            node,
            tag,
            attrs,
            skipped_handlers,
            is_pre,
        };
        match self.registry.lookup(tag, skipped_handlers) {
            Some(handler) => handler.handle(self, element),
            None => self
                .preserve(&element)
                .or_else(|| Some(self.walk_children(node, is_pre))),
        }
    }
}

impl Handlers for ConversionPass<'_> {
    fn fallback(&self, element: Element) -> Option<HandlerResult> {
        self.handle(
            element.node,
            element.tag,
            element.attrs,
            element.skipped_handlers + 1,
            element.is_pre,
        )
    }

    fn walk_children(&self, node: &Rc<Node>, is_pre: bool) -> HandlerResult {
        let mut buffer = String::new();
        let tag = get_node_tag_name(node);
        let is_block = tag.is_some_and(dom_walker::is_block_element);

        // Children inherit `is_pre`, and `pre`/`code` start it.
        let is_pre_for_children = is_pre || tag.is_some_and(|t| t == "pre" || t == "code");

        dom_walker::walk_children(node, &mut buffer, self, is_block, is_pre_for_children);
        HandlerResult { content: buffer }
    }

    fn preserve(&self, element: &Element) -> Option<HandlerResult> {
        if !self.registry.is_kept(element.tag) {
            return None;
        }
        match serialize_element(element) {
            Ok(html) => Some(html.into()),
            Err(err) => {
                warn!("Keeping <{}> failed, converting it instead: {}", element.tag, err);
                None
            }
        }
    }

    fn options(&self) -> &Options {
        &self.registry.options
    }

    fn memo(&self) -> &PassMemo {
        &self.memo
    }
}

/// Parse an HTML document (or fragment, which gets the implied
/// `html`/`head`/`body` structure).
pub(crate) fn parse_html(html: &str) -> ConvertResult<RcDom> {
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(ConvertError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        let content = handlers.walk_children(element.node, element.is_pre).content;
        Some(content.to_uppercase().into())
    }

    fn polite(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        if element.attrs.is_empty() {
            return handlers.fallback(element);
        }
        Some("(hidden)".into())
    }

    #[test]
    fn later_handler_wins_and_can_fall_back() {
        let converter = HtmlToMarkdown::builder()
            .add_handler(vec!["span"], shout)
            .add_handler(vec!["span"], polite)
            .build();

        assert_eq!(converter.convert("<p><span>hi</span></p>").unwrap(), "HI");
        assert_eq!(
            converter.convert("<p><span class=\"x\">hi</span></p>").unwrap(),
            "(hidden)"
        );
    }

    #[test]
    fn kept_tag_without_handler_is_serialized() {
        let converter = HtmlToMarkdown::builder().keep(vec!["video"]).build();
        let markdown = converter
            .convert("<p>a <video src=\"x.mp4\"></video></p>")
            .unwrap();
        assert!(markdown.contains("<video src=\"x.mp4\"></video>"), "got {markdown:?}");
    }

    #[test]
    fn default_rules_cover_common_elements() {
        let converter = HtmlToMarkdown::default();
        let markdown = converter
            .convert("<h2>Title</h2><p>Some <strong>bold</strong> and <code>code</code>.</p>")
            .unwrap();
        assert_eq!(markdown, "## Title\n\nSome **bold** and `code`.");
    }

    #[test]
    fn pre_uses_configured_fence() {
        let options = Options::builder().fence("~~~").build().unwrap();
        let converter = HtmlToMarkdown::builder().options(options).build();
        let markdown = converter
            .convert("<pre class=\"language-rust\">fn main() {}\n</pre>")
            .unwrap();
        assert_eq!(markdown, "~~~rust\nfn main() {}\n~~~");
    }
}
