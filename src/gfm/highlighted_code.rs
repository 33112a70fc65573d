//! Syntax-highlighted code blocks as rendered by GitHub: a `div` whose class
//! names the language (`highlight-source-rust`, `highlight-text-md`) wrapping
//! a `pre`.

use std::sync::LazyLock;

use regex::Regex;

use crate::htmd::element_handler::{HandlerResult, Handlers};
use crate::htmd::node_util::{element_name, get_attr, significant_children, text_content};
use crate::htmd::text_util::concat_strings;
use crate::htmd::{Element, HtmlToMarkdownBuilder};

static HIGHLIGHT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"highlight-(?:text|source)-([a-z0-9]+)")
        .expect("HIGHLIGHT_CLASS: hardcoded regex is valid")
});

/// Register the highlighted code block rule on `div`.
pub fn highlighted_code_block(builder: HtmlToMarkdownBuilder) -> HtmlToMarkdownBuilder {
    builder.add_handler(vec!["div"], highlighted_code_handler)
}

fn highlighted_code_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let language = get_attr(element.node, "class").and_then(|class| {
        HIGHLIGHT_CLASS
            .captures(&class)
            .and_then(|captures| captures.get(1))
            .map(|language| language.as_str().to_string())
    });
    let pre = significant_children(element.node)
        .into_iter()
        .next()
        .filter(|child| element_name(child) == Some("pre"));

    let (Some(language), Some(pre)) = (language, pre) else {
        return handlers.fallback(element);
    };
    let fence = &handlers.options().fence;
    let code = text_content(&pre);
    Some(concat_strings!("\n\n", fence, language, "\n", code, "\n", fence, "\n\n").into())
}
