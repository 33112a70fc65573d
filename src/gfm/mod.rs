//! GitHub-flavored Markdown rules, installed as plugins on
//! [`HtmlToMarkdownBuilder`].

mod highlighted_code;
pub mod tables;

pub use highlighted_code::highlighted_code_block;
pub use tables::tables;

use crate::htmd::HtmlToMarkdownBuilder;

/// Every GFM rule: [`tables`] and [`highlighted_code_block`].
pub fn gfm(builder: HtmlToMarkdownBuilder) -> HtmlToMarkdownBuilder {
    builder.use_plugin(tables).use_plugin(highlighted_code_block)
}
