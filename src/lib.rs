//! HTML to Markdown conversion with GitHub-flavored Markdown tables.
//!
//! [`convert`] runs the default rules plus every GFM rule. Build an
//! [`HtmlToMarkdown`] directly to pick plugins, register extra handlers, or
//! change [`Options`].

pub mod error;
pub mod gfm;
pub mod htmd;

pub use error::{ConvertError, ConvertResult};
pub use gfm::tables::Alignment;
pub use htmd::options::{BrStyle, Options, OptionsBuilder};
pub use htmd::{HtmlToMarkdown, HtmlToMarkdownBuilder};

/// Convert `html` to Markdown with default options and all GFM rules.
///
/// # Errors
///
/// Returns [`ConvertError::Parse`] if the input cannot be parsed.
pub fn convert(html: &str) -> ConvertResult<String> {
    convert_with_options(html, Options::default())
}

/// Convert `html` to Markdown with `options` and all GFM rules.
///
/// # Errors
///
/// Returns [`ConvertError::Parse`] if the input cannot be parsed.
pub fn convert_with_options(html: &str, options: Options) -> ConvertResult<String> {
    HtmlToMarkdown::builder()
        .options(options)
        .use_plugin(gfm::gfm)
        .build()
        .convert(html)
}
