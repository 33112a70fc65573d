//! GitHub-flavored Markdown tables.
//!
//! A table becomes a pipe table when it has rows, is more than a single
//! cell, and contains no other table. Any other table is kept as raw HTML
//! (or, with [`Options::keep_tables`](crate::htmd::options::Options) turned
//! off, reduced to the Markdown of its cells).
//!
//! ```rust
//! # use kodegen_gfm::{HtmlToMarkdown, gfm};
//! let converter = HtmlToMarkdown::builder().use_plugin(gfm::tables).build();
//! let markdown = converter.convert(
//!     "<table><tr><th>A</th><th align=\"right\">B</th></tr>\
//!      <tr><td>1</td><td>2</td></tr></table>",
//! )?;
//! assert_eq!(markdown, "| A   | B   |\n| --- | --: |\n| 1   | 2   |");
//! # Ok::<(), kodegen_gfm::ConvertError>(())
//! ```

mod assembler;
mod cell;
mod eligibility;
mod header;
mod sections;
mod structure;
#[cfg(test)]
pub(crate) mod test_util;

pub use cell::{Alignment, render_cell};

use crate::htmd::HtmlToMarkdownBuilder;

/// Register the table rules. Tables are kept as raw HTML unless the rules
/// convert them.
pub fn tables(builder: HtmlToMarkdownBuilder) -> HtmlToMarkdownBuilder {
    builder
        .keep(vec!["table"])
        .add_handler(vec!["th", "td"], cell::cell_rule)
        .add_handler(vec!["tr"], assembler::row_rule)
        .add_handler(vec!["table"], assembler::table_rule)
        .add_handler(vec!["caption", "colgroup", "col"], sections::dropped_rule)
        .add_handler(vec!["thead", "tbody", "tfoot"], sections::section_rule)
}
