//! Row and table rules: join rendered cells into rows, add the delimiter
//! row under the header row, and frame the finished table.

use std::rc::Rc;
use std::sync::LazyLock;

use markup5ever_rcdom::Node;
use regex::Regex;

use super::cell::{Alignment, render_cell};
use super::eligibility::{convertible_table, is_convertible};
use super::header::is_heading_row;
use super::structure::{colspan, row_cells, row_width, table_columns};
use crate::htmd::Element;
use crate::htmd::element_handler::{HandlerResult, Handlers};
use crate::htmd::node_util::get_attr;
use crate::htmd::text_util::concat_strings;

static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("NEWLINE_RUN: hardcoded regex is valid"));

/// Rule for `tr`.
pub(crate) fn row_rule(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node, element.is_pre).content;
    let Some(table) = convertible_table(handlers, element.node) else {
        return Some(content.into());
    };
    let columns = table_columns(handlers.memo(), &table);

    let mut row = concat_strings!("\n", content);
    // Short rows get blank segments so every line has the same width.
    for index in row_width(element.node)..columns {
        row.push_str(&render_cell("", 1, index));
    }

    if is_heading_row(element.node) {
        row.push('\n');
        for (index, alignment) in column_alignments(element.node, columns).into_iter().enumerate() {
            row.push_str(&render_cell(alignment.delimiter(), 1, index));
        }
    }
    Some(row.into())
}

/// Alignment of each column under a header row. A cell's `align` applies to
/// the first column it occupies; spanned and missing columns get the default.
fn column_alignments(row: &Rc<Node>, columns: usize) -> Vec<Alignment> {
    let mut alignments = vec![Alignment::Default; columns];
    let mut column = 0;
    for cell in row_cells(row) {
        if let Some(slot) = alignments.get_mut(column) {
            *slot = Alignment::from_attr(get_attr(&cell, "align").as_deref());
        }
        column += colspan(&cell);
    }
    alignments
}

/// Rule for `table`.
pub(crate) fn table_rule(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    if !is_convertible(handlers, Some(element.node)) {
        if handlers.options().keep_tables
            && let Some(html) = handlers.preserve(&element)
        {
            return Some(html);
        }
        return Some(handlers.walk_children(element.node, element.is_pre));
    }

    let content = handlers.walk_children(element.node, element.is_pre).content;
    let content = NEWLINE_RUN.replace_all(&content, "\n");
    let body = content.trim_matches('\n');

    let has_delimiter_row = body.lines().nth(1).is_some_and(|line| {
        Alignment::ALL
            .iter()
            .any(|alignment| line.starts_with(&concat_strings!("| ", alignment.delimiter())))
    });

    let columns = table_columns(handlers.memo(), element.node);
    let mut header = String::new();
    if columns > 0 && !has_delimiter_row {
        for index in 0..columns {
            header.push_str(&render_cell("", 1, index));
        }
        header.push('\n');
        for index in 0..columns {
            header.push_str(&render_cell(Alignment::Default.delimiter(), 1, index));
        }
        header.push('\n');
    }

    tracing::debug!(
        "Converted table to GFM: {} columns, header synthesized: {}",
        columns,
        !header.is_empty()
    );
    Some(concat_strings!("\n\n", header, body, "\n\n").into())
}
