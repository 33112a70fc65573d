//! Read-only views over table markup: rows, cells, spans and widths.

use std::rc::Rc;

use markup5ever_rcdom::Node;

use crate::htmd::PassMemo;
use crate::htmd::node_util::{
    element_children, element_name, find_ancestor, get_attr, get_parent_node,
};

/// Browsers clamp `colspan` to this value.
const MAX_COLSPAN: usize = 1000;

pub(super) const COLUMN_COUNT: &str = "gfm.tables.columns";
pub(super) const CELL_INDEX: &str = "gfm.tables.cell_index";

/// The closest `table` ancestor of `node`.
pub(crate) fn owning_table(node: &Rc<Node>) -> Option<Rc<Node>> {
    find_ancestor(node, "table")
}

/// The rows of a table: `tr` children of the table and of its
/// `thead`/`tbody`/`tfoot` sections, in document order.
///
/// `None` when `table` is not a `table` element.
pub(crate) fn table_rows(table: &Rc<Node>) -> Option<Vec<Rc<Node>>> {
    if element_name(table) != Some("table") {
        return None;
    }
    let mut rows = Vec::new();
    for child in element_children(table) {
        match element_name(&child) {
            Some("tr") => rows.push(child.clone()),
            Some("thead" | "tbody" | "tfoot") => rows.extend(
                element_children(&child)
                    .into_iter()
                    .filter(|row| element_name(row) == Some("tr")),
            ),
            _ => {}
        }
    }
    Some(rows)
}

/// The `td`/`th` children of a row.
pub(crate) fn row_cells(row: &Rc<Node>) -> Vec<Rc<Node>> {
    element_children(row)
        .into_iter()
        .filter(|cell| matches!(element_name(cell), Some("td" | "th")))
        .collect()
}

/// Columns a cell occupies. Missing, non-numeric and non-positive values
/// count as one column.
pub(crate) fn colspan(cell: &Rc<Node>) -> usize {
    get_attr(cell, "colspan")
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&span| span > 0)
        .map_or(1, |span| span.min(MAX_COLSPAN))
}

/// Position of a cell among the cells of its row.
///
/// The first lookup in a row records the position of every cell in it, so
/// a row is scanned once per pass.
pub(crate) fn cell_index(memo: &PassMemo, cell: &Rc<Node>) -> usize {
    memo.get_or_compute_count(CELL_INDEX, cell, || {
        let Some(row) = get_parent_node(cell) else {
            return 0;
        };
        let mut position = 0;
        for (index, sibling) in row_cells(&row).iter().enumerate() {
            memo.record_count(CELL_INDEX, sibling, index);
            if Rc::ptr_eq(sibling, cell) {
                position = index;
            }
        }
        position
    })
}

/// Columns a row spans once colspans are expanded.
pub(crate) fn row_width(row: &Rc<Node>) -> usize {
    row_cells(row).iter().map(colspan).sum()
}

/// [`column_count`], computed once per table and pass.
pub(crate) fn table_columns(memo: &PassMemo, table: &Rc<Node>) -> usize {
    memo.get_or_compute_count(COLUMN_COUNT, table, || column_count(table))
}

/// The widest row of the table, in columns. Zero for a table without rows.
pub(crate) fn column_count(table: &Rc<Node>) -> usize {
    table_rows(table)
        .unwrap_or_default()
        .iter()
        .map(row_width)
        .max()
        .unwrap_or(0)
}
