//! Decides whether a table can be written as a GFM table at all.
//!
//! Tables that cannot are left to the engine's raw-HTML preservation. The
//! check scans the whole subtree for nested tables, and every cell and row
//! of a table consults it, so the verdict is memoized per table for the
//! duration of a conversion pass.

use std::rc::Rc;

use markup5ever_rcdom::Node;

use super::structure::{owning_table, row_cells, table_rows};
use crate::htmd::element_handler::Handlers;
use crate::htmd::node_util::contains_descendant;

const CONVERTIBLE_TABLE: &str = "gfm.tables.convertible";

/// Why a table is left as HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ineligible {
    /// The node has no rows collection because it is not a `table`.
    NotATable,
    /// One row holding at most one cell.
    SingleCell,
    /// Another `table` somewhere inside.
    NestedTable,
}

/// Structural verdict for one table node, without memoization.
pub(crate) fn classify(table: &Rc<Node>) -> Result<(), Ineligible> {
    let rows = table_rows(table).ok_or(Ineligible::NotATable)?;
    if let [row] = rows.as_slice()
        && row_cells(row).len() <= 1
    {
        return Err(Ineligible::SingleCell);
    }
    if contains_descendant(table, "table") {
        return Err(Ineligible::NestedTable);
    }
    Ok(())
}

/// Memoized verdict. An absent table (an ancestor walk that found none) is
/// never convertible.
pub(crate) fn is_convertible(handlers: &dyn Handlers, table: Option<&Rc<Node>>) -> bool {
    let Some(table) = table else {
        return false;
    };
    handlers
        .memo()
        .get_or_compute(CONVERTIBLE_TABLE, table, || match classify(table) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!("Table not convertible to GFM: {:?}", reason);
                false
            }
        })
}

/// The table owning `node`, if that table is convertible.
pub(crate) fn convertible_table(handlers: &dyn Handlers, node: &Rc<Node>) -> Option<Rc<Node>> {
    let table = owning_table(node);
    if is_convertible(handlers, table.as_ref()) {
        table
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfm::tables::test_util::{find_all, parse};
    use crate::htmd::ConversionPass;
    use crate::htmd::element_handler::HandlerRegistry;
    use crate::htmd::options::Options;

    fn verdict(html: &str) -> Result<(), Ineligible> {
        let dom = parse(html);
        classify(&find_all(&dom, "table")[0])
    }

    #[test]
    fn single_cell_table_is_ineligible() {
        assert_eq!(verdict("<table><tr><td>only</td></tr></table>"), Err(Ineligible::SingleCell));
        assert_eq!(verdict("<table><tr></tr></table>"), Err(Ineligible::SingleCell));
    }

    #[test]
    fn single_row_with_two_cells_is_eligible() {
        assert_eq!(verdict("<table><tr><td>a</td><td>b</td></tr></table>"), Ok(()));
    }

    #[test]
    fn single_column_with_two_rows_is_eligible() {
        assert_eq!(verdict("<table><tr><td>a</td></tr><tr><td>b</td></tr></table>"), Ok(()));
    }

    #[test]
    fn nested_table_is_ineligible() {
        assert_eq!(
            verdict(
                "<table><tr><td><table><tr><td>a</td><td>b</td></tr></table></td>\
                 <td>c</td></tr></table>"
            ),
            Err(Ineligible::NestedTable)
        );
    }

    #[test]
    fn verdict_is_computed_once_per_pass() {
        let dom = parse("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>");
        let registry = HandlerRegistry::with_defaults(Options::default());
        let pass = ConversionPass::new(&registry);
        let cells = find_all(&dom, "td");

        for cell in &cells {
            assert!(convertible_table(&pass, cell).is_some());
        }
        assert_eq!(pass.memo().len(), 1, "one verdict for one table");
        assert!(!is_convertible(&pass, None));
    }

    #[test]
    fn non_table_node_has_no_rows() {
        let dom = parse("<table><tr><td>a</td><td>b</td></tr></table>");
        assert_eq!(classify(&find_all(&dom, "tr")[0]), Err(Ineligible::NotATable));
    }
}
