//! Header-row detection.
//!
//! GFM needs exactly one header row followed by the delimiter row. A row in
//! `thead` is always a header row. Otherwise only the first row of the
//! table (or of its first `tbody`) can be one, and only when every cell
//! looks like a header cell.

use std::rc::Rc;

use markup5ever_rcdom::Node;

use super::structure::row_cells;
use crate::htmd::node_util::{
    element_name, first_element_child, get_attr, get_parent_node, previous_element_sibling,
    significant_children, text_content,
};

/// How a cell presents itself when deciding on a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellShape {
    /// A `th`.
    HeadingTag,
    /// A `td` with no text once trimmed.
    Blank,
    /// A `td` holding a single `div` that holds a single bold element.
    BoldText,
    /// Anything else.
    Plain,
}

impl CellShape {
    pub(crate) fn of(cell: &Rc<Node>) -> Self {
        match element_name(cell) {
            Some("th") => Self::HeadingTag,
            Some("td") if text_content(cell).trim().is_empty() => Self::Blank,
            Some("td") if is_bold_shape(cell) => Self::BoldText,
            _ => Self::Plain,
        }
    }

    pub(crate) fn is_header_like(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

pub(crate) fn is_heading_row(row: &Rc<Node>) -> bool {
    let Some(parent) = get_parent_node(row) else {
        return false;
    };
    match element_name(&parent) {
        Some("thead") => return true,
        Some("table") => {}
        Some("tbody") if is_first_tbody(&parent) => {}
        _ => return false,
    }
    let is_first_row = first_element_child(&parent).is_some_and(|first| Rc::ptr_eq(&first, row));
    is_first_row
        && row_cells(row)
            .iter()
            .all(|cell| CellShape::of(cell).is_header_like())
}

/// A `tbody` with no element before it, or only a blank `thead`/`colgroup`.
pub(crate) fn is_first_tbody(section: &Rc<Node>) -> bool {
    if element_name(section) != Some("tbody") {
        return false;
    }
    match previous_element_sibling(section) {
        None => true,
        Some(previous) => {
            matches!(element_name(&previous), Some("thead" | "colgroup"))
                && text_content(&previous).trim().is_empty()
        }
    }
}

/// `td > div > b`, or `td > div > span` with a bold inline `font-weight`.
fn is_bold_shape(cell: &Rc<Node>) -> bool {
    let children = significant_children(cell);
    let [container] = children.as_slice() else {
        return false;
    };
    if element_name(container) != Some("div") {
        return false;
    }
    let grandchildren = significant_children(container);
    let [inner] = grandchildren.as_slice() else {
        return false;
    };
    match element_name(inner) {
        Some("b") => true,
        Some("span") => get_attr(inner, "style").is_some_and(|style| declares_bold(&style)),
        _ => false,
    }
}

/// Whether the last `font-weight` declaration of an inline style is bold:
/// a keyword containing `bold`, or a numeric weight of at least 600.
fn declares_bold(style: &str) -> bool {
    let weight = style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .filter(|(property, _)| property.trim().eq_ignore_ascii_case("font-weight"))
        .map(|(_, value)| value.trim())
        .last();
    let Some(weight) = weight else {
        return false;
    };
    let weight = weight
        .strip_suffix("!important")
        .unwrap_or(weight)
        .trim()
        .to_ascii_lowercase();
    weight.contains("bold") || weight.parse::<u16>().is_ok_and(|numeric| numeric >= 600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfm::tables::test_util::{find_all, parse};

    fn first_row_is_heading(html: &str) -> bool {
        let dom = parse(html);
        is_heading_row(&find_all(&dom, "tr")[0])
    }

    #[test]
    fn th_row_is_heading() {
        assert!(first_row_is_heading(
            "<table><tr><th>a</th><th>b</th></tr><tr><td>1</td><td>2</td></tr></table>"
        ));
    }

    #[test]
    fn plain_first_row_is_not_heading() {
        assert!(!first_row_is_heading(
            "<table><tr><td>a</td><th>b</th></tr><tr><td>1</td><td>2</td></tr></table>"
        ));
    }

    #[test]
    fn every_thead_row_is_heading() {
        let dom = parse("<table><thead><tr><td>a</td></tr></thead><tr><td>1</td></tr></table>");
        let rows = find_all(&dom, "tr");
        assert!(is_heading_row(&rows[0]));
        assert!(!is_heading_row(&rows[1]));
    }

    #[test]
    fn second_th_row_is_data() {
        let dom = parse("<table><tr><th>a</th></tr><tr><th>b</th></tr></table>");
        let rows = find_all(&dom, "tr");
        assert!(is_heading_row(&rows[0]));
        assert!(!is_heading_row(&rows[1]));
    }

    #[test]
    fn tbody_after_blank_thead_is_first() {
        let dom = parse(
            "<table><thead> </thead><tbody><tr><th>a</th></tr></tbody>\
             <tbody><tr><th>b</th></tr></tbody></table>",
        );
        let bodies = find_all(&dom, "tbody");
        assert!(is_first_tbody(&bodies[0]));
        assert!(!is_first_tbody(&bodies[1]));
        assert!(is_heading_row(&find_all(&dom, "tr")[0]));
    }

    #[test]
    fn tbody_after_thead_with_text_is_not_first() {
        let dom = parse(
            "<table><thead><tr><td>x</td></tr></thead><tbody><tr><th>a</th></tr></tbody></table>",
        );
        assert!(!is_first_tbody(&find_all(&dom, "tbody")[0]));
    }

    #[test]
    fn bold_and_blank_cells_are_header_like() {
        let dom = parse(
            "<table><tr>\
             <td><div><b>a</b></div></td>\
             <td>\n  <div> <span style=\"font-weight: bold\">b</span> </div>\n</td>\
             <td><div><span style=\"color: red; font-weight: 700\">c</span></div></td>\
             <td>   </td>\
             <td><div><span style=\"font-weight: normal\">d</span></div></td>\
             <td><div><div><b>e</b></div></div></td>\
             </tr></table>",
        );
        let shapes: Vec<CellShape> = find_all(&dom, "td").iter().map(CellShape::of).collect();
        assert_eq!(
            shapes,
            vec![
                CellShape::BoldText,
                CellShape::BoldText,
                CellShape::BoldText,
                CellShape::Blank,
                CellShape::Plain,
                CellShape::Plain,
            ]
        );
    }

    #[test]
    fn last_font_weight_declaration_wins() {
        assert!(declares_bold("font-weight: bolder"));
        assert!(declares_bold("FONT-WEIGHT: 600 !important"));
        assert!(!declares_bold("font-weight: bold; font-weight: 400"));
        assert!(!declares_bold("color: bold"));
        assert!(!declares_bold(""));
    }
}
