//! Rendering of a single pipe-delimited cell segment.

use super::eligibility::convertible_table;
use super::structure::{cell_index, colspan};
use crate::htmd::Element;
use crate::htmd::element_handler::{HandlerResult, Handlers};

/// Narrowest rendered cell content, so blank cells stay visible.
const MIN_CELL_WIDTH: usize = 3;

/// Column alignment, from a header cell's `align` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    Right,
    Center,
    #[default]
    Default,
}

impl Alignment {
    pub const ALL: [Alignment; 4] = [Self::Left, Self::Right, Self::Center, Self::Default];

    /// Case-insensitive; unknown or missing values are [`Alignment::Default`].
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("left") => Self::Left,
            Some("right") => Self::Right,
            Some("center") => Self::Center,
            _ => Self::Default,
        }
    }

    /// The delimiter-row token for this alignment.
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Left => ":--",
            Self::Right => "--:",
            Self::Center => ":-:",
            Self::Default => "---",
        }
    }
}

/// Format `content` as the segment of the cell at `index` in its row,
/// spanning `span` columns.
///
/// ```
/// # use kodegen_gfm::gfm::tables::render_cell;
/// assert_eq!(render_cell(" a|b ", 1, 0), "| a\\|b |");
/// assert_eq!(render_cell("", 2, 1), "     |     |");
/// ```
pub fn render_cell(content: &str, span: usize, index: usize) -> String {
    let mut text = content
        .trim()
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
        .replace('|', "\\|");
    let width = text.chars().count();
    if width < MIN_CELL_WIDTH {
        text.extend(std::iter::repeat_n(' ', MIN_CELL_WIDTH - width));
    }
    for _ in 1..span {
        text.push_str(" |    ");
    }
    let prefix = if index == 0 { "| " } else { " " };
    let mut segment = String::with_capacity(prefix.len() + text.len() + 2);
    segment.push_str(prefix);
    segment.push_str(&text);
    segment.push_str(" |");
    segment
}

/// Rule for `th` and `td`.
pub(crate) fn cell_rule(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node, element.is_pre).content;
    if convertible_table(handlers, element.node).is_none() {
        return Some(content.into());
    }
    let segment = render_cell(
        &content,
        colspan(element.node),
        cell_index(handlers.memo(), element.node),
    );
    Some(segment.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_content() {
        assert_eq!(render_cell("", 1, 0), "|     |");
        assert_eq!(render_cell("ab", 1, 1), " ab  |");
        assert_eq!(render_cell("abcd", 1, 1), " abcd |");
    }

    #[test]
    fn newlines_become_line_breaks() {
        assert_eq!(render_cell("\n one\r\ntwo\nthree \n", 1, 1), " one<br>two<br>three |");
    }

    #[test]
    fn colspan_adds_blank_segments() {
        assert_eq!(render_cell("a", 3, 0), "| a   |     |     |");
        assert_eq!(render_cell("a", 3, 0).matches('|').count(), 4);
    }

    #[test]
    fn pipes_are_escaped_once() {
        assert_eq!(render_cell("a | b", 1, 0), "| a \\| b |");
    }

    #[test]
    fn alignment_tokens() {
        let tokens: Vec<&str> = Alignment::ALL.iter().map(|a| a.delimiter()).collect();
        assert_eq!(tokens, vec![":--", "--:", ":-:", "---"]);
        assert_eq!(Alignment::from_attr(Some("RIGHT")), Alignment::Right);
        assert_eq!(Alignment::from_attr(Some("justify")), Alignment::Default);
        assert_eq!(Alignment::from_attr(None), Alignment::Default);
    }
}
