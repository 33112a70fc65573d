use kodegen_gfm::convert;
use proptest::prelude::*;

/// One cell: header or data tag, colspan, text.
fn cell() -> impl Strategy<Value = (bool, usize, String)> {
    (any::<bool>(), 1usize..4, "[a-z0-9]{0,6}")
}

fn grid() -> impl Strategy<Value = Vec<Vec<(bool, usize, String)>>> {
    prop::collection::vec(prop::collection::vec(cell(), 0..5), 1..6)
}

fn to_html(rows: &[Vec<(bool, usize, String)>]) -> String {
    let mut html = String::from("<table>");
    for row in rows {
        html.push_str("<tr>");
        for (is_header, span, text) in row {
            let tag = if *is_header { "th" } else { "td" };
            html.push_str(&format!("<{tag} colspan=\"{span}\">{text}</{tag}>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

fn assert_uniform_width(markdown: &str, columns: usize) -> Result<(), TestCaseError> {
    for line in markdown.lines() {
        prop_assert_eq!(
            line.matches('|').count(),
            columns + 1,
            "Line {:?} should have {} columns in:\n{}",
            line,
            columns,
            markdown
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Header, delimiter and data rows all span the widest row.
    #[test]
    fn converted_tables_have_uniform_column_count(rows in grid()) {
        let markdown = convert(&to_html(&rows)).unwrap();
        prop_assume!(!markdown.starts_with("<table>"));

        let columns = rows
            .iter()
            .map(|row| row.iter().map(|(_, span, _)| span).sum::<usize>())
            .max()
            .unwrap_or(0);
        assert_uniform_width(&markdown, columns)?;
        if columns > 0 {
            prop_assert!(markdown.lines().count() >= 2, "Missing delimiter row:\n{}", markdown);
        }
    }

    /// Only degenerate tables are left as HTML.
    #[test]
    fn only_single_cell_tables_stay_html(rows in grid()) {
        let markdown = convert(&to_html(&rows)).unwrap();
        let single_cell = rows.len() == 1 && rows[0].len() <= 1;
        prop_assert_eq!(markdown.starts_with("<table>"), single_cell, "Got:\n{}", markdown);
    }
}
