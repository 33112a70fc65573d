use std::borrow::Cow;

/// Concatenate string-like values into a single `String`, evaluating each
/// argument once.
macro_rules! concat_strings {
    ($($part:expr),+ $(,)?) => {{
        let mut out = String::new();
        $(out.push_str(&$part);)+
        out
    }};
}

pub(crate) use concat_strings;

/// Collapse every run of document whitespace (space, tab, CR, LF) into a
/// single space. Borrows when nothing needs collapsing.
pub(crate) fn compress_whitespace(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let needs_work = bytes.iter().enumerate().any(|(i, &b)| match b {
        b'\t' | b'\n' | b'\r' => true,
        b' ' => bytes.get(i + 1).is_some_and(|n| matches!(n, b' ' | b'\t' | b'\n' | b'\r')),
        _ => false,
    });
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    Cow::Owned(out)
}

/// `#` through `######` followed by a space or the end of the text.
pub(crate) fn is_markdown_atx_heading(text: &str) -> bool {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    (1..=6).contains(&hashes) && matches!(text.as_bytes().get(hashes), None | Some(b' '))
}

/// Byte index of the dot in an ordered-list marker such as `12. `.
pub(crate) fn index_of_markdown_ordered_item_dot(text: &str) -> Option<usize> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let bytes = text.as_bytes();
    (bytes.get(digits) == Some(&b'.') && matches!(bytes.get(digits + 1), None | Some(b' ')))
        .then_some(digits)
}

pub(crate) trait TrimDocumentWhitespace {
    fn trim_document_whitespace(&self) -> &str;
}

impl TrimDocumentWhitespace for str {
    fn trim_document_whitespace(&self) -> &str {
        self.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_whitespace_collapses_runs() {
        assert_eq!(compress_whitespace("a \n\t b"), "a b");
        assert!(matches!(compress_whitespace("a b"), Cow::Borrowed(_)));
    }

    #[test]
    fn detects_ordered_item_dot() {
        assert_eq!(index_of_markdown_ordered_item_dot("12. x"), Some(2));
        assert_eq!(index_of_markdown_ordered_item_dot("12.5"), None);
        assert_eq!(index_of_markdown_ordered_item_dot("2"), None);
    }

    #[test]
    fn detects_atx_heading() {
        assert!(is_markdown_atx_heading("## Title"));
        assert!(!is_markdown_atx_heading("#hashtag"));
        assert!(!is_markdown_atx_heading("####### seven"));
    }

    #[test]
    fn concat_strings_joins_mixed_parts() {
        let owned = String::from("b");
        assert_eq!(concat_strings!("a", owned, "c"), "abc");
    }
}
