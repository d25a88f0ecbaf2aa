//! Splitting a source slide's lines into pages.

use super::LINES_PER_SLIDE;

/// One generated slide's worth of text, borrowed from the source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// At most [`LINES_PER_SLIDE`] lines
    pub body: &'a [String],
    /// Attribution line repeated on every page of the slide; empty when absent
    pub footer: &'a str,
}

/// Paginate the lines of one source slide.
///
/// With more than one line the last is the footer and the rest form the body.
/// A lone line is body text with no footer. No lines, no pages.
///
/// # Examples
///
/// ```rust
/// use songdeck::songs::paginate;
///
/// let lines: Vec<String> = (1..=10).map(|i| format!("line {i}")).collect();
/// let pages = paginate(&lines);
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[0].body.len(), 8);
/// assert_eq!(pages[1].body, &lines[8..9]);
/// assert!(pages.iter().all(|p| p.footer == "line 10"));
/// ```
pub fn paginate(lines: &[String]) -> Vec<Page<'_>> {
    let (body, footer) = match lines {
        [] => return Vec::new(),
        [only] => (std::slice::from_ref(only), ""),
        [body @ .., last] => (body, last.as_str()),
    };

    body.chunks(LINES_PER_SLIDE)
        .map(|chunk| Page { body: chunk, footer })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lines(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("L{i}")).collect()
    }

    #[test]
    fn test_empty() {
        assert!(paginate(&[]).is_empty());
    }

    #[test]
    fn test_single_line_has_no_footer() {
        let input = lines(1);
        let pages = paginate(&input);
        assert_eq!(pages, [Page { body: &input[..], footer: "" }]);
    }

    #[test]
    fn test_two_lines() {
        let input = lines(2);
        let pages = paginate(&input);
        assert_eq!(pages, [Page { body: &input[..1], footer: "L2" }]);
    }

    #[test]
    fn test_exact_page() {
        let input = lines(9);
        let pages = paginate(&input);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].body.len(), 8);
        assert_eq!(pages[0].footer, "L9");
    }

    #[test]
    fn test_overflow() {
        let input = lines(10);
        let pages = paginate(&input);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].body, ["L9".to_string()]);
        assert_eq!(pages[1].footer, "L10");
    }

    proptest! {
        #[test]
        fn prop_chunks_rebuild_body(input in prop::collection::vec("[a-z ]{1,12}", 0..40)) {
            let pages = paginate(&input);
            let rebuilt: Vec<String> = pages.iter().flat_map(|p| p.body.iter().cloned()).collect();

            let expected_body: &[String] = if input.len() > 1 { &input[..input.len() - 1] } else { &input };
            prop_assert_eq!(&rebuilt[..], expected_body);
        }

        #[test]
        fn prop_page_sizes(n in 0usize..60) {
            let input = lines(n);
            let pages = paginate(&input);

            let expected = match n {
                0 => 0,
                1 => 1,
                _ => (n - 1).div_ceil(LINES_PER_SLIDE),
            };
            prop_assert_eq!(pages.len(), expected);

            if let Some((last, full)) = pages.split_last() {
                prop_assert!(full.iter().all(|p| p.body.len() == LINES_PER_SLIDE));
                prop_assert!(!last.body.is_empty() && last.body.len() <= LINES_PER_SLIDE);
            }
        }

        #[test]
        fn prop_footer_is_last_line(n in 2usize..60) {
            let input = lines(n);
            let last = format!("L{n}");
            prop_assert!(paginate(&input).iter().all(|p| p.footer == last));
        }
    }
}
