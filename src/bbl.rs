//! Rewriting of formatted bibliographies (.bbl files).
//!
//! BibTeX styles write English phrases into the `.bbl` file ("pages", "In",
//! "PhD thesis", ...). [`BblRewriter`] replaces a fixed set of them with their
//! Polish counterparts, joins each author block onto one line with a
//! configurable conjunction between the last authors, and re-flows the file so
//! that every `\bibitem` and `\newblock` starts its own line.
//!
//! # Example
//!
//! ```
//! use bibsort::BblRewriter;
//!
//! let input = "\\bibitem{knuth84}\nKnuth, D. E. and Levy, S.\n\\newblock In {\\em Proc.}, pages 1--2.\n";
//!
//! let output = BblRewriter::new().rewrite(input);
//! assert_eq!(
//!     output,
//!     "\n\\bibitem{knuth84}\nKnuth, D. E. oraz Levy, S.\n\\newblock W {\\em Proc.}, strony 1--2."
//! );
//! ```

use crate::regex::Regex;
use std::sync::LazyLock;

/// Conjunction used between authors unless configured otherwise.
pub const DEFAULT_CONJUNCTION: &str = " oraz ";

const BIBITEM: &str = "\\bibitem";
const NEWBLOCK: &str = "\\newblock";

/// Line-local phrase substitutions, applied in order.
static TRANSLATIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(.*)(pages )([0-9]+--[0-9]+)(.*)", "${1}strony ${3}${4}"),
        (r"(.*)(volume[~ ])([0-9]+ )of (.*)", "${1}tom~${3}${4}"),
        (r"(.*), volume~([0-9]+),(.*)", "${1}, tom~${2},${3}"),
        (r"(.*), No. ([0-9]+[.]?)$", "${1}, numer ${2}"),
        (r"(.*), Vol. ([0-9]+)(.*)", "${1}, tom ${2}${3}"),
        (r"^(.newblock) In (.*)", "${1} W ${2}"),
        (r"^(.newblock) (PhD thesis)(.*)", "${1} Praca doktorska${3}"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Rewriter for .bbl files.
#[derive(Debug, Clone)]
pub struct BblRewriter {
    conjunction: String,
}

impl Default for BblRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BblRewriter {
    /// Creates a rewriter joining authors with [`DEFAULT_CONJUNCTION`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            conjunction: DEFAULT_CONJUNCTION.to_string(),
        }
    }

    /// Sets the text that replaces ` and ` / `, and ` in author blocks,
    /// e.g. `", "` to get a plain comma-separated list.
    #[must_use]
    pub fn with_conjunction(mut self, conjunction: &str) -> Self {
        self.conjunction = conjunction.to_string();
        self
    }

    /// Applies the phrase substitutions to one line, keeping its line break.
    pub fn translate_line(&self, line: &str) -> String {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };

        let mut body = body.to_string();
        for (pattern, replacement) in TRANSLATIONS.iter() {
            let changed = pattern.replace_all(&body, *replacement);
            if changed != body {
                log::warn!("Changing: {} -> {}", body.trim(), changed.trim());
                body = changed.into_owned();
            }
        }
        body + newline
    }

    /// Collapses an author block onto one line and replaces its conjunctions.
    fn join_authors(&self, block: &str) -> String {
        block
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(", and ", &self.conjunction)
            .replace(" and ", &self.conjunction)
    }

    /// Rewrites a whole .bbl document.
    pub fn rewrite(&self, input: &str) -> String {
        let mut pieces: Vec<String> = Vec::new();
        // author lines between a \bibitem and its first \newblock
        let mut authors: Option<String> = None;

        for raw in input.split_inclusive('\n') {
            let line = self.translate_line(raw);

            if line.starts_with(BIBITEM) {
                authors = Some(String::new());
                pieces.push(line);
                continue;
            }

            if line.starts_with(NEWBLOCK) {
                if let Some(block) = authors.take() {
                    pieces.push(self.join_authors(&block) + "\n");
                }
            }

            match authors.as_mut() {
                Some(block) => {
                    block.push_str(line.trim());
                    block.push(' ');
                }
                None => pieces.push(line.trim().to_string()),
            }
        }

        if let Some(block) = authors {
            pieces.push(self.join_authors(&block));
        }

        reflow(&pieces.join(" "))
    }
}

/// Collapses runs of spaces and puts every `\bibitem` (after an empty line)
/// and `\newblock` at the start of a line.
fn reflow(text: &str) -> String {
    let mut text = text.to_string();
    while text.contains("  ") {
        text = text.replace("  ", " ");
    }
    text.replace(" \\newblock ", "\n\\newblock ")
        .replace(" \\bibitem", "\n\\bibitem")
        .replace("\n ", "\n")
        .replace("\n\n", "\n")
        .replace(BIBITEM, "\n\\bibitem")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(
        "\\newblock In {\\em Proc.}, pages 1--2.",
        "\\newblock W {\\em Proc.}, strony 1--2."
    )]
    #[case(
        "\\newblock {\\em Ann. Math.}, volume~3, 2001.",
        "\\newblock {\\em Ann. Math.}, tom~3, 2001."
    )]
    #[case(
        "\\newblock volume 2 of {\\em Lecture Notes}.",
        "\\newblock tom~2 {\\em Lecture Notes}."
    )]
    #[case("\\newblock Ann. Math., No. 5.", "\\newblock Ann. Math., numer 5.")]
    #[case(
        "\\newblock J. Algebra, Vol. 12 (1990).",
        "\\newblock J. Algebra, tom 12 (1990)."
    )]
    #[case(
        "\\newblock PhD thesis, Uniwersytet Warszawski, 2001.",
        "\\newblock Praca doktorska, Uniwersytet Warszawski, 2001."
    )]
    #[case("\\newblock Springer, 1998.", "\\newblock Springer, 1998.")]
    #[case("Interesting pages.", "Interesting pages.")]
    fn test_translate_line(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(BblRewriter::new().translate_line(line), expected);
    }

    #[test]
    fn test_translate_line_keeps_newline() {
        assert_eq!(
            BblRewriter::new().translate_line("\\newblock Ann. Math., No. 5.\n"),
            "\\newblock Ann. Math., numer 5.\n"
        );
    }

    #[test]
    fn test_rewrite_document() {
        let input = r"\begin{thebibliography}{1}

\bibitem{a}
Smith, J. and
  Doe, A.
\newblock Title.
\newblock In Proc., pages 1--2, 2020.

\end{thebibliography}
";
        let expected = r"\begin{thebibliography}{1}

\bibitem{a}
Smith, J. oraz Doe, A.
\newblock Title.
\newblock W Proc., strony 1--2, 2020. \end{thebibliography}";

        let rewriter = BblRewriter::new();
        let once = rewriter.rewrite(input);
        assert_eq!(once, expected);
        assert_eq!(rewriter.rewrite(&once), expected);
    }

    #[test]
    fn test_rewrite_with_comma_conjunction() {
        let input = "\\bibitem{x}\nSmith, J., Doe, A., and Roe, B.\n\\newblock Title.\n";
        let output = BblRewriter::new().with_conjunction(", ").rewrite(input);
        assert_eq!(
            output,
            "\n\\bibitem{x}\nSmith, J., Doe, A., Roe, B.\n\\newblock Title."
        );
    }

    #[test]
    fn test_rewrite_flushes_trailing_author_block() {
        let output = BblRewriter::new().rewrite("\\bibitem{x}\nSmith, J. and Doe, A.\n");
        assert_eq!(output, "\n\\bibitem{x}\nSmith, J. oraz Doe, A.");
    }
}
