//! Shared utility functions
//!
//! Small text helpers used by the config, printer and rewriter.

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Whether `s` is a valid, non-keyword Go identifier
///
/// # Examples
/// ```
/// use regshift::util::is_go_identifier;
/// assert!(is_go_identifier("LintMetadata"));
/// assert!(!is_go_identifier("lint.Lint"));
/// assert!(!is_go_identifier("func"));
/// ```
pub fn is_go_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let valid = match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    };
    valid && !GO_KEYWORDS.contains(&s)
}

/// Leading whitespace of the line containing byte offset `pos`
///
/// # Examples
/// ```
/// use regshift::util::line_indent;
/// let src = "func init() {\n\t\tlint.RegisterLint(x)\n}";
/// assert_eq!(line_indent(src, 20), "\t\t");
/// ```
pub fn line_indent(source: &str, pos: usize) -> &str {
    let pos = pos.min(source.len());
    let line_start = source[..pos].rfind('\n').map_or(0, |i| i + 1);
    let rest = &source[line_start..];
    let width = rest
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(rest.len());
    &rest[..width]
}

/// Leading whitespace of the last line of `text`
pub fn last_line_indent(text: &str) -> &str {
    line_indent(text, text.len())
}

/// Rewrite the indentation after every newline in `text` from `from` to `to`
///
/// Lines that do not start with `from` are left alone.
///
/// # Examples
/// ```
/// use regshift::util::reindent;
/// assert_eq!(reindent("a{\n\t\tb\n\t}", "\t", "\t\t"), "a{\n\t\t\tb\n\t\t}");
/// ```
pub fn reindent(text: &str, from: &str, to: &str) -> String {
    if from == to || !text.contains('\n') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            match line.strip_prefix(from) {
                Some(rest) if !line.is_empty() => {
                    out.push_str(to);
                    out.push_str(rest);
                }
                _ => out.push_str(line),
            }
        } else {
            out.push_str(line);
        }
    }
    out
}
