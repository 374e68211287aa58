//! The line-oriented text encoding.
//!
//! ```text
//! [App]
//! window=
//! window/width=800
//! window/height=600
//!
//! [Recent]
//! # full-line comment
//! file=notes.txt
//! ```
//!
//! Reading trims spaces and tabs, skips blank and `#` lines, opens (or
//! re-enters) a section on `[name]`, and splits every other line at its first
//! `=` into a `/`-delimited key and a raw value. Writing emits each section
//! header, then every descendant as `accumulated/path=value`, then a blank line.

use std::io::{self, BufRead, Write};

use crate::node::{descend_or_create, position_or_insert, Node};

/// Counts of what a parse touched, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ReadSummary {
    pub sections: usize,
    pub keys: usize,
}

fn trim(line: &str) -> &str {
    line.trim_matches(|c| c == ' ' || c == '\t')
}

fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Applies lines one at a time, remembering the current section.
pub(crate) struct Parser<'a> {
    roots: &'a mut Vec<Node>,
    section: Option<usize>,
    summary: ReadSummary,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(roots: &'a mut Vec<Node>) -> Self {
        Self {
            roots,
            section: None,
            summary: ReadSummary::default(),
        }
    }

    pub(crate) fn line(&mut self, line: &str) {
        let line = trim(line);
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if let Some(name) = section_name(line) {
            self.section = Some(position_or_insert(self.roots, name));
            self.summary.sections += 1;
            return;
        }

        // Keys before the first header have nowhere to go.
        let Some(index) = self.section else {
            return;
        };
        let Some((key, value)) = line.split_once('=') else {
            return;
        };

        let segments: Vec<&str> = key.split('/').collect();
        if let Some(node) = descend_or_create(self.roots[index].children_mut(), &segments) {
            node.set_value(value);
            self.summary.keys += 1;
        }
    }

    pub(crate) fn finish(self) -> ReadSummary {
        self.summary
    }
}

/// Parse lines from `reader` into `roots`.
pub(crate) fn read_into<R: BufRead>(reader: R, roots: &mut Vec<Node>) -> io::Result<ReadSummary> {
    let mut parser = Parser::new(roots);
    for line in reader.lines() {
        parser.line(&line?);
    }
    Ok(parser.finish())
}

/// Parse in-memory text into `roots`.
pub(crate) fn read_str(text: &str, roots: &mut Vec<Node>) -> ReadSummary {
    let mut parser = Parser::new(roots);
    for line in text.lines() {
        parser.line(line);
    }
    parser.finish()
}

/// Serialize `roots` to `out`.
pub(crate) fn write_tree<W: Write>(out: &mut W, roots: &[Node]) -> io::Result<()> {
    for root in roots {
        writeln!(out, "[{}]", root.key())?;
        for child in root.children() {
            write_node(out, child, "")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_node<W: Write>(out: &mut W, node: &Node, parent: &str) -> io::Result<()> {
    let path = format!("{}{}", parent, node.key());

    // Parents get a line too, empty after `=` unless they carry a value.
    writeln!(out, "{}={}", path, node.value().unwrap_or_default())?;

    let prefix = format!("{}/", path);
    for child in node.children() {
        write_node(out, child, &prefix)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::descend;

    fn parse(text: &str) -> (Vec<Node>, ReadSummary) {
        let mut roots = Vec::new();
        let summary = read_into(text.as_bytes(), &mut roots).unwrap();
        (roots, summary)
    }

    fn value<'a>(roots: &'a [Node], path: &[&str]) -> Option<&'a str> {
        descend(roots, path).and_then(Node::value)
    }

    fn render(roots: &[Node]) -> String {
        let mut out = Vec::new();
        write_tree(&mut out, roots).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn trim_only_spaces_and_tabs() {
        assert_eq!(trim(" \t key=v \t"), "key=v");
        assert_eq!(trim("\u{a0}key=v"), "\u{a0}key=v");
        assert_eq!(trim("   "), "");
    }

    #[test]
    fn section_name_requires_both_brackets() {
        assert_eq!(section_name("[App]"), Some("App"));
        assert_eq!(section_name("[]"), Some(""));
        assert_eq!(section_name("["), None);
        assert_eq!(section_name("[App"), None);
        assert_eq!(section_name("App]"), None);
    }

    #[test]
    fn parses_nested_keys() {
        let (roots, summary) = parse("[App]\nwindow/width=800\nwindow/height=600\n");

        assert_eq!(summary, ReadSummary { sections: 1, keys: 2 });
        assert_eq!(value(&roots, &["App", "window", "width"]), Some("800"));
        assert_eq!(value(&roots, &["App", "window", "height"]), Some("600"));
        assert_eq!(value(&roots, &["App", "window"]), None);
        assert_eq!(roots[0].children().len(), 1);
    }

    #[test]
    fn comments_and_blank_lines_only() {
        let (roots, summary) = parse("# comment\n\n   \n\t# indented comment\n");
        assert!(roots.is_empty());
        assert_eq!(summary, ReadSummary::default());
    }

    #[test]
    fn first_equals_splits() {
        let (roots, _) = parse("[S]\nk=a=b\nurl=http://host/path\n");
        assert_eq!(value(&roots, &["S", "k"]), Some("a=b"));
        assert_eq!(value(&roots, &["S", "url"]), Some("http://host/path"));
    }

    #[test]
    fn value_keeps_inner_whitespace() {
        let (roots, _) = parse("[S]\n  name = spaced value \t\n");
        // Only the line ends are trimmed
        assert_eq!(value(&roots, &["S", "name "]), Some(" spaced value"));
    }

    #[test]
    fn keys_before_first_section_ignored() {
        let (roots, summary) = parse("orphan=1\n[S]\nk=v\n");
        assert_eq!(roots.len(), 1);
        assert_eq!(summary.keys, 1);
        assert_eq!(value(&roots, &["S", "k"]), Some("v"));
    }

    #[test]
    fn lines_without_equals_ignored() {
        let (roots, _) = parse("[S]\njust text\nk=v\n");
        assert_eq!(roots[0].children().len(), 1);
    }

    #[test]
    fn repeated_section_header_continues_section() {
        let (roots, _) = parse("[A]\nx=1\n[B]\ny=2\n[A]\nz=3\n");
        assert_eq!(roots.len(), 2);
        assert_eq!(value(&roots, &["A", "x"]), Some("1"));
        assert_eq!(value(&roots, &["A", "z"]), Some("3"));
    }

    #[test]
    fn repeated_key_overwrites() {
        let (roots, _) = parse("[S]\nk=1\nk=2\n");
        assert_eq!(roots[0].children().len(), 1);
        assert_eq!(value(&roots, &["S", "k"]), Some("2"));
    }

    #[test]
    fn parent_value_survives_child_lines() {
        let (roots, _) = parse("[S]\na=top\na/b=deep\n");
        assert_eq!(value(&roots, &["S", "a"]), Some("top"));
        assert_eq!(value(&roots, &["S", "a", "b"]), Some("deep"));
    }

    #[test]
    fn read_str_matches_read_into() {
        let text = "[S]\r\na/b=1\n# c\nk=v";
        let (from_reader, summary) = parse(text);

        let mut from_str = Vec::new();
        assert_eq!(read_str(text, &mut from_str), summary);
        assert_eq!(from_str, from_reader);
    }

    #[test]
    fn crlf_line_endings() {
        let (roots, _) = parse("[S]\r\nk=v\r\n");
        assert_eq!(value(&roots, &["S", "k"]), Some("v"));
    }

    #[test]
    fn empty_segments_are_keys() {
        let (roots, _) = parse("[S]\na//b=1\n=2\n");
        assert_eq!(value(&roots, &["S", "a", "", "b"]), Some("1"));
        assert_eq!(value(&roots, &["S", ""]), Some("2"));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut roots = Vec::new();
        let bytes: &[u8] = b"[S]\nk=\xff\n";
        let err = read_into(bytes, &mut roots).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn writes_sections_with_trailing_blank_line() {
        let (roots, _) = parse("[App]\nwindow/width=800\nwindow/height=600\n[Other]\nk=v\n");
        assert_eq!(
            render(&roots),
            "[App]\nwindow=\nwindow/width=800\nwindow/height=600\n\n[Other]\nk=v\n\n"
        );
    }

    #[test]
    fn writes_parent_value_before_children() {
        let (roots, _) = parse("[S]\nparent/child=pv\nparent/child/grandchild=leaf\n");
        assert_eq!(
            render(&roots),
            "[S]\nparent=\nparent/child=pv\nparent/child/grandchild=leaf\n\n"
        );
    }

    #[test]
    fn container_without_value_writes_bare_equals() {
        let mut roots = Vec::new();
        descend_or_create(&mut roots, &["App", "window", "width"])
            .unwrap()
            .set_value("800");

        assert_eq!(render(&roots), "[App]\nwindow=\nwindow/width=800\n\n");
    }

    #[test]
    fn writes_empty_leaf_with_trailing_equals() {
        let (roots, _) = parse("[S]\nblank=\n");
        assert_eq!(render(&roots), "[S]\nblank=\n\n");
    }

    #[test]
    fn writes_empty_section() {
        let (roots, _) = parse("[Empty]\n");
        assert_eq!(render(&roots), "[Empty]\n\n");
    }

    #[test]
    fn reparse_of_written_text_is_equal() {
        let text = "[A]\nx=1\nx/y=2\nx/y/z=3\nw=\n\n[B]\nk=a=b\n\n";
        let (roots, _) = parse(text);
        let written = render(&roots);
        assert_eq!(written, text);

        let (reparsed, _) = parse(&written);
        assert_eq!(reparsed, roots);
    }
}
