//! Passes that prepare a presentation tree for serialization.

use crate::parser::is_space;
use crate::tag::{TagKind, TagTable};
use crate::writer::write_plain_tag;

use super::{NodeKind, PresentationTree};

/// Remove blank branches from both outer edges of the tree.
///
/// Walks the tree front to back, then back to front. In each walk, children
/// whose text is whitespace-only are removed until the first one with real
/// text is reached; from then on nothing else in that walk is removed. Blank
/// runs between real content are kept.
pub fn trim<T: PresentationTree>(tree: &mut T) {
    let root = tree.root();
    trim_edge(tree, root, false, false);
    trim_edge(tree, root, true, false);
}

/// Returns true once non-blank content has been seen in this walk.
fn trim_edge<T: PresentationTree>(tree: &mut T, node: T::Node, reverse: bool, found: bool) -> bool {
    let mut found = found;
    let mut children = tree.children(node);
    if reverse {
        children.reverse();
    }

    for child in children {
        found |= trim_edge(tree, child, reverse, found);
        if !found && is_blank(&tree.text_content(child)) {
            log::trace!("trimming blank edge node {child:?}");
            tree.remove_child(node, child);
            continue;
        }
        found = true;
    }
    found
}

fn is_blank(text: &str) -> bool {
    text.chars().all(is_space)
}

/// Replace literal brackets in every text leaf with bracket tags.
pub fn escape_brackets<T: PresentationTree>(tree: &mut T, table: &TagTable) {
    let root = tree.root();
    escape_node(tree, root, table);
}

fn escape_node<T: PresentationTree>(tree: &mut T, node: T::Node, table: &TagTable) {
    for child in tree.children(node) {
        if tree.has_children(child) {
            escape_node(tree, child, table);
            continue;
        }
        let escaped = match tree.kind(child) {
            NodeKind::Text(text) if text.contains(['[', ']']) => escape_text(text, table),
            _ => continue,
        };
        tree.set_text(child, escaped);
    }
}

/// Replace `[` and `]` in `text` with their self-closing bracket tags.
///
/// ```
/// use markup::serialize::escape_text;
/// use markup::TagTable;
///
/// assert_eq!(
///     escape_text("a[b]", TagTable::global()),
///     "a[square-bracket/]b[square-bracket-end/]"
/// );
/// ```
pub fn escape_text(text: &str, table: &TagTable) -> String {
    let open = write_plain_tag(table, TagKind::SquareBracket, "");
    let close = write_plain_tag(table, TagKind::SquareBracketEnd, "");
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '[' => out.push_str(&open),
            ']' => out.push_str(&close),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Fragment;

    fn trimmed(html: &str) -> String {
        let mut fragment = Fragment::from_html(html);
        trim(&mut fragment);
        fragment.to_html()
    }

    #[test]
    fn trims_blank_text_at_edges() {
        assert_eq!(trimmed("  \n <br>hello<br>\t"), "hello");
    }

    #[test]
    fn next_line_text_is_not_blank() {
        assert_eq!(trimmed("\u{85}<b>x</b>"), "\u{85}<b>x</b>");
    }

    #[test]
    fn keeps_partially_blank_text_nodes() {
        // Only whole nodes are removed; text with content keeps its padding.
        assert_eq!(trimmed("  hi  "), "  hi  ");
    }

    #[test]
    fn removes_blank_elements_at_edges() {
        assert_eq!(trimmed("<br><b> </b>x<br> "), "x");
    }

    #[test]
    fn keeps_interior_blank_runs() {
        assert_eq!(trimmed(" <b>a</b> <br> <i>b</i> "), "<b>a</b> <br> <i>b</i>");
    }

    #[test]
    fn trims_inside_first_and_last_branch() {
        assert_eq!(
            trimmed("<div> <br><b>a</b> </div><div>b <br> </div>"),
            "<div><b>a</b> </div><div>b </div>"
        );
    }

    #[test]
    fn trimming_blank_tree_empties_it() {
        assert_eq!(trimmed(" <br> <div> </div> "), "");
    }

    #[test]
    fn trim_is_idempotent() {
        let mut fragment = Fragment::from_html(" <div> <br><b>a</b> x </div> <u>y</u> <br>");
        trim(&mut fragment);
        let once = fragment.to_html();
        trim(&mut fragment);
        assert_eq!(fragment.to_html(), once);
    }

    #[test]
    fn escape_brackets_in_nested_text() {
        let mut fragment = Fragment::from_html("[a] <b>x]</b>");
        escape_brackets(&mut fragment, TagTable::global());
        assert_eq!(
            fragment.to_html(),
            "[square-bracket/]a[square-bracket-end/] <b>x[square-bracket-end/]</b>"
        );
    }

    #[test]
    fn escape_text_without_brackets_is_unchanged() {
        assert_eq!(escape_text("plain", TagTable::global()), "plain");
    }
}
