//! Text rendering of laid-out trees and results

use std::fmt::Write;
use tree_render::Drawable;

/// Draw the visible tree as text
///
/// One line per node in pre-order, indented by depth, collapsed nodes marked
/// with `+`, followed by the edge list.
pub fn draw(drawable: &Drawable) -> String {
    if drawable.is_empty() {
        return "(empty tree)".to_string();
    }

    let mut out = String::new();
    for node in &drawable.nodes {
        let marker = if node.collapsed { "+ " } else { "" };
        let _ = writeln!(
            out,
            "{:indent$}{}{} ({:.0}, {:.0})",
            "",
            marker,
            node.name,
            node.position.x,
            node.position.y,
            indent = node.depth * 2
        );
    }

    if !drawable.edges.is_empty() {
        out.push_str("edges:");
        for &(parent, child) in &drawable.edges {
            let _ = write!(
                out,
                "\n  {} -> {}",
                drawable.nodes[parent].name, drawable.nodes[child].name
            );
        }
    }

    out.trim_end().to_string()
}

/// A comparison result, one difference per line
pub fn differences(lines: &[String]) -> String {
    if lines.is_empty() {
        "No differences".to_string()
    } else {
        lines.join("\n")
    }
}
