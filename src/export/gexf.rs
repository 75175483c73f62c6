//! GEXF export of a retained search tree.
//!
//! Writes one GEXF 1.3 file per engine response so the search can be
//! inspected in Gephi: one XML node per tree node carrying `score`, `depth`,
//! and the incoming move, with edges labelled by the move that was searched.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::board::state::State;
use crate::board::types::Move;
use crate::protocol::format::{format_move_ep, format_move_long};
use crate::search::node::Node;

/// Write the whole tree rooted at `root` to `path`, creating parent
/// directories as needed.
pub fn export_tree(root: &Node, path: &Path) -> io::Result<()> {
    let mut nodes_xml = String::new();
    let mut edges_xml = String::new();
    let mut ids = IdCounter::default();
    walk_tree(root, None, 0, &mut ids, &mut nodes_xml, &mut edges_xml);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = fs::File::create(path)?;
    writeln!(file, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(file, r#"<gexf xmlns="http://www.gexf.net/1.3" version="1.3">"#)?;
    writeln!(file, r#"  <graph mode="static" defaultedgetype="directed">"#)?;
    writeln!(file, r#"    <attributes class="node">"#)?;
    writeln!(file, r#"      <attribute id="score" title="Score" type="integer"/>"#)?;
    writeln!(file, r#"      <attribute id="depth" title="Depth" type="integer"/>"#)?;
    writeln!(file, r#"      <attribute id="move" title="Move" type="string"/>"#)?;
    writeln!(file, r#"    </attributes>"#)?;
    writeln!(file, "    <nodes>\n{nodes_xml}    </nodes>")?;
    writeln!(file, "    <edges>\n{edges_xml}    </edges>")?;
    writeln!(file, "  </graph>\n</gexf>")?;
    Ok(())
}

#[derive(Default)]
struct IdCounter {
    next_node: u32,
    next_edge: u32,
}

fn walk_tree(
    node: &Node,
    incoming: Option<(&State, &Move)>,
    depth: u32,
    ids: &mut IdCounter,
    nodes_xml: &mut String,
    edges_xml: &mut String,
) {
    let node_id = format!("n{}", ids.next_node);
    ids.next_node += 1;

    let label = if depth == 0 { "root" } else { node_id.as_str() };
    let move_text = incoming.map_or(String::new(), |(parent, mv)| move_label(parent, mv));

    nodes_xml.push_str(&format!(
        "<node id=\"{}\" label=\"{}\">\n  <attvalues><attvalue for=\"score\" value=\"{}\"/><attvalue for=\"depth\" value=\"{}\"/><attvalue for=\"move\" value=\"{}\"/></attvalues>\n</node>\n",
        xml_escape(&node_id),
        xml_escape(label),
        node.best_score,
        depth,
        xml_escape(&move_text)
    ));

    for (mv, child) in &node.children {
        let target_id = format!("n{}", ids.next_node);
        edges_xml.push_str(&format!(
            "<edge id=\"e{}\" source=\"{}\" target=\"{}\" label=\"{}\"/>\n",
            ids.next_edge,
            node_id,
            target_id,
            xml_escape(&move_label(&node.state, mv))
        ));
        ids.next_edge += 1;
        walk_tree(child, Some((&node.state, mv)), depth + 1, ids, nodes_xml, edges_xml);
    }
}

/// Label a move from its parent position, in the same notation the protocol
/// prints.
fn move_label(parent: &State, mv: &Move) -> String {
    let piece = parent.at(mv.from_col, mv.from_row);
    if mv.en_passant {
        if let Some(piece) = piece {
            return format_move_ep(mv, piece.color);
        }
    }
    let kind = piece.map_or(crate::board::types::PieceKind::Pawn, |p| p.kind);
    let captured = parent.at(mv.to_col, mv.to_row).map(|p| p.kind);
    format_move_long(mv, kind, captured)
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::State;
    use crate::board::types::Move;
    use crate::search::node::Node;

    #[test]
    fn xml_escaping_covers_the_special_characters() {
        assert_eq!(xml_escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn exported_tree_contains_nodes_edges_and_attributes() {
        let mut root = Node::new(State::glinski());
        root.best_score = 3;
        let mv = Move::quiet(1, 0, 1, 2);
        let mut child = Node::new(State::glinski());
        child.best_score = -1;
        root.children.push((mv, Box::new(child)));

        let dir = std::env::temp_dir().join("hexchess_gexf_test");
        let path = dir.join("tree.gexf");
        export_tree(&root, &path).expect("export should succeed");

        let text = std::fs::read_to_string(&path).expect("exported file should read back");
        assert!(text.contains(r#"<gexf xmlns="http://www.gexf.net/1.3" version="1.3">"#));
        assert!(text.contains(r#"<attribute id="score" title="Score" type="integer"/>"#));
        assert!(text.contains(r#"label="root""#));
        assert!(text.contains(r#"<attvalue for="score" value="3"/>"#));
        // The edge is labelled with the pawn move in long notation.
        assert!(text.contains(r#"label="P B1 B3""#));
        assert!(text.contains(r#"source="n0" target="n1""#));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
