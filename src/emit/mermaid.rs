use std::collections::HashMap;

use crate::schedule::builder::DepGraph;

/// Emit a dependency graph as a Mermaid flowchart diagram.
///
/// Test names may contain `::` and path separators, so nodes get positional
/// identifiers and carry the real name as a label.
pub fn emit_mermaid(dg: &DepGraph) -> String {
    let mut out = String::from("graph TD\n");
    let mut mermaid_id = HashMap::with_capacity(dg.node_indices.len());

    for (position, &idx) in dg.node_indices.iter().enumerate() {
        let node = &dg.graph[idx];
        let id = format!("t{position}");
        out.push_str(&format!("  {id}[\"{}\"]\n", node.name));
        mermaid_id.insert(idx, id);
    }

    for edge_idx in dg.graph.edge_indices() {
        let (src, dst) = dg.graph.edge_endpoints(edge_idx).unwrap();
        out.push_str(&format!("  {} --> {}\n", mermaid_id[&src], mermaid_id[&dst]));
    }

    out
}
