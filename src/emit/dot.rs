use crate::schedule::builder::DepGraph;

/// Emit a dependency graph as a DOT (Graphviz) diagram.
///
/// Edges point from a dependency to its dependents; an edge is labelled
/// with the declared reference when it differs from the dependency's name.
pub fn emit_dot(dg: &DepGraph) -> String {
    let mut out = format!("digraph \"{}\" {{\n", dg.name);

    for &idx in &dg.node_indices {
        let node = &dg.graph[idx];
        out.push_str(&format!("  \"{}\";\n", node.name));
    }

    for edge_idx in dg.graph.edge_indices() {
        let (src, dst) = dg.graph.edge_endpoints(edge_idx).unwrap();
        let src_name = &dg.graph[src].name;
        let dst_name = &dg.graph[dst].name;
        let reference = &dg.graph[edge_idx].reference;
        if reference == src_name {
            out.push_str(&format!("  \"{src_name}\" -> \"{dst_name}\";\n"));
        } else {
            out.push_str(&format!(
                "  \"{src_name}\" -> \"{dst_name}\" [label=\"{reference}\"];\n"
            ));
        }
    }

    out.push_str("}\n");
    out
}
