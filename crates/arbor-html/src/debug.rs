//! Indented tree dumps for development.

use arbor_dom::{DomTree, NodeId, NodeType};

/// Prints an indented, one-node-per-line view of the subtree at `id`.
///
/// Elements show their attributes plus a bracketed note when they carry
/// properties or event listeners, since neither is visible in markup. Text
/// is printed with newlines and spaces made visible. Start with `indent`
/// zero; a node id the tree does not hold prints nothing.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Document => println!("{prefix}Document"),
            NodeType::Fragment => println!("{prefix}Fragment"),
            NodeType::Element(data) => {
                let attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|(name, value)| {
                        if value.is_empty() {
                            name.clone()
                        } else {
                            format!("{name}=\"{value}\"")
                        }
                    })
                    .collect();
                let head = if attrs.is_empty() {
                    format!("<{}>", data.tag_name)
                } else {
                    format!("<{} {}>", data.tag_name, attrs.join(" "))
                };

                let mut unseen = Vec::new();
                if !data.props.is_empty() {
                    unseen.push(format!("{} properties", data.props.len()));
                }
                if !data.listeners.is_empty() {
                    unseen.push(format!("{} listeners", data.listeners.len()));
                }
                if unseen.is_empty() {
                    println!("{prefix}{head}");
                } else {
                    println!("{prefix}{head} [{}]", unseen.join(", "));
                }
            }
            NodeType::Text(data) => {
                let visible = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{visible}\"");
            }
            NodeType::Comment(data) => {
                println!("{prefix}<!-- {data} -->");
            }
        }
        for &child in tree.children(id) {
            print_tree(tree, child, indent + 1);
        }
    }
}
