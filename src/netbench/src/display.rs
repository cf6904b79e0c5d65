use std::fmt::Write;

use fnv::FnvHashSet;

use crate::bundle::{Bundle, Child};

impl Bundle {
    /// Renders the bundle graph as an indented tree. A node reached a
    /// second time is printed as `<name> [cycle]` and not expanded, so the
    /// output is finite even for cyclic graphs.
    pub fn str_tree(&self) -> String {
        self.str_tree_named("bundle")
    }

    pub fn str_tree_named(&self, label: &str) -> String {
        let mut out = String::new();
        let mut visited: FnvHashSet<usize> = FnvHashSet::default();
        writeln!(out, "{}", label).unwrap();
        visited.insert(self.key());
        render_children(self, "", &mut visited, &mut out);
        out
    }
}

fn render_children(node: &Bundle, prefix: &str, visited: &mut FnvHashSet<usize>, out: &mut String) {
    let components = node.components();
    let children = node.children_snapshot();
    let total = components.len() + children.len();
    let mut idx = 0;

    let branch = |idx: usize| if idx + 1 == total { "└── " } else { "├── " };

    for c in components {
        writeln!(out, "{}{}{}", prefix, branch(idx), c).unwrap();
        idx += 1;
    }
    for (name, child) in children {
        let last = idx + 1 == total;
        match child {
            Child::Leaf(c) => {
                writeln!(out, "{}{}{} = {}", prefix, branch(idx), name, c).unwrap();
            }
            Child::Node(b) => {
                if visited.contains(&b.key()) {
                    writeln!(out, "{}{}{} [cycle]", prefix, branch(idx), name).unwrap();
                } else {
                    visited.insert(b.key());
                    writeln!(out, "{}{}{}", prefix, branch(idx), name).unwrap();
                    let deeper = format!("{}{}", prefix, if last { "    " } else { "│   " });
                    render_children(&b, &deeper, visited, out);
                }
            }
        }
        idx += 1;
    }
}
