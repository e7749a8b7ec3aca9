//! Human readable tree dump
//!
//! One row per node, children indented below their parent and marked `l` or
//! `r`. Leaves list their labels. Large trees produce huge strings.
//!
//! ```text
//! x-node (split: 2, max-t: 9) BBox: [1, 9] x [1, 9]
//! l    leaf-node (2 labels, max-t: 5) BBox: [1, 2] x [1, 2]
//! l        Label [#1]: 'A' at (1, 1) with prio 0, elim-t: 5 and label factor: 1
//! ...
//! ```

use std::fmt::{self, Write};

use super::node::{NodeKind, ROOT};
use super::EliminationIndex;

const INDENT: &str = "    ";

impl EliminationIndex {
    /// Render the tree as a multiline string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_tree(&mut out);
        out
    }

    fn write_tree(&self, out: &mut String) -> fmt::Result {
        if self.nodes.is_empty() {
            return writeln!(out, "empty index");
        }

        // (node, side marker)
        let mut stack = vec![(ROOT, "")];
        while let Some((id, side)) = stack.pop() {
            let node = &self.nodes[id];
            let indent = INDENT.repeat(node.depth);

            match node.kind {
                NodeKind::Branch {
                    axis,
                    split,
                    left,
                    right,
                } => {
                    writeln!(
                        out,
                        "{}{}{}-node (split: {}, max-t: {}) {}",
                        side,
                        indent,
                        axis.as_str(),
                        split,
                        node.max_t,
                        node.bbox
                    )?;
                    stack.push((right, "r"));
                    stack.push((left, "l"));
                }
                NodeKind::Leaf { start, end } => {
                    writeln!(
                        out,
                        "{}{}leaf-node ({} labels, max-t: {}) {}",
                        side,
                        indent,
                        end - start,
                        node.max_t,
                        node.bbox
                    )?;
                    for label in &self.labels[start..end] {
                        writeln!(out, "{}{}{}{}", side, indent, INDENT, label)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::index::EliminationIndex;
    use crate::primitives::Label;

    #[test]
    fn test_render_empty() {
        let index = EliminationIndex::from_labels(Vec::new(), &Config::default()).unwrap();
        assert_eq!(index.render(), "empty index\n");
    }

    #[test]
    fn test_render_single_leaf() {
        let index = EliminationIndex::from_labels(
            vec![Label::new(1, 1.0, 2.0, 9.0, 1.5, 1, "T1")],
            &Config::default(),
        )
        .unwrap();

        let dump = index.render();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("leaf-node (1 labels, max-t: 9)"));
        assert!(lines[1].contains("Label [#1]: 'T1' at (1, 2)"));
    }

    #[test]
    fn test_render_branches() {
        let labels = (0..6)
            .map(|i| Label::point(i, i as f64, 0.0, 1.0))
            .collect();
        let config = Config {
            leaf_capacity: 2,
            ..Config::default()
        };
        let index = EliminationIndex::from_labels(labels, &config).unwrap();

        let dump = index.render();
        assert!(dump.starts_with("x-node (split: 3"));
        assert!(dump.contains("\nl    "));
        assert!(dump.contains("\nr    "));
        assert_eq!(dump.matches("Label [#").count(), 6);
    }
}
