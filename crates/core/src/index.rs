use crate::types::Perspective;
use std::cmp::Ordering;

/// Arena slot: a perspective plus its tree links
#[derive(Debug, Clone)]
struct Node {
    perspective: Perspective,
    left: Option<usize>,
    right: Option<usize>,
}

/// Binary search tree of perspectives, stored in an arena.
///
/// Structural order is byte-wise on the stored name (case-sensitive), while
/// [`NameIndex::find`] compares ASCII case-insensitively. Because the two
/// orders disagree, lookups cannot prune and visit the whole tree on a miss.
/// Listings follow the case-sensitive order: "Zeta" sorts before "alpha".
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a perspective named `name`.
    ///
    /// The caller is responsible for the case-insensitive existence check.
    /// A byte-identical name is a no-op. Returns true when a node was created.
    pub fn insert(&mut self, name: &str) -> bool {
        let Some(mut cur) = self.root else {
            self.root = Some(self.push_node(name));
            return true;
        };

        loop {
            let node = &self.nodes[cur];
            let next = match name.as_bytes().cmp(node.perspective.name().as_bytes()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };
            match next {
                Some(child) => cur = child,
                None => {
                    let slot = self.push_node(name);
                    let parent = &mut self.nodes[cur];
                    if name.as_bytes() < parent.perspective.name().as_bytes() {
                        parent.left = Some(slot);
                    } else {
                        parent.right = Some(slot);
                    }
                    return true;
                }
            }
        }
    }

    /// Case-insensitive lookup
    pub fn find(&self, name: &str) -> Option<&Perspective> {
        self.find_slot(self.root, name)
            .map(|slot| &self.nodes[slot].perspective)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Perspective> {
        let slot = self.find_slot(self.root, name)?;
        Some(&mut self.nodes[slot].perspective)
    }

    /// Perspectives in case-sensitive lexicographic order.
    ///
    /// Each call starts a fresh traversal over the current tree shape.
    pub fn iter(&self) -> InorderIter<'_> {
        InorderIter {
            index: self,
            stack: Vec::new(),
            cursor: self.root,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Release every perspective and its KPIs.
    /// Returns `(perspectives, kpis)` released.
    pub fn clear(&mut self) -> (usize, usize) {
        let kpis = self
            .nodes
            .iter()
            .map(|n| n.perspective.kpi_count())
            .sum();
        let perspectives = self.nodes.len();
        self.nodes.clear();
        self.root = None;
        (perspectives, kpis)
    }

    fn push_node(&mut self, name: &str) -> usize {
        self.nodes.push(Node {
            perspective: Perspective::new(name),
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }

    // Exhaustive pre-order: self, then the left subtree, then the right one.
    fn find_slot(&self, slot: Option<usize>, name: &str) -> Option<usize> {
        let slot = slot?;
        let node = &self.nodes[slot];
        if node.perspective.name().eq_ignore_ascii_case(name) {
            return Some(slot);
        }
        self.find_slot(node.left, name)
            .or_else(|| self.find_slot(node.right, name))
    }
}

/// Lazy in-order traversal over a [`NameIndex`]
pub struct InorderIter<'a> {
    index: &'a NameIndex,
    stack: Vec<usize>,
    cursor: Option<usize>,
}

impl<'a> Iterator for InorderIter<'a> {
    type Item = &'a Perspective;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.cursor {
            self.stack.push(slot);
            self.cursor = self.index.nodes[slot].left;
        }
        let slot = self.stack.pop()?;
        let node = &self.index.nodes[slot];
        self.cursor = node.right;
        Some(&node.perspective)
    }
}

impl<'a> IntoIterator for &'a NameIndex {
    type Item = &'a Perspective;
    type IntoIter = InorderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
