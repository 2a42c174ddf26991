//! Parent back-references, computed after parsing.

use crate::node::SourceFile;
use crate::types::NodeId;
use crate::visitor::{walk, NodeRef, Visitor};
use rustc_hash::FxHashMap;

/// Maps each node id to its parent node. The root has no entry.
#[derive(Default)]
pub struct ParentMap<'a> {
    parents: FxHashMap<NodeId, NodeRef<'a>>,
}

impl<'a> ParentMap<'a> {
    pub fn build(source_file: &'a SourceFile<'a>) -> Self {
        let mut builder = Builder {
            stack: Vec::new(),
            parents: FxHashMap::default(),
        };
        walk(source_file, &mut builder);
        Self {
            parents: builder.parents,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeRef<'a>> {
        self.parents.get(&id).copied()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        let mut next = self.parent(id);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.parent(current.id());
            Some(current)
        })
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

struct Builder<'a> {
    stack: Vec<NodeRef<'a>>,
    parents: FxHashMap<NodeId, NodeRef<'a>>,
}

impl<'a> Visitor<'a> for Builder<'a> {
    fn enter(&mut self, node: NodeRef<'a>) -> bool {
        if let Some(&parent) = self.stack.last() {
            let previous = self.parents.insert(node.id(), parent);
            debug_assert!(previous.is_none(), "node id {} reached twice", node.id());
        }
        self.stack.push(node);
        true
    }

    fn leave(&mut self, _node: NodeRef<'a>) {
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::*;
    use crate::syntax_kind::SyntaxKind;
    use crate::types::LanguageVariant;

    fn data(kind: SyntaxKind, pos: u32, end: u32, id: u32) -> NodeData {
        let mut data = NodeData::new(kind, pos, end);
        data.id = NodeId(id);
        data
    }

    #[test]
    fn test_parent_links() {
        // ;
        let empty = Token {
            data: data(SyntaxKind::EmptyStatement, 0, 1, 0),
        };
        let block = Block {
            data: data(SyntaxKind::Block, 0, 1, 1),
            statements: &[],
        };
        let statements = [Statement::Empty(&empty), Statement::Block(&block)];
        let file = SourceFile {
            data: data(SyntaxKind::SourceFile, 0, 1, 3),
            statements: &statements,
            end_of_file_token: Token {
                data: data(SyntaxKind::EndOfFileToken, 1, 1, 2),
            },
            text: ";",
            language_variant: LanguageVariant::Standard,
        };

        let map = ParentMap::build(&file);
        assert_eq!(map.len(), 3);
        assert_eq!(map.parent(NodeId(0)).map(|p| p.kind()), Some(SyntaxKind::SourceFile));
        assert_eq!(map.parent(NodeId(2)).map(|p| p.id()), Some(NodeId(3)));
        assert!(map.parent(NodeId(3)).is_none());
        assert_eq!(map.ancestors(NodeId(1)).count(), 1);
    }
}
