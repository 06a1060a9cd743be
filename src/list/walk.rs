//! Walking the block tree.

use super::{Block, Comment, List, Section, Suffix, Suffixes, Wildcard};
use std::any::Any;

//------------ Tree ----------------------------------------------------------

/// A node of the block tree.
///
/// The trait is implemented by the root [`List`], by every block type, and
/// by [`Block`] itself, which forwards to the type it wraps.
pub trait Tree: Any {
    /// Returns whether the node differs from the baseline.
    fn is_changed(&self) -> bool;

    /// Returns the direct children of the node in document order.
    fn children(&self) -> &[Block];

    /// Returns the node for downcasting to its concrete type.
    ///
    /// For a [`Block`], this is the wrapped value, not the enum.
    fn as_any(&self) -> &dyn Any;
}

impl Tree for List {
    fn is_changed(&self) -> bool {
        self.blocks.iter().any(Block::is_changed)
    }

    fn children(&self) -> &[Block] {
        &self.blocks
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Tree for Block {
    fn is_changed(&self) -> bool {
        self.as_tree().is_changed()
    }

    fn children(&self) -> &[Block] {
        self.as_tree().children()
    }

    fn as_any(&self) -> &dyn Any {
        self.as_tree().as_any()
    }
}

macro_rules! container {
    ( $( $ty:ident ),* ) => {
        $(
            impl Tree for $ty {
                fn is_changed(&self) -> bool {
                    self.changed
                }

                fn children(&self) -> &[Block] {
                    &self.blocks
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    }
}

macro_rules! leaf {
    ( $( $ty:ident ),* ) => {
        $(
            impl Tree for $ty {
                fn is_changed(&self) -> bool {
                    self.changed
                }

                fn children(&self) -> &[Block] {
                    &[]
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    }
}

container!(Section, Suffixes);
leaf!(Suffix, Wildcard, Comment);

//------------ blocks_of_type ------------------------------------------------

/// Returns all nodes of type `T` at or below `root`.
///
/// The tree is walked depth first with each node visited before its
/// children, so the result is in the order the blocks appear in the
/// source. The root itself is included if it is of type `T`.
pub fn blocks_of_type<T: Tree>(root: &dyn Tree) -> Vec<&T> {
    let mut res = Vec::new();
    collect(root, &mut res);
    res
}

fn collect<'a, T: Tree>(node: &'a dyn Tree, res: &mut Vec<&'a T>) {
    if let Some(node) = node.as_any().downcast_ref::<T>() {
        res.push(node);
    }
    for child in node.children() {
        collect(child.as_tree(), res);
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::name::DomainName;

    fn suffix(s: &str) -> Suffix {
        Suffix::new(s.parse::<DomainName>().unwrap())
    }

    fn names(suffixes: &[&Suffix]) -> Vec<String> {
        suffixes.iter().map(|s| s.domain.to_string()).collect()
    }

    fn sample() -> List {
        List::new()
            .push(
                Section::new("ICANN DOMAINS")
                    .push(Suffixes::new("a").push(suffix("a.com")))
                    .push(Comment::default())
                    .push(
                        Suffixes::new("b")
                            .push(suffix("b.com"))
                            .push(Wildcard::new("w.com".parse().unwrap()))
                            .push(suffix("c.com")),
                    ),
            )
            .push(
                Section::new("PRIVATE DOMAINS")
                    .push(Suffixes::new("d").push(suffix("d.com"))),
            )
    }

    #[test]
    fn document_order() {
        let list = sample();
        assert_eq!(
            names(&blocks_of_type::<Suffix>(&list)),
            ["a.com", "b.com", "c.com", "d.com"]
        );
        let entities: Vec<_> = blocks_of_type::<Suffixes>(&list)
            .into_iter()
            .map(|s| s.info.name.as_str())
            .collect();
        assert_eq!(entities, ["a", "b", "d"]);
        assert_eq!(blocks_of_type::<Wildcard>(&list).len(), 1);
        assert_eq!(blocks_of_type::<Comment>(&list).len(), 1);
    }

    #[test]
    fn includes_root() {
        let list = sample();
        let section = list.section("PRIVATE DOMAINS").unwrap();
        let found = blocks_of_type::<Section>(section);
        assert_eq!(found.len(), 1);
        assert!(std::ptr::eq(found[0], section));

        let leaf = suffix("x.com");
        assert_eq!(blocks_of_type::<Suffix>(&leaf).len(), 1);
        assert!(blocks_of_type::<Wildcard>(&leaf).is_empty());
        assert_eq!(blocks_of_type::<List>(&list).len(), 1);
    }

    #[test]
    fn block_root() {
        let block: Block = suffix("x.com").into();
        assert_eq!(names(&blocks_of_type::<Suffix>(&block)), ["x.com"]);
    }
}
