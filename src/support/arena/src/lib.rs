#![cfg_attr(not(test), no_std)]

/*
    =======================  support/arena/src/lib.rs  ========================
    Typed index arenas used to store parse tree nodes by handle
    ---------------------------------------------------------------------------
*/

mod arena;
mod id;
mod idx;
mod impl_id;
mod iter;
mod new_id;

extern crate alloc;

pub use arena::Arena;
pub use id::Id;
pub use idx::Idx;
pub use iter::Iter;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    type NodeId = u32;

    #[derive(Debug, PartialEq)]
    struct Node {
        label: &'static str,
        children: Vec<Idx<NodeId, Node>>,
    }

    #[test]
    fn handles_survive_growth() {
        let mut arena = Arena::<NodeId, Node>::new();

        let leaf = arena.alloc(Node {
            label: "leaf",
            children: Vec::new(),
        });

        let parent = arena.alloc(Node {
            label: "parent",
            children: alloc::vec![leaf],
        });

        for _ in 0..1000 {
            arena.alloc(Node {
                label: "filler",
                children: Vec::new(),
            });
        }

        assert_eq!(arena[leaf].label, "leaf");
        assert_eq!(arena[arena[parent].children[0]].label, "leaf");
        assert_eq!(arena.len(), 1002);
    }

    #[test]
    fn iterates_in_allocation_order() {
        let mut arena = Arena::<u32, i32>::new();
        let a = arena.alloc(10);
        let b = arena.alloc(20);

        arena[b] += 1;

        let collected = arena.iter().collect::<Vec<_>>();
        assert_eq!(collected, alloc::vec![(a, &10), (b, &21)]);
        assert_eq!(arena.keys().collect::<Vec<_>>(), alloc::vec![a, b]);
    }

    #[test]
    fn handles_debug_as_node_and_position() {
        let mut arena = Arena::<NodeId, Node>::new();
        arena.alloc(Node {
            label: "first",
            children: Vec::new(),
        });
        let second = arena.alloc(Node {
            label: "second",
            children: Vec::new(),
        });

        assert_eq!(alloc::format!("{:?}", second), "Node#1");
    }

    #[test]
    fn try_alloc_reports_full_arena() {
        let mut arena = Arena::<u8, ()>::new();

        for _ in 0..u8::MAX {
            assert!(arena.try_alloc(()).is_some());
        }

        assert!(arena.try_alloc(()).is_none());
    }
}
