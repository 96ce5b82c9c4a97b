use crate::{
    Binary, Block, ErrorConstruct, FunctionCall, IfElseifElse, PragmaConstruct, Ternary, Unary,
};
use arena::{Arena, Idx, new_id_with_niche};
use std::ops::{Index, IndexMut};

new_id_with_niche!(BlockId, u32);
new_id_with_niche!(IfElseifElseId, u32);
new_id_with_niche!(PragmaConstructId, u32);
new_id_with_niche!(ErrorConstructId, u32);
new_id_with_niche!(UnaryId, u32);
new_id_with_niche!(BinaryId, u32);
new_id_with_niche!(TernaryId, u32);
new_id_with_niche!(FunctionCallId, u32);

pub type BlockRef<'a> = Idx<BlockId, Block<'a>>;
pub type IfElseifElseRef<'a> = Idx<IfElseifElseId, IfElseifElse<'a>>;
pub type PragmaConstructRef<'a> = Idx<PragmaConstructId, PragmaConstruct<'a>>;
pub type ErrorConstructRef<'a> = Idx<ErrorConstructId, ErrorConstruct<'a>>;
pub type UnaryRef<'a> = Idx<UnaryId, Unary<'a>>;
pub type BinaryRef<'a> = Idx<BinaryId, Binary<'a>>;
pub type TernaryRef<'a> = Idx<TernaryId, Ternary<'a>>;
pub type FunctionCallRef<'a> = Idx<FunctionCallId, FunctionCall<'a>>;

/// Owner of every recursive node of a parsed unit.
///
/// Nodes refer to each other by handle, and a handle is only meaningful for
/// the tree that made it.
#[derive(Clone, Debug, Default)]
pub struct ParseTree<'a> {
    pub blocks: Arena<BlockId, Block<'a>>,
    pub conditionals: Arena<IfElseifElseId, IfElseifElse<'a>>,
    pub pragmas: Arena<PragmaConstructId, PragmaConstruct<'a>>,
    pub errors: Arena<ErrorConstructId, ErrorConstruct<'a>>,
    pub unary: Arena<UnaryId, Unary<'a>>,
    pub binary: Arena<BinaryId, Binary<'a>>,
    pub ternary: Arena<TernaryId, Ternary<'a>>,
    pub calls: Arena<FunctionCallId, FunctionCall<'a>>,
}

macro_rules! tree_arenas {
    ($($make: ident, $field: ident, $id: ty, $node: ident;)*) => {
        impl<'a> ParseTree<'a> {
            $(
                pub fn $make(&mut self, node: $node<'a>) -> Idx<$id, $node<'a>> {
                    self.$field.alloc(node)
                }
            )*
        }

        $(
            impl<'a> Index<Idx<$id, $node<'a>>> for ParseTree<'a> {
                type Output = $node<'a>;

                fn index(&self, idx: Idx<$id, $node<'a>>) -> &Self::Output {
                    &self.$field[idx]
                }
            }

            impl<'a> IndexMut<Idx<$id, $node<'a>>> for ParseTree<'a> {
                fn index_mut(&mut self, idx: Idx<$id, $node<'a>>) -> &mut Self::Output {
                    &mut self.$field[idx]
                }
            }
        )*
    };
}

tree_arenas! {
    make_block, blocks, BlockId, Block;
    make_if_elseif_else, conditionals, IfElseifElseId, IfElseifElse;
    make_pragma, pragmas, PragmaConstructId, PragmaConstruct;
    make_error, errors, ErrorConstructId, ErrorConstruct;
    make_unary, unary, UnaryId, Unary;
    make_binary, binary, BinaryId, Binary;
    make_ternary, ternary, TernaryId, Ternary;
    make_call, calls, FunctionCallId, FunctionCall;
}

impl ParseTree<'_> {
    pub fn new() -> Self {
        Self::default()
    }
}
