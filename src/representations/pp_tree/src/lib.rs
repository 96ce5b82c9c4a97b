/*
    ====================  representations/pp_tree/src/lib.rs  ====================
    Parse tree of preprocessor statements, stored in per-node-type arenas
    ---------------------------------------------------------------------------
*/

mod conditional;
mod error;
mod error_construct;
mod expression;
mod pragma;
mod sequence;
mod statement;
mod symbol_table;
mod tree;

pub use conditional::*;
pub use error::{ParseError, ParseErrorKind};
pub use error_construct::ErrorConstruct;
pub use expression::*;
pub use pragma::{MatrixPacking, Pragma, PragmaConstruct};
pub use sequence::Sequence;
pub use statement::*;
pub use symbol_table::{AlreadyDefined, Definition, SymbolTable};
pub use tree::*;
