use crate::Sequence;
use derive_more::{Display, IsVariant};

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum MatrixPacking {
    #[display("row_major")]
    RowMajor,
    #[display("column_major")]
    ColumnMajor,
}

#[derive(Clone, Debug, PartialEq, IsVariant)]
pub enum Pragma<'a> {
    Once,
    Def(Sequence<'a>),
    PackMatrix(MatrixPacking),
    Warning(Sequence<'a>),
    Message(Option<String>),
    Custom {
        name: &'a str,
        arguments: Sequence<'a>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PragmaConstruct<'a> {
    pub sequence: Sequence<'a>,
    pub pragma: Pragma<'a>,
}
