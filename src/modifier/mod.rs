pub(crate) mod apply;
pub(crate) mod condition;
pub(crate) mod error;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod state;
pub(crate) mod text;
