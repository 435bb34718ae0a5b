pub(crate) mod doc;
pub(crate) mod dsl;
pub(crate) mod graph;
pub(crate) mod host;
