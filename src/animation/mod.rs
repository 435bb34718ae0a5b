pub(crate) mod ease;
pub(crate) mod spring;
pub(crate) mod track;
pub(crate) mod value;
