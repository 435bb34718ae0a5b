pub(crate) mod observer;
pub(crate) mod opts;
pub(crate) mod progress;
pub(crate) mod transition;
