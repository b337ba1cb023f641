pub(crate) mod geometry;
pub(crate) mod style;
pub(crate) mod trigger;
