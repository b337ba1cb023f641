pub(crate) mod clock;
pub(crate) mod lifecycle;
pub(crate) mod timer;
