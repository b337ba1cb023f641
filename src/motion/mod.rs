pub(crate) mod counter;
pub(crate) mod cursor;
pub(crate) mod marquee;
pub(crate) mod parallax;
