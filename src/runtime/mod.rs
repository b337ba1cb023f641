pub(crate) mod director;
pub(crate) mod session;
pub(crate) mod trace;
