pub(crate) mod engine;
pub(crate) mod hero;
pub(crate) mod stream;
pub(crate) mod typewriter;
pub(crate) mod vault;
