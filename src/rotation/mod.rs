pub(crate) mod selector;
