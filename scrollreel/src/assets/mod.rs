pub(crate) mod backend;
pub(crate) mod dir;
pub(crate) mod handles;
pub(crate) mod record;
pub(crate) mod store;
