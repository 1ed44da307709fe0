pub(crate) mod ease;
pub(crate) mod ignition;
pub(crate) mod timeline;
