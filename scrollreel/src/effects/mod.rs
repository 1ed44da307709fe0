pub(crate) mod countdown;
pub(crate) mod dust;
pub(crate) mod hero;
pub(crate) mod hold;
pub(crate) mod starfield;
pub(crate) mod thunder;
