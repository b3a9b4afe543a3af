pub(crate) mod anchor;
pub(crate) mod binding;
pub(crate) mod flag;
pub(crate) mod range;
