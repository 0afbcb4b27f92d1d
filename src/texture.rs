pub(crate) mod factory;
