pub(crate) mod composite;
pub(crate) mod input;
pub(crate) mod overlay;
pub(crate) mod stage;
pub(crate) mod window;
