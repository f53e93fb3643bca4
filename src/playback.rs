pub(crate) mod command;
pub(crate) mod mode;
pub(crate) mod scheduler;
pub(crate) mod state;
