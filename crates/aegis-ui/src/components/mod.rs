pub(crate) mod guarded;
pub(crate) mod login;
pub(crate) mod shell;
pub(crate) mod toast;
pub(crate) mod views;
