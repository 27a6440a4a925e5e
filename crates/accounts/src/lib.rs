//! `campus-accounts` — authentication accounts and the registration rules
//! that gate their creation.

pub mod account;
pub mod register;

pub use account::Account;
pub use register::Registration;
