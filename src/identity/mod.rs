//! Principal supplied by the host's identity system.
//! Sessions and login live in the host; only the evaluated identity is modelled here.

mod principal;

pub use principal::{Principal, AUTH_PAGES_SUPER, AUTH_SUPER};
