//! Authentication helpers.
//!
//! The Pokedex uses two independent authentication schemes:
//!
//! * HTML pages that modify the Pokedex require a logged-in user; logins are kept in a signed
//!   session cookie (see [`session`]).
//! * REST API endpoints that read data require an OAuth2 bearer token granted the `read` and
//!   `write` scopes (see [`token`]).

pub mod password;
pub mod session;
pub mod token;
