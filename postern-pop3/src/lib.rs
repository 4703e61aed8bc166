//! POP3-side login routing for Postern.
//!
//! A [`LoginRouter`] resolves login attempts for a virtual-hosting
//! POP3 server: it splits the login identifier on the service's domain
//! specifier, finds the authentication authority bound to that domain,
//! and forwards the credentials. Every failure class surfaces as the
//! same uniform rejection so a probing client learns nothing about
//! which domains are served.

pub mod login;
pub mod wiring;

pub use login::LoginRouter;
pub use wiring::Pop3Factory;
