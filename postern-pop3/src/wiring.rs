//! Connection wiring for the POP3 side.

use std::{net::SocketAddr, sync::Arc};

use postern_common::auth;
use postern_service::MailService;

use crate::login::LoginRouter;

/// Factory binding accepted POP3 connections to a mail service.
///
/// Pure dependency injection: the router it hands out carries the
/// shared service reference and nothing else.
#[derive(Clone, Debug)]
pub struct Pop3Factory {
    service: Arc<MailService>,
}

impl Pop3Factory {
    #[must_use]
    pub const fn new(service: Arc<MailService>) -> Self {
        Self { service }
    }

    /// Bind a freshly accepted connection to the service.
    #[must_use]
    pub fn connection(&self, peer: SocketAddr) -> LoginRouter {
        auth!(level = DEBUG, %peer, "connection accepted");

        LoginRouter::new(Arc::clone(&self.service))
    }
}
