//! Routing login attempts to per-domain authentication authorities.

use std::sync::Arc;

use postern_common::{Reject, auth, split_identifier};
use postern_service::{Credentials, LoginSession, MailService, Portal};

/// Per-connection login router for a virtual-hosting POP3 server.
///
/// Both entry points are terminal: each call independently resolves a
/// full login attempt, and the transport layer does not feed the next
/// command until it has.
#[derive(Clone, Debug)]
pub struct LoginRouter {
    service: Arc<MailService>,
}

impl LoginRouter {
    #[must_use]
    pub const fn new(service: Arc<MailService>) -> Self {
        Self { service }
    }

    /// Resolve a username/password login (USER/PASS).
    ///
    /// # Errors
    ///
    /// Returns [`Reject::UnauthorizedLogin`] when the identifier's
    /// domain has no bound authority or the authority refuses the
    /// credentials. The two cases are deliberately indistinguishable.
    pub async fn authenticate_password(
        &self,
        login: &str,
        secret: impl Into<String> + Send,
    ) -> Result<LoginSession, Reject> {
        let (username, portal) = self.lookup(login)?;

        portal
            .login(Credentials::Password {
                username,
                secret: secret.into(),
            })
            .await
    }

    /// Resolve a challenge/response login (APOP). `challenge` is the
    /// banner this server issued at connection time; `response` is the
    /// client's digest over it.
    ///
    /// # Errors
    ///
    /// Returns [`Reject::UnauthorizedLogin`], exactly as
    /// [`Self::authenticate_password`] does.
    pub async fn authenticate_challenge(
        &self,
        login: &str,
        challenge: &[u8],
        response: impl Into<String> + Send,
    ) -> Result<LoginSession, Reject> {
        let (username, portal) = self.lookup(login)?;

        portal
            .login(Credentials::Challenge {
                username,
                challenge: challenge.to_vec(),
                response: response.into(),
            })
            .await
    }

    /// Split the login identifier and find the domain's authority.
    ///
    /// The credentials forwarded onwards carry the local part only;
    /// the domain is consumed here.
    fn lookup(&self, login: &str) -> Result<(String, Arc<dyn Portal>), Reject> {
        let (local, domain) = split_identifier(login, self.service.domain_specifier());

        self.service.portal(domain).map_or_else(
            || {
                // Log the real reason server-side; the wire reply hides it.
                auth!(
                    level = DEBUG,
                    domain,
                    "login for domain without authentication authority"
                );
                Err(Reject::UnauthorizedLogin)
            },
            |portal| Ok((local.to_owned(), portal)),
        )
    }
}
