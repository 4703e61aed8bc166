//! Login routing against a live registry: portal selection by domain,
//! uniform rejection, and local-part-only credential forwarding.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use postern_common::Reject;
use postern_pop3::LoginRouter;
use postern_service::{Credentials, LoginSession, Mailbox, MailService, Portal};

/// Test authority: accepts one password, records every credential it
/// is handed.
#[derive(Debug, Default)]
struct RecordingPortal {
    accept_secret: Option<String>,
    seen: Mutex<Vec<Credentials>>,
}

impl RecordingPortal {
    fn accepting(secret: &str) -> Self {
        Self {
            accept_secret: Some(secret.to_owned()),
            ..Self::default()
        }
    }

    fn rejecting() -> Self {
        Self::default()
    }

    fn seen(&self) -> Vec<Credentials> {
        self.seen.lock().unwrap().clone()
    }
}

#[derive(Debug)]
struct TestMailbox(String);

impl Mailbox for TestMailbox {
    fn user(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl Portal for RecordingPortal {
    async fn login(&self, credentials: Credentials) -> Result<LoginSession, Reject> {
        self.seen.lock().unwrap().push(credentials.clone());

        let accepted = match (&credentials, &self.accept_secret) {
            (Credentials::Password { secret, .. }, Some(expected)) => secret == expected,
            (Credentials::Challenge { response, .. }, Some(expected)) => response == expected,
            _ => false,
        };

        if accepted {
            Ok(LoginSession::new(
                Box::new(TestMailbox(credentials.username().to_owned())),
                Box::new(|| {}),
            ))
        } else {
            Err(Reject::UnauthorizedLogin)
        }
    }
}

fn router_with(portal: Arc<RecordingPortal>, domain: &str) -> LoginRouter {
    let service = MailService::builder("mx.example")
        .with_portal(domain, portal)
        .build();

    LoginRouter::new(Arc::new(service))
}

#[tokio::test]
async fn password_login_reaches_the_domain_portal() {
    let portal = Arc::new(RecordingPortal::accepting("hunter2"));
    let router = router_with(Arc::clone(&portal), "tenant.example");

    let session = router
        .authenticate_password("bob@tenant.example", "hunter2")
        .await
        .unwrap();

    assert_eq!(session.mailbox.user(), "bob");
}

#[tokio::test]
async fn credentials_carry_local_part_only() {
    let portal = Arc::new(RecordingPortal::accepting("hunter2"));
    let router = router_with(Arc::clone(&portal), "tenant.example");

    router
        .authenticate_password("bob@tenant.example", "hunter2")
        .await
        .unwrap();

    assert_eq!(
        portal.seen(),
        vec![Credentials::Password {
            username: "bob".to_owned(),
            secret: "hunter2".to_owned(),
        }]
    );
}

#[tokio::test]
async fn unserved_domain_is_unauthorized() {
    let portal = Arc::new(RecordingPortal::accepting("hunter2"));
    let router = router_with(Arc::clone(&portal), "tenant.example");

    let err = router
        .authenticate_password("bob@unknown.tld", "hunter2")
        .await
        .unwrap_err();

    assert_eq!(err, Reject::UnauthorizedLogin);
    // The portal was never consulted for a foreign domain.
    assert!(portal.seen().is_empty());
}

#[tokio::test]
async fn portal_rejection_is_indistinguishable_from_unserved_domain() {
    let portal = Arc::new(RecordingPortal::rejecting());
    let router = router_with(portal, "tenant.example");

    let rejected = router
        .authenticate_password("bob@tenant.example", "wrong")
        .await
        .unwrap_err();

    let unserved = router
        .authenticate_password("bob@unknown.tld", "wrong")
        .await
        .unwrap_err();

    assert_eq!(rejected, unserved);
}

#[tokio::test]
async fn bare_identifier_belongs_to_the_empty_domain() {
    // Single-tenant deployments bind their portal to the empty domain
    // so logins without a domain specifier resolve.
    let portal = Arc::new(RecordingPortal::accepting("hunter2"));
    let router = router_with(Arc::clone(&portal), "");

    let session = router.authenticate_password("bob", "hunter2").await.unwrap();

    assert_eq!(session.mailbox.user(), "bob");
}

#[tokio::test]
async fn split_happens_on_first_specifier_only() {
    let portal = Arc::new(RecordingPortal::accepting("hunter2"));
    let router = router_with(Arc::clone(&portal), "b@c");

    router.authenticate_password("a@b@c", "hunter2").await.unwrap();

    assert_eq!(portal.seen()[0].username(), "a");
}

#[tokio::test]
async fn challenge_login_forwards_challenge_and_response() {
    let portal = Arc::new(RecordingPortal::accepting("digest-value"));
    let router = router_with(Arc::clone(&portal), "tenant.example");

    let challenge = b"<1896.697170952@mx.example>";
    let session = router
        .authenticate_challenge("bob@tenant.example", challenge, "digest-value")
        .await
        .unwrap();

    assert_eq!(session.mailbox.user(), "bob");
    assert_eq!(
        portal.seen(),
        vec![Credentials::Challenge {
            username: "bob".to_owned(),
            challenge: challenge.to_vec(),
            response: "digest-value".to_owned(),
        }]
    );
}

#[tokio::test]
async fn custom_domain_specifier_is_honoured() {
    let portal = Arc::new(RecordingPortal::accepting("hunter2"));
    let service = MailService::builder("mx.example")
        .with_domain_specifier('%')
        .with_portal("tenant.example", Arc::clone(&portal) as Arc<dyn Portal>)
        .build();
    let router = LoginRouter::new(Arc::new(service));

    router
        .authenticate_password("bob%tenant.example", "hunter2")
        .await
        .unwrap();

    assert_eq!(portal.seen()[0].username(), "bob");
}
