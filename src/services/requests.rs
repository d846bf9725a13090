//! Hold and renewal requests
//!
//! Requests are POSTed to the ILS and never cached or retried. The ILS
//! reports a rejection either with an error status or with a
//! `FirehoseViolation` body on an otherwise successful response.

use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    firehose::decode_violation,
    models::Violation,
    repository::{HttpReply, IlsGateway},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Hold,
    Renew,
}

impl RequestKind {
    /// Verb used in the "no items" message
    fn verb(self) -> &'static str {
        match self {
            RequestKind::Hold => "request",
            RequestKind::Renew => "renew",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            RequestKind::Hold => "Unable to place hold",
            RequestKind::Renew => "Unable to renew",
        }
    }

    fn error(self, message: String) -> AppError {
        match self {
            RequestKind::Hold => AppError::Hold(message),
            RequestKind::Renew => AppError::Renew(message),
        }
    }

    /// Patron-facing explanation for a rejection
    fn message(self, violation: Option<&Violation>) -> String {
        match violation {
            Some(v) if v.message_contains("no items") => format!("There were no items to {}", self.verb()),
            Some(v) if v.message_contains("does not exist") => {
                "This item is not available for requests yet".to_string()
            }
            Some(Violation {
                message: Some(message),
                ..
            }) if !message.trim().is_empty() => message.trim().to_string(),
            _ => self.fallback().to_string(),
        }
    }
}

/// The violation carried by a rejected reply, or `Ok` if the ILS accepted it
fn check_reply(reply: &HttpReply) -> Result<(), Option<Violation>> {
    let violation = decode_violation(&reply.body).ok().flatten();
    match violation {
        None if reply.is_success() => Ok(()),
        violation => Err(violation),
    }
}

#[derive(Clone)]
pub struct RequestsService {
    gateway: IlsGateway,
}

impl RequestsService {
    pub fn new(gateway: IlsGateway) -> Self {
        Self { gateway }
    }

    /// Place a hold on a catalog item for pickup at a library
    pub async fn place_hold(
        &self,
        computing_id: &str,
        catalog_key: &str,
        pickup_library: &str,
        call_number: &str,
    ) -> AppResult<()> {
        let form = vec![
            ("computingId".to_string(), computing_id.to_string()),
            ("catalogKey".to_string(), catalog_key.to_string()),
            ("pickupLibraryId".to_string(), pickup_library.to_string()),
            ("callNumber".to_string(), call_number.to_string()),
        ];
        self.submit("hold", &form, RequestKind::Hold).await?;
        info!("Hold placed for {} on {} ({})", computing_id, catalog_key, call_number);

        self.gateway.discard(&["items", catalog_key]).await;
        self.discard_account(computing_id).await;
        Ok(())
    }

    /// Renew one checked-out copy
    pub async fn renew(&self, computing_id: &str, barcode: &str) -> AppResult<()> {
        let form = vec![
            ("computingId".to_string(), computing_id.to_string()),
            ("itemBarcode".to_string(), barcode.to_string()),
        ];
        self.submit("renew", &form, RequestKind::Renew).await?;
        info!("Renewed {} for {}", barcode, computing_id);
        self.discard_account(computing_id).await;
        Ok(())
    }

    /// Renew everything the user has checked out
    pub async fn renew_all(&self, computing_id: &str) -> AppResult<()> {
        let form = vec![("computingId".to_string(), computing_id.to_string())];
        self.submit("renewAll", &form, RequestKind::Renew).await?;
        info!("Renewed all checkouts for {}", computing_id);
        self.discard_account(computing_id).await;
        Ok(())
    }

    async fn submit(&self, action: &str, form: &[(String, String)], kind: RequestKind) -> AppResult<()> {
        let reply = self.gateway.post(&["request", action], form).await?;
        check_reply(&reply).map_err(|violation| {
            warn!(
                "ILS rejected {} (status {}): {:?}",
                action,
                reply.status,
                violation.as_ref().and_then(|v| v.message.as_deref())
            );
            kind.error(kind.message(violation.as_ref()))
        })
    }

    async fn discard_account(&self, computing_id: &str) {
        self.gateway.discard(&["users", computing_id]).await;
        for list in ["checkouts", "holds", "reserves"] {
            self.gateway.discard(&["users", computing_id, list]).await;
        }
    }
}
