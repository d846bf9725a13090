//! Availability lookup service

use tracing::{debug, warn};

use crate::{
    availability::Availability,
    error::{AppError, AppResult},
    firehose::{describe_body, Payload},
    models::BibDocument,
    repository::{CacheOptions, IlsGateway},
};

#[derive(Clone)]
pub struct AvailabilityService {
    gateway: IlsGateway,
}

impl AvailabilityService {
    pub fn new(gateway: IlsGateway) -> Self {
        Self { gateway }
    }

    /// Resolve availability for a catalog document.
    ///
    /// Connection resets, truncated responses and timeouts are returned as
    /// errors for the caller to retry. Any other fetch or parse failure
    /// means there is no availability to show: the cached response is
    /// discarded and `Ok(None)` returned.
    ///
    /// Without an explicit barcode list, the document's own barcodes (when
    /// it has any) limit the copies shown.
    pub async fn find(
        &self,
        document: BibDocument,
        barcodes: Option<Vec<String>>,
        options: &CacheOptions,
    ) -> AppResult<Option<Availability>> {
        let key = document.item_key()?;
        let barcodes = barcodes.or_else(|| {
            (!document.barcodes.is_empty()).then(|| document.barcodes.clone())
        });

        if document.uses_json_availability() {
            let payload = Payload::Json(document.availability_json.clone().unwrap_or_default());
            return match payload.decode() {
                Ok(item) => Availability::build(document, item, payload, barcodes).map(Some),
                Err(e) => {
                    warn!("Embedded availability for {} ({}): {}", key, describe_body(Some(payload.body())), e);
                    Ok(None)
                }
            };
        }

        let segments = ["items", key.as_str()];
        let body = match self.gateway.get(&segments, options).await {
            Ok(body) => body,
            Err(e) => {
                self.gateway.discard(&segments).await;
                if e.is_transient() {
                    return Err(AppError::Ils(e));
                }
                warn!("Availability for {} (FAILED): {}", key, e);
                return Ok(None);
            }
        };

        let payload = Payload::Xml(body);
        match payload.decode() {
            Ok(item) => {
                debug!("Catalog item {} has {} holding(s)", key, item.holdings.len());
                Availability::build(document, item, payload, barcodes).map(Some)
            }
            Err(e) => {
                self.gateway.discard(&segments).await;
                warn!("Availability for {} ({}): {}", key, describe_body(Some(payload.body())), e);
                Ok(None)
            }
        }
    }

    /// Drop the cached ILS response for a document
    pub async fn discard(&self, document_id: &str) -> AppResult<()> {
        let key = crate::models::document::item_key(document_id)?;
        self.gateway.discard(&["items", key.as_str()]).await;
        Ok(())
    }
}
