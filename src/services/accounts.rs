//! Patron accounts and ILS reference lists

use crate::{
    error::AppResult,
    firehose::{decode_libraries, decode_locations, decode_user},
    models::{Checkout, Hold, Library, Location, Reserve, User},
    repository::{CacheOptions, IlsGateway},
};

#[derive(Clone)]
pub struct AccountsService {
    gateway: IlsGateway,
}

impl AccountsService {
    pub fn new(gateway: IlsGateway) -> Self {
        Self { gateway }
    }

    pub async fn user(&self, computing_id: &str, options: &CacheOptions) -> AppResult<User> {
        self.gateway
            .fetch_decoded(&["users", computing_id], options, decode_user)
            .await
    }

    /// The user document with its checkout list filled in
    pub async fn user_with_checkouts(&self, computing_id: &str, options: &CacheOptions) -> AppResult<User> {
        self.gateway
            .fetch_decoded(&["users", computing_id, "checkouts"], options, decode_user)
            .await
    }

    pub async fn checkouts(&self, computing_id: &str, options: &CacheOptions) -> AppResult<Vec<Checkout>> {
        Ok(self.user_with_checkouts(computing_id, options).await?.checkouts)
    }

    pub async fn holds(&self, computing_id: &str, options: &CacheOptions) -> AppResult<Vec<Hold>> {
        let user = self
            .gateway
            .fetch_decoded(&["users", computing_id, "holds"], options, decode_user)
            .await?;
        Ok(user.holds)
    }

    pub async fn reserves(&self, computing_id: &str, options: &CacheOptions) -> AppResult<Vec<Reserve>> {
        let user = self
            .gateway
            .fetch_decoded(&["users", computing_id, "reserves"], options, decode_user)
            .await?;
        Ok(user.reserves)
    }

    pub async fn libraries(&self, options: &CacheOptions) -> AppResult<Vec<Library>> {
        self.gateway
            .fetch_decoded(&["list", "libraries"], options, decode_libraries)
            .await
    }

    pub async fn locations(&self, options: &CacheOptions) -> AppResult<Vec<Location>> {
        self.gateway
            .fetch_decoded(&["list", "locations"], options, decode_locations)
            .await
    }
}
