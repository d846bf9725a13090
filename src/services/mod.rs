//! Business logic services

pub mod accounts;
pub mod availability;
pub mod requests;

pub use accounts::AccountsService;
pub use availability::AvailabilityService;
pub use requests::RequestsService;

use crate::repository::IlsGateway;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: AvailabilityService,
    pub requests: RequestsService,
    pub accounts: AccountsService,
    pub gateway: IlsGateway,
}

impl Services {
    /// Create all services over one gateway
    pub fn new(gateway: IlsGateway) -> Self {
        Self {
            availability: AvailabilityService::new(gateway.clone()),
            requests: RequestsService::new(gateway.clone()),
            accounts: AccountsService::new(gateway.clone()),
            gateway,
        }
    }
}
