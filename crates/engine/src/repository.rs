//! Keyed stores for securities, brokers and shareholders
//!
//! Created once at process start and handed to the handler; the per-entry
//! locking of the maps is what serializes request processing per security
//! while leaving different securities independent.

use dashmap::DashMap;
use dashmap::mapref::one::{Ref, RefMut};

use hermes_core::{Broker, BrokerId, Isin, Shareholder, ShareholderId};

use crate::security::Security;

#[derive(Debug, Default)]
pub struct SecurityRepository {
    securities: DashMap<Isin, Security>,
}

impl SecurityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, security: Security) {
        self.securities.insert(security.isin().to_string(), security);
    }

    pub fn find_by_isin(&self, isin: &str) -> Option<Ref<'_, Isin, Security>> {
        self.securities.get(isin)
    }

    /// Exclusive access to one security; the guard serializes all request
    /// processing for that instrument
    pub fn find_by_isin_mut(&self, isin: &str) -> Option<RefMut<'_, Isin, Security>> {
        self.securities.get_mut(isin)
    }

    pub fn contains(&self, isin: &str) -> bool {
        self.securities.contains_key(isin)
    }

    pub fn clear(&self) {
        self.securities.clear();
    }
}

#[derive(Debug, Default)]
pub struct BrokerRepository {
    brokers: DashMap<BrokerId, Broker>,
}

impl BrokerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, broker: Broker) {
        self.brokers.insert(broker.id(), broker);
    }

    pub fn find_by_id(&self, id: BrokerId) -> Option<Ref<'_, BrokerId, Broker>> {
        self.brokers.get(&id)
    }

    pub fn find_by_id_mut(&self, id: BrokerId) -> Option<RefMut<'_, BrokerId, Broker>> {
        self.brokers.get_mut(&id)
    }

    pub fn contains(&self, id: BrokerId) -> bool {
        self.brokers.contains_key(&id)
    }

    pub fn clear(&self) {
        self.brokers.clear();
    }
}

#[derive(Debug, Default)]
pub struct ShareholderRepository {
    shareholders: DashMap<ShareholderId, Shareholder>,
}

impl ShareholderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, shareholder: Shareholder) {
        self.shareholders.insert(shareholder.id(), shareholder);
    }

    pub fn find_by_id(&self, id: ShareholderId) -> Option<Ref<'_, ShareholderId, Shareholder>> {
        self.shareholders.get(&id)
    }

    pub fn find_by_id_mut(
        &self,
        id: ShareholderId,
    ) -> Option<RefMut<'_, ShareholderId, Shareholder>> {
        self.shareholders.get_mut(&id)
    }

    pub fn contains(&self, id: ShareholderId) -> bool {
        self.shareholders.contains_key(&id)
    }

    pub fn clear(&self) {
        self.shareholders.clear();
    }
}
