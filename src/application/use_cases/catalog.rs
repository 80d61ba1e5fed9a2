//! In-memory working set of listings for one editing session.
//!
//! Records are replaced wholesale on save; there is no partial merge.
//! Ids are random UUIDs minted at creation and never reused, so a removed
//! id cannot come back.

use crate::application::use_cases::ad_validation::validate_ad;
use crate::domain::ad::Ad;
use crate::domain::error::{AppError, Result};

/// The set of ads currently being edited.
#[derive(Debug, Clone, Default)]
pub struct AdCatalog {
    ads: Vec<Ad>,
}

impl AdCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new ad, or replace the stored ad carrying the same id.
    /// Replacement keeps the ad's position in the list.
    pub fn save(&mut self, ad: Ad) {
        match self.ads.iter_mut().find(|existing| existing.id == ad.id) {
            Some(slot) => *slot = ad,
            None => self.ads.push(ad),
        }
    }

    /// Remove an ad by id, returning it.
    pub fn remove(&mut self, id: &str) -> Result<Ad> {
        match self.ads.iter().position(|ad| ad.id == id) {
            Some(idx) => Ok(self.ads.remove(idx)),
            None => Err(AppError::NotFound(format!("No ad with id {}", id))),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Ad> {
        self.ads.iter().find(|ad| ad.id == id)
    }

    pub fn ads(&self) -> &[Ad] {
        &self.ads
    }

    pub fn len(&self) -> usize {
        self.ads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ads.is_empty()
    }

    /// Swap the whole working set, e.g. after a successful import.
    pub fn replace_all(&mut self, ads: Vec<Ad>) {
        tracing::debug!(count = ads.len(), "Replacing catalog working set");
        self.ads = ads;
    }

    /// How many ads would survive a publish attempt as-is.
    pub fn publishable_count(&self) -> usize {
        self.ads
            .iter()
            .filter(|ad| validate_ad(ad).is_empty())
            .count()
    }
}
