//! Remote address collection, as consumed by the list controller.

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Address, AddressId},
    protocol::CreateAddressResponse,
};
use tracing::debug;
use url::Url;

use crate::error::StoreError;

#[async_trait]
pub trait AddressStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Address>, StoreError>;
    /// Persists a new record and returns the identifier the store assigned.
    async fn create(&self, address: &Address) -> Result<AddressId, StoreError>;
    async fn update(&self, address: &Address) -> Result<(), StoreError>;
    async fn delete(&self, id: &AddressId) -> Result<(), StoreError>;
}

/// `AddressStore` over the `addresses` REST collection.
pub struct HttpAddressStore {
    http: Client,
    collection_url: Url,
}

impl HttpAddressStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let mut base =
            Url::parse(base_url).map_err(|e| StoreError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(format!(
                "{base_url}: not a hierarchical url"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let collection_url = base
            .join("addresses")
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http: Client::new(),
            collection_url,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: &AddressId) -> Result<Url, StoreError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.collection_url.to_string()))?
            .push(id.as_str());
        Ok(url)
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AddressStore for HttpAddressStore {
    async fn list(&self) -> Result<Vec<Address>, StoreError> {
        let response = self.http.get(self.collection_url.clone()).send().await?;
        let addresses: Vec<Address> = ensure_success(response).await?.json().await?;
        debug!(count = addresses.len(), "fetched addresses");
        Ok(addresses)
    }

    async fn create(&self, address: &Address) -> Result<AddressId, StoreError> {
        let response = self
            .http
            .post(self.collection_url.clone())
            .json(address)
            .send()
            .await?;
        let created: CreateAddressResponse = ensure_success(response).await?.json().await?;
        Ok(created.id)
    }

    async fn update(&self, address: &Address) -> Result<(), StoreError> {
        let response = self
            .http
            .put(self.collection_url.clone())
            .json(address)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &AddressId) -> Result<(), StoreError> {
        let response = self.http.delete(self.item_url(id)?).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
