use shared::{
    domain::{christmas_fields, creation_fields, Address, AddressId},
    error::ApiError,
    protocol::{CreateAddressResponse, UpdatePayload},
};
use storage::Storage;
use tracing::{info, warn};

pub mod csv_export;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub async fn list_addresses(ctx: &ApiContext) -> Result<Vec<Address>, ApiError> {
    ctx.storage.list_addresses().await.map_err(internal)
}

pub async fn create_address(
    ctx: &ApiContext,
    address: Address,
) -> Result<CreateAddressResponse, ApiError> {
    let id = ctx
        .storage
        .create_address(&address)
        .await
        .map_err(internal)?;
    info!(address_id = %id, "created address");
    Ok(CreateAddressResponse { id })
}

/// Applies every address in the payload. All of them are attempted even when
/// one is missing; the call fails if any of them did not land.
pub async fn update_addresses(ctx: &ApiContext, payload: UpdatePayload) -> Result<(), ApiError> {
    let addresses = payload.into_vec();
    if addresses.is_empty() {
        return Err(ApiError::validation("update requires at least one address"));
    }
    if addresses.iter().any(|a| a.id.is_none()) {
        return Err(ApiError::validation("every updated address needs an _id"));
    }

    let mut missing = Vec::new();
    for address in &addresses {
        let Some(id) = address.id.as_ref() else {
            continue;
        };
        let updated = ctx
            .storage
            .update_address(id, address)
            .await
            .map_err(internal)?;
        if !updated {
            missing.push(id.to_string());
        }
    }

    if missing.is_empty() {
        info!(count = addresses.len(), "updated addresses");
        Ok(())
    } else {
        warn!(missing = ?missing, "update referenced unknown addresses");
        Err(ApiError::not_found(format!(
            "no address with id {}",
            missing.join(", ")
        )))
    }
}

pub async fn delete_address(ctx: &ApiContext, id: &AddressId) -> Result<(), ApiError> {
    let deleted = ctx.storage.delete_address(id).await.map_err(internal)?;
    if deleted {
        info!(address_id = %id, "deleted address");
        Ok(())
    } else {
        Err(ApiError::not_found(format!("no address with id {id}")))
    }
}

pub async fn export_addresses_csv(ctx: &ApiContext) -> Result<String, ApiError> {
    let addresses = ctx.storage.list_addresses().await.map_err(internal)?;
    Ok(csv_export::render(&addresses, creation_fields()))
}

pub async fn export_christmas_card_csv(ctx: &ApiContext) -> Result<String, ApiError> {
    let addresses = ctx
        .storage
        .list_christmas_card_addresses()
        .await
        .map_err(internal)?;
    Ok(csv_export::render(&addresses, christmas_fields()))
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::internal(err.to_string())
}
