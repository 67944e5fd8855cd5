use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use server_api::{
    create_address, delete_address, export_addresses_csv, export_christmas_card_csv,
    list_addresses, update_addresses, ApiContext,
};
use shared::{
    domain::{Address, AddressId},
    error::ApiError,
    protocol::{
        CreateAddressResponse, UpdatePayload, ADDRESSES_ROUTE, CHRISTMAS_CARD_EXPORT_ROUTE,
        CSV_EXPORT_ROUTE,
    },
};
use storage::Storage;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, prepare_database_url};

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let state = AppState {
        api: ApiContext { storage },
    };
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "address server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            ADDRESSES_ROUTE,
            get(http_list_addresses)
                .post(http_create_address)
                .put(http_update_addresses),
        )
        .route(&format!("{ADDRESSES_ROUTE}/:id"), delete(http_delete_address))
        .route(CSV_EXPORT_ROUTE, get(http_export_csv))
        .route(CHRISTMAS_CARD_EXPORT_ROUTE, get(http_export_christmas_card))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_error(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err))
}

async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.api.storage.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(error) => {
            error!(%error, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "storage unavailable")
        }
    }
}

async fn http_list_addresses(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Address>>> {
    let addresses = list_addresses(&state.api).await.map_err(api_error)?;
    Ok(Json(addresses))
}

async fn http_create_address(
    State(state): State<Arc<AppState>>,
    Json(address): Json<Address>,
) -> ApiResult<Json<CreateAddressResponse>> {
    let created = create_address(&state.api, address)
        .await
        .map_err(api_error)?;
    Ok(Json(created))
}

async fn http_update_addresses(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdatePayload>,
) -> ApiResult<StatusCode> {
    update_addresses(&state.api, payload)
        .await
        .map_err(api_error)?;
    Ok(StatusCode::OK)
}

async fn http_delete_address(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    delete_address(&state.api, &AddressId(id))
        .await
        .map_err(api_error)?;
    Ok(StatusCode::OK)
}

async fn http_export_csv(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let body = export_addresses_csv(&state.api).await.map_err(api_error)?;
    Ok(csv_attachment("addresses.csv", body))
}

async fn http_export_christmas_card(
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let body = export_christmas_card_csv(&state.api)
        .await
        .map_err(api_error)?;
    Ok(csv_attachment("christmas_card.csv", body))
}

fn csv_attachment(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment;filename={filename}"),
            ),
        ],
        body,
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
