//! HTTP Handlers

use auth::middleware::AuthUser;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::http::AppJson;
use std::sync::Arc;

use crate::application::ProductCatalogUseCase;
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;
use crate::presentation::dto::{
    CreateProductRequest, ProductResponse, UpdateProductRequest, product_public_id,
};

#[derive(Clone)]
pub struct CatalogAppState<P>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<P>,
}

/// GET /products
pub async fn list_products<P>(
    State(state): State<CatalogAppState<P>>,
) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let products = ProductCatalogUseCase::new(state.repo.clone()).list().await?;

    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// GET /products/{uuid}
pub async fn get_product<P>(
    State(state): State<CatalogAppState<P>>,
    Path(uuid): Path<String>,
) -> CatalogResult<Json<ProductResponse>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let public_id = product_public_id(&uuid)?;

    let product = ProductCatalogUseCase::new(state.repo.clone())
        .get(&public_id)
        .await?;

    Ok(Json(ProductResponse::from(&product)))
}

/// POST /products (admin)
pub async fn create_product<P>(
    State(state): State<CatalogAppState<P>>,
    auth_user: AuthUser,
    AppJson(req): AppJson<CreateProductRequest>,
) -> CatalogResult<(StatusCode, Json<ProductResponse>)>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let input = req.validate()?;

    let product = ProductCatalogUseCase::new(state.repo.clone())
        .create(input, auth_user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

/// PATCH /products/{uuid} (admin)
pub async fn update_product<P>(
    State(state): State<CatalogAppState<P>>,
    Path(uuid): Path<String>,
    AppJson(req): AppJson<UpdateProductRequest>,
) -> CatalogResult<Json<ProductResponse>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let public_id = product_public_id(&uuid)?;
    let input = req.validate()?;

    let product = ProductCatalogUseCase::new(state.repo.clone())
        .update(&public_id, input)
        .await?;

    Ok(Json(ProductResponse::from(&product)))
}

/// DELETE /products/{uuid} (admin)
pub async fn delete_product<P>(
    State(state): State<CatalogAppState<P>>,
    Path(uuid): Path<String>,
) -> CatalogResult<StatusCode>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let public_id = product_public_id(&uuid)?;

    ProductCatalogUseCase::new(state.repo.clone())
        .delete(&public_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
