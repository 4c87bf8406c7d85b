//! Category Commands
//!
//! REST bindings for the `/categories` resource.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use super::{check_status, decode_records, finish_write};
use crate::config::ApiConfig;
use crate::error::CatalogResult;
use crate::models::{CategoryId, CategoryPatch, CategoryRecord, ListResponse, NewCategory, Page};
use crate::repository::CategoryRepository;

pub const TENANT_HEADER: &str = "X-Tenant-ID";

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct PageArgs {
    page: u32,
    size: u32,
}

// ========================
// Repository
// ========================

/// Category repository backed by the REST API
#[derive(Clone)]
pub struct HttpCategoryRepository {
    client: Client,
    config: ApiConfig,
}

impl HttpCategoryRepository {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.normalized(),
        }
    }

    fn category_path(id: &CategoryId) -> String {
        format!("categories/{}", id)
    }

    /// Request with tenant and auth headers applied
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.config.endpoint(path));
        if let Some(tenant) = &self.config.tenant_id {
            builder = builder.header(TENANT_HEADER, tenant);
        }
        if let Some(token) = &self.config.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

#[async_trait(?Send)]
impl CategoryRepository for HttpCategoryRepository {
    async fn list_page(&self, page: u32, size: u32) -> CatalogResult<Page<CategoryRecord>> {
        let response = self
            .request(Method::GET, "categories")
            .query(&PageArgs { page, size })
            .send()
            .await?;
        let body: ListResponse<Value> = check_status(response).await?.json().await?;
        Ok(Page::from(body).map_items(decode_records))
    }

    async fn create(&self, body: &NewCategory) -> CatalogResult<Option<CategoryRecord>> {
        log::info!("[API] Creating category {:?}", body.name);
        let response = self.request(Method::POST, "categories").json(body).send().await?;
        finish_write(response).await
    }

    async fn update(&self, id: &CategoryId, patch: &CategoryPatch) -> CatalogResult<Option<CategoryRecord>> {
        log::info!("[API] Updating category {}", id);
        let response = self
            .request(Method::PATCH, &Self::category_path(id))
            .json(patch)
            .send()
            .await?;
        finish_write(response).await
    }

    async fn delete(&self, id: &CategoryId) -> CatalogResult<()> {
        log::info!("[API] Deleting category {}", id);
        let response = self.request(Method::DELETE, &Self::category_path(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
