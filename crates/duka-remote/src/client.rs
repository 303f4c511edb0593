//! # Remote Store Client
//!
//! Thin REST client for the store API. Every request carries the
//! business id header so one backend can serve many shops.
//!
//! ## Endpoints
//! ```text
//! GET    /api/products          full catalog for this business
//! POST   /api/products          create a product
//! PUT    /api/products/{id}     partial product update
//! DELETE /api/products/{id}     remove a product
//! POST   /api/sales             record a finalized sale
//! POST   /api/users/login       PIN login, returns the cashier identity
//! ```

use duka_core::{validation, Cashier, Product, Sale, DEFAULT_BUSINESS_ID};
use duka_store::ProductPatch;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};

/// Header carrying the shop identity on every request.
const BUSINESS_ID_HEADER: &str = "x-business-id";

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    pin: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
    user: Option<Cashier>,
}

// =============================================================================
// Client
// =============================================================================

/// REST client for the remote store API.
#[derive(Debug, Clone)]
pub struct RemoteApi {
    http: reqwest::Client,
    base_url: String,
    business_id: i64,
}

impl RemoteApi {
    /// Creates a client for the default business.
    pub fn new(base_url: impl Into<String>) -> Self {
        RemoteApi::for_business(base_url, DEFAULT_BUSINESS_ID)
    }

    /// Creates a client scoped to one business.
    pub fn for_business(base_url: impl Into<String>, business_id: i64) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        RemoteApi {
            http: reqwest::Client::new(),
            base_url,
            business_id,
        }
    }

    pub fn business_id(&self) -> i64 {
        self.business_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response, path: &str) -> RemoteResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            })
        }
    }

    /// Fetches the full catalog for this business.
    pub async fn fetch_products(&self) -> RemoteResult<Vec<Product>> {
        let path = "/api/products";
        let response = self
            .http
            .get(self.url(path))
            .header(BUSINESS_ID_HEADER, self.business_id)
            .send()
            .await?;
        let products: Vec<Product> = Self::check(response, path).await?.json().await?;
        debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }

    pub async fn create_product(&self, product: &Product) -> RemoteResult<()> {
        let path = "/api/products";
        let response = self
            .http
            .post(self.url(path))
            .header(BUSINESS_ID_HEADER, self.business_id)
            .json(product)
            .send()
            .await?;
        Self::check(response, path).await?;
        Ok(())
    }

    pub async fn update_product(&self, id: i64, patch: &ProductPatch) -> RemoteResult<()> {
        let path = format!("/api/products/{}", id);
        let response = self
            .http
            .put(self.url(&path))
            .header(BUSINESS_ID_HEADER, self.business_id)
            .json(patch)
            .send()
            .await?;
        Self::check(response, &path).await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: i64) -> RemoteResult<()> {
        let path = format!("/api/products/{}", id);
        let response = self
            .http
            .delete(self.url(&path))
            .header(BUSINESS_ID_HEADER, self.business_id)
            .send()
            .await?;
        Self::check(response, &path).await?;
        Ok(())
    }

    pub async fn create_sale(&self, sale: &Sale) -> RemoteResult<()> {
        let path = "/api/sales";
        let response = self
            .http
            .post(self.url(path))
            .header(BUSINESS_ID_HEADER, self.business_id)
            .json(sale)
            .send()
            .await?;
        Self::check(response, path).await?;
        debug!(sale_id = %sale.id, "sale uploaded");
        Ok(())
    }

    /// Exchanges a PIN for the cashier identity.
    ///
    /// The PIN shape is checked locally first so a typo never leaves the
    /// terminal; verification itself is the remote service's job.
    pub async fn login(&self, pin: &str) -> RemoteResult<Cashier> {
        validation::validate_pin(pin)?;

        let path = "/api/users/login";
        let response = self
            .http
            .post(self.url(path))
            .header(BUSINESS_ID_HEADER, self.business_id)
            .json(&LoginRequest { pin })
            .send()
            .await?;
        let body: LoginResponse = Self::check(response, path).await?.json().await?;
        match body {
            LoginResponse {
                success: true,
                user: Some(user),
            } => Ok(user),
            LoginResponse { success: true, .. } => {
                Err(RemoteError::BadResponse("login succeeded without a user".into()))
            }
            _ => Err(RemoteError::LoginRejected),
        }
    }
}
