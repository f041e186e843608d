//! HTTP client for the operations API
//!
//! Thin typed wrapper over `reqwest`: success responses are plain JSON
//! payloads, failures carry the `{code, message, details?}` envelope and
//! are surfaced as [`ClientError::Api`]. A 401 maps to
//! [`ClientError::Unauthorized`] so callers can drop their session.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::OrderStatus;
use shared::analytics::{AnalyticsSummary, SalesAnalytics};
use shared::models::{
    Customer, CustomerCreate, CustomerUpdate, Driver, DriverCreate, DriverStatus, DriverUpdate,
    LoginForm, Order, OrderCreate, OrderDriverAssign, OrderStatusUpdate, Restaurant,
    RestaurantCreate, RestaurantUpdate, Settings, SettingsUpdate, TokenResponse, UserCreate,
    UserInfo,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Error response envelope sent by the server
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    code: Option<u16>,
    message: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// Filters for the order listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// `desc` (default) or `asc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Body for the sales analytics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SalesQuery {
    /// all | today | week | month | custom
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
}

/// Operations API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current bearer token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Attach a bearer token to subsequent requests
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the bearer token (logged-out state)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await?;
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text)
            && api_err.code.is_some_and(|c| c != 0)
        {
            return Err(ClientError::Api {
                code: api_err.code.unwrap_or(1),
                message: api_err.message,
                details: api_err.details,
            });
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => Err(ClientError::InvalidResponse(format!(
                "unexpected status {status}: {text}"
            ))),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.authorize(self.client.get(self.url(path))).send().await?;
        self.handle_response(response).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let response = self
            .authorize(self.client.get(self.url(path)).query(query))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .authorize(self.client.post(self.url(path)).json(body))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .authorize(self.client.put(self.url(path)).json(body))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn delete_no_content(&self, path: &str) -> ClientResult<()> {
        let response = self
            .authorize(self.client.delete(self.url(path)))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        // Reuse the envelope handling for the error path
        self.handle_response::<serde_json::Value>(response)
            .await
            .map(|_| ())
    }

    // ==================== Auth ====================

    /// POST /api/auth/token — on success the token is retained for
    /// subsequent requests
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<TokenResponse> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.url("/api/auth/token"))
            .form(&form)
            .send()
            .await?;
        let token: TokenResponse = self.handle_response(response).await?;
        self.token = Some(token.access_token.clone());
        Ok(token)
    }

    /// POST /api/auth/register
    pub async fn register(&self, req: &UserCreate) -> ClientResult<UserInfo> {
        self.post("/api/auth/register", req).await
    }

    /// GET /api/auth/users/me — the validate-on-load session check
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("/api/auth/users/me").await
    }

    /// GET /api/auth/users (admin)
    pub async fn list_users(&self) -> ClientResult<Vec<UserInfo>> {
        self.get("/api/auth/users").await
    }

    // ==================== Orders ====================

    /// GET /api/orders
    pub async fn list_orders(&self, query: &OrderListQuery) -> ClientResult<Vec<Order>> {
        self.get_with_query("/api/orders", query).await
    }

    /// GET /api/orders/{id}
    pub async fn get_order(&self, id: i64) -> ClientResult<Order> {
        self.get(&format!("/api/orders/{id}")).await
    }

    /// POST /api/orders
    pub async fn create_order(&self, req: &OrderCreate) -> ClientResult<Order> {
        self.post("/api/orders", req).await
    }

    /// PUT /api/orders/{id}/status
    pub async fn update_order_status(&self, id: i64, status: OrderStatus) -> ClientResult<Order> {
        self.put(&format!("/api/orders/{id}/status"), &OrderStatusUpdate { status })
            .await
    }

    /// PUT /api/orders/{id}/assign-driver
    pub async fn assign_driver(
        &self,
        id: i64,
        driver_id: i64,
        driver_name: &str,
    ) -> ClientResult<Order> {
        let body = OrderDriverAssign {
            driver_id,
            driver_name: driver_name.to_string(),
        };
        self.put(&format!("/api/orders/{id}/assign-driver"), &body)
            .await
    }

    // ==================== Drivers ====================

    /// GET /api/drivers
    pub async fn list_drivers(&self, status: Option<DriverStatus>) -> ClientResult<Vec<Driver>> {
        match status {
            Some(status) => {
                self.get_with_query("/api/drivers", &[("status", status.as_str())])
                    .await
            }
            None => self.get("/api/drivers").await,
        }
    }

    /// POST /api/drivers
    pub async fn create_driver(&self, req: &DriverCreate) -> ClientResult<Driver> {
        self.post("/api/drivers", req).await
    }

    /// PUT /api/drivers/{id}
    pub async fn update_driver(&self, id: i64, req: &DriverUpdate) -> ClientResult<Driver> {
        self.put(&format!("/api/drivers/{id}"), req).await
    }

    /// DELETE /api/drivers/{id} (admin)
    pub async fn delete_driver(&self, id: i64) -> ClientResult<()> {
        self.delete_no_content(&format!("/api/drivers/{id}")).await
    }

    // ==================== Restaurants ====================

    /// GET /api/restaurants
    pub async fn list_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        self.get("/api/restaurants").await
    }

    /// POST /api/restaurants
    pub async fn create_restaurant(&self, req: &RestaurantCreate) -> ClientResult<Restaurant> {
        self.post("/api/restaurants", req).await
    }

    /// PUT /api/restaurants/{id}
    pub async fn update_restaurant(
        &self,
        id: i64,
        req: &RestaurantUpdate,
    ) -> ClientResult<Restaurant> {
        self.put(&format!("/api/restaurants/{id}"), req).await
    }

    /// DELETE /api/restaurants/{id} (admin)
    pub async fn delete_restaurant(&self, id: i64) -> ClientResult<()> {
        self.delete_no_content(&format!("/api/restaurants/{id}"))
            .await
    }

    // ==================== Customers ====================

    /// GET /api/customers
    pub async fn list_customers(&self) -> ClientResult<Vec<Customer>> {
        self.get("/api/customers").await
    }

    /// POST /api/customers
    pub async fn create_customer(&self, req: &CustomerCreate) -> ClientResult<Customer> {
        self.post("/api/customers", req).await
    }

    /// PUT /api/customers/{id}
    pub async fn update_customer(&self, id: i64, req: &CustomerUpdate) -> ClientResult<Customer> {
        self.put(&format!("/api/customers/{id}"), req).await
    }

    /// DELETE /api/customers/{id} (admin)
    pub async fn delete_customer(&self, id: i64) -> ClientResult<()> {
        self.delete_no_content(&format!("/api/customers/{id}"))
            .await
    }

    // ==================== Settings ====================

    /// GET /api/settings
    pub async fn get_settings(&self) -> ClientResult<Settings> {
        self.get("/api/settings").await
    }

    /// POST /api/settings (admin)
    pub async fn update_settings(&self, req: &SettingsUpdate) -> ClientResult<Settings> {
        self.post("/api/settings", req).await
    }

    // ==================== Analytics ====================

    /// POST /api/analytics/sales
    pub async fn sales_analytics(&self, query: &SalesQuery) -> ClientResult<SalesAnalytics> {
        self.post("/api/analytics/sales", query).await
    }

    /// GET /api/analytics/dashboard
    pub async fn dashboard(&self, period: &str) -> ClientResult<AnalyticsSummary> {
        self.get_with_query("/api/analytics/dashboard", &[("period", period)])
            .await
    }
}
