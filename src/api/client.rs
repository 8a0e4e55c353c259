use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::address::Address;
use crate::models::delivery::Delivery;
use crate::models::payment::PaymentRequest;
use crate::track::poller::DeliveryStore;

/// Typed client for the delivery REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Internal(format!("http client init failed: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_delivery(&self, id: Uuid) -> Result<Delivery, AppError> {
        let url = format!("{}/api/deliveries/{id}", self.base_url);
        let response = self.http.get(&url).send().await.map_err(transient)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!("delivery {id} not found"))),
            status if status.is_success() => response
                .json::<Delivery>()
                .await
                .map_err(|err| AppError::InvalidResponse(format!("delivery body: {err}"))),
            status => Err(AppError::Transient(format!(
                "delivery fetch returned {status}"
            ))),
        }
    }

    pub async fn list_addresses(&self, user_id: Uuid) -> Result<Vec<Address>, AppError> {
        let url = format!("{}/api/addresses/{user_id}", self.base_url);
        let response = self.http.get(&url).send().await.map_err(transient)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!(
                "addresses for user {user_id} not found"
            ))),
            status if status.is_success() => response
                .json::<Vec<Address>>()
                .await
                .map_err(|err| AppError::InvalidResponse(format!("address body: {err}"))),
            status => Err(AppError::Transient(format!(
                "address fetch returned {status}"
            ))),
        }
    }

    /// Submits a simulated payment. A non-2xx response carries the
    /// server-provided message when one is present; callers surface it as a
    /// toast and keep the form editable for retry.
    pub async fn submit_payment(
        &self,
        id: Uuid,
        payment: &PaymentRequest,
    ) -> Result<(), AppError> {
        let url = format!("{}/api/deliveries/{id}/payment", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(payment)
            .send()
            .await
            .map_err(transient)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| Some(body.get("error")?.as_str()?.to_string()))
            .unwrap_or_else(|| "payment could not be processed".to_string());

        Err(AppError::Payment {
            status: status.as_u16(),
            message,
        })
    }
}

fn transient(err: reqwest::Error) -> AppError {
    AppError::Transient(err.to_string())
}

impl DeliveryStore for ApiClient {
    fn fetch_delivery(&self, id: Uuid) -> impl Future<Output = Result<Delivery, AppError>> + Send {
        let client = self.clone();
        async move { client.fetch_delivery(id).await }
    }
}
