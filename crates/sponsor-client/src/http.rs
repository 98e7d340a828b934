//! `reqwest` implementation of the backend traits.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use sponsor_core::api::{
    CheckoutSuccessRequest, CheckoutSuccessResponse, MessageResponse, PackageDetails,
    PaymentIntent, PaymentIntentRequest, RedirectResponse, SponsorshipRequest,
};
use sponsor_core::routes::Method;
use sponsor_core::{ClientError, Endpoint, Failure, FailureKind, Result};

use crate::{EventsApi, FragmentApi, PaymentsApi, SponsorshipApi};

/// Backend reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    origin: String,
}

impl HttpBackend {
    /// Create a backend rooted at `origin` (e.g. `https://sponsormatch.example`)
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_client(Client::new(), origin)
    }

    pub fn with_client(client: Client, origin: impl Into<String>) -> Self {
        Self {
            client,
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn request(&self, endpoint: &Endpoint) -> RequestBuilder {
        let url = endpoint.url(&self.origin);
        tracing::debug!(%endpoint, "backend request");
        match endpoint.method() {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        }
    }

    /// Send and fail on any non-2xx status
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_failure(Failure::status(status.as_u16(), body)))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let response = self.send(self.request(endpoint)).await?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, endpoint: &Endpoint, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(endpoint).json(body)).await?;
        read_json(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let response = self.send(self.request(endpoint)).await?;
        read_json(response).await
    }
}

/// Map a transport error into the failure taxonomy
fn classify(err: reqwest::Error) -> ClientError {
    tracing::warn!(error = %err, "backend request failed");
    let status = err.status().map_or(0, |s| s.as_u16());
    let failure = if err.is_timeout() {
        Failure::status(status, "").with_kind(FailureKind::Timeout)
    } else if err.is_decode() {
        Failure::status(status, "").with_kind(FailureKind::ParseError)
    } else {
        Failure::status(status, err.to_string())
    };
    ClientError::from_failure(failure)
}

async fn read_text(response: Response) -> Result<(StatusCode, String)> {
    let status = response.status();
    let body = response.text().await.map_err(classify)?;
    Ok((status, body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let (status, body) = read_text(response).await?;
    parse_body(status, body)
}

fn parse_body<T: DeserializeOwned>(status: StatusCode, body: String) -> Result<T> {
    serde_json::from_str(&body).map_err(|_| {
        ClientError::from_failure(
            Failure::status(status.as_u16(), body).with_kind(FailureKind::ParseError),
        )
    })
}

#[async_trait(?Send)]
impl EventsApi for HttpBackend {
    async fn save_event(&self, event_id: &str) -> Result<MessageResponse> {
        self.post_empty(&Endpoint::SaveEvent {
            event_id: event_id.to_string(),
        })
        .await
    }

    async fn delete_event(&self, event_id: &str) -> Result<Option<MessageResponse>> {
        let endpoint = Endpoint::DeleteEvent {
            event_id: event_id.to_string(),
        };
        let (status, body) = read_text(self.send(self.request(&endpoint)).await?).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        parse_body(status, body).map(Some)
    }

    async fn delete_saved_event(&self, event_id: &str) -> Result<()> {
        let endpoint = Endpoint::DeleteSavedEvent {
            event_id: event_id.to_string(),
        };
        self.send(self.request(&endpoint)).await?;
        Ok(())
    }

    async fn package_details(&self, package_id: &str) -> Result<PackageDetails> {
        self.get_json(&Endpoint::PackageDetails {
            package_id: package_id.to_string(),
        })
        .await
    }

    async fn delete_package(&self, event_id: &str, package_id: &str) -> Result<RedirectResponse> {
        self.post_empty(&Endpoint::DeletePackage {
            event_id: event_id.to_string(),
            package_id: package_id.to_string(),
        })
        .await
    }
}

#[async_trait(?Send)]
impl FragmentApi for HttpBackend {
    async fn fragment(&self, endpoint: &Endpoint) -> Result<String> {
        let response = self.send(self.request(endpoint)).await?;
        let (_, html) = read_text(response).await?;
        Ok(html)
    }
}

#[async_trait(?Send)]
impl SponsorshipApi for HttpBackend {
    async fn create_sponsorships(
        &self,
        event_id: &str,
        request: &SponsorshipRequest,
    ) -> Result<RedirectResponse> {
        let endpoint = Endpoint::CreateSponsorships {
            event_id: event_id.to_string(),
        };
        self.post_json(&endpoint, request).await
    }
}

#[async_trait(?Send)]
impl PaymentsApi for HttpBackend {
    async fn create_payment_intent(&self, request: &PaymentIntentRequest) -> Result<PaymentIntent> {
        self.post_json(&Endpoint::CreatePaymentIntent, request).await
    }

    async fn checkout_success(
        &self,
        request: &CheckoutSuccessRequest,
    ) -> Result<CheckoutSuccessResponse> {
        let response = self
            .request(&Endpoint::CheckoutSuccess)
            .json(request)
            .send()
            .await
            .map_err(classify)?;
        let (status, body) = read_text(response).await?;

        match serde_json::from_str::<CheckoutSuccessResponse>(&body) {
            Ok(outcome) => Ok(outcome),
            Err(_) if status.is_success() => parse_body(status, body),
            Err(_) => Err(ClientError::from_failure(Failure::status(status.as_u16(), body))),
        }
    }
}
