use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::config::Settings;
use crate::error::{AppError, AppResult};

use super::PageSource;

const RETRY_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Connection-level retry applied to every request, beneath the batch retry.
#[derive(Debug, Clone, Copy)]
pub struct TransportRetry {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl TransportRetry {
    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

#[derive(Debug, Clone)]
pub struct SiteClient {
    http: Client,
    probe_timeout: Duration,
    retry: TransportRetry,
}

impl SiteClient {
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let accept_language = HeaderValue::from_str(settings.accept_language()).map_err(|err| {
            AppError::Config(format!("accept_language is not a valid header value: {err}"))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let http = Client::builder()
            .user_agent(settings.user_agent())
            .default_headers(headers)
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            http,
            probe_timeout: settings.probe_timeout(),
            retry: TransportRetry {
                max_retries: settings.transport_retries(),
                backoff: settings.backoff(),
            },
        })
    }

    async fn send_with_retry<F>(&self, url: &str, build: F) -> AppResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let outcome = build().send().await;
            let retryable = match &outcome {
                Ok(response) => RETRY_STATUSES.contains(&response.status()),
                Err(err) => err.is_connect() || err.is_timeout(),
            };

            if !retryable || attempt >= self.retry.max_retries {
                return outcome.map_err(|err| transport_error(url, err));
            }

            let delay = self.retry.delay_for(attempt);
            tracing::debug!(url, attempt = attempt + 1, ?delay, "retrying request");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl PageSource for SiteClient {
    async fn exists(&self, url: &str) -> bool {
        let outcome = self
            .send_with_retry(url, || self.http.head(url).timeout(self.probe_timeout))
            .await;

        match outcome {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(url, error = %err, "probe failed");
                false
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> AppResult<String> {
        let response = self.send_with_retry(url, || self.http.get(url)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Site {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| transport_error(url, err))
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        return AppError::Timeout(url.to_string());
    }

    AppError::Http(err)
}
