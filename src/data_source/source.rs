//! Data source implementation

use super::operation::Operation;
use crate::error::{Error, Result};
use crate::http::{ReqwestTransport, Transport, TransportError, TransportResponse};
use crate::logger::{RawResponse, RequestLogger, TracingLogger, FALLBACK_STATUS};
use crate::pagination::{PageSource, PageWalker, PaginationResponse};
use crate::request::{compose_request, BaseRequestConfig, ComposedRequest, RequestConfig};
use crate::signer::{HmacSigner, RequestSigner};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Typed client for one REST resource.
///
/// `E` is the entity type the resource returns. Calls that need a different
/// shape go through [`DataSource::common`].
pub struct DataSource<E = JsonValue> {
    config: Arc<BaseRequestConfig>,
    transport: Arc<dyn Transport>,
    logger: Option<Arc<dyn RequestLogger>>,
    signer: Option<Arc<dyn RequestSigner>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> DataSource<E> {
    /// Create a data source that sends requests with reqwest
    pub fn new(config: BaseRequestConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(ReqwestTransport::new()?)))
    }

    /// Create a data source over a custom transport.
    ///
    /// Logging and signing are set up from the config.
    pub fn with_transport(config: BaseRequestConfig, transport: Arc<dyn Transport>) -> Self {
        let logger = config.logger.then(|| {
            let name = config.name.clone().unwrap_or_default();
            Arc::new(TracingLogger::new(name, config.log_level)) as Arc<dyn RequestLogger>
        });

        let signer = config
            .signer
            .clone()
            .filter(|signer| !signer.secret_key.is_empty())
            .map(|signer| Arc::new(HmacSigner::new(signer)) as Arc<dyn RequestSigner>);

        Self {
            config: Arc::new(config),
            transport,
            logger,
            signer,
            _entity: PhantomData,
        }
    }

    /// Replace the logger
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Turn logging off
    #[must_use]
    pub fn without_logger(mut self) -> Self {
        self.logger = None;
        self
    }

    /// Replace the signer
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Base configuration
    pub fn config(&self) -> &BaseRequestConfig {
        &self.config
    }

    /// Compose the request for `call`, signature included
    pub fn compose(&self, call: &RequestConfig) -> Result<ComposedRequest> {
        let mut request = compose_request(&self.config, call);

        if let Some(signer) = &self.signer {
            let body = request.body_text().unwrap_or_default();
            for (name, value) in signer.signature_headers(&body)? {
                request.set_header(&name, &value);
            }
        }

        Ok(request)
    }

    /// Send `call` and decode the response body into `T`
    pub async fn common<T: DeserializeOwned>(&self, call: RequestConfig) -> Result<T> {
        let request = self.compose(&call)?;
        let response = self
            .send(&request)
            .await
            .map_err(Error::from_transport)?;
        decode(response)
    }

    /// Send `call` without ever failing
    pub async fn common_raw(&self, call: RequestConfig) -> RawResponse {
        let request = match self.compose(&call) {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to compose request: {}", e);
                return RawResponse {
                    success: false,
                    status: FALLBACK_STATUS,
                    method: call.method.unwrap_or_default(),
                    data: JsonValue::String(e.to_string()),
                };
            }
        };

        match self.send(&request).await {
            Ok(response) => RawResponse::from_response(&response),
            Err(error) => RawResponse::from_error(&request, &error),
        }
    }

    /// Run an operation and decode the response body into `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        call: RequestConfig,
    ) -> Result<T> {
        self.common(operation.apply(call)).await
    }

    /// Run an operation without ever failing
    pub async fn execute_raw(&self, operation: &Operation, call: RequestConfig) -> RawResponse {
        self.common_raw(operation.apply(call)).await
    }

    async fn send(
        &self,
        request: &ComposedRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        if let Some(logger) = &self.logger {
            logger.log_request(request);
        }

        let started = Instant::now();
        let result = self.transport.dispatch(request).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(response, elapsed);
                }
            }
            Err(error) => {
                if let Some(logger) = &self.logger {
                    logger.log_error(request, error, elapsed);
                }
                if self.config.debug {
                    debug!(?error, "{} {} failed", request.method, request.full_url());
                }
            }
        }

        result
    }
}

impl<E: DeserializeOwned> DataSource<E> {
    /// List entities matching the call's params
    pub async fn search(&self, call: RequestConfig) -> Result<PaginationResponse<E>> {
        self.execute(&Operation::Search, call).await
    }

    /// First entity matching the call's params
    pub async fn search_one(&self, call: RequestConfig) -> Result<Option<E>> {
        let page: PaginationResponse<E> = self.execute(&Operation::SearchOne, call).await?;
        Ok(page.data.into_iter().next())
    }

    /// Fetch one entity
    pub async fn get(&self, id: impl ToString, call: RequestConfig) -> Result<E> {
        self.execute(&Operation::Get(id.to_string()), call).await
    }

    /// Create an entity
    pub async fn create<D>(&self, data: &D, call: RequestConfig) -> Result<E>
    where
        D: Serialize + ?Sized,
    {
        let call = call.data(serde_json::to_value(data)?);
        self.execute(&Operation::Create, call).await
    }

    /// Create many entities in one request
    pub async fn bulk_create<D: Serialize>(
        &self,
        items: &[D],
        call: RequestConfig,
    ) -> Result<Vec<E>> {
        let call = call.data(serde_json::to_value(items)?);
        self.execute(&Operation::BulkCreate, call).await
    }

    /// Replace an entity
    pub async fn update<D>(&self, id: impl ToString, data: &D, call: RequestConfig) -> Result<E>
    where
        D: Serialize + ?Sized,
    {
        let call = call.data(serde_json::to_value(data)?);
        self.execute(&Operation::Update(id.to_string()), call).await
    }

    /// Update many entities in one request
    pub async fn bulk_update<D: Serialize>(
        &self,
        items: &[D],
        call: RequestConfig,
    ) -> Result<Vec<E>> {
        let call = call.data(serde_json::to_value(items)?);
        self.execute(&Operation::BulkUpdate, call).await
    }

    /// Delete an entity
    pub async fn remove(&self, id: impl ToString, call: RequestConfig) -> Result<()> {
        let _: IgnoredAny = self.execute(&Operation::Remove(id.to_string()), call).await?;
        Ok(())
    }
}

impl<E> DataSource<E>
where
    E: DeserializeOwned + Send,
{
    /// Walk every page of a search
    pub fn bulk_search(&self, call: RequestConfig) -> PageWalker<'_, E> {
        PageWalker::new(self, call)
    }
}

#[async_trait]
impl<E> PageSource<E> for DataSource<E>
where
    E: DeserializeOwned + Send,
{
    async fn fetch_page(&self, call: RequestConfig) -> Result<PaginationResponse<E>> {
        self.search(call).await
    }
}

impl<E> Clone for DataSource<E> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            logger: self.logger.clone(),
            signer: self.signer.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for DataSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSource")
            .field("config", &self.config)
            .field("logger", &self.logger)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(response: TransportResponse) -> Result<T> {
    let TransportResponse {
        method, url, data, ..
    } = response;
    serde_json::from_value(data)
        .map_err(|e| Error::decode(format!("{method} {url} returned an unexpected body: {e}")))
}
