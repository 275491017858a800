use crate::client::core::Client;
use crate::client::request::RequestBuilder;
use crate::config::ClientConfig;
use crate::marshal::{JsonMarshaller, Marshaller};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::sync::Arc;

/// Builder for creating clients with custom configuration.
///
/// The transport and the marshaller are the two injectable seams; both default to
/// the reqwest/JSON implementations.
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    http_client: Option<reqwest::Client>,
    marshaller: Arc<dyn Marshaller>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            http_client: None,
            marshaller: Arc::new(JsonMarshaller),
        }
    }

    /// Replace the transport, e.g. with a test double.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Reuse an existing `reqwest::Client` for both request assembly and sending.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn marshaller(mut self, marshaller: Arc<dyn Marshaller>) -> Self {
        self.marshaller = marshaller;
        self
    }

    pub fn build(self) -> Result<Client> {
        let http = match self.http_client {
            Some(client) => HttpTransport::from_client(client),
            None => HttpTransport::new(&self.config)?,
        };
        let builder = RequestBuilder::with_marshaller(self.marshaller)
            .with_http_client(http.client().clone());
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(http),
        };

        Ok(Client {
            config: Arc::new(self.config),
            transport,
            builder: Arc::new(builder),
            cancel: None,
        })
    }
}
