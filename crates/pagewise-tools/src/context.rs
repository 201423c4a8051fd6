//! Shared state for tool handlers: provider, transport factory, page source

use crate::error::ToolError;
use pagewise_capability::{CapabilityProvider, DocumentInfo, ProviderConfig};
use pagewise_domain::traits::{ChatTransport, PageTextSource};
use pagewise_llm::{LlmError, MistralTransport};
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Builds a transport once the provider has a credential
pub trait TransportFactory {
    /// Transport produced
    type Transport: ChatTransport;
    /// Construction failure
    type Error: fmt::Display;

    /// Build an authenticated transport
    fn connect(
        &self,
        api_key: &str,
        config: &ProviderConfig,
    ) -> Result<Self::Transport, Self::Error>;
}

/// Connects to the Mistral chat-completions API
#[derive(Debug, Clone, Copy, Default)]
pub struct MistralConnector;

impl TransportFactory for MistralConnector {
    type Transport = MistralTransport;
    type Error = LlmError;

    fn connect(&self, api_key: &str, config: &ProviderConfig) -> Result<MistralTransport, LlmError> {
        MistralTransport::with_timeout(api_key, config.base_url.clone(), config.request_timeout())
    }
}

/// Hands out clones of an already-built transport
#[derive(Debug, Clone)]
pub struct SharedTransport<T>(pub T);

impl<T: ChatTransport + Clone> TransportFactory for SharedTransport<T> {
    type Transport = T;
    type Error = Infallible;

    fn connect(&self, _api_key: &str, _config: &ProviderConfig) -> Result<T, Infallible> {
        Ok(self.0.clone())
    }
}

/// Everything a tool handler needs
pub struct ToolContext<F: TransportFactory, S> {
    provider: CapabilityProvider<F::Transport>,
    factory: F,
    source: S,
}

impl<F, S> ToolContext<F, S>
where
    F: TransportFactory,
    S: PageTextSource,
{
    /// Create a context with an uninitialized provider
    pub fn new(config: ProviderConfig, factory: F, source: S) -> Self {
        Self {
            provider: CapabilityProvider::new(config),
            factory,
            source,
        }
    }

    /// The provider
    pub fn provider(&self) -> &CapabilityProvider<F::Transport> {
        &self.provider
    }

    /// The provider, for explicit lifecycle control
    pub fn provider_mut(&mut self) -> &mut CapabilityProvider<F::Transport> {
        &mut self.provider
    }

    /// The page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Make sure the provider is Ready, initializing it lazily
    pub(crate) fn ensure_ready(&mut self) -> Result<(), ToolError> {
        if !self.provider.config().enabled {
            return Err(ToolError::ProviderUnavailable);
        }

        if !self.provider.is_ready() {
            debug!("Initializing provider on first use");
            let factory = &self.factory;
            self.provider
                .initialize(|api_key, config| factory.connect(api_key, config));
        }

        if self.provider.is_ready() {
            Ok(())
        } else {
            Err(ToolError::InitializationFailed)
        }
    }

    /// Check the document against the provider and return its local path
    pub(crate) fn open_document(&self, document_url: &str) -> Result<PathBuf, ToolError> {
        if document_url.starts_with("http://") || document_url.starts_with("https://") {
            return Err(ToolError::Document(format!(
                "Remote documents are not supported: {}",
                document_url
            )));
        }

        let path = PathBuf::from(document_url.strip_prefix("file://").unwrap_or(document_url));
        let mut document = DocumentInfo::new(document_url);
        if let Ok(metadata) = std::fs::metadata(&path) {
            document = document.with_size(metadata.len());
        }

        if !self.provider.can_process(&document) {
            return Err(ToolError::UnsupportedDocument {
                url: document_url.to_string(),
                format: document.resolved_format(),
            });
        }

        info!("Processing document {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::InMemoryPages;
    use pagewise_llm::MockTransport;

    fn context(config: ProviderConfig) -> ToolContext<SharedTransport<MockTransport>, InMemoryPages> {
        ToolContext::new(
            config,
            SharedTransport(MockTransport::default()),
            InMemoryPages::default(),
        )
    }

    #[test]
    fn test_disabled_provider_is_unavailable() {
        let mut ctx = context(ProviderConfig::default());
        assert!(matches!(ctx.ensure_ready(), Err(ToolError::ProviderUnavailable)));
    }

    #[test]
    fn test_missing_key_fails_initialization() {
        let mut ctx = context(ProviderConfig {
            enabled: true,
            ..ProviderConfig::default()
        });
        assert!(matches!(ctx.ensure_ready(), Err(ToolError::InitializationFailed)));
    }

    #[test]
    fn test_lazy_initialization() {
        let mut ctx = context(ProviderConfig::enabled_with_key("k"));
        assert!(!ctx.provider().is_ready());
        ctx.ensure_ready().unwrap();
        assert!(ctx.provider().is_ready());
    }

    #[test]
    fn test_open_document() {
        let mut ctx = context(ProviderConfig::enabled_with_key("k"));
        ctx.ensure_ready().unwrap();

        assert_eq!(ctx.open_document("report.txt").unwrap(), PathBuf::from("report.txt"));
        assert_eq!(
            ctx.open_document("file:///tmp/report.md").unwrap(),
            PathBuf::from("/tmp/report.md")
        );
        assert!(matches!(
            ctx.open_document("deck.pptx"),
            Err(ToolError::UnsupportedDocument { .. })
        ));
        assert!(matches!(
            ctx.open_document("https://example.com/report.pdf"),
            Err(ToolError::Document(_))
        ));
    }

    #[test]
    fn test_mistral_connector_builds_transport() {
        let transport = MistralConnector.connect("key", &ProviderConfig::default());
        assert!(transport.is_ok());
    }
}
