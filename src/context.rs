use std::sync::{Arc, PoisonError, RwLock};

use tokio_util::sync::CancellationToken;

use crate::{config::ProviderSettings, error::Error, locks::NamedLocks};

/// State shared by the provider and all its resources
///
/// Lives as long as the provider process. Cloning shares the same locks, settings
/// and stop token.
#[derive(Debug, Clone, Default)]
pub struct ProviderContext {
    pub locks: Arc<NamedLocks>,
    pub cancel: CancellationToken,
    settings: Arc<RwLock<Option<ProviderSettings>>>,
}

impl ProviderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context already configured with `settings`
    pub fn with_settings(settings: ProviderSettings) -> Self {
        let ctx = Self::default();
        ctx.configure(settings);
        ctx
    }

    pub fn configure(&self, settings: ProviderSettings) {
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = Some(settings);
    }

    pub fn settings(&self) -> Result<ProviderSettings, Error> {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| Error::NotConfigured("the provider block has not been processed".into()))
    }

    pub fn subscription_id(&self) -> Result<String, Error> {
        self.settings().map(|settings| settings.subscription_id)
    }

    pub fn is_stopping(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_shared_between_clones() {
        let ctx = ProviderContext::new();
        let clone = ctx.clone();
        assert!(matches!(clone.subscription_id(), Err(Error::NotConfigured(_))));
        ctx.configure(ProviderSettings {
            subscription_id: "sub".into(),
            tenant_id: None,
            environment: "public".into(),
            skip_provider_registration: false,
            partner_id: None,
        });
        assert_eq!(clone.subscription_id().unwrap(), "sub");
    }
}
