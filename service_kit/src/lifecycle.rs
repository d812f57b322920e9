use async_trait::async_trait;

use crate::error::Result;

/// Startup and shutdown hooks around the lifetime of a running service.
///
/// Both hooks default to doing nothing. `startup` runs before the service
/// accepts its first request; `shutdown` runs once it has stopped accepting
/// new ones.
#[async_trait]
pub trait Lifespan: Send + Sync {
    async fn startup(&self) -> Result<()> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// A [`Lifespan`] with no resources to acquire or release.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLifespan;

impl Lifespan for NoopLifespan {}
