use async_trait::async_trait;
use tokio::net::lookup_host;
use tracing::debug;

/// Answers whether a host identifier maps to at least one network address.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolves(&self, host: &str) -> bool;
}

/// Uses the platform's resolver (`getaddrinfo` through tokio's blocking pool).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolves(&self, host: &str) -> bool {
        match lookup_host((host, 0)).await {
            Ok(mut addrs) => addrs.next().is_some(),
            Err(e) => {
                debug!("lookup of {host} failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_localhost() {
        assert!(SystemResolver.resolves("localhost").await);
    }

    #[tokio::test]
    async fn resolves_ip_literals_without_lookup() {
        assert!(SystemResolver.resolves("127.0.0.1").await);
        assert!(SystemResolver.resolves("::1").await);
    }

    #[tokio::test]
    async fn reserved_invalid_name_does_not_resolve() {
        assert!(!SystemResolver.resolves("host.invalid").await);
    }
}
