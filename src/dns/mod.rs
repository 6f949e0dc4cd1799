//! DNS lookup step of a diagnostics run

pub mod resolver;

pub use resolver::{build_resolver, HostResolver, SystemResolver, TrustDnsResolver};

use crate::logging::Logger;
use crate::models::DnsResult;
use std::net::IpAddr;
use std::sync::Arc;

/// Resolves a hostname into a [`DnsResult`]
pub struct DnsResolver {
    resolver: Arc<dyn HostResolver>,
    logger: Logger,
}

impl DnsResolver {
    pub fn new(resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            resolver,
            logger: Logger::new("DNS"),
        }
    }

    /// Resolver using the operating system
    pub fn system() -> Self {
        Self::new(Arc::new(SystemResolver::new()))
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Look up `host`
    ///
    /// The IPv4 address is the first IPv4 entry the resolver returns; every
    /// IPv6 entry is collected into a deduplicated set. Lookup failures are
    /// reported in `error` with the hostname and cause.
    pub async fn resolve(&self, host: &str) -> DnsResult {
        match self.resolver.lookup(host).await {
            Ok(addresses) => {
                let result = collect_addresses(host, &addresses);
                self.logger.debug("resolved host")
                    .field("host", host)
                    .field("resolver", self.resolver.name())
                    .field("ipv4", &result.ipv4_address)
                    .field("ipv6_count", result.ipv6_addresses.len())
                    .log();
                result
            }
            Err(e) => {
                self.logger.warn("DNS lookup failed")
                    .field("host", host)
                    .field("resolver", self.resolver.name())
                    .error_info(&e)
                    .log();
                DnsResult::failed(host, format!("DNS resolution failed for {}: {}", host, e))
            }
        }
    }
}

fn collect_addresses(host: &str, addresses: &[IpAddr]) -> DnsResult {
    let mut result = DnsResult::new(host);
    result.ipv4_address = addresses
        .iter()
        .find(|ip| ip.is_ipv4())
        .map(|ip| ip.to_string());
    result.ipv6_addresses = addresses
        .iter()
        .filter(|ip| ip.is_ipv6())
        .map(|ip| ip.to_string())
        .collect();
    result
}

/// Resolve `host` with the system resolver
pub async fn resolve_dns(host: &str) -> DnsResult {
    DnsResolver::system().resolve(host).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use async_trait::async_trait;

    struct StaticResolver(Vec<IpAddr>);

    #[async_trait]
    impl HostResolver for StaticResolver {
        async fn lookup(&self, _host: &str) -> Result<Vec<IpAddr>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> String {
            "static".to_string()
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl HostResolver for FailingResolver {
        async fn lookup(&self, _host: &str) -> Result<Vec<IpAddr>> {
            Err(AppError::dns_resolution("Name or service not known"))
        }

        fn name(&self) -> String {
            "failing".to_string()
        }
    }

    fn ips(list: &[&str]) -> Vec<IpAddr> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[tokio::test]
    async fn test_first_ipv4_is_primary() {
        let resolver = DnsResolver::new(Arc::new(StaticResolver(ips(&[
            "2001:db8::1",
            "192.0.2.10",
            "192.0.2.20",
        ]))));

        let result = resolver.resolve("example.com").await;
        assert_eq!(result.hostname, "example.com");
        assert_eq!(result.ipv4_address.as_deref(), Some("192.0.2.10"));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_ipv6_addresses_are_deduplicated() {
        let resolver = DnsResolver::new(Arc::new(StaticResolver(ips(&[
            "192.0.2.10",
            "2001:db8::1",
            "2001:db8::2",
            "2001:db8::1",
        ]))));

        let result = resolver.resolve("example.com").await;
        assert_eq!(result.ipv6_addresses.len(), 2);
        assert!(result.ipv6_addresses.contains("2001:db8::1"));
        assert!(result.ipv6_addresses.contains("2001:db8::2"));
    }

    #[tokio::test]
    async fn test_ipv6_only_host_has_no_ipv4() {
        let resolver = DnsResolver::new(Arc::new(StaticResolver(ips(&["2001:db8::5"]))));
        let result = resolver.resolve("v6.example").await;
        assert!(result.ipv4_address.is_none());
        assert!(result.error.is_none());
        assert_eq!(result.ipv6_addresses.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_embeds_host_and_cause() {
        let resolver = DnsResolver::new(Arc::new(FailingResolver));
        let result = resolver.resolve("missing.example").await;

        assert!(result.ipv4_address.is_none());
        assert!(result.ipv6_addresses.is_empty());
        let error = result.error.unwrap();
        assert!(error.contains("missing.example"));
        assert!(error.contains("Name or service not known"));
    }

    #[tokio::test]
    async fn test_resolve_dns_ipv4_only_host() {
        let result = resolve_dns("127.0.0.1").await;
        assert_eq!(result.ipv4_address.as_deref(), Some("127.0.0.1"));
        assert!(result.ipv6_addresses.is_empty());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_resolve_dns_total_failure() {
        let result = resolve_dns("host-diagnostics-test.invalid").await;
        assert!(result.ipv4_address.is_none());
        assert!(result.error.is_some());
    }
}
