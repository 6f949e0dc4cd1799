//! Address lookup backends
//!
//! [`SystemResolver`] goes through the operating system (hosts file, nsswitch,
//! mDNS and so on). [`TrustDnsResolver`] sends queries straight to a set of
//! DNS servers and is selected with `--dns-servers`.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use trust_dns_resolver::{
    config::{LookupIpStrategy, NameServerConfig, Protocol, ResolverConfig, ResolverOpts},
    TokioAsyncResolver,
};

/// Turns a hostname into the addresses it points to
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Every address for `host`, in resolver order. Never returns an empty list.
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>>;

    /// Short description for logs
    fn name(&self) -> String;
}

/// Resolver backed by the operating system's `getaddrinfo`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| AppError::dns_resolution(e.to_string()))?;

        let ips: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
        if ips.is_empty() {
            return Err(AppError::dns_resolution(format!("no addresses found for {}", host)));
        }
        Ok(ips)
    }

    fn name(&self) -> String {
        "system".to_string()
    }
}

/// Resolver that queries explicit DNS servers
#[derive(Clone)]
pub struct TrustDnsResolver {
    resolver: TokioAsyncResolver,
    servers: Vec<IpAddr>,
}

impl TrustDnsResolver {
    /// Create a resolver that asks `servers` over UDP with TCP fallback
    pub fn with_servers(servers: &[IpAddr]) -> Result<Self> {
        if servers.is_empty() {
            return Err(AppError::validation("No DNS servers provided"));
        }

        let mut config = ResolverConfig::new();
        for &server in servers {
            let socket_addr = SocketAddr::new(server, 53);
            config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Udp));
            config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Tcp));
        }

        let resolver = TokioAsyncResolver::tokio(config, resolver_opts());
        Ok(Self {
            resolver,
            servers: servers.to_vec(),
        })
    }

    pub fn servers(&self) -> &[IpAddr] {
        &self.servers
    }
}

/// Query A and AAAA records together so dual-stack hosts report both families
fn resolver_opts() -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts
}

#[async_trait]
impl HostResolver for TrustDnsResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>> {
        let response = self.resolver.lookup_ip(host).await?;
        let ips: Vec<IpAddr> = response.iter().collect();
        if ips.is_empty() {
            return Err(AppError::dns_resolution(format!("no addresses found for {}", host)));
        }
        Ok(ips)
    }

    fn name(&self) -> String {
        let servers: Vec<String> = self.servers.iter().map(|s| s.to_string()).collect();
        format!("custom ({})", servers.join(", "))
    }
}

/// Pick the resolver for a list of DNS servers; empty means the system resolver
pub fn build_resolver(servers: &[IpAddr]) -> Result<Arc<dyn HostResolver>> {
    if servers.is_empty() {
        Ok(Arc::new(SystemResolver::new()))
    } else {
        Ok(Arc::new(TrustDnsResolver::with_servers(servers)?))
    }
}
