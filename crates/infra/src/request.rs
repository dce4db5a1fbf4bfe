// crates/infra/src/request.rs
//! Visitor address and do-not-track signal taken from an incoming request.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use tracing::trace;
use visit_counter_ports::visitor::{AddressResolver, DoNotTrackSource};
use visit_counter_shared_kernel::VisitorAddress;

/// Header values relevant to identifying a visitor.
///
/// Proxy headers are ignored unless [`RequestContext::with_trusted_proxy`]
/// is set, since any client can send them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    explicit_addr: Option<String>,
    remote_addr: Option<String>,
    forwarded_for: Option<String>,
    real_ip: Option<String>,
    client_ip: Option<String>,
    do_not_track: bool,
    trust_proxy: bool,
}

impl RequestContext {
    /// Build from the peer address and raw header pairs. Header names are
    /// matched case-insensitively; the first occurrence wins.
    pub fn from_headers<I, K, V>(remote_addr: Option<&str>, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut ctx = Self { remote_addr: non_blank(remote_addr), ..Self::default() };
        for (name, value) in headers {
            let value = value.as_ref();
            match name.as_ref().to_ascii_lowercase().as_str() {
                "x-forwarded-for" => fill(&mut ctx.forwarded_for, value),
                "x-real-ip" => fill(&mut ctx.real_ip, value),
                "client-ip" => fill(&mut ctx.client_ip, value),
                "dnt" | "sec-gpc" => ctx.do_not_track |= is_opt_out(value),
                _ => {}
            }
        }
        ctx
    }

    /// Build from CGI-style variables (`REMOTE_ADDR`, `HTTP_*`).
    pub fn from_cgi_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let dnt = ["HTTP_DNT", "HTTP_SEC_GPC"].into_iter().filter_map(&lookup).any(|v| is_opt_out(&v));
        Self {
            explicit_addr: None,
            remote_addr: non_blank(lookup("REMOTE_ADDR").as_deref()),
            forwarded_for: non_blank(lookup("HTTP_X_FORWARDED_FOR").as_deref()),
            real_ip: non_blank(lookup("HTTP_X_REAL_IP").as_deref()),
            client_ip: non_blank(lookup("HTTP_CLIENT_IP").as_deref()),
            do_not_track: dnt,
            trust_proxy: false,
        }
    }

    /// Build from the process environment, as set by a CGI host.
    pub fn from_cgi_env() -> Self {
        Self::from_cgi_vars(|name| std::env::var(name).ok())
    }

    #[must_use]
    pub fn with_trusted_proxy(mut self, trust: bool) -> Self {
        self.trust_proxy = trust;
        self
    }

    /// Pin the visitor address. Takes precedence over `REMOTE_ADDR` and any
    /// proxy header, trusted or not.
    #[must_use]
    pub fn with_address(mut self, address: impl AsRef<str>) -> Self {
        self.explicit_addr = non_blank(Some(address.as_ref()));
        self
    }

    #[must_use]
    pub fn with_do_not_track(mut self, dnt: bool) -> Self {
        self.do_not_track |= dnt;
        self
    }

    fn proxied_address(&self) -> Option<IpAddr> {
        [&self.forwarded_for, &self.real_ip]
            .into_iter()
            .flatten()
            .flat_map(|value| value.split(','))
            .filter_map(|entry| entry.trim().parse::<IpAddr>().ok())
            .find(is_public)
    }
}

impl AddressResolver for RequestContext {
    fn visitor_address(&self) -> Option<VisitorAddress> {
        if let Some(address) = self.explicit_addr.as_deref() {
            return VisitorAddress::parse(address);
        }
        if self.trust_proxy
            && let Some(ip) = self.proxied_address()
        {
            trace!(%ip, "using proxied client address");
            return Some(VisitorAddress::new(ip.to_string()));
        }
        let fallback = if self.trust_proxy { self.client_ip.as_deref() } else { None };
        self.remote_addr.as_deref().or(fallback).and_then(VisitorAddress::parse)
    }
}

impl DoNotTrackSource for RequestContext {
    fn do_not_track(&self) -> bool {
        self.do_not_track
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn fill(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = non_blank(Some(value));
    }
}

fn is_opt_out(value: &str) -> bool {
    value.trim() == "1"
}

/// Globally routable, i.e. none of the private, loopback, link-local,
/// documentation, reserved, multicast or unspecified ranges.
pub fn is_public(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_v4(&v4),
            None => is_public_v6(v6),
        },
    }
}

fn is_public_v4(ip: &Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    let shared = a == 100 && (64..128).contains(&b);
    let reserved = a >= 240 || a == 0;
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_documentation()
        || ip.is_multicast()
        || ip.is_broadcast()
        || ip.is_unspecified()
        || shared
        || reserved)
}

fn is_public_v6(ip: &Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = first & 0xfe00 == 0xfc00;
    let link_local = first & 0xffc0 == 0xfe80;
    let documentation = first == 0x2001 && ip.segments()[1] == 0x0db8;
    !(ip.is_loopback() || ip.is_multicast() || ip.is_unspecified() || unique_local || link_local || documentation)
}
