//! Host network helpers for DUT connectivity
//!
//! The broker or TLS server a DUT talks to runs on the test host, so tests
//! need the host address that is reachable from the DUT's network. The
//! kernel's routing choice for a connected UDP socket gives exactly that
//! without sending any traffic.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{FixtureError, Result};

/// Destination used when the caller does not name one
pub const DEFAULT_PROBE_DEST: &str = "8.8.8.8";

/// Port used for the routing probe (never actually contacted)
const PROBE_PORT: u16 = 80;

/// Host and DUT addresses of one test setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunnerIp {
    pub dut_ip: Ipv4Addr,
    pub host_ip: Ipv4Addr,
}

/// Local IPv4 address the host would use to reach `dest`
pub fn host_ip4_by_dest(dest: Option<&str>) -> Result<Ipv4Addr> {
    let dest = dest.filter(|d| !d.is_empty()).unwrap_or(DEFAULT_PROBE_DEST);

    let remote = (dest, PROBE_PORT)
        .to_socket_addrs()?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| FixtureError::NoIpv4Address(format!("{} does not resolve to IPv4", dest)))?;

    debug!("Probing outbound route to {}", remote);

    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(remote)?;

    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) => {
            info!("Using host ip: {}", ip);
            Ok(ip)
        }
        IpAddr::V6(ip) => Err(FixtureError::NoIpv4Address(format!(
            "route to {} uses IPv6 source {}",
            dest, ip
        ))),
    }
}

fn dut_ip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"IPv4 address: (\d+\.\d+\.\d+\.\d+)[^\d]").expect("DUT IPv4 pattern is valid")
    })
}

/// First `IPv4 address: a.b.c.d` reported in DUT console output
pub fn parse_dut_ipv4(console: &str) -> Option<Ipv4Addr> {
    dut_ip_pattern()
        .captures_iter(console)
        .find_map(|caps| caps[1].parse().ok())
}

/// DUT address from its console output and the host address that reaches it
pub fn runner_ip(console: &str) -> Result<RunnerIp> {
    let dut_ip = parse_dut_ipv4(console).ok_or(FixtureError::DutIpNotFound)?;
    info!("Got DUT IP={}", dut_ip);

    let host_ip = host_ip4_by_dest(Some(&dut_ip.to_string()))?;
    Ok(RunnerIp { dut_ip, host_ip })
}
