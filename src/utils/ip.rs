//! 客户端 IP 提取
//!
//! 只有当直连对端是可信代理时才采信 `X-Forwarded-For` / `X-Real-IP`：
//! 显式配置了 `server.trusted_proxies` 时按列表（IP 或 CIDR）匹配，
//! 未配置时把私有地址和回环地址视为反向代理。

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use tracing::debug;

use crate::config::get_config;

pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            // ::1, fc00::/7, fe80::/10
            v6.is_loopback() || (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
        }
    }
}

fn parse_peer(peer: &str) -> Option<IpAddr> {
    peer.parse::<SocketAddr>()
        .map(|s| s.ip())
        .or_else(|_| peer.parse::<IpAddr>())
        .ok()
}

/// `ip` 是否落在 `cidr` 网段内
pub fn ip_in_cidr(ip: &IpAddr, cidr: &str) -> bool {
    let Some((network, bits)) = cidr.split_once('/') else {
        return false;
    };
    let (Ok(network), Ok(bits)) = (network.parse::<IpAddr>(), bits.parse::<u32>()) else {
        return false;
    };

    match (ip, network) {
        (IpAddr::V4(ip), IpAddr::V4(net)) if bits <= 32 => {
            let mask = u32::MAX.checked_shl(32 - bits).unwrap_or(0);
            (u32::from(*ip) & mask) == (u32::from(net) & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) if bits <= 128 => {
            let mask = u128::MAX.checked_shl(128 - bits).unwrap_or(0);
            (u128::from(*ip) & mask) == (u128::from(net) & mask)
        }
        _ => false,
    }
}

pub fn is_trusted_proxy(peer: &IpAddr, trusted_proxies: &[String]) -> bool {
    trusted_proxies.iter().any(|entry| {
        if entry.contains('/') {
            ip_in_cidr(peer, entry)
        } else {
            entry.parse::<IpAddr>().is_ok_and(|addr| addr == *peer)
        }
    })
}

/// 从转发头中取原始客户端 IP（XFF 的第一项优先，其次 X-Real-IP）
pub fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let xff = headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    xff.or_else(real_ip).map(String::from)
}

/// 根据对端地址和转发头决定客户端 IP
pub fn resolve_client_ip(
    peer: Option<&str>,
    headers: &HeaderMap,
    trusted_proxies: &[String],
) -> Option<String> {
    let peer_str = peer?;
    let Some(peer_ip) = parse_peer(peer_str) else {
        return Some(peer_str.to_string());
    };

    let trusted = if trusted_proxies.is_empty() {
        is_private_or_local(&peer_ip)
    } else {
        is_trusted_proxy(&peer_ip, trusted_proxies)
    };

    if trusted && let Some(real_ip) = forwarded_ip(headers) {
        debug!("Forwarded client IP {} via proxy {}", real_ip, peer_ip);
        return Some(real_ip);
    }
    Some(peer_ip.to_string())
}

/// 从请求中提取客户端 IP
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    let config = get_config();
    let peer = req.peer_addr().map(|a| a.to_string());
    resolve_client_ip(
        peer.as_deref(),
        req.headers(),
        &config.server.trusted_proxies,
    )
}
