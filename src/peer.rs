use std::net::IpAddr;

use actix_web::HttpRequest;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

fn header_ip(request: &HttpRequest, name: &str) -> Option<IpAddr> {
    request
        .headers()
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// The address the request came from, as seen by this server.
///
/// Proxy headers are only consulted when `trust_proxy` is set.
pub fn client_ip(request: &HttpRequest, trust_proxy: bool) -> Option<String> {
    let forwarded = if trust_proxy {
        header_ip(request, X_FORWARDED_FOR).or_else(|| header_ip(request, X_REAL_IP))
    } else {
        None
    };

    forwarded
        .or_else(|| request.peer_addr().map(|addr| addr.ip()))
        .map(|ip| ip.to_canonical().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::test::TestRequest;

    #[test]
    fn test_client_ip_from_peer() {
        let request = TestRequest::default()
            .peer_addr("198.51.100.7:51000".parse().unwrap())
            .insert_header((X_FORWARDED_FOR, "203.0.113.1"))
            .to_http_request();

        assert_eq!(client_ip(&request, false).as_deref(), Some("198.51.100.7"));
    }

    #[test]
    fn test_client_ip_from_proxy_headers() {
        let request = TestRequest::default()
            .peer_addr("10.0.0.1:51000".parse().unwrap())
            .insert_header((X_FORWARDED_FOR, "203.0.113.1, 10.0.0.1"))
            .insert_header((X_REAL_IP, "203.0.113.2"))
            .to_http_request();
        assert_eq!(client_ip(&request, true).as_deref(), Some("203.0.113.1"));

        let request = TestRequest::default()
            .peer_addr("10.0.0.1:51000".parse().unwrap())
            .insert_header((X_REAL_IP, "203.0.113.2"))
            .to_http_request();
        assert_eq!(client_ip(&request, true).as_deref(), Some("203.0.113.2"));

        let request = TestRequest::default()
            .peer_addr("10.0.0.1:51000".parse().unwrap())
            .insert_header((X_FORWARDED_FOR, "garbage"))
            .to_http_request();
        assert_eq!(client_ip(&request, true).as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_client_ip_canonical_ipv4() {
        let request = TestRequest::default()
            .peer_addr("[::ffff:192.0.2.4]:51000".parse().unwrap())
            .to_http_request();

        assert_eq!(client_ip(&request, false).as_deref(), Some("192.0.2.4"));
    }

    #[test]
    fn test_client_ip_unknown() {
        let request = TestRequest::default().to_http_request();
        assert_eq!(client_ip(&request, true), None);
    }
}
