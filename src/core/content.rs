//! The tour itself: eight stages tracing a URL from the address bar to
//! pixels on screen. Dialog lines are markdown; `*emphasised*` keywords are
//! highlighted by the companion guide renderer.

use crate::core::journey::{Journey, Stage};

/// Stage identifiers, referenced by the TUI when picking a visualizer.
pub const BROWSER_INPUT: &str = "browser-input";
pub const URL_PARSING: &str = "url-parsing";
pub const DNS_RESOLUTION: &str = "dns-resolution";
pub const TCP_HANDSHAKE: &str = "tcp-handshake";
pub const TLS_HANDSHAKE: &str = "tls-handshake";
pub const HTTP_REQUEST: &str = "http-request";
pub const SERVER_PROCESSING: &str = "server-processing";
pub const BROWSER_RENDERING: &str = "browser-rendering";

/// Build the full journey. Called once at startup; `NavState::new` validates
/// the result.
pub fn journey() -> Journey {
    Journey::new(vec![
        Stage::new(
            BROWSER_INPUT,
            "Browser Input",
            &[
                "The browser's address bar is your gateway to the web. When you enter a URL:",
                "*Security*: Modern browsers automatically add 'https://' for encrypted connections",
                "*Input Processing*: Special characters are percent-encoded (e.g., space becomes %20)",
                "*HSTS*: Browsers maintain a preload list of HTTPS-only domains",
                "*Cache Check*: Browser checks its cache for previous visits",
            ],
        ),
        Stage::new(
            URL_PARSING,
            "URL Parsing",
            &[
                "*Protocol* (https://): Defines how data should be transmitted",
                "*Domain* (example.com): The website's address",
                "*Path* (/page): Specific resource location",
                "*Query* (?key=value): Additional parameters",
                "*Fragment* (#section): Specific section on the page",
                "*Punycode*: International domain names are converted to ASCII",
                "*Normalization*: URLs are standardized (e.g., removing default ports)",
            ],
        ),
        Stage::new(
            DNS_RESOLUTION,
            "DNS Resolution",
            &[
                "DNS resolution follows a hierarchical process:",
                "*Browser Cache*: First checks the browser's DNS cache",
                "*OS Cache*: Then checks the operating system's DNS cache",
                "*Hosts File*: System checks local hosts file for static entries",
                "*Resolver*: Local DNS resolver initiates recursive query",
                "*Root Servers*: 13 sets of root nameservers worldwide",
                "*Security*: DNSSEC provides cryptographic authentication",
            ],
        ),
        Stage::new(
            TCP_HANDSHAKE,
            "TCP Handshake",
            &[
                "*Socket Creation*: OS creates a network socket",
                "*Port Selection*: Client picks an ephemeral port (1024-65535)",
                "*SYN Flood Protection*: SYN cookies prevent DoS attacks",
                "*Window Scaling*: Negotiates optimal packet sizes",
                "*TCP Fast Open*: Allows data in SYN packet for faster connections",
                "*Congestion Control*: Initial window size is determined",
            ],
        ),
        Stage::new(
            TLS_HANDSHAKE,
            "TLS Handshake",
            &[
                "*ClientHello*: Browser sends supported TLS versions and ciphers",
                "*ServerHello*: Server selects TLS version and cipher suite",
                "*Certificate*: Server sends its X.509 certificate chain",
                "*Key Exchange*: Uses algorithms like ECDHE for perfect forward secrecy",
                "*Session Resumption*: TLS 1.3 enables 0-RTT connections",
                "*OCSP Stapling*: Efficient certificate revocation checking",
            ],
        ),
        Stage::new(
            HTTP_REQUEST,
            "HTTP Request",
            &[
                "*Method Selection*: GET, POST, etc. based on action",
                "*Headers*: User-Agent, Accept, Cookie, etc.",
                "*Compression*: Accept-Encoding negotiates compression",
                "*Caching*: If-Modified-Since, ETag for cache validation",
                "*Security Headers*: CORS, CSP protect against attacks",
                "*HTTP/2*: Multiplexing and header compression",
                "*HTTP/3*: QUIC protocol for improved performance",
            ],
        ),
        Stage::new(
            SERVER_PROCESSING,
            "Server Processing",
            &[
                "*Load Balancing*: Geographic and load-based distribution",
                "*TLS Termination*: Decryption at edge servers",
                "*CDN*: Content delivery networks cache static content",
                "*Application Logic*: Server processes the request",
                "*Database Queries*: Data retrieval and processing",
                "*Microservices*: Distributed system communication",
                "*Caching Layers*: Redis/Memcached for performance",
            ],
        ),
        Stage::new(
            BROWSER_RENDERING,
            "Browser Rendering",
            &[
                "*HTML Parsing*: Builds Document Object Model (DOM)",
                "*CSS Processing*: Creates CSS Object Model (CSSOM)",
                "*JavaScript*: Parser-blocking vs async/defer execution",
                "*Layout*: Computes geometry of all elements",
                "*Paint*: Converts layout to pixels on screen",
                "*Composite*: Layer management for animations",
                "*Web APIs*: ServiceWorker, WebAssembly, WebGL",
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequencer::NavState;

    #[test]
    fn content_is_a_valid_journey() {
        let journey = journey();
        assert_eq!(journey.len(), 8);
        // NavState::new performs the non-empty checks.
        NavState::new(&journey).expect("authored content must validate");
    }

    #[test]
    fn stage_ids_are_unique_and_ordered() {
        let journey = journey();
        let ids: Vec<&str> = journey.stages().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids[0], BROWSER_INPUT);
        assert_eq!(ids[7], BROWSER_RENDERING);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len(), "duplicate stage id");
    }
}
