//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use hostelops::inbound::http::state::HttpStatePorts;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: HttpStatePorts,
}

impl ServerConfig {
    /// Construct a server configuration from the bound address and the
    /// driven adapters the handlers run on.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, ports: HttpStatePorts) -> Self {
        Self { bind_addr, ports }
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by server bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
