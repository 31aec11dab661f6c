//! HTTP server configuration object and helpers.

use std::net::{SocketAddr, TcpListener};

/// Where the listener comes from.
#[derive(Debug)]
pub(crate) enum Binding {
    Addr(SocketAddr),
    Listener(TcpListener),
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug)]
pub struct ServerConfig {
    pub(crate) binding: Binding,
    pub(crate) cors_permissive: bool,
}

impl ServerConfig {
    /// Bind to `bind_addr` once the server is created.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            binding: Binding::Addr(bind_addr),
            cors_permissive: false,
        }
    }

    /// Serve on an already bound listener, e.g. one on an ephemeral port.
    #[must_use]
    pub fn from_listener(listener: TcpListener) -> Self {
        Self {
            binding: Binding::Listener(listener),
            cors_permissive: false,
        }
    }

    /// Accept cross-origin requests from any origin, method, and header.
    #[must_use]
    pub fn with_permissive_cors(mut self, enabled: bool) -> Self {
        self.cors_permissive = enabled;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> Option<SocketAddr> {
        match &self.binding {
            Binding::Addr(addr) => Some(*addr),
            Binding::Listener(listener) => listener.local_addr().ok(),
        }
    }
}
