// Configuration for the gateway admin client

/// Configuration for the console's HTTP client.
#[derive(Clone, Debug)]
pub struct ConsoleClientConfig {
    /// Gateway address (e.g. "http://127.0.0.1:8080")
    pub server_addr: String,
    /// Context path prefixed to every request path (default: empty)
    pub context_path: String,
    /// Connection timeout in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds (default: 30000)
    pub read_timeout_ms: u64,
}

impl Default for ConsoleClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "http://127.0.0.1:8080".to_string(),
            context_path: String::new(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
        }
    }
}

impl ConsoleClientConfig {
    /// Create a new config pointed at a gateway address.
    pub fn new(server_addr: &str) -> Self {
        Self {
            server_addr: server_addr.to_string(),
            ..Default::default()
        }
    }

    /// Create a config from the environment.
    ///
    /// Reads `ACEPROXY_SERVER_ADDR`; falls back to the default address.
    pub fn from_env() -> Self {
        match std::env::var("ACEPROXY_SERVER_ADDR") {
            Ok(addr) if !addr.is_empty() => Self::new(&addr),
            _ => Self::default(),
        }
    }

    /// Set timeouts.
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    /// Set context path.
    pub fn with_context_path(mut self, path: &str) -> Self {
        self.context_path = path.to_string();
        self
    }
}
