use thiserror::Error;

/// Result type for the store client.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the store client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or IO failure while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// RESP2 framing or parse error.
    #[error("protocol error: {0}")]
    Protocol(&'static str),
    /// Server returned an error reply.
    #[error("server error: {}", String::from_utf8_lossy(.message))]
    Server { message: Vec<u8> },
    /// Reply type did not match what the command returns.
    #[error("unexpected response to {command}")]
    UnexpectedResponse { command: &'static str },
    /// Pool is at capacity and no idle connections are available.
    #[error("connection pool exhausted")]
    PoolExhausted,
    /// Address could not be parsed into a socket address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl ClientError {
    /// Returns true when the connection that produced this error can no
    /// longer be trusted to be in sync with the server.
    pub fn breaks_connection(&self) -> bool {
        matches!(self, ClientError::Io(_) | ClientError::Protocol(_))
    }
}
