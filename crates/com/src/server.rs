use {
    crate::{ComError, Request, Response, apply_cors, empty_response, error_response, framing},
    base::log,
    futures_util::future::BoxFuture,
    http::{Method, StatusCode},
    std::{net::SocketAddr, sync::Arc, time::Duration},
    tokio::{
        io::BufReader,
        net::{TcpListener, TcpStream, ToSocketAddrs},
        task::JoinHandle,
        time::timeout,
    },
};

/// Time a client gets to send its complete request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a request into a response. Routing, decoding and error mapping live here.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: Request) -> BoxFuture<'_, Response>;
}

/// HTTP server; the accept loop stops when this is dropped.
pub struct HttpServer {
    accept_task: JoinHandle<()>,
    local_addr: SocketAddr,
}

impl HttpServer {
    /// Bind a TCP listener and start serving connections with `handler`.
    ///
    /// Every connection gets its own task and carries exactly one request.
    /// CORS headers are added to every response, and `OPTIONS` preflights are
    /// answered with 204 without reaching the handler.
    pub async fn bind(addr: impl ToSocketAddrs, handler: Arc<dyn Handler>) -> Result<Self, ComError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let accept_task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, peer)) => {
                        let handler = Arc::clone(&handler);
                        tokio::spawn(serve_connection(stream, peer, handler));
                    }
                    Err(e) => {
                        log::warn!("accept error: {}", e);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                }
            }
        });

        Ok(Self {
            accept_task,
            local_addr,
        })
    }

    /// Return the local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

async fn serve_connection(stream: TcpStream, peer: SocketAddr, handler: Arc<dyn Handler>) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let mut response = match timeout(REQUEST_TIMEOUT, framing::read_request(&mut reader)).await {
        Err(_) => {
            log::debug!("{} timed out sending its request", peer);
            error_response(StatusCode::REQUEST_TIMEOUT, "request timed out")
        }
        Ok(Ok(request)) => {
            log::debug!("{} {} {}", peer, request.method(), request.uri());
            if request.method() == Method::OPTIONS {
                empty_response(StatusCode::NO_CONTENT)
            } else {
                handler.handle(request).await
            }
        }
        Ok(Err(ComError::ConnectionClosed)) => return,
        Ok(Err(ComError::Io(e))) => {
            log::warn!("failed to read request from {}: {}", peer, e);
            return;
        }
        Ok(Err(ComError::MessageTooLarge(len))) => error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            &format!("request of {} bytes is too large", len),
        ),
        Ok(Err(e)) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    apply_cors(&mut response);
    if let Err(e) = framing::write_response(&mut write_half, &response).await {
        log::warn!("failed to write response to {}: {}", peer, e);
    }
}
