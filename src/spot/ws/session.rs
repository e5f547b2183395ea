//! WebSocket stream session: connect, read loop, dispatch and shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use crate::error::BinanceError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound on the closing handshake once shutdown is requested.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Callback invoked with the payload of every text or binary frame.
pub type WsHandler = Box<dyn FnMut(&[u8]) + Send + 'static>;

/// Callback invoked with every read error.
pub type WsErrorHandler = Box<dyn FnMut(BinanceError) + Send + 'static>;

/// Lifecycle state of a [`WsSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SessionState {
    /// Created, no connection established yet.
    Unconnected = 0,
    /// Connected and reading (or ready to read).
    Running = 1,
    /// Shut down; the transport has been closed.
    Closed = 2,
}

impl SessionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SessionState::Unconnected,
            1 => SessionState::Running,
            _ => SessionState::Closed,
        }
    }
}

#[derive(Debug)]
struct Shared {
    shutdown: watch::Sender<bool>,
    state: AtomicU8,
    frames_received: AtomicU64,
    read_errors: AtomicU64,
}

impl Shared {
    fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            shutdown,
            state: AtomicU8::new(SessionState::Unconnected as u8),
            frames_received: AtomicU64::new(0),
            read_errors: AtomicU64::new(0),
        }
    }

    fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: SessionState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Cloneable control handle for a [`WsSession`].
///
/// Obtained with [`WsSession::handle`] before the session is moved into
/// [`WsSession::run`]. Any clone, on any task or thread, may request
/// shutdown.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    shared: Arc<Shared>,
}

impl SessionHandle {
    /// Request shutdown.
    ///
    /// The read loop stops at its next iteration, closes the connection and
    /// returns. Idempotent: repeated calls have no further effect. A request
    /// made before the loop starts makes it return immediately.
    pub fn shutdown(&self) {
        let already = self.shared.shutdown.send_replace(true);
        if !already {
            tracing::debug!("WebSocket session shutdown requested");
        }
    }

    /// Whether shutdown has been requested.
    pub fn is_shutdown_requested(&self) -> bool {
        *self.shared.shutdown.borrow()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// Number of text and binary frames delivered to the handler.
    pub fn frames_received(&self) -> u64 {
        self.shared.frames_received.load(Ordering::Relaxed)
    }

    /// Number of read errors delivered to the error handler.
    pub fn read_errors(&self) -> u64 {
        self.shared.read_errors.load(Ordering::Relaxed)
    }
}

/// A single WebSocket connection to one stream endpoint.
///
/// Every text or binary frame is passed, unmodified and in arrival order,
/// to the message handler. Read errors go to the error handler and never
/// end the loop; only [`SessionHandle::shutdown`] does.
///
/// # Example
///
/// ```rust,ignore
/// use binance_api_client::spot::ws::WsSession;
///
/// let session = WsSession::new("wss://stream.binance.com:9443/ws/btcusdt@aggTrade")
///     .with_handler(|payload| println!("{}", String::from_utf8_lossy(payload)))
///     .with_error_handler(|err| eprintln!("read error: {err}"));
///
/// let handle = session.handle();
/// let task = tokio::spawn(session.serve());
///
/// // ... later
/// handle.shutdown();
/// task.await??;
/// ```
pub struct WsSession {
    /// Full stream URL.
    endpoint: String,
    /// Frame payload callback.
    handler: WsHandler,
    /// Read error callback.
    error_handler: WsErrorHandler,
    /// State shared with handles.
    shared: Arc<Shared>,
    /// Connection established by [`WsSession::connect`].
    connection: Option<WsStream>,
}

impl std::fmt::Debug for WsSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsSession")
            .field("endpoint", &self.endpoint)
            .field("state", &self.shared.state())
            .field("connected", &self.connection.is_some())
            .finish()
    }
}

impl WsSession {
    /// Create an unconnected session for `endpoint`.
    ///
    /// The default message handler discards frames; the default error
    /// handler logs the error at warn level and discards it.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            handler: Box::new(discard_frame),
            error_handler: Box::new(log_read_error),
            shared: Arc::new(Shared::new()),
            connection: None,
        }
    }

    /// Set the message handler.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&[u8]) + Send + 'static,
    {
        self.handler = Box::new(handler);
        self
    }

    /// Set the error handler.
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(BinanceError) + Send + 'static,
    {
        self.error_handler = Box::new(handler);
        self
    }

    /// The stream URL this session connects to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a control handle for this session.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// Open the WebSocket connection.
    ///
    /// On failure the session stays [`SessionState::Unconnected`] and the
    /// error describes the cause (invalid URL, DNS, refused, TLS, handshake).
    pub async fn connect(&mut self) -> Result<(), BinanceError> {
        let state = self.state();
        if self.connection.is_some() || state != SessionState::Unconnected {
            return Err(BinanceError::WebSocketMsg(format!(
                "Session for {} is {:?}, cannot connect",
                self.endpoint, state
            )));
        }

        let url = Url::parse(&self.endpoint)?;
        let (ws_stream, _) = connect_async(url.as_str()).await.map_err(|e| {
            BinanceError::WebSocketMsg(format!("Failed to connect to {}: {}", self.endpoint, e))
        })?;

        self.connection = Some(ws_stream);
        self.shared.set_state(SessionState::Running);
        tracing::info!("WebSocket connected to {}", self.endpoint);
        Ok(())
    }

    /// Run the read loop on the connection opened by [`connect`](Self::connect).
    ///
    /// Returns `Ok(())` once shutdown has been requested and the connection
    /// closed, or [`BinanceError::NotConnected`] if there is no connection.
    pub async fn run(mut self) -> Result<(), BinanceError> {
        let connection = self.connection.take().ok_or(BinanceError::NotConnected)?;
        self.read_loop(connection).await
    }

    /// Connect, then run the read loop.
    pub async fn serve(mut self) -> Result<(), BinanceError> {
        self.connect().await?;
        self.run().await
    }

    /// Run the read loop over an already established transport.
    ///
    /// Any connection stored by [`connect`](Self::connect) is dropped.
    pub async fn run_on<T>(mut self, transport: T) -> Result<(), BinanceError>
    where
        T: Stream<Item = Result<WsMessage, WsError>> + Sink<WsMessage, Error = WsError> + Unpin,
    {
        self.connection = None;
        self.read_loop(transport).await
    }

    async fn read_loop<T>(&mut self, mut transport: T) -> Result<(), BinanceError>
    where
        T: Stream<Item = Result<WsMessage, WsError>> + Sink<WsMessage, Error = WsError> + Unpin,
    {
        self.shared.set_state(SessionState::Running);
        let mut shutdown = self.shared.shutdown.subscribe();
        // Set once the transport yields `None`; it is never polled again.
        let mut exhausted = false;
        // A stream that ends right after an error has already been reported.
        let mut last_was_error = false;

        loop {
            tokio::select! {
                biased;

                _ = shutdown_requested(&mut shutdown) => break,

                frame = transport.next(), if !exhausted => match frame {
                    Some(Ok(message)) => {
                        last_was_error = false;
                        self.dispatch(message);
                    }
                    Some(Err(e)) => {
                        last_was_error = true;
                        self.report(BinanceError::WebSocket(e));
                    }
                    None => {
                        exhausted = true;
                        if !last_was_error {
                            self.report(BinanceError::ConnectionClosed {
                                reason: "stream ended".to_string(),
                            });
                        }
                    }
                },
            }
        }

        match tokio::time::timeout(CLOSE_TIMEOUT, transport.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("Error closing WebSocket to {}: {}", self.endpoint, e),
            Err(_) => tracing::debug!("Closing WebSocket to {} timed out", self.endpoint),
        }
        drop(transport);
        self.shared.set_state(SessionState::Closed);
        tracing::info!(
            frames = self.shared.frames_received.load(Ordering::Relaxed),
            read_errors = self.shared.read_errors.load(Ordering::Relaxed),
            "WebSocket session to {} closed",
            self.endpoint
        );
        Ok(())
    }

    fn dispatch(&mut self, message: WsMessage) {
        match message {
            WsMessage::Text(text) => self.deliver(text.as_bytes()),
            WsMessage::Binary(data) => self.deliver(&data),
            WsMessage::Ping(_) | WsMessage::Pong(_) => {
                tracing::trace!("Control frame from {}", self.endpoint);
            }
            WsMessage::Close(frame) => {
                tracing::debug!("Close frame from {}: {:?}", self.endpoint, frame);
            }
            WsMessage::Frame(_) => {}
        }
    }

    fn deliver(&mut self, payload: &[u8]) {
        self.shared.frames_received.fetch_add(1, Ordering::Relaxed);
        (self.handler)(payload);
    }

    fn report(&mut self, error: BinanceError) {
        self.shared.read_errors.fetch_add(1, Ordering::Relaxed);
        (self.error_handler)(error);
    }
}

async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    // Err means every sender is gone, which only happens with the session.
    let _ = shutdown.wait_for(|stop| *stop).await;
}

fn discard_frame(_payload: &[u8]) {}

fn log_read_error(error: BinanceError) {
    tracing::warn!("WebSocket read error: {}", error);
}
