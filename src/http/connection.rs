use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tokio::time::timeout;

use crate::config::{ConnectionConfig, MalformedPolicy};
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routing::router::Router;

/// One accepted client stream and its request/response loop.
pub struct Connection<S> {
    stream: BufReader<S>,
    router: Arc<Router>,
    config: ConnectionConfig,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, config: ConnectionConfig) -> Self {
        Self {
            stream: BufReader::new(stream),
            router,
            config,
            state: ConnectionState::Reading,
        }
    }

    /// Serves requests until the client stops asking for keep-alive,
    /// goes away, or sends something unparseable.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(text) => match parse_http_request(&text) {
                        Ok(req) => {
                            self.state = ConnectionState::Processing(req);
                        }
                        Err(e) => match self.config.on_malformed {
                            MalformedPolicy::Close => {
                                return Err(anyhow::anyhow!("HTTP parse error: {}", e));
                            }
                            MalformedPolicy::BadRequest => {
                                tracing::warn!(error = %e, "Malformed request, answering 400");
                                let mut response = Response::bad_request();
                                response.header_mut().set_connection("close");
                                let writer = ResponseWriter::new(&response);
                                self.state = ConnectionState::Writing(writer, false);
                            }
                        },
                    },
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let mut response = self.router.handle(req);

                    let keep_alive = req.keep_alive();
                    response
                        .header_mut()
                        .set_connection(if keep_alive { "keep-alive" } else { "close" });

                    tracing::debug!(
                        method = %req.method,
                        path = %req.path,
                        status = response.header().status(),
                        keep_alive,
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    let keep_alive = *keep_alive;
                    writer.write_to_stream(self.stream.get_mut()).await?;

                    if keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads lines up to the first empty one and joins them with `\n`.
    ///
    /// Returns `None` when the peer closes the stream or the configured
    /// read timeout expires before the head is complete.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<String>> {
        let mut text = String::new();

        loop {
            let mut line = String::new();

            let n = match self.config.read_timeout() {
                Some(limit) => match timeout(limit, self.stream.read_line(&mut line)).await {
                    Ok(read) => read?,
                    Err(_) => {
                        tracing::info!(timeout = ?limit, "Read timed out, closing connection");
                        return Ok(None);
                    }
                },
                None => self.stream.read_line(&mut line).await?,
            };

            if n == 0 {
                if !text.is_empty() {
                    tracing::debug!("Client closed connection mid-request");
                }
                return Ok(None);
            }

            let line = line.strip_suffix('\n').unwrap_or(&line);
            let line = line.strip_suffix('\r').unwrap_or(line);

            if line.is_empty() {
                return Ok(Some(text));
            }

            text.push_str(line);
            text.push('\n');
        }
    }
}
