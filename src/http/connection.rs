use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::http::HttpError;
use crate::http::parser::parse_request_head;
use crate::http::reader::LineReader;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder};
use crate::http::writer::ResponseWriter;
use crate::routes::Router;

/// Handles exactly one request/response exchange on one TCP connection.
///
/// One `Connection` is spawned per accepted socket; it owns its stream, its
/// parser state and its response buffer outright, so connections never
/// synchronize with each other.
pub struct Connection {
    reader: LineReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    router: Router,
    state: State,
}

/// Per-connection state machine. Transitions are strictly sequential; with
/// no keep-alive, no state is ever revisited.
enum State {
    ReadingHeaders,
    ParsingHeaders(String),
    ReadingBody(Request),
    Routing(Request),
    WritingResponse(ResponseWriter),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, router: Router) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: LineReader::new(read_half),
            writer: write_half,
            router,
            state: State::ReadingHeaders,
        }
    }

    /// Drives the connection to completion.
    ///
    /// On any read or parse error a best-effort error response (400/500,
    /// empty body) is written before tearing the connection down; a write
    /// failure at that point is ignored, the client is gone either way.
    /// The connection is closed when this returns, success or failure.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        match self.exchange().await {
            Ok(()) => Ok(()),
            Err(e) => {
                let response = Response::empty(e.status());
                let mut writer = ResponseWriter::new(&response);
                let _ = writer.write_to_stream(&mut self.writer).await;
                Err(e.into())
            }
        }
    }

    async fn exchange(&mut self) -> Result<(), HttpError> {
        loop {
            match std::mem::replace(&mut self.state, State::Closed) {
                State::ReadingHeaders => {
                    match self.reader.read_header_block().await? {
                        Some(block) => {
                            self.state = State::ParsingHeaders(block);
                        }
                        None => {
                            // Client closed without sending a request.
                            self.state = State::Closed;
                        }
                    }
                }

                State::ParsingHeaders(block) => {
                    let request = parse_request_head(&block)?;
                    tracing::debug!(
                        method = ?request.line.method,
                        target = %request.line.target,
                        version = %request.line.version,
                        "Parsed request"
                    );
                    self.state = State::ReadingBody(request);
                }

                State::ReadingBody(mut request) => {
                    let declared = request.content_length()?;
                    if declared > 0 {
                        request.body = self.reader.read_body(declared).await?;
                    }
                    self.state = State::Routing(request);
                }

                State::Routing(request) => {
                    let outcome = self.router.dispatch(&request).await;
                    let response = ResponseBuilder::new(outcome.status)
                        .content_type(outcome.content_type.unwrap_or(""))
                        .body(outcome.body)
                        .gzip(request.accepts_gzip())
                        .build();

                    self.state = State::WritingResponse(ResponseWriter::new(&response));
                }

                State::WritingResponse(mut writer) => {
                    writer
                        .write_to_stream(&mut self.writer)
                        .await
                        .map_err(|e| {
                            HttpError::Io(std::io::Error::other(e))
                        })?;
                    self.state = State::Closed;
                }

                State::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
