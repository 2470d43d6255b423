use crate::backend::ByteStream;
use crate::fragment::line_stream;
use bytes::Bytes;
use futures::{Stream, TryStreamExt, future};

/// Raw pass-through of backend lines.
///
/// Every non-blank line is emitted as its own chunk, byte-for-byte plus a
/// trailing `\n`. Nothing is parsed. At most one line is held at a time: the
/// next line is only pulled from `lines` after the previous chunk has been
/// taken by the consumer.
pub fn relay<S, E>(lines: S) -> impl Stream<Item = Result<Bytes, E>>
where
    S: Stream<Item = Result<String, E>>,
{
    lines.try_filter_map(|line| future::ready(Ok(frame_line(line))))
}

fn frame_line(mut line: String) -> Option<Bytes> {
    if line.trim().is_empty() {
        return None;
    }
    line.push('\n');
    Some(Bytes::from(line))
}

/// Relay a live backend body as an actix streaming body.
///
/// A backend read error ends the response; dropping the returned stream (for
/// example when the client goes away) drops the backend connection.
pub fn relay_backend_body(
    body: ByteStream,
    backend_url: String,
) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
    relay(line_stream(body)).map_err(move |e| {
        log::error!("Stream error from backend {}: {}", backend_url, e);
        actix_web::error::ErrorBadGateway(format!("Stream error: {}", e))
    })
}
