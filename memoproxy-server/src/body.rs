use axum::body::Body;
use bytes::{Bytes, BytesMut};
use http_body_util::BodyExt;
use tracing::warn;

/// Buffers a request body, keeping whatever arrived before a read error.
pub async fn read_lossy(mut body: Body) -> Bytes {
    let mut buffer = BytesMut::new();
    while let Some(frame) = body.frame().await {
        match frame {
            Ok(frame) => {
                if let Ok(data) = frame.into_data() {
                    buffer.extend_from_slice(&data);
                }
            }
            Err(error) => {
                warn!(%error, received = buffer.len(), "request body read failed; continuing with partial body");
                break;
            }
        }
    }
    buffer.freeze()
}
