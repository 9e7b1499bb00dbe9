use tower_http::compression::CompressionLayer;

/// Response compression, negotiated from the request's `Accept-Encoding`.
/// Rendered pages are small, so anything under the default threshold goes out as-is.
pub fn compression_layer() -> CompressionLayer {
    CompressionLayer::new()
}
