/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Image fetchers.
pub mod fetch;
/// Paired start/end loading.
pub mod loader;
