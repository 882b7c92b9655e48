/// Caption layout and rasterization.
pub mod caption;
/// Premultiplied source-over compositing.
pub mod composite;
/// Frame buffers and cropping.
pub mod frame;
