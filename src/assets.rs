/// Source image decoding.
pub mod decode;
/// Caption font resolution (download or local file).
pub mod font;
