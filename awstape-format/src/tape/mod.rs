pub mod reader;
#[cfg(feature = "writer")]
pub mod writer;
