//! I/O utilities shared by the transfer engine.

pub mod chunk;
pub mod counting;

pub use chunk::ChunkBuffer;
pub use counting::CountingWriter;
