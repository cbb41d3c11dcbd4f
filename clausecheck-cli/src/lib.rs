// All core functionality is in clausecheck-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod summary;

// Re-export core types for convenience
pub use clausecheck_core::*;

// Re-export CLI utilities
pub use summary::render_summary;
