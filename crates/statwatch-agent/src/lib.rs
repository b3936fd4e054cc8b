//! Agent-side wiring for statwatch: the HTTP stats source and the
//! binaries that drive it.

pub mod source;
