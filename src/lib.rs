//! Differentiable Neural Computer memory-addressing core
//!
//! This crate implements the external-memory half of a DNC:
//! - Content addressing: cosine similarity sharpened by a learned key strength
//! - Usage tracking and usage-sorted allocation of free memory slots
//! - Temporal linkage recording write order for forward/backward traversal
//! - One write head and R read heads fused through learned gates and modes
//!
//! The recurrent controller is an external collaborator behind the
//! [`Controller`] trait ([`LstmController`] is the bundled reference
//! implementation). The memory module's persistent state is an explicit
//! [`MemoryState`] value: `reset` produces a zeroed state at sequence start
//! and every [`Dnc::step`] consumes the previous state by reference and
//! returns the next, so one sequence owns one state and nothing is shared.
//!
//! Every update is expressed through differentiable primitives (elementwise
//! arithmetic, matrix products, softmax, sigmoid, softplus and a sort-based
//! gather), so a recording tensor engine can replay the computation for
//! gradients. The addressing math itself is pure and deterministic; the only
//! randomness in the crate is controller/projection weight initialization.

pub mod addressing;
pub mod controller;
pub mod dnc;
pub mod error;
pub mod interface;
pub mod memory;

pub use controller::{Controller, Linear, LstmController};
pub use dnc::{Dnc, DncConfig};
pub use error::DncError;
pub use interface::Interface;
pub use memory::MemoryState;
