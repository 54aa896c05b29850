//! Outbound adapters: implementations of the domain's ports against
//! external systems. Persistence is the only outbound concern here.

pub mod persistence;
