//! Command implementations for the ripple CLI

pub mod check;
pub mod route;
pub mod run;
