//! Shared library module for the hanoi app crate.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod action;
pub mod action_handler;
pub mod app;
pub mod cli;
pub mod replay;
pub mod state;
