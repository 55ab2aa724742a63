//! sortic_nav_core - Pure no_std navigation logic for sortic shuttle vehicles
//!
//! This crate contains the platform-agnostic navigation state machine and
//! the data model it operates on. It can be tested on host without any
//! feature flags or platform dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: The drive layer is injected via [`drive::DriveCtrl`]
//!
//! # Modules
//!
//! - [`topology`]: Sectors, areas and the sector name codec
//! - [`drive`]: Drive collaborator trait and motion primitives
//! - [`navigation`]: Position model, checkpoints, transition table and controller
//! - [`parameters`]: Navigation parameters and validation

#![no_std]

pub mod drive;
pub mod navigation;
pub mod parameters;
pub mod topology;
