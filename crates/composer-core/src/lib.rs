//! Composer Core Types and Definitions
//!
//! This crate provides the foundational types for building connectivity path
//! diagrams out of knowledge-base statements. It includes:
//!
//! - **Identifiers**: Numeric entity identifiers ([`identifier::EntityId`])
//! - **Geometry**: Diagram coordinates ([`geometry::Point`])
//! - **Entities**: Anatomical entities and their display names ([`entity`] module)
//! - **Statements**: Origins, vias, destinations and forward connections
//!   ([`statement`] module)

pub mod entity;
pub mod geometry;
pub mod identifier;
pub mod statement;
