//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the technical foundations the guards sit on:
//! - Cookie building, extraction and an in-memory cookie jar
//! - Durable key-value storage backends (memory, filesystem)
//! - The path-exclusion matcher for the edge tier

pub mod cookie;
pub mod matcher;
pub mod storage;
