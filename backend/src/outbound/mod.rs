//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL record store repositories using Diesel ORM.
//!
//! Adapters translate between domain records and store rows. They contain no
//! business logic.

pub mod persistence;
