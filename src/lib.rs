//! Devsnap - snapshot normalization for device enumeration data.
//!
//! This library provides the core functionality for devsnap, including:
//! - Embedded rule tables mapping host-specific device keys to stable ones
//! - Field rewrites for `/dev/disk` symlink paths, devpaths and device-mapper UUIDs
//! - Canonical, key-sorted pretty printing
//! - Fail-open snapshot serializers for test harnesses
//!
//! # Example
//!
//! ```no_run
//! use devsnap::config::BuiltinTable;
//! use devsnap::serializer::{DeviceSerializer, Snapshot, SnapshotSerializer};
//!
//! let serializer = DeviceSerializer::builtin(BuiltinTable::Udev).unwrap();
//! let raw = std::fs::read("udev.json").unwrap();
//!
//! let snapshot = Snapshot::Bytes(&raw);
//! if serializer.test(&snapshot) {
//!     println!("{}", serializer.print(&snapshot).text());
//! }
//! ```

pub mod config;
pub mod error;
pub mod normalize;
pub mod rules;
pub mod serializer;

pub use error::{DevsnapError, Result, ShapeError};
