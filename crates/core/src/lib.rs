//! Proximity ranking for geolocated records
//!
//! This crate turns an uploaded CSV of device pings into ranked results:
//!
//! - **Ingestion**: CSV tables with normalised, case-insensitive headers
//! - **Processing**: coordinate cleaning, distance annotation, stable ranking
//! - **Nearby query**: records clustered around the last registered entry
//! - **Export**: CSV/JSON re-export, map projection, summary statistics
//! - **Configuration**: TOML defaults for reference point and radius
//! - **Sharing**: SMS deep links
//!
//! # Example
//!
//! ```rust
//! use pingrank_core::{process_reader, AnchorStrategy};
//! use pingrank_geo::Coordinate;
//!
//! let csv = "ID,Latitude,Longitude\nA,0,0\nB,0,1\nC,10,10\n";
//! let batch = process_reader(csv.as_bytes(), Coordinate::new(0.0, 0.0)).unwrap();
//! assert_eq!(batch.ranked()[0].record.id, "A");
//!
//! let nearby = batch.nearby(2000.0, &AnchorStrategy::LastRow).unwrap().unwrap();
//! assert_eq!(nearby.anchor.id, "C");
//! assert_eq!(nearby.members[0].record.id, "B");
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod export;
pub mod nearby;
pub mod processor;
pub mod record;
pub mod share;
pub mod summary;
pub mod table;

pub use error::{exit_codes, ErrorCode, FailureKind, ProcessError, Result};
pub use export::MapPoint;
pub use nearby::{find_nearby, find_nearby_from, AnchorStrategy, NearbyMember, NearbyResult};
pub use processor::{process, process_reader, ProcessedBatch};
pub use record::{LocationRecord, RankedRecord, SkipReason};
pub use summary::DistanceSummary;
pub use table::{columns, Table};

