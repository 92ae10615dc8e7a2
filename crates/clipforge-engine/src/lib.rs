#![deny(unreachable_patterns)]
//! Content intelligence engines for ClipForge.
//!
//! This crate provides the two pure, synchronous transforms at the heart of
//! the clip pipeline:
//! - Candidate segmentation and scoring: word-level transcript + scene cuts +
//!   engagement hotspots -> ranked, non-overlapping clip segments
//! - Speaker-aware framing: per-frame face detections -> smooth, bounded
//!   9:16 crop path serialized as piecewise-linear filter expressions
//!
//! Both engines degrade instead of failing: an empty segment list and a
//! `None` crop path are valid outcomes the orchestrator handles, never
//! errors. Given identical inputs, outputs are byte-identical.

pub mod framing;
pub mod segmentation;

pub use framing::{build_piecewise_expr, compute_crop_map, FaceSignal, FramingConfig};
pub use segmentation::{detect_segments, SegmentDetector, SegmenterConfig};
