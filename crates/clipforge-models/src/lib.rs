//! Shared data models for the ClipForge content engines.
//!
//! This crate provides Serde-serializable types for:
//! - Word-level transcripts and speaker tags
//! - Scene changes, chapters, and time ranges
//! - Scored clip segments and their feature vectors
//! - Face detections, tracks, and crop keyframes

pub mod crop;
pub mod face;
pub mod geometry;
pub mod segment;
pub mod timeline;
pub mod timestamp;
pub mod transcript;

// Re-export common types
pub use crop::{AspectRatio, Axis, CropKeyframe};
pub use face::{FaceDetection, FaceLandmarks, FaceTrack, TrackId, TrackSample};
pub use geometry::BoundingBox;
pub use segment::{DurationTier, FeatureVector, Segment};
pub use timeline::{ChapterWindow, SceneChange, TimeRange};
pub use timestamp::{format_seconds, parse_timestamp, TimestampError};
pub use transcript::{flatten_utterances, SpeakerId, TranscriptWord};
