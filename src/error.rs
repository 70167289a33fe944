//! Error types for the encoding pipeline.
//!
//! [`EncodeError`] covers every caller-visible failure mode, from payload
//! validation through version selection. Internal invariant violations
//! (e.g. the logarithm of zero in GF(256)) panic instead — they indicate a
//! bug in the encoder, never bad input.

use crate::encoder::modes::Mode;
use crate::models::ECLevel;

/// Errors that can occur while encoding a payload into a QR symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The payload does not fit any permitted version at the requested
    /// error correction level. Carries the largest character capacity
    /// observed so callers can react (lower the EC level, split the
    /// payload, ...).
    #[error(
        "data too long for {mode:?} mode at EC level {ec_level:?} (max {max_capacity} characters)"
    )]
    DataTooLong {
        /// EC level the capacity was computed for
        ec_level: ECLevel,
        /// Encoding mode the payload was classified as
        mode: Mode,
        /// Maximum character capacity over the permitted versions
        max_capacity: usize,
    },
    /// A fixed version outside 1-40 (standard) or M1-M4 (Micro) was requested.
    #[error("invalid version {0} (expected 1-40 or -1..-4 for Micro)")]
    InvalidVersion(i8),
    /// The payload contains characters outside the alphabet of the
    /// requested mode.
    #[error("payload contains characters not representable in {mode:?} mode")]
    InvalidCharacters {
        /// The mode whose alphabet was violated
        mode: Mode,
    },
    /// The requested EC level is not available for the requested Micro
    /// version (M1 supports L only; M2/M3 support L and M; M4 adds Q).
    #[error("EC level {ec_level:?} is not supported by Micro version M{version}")]
    UnsupportedEcLevel {
        /// Requested level
        ec_level: ECLevel,
        /// Micro version number (1-4)
        version: u8,
    },
    /// The requested mode is not available for the requested Micro version
    /// (M1 is numeric-only; byte mode needs M3+), or an ECI header was
    /// requested for a Micro symbol.
    #[error("{mode:?} mode is not supported by Micro version M{version}")]
    UnsupportedMode {
        /// Requested or implied mode
        mode: Mode,
        /// Micro version number (1-4)
        version: u8,
    },
    /// An ECI character set was requested for a Micro symbol, which has no
    /// ECI capability.
    #[error("ECI headers are not supported by Micro QR symbols")]
    EciNotSupported,
}
