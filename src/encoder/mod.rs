//! QR symbol encoding pipeline.
//!
//! [`Encoder`] drives the full pipeline: payload classification and
//! segmentation, version selection, bitstream serialization, Reed-Solomon
//! error correction, module placement and mask selection. The submodules
//! hold the individual stages.

/// Bit-level serialization and codeword block interleaving
pub mod bitstream;
/// BCH-protected format and version information words
pub mod format_info;
/// GF(256) arithmetic shared by the error correction stages
pub mod galois;
/// Mask trial, scoring and application
pub mod mask;
/// Encoding modes (numeric, alphanumeric, byte) and data segments
pub mod modes;
/// Function pattern placement and data module traversal
pub mod placement;
/// Reed-Solomon generator polynomials and remainder computation
pub mod reed_solomon;
/// Mixed-mode segmentation of a payload
pub mod segmenter;
/// Capacity and block layout tables
pub mod tables;

use crate::error::EncodeError;
use crate::models::{ECLevel, EciMode, QrCodeData, Version};
use bitstream::{BitBuffer, PAD_CODEWORDS};
use modes::{Mode, Segment};
use placement::ModulePlacer;

/// Which symbol versions the encoder may choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionRequest {
    /// Smallest standard version (1-40) that fits the payload
    #[default]
    Auto,
    /// Smallest Micro version (M1-M4) that fits the payload
    MicroAuto,
    /// Exactly the given version, or an error if the payload does not fit
    Fixed(Version),
}

/// QR and Micro QR symbol encoder.
///
/// The default configuration picks the smallest standard version at EC
/// level M, applies mixed-mode segmentation and adds the quiet zone:
///
/// ```
/// use rust_qr_gen::encoder::Encoder;
///
/// let qr = Encoder::new().encode("HELLO WORLD").unwrap();
/// assert_eq!(qr.version().number(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Encoder {
    /// Requested error correction level; `None` means M for standard
    /// symbols and L for Micro symbols
    pub ec_level: Option<ECLevel>,
    /// Version selection strategy
    pub version: VersionRequest,
    /// Character set declared for byte-mode payloads
    pub eci: EciMode,
    /// Encode text as UTF-8 even when it fits ISO-8859-1
    pub force_utf8: bool,
    /// Prefix UTF-8 payloads with a byte order mark
    pub utf8_bom: bool,
    /// Surround the symbol with the 4-module light border
    pub quiet_zone: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            ec_level: None,
            version: VersionRequest::Auto,
            eci: EciMode::Default,
            force_utf8: false,
            utf8_bom: false,
            quiet_zone: true,
        }
    }
}

/// How the payload turns into segments once the version is known
enum SegmentPlan {
    /// ISO-8859-1 text, re-segmented per version class because the
    /// mixed-mode thresholds depend on the count indicator widths
    Optimized { text: String, bytes: Vec<u8> },
    /// A pre-built segment list used as-is at every version
    Fixed(Vec<Segment>),
}

/// A classified payload ready for version selection
struct Payload {
    plan: SegmentPlan,
    /// Single-mode classification of the whole payload, used for Micro
    /// symbols and capacity error reporting
    mode: Mode,
}

impl Payload {
    fn has_eci_header(&self) -> bool {
        match &self.plan {
            SegmentPlan::Optimized { .. } => false,
            SegmentPlan::Fixed(segments) => segments.iter().any(|s| match s {
                Segment::Byte { eci, .. } => eci.designator().is_some(),
                _ => false,
            }),
        }
    }

    /// Segments for a standard version class (0: 1-9, 1: 10-26, 2: 27-40)
    fn segments_for_band(&self, band: usize) -> Vec<Segment> {
        match &self.plan {
            SegmentPlan::Optimized { bytes, .. } => segmenter::optimize(bytes, band),
            SegmentPlan::Fixed(segments) => segments.clone(),
        }
    }

    /// Single segment covering the whole payload, used for Micro symbols
    fn micro_segments(&self) -> Vec<Segment> {
        match &self.plan {
            SegmentPlan::Optimized { text, bytes } => {
                let segment = match self.mode {
                    Mode::Numeric => Segment::Numeric(text.clone()),
                    Mode::Alphanumeric => Segment::Alphanumeric(text.clone()),
                    Mode::Byte => Segment::Byte {
                        data: bytes.clone(),
                        eci: EciMode::Default,
                    },
                };
                vec![segment]
            }
            SegmentPlan::Fixed(segments) => segments.clone(),
        }
    }
}

impl Encoder {
    /// Encoder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error correction level
    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = Some(ec_level);
        self
    }

    /// Set the version selection strategy
    pub fn with_version(mut self, version: VersionRequest) -> Self {
        self.version = version;
        self
    }

    /// Declare the byte-mode character set
    pub fn with_eci(mut self, eci: EciMode) -> Self {
        self.eci = eci;
        self
    }

    /// Omit the quiet zone around the symbol
    pub fn without_quiet_zone(mut self) -> Self {
        self.quiet_zone = false;
        self
    }

    /// Encode a text payload into a symbol
    pub fn encode(&self, text: &str) -> Result<QrCodeData, EncodeError> {
        let payload = self.classify_text(text)?;
        self.encode_payload(payload)
    }

    /// Encode an opaque byte payload. The bytes go into a single byte-mode
    /// segment; the configured ECI character set is declared as-is.
    pub fn encode_binary(&self, data: &[u8]) -> Result<QrCodeData, EncodeError> {
        let payload = Payload {
            plan: SegmentPlan::Fixed(vec![Segment::Byte {
                data: data.to_vec(),
                eci: self.eci,
            }]),
            mode: Mode::Byte,
        };
        self.encode_payload(payload)
    }

    /// Turn text into a payload: decide the byte representation and
    /// whether mixed-mode segmentation applies
    fn classify_text(&self, text: &str) -> Result<Payload, EncodeError> {
        let latin1 = text.chars().all(|c| (c as u32) <= 0xFF);
        let wants_utf8 = self.eci == EciMode::Utf8 || self.force_utf8 || !latin1;
        if wants_utf8 {
            if self.eci != EciMode::Utf8 && self.eci != EciMode::Default {
                // a single-byte charset was requested for non-Latin-1 text
                return Err(EncodeError::InvalidCharacters { mode: Mode::Byte });
            }
            let mut bytes = Vec::with_capacity(text.len() + 3);
            if self.utf8_bom {
                bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
            }
            bytes.extend_from_slice(text.as_bytes());
            return Ok(Payload {
                plan: SegmentPlan::Fixed(vec![Segment::Byte {
                    data: bytes,
                    eci: self.eci,
                }]),
                mode: Mode::Byte,
            });
        }
        let bytes = modes::byte::encode_latin1(text)
            .ok_or(EncodeError::InvalidCharacters { mode: Mode::Byte })?;
        if self.eci.designator().is_some() {
            // an explicit charset declaration forces a byte-mode segment
            return Ok(Payload {
                plan: SegmentPlan::Fixed(vec![Segment::Byte {
                    data: bytes,
                    eci: self.eci,
                }]),
                mode: Mode::Byte,
            });
        }
        Ok(Payload {
            plan: SegmentPlan::Optimized {
                text: text.to_string(),
                bytes,
            },
            mode: Mode::classify(text),
        })
    }

    /// Version selection plus the placement pipeline
    fn encode_payload(&self, payload: Payload) -> Result<QrCodeData, EncodeError> {
        let (version, ec_level, segments) = self.select_version(&payload)?;
        let data = serialize_segments(&segments, version, ec_level);
        let info = tables::ecc_info(version, ec_level);
        let blocks = bitstream::build_blocks(&data, &info);
        let bits = match version {
            Version::Standard(_) => {
                let stream = bitstream::interleave_blocks(&data, &blocks);
                bytes_to_bits(&stream, stream.len() * 8)
            }
            Version::Micro(_) => {
                // Micro symbols carry an exact data bit count (a final
                // 4-bit codeword for M1/M3) followed by whole ECC bytes
                let mut bits = bytes_to_bits(&data, info.total_data_bits);
                // single block for every Micro version
                bits.extend(bytes_to_bits(&blocks[0].ecc, info.ecc_per_block * 8));
                bits
            }
        };
        let mut placer = ModulePlacer::new(version);
        placer.place_data(&bits);
        let (mut matrix, blocked) = placer.into_parts();
        mask::select_and_apply(&mut matrix, &blocked, version, ec_level);
        Ok(QrCodeData::new(matrix, version, self.quiet_zone))
    }

    /// Resolve the version request against the payload size
    fn select_version(
        &self,
        payload: &Payload,
    ) -> Result<(Version, ECLevel, Vec<Segment>), EncodeError> {
        match self.version {
            VersionRequest::Auto => {
                let ec_level = self.ec_level.unwrap_or(ECLevel::M);
                for (band, versions) in [(0, 1..=9u8), (1, 10..=26), (2, 27..=40)] {
                    let segments = payload.segments_for_band(band);
                    for v in versions {
                        let version = Version::Standard(v);
                        if modes::total_bits(&segments, version)
                            <= tables::total_data_bits(version, ec_level)
                        {
                            return Ok((version, ec_level, segments));
                        }
                    }
                }
                Err(EncodeError::DataTooLong {
                    ec_level,
                    mode: payload.mode,
                    max_capacity: tables::max_characters(
                        Version::Standard(40),
                        ec_level,
                        payload.mode,
                    ),
                })
            }
            VersionRequest::MicroAuto => {
                let ec_level = self.ec_level.unwrap_or(ECLevel::L);
                if payload.has_eci_header() {
                    return Err(EncodeError::EciNotSupported);
                }
                let segments = payload.micro_segments();
                for m in 1..=4u8 {
                    let version = Version::Micro(m);
                    if !tables::ec_level_available(version, ec_level) {
                        continue;
                    }
                    if !segments.iter().all(|s| s.mode().available_in(version)) {
                        continue;
                    }
                    if modes::total_bits(&segments, version)
                        <= tables::total_data_bits(version, ec_level)
                    {
                        return Ok((version, ec_level, segments));
                    }
                }
                if !tables::ec_level_available(Version::Micro(4), ec_level) {
                    return Err(EncodeError::UnsupportedEcLevel {
                        ec_level,
                        version: 4,
                    });
                }
                Err(EncodeError::DataTooLong {
                    ec_level,
                    mode: payload.mode,
                    max_capacity: tables::max_characters(
                        Version::Micro(4),
                        ec_level,
                        payload.mode,
                    ),
                })
            }
            VersionRequest::Fixed(version) => {
                let ec_level = self
                    .ec_level
                    .unwrap_or(if version.is_micro() { ECLevel::L } else { ECLevel::M });
                self.check_fixed_version(payload, version, ec_level)?;
                let segments = match version {
                    Version::Standard(_) => payload.segments_for_band(version.band()),
                    Version::Micro(_) => payload.micro_segments(),
                };
                if modes::total_bits(&segments, version)
                    > tables::total_data_bits(version, ec_level)
                {
                    return Err(EncodeError::DataTooLong {
                        ec_level,
                        mode: payload.mode,
                        max_capacity: tables::max_characters(version, ec_level, payload.mode),
                    });
                }
                Ok((version, ec_level, segments))
            }
        }
    }

    fn check_fixed_version(
        &self,
        payload: &Payload,
        version: Version,
        ec_level: ECLevel,
    ) -> Result<(), EncodeError> {
        match version {
            Version::Standard(v) => {
                if !(1..=40).contains(&v) {
                    return Err(EncodeError::InvalidVersion(version.signed_number()));
                }
            }
            Version::Micro(m) => {
                if !(1..=4).contains(&m) {
                    return Err(EncodeError::InvalidVersion(version.signed_number()));
                }
                if payload.has_eci_header() {
                    return Err(EncodeError::EciNotSupported);
                }
                if !tables::ec_level_available(version, ec_level) {
                    return Err(EncodeError::UnsupportedEcLevel {
                        ec_level,
                        version: m,
                    });
                }
                for segment in payload.micro_segments() {
                    if !segment.mode().available_in(version) {
                        return Err(EncodeError::UnsupportedMode {
                            mode: segment.mode(),
                            version: m,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Serialize segments and fill the remaining capacity: terminator, pad to
/// a codeword boundary, alternating pad codewords, zeros for a trailing
/// 4-bit codeword
fn serialize_segments(segments: &[Segment], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let capacity = tables::total_data_bits(version, ec_level);
    let mut buf = BitBuffer::new();
    for segment in segments {
        segment.write(&mut buf, version);
    }
    debug_assert!(buf.len() <= capacity, "segments exceed selected capacity");
    let terminator = tables::terminator_bits(version).min(capacity - buf.len());
    buf.append_bits(0, terminator);
    let align = ((8 - buf.len() % 8) % 8).min(capacity - buf.len());
    buf.append_bits(0, align);
    let mut pad = 0;
    while capacity - buf.len() >= 8 {
        buf.append_bits(PAD_CODEWORDS[pad % 2] as u32, 8);
        pad += 1;
    }
    buf.append_bits(0, capacity - buf.len());
    buf.as_bytes().to_vec()
}

/// Expand the first `count` bits of a byte slice, most significant first
fn bytes_to_bits(bytes: &[u8], count: usize) -> Vec<bool> {
    debug_assert!(count <= bytes.len() * 8);
    (0..count)
        .map(|i| (bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
        .collect()
}
