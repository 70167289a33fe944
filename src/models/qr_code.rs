use super::BitMatrix;

/// Width of the quiet zone baked into a padded symbol, in modules
pub const QUIET_ZONE_WIDTH: usize = 4;

/// QR code version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// Standard (Model 2) symbol, versions 1-40
    Standard(u8),
    /// Micro QR symbol, versions M1-M4
    Micro(u8),
}

impl Version {
    /// Get the version number: 1-40 for standard, 1-4 for Micro
    pub fn number(&self) -> u8 {
        match self {
            Version::Standard(v) | Version::Micro(v) => *v,
        }
    }

    /// Signed version number as used in external interfaces:
    /// 1..40 for standard symbols, -1..-4 for M1..M4. Out-of-range
    /// numbers saturate instead of wrapping.
    pub fn signed_number(&self) -> i8 {
        match self {
            Version::Standard(v) => i8::try_from(*v).unwrap_or(i8::MAX),
            Version::Micro(v) => i8::try_from(*v).map_or(i8::MIN, |v| -v),
        }
    }

    /// Side length in modules (width = height), without quiet zone
    pub fn size(&self) -> usize {
        match self {
            Version::Standard(v) => 4 * (*v as usize) + 17,
            Version::Micro(v) => 2 * (*v as usize) + 9,
        }
    }

    /// Check if this is a Micro QR version
    pub fn is_micro(&self) -> bool {
        matches!(self, Version::Micro(_))
    }

    /// 0-based band index for count-indicator widths (versions 1-9,
    /// 10-26, 27-40). Micro versions map to band 0.
    pub fn band(&self) -> usize {
        match self {
            Version::Standard(v) if *v >= 27 => 2,
            Version::Standard(v) if *v >= 10 => 1,
            _ => 0,
        }
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// Table row index (L=0, M=1, Q=2, H=3)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The 2-bit value written into standard format information
    /// (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 1,
            ECLevel::M => 0,
            ECLevel::Q => 3,
            ECLevel::H => 2,
        }
    }
}

/// Mask pattern (0-7), predicates over (x = column, y = row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPattern {
    /// (x + y) % 2 == 0
    Pattern0 = 0,
    /// y % 2 == 0
    Pattern1 = 1,
    /// x % 3 == 0
    Pattern2 = 2,
    /// (x + y) % 3 == 0
    Pattern3 = 3,
    /// (x/3 + y/2) % 2 == 0
    Pattern4 = 4,
    /// (x*y)%2 + (x*y)%3 == 0
    Pattern5 = 5,
    /// ((x*y)%2 + (x*y)%3) % 2 == 0
    Pattern6 = 6,
    /// ((x+y)%2 + (x*y)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns, in the standard's evaluation order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// The subset legal for Micro QR symbols, indexed by the 2-bit Micro
    /// mask reference written into Micro format information
    pub const MICRO: [MaskPattern; 4] = [
        MaskPattern::Pattern1,
        MaskPattern::Pattern4,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// 3-bit value written into standard format information
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Check if the data module at (x, y) should be inverted
    pub fn is_masked(&self, x: usize, y: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (x + y) % 2 == 0,
            MaskPattern::Pattern1 => y % 2 == 0,
            MaskPattern::Pattern2 => x % 3 == 0,
            MaskPattern::Pattern3 => (x + y) % 3 == 0,
            MaskPattern::Pattern4 => (x / 3 + y / 2) % 2 == 0,
            MaskPattern::Pattern5 => (x * y) % 2 + (x * y) % 3 == 0,
            MaskPattern::Pattern6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        }
    }
}

/// Extended Channel Interpretation mode for byte-mode payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EciMode {
    /// No ECI header; bytes are interpreted as ISO-8859-1
    #[default]
    Default,
    /// ISO-8859-1 (Latin-1), ECI designator 3
    Iso8859_1,
    /// ISO-8859-2 (Latin-2), ECI designator 4
    Iso8859_2,
    /// UTF-8, ECI designator 26
    Utf8,
}

impl EciMode {
    /// ECI assignment number written after the ECI mode indicator,
    /// or `None` when no header is emitted
    pub fn designator(&self) -> Option<u8> {
        match self {
            EciMode::Default => None,
            EciMode::Iso8859_1 => Some(3),
            EciMode::Iso8859_2 => Some(4),
            EciMode::Utf8 => Some(26),
        }
    }
}

/// The encoded QR symbol: the module matrix plus its metadata
///
/// This is the artifact handed to renderer collaborators. Renderers read
/// the matrix row-major via [`QrCodeData::is_dark`] and never mutate it.
#[derive(Debug, Clone)]
pub struct QrCodeData {
    modules: BitMatrix,
    version: Version,
    quiet_zone: bool,
}

impl QrCodeData {
    /// Wrap a finished module matrix. When `quiet_zone` is set the matrix
    /// is grown by a 4-module light border on every side.
    pub(crate) fn new(modules: BitMatrix, version: Version, quiet_zone: bool) -> Self {
        let modules = if quiet_zone {
            modules.with_margin(QUIET_ZONE_WIDTH)
        } else {
            modules
        };
        Self {
            modules,
            version,
            quiet_zone,
        }
    }

    /// The module matrix, quiet zone included when requested
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Whether a 4-module quiet zone is baked into the matrix dimensions
    pub fn has_quiet_zone(&self) -> bool {
        self.quiet_zone
    }

    /// Side length of the matrix in modules, quiet zone included
    pub fn size(&self) -> usize {
        self.modules.size()
    }

    /// Check whether the module at (x, y) is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Number of dark modules, quiet zone included
    pub fn dark_module_count(&self) -> usize {
        self.modules.count_dark()
    }
}
