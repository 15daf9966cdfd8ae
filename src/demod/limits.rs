//! Filter-limit classification.
//!
//! How far apart the operator may drag the passband edges depends on what is
//! being demodulated. Secondary (overlay) decoders impose their own class;
//! otherwise the primary modulation decides. Unknown modulations fall back to
//! half the audio output rate rather than failing, favoring availability over
//! precision.

/// Minimum passband width in Hz, independent of mode.
pub const MIN_PASSBAND: i64 = 100;

/// Symmetric bounds the passband edges must stay within, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLimits {
    pub low: i64,
    pub high: i64,
}

impl FilterLimits {
    /// Limits spanning `±max_bw`.
    pub fn symmetric(max_bw: i64) -> Self {
        Self {
            low: -max_bw,
            high: max_bw,
        }
    }
}

/// Bandwidth class of a primary modulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandwidthClass {
    NarrowDigitalVoice,
    SsbData,
    WideFm,
    DigitalBroadcast,
    LowRateDigitalVoice,
    WidebandIsm,
    Streaming,
}

impl BandwidthClass {
    /// Half-width edge limit for this class, in Hz.
    pub fn max_bandwidth(self) -> i64 {
        match self {
            BandwidthClass::NarrowDigitalVoice => 6_250,
            BandwidthClass::SsbData => 24_000,
            BandwidthClass::WideFm => 100_000,
            BandwidthClass::DigitalBroadcast => 50_000,
            BandwidthClass::LowRateDigitalVoice => 4_000,
            BandwidthClass::WidebandIsm => 600_000,
            BandwidthClass::Streaming => 36_000,
        }
    }
}

/// Secondary decoders constrained to a 12.5 kHz channel.
const SECONDARY_NARROW: &[&str] = &["packet", "ais", "page"];

/// Secondary decoders constrained to a 25 kHz channel.
const SECONDARY_MEDIUM: &[&str] = &["vdl2", "wmbus"];

/// Primary modulation to bandwidth class.
const PRIMARY_CLASSES: &[(&str, BandwidthClass)] = &[
    ("dmr", BandwidthClass::NarrowDigitalVoice),
    ("dstar", BandwidthClass::NarrowDigitalVoice),
    ("nxdn", BandwidthClass::NarrowDigitalVoice),
    ("ysf", BandwidthClass::NarrowDigitalVoice),
    ("m17", BandwidthClass::NarrowDigitalVoice),
    ("usbd", BandwidthClass::SsbData),
    ("lsbd", BandwidthClass::SsbData),
    ("wfm", BandwidthClass::WideFm),
    ("drm", BandwidthClass::DigitalBroadcast),
    ("freedv", BandwidthClass::LowRateDigitalVoice),
    ("ism", BandwidthClass::WidebandIsm),
    ("streamer", BandwidthClass::Streaming),
];

/// Class of a primary modulation, if it has one.
pub fn class_of(modulation: &str) -> Option<BandwidthClass> {
    PRIMARY_CLASSES
        .iter()
        .find(|(m, _)| *m == modulation)
        .map(|(_, class)| *class)
}

/// Compute the filter limits for the given modulation selection.
///
/// Secondary modes take precedence over the primary modulation's class; a
/// modulation with no class at all gets `±output_rate/2`.
pub fn limits_for(modulation: &str, secondary: Option<&str>, output_rate: u32) -> FilterLimits {
    if let Some(secondary) = secondary {
        if SECONDARY_NARROW.contains(&secondary) {
            return FilterLimits::symmetric(12_500);
        }
        if SECONDARY_MEDIUM.contains(&secondary) {
            return FilterLimits::symmetric(25_000);
        }
    }
    let max_bw = match class_of(modulation) {
        Some(class) => class.max_bandwidth(),
        None => output_rate as i64 / 2,
    };
    FilterLimits::symmetric(max_bw)
}
