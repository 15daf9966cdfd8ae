//! Modulation mode registry.
//!
//! Static metadata for the modes a receiver backend offers: default passband,
//! IF rate where the mode dictates one, and whether squelch applies. Digital
//! overlay modes name the analog modes they can ride on and inherit their
//! passband when they do not define one of their own.

use serde::{Deserialize, Serialize};

/// A passband, both edges in Hz relative to the demodulator's offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bandpass {
    pub low_cut: i64,
    pub high_cut: i64,
}

impl Bandpass {
    pub const fn new(low_cut: i64, high_cut: i64) -> Self {
        Self { low_cut, high_cut }
    }

    /// Width of the passband in Hz.
    pub fn width(&self) -> i64 {
        self.high_cut - self.low_cut
    }
}

/// Metadata for a single modulation mode.
#[derive(Debug, Clone, Copy)]
pub struct Mode {
    pub modulation: &'static str,
    pub name: &'static str,
    pub bandpass: Option<Bandpass>,
    /// IF sample rate the mode requires, when the passband alone does not
    /// capture its bandwidth needs (e.g. wideband burst modes).
    pub if_rate: Option<u32>,
    pub squelch: bool,
    /// Analog modes a digital overlay can ride on; empty for analog modes.
    pub underlying: &'static [&'static str],
}

impl Mode {
    const fn analog(modulation: &'static str, name: &'static str, bandpass: Bandpass) -> Self {
        Self {
            modulation,
            name,
            bandpass: Some(bandpass),
            if_rate: None,
            squelch: true,
            underlying: &[],
        }
    }

    const fn digital_voice(modulation: &'static str, name: &'static str, bandpass: Bandpass) -> Self {
        Self {
            modulation,
            name,
            bandpass: Some(bandpass),
            if_rate: None,
            squelch: false,
            underlying: &[],
        }
    }

    /// Default passband, falling back to the first underlying mode's.
    pub fn bandpass(&self) -> Option<Bandpass> {
        if self.bandpass.is_some() {
            return self.bandpass;
        }
        self.underlying
            .first()
            .and_then(|m| find_by_modulation(m))
            .and_then(|m| m.bandpass())
    }

    /// Occupied bandwidth in Hz: twice the larger cut magnitude, but never
    /// less than the IF rate when one is declared.
    pub fn bandwidth(&self) -> i64 {
        let mut bandwidth = 0;
        if let Some(bp) = self.bandpass() {
            bandwidth = 2 * bp.low_cut.abs().max(bp.high_cut.abs());
        }
        if let Some(if_rate) = self.if_rate {
            bandwidth = bandwidth.max(if_rate as i64);
        }
        bandwidth
    }
}

/// All client-selectable modes, analog first, then digital overlays.
pub const MODES: &[Mode] = &[
    Mode::analog("nfm", "FM", Bandpass::new(-4000, 4000)),
    Mode::analog("wfm", "WFM", Bandpass::new(-75_000, 75_000)),
    Mode::analog("am", "AM", Bandpass::new(-4000, 4000)),
    Mode::analog("sam", "SAM", Bandpass::new(-4000, 4000)),
    Mode::analog("lsb", "LSB", Bandpass::new(-2750, -150)),
    Mode::analog("usb", "USB", Bandpass::new(150, 2750)),
    Mode::analog("cw", "CW", Bandpass::new(700, 900)),
    Mode::analog("usbd", "DATA", Bandpass::new(0, 24_000)),
    Mode::analog("lsbd", "DATA-L", Bandpass::new(-24_000, 0)),
    Mode::digital_voice("dmr", "DMR", Bandpass::new(-6250, 6250)),
    Mode::digital_voice("dstar", "D-Star", Bandpass::new(-3250, 3250)),
    Mode::digital_voice("nxdn", "NXDN", Bandpass::new(-3250, 3250)),
    Mode::digital_voice("ysf", "YSF", Bandpass::new(-6250, 6250)),
    Mode::digital_voice("m17", "M17", Bandpass::new(-6250, 6250)),
    Mode::digital_voice("freedv", "FreeDV", Bandpass::new(300, 3000)),
    Mode::digital_voice("drm", "DRM", Bandpass::new(-5000, 5000)),
    Mode {
        modulation: "packet",
        name: "Packet",
        bandpass: Some(Bandpass::new(-6250, 6250)),
        if_rate: None,
        squelch: false,
        underlying: &["nfm"],
    },
    Mode {
        modulation: "ais",
        name: "AIS",
        bandpass: Some(Bandpass::new(-6250, 6250)),
        if_rate: None,
        squelch: false,
        underlying: &["nfm"],
    },
    Mode {
        modulation: "page",
        name: "Page",
        bandpass: Some(Bandpass::new(-6000, 6000)),
        if_rate: None,
        squelch: false,
        underlying: &["nfm"],
    },
    Mode {
        modulation: "vdl2",
        name: "VDL2",
        bandpass: Some(Bandpass::new(-12_500, 12_500)),
        if_rate: None,
        squelch: false,
        underlying: &[],
    },
    Mode {
        modulation: "wmbus",
        name: "WMBus",
        bandpass: Some(Bandpass::new(-125_000, 125_000)),
        if_rate: None,
        squelch: false,
        underlying: &[],
    },
    Mode {
        modulation: "ism",
        name: "ISM",
        bandpass: None,
        if_rate: Some(250_000),
        squelch: false,
        underlying: &[],
    },
    Mode {
        modulation: "streamer",
        name: "Streamer",
        bandpass: Some(Bandpass::new(-18_000, 18_000)),
        if_rate: None,
        squelch: false,
        underlying: &[],
    },
];

/// Look up a mode by its modulation key.
pub fn find_by_modulation(modulation: &str) -> Option<&'static Mode> {
    MODES.iter().find(|m| m.modulation == modulation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_modulation() {
        let mode = find_by_modulation("nfm").expect("nfm should be registered");
        assert_eq!(mode.name, "FM");
        assert_eq!(mode.bandpass(), Some(Bandpass::new(-4000, 4000)));
        assert!(find_by_modulation("nosuchmode").is_none());
    }

    #[test]
    fn test_bandwidth_from_bandpass() {
        // wfm: 2 * max(|-75000|, |75000|) = 150 kHz
        let wfm = find_by_modulation("wfm").unwrap();
        assert_eq!(wfm.bandwidth(), 150_000);

        // Asymmetric passband still counts the larger edge
        let usb = find_by_modulation("usb").unwrap();
        assert_eq!(usb.bandwidth(), 5500);
    }

    #[test]
    fn test_bandwidth_respects_if_rate() {
        let ism = find_by_modulation("ism").unwrap();
        assert_eq!(ism.bandwidth(), 250_000);
    }

    #[test]
    fn test_squelch_only_on_analog_modes() {
        for mode in MODES {
            let analog = matches!(
                mode.modulation,
                "nfm" | "wfm" | "am" | "sam" | "lsb" | "usb" | "cw" | "usbd" | "lsbd"
            );
            assert_eq!(
                mode.squelch, analog,
                "squelch flag wrong for {}",
                mode.modulation
            );
        }
    }

    #[test]
    fn test_underlying_mode_keys_resolve() {
        for mode in MODES {
            for underlying in mode.underlying {
                assert!(
                    find_by_modulation(underlying).is_some(),
                    "mode {} names unknown underlying mode {}",
                    mode.modulation,
                    underlying
                );
            }
        }
    }
}
