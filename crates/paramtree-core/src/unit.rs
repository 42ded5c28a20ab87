//! Measurement units carried by parameters.
//!
//! The engine transmits a unit as a small integer. Codes follow the Audio Unit
//! parameter-unit numbering, so hosts can forward them unchanged. Decoding
//! never fails: any code outside the table becomes [`ParamUnit::Generic`].

use serde::{Deserialize, Serialize};

/// Unit type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamUnit {
    /// No particular unit.
    #[default]
    Generic,
    /// Integer index into a list of choices.
    Indexed,
    /// On/off toggle.
    Boolean,
    /// Percentage (%).
    Percent,
    /// Seconds (s).
    Seconds,
    /// Sample frames.
    SampleFrames,
    /// Phase, -π to π.
    Phase,
    /// Rate multiplier.
    Rate,
    /// Hertz (Hz) - filter cutoff, LFO rate.
    Hertz,
    /// Cents.
    Cents,
    /// Semitones relative to a reference.
    RelativeSemiTones,
    /// MIDI note number.
    MidiNoteNumber,
    /// MIDI controller value.
    MidiController,
    /// Decibels (dB) - gain, threshold and level.
    Decibels,
    /// Linear gain factor.
    LinearGain,
    /// Degrees (°).
    Degrees,
    /// Equal-power crossfade position.
    EqualPowerCrossfade,
    /// Mixer fader curve.
    MixerFaderCurve1,
    /// Stereo pan position.
    Pan,
    /// Distance in meters.
    Meters,
    /// Absolute cents.
    AbsoluteCents,
    /// Octaves.
    Octaves,
    /// Beats per minute.
    Bpm,
    /// Beats.
    Beats,
    /// Milliseconds (ms) - delay, attack and release times.
    Milliseconds,
    /// Ratio (n:1).
    Ratio,
}

impl ParamUnit {
    /// Every known unit, ordered by wire code.
    pub const ALL: [ParamUnit; 26] = [
        ParamUnit::Generic,
        ParamUnit::Indexed,
        ParamUnit::Boolean,
        ParamUnit::Percent,
        ParamUnit::Seconds,
        ParamUnit::SampleFrames,
        ParamUnit::Phase,
        ParamUnit::Rate,
        ParamUnit::Hertz,
        ParamUnit::Cents,
        ParamUnit::RelativeSemiTones,
        ParamUnit::MidiNoteNumber,
        ParamUnit::MidiController,
        ParamUnit::Decibels,
        ParamUnit::LinearGain,
        ParamUnit::Degrees,
        ParamUnit::EqualPowerCrossfade,
        ParamUnit::MixerFaderCurve1,
        ParamUnit::Pan,
        ParamUnit::Meters,
        ParamUnit::AbsoluteCents,
        ParamUnit::Octaves,
        ParamUnit::Bpm,
        ParamUnit::Beats,
        ParamUnit::Milliseconds,
        ParamUnit::Ratio,
    ];

    /// Decodes a wire code. Unknown codes fall back to [`ParamUnit::Generic`].
    ///
    /// ```rust
    /// use paramtree_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::from_code(8), ParamUnit::Hertz);
    /// assert_eq!(ParamUnit::from_code(-3), ParamUnit::Generic);
    /// assert_eq!(ParamUnit::from_code(999), ParamUnit::Generic);
    /// ```
    pub fn from_code(code: i32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(ParamUnit::Generic)
    }

    /// Returns the wire code for this unit.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the unit suffix for value display (no leading space).
    pub const fn suffix(self) -> &'static str {
        match self {
            ParamUnit::Hertz => "Hz",
            ParamUnit::Decibels => "dB",
            ParamUnit::Percent => "%",
            ParamUnit::Milliseconds => "ms",
            ParamUnit::Seconds => "s",
            ParamUnit::Cents | ParamUnit::AbsoluteCents => "cents",
            ParamUnit::RelativeSemiTones => "st",
            ParamUnit::LinearGain => "x",
            ParamUnit::Degrees => "°",
            ParamUnit::Ratio => ":1",
            ParamUnit::Bpm => "bpm",
            _ => "",
        }
    }
}
