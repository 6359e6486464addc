//! Modulator kinds a modulation slot can run.

use core::fmt;
use core::str::FromStr;

/// Which modulator is active in a modulation slot.
///
/// The authoritative value is owned by the modulation engine. `None` is the
/// state before the first sync and the fallback for any index the engine
/// reports that is not one of the seven known kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModType {
    /// Smooth fractal noise.
    Perlin,
    /// MIDI-note-controlled oscillator with an ADSR envelope.
    AudioRate,
    /// Random tape-style pitch dropouts.
    Dropout,
    /// Envelope follower on the input signal.
    EnvFol,
    /// Direct manual control of the vibrato delay.
    Macro,
    /// Host pitch-bend wheel.
    Pitchwheel,
    /// Wavetable LFO, free running or tempo synced.
    Lfo,
    /// No modulator selected.
    #[default]
    None,
}

/// Error returned when parsing an unknown modulator identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModType;

impl fmt::Display for UnknownModType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown modulator type")
    }
}

impl ModType {
    /// The seven selectable modulators, in engine index order.
    pub const ALL: [ModType; 7] = [
        ModType::Perlin,
        ModType::AudioRate,
        ModType::Dropout,
        ModType::EnvFol,
        ModType::Macro,
        ModType::Pitchwheel,
        ModType::Lfo,
    ];

    /// Engine index of this modulator, `None` for [`ModType::None`].
    pub const fn index(self) -> Option<usize> {
        match self {
            ModType::Perlin => Some(0),
            ModType::AudioRate => Some(1),
            ModType::Dropout => Some(2),
            ModType::EnvFol => Some(3),
            ModType::Macro => Some(4),
            ModType::Pitchwheel => Some(5),
            ModType::Lfo => Some(6),
            ModType::None => None,
        }
    }

    /// Map an engine index back to a modulator.
    ///
    /// Anything outside `0..7` becomes [`ModType::None`].
    ///
    /// ```rust
    /// use vibrato_core::ModType;
    ///
    /// assert_eq!(ModType::from_index(2), ModType::Dropout);
    /// assert_eq!(ModType::from_index(7), ModType::None);
    /// ```
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(ModType::None)
    }

    /// Stable identifier used in patch files.
    pub const fn as_str(self) -> &'static str {
        match self {
            ModType::Perlin => "perlin",
            ModType::AudioRate => "audio_rate",
            ModType::Dropout => "dropout",
            ModType::EnvFol => "env_fol",
            ModType::Macro => "macro",
            ModType::Pitchwheel => "pitchbend",
            ModType::Lfo => "lfo",
            ModType::None => "none",
        }
    }

    /// Title shown at the top of the slot panel.
    pub const fn title(self) -> &'static str {
        match self {
            ModType::Perlin => "Perlin",
            ModType::AudioRate => "AudioRate",
            ModType::Dropout => "Dropout",
            ModType::EnvFol => "Envelope\nFollower",
            ModType::Macro => "Macro",
            ModType::Pitchwheel => "Pitchbend",
            ModType::Lfo => "LFO",
            ModType::None => "None",
        }
    }

    /// Compact label for the selector grid button.
    pub const fn button_label(self) -> &'static str {
        match self {
            ModType::AudioRate => "Audio\nRate",
            ModType::EnvFol => "Env\nFol",
            ModType::Pitchwheel => "Pitch\nBend",
            other => other.title(),
        }
    }

    /// Selector tooltip.
    pub const fn description(self) -> &'static str {
        match self {
            ModType::Perlin => "The perlin noise modulator uses natural noise to modulate the vibrato.",
            ModType::AudioRate => "The audio rate modulator uses a midi-note-controlled oscillator to modulate the vibrato.",
            ModType::Dropout => "The dropout modulator simulates random pitch dropouts similar to tape artefacts.",
            ModType::EnvFol => "The envelope follower modulates the vibrato according to your input signal's energy.",
            ModType::Macro => "Directly manipulate the vibrato's internal delay with this modulator.",
            ModType::Pitchwheel => "Use your pitchbend wheel to modulate the vibrato with this modulator.",
            ModType::Lfo => "Modulate the vibrato with (more or less) classic LFO shapes.",
            ModType::None => "",
        }
    }

    /// Where the modulator takes its input from, if not internal.
    pub const fn input_hint(self) -> Option<&'static str> {
        match self {
            ModType::AudioRate | ModType::Pitchwheel => Some("midi in >>"),
            ModType::EnvFol => Some("audio in >>"),
            _ => None,
        }
    }
}

impl fmt::Display for ModType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModType {
    type Err = UnknownModType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ModType::None),
            _ => Self::ALL
                .into_iter()
                .find(|t| t.as_str().eq_ignore_ascii_case(s))
                .ok_or(UnknownModType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_known_types() {
        for (i, t) in ModType::ALL.into_iter().enumerate() {
            assert_eq!(t.index(), Some(i));
            assert_eq!(ModType::from_index(i), t);
        }
        assert_eq!(ModType::None.index(), None);
    }

    #[test]
    fn out_of_range_index_is_none() {
        assert_eq!(ModType::from_index(7), ModType::None);
        assert_eq!(ModType::from_index(usize::MAX), ModType::None);
    }

    #[test]
    fn parse_identifiers() {
        assert_eq!("lfo".parse::<ModType>(), Ok(ModType::Lfo));
        assert_eq!("Env_Fol".parse::<ModType>(), Ok(ModType::EnvFol));
        assert_eq!("none".parse::<ModType>(), Ok(ModType::None));
        assert_eq!("wobble".parse::<ModType>(), Err(UnknownModType));
    }

    #[test]
    fn input_hints() {
        assert_eq!(ModType::AudioRate.input_hint(), Some("midi in >>"));
        assert_eq!(ModType::Pitchwheel.input_hint(), Some("midi in >>"));
        assert_eq!(ModType::EnvFol.input_hint(), Some("audio in >>"));
        assert_eq!(ModType::Perlin.input_hint(), None);
    }

    #[test]
    fn every_selectable_type_has_a_tooltip() {
        for t in ModType::ALL {
            assert!(!t.description().is_empty(), "{t}");
            assert!(!t.button_label().is_empty(), "{t}");
        }
        assert_eq!(ModType::None.title(), "None");
    }
}
