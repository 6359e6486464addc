//! Catalogue of the per-slot modulator parameters.
//!
//! Every modulation slot carries the full set of parameters for all seven
//! modulators, whether or not that modulator is currently active, so that
//! switching modulators never loses settings. [`ModParam`] names one entry;
//! its position in [`ModParam::ALL`] is the slot-relative parameter index.

use crate::mod_type::ModType;
use crate::param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit};

/// Base of the stable parameter IDs of slot `n`: `(n + 1) * SLOT_ID_STRIDE`.
pub const SLOT_ID_STRIDE: u32 = 1000;

/// Number of modulation slots per plugin instance.
pub const NUM_SLOTS: usize = 2;

/// One parameter of one modulator.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModParam {
    PerlinFreq,
    PerlinOctaves,
    PerlinWidth,

    AudioRateOct,
    AudioRateSemi,
    AudioRateFine,
    AudioRateWidth,
    AudioRateRetuneSpeed,
    AudioRateAtk,
    AudioRateDcy,
    AudioRateSus,
    AudioRateRls,

    DropoutDecay,
    DropoutSpin,
    DropoutChance,
    DropoutSmooth,
    DropoutWidth,

    EnvFolAttack,
    EnvFolRelease,
    EnvFolGain,
    EnvFolWidth,

    Macro,

    PitchbendSmooth,

    LfoFreeSync,
    LfoRateFree,
    LfoRateSync,
    LfoWaveform,
    LfoPhase,
    LfoWidth,
}

impl ModParam {
    /// All parameters in slot-index order.
    pub const ALL: [ModParam; 29] = [
        ModParam::PerlinFreq,
        ModParam::PerlinOctaves,
        ModParam::PerlinWidth,
        ModParam::AudioRateOct,
        ModParam::AudioRateSemi,
        ModParam::AudioRateFine,
        ModParam::AudioRateWidth,
        ModParam::AudioRateRetuneSpeed,
        ModParam::AudioRateAtk,
        ModParam::AudioRateDcy,
        ModParam::AudioRateSus,
        ModParam::AudioRateRls,
        ModParam::DropoutDecay,
        ModParam::DropoutSpin,
        ModParam::DropoutChance,
        ModParam::DropoutSmooth,
        ModParam::DropoutWidth,
        ModParam::EnvFolAttack,
        ModParam::EnvFolRelease,
        ModParam::EnvFolGain,
        ModParam::EnvFolWidth,
        ModParam::Macro,
        ModParam::PitchbendSmooth,
        ModParam::LfoFreeSync,
        ModParam::LfoRateFree,
        ModParam::LfoRateSync,
        ModParam::LfoWaveform,
        ModParam::LfoPhase,
        ModParam::LfoWidth,
    ];

    /// Number of parameters per slot.
    pub const COUNT: usize = Self::ALL.len();

    /// Slot-relative index of this parameter.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parameter at a slot-relative index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Look a parameter up by its patch-file string ID.
    pub fn from_string_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.descriptor().string_id == id)
    }

    /// Modulator this parameter belongs to.
    pub const fn mod_type(self) -> ModType {
        use ModParam::*;
        match self {
            PerlinFreq | PerlinOctaves | PerlinWidth => ModType::Perlin,
            AudioRateOct | AudioRateSemi | AudioRateFine | AudioRateWidth
            | AudioRateRetuneSpeed | AudioRateAtk | AudioRateDcy | AudioRateSus
            | AudioRateRls => ModType::AudioRate,
            DropoutDecay | DropoutSpin | DropoutChance | DropoutSmooth | DropoutWidth => {
                ModType::Dropout
            }
            EnvFolAttack | EnvFolRelease | EnvFolGain | EnvFolWidth => ModType::EnvFol,
            Macro => ModType::Macro,
            PitchbendSmooth => ModType::Pitchwheel,
            LfoFreeSync | LfoRateFree | LfoRateSync | LfoWaveform | LfoPhase | LfoWidth => {
                ModType::Lfo
            }
        }
    }

    /// Parameters belonging to `mod_type`, in panel order.
    pub fn for_mod_type(mod_type: ModType) -> impl Iterator<Item = ModParam> {
        Self::ALL.into_iter().filter(move |p| p.mod_type() == mod_type)
    }

    /// Stable ID of this parameter in slot `slot`.
    pub fn param_id(self, slot: usize) -> ParamId {
        ParamId((slot as u32 + 1) * SLOT_ID_STRIDE + self.index() as u32)
    }

    /// Descriptor with the slot-relative ID (its index) and string ID filled in.
    pub fn descriptor(self) -> ParamDescriptor {
        use ModParam::*;
        let desc = match self {
            PerlinFreq => ParamDescriptor::new("Perlin Frequency", "Freq", ParamUnit::Hertz, 0.1, 40.0, 2.0)
                .with_scale(ParamScale::Logarithmic),
            PerlinOctaves => ParamDescriptor::stepped("Perlin Octaves", "Oct", ParamUnit::None, 1.0, 7.0, 3.0),
            PerlinWidth => ParamDescriptor::width(),

            AudioRateOct => ParamDescriptor::stepped("Oscillator Octave", "Oct", ParamUnit::Octaves, -3.0, 3.0, 0.0),
            AudioRateSemi => ParamDescriptor::stepped("Oscillator Semitone", "Semi", ParamUnit::Semitones, -12.0, 12.0, 0.0),
            AudioRateFine => ParamDescriptor::new("Oscillator Fine", "Fine", ParamUnit::Cents, -100.0, 100.0, 0.0),
            AudioRateWidth => ParamDescriptor::width(),
            AudioRateRetuneSpeed => ParamDescriptor::new("Retune Speed", "Legato", ParamUnit::Milliseconds, 0.0, 500.0, 20.0),
            AudioRateAtk => ParamDescriptor::new("Envelope Attack", "A", ParamUnit::Milliseconds, 0.0, 2000.0, 10.0),
            AudioRateDcy => ParamDescriptor::new("Envelope Decay", "D", ParamUnit::Milliseconds, 0.0, 2000.0, 200.0),
            AudioRateSus => ParamDescriptor::new("Envelope Sustain", "S", ParamUnit::Percent, 0.0, 100.0, 70.0),
            AudioRateRls => ParamDescriptor::new("Envelope Release", "R", ParamUnit::Milliseconds, 0.0, 2000.0, 300.0),

            DropoutDecay => ParamDescriptor::new("Dropout Decay", "Decay", ParamUnit::Milliseconds, 1.0, 2000.0, 300.0)
                .with_scale(ParamScale::Logarithmic),
            DropoutSpin => ParamDescriptor::new("Dropout Spin", "Spin", ParamUnit::Percent, 0.0, 100.0, 50.0),
            DropoutChance => ParamDescriptor::new("Dropout Chance", "Chance", ParamUnit::Percent, 0.0, 100.0, 20.0),
            DropoutSmooth => ParamDescriptor::new("Dropout Hardness", "Hard", ParamUnit::Percent, 0.0, 100.0, 50.0),
            DropoutWidth => ParamDescriptor::width(),

            EnvFolAttack => ParamDescriptor::new("Follower Attack", "Attack", ParamUnit::Milliseconds, 1.0, 1000.0, 40.0)
                .with_scale(ParamScale::Logarithmic),
            EnvFolRelease => ParamDescriptor::new("Follower Release", "Release", ParamUnit::Milliseconds, 1.0, 2000.0, 200.0)
                .with_scale(ParamScale::Logarithmic),
            EnvFolGain => ParamDescriptor::new("Follower Gain", "Gain", ParamUnit::Decibels, -24.0, 24.0, 0.0)
                .with_step(0.5),
            EnvFolWidth => ParamDescriptor::width(),

            Macro => ParamDescriptor::new("Macro", "Macro", ParamUnit::Percent, 0.0, 100.0, 0.0),

            PitchbendSmooth => ParamDescriptor::new("Pitchbend Smoothing", "Smooth", ParamUnit::Milliseconds, 0.0, 1000.0, 20.0),

            LfoFreeSync => ParamDescriptor::switch("LFO Tempo Sync", "sync"),
            LfoRateFree => ParamDescriptor::new("LFO Rate", "Rate", ParamUnit::Hertz, 0.05, 20.0, 1.0)
                .with_scale(ParamScale::Logarithmic),
            LfoRateSync => ParamDescriptor::new("LFO Rate (Sync)", "Rate", ParamUnit::Beats, 0.0625, 16.0, 1.0)
                .with_scale(ParamScale::Logarithmic),
            LfoWaveform => ParamDescriptor::new("LFO Waveform", "WT", ParamUnit::None, 0.0, 1.0, 0.0),
            LfoPhase => ParamDescriptor::new("LFO Phase", "Phase", ParamUnit::Percent, 0.0, 100.0, 0.0),
            LfoWidth => ParamDescriptor::width(),
        };
        desc.with_id(ParamId(self.index() as u32), self.string_id())
    }

    /// Patch-file identifier.
    pub const fn string_id(self) -> &'static str {
        use ModParam::*;
        match self {
            PerlinFreq => "perlin_freq",
            PerlinOctaves => "perlin_octaves",
            PerlinWidth => "perlin_width",
            AudioRateOct => "audio_rate_oct",
            AudioRateSemi => "audio_rate_semi",
            AudioRateFine => "audio_rate_fine",
            AudioRateWidth => "audio_rate_width",
            AudioRateRetuneSpeed => "audio_rate_retune_speed",
            AudioRateAtk => "audio_rate_atk",
            AudioRateDcy => "audio_rate_dcy",
            AudioRateSus => "audio_rate_sus",
            AudioRateRls => "audio_rate_rls",
            DropoutDecay => "dropout_decay",
            DropoutSpin => "dropout_spin",
            DropoutChance => "dropout_chance",
            DropoutSmooth => "dropout_smooth",
            DropoutWidth => "dropout_width",
            EnvFolAttack => "env_fol_attack",
            EnvFolRelease => "env_fol_release",
            EnvFolGain => "env_fol_gain",
            EnvFolWidth => "env_fol_width",
            Macro => "macro",
            PitchbendSmooth => "pitchbend_smooth",
            LfoFreeSync => "lfo_free_sync",
            LfoRateFree => "lfo_rate_free",
            LfoRateSync => "lfo_rate_sync",
            LfoWaveform => "lfo_waveform",
            LfoPhase => "lfo_phase",
            LfoWidth => "lfo_width",
        }
    }

    /// Tooltip text shown when hovering the parameter's control.
    pub const fn tooltip(self) -> &'static str {
        use ModParam::*;
        match self {
            PerlinFreq => "The frequency in which the modulator picks new values.",
            PerlinOctaves => "Defines the modulator's complexity / roughness.",
            AudioRateOct => "Transpose the oscillator in octave steps.",
            AudioRateSemi => "Transpose the oscillator in semitone steps.",
            AudioRateFine => "Transpose the oscillator in finetone steps.",
            AudioRateRetuneSpeed => "Defines this oscillator's retune speed.",
            AudioRateAtk => "Defines the envelope's attack value.",
            AudioRateDcy => "Defines the envelope's decay value.",
            AudioRateSus => "Defines the envelope's sustain value.",
            AudioRateRls => "Defines the envelope's release value.",
            DropoutDecay => "The approximate decay of the dropout.",
            DropoutSpin => "Give it a little spin.",
            DropoutChance => "The likelyness of new dropouts to appear.",
            DropoutSmooth => "Defines the smoothness of the dropouts.",
            EnvFolAttack => "The envelope follower's attack time in milliseconds.",
            EnvFolRelease => "The envelope follower's release time in milliseconds.",
            EnvFolGain => "This modulator's input gain.",
            Macro => "Directly manipulate the vibrato's internal delay time.",
            PitchbendSmooth => "Set the pitchbend-smoothing time in ms.",
            LfoFreeSync => "Switch between free running and temposync LFOs.",
            LfoRateFree => "Adjust the frequency of the LFO in hz.",
            LfoRateSync => "Adjust the frequency of the LFO in beats.",
            LfoWaveform => "Interpolate between the LFO's waveforms.",
            LfoPhase => "Add a phase offset to the LFO.",
            LfoWidth => "Add a phase offset to the right/side channel.",
            PerlinWidth | AudioRateWidth | DropoutWidth | EnvFolWidth => {
                "The modulator's stereo-width."
            }
        }
    }
}

/// Descriptor of the shared mods-mix parameter that crossfades slot 0 and slot 1.
pub fn mods_mix_descriptor() -> ParamDescriptor {
    ParamDescriptor::new("Mods Mix", "Mix", ParamUnit::Percent, 0.0, 100.0, 50.0)
        .with_id(ParamId(1), "mods_mix")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position() {
        for (i, p) in ModParam::ALL.into_iter().enumerate() {
            assert_eq!(p.index(), i);
            assert_eq!(ModParam::from_index(i), Some(p));
        }
        assert_eq!(ModParam::from_index(ModParam::COUNT), None);
    }

    #[test]
    fn param_counts_per_modulator() {
        let count = |t| ModParam::for_mod_type(t).count();
        assert_eq!(count(ModType::Perlin), 3);
        assert_eq!(count(ModType::AudioRate), 9);
        assert_eq!(count(ModType::Dropout), 5);
        assert_eq!(count(ModType::EnvFol), 4);
        assert_eq!(count(ModType::Macro), 1);
        assert_eq!(count(ModType::Pitchwheel), 1);
        assert_eq!(count(ModType::Lfo), 6);
        assert_eq!(count(ModType::None), 0);
    }

    #[test]
    fn string_ids_are_unique_and_resolvable() {
        for p in ModParam::ALL {
            assert_eq!(ModParam::from_string_id(p.string_id()), Some(p));
        }
        assert_eq!(ModParam::from_string_id("nope"), None);
    }

    #[test]
    fn defaults_within_range() {
        for p in ModParam::ALL {
            let d = p.descriptor();
            assert!(d.min <= d.default && d.default <= d.max, "{p:?}");
            assert_eq!(d.id, ParamId(p.index() as u32));
        }
    }

    #[test]
    fn stable_ids_per_slot() {
        assert_eq!(ModParam::PerlinFreq.param_id(0), ParamId(1000));
        assert_eq!(ModParam::LfoWidth.param_id(1), ParamId(2028));
    }
}
