//! Descriptors for the values a modulation slot exposes.
//!
//! The panel never stores parameters itself. It reads and writes plain values
//! (Hz, ms, %) through the host and uses a [`ParamDescriptor`] to move between
//! those and the normalized `[0, 1]` space that knobs, patches and the
//! randomizer work in.
//!
//! Allocation free and `no_std`.

/// Display unit of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Envelope follower input gain.
    Decibels,
    /// Noise and LFO rates.
    Hertz,
    /// Envelope, decay and smoothing times.
    Milliseconds,
    /// Widths, chances and the envelope sustain level.
    Percent,
    /// Octave offset or noise octave count.
    Octaves,
    /// Semitone offset.
    Semitones,
    /// Fine tuning.
    Cents,
    /// Tempo-synced LFO rate.
    Beats,
    /// Switches, table positions, macro amount.
    None,
}

impl ParamUnit {
    /// Text appended to a formatted value.
    ///
    /// ```rust
    /// use vibrato_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Cents.suffix(), " ct");
    /// assert_eq!(ParamUnit::Percent.suffix(), "%");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Decibels => " dB",
            Self::Hertz => " Hz",
            Self::Milliseconds => " ms",
            Self::Percent => "%",
            Self::Octaves => " oct",
            Self::Semitones => " st",
            Self::Cents => " ct",
            Self::Beats => " b",
            Self::None => "",
        }
    }
}

/// Curve between a plain value in `[min, max]` and its normalized position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Straight line.
    #[default]
    Linear,
    /// Equal ratios get equal knob travel. Needs `min > 0`.
    Logarithmic,
    /// Linear position raised to `1 / exp` when normalizing.
    Power(f32),
}

impl ParamScale {
    /// Position of `value` within `[min, max]`. Not clamped.
    pub fn normalize(self, value: f32, min: f32, max: f32) -> f32 {
        let span = max - min;
        if span == 0.0 {
            return 0.0;
        }
        match self {
            Self::Linear => (value - min) / span,
            Self::Logarithmic if min > 0.0 && value > 0.0 => libm::logf(value / min) / libm::logf(max / min),
            Self::Logarithmic => 0.0,
            Self::Power(exp) => libm::powf((value - min) / span, 1.0 / exp),
        }
    }

    /// Plain value at normalized position `t`.
    pub fn denormalize(self, t: f32, min: f32, max: f32) -> f32 {
        match self {
            Self::Linear => min + t * (max - min),
            Self::Logarithmic if min > 0.0 => min * libm::powf(max / min, t),
            Self::Logarithmic => min,
            Self::Power(exp) => min + libm::powf(t, exp) * (max - min),
        }
    }
}

/// Numeric parameter id as seen by a plugin host.
///
/// Slot parameters live at `(slot + 1) * 1000 + index`; the mods-mix
/// parameter is `ParamId(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Host-facing capability bits.
///
/// ```rust
/// use vibrato_core::ParamFlags;
///
/// let octave = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(octave.contains(ParamFlags::STEPPED));
/// assert!(!octave.contains(ParamFlags::HIDDEN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// Empty set.
    pub const NONE: Self = Self(0);
    /// The host may record automation.
    pub const AUTOMATABLE: Self = Self(1);
    /// Only whole steps are valid.
    pub const STEPPED: Self = Self(2);
    /// Kept out of generic host parameter lists.
    pub const HIDDEN: Self = Self(4);

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Both sets combined.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Range, default, unit and naming of one parameter.
///
/// ```rust
/// use vibrato_core::{ParamDescriptor, ParamUnit};
///
/// let decay = ParamDescriptor::new("Dropout Decay", "Decay", ParamUnit::Milliseconds, 1.0, 2000.0, 200.0);
/// assert_eq!(decay.clamp(5000.0), 2000.0);
/// assert_eq!(decay.normalize(1.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Name used in tooltips and host parameter lists.
    pub name: &'static str,
    /// Knob caption.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Lowest plain value.
    pub min: f32,
    /// Highest plain value.
    pub max: f32,
    /// Initial and double-click reset value.
    pub default: f32,
    /// Grid size; only enforced when [`ParamFlags::STEPPED`] is set.
    pub step: f32,
    /// Host id. Slot-relative until the catalogue resolves it.
    pub id: ParamId,
    /// Key in patch files, e.g. `"perlin_freq"`.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Host flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous linear parameter.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// The width control shared by most modulators: 0 to 100 %, off by default.
    pub const fn width() -> Self {
        Self::new("Width", "Width", ParamUnit::Percent, 0.0, 100.0, 0.0).with_step(1.0)
    }

    /// On/off value stored as `0.0` / `1.0`.
    pub const fn switch(name: &'static str, short_name: &'static str) -> Self {
        Self::stepped(name, short_name, ParamUnit::None, 0.0, 1.0, 0.0)
    }

    /// Whole-number parameter such as an octave or semitone offset.
    pub const fn stepped(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, unit, min, max, default)
            .with_step(1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
    }

    /// Attach host and patch ids.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Replace the normalization curve.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the host flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replace the step size.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Whether only grid values are valid.
    pub const fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Limit `value` to `[min, max]`.
    ///
    /// ```rust
    /// use vibrato_core::ParamDescriptor;
    ///
    /// let width = ParamDescriptor::width();
    /// assert_eq!(width.clamp(-3.0), 0.0);
    /// assert_eq!(width.clamp(300.0), 100.0);
    /// ```
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    /// Clamp, then round stepped parameters to the nearest grid point.
    pub fn snap(&self, value: f32) -> f32 {
        let value = self.clamp(value);
        if !self.is_stepped() || self.step <= 0.0 {
            return value;
        }
        let steps = libm::roundf((value - self.min) / self.step);
        self.clamp(self.min + steps * self.step)
    }

    /// Plain value to `[0, 1]` through [`scale`](Self::scale).
    pub fn normalize(&self, value: f32) -> f32 {
        self.scale.normalize(value, self.min, self.max)
    }

    /// `[0, 1]` to plain value; inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.scale.denormalize(normalized, self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_range() {
        let width = ParamDescriptor::width();
        assert_eq!(width.clamp(42.0), 42.0);
        assert_eq!(width.normalize(25.0), 0.25);
        assert_eq!(width.denormalize(0.75), 75.0);
    }

    #[test]
    fn log_midpoint_is_geometric_mean() {
        let rate = ParamDescriptor::new("Rate", "Rate", ParamUnit::Hertz, 0.05, 20.0, 1.0)
            .with_scale(ParamScale::Logarithmic);

        assert!(rate.normalize(0.05).abs() < 1e-6);
        assert!((rate.normalize(20.0) - 1.0).abs() < 1e-6);
        assert!((rate.denormalize(0.5) - libm::sqrtf(0.05 * 20.0)).abs() < 1e-3);

        for hz in [0.05, 0.3, 1.0, 7.5, 20.0] {
            let back = rate.denormalize(rate.normalize(hz));
            assert!((back - hz).abs() / hz < 1e-4, "{hz} -> {back}");
        }
    }

    #[test]
    fn log_scale_rejects_non_positive_values() {
        assert_eq!(ParamScale::Logarithmic.normalize(0.0, 0.05, 20.0), 0.0);
        assert_eq!(ParamScale::Logarithmic.denormalize(0.5, 0.0, 20.0), 0.0);
    }

    #[test]
    fn power_curve() {
        let release = ParamDescriptor::new("Release", "R", ParamUnit::Milliseconds, 0.0, 4000.0, 300.0)
            .with_scale(ParamScale::Power(2.0));
        assert_eq!(release.denormalize(0.0), 0.0);
        assert_eq!(release.denormalize(0.5), 1000.0);
        assert_eq!(release.denormalize(1.0), 4000.0);
        assert!((release.normalize(1000.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn degenerate_range() {
        let fixed = ParamDescriptor::new("Fixed", "Fixed", ParamUnit::None, 1.0, 1.0, 1.0);
        assert_eq!(fixed.normalize(1.0), 0.0);
    }

    #[test]
    fn stepped_values_snap() {
        let oct = ParamDescriptor::stepped("Octave", "Oct", ParamUnit::Octaves, -3.0, 3.0, 0.0);
        assert_eq!(oct.snap(1.4), 1.0);
        assert_eq!(oct.snap(-2.6), -3.0);
        assert_eq!(oct.snap(9.0), 3.0);
        assert_eq!(ParamDescriptor::width().snap(12.34), 12.34);
    }

    #[test]
    fn switch_snaps_to_either_end() {
        let sync = ParamDescriptor::switch("LFO Sync", "Sync");
        assert!(sync.is_stepped());
        assert_eq!(sync.snap(0.7), 1.0);
        assert_eq!(sync.snap(0.3), 0.0);
    }

    #[test]
    fn flag_sets() {
        assert_eq!(ParamFlags::default(), ParamFlags::AUTOMATABLE);
        assert!(ParamFlags::AUTOMATABLE.union(ParamFlags::HIDDEN).contains(ParamFlags::HIDDEN));
        assert!(!ParamFlags::NONE.contains(ParamFlags::AUTOMATABLE));
    }
}
