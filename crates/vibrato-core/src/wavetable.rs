//! Morphing LFO wavetables.
//!
//! [`LfoTables`] holds [`NUM_TABLES`] single-cycle waveforms. The LFO reads it
//! with a continuous *table position* (which table, interpolated between
//! neighbours) and a cyclic *phase*. Three generator families are available,
//! chosen through [`WavetablePreset`]; within a family the tables grow from
//! simple to complex, so sweeping the table position morphs the shape.
//!
//! # Layout
//!
//! Tables are stored back to back in one buffer. Every table carries one guard
//! sample equal to its first sample so interpolation at the end of the cycle
//! never needs a wrap branch.

use core::f32::consts::PI;
use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Samples per table, excluding the guard sample.
pub const TABLE_SIZE: usize = 1 << 11;

/// Number of tables the table position sweeps across.
pub const NUM_TABLES: usize = 5;

const STRIDE: usize = TABLE_SIZE + 1;

/// Waveform family the tables are generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WavetablePreset {
    /// Windowed sinc pulses with an increasing number of zero crossings.
    #[default]
    Sinc,
    /// Triangles folded back on themselves.
    Triangles,
    /// Weierstrass cosine sums with an increasing number of terms.
    Weierstrass,
}

impl WavetablePreset {
    /// All presets in browser order.
    pub const ALL: [WavetablePreset; 3] = [
        WavetablePreset::Weierstrass,
        WavetablePreset::Triangles,
        WavetablePreset::Sinc,
    ];

    /// Stable identifier used in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            WavetablePreset::Sinc => "sinc",
            WavetablePreset::Triangles => "triangles",
            WavetablePreset::Weierstrass => "weierstrass",
        }
    }

    /// Display name in the wavetable browser.
    pub const fn name(self) -> &'static str {
        match self {
            WavetablePreset::Sinc => "Sinc",
            WavetablePreset::Triangles => "Triangles",
            WavetablePreset::Weierstrass => "Weierstrass",
        }
    }

    /// Browser entry description.
    pub const fn description(self) -> &'static str {
        match self {
            WavetablePreset::Sinc => "Everyone loves a good sinc function.",
            WavetablePreset::Triangles => "Resample the signal with rich triangular textures.",
            WavetablePreset::Weierstrass => {
                "Modulate the vibrato with mesmerizing weierstrass sinusoids."
            }
        }
    }
}

impl fmt::Display for WavetablePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown preset identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset;

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown wavetable preset")
    }
}

impl FromStr for WavetablePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or(UnknownPreset)
    }
}

/// The LFO's wavetable store.
///
/// # Example
///
/// ```rust
/// use vibrato_core::{LfoTables, WavetablePreset};
///
/// let mut tables = LfoTables::new(WavetablePreset::Sinc);
/// let a = tables.sample(0.0, 0.5);
/// tables.generate(WavetablePreset::Triangles);
/// assert_eq!(tables.preset(), WavetablePreset::Triangles);
/// assert!(a.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct LfoTables {
    data: Vec<f32>,
    preset: WavetablePreset,
}

impl Default for LfoTables {
    fn default() -> Self {
        Self::new(WavetablePreset::default())
    }
}

impl LfoTables {
    /// Allocate and fill the tables from `preset`.
    pub fn new(preset: WavetablePreset) -> Self {
        let mut tables = Self {
            data: vec![0.0; STRIDE * NUM_TABLES],
            preset,
        };
        tables.generate(preset);
        tables
    }

    /// Preset the current contents were generated from.
    pub fn preset(&self) -> WavetablePreset {
        self.preset
    }

    /// Regenerate every table from `preset`.
    pub fn generate(&mut self, preset: WavetablePreset) {
        match preset {
            WavetablePreset::Sinc => self.make_sinc(),
            WavetablePreset::Triangles => self.make_triangles(),
            WavetablePreset::Weierstrass => self.make_weierstrass(),
        }
    }

    /// Table `t` is a Hann-windowed sinc with `1 + 2t` zero crossings per side.
    pub fn make_sinc(&mut self) {
        self.fill(|t, x| {
            let crossings = (1 + 2 * t) as f32;
            let u = (x * 2.0 - 1.0) * crossings * PI;
            let sinc = if u.abs() < 1e-6 { 1.0 } else { libm::sinf(u) / u };
            let window = 0.5 - 0.5 * libm::cosf(2.0 * PI * x);
            sinc * window
        });
        self.preset = WavetablePreset::Sinc;
    }

    /// Table `t` is a triangle wave folded `t` extra times.
    pub fn make_triangles(&mut self) {
        self.fill(|t, x| fold(triangle(x) * (1 + t) as f32));
        self.preset = WavetablePreset::Triangles;
    }

    /// Table `t` is `sum_{n=0}^{t+1} 0.5^n cos(3^n 2 pi x)`.
    pub fn make_weierstrass(&mut self) {
        const A: f32 = 0.5;
        const B: f32 = 3.0;
        self.fill(|t, x| {
            let mut sum = 0.0;
            let mut amp = 1.0;
            let mut freq = 1.0;
            for _ in 0..=t + 1 {
                sum += amp * libm::cosf(freq * 2.0 * PI * x);
                amp *= A;
                freq *= B;
            }
            sum
        });
        self.preset = WavetablePreset::Weierstrass;
    }

    /// Read the tables at `table_pos` in \[0, 1\] and `phase` in \[0, 1).
    ///
    /// Both axes are linearly interpolated. Out-of-range table positions are
    /// clamped; phases wrap.
    pub fn sample(&self, table_pos: f32, phase: f32) -> f32 {
        let table_pos = if table_pos.is_nan() {
            0.0
        } else {
            table_pos.clamp(0.0, 1.0)
        };
        let tp = table_pos * (NUM_TABLES - 1) as f32;
        let t0 = (libm::floorf(tp) as usize).min(NUM_TABLES - 1);
        let t1 = (t0 + 1).min(NUM_TABLES - 1);
        let t_frac = tp - t0 as f32;

        let phase = phase - libm::floorf(phase);
        let idx = phase * TABLE_SIZE as f32;
        let i0 = (libm::floorf(idx) as usize).min(TABLE_SIZE - 1);
        let i_frac = idx - i0 as f32;

        let read = |t: usize| {
            let base = t * STRIDE + i0;
            let a = self.data[base];
            let b = self.data[base + 1];
            a + (b - a) * i_frac
        };

        let a = read(t0);
        let b = read(t1);
        a + (b - a) * t_frac
    }

    /// Raw samples of table `t`, including the guard sample.
    pub fn table(&self, t: usize) -> Option<&[f32]> {
        (t < NUM_TABLES).then(|| &self.data[t * STRIDE..(t + 1) * STRIDE])
    }

    fn fill(&mut self, f: impl Fn(usize, f32) -> f32) {
        for t in 0..NUM_TABLES {
            let table = &mut self.data[t * STRIDE..(t + 1) * STRIDE];
            for (i, s) in table.iter_mut().take(TABLE_SIZE).enumerate() {
                *s = f(t, i as f32 / TABLE_SIZE as f32);
            }
            normalize_peak(&mut table[..TABLE_SIZE]);
            table[TABLE_SIZE] = table[0];
        }
    }
}

/// Unit triangle starting at 0, peaking at +1 at a quarter cycle.
fn triangle(x: f32) -> f32 {
    let p = x + 0.25;
    let p = p - libm::floorf(p);
    1.0 - 4.0 * (p - 0.5).abs()
}

/// Fold any value back into \[-1, 1\].
fn fold(s: f32) -> f32 {
    let q = 0.25 * s + 0.25;
    4.0 * (q - libm::roundf(q)).abs() - 1.0
}

fn normalize_peak(table: &mut [f32]) {
    let peak = table.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if peak > 0.0 {
        let gain = 1.0 / peak;
        for s in table.iter_mut() {
            *s *= gain;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tables_bounded(tables: &LfoTables) {
        for t in 0..NUM_TABLES {
            let table = tables.table(t).unwrap();
            let peak = table.iter().fold(0.0f32, |m, s| m.max(s.abs()));
            assert!((peak - 1.0).abs() < 1e-4, "table {t} peak {peak}");
            assert_eq!(table[TABLE_SIZE], table[0], "guard sample of table {t}");
        }
    }

    #[test]
    fn every_preset_is_peak_normalized() {
        for preset in WavetablePreset::ALL {
            let tables = LfoTables::new(preset);
            assert_eq!(tables.preset(), preset);
            all_tables_bounded(&tables);
        }
    }

    #[test]
    fn triangle_shape() {
        assert!(triangle(0.0).abs() < 1e-6);
        assert!((triangle(0.25) - 1.0).abs() < 1e-6);
        assert!(triangle(0.5).abs() < 1e-6);
        assert!((triangle(0.75) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn fold_keeps_unit_range_and_reflects() {
        assert!((fold(-1.0) + 1.0).abs() < 1e-6);
        assert!((fold(1.0) - 1.0).abs() < 1e-6);
        assert!((fold(0.5) - 0.5).abs() < 1e-6);
        assert!(fold(2.0).abs() < 1e-6);
        assert!((fold(1.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn first_triangle_table_is_plain_triangle() {
        let tables = LfoTables::new(WavetablePreset::Triangles);
        assert!((tables.sample(0.0, 0.25) - 1.0).abs() < 1e-3);
        assert!((tables.sample(0.0, 0.75) + 1.0).abs() < 1e-3);
    }

    #[test]
    fn sample_interpolates_between_tables() {
        let tables = LfoTables::new(WavetablePreset::Weierstrass);
        let phase = 0.1;
        let a = tables.sample(0.0, phase);
        let b = tables.sample(1.0 / (NUM_TABLES - 1) as f32, phase);
        let mid = tables.sample(0.5 / (NUM_TABLES - 1) as f32, phase);
        assert!((mid - (a + b) * 0.5).abs() < 1e-4);
    }

    #[test]
    fn sample_wraps_phase_and_clamps_position() {
        let tables = LfoTables::new(WavetablePreset::Sinc);
        assert!((tables.sample(0.3, 0.2) - tables.sample(0.3, 1.2)).abs() < 1e-5);
        assert!((tables.sample(0.3, 0.2) - tables.sample(0.3, -0.8)).abs() < 1e-5);
        assert_eq!(tables.sample(1.0, 0.4), tables.sample(7.0, 0.4));
        assert_eq!(tables.sample(0.0, 0.4), tables.sample(-2.0, 0.4));
        assert!(tables.sample(f32::NAN, 0.4).is_finite());
    }

    #[test]
    fn sinc_peaks_mid_cycle() {
        let tables = LfoTables::new(WavetablePreset::Sinc);
        assert!((tables.sample(0.0, 0.5) - 1.0).abs() < 1e-3);
        assert!(tables.sample(0.0, 0.0).abs() < 1e-3);
    }

    #[test]
    fn table_out_of_range() {
        let tables = LfoTables::default();
        assert!(tables.table(NUM_TABLES).is_none());
        assert_eq!(tables.table(0).map(<[f32]>::len), Some(TABLE_SIZE + 1));
    }

    #[test]
    fn preset_parsing() {
        assert_eq!("SINC".parse::<WavetablePreset>(), Ok(WavetablePreset::Sinc));
        assert_eq!(
            "weierstrass".parse::<WavetablePreset>(),
            Ok(WavetablePreset::Weierstrass)
        );
        assert_eq!("saw".parse::<WavetablePreset>(), Err(UnknownPreset));
    }
}
