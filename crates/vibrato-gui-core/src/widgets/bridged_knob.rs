//! Bridge-aware knob and switch with gesture protocol.
//!
//! [`bridged_knob`] connects a rotary [`Knob`] to one slot parameter of a
//! [`ParamBridge`], handling descriptor lookup, unit formatting, tooltips and
//! host gestures (`begin_set` on drag start, `end_set` on drag stop).
//! [`bridged_switch`] does the same for two-state parameters.

use super::{Knob, Switch};
use crate::{ParamBridge, ParamIndex, SlotIndex, Theme};
use egui::{Response, Ui};
use vibrato_core::{ModParam, ParamDescriptor, ParamUnit};

/// Apply the gesture protocol to a widget response.
///
/// Double-click resets emit a complete `begin_set -> set(default) -> end_set`
/// sequence. Drags emit `begin_set` on start, `set` on each change and
/// `end_set` on stop.
pub fn gesture_wrap(
    response: &Response,
    bridge: &dyn ParamBridge,
    slot: SlotIndex,
    param: ParamIndex,
    value: f32,
    default: f32,
) {
    if response.double_clicked() {
        bridge.set_with_gesture(slot, param, default);
    } else {
        if response.drag_started() {
            bridge.begin_set(slot, param);
        }
        if response.changed() {
            bridge.set(slot, param, value);
        }
        if response.drag_stopped() {
            bridge.end_set(slot, param);
        }
    }
}

/// Display string for a plain parameter value.
///
/// | `ParamUnit`    | Display                        |
/// |----------------|--------------------------------|
/// | `Hertz`        | `"0.35 Hz"` / `"12.0 Hz"`      |
/// | `Milliseconds` | `"1.50 s"` / `"120 ms"`        |
/// | `Percent`      | `"50%"`                        |
/// | `Decibels`     | `"-3.5 dB"`                    |
/// | `Octaves`, `Semitones` | signed whole steps     |
/// | `Cents`        | `"+12 ct"`                     |
/// | `Beats`        | `"1/4"` for fractions, else `"2 b"` |
/// | `None`         | `"0.50"`                       |
pub fn format_value(desc: &ParamDescriptor, v: f32) -> String {
    match desc.unit {
        ParamUnit::Hertz if v < 10.0 => format!("{v:.2} Hz"),
        ParamUnit::Hertz => format!("{v:.1} Hz"),
        ParamUnit::Milliseconds if v >= 1000.0 => format!("{:.2} s", v / 1000.0),
        ParamUnit::Milliseconds => format!("{v:.0} ms"),
        ParamUnit::Percent => format!("{v:.0}%"),
        ParamUnit::Decibels => format!("{v:.1} dB"),
        ParamUnit::Octaves | ParamUnit::Semitones => {
            format!("{:+.0}{}", v, desc.unit.suffix())
        }
        ParamUnit::Cents => format!("{v:+.0} ct"),
        ParamUnit::Beats if v < 1.0 && v > 0.0 => format!("1/{:.0}", 1.0 / v),
        ParamUnit::Beats => format!("{v:.0} b"),
        ParamUnit::None => format!("{v:.2}"),
    }
}

/// Render a parameter knob bound to a [`ParamBridge`] slot parameter.
///
/// The knob works in normalized `[0, 1]` space mapped through the
/// descriptor's scale, so logarithmic rates have their visual midpoint at the
/// geometric mean. Stepped parameters snap before being written.
pub fn bridged_knob(
    ui: &mut Ui,
    bridge: &dyn ParamBridge,
    slot: SlotIndex,
    param: ParamIndex,
    theme: &Theme,
) -> Response {
    let Some(desc) = bridge.param_descriptor(slot, param) else {
        return ui.label("?");
    };

    let mut normalized = desc.normalize(bridge.get(slot, param));
    let norm_default = desc.normalize(desc.default);

    let knob = Knob::new(&mut normalized, 0.0, 1.0, desc.short_name)
        .default(norm_default)
        .colors(theme.knob_track, theme.interact)
        .format(|n| format_value(&desc, desc.snap(desc.denormalize(n))));

    let mut response = ui.add(knob);
    if let Some(p) = ModParam::from_index(param.0) {
        response = response.on_hover_text(p.tooltip());
    }

    let plain = desc.snap(desc.denormalize(normalized));
    gesture_wrap(&response, bridge, slot, param, plain, desc.default);
    response
}

/// Render a two-state switch bound to a [`ParamBridge`] slot parameter.
///
/// Values at or above the midpoint read as on. A click writes the opposite
/// extreme inside one gesture.
pub fn bridged_switch(
    ui: &mut Ui,
    bridge: &dyn ParamBridge,
    slot: SlotIndex,
    param: ParamIndex,
    theme: &Theme,
) -> Response {
    let Some(desc) = bridge.param_descriptor(slot, param) else {
        return ui.label("?");
    };

    let mut on = bridge.get_normalized(slot, param) >= 0.5;
    let mut response = ui.add(Switch::new(&mut on, desc.short_name).colors(theme.hover, theme.modulation));
    if let Some(p) = ModParam::from_index(param.0) {
        response = response.on_hover_text(p.tooltip());
    }

    if response.clicked() {
        let value = if on { desc.max } else { desc.min };
        bridge.set_with_gesture(slot, param, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_by_unit() {
        assert_eq!(format_value(&ModParam::PerlinFreq.descriptor(), 0.35), "0.35 Hz");
        assert_eq!(format_value(&ModParam::PerlinFreq.descriptor(), 12.0), "12.0 Hz");
        assert_eq!(format_value(&ModParam::AudioRateAtk.descriptor(), 120.0), "120 ms");
        assert_eq!(format_value(&ModParam::AudioRateAtk.descriptor(), 1500.0), "1.50 s");
        assert_eq!(format_value(&ModParam::DropoutChance.descriptor(), 50.0), "50%");
        assert_eq!(format_value(&ModParam::AudioRateSemi.descriptor(), 3.0), "+3 st");
        assert_eq!(format_value(&ModParam::AudioRateOct.descriptor(), -2.0), "-2 oct");
        assert_eq!(format_value(&ModParam::LfoRateSync.descriptor(), 0.25), "1/4");
        assert_eq!(format_value(&ModParam::LfoRateSync.descriptor(), 2.0), "2 b");
        assert_eq!(format_value(&ModParam::LfoWaveform.descriptor(), 0.5), "0.50");
    }
}
