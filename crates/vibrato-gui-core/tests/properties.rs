//! Property-based tests for the slot state machine and the envelope preview.

use egui::{Rect, pos2};
use proptest::prelude::*;
use std::time::Instant;
use vibrato_core::{ModType, WavetablePreset};
use vibrato_gui_core::widgets::{AdsrValues, adsr_path};
use vibrato_gui_core::{
    AtomicModEngine, AtomicParamBridge, ModSlot, SlotContext, SlotEvent, SlotMessage, SlotTiming, shared_tables,
};

fn any_mod_type() -> impl Strategy<Value = ModType> {
    (0usize..8).prop_map(ModType::from_index)
}

fn unit() -> impl Strategy<Value = f32> {
    0.0f32..=1.0f32
}

fn area() -> Rect {
    Rect::from_min_max(pos2(10.0, 20.0), pos2(210.0, 70.0))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any sequence of selections leaves at most one sub-panel visible, and
    /// exactly the selected one unless the last selection was `None`.
    #[test]
    fn one_visible_panel_after_any_selection(types in prop::collection::vec(any_mod_type(), 1..20)) {
        let mut slot = ModSlot::new(0, shared_tables(WavetablePreset::Sinc), &SlotTiming::default());
        for &t in &types {
            slot.set_mod_type(t);
            slot.set_mod_type(t);
            prop_assert!(slot.visible_count() <= 1);
        }
        let last = *types.last().unwrap();
        prop_assert_eq!(slot.mod_type(), last);
        if last == ModType::None {
            prop_assert_eq!(slot.visible_count(), 0);
        } else {
            prop_assert_eq!(slot.visible_panels(), vec![last]);
        }
    }

    /// Every switch hides all panels before showing the new one.
    #[test]
    fn switch_hides_before_showing(a in any_mod_type(), b in any_mod_type()) {
        prop_assume!(a != b);
        let bridge = AtomicParamBridge::default();
        let engine = AtomicModEngine::default();
        let ctx = SlotContext { bridge: &bridge, engine: &engine, now: Instant::now() };
        let mut slot = ModSlot::new(1, shared_tables(WavetablePreset::Sinc), &SlotTiming::default());
        slot.update(SlotMessage::Select(a), &ctx);

        let events = slot.update(SlotMessage::Select(b), &ctx);
        let hidden = events.iter().position(|e| *e == SlotEvent::PanelsHidden);
        prop_assert!(hidden.is_some());
        if b != ModType::None {
            let shown = events.iter().position(|e| *e == SlotEvent::PanelShown(b));
            prop_assert!(shown.is_some() && hidden < shown);
        }
        prop_assert!(events.contains(&SlotEvent::ModTypeChanged(b)));
    }

    /// The attack peak sits at exactly `a / (a + d + r)` of the width.
    #[test]
    fn attack_extent(a in unit(), d in unit(), s in unit(), r in unit()) {
        prop_assume!(a + d + r > 1e-3);
        let rect = area();
        let path = adsr_path(AdsrValues { attack: a, decay: d, sustain: s, release: r }, rect);
        prop_assert_eq!(path.len(), 4);
        let expected = rect.left() + rect.width() * a / (a + d + r);
        prop_assert!((path[1].x - expected).abs() < 1e-3);
        prop_assert_eq!(path[1].y, rect.top());
        prop_assert_eq!(path[0], rect.left_bottom());
        prop_assert_eq!(path[3], rect.right_bottom());
    }

    /// With all times zero the sustain line spans the width at height `s`.
    #[test]
    fn zero_times_flat_line(s in unit()) {
        let rect = area();
        let path = adsr_path(AdsrValues { attack: 0.0, decay: 0.0, sustain: s, release: 0.0 }, rect);
        let y = rect.bottom() - rect.height() * s;
        prop_assert_eq!(path[1], pos2(rect.left(), y));
        prop_assert_eq!(path[2], pos2(rect.right(), y));
    }

    /// Points of the outline never leave the preview bounds.
    #[test]
    fn outline_inside_bounds(a in unit(), d in unit(), s in unit(), r in unit()) {
        let rect = area();
        for p in adsr_path(AdsrValues { attack: a, decay: d, sustain: s, release: r }, rect) {
            prop_assert!(rect.expand(1e-3).contains(p), "{:?}", p);
        }
    }
}
