//! Property-based invariant tests for derived shadows.
//!
//! 1. Every mode of every theme yields exactly eight shadow levels
//! 2. Every alpha equals `shadow-opacity × level multiplier` (two decimals)
//! 3. Scaling only `shadow-opacity` scales every alpha by the same factor
//! 4. Geometry tokens other than opacity never change an alpha

use proptest::prelude::*;
use regex_lite::Regex;
use tinct_theme::{ShadowLevel, ThemeMode, default_theme_state, get_shadow_map};

// ── Strategies ──────────────────────────────────────────────────────────

fn alphas(shadow: &str) -> Vec<f64> {
    let re = Regex::new(r"/ (-?[0-9.]+)\)").unwrap();
    re.captures_iter(shadow)
        .map(|caps| caps[1].parse().unwrap())
        .collect()
}

fn mode_strategy() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![Just(ThemeMode::Light), Just(ThemeMode::Dark)]
}

fn length_strategy() -> impl Strategy<Value = String> {
    (-20i32..40).prop_map(|px| if px == 0 { "0".to_string() } else { format!("{px}px") })
}

// ═══════════════════════════════════════════════════════════════════════
// 1–2. Shape and alpha values
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn always_eight_levels(mode in mode_strategy(), blur in length_strategy(), spread in length_strategy()) {
        let mut state = default_theme_state().with_mode(mode);
        state.styles.set(mode, "shadow-blur", blur);
        state.styles.set(mode, "shadow-spread", spread);
        let map = get_shadow_map(&state);
        prop_assert_eq!(map.len(), 8);
        prop_assert_eq!(map.iter().count(), 8);
    }

    #[test]
    fn alpha_tracks_opacity_times_multiplier(percent in 0u32..=100, mode in mode_strategy()) {
        let opacity = f64::from(percent) / 100.0;
        let mut state = default_theme_state().with_mode(mode);
        state.styles.set(mode, "shadow-opacity", opacity.to_string());
        let map = get_shadow_map(&state);
        for (level, shadow) in map.iter() {
            let found = alphas(shadow);
            let layers = if level.second_layer().is_some() { 2 } else { 1 };
            prop_assert_eq!(found.len(), layers, "{}", shadow);
            let expected = opacity * level.opacity_multiplier();
            prop_assert!((found[0] - expected).abs() <= 0.0051, "{level:?}: {shadow}");
            if layers == 2 {
                prop_assert!((found[1] - opacity).abs() <= 0.0051);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3–4. Proportionality
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn doubling_opacity_doubles_every_alpha(percent in 1u32..=40) {
        let low = f64::from(percent) / 100.0;
        let mut a = default_theme_state();
        a.styles.set(ThemeMode::Light, "shadow-opacity", low.to_string());
        let mut b = a.clone();
        b.styles.set(ThemeMode::Light, "shadow-opacity", (low * 2.0).to_string());

        let (map_a, map_b) = (get_shadow_map(&a), get_shadow_map(&b));
        for level in ShadowLevel::ALL {
            let (xs, ys) = (alphas(map_a.level(level)), alphas(map_b.level(level)));
            for (x, y) in xs.iter().zip(&ys) {
                prop_assert!((y - 2.0 * x).abs() <= 0.0151, "{level:?}: {x} vs {y}");
            }
        }
    }

    #[test]
    fn geometry_never_changes_alpha(offset in length_strategy(), blur in length_strategy()) {
        let base = default_theme_state();
        let mut moved = base.clone();
        moved.styles.set(ThemeMode::Light, "shadow-offset-x", offset);
        moved.styles.set(ThemeMode::Light, "shadow-blur", blur);
        let (map_a, map_b) = (get_shadow_map(&base), get_shadow_map(&moved));
        for level in ShadowLevel::ALL {
            prop_assert_eq!(alphas(map_a.level(level)), alphas(map_b.level(level)));
        }
    }
}
