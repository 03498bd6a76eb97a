use super::*;

fn ratio(scroll: f64, top: f64, height: f64, distance: f64) -> f64 {
    visibility_ratio(scroll, top, height, distance).unwrap().get()
}

#[test]
fn linear_progress_through_transition_span() {
    assert!((ratio(1100.0, 1000.0, 500.0, 0.5) - 0.4).abs() < 1e-12);
    assert!((ratio(1250.0, 1000.0, 500.0, 1.0) - 0.5).abs() < 1e-12);
}

#[test]
fn before_element_is_zero() {
    for distance in [0.1, 0.5, 1.0, 3.0] {
        for scroll in [-50.0, 0.0, 999.0, 1000.0] {
            assert_eq!(ratio(scroll, 1000.0, 500.0, distance), 0.0);
        }
    }
}

#[test]
fn past_element_is_one() {
    for distance in [0.1, 0.5, 1.0, 3.0] {
        for scroll in [1500.0, 1500.5, 10_000.0] {
            assert_eq!(ratio(scroll, 1000.0, 500.0, distance), 1.0);
        }
    }
}

#[test]
fn bottom_edge_is_one_for_long_distances() {
    // The element is fully scrolled past even though the span reaches further.
    for distance in [1.0, 2.0, 3.0, 10.0] {
        assert_eq!(raw_progress(1500.0, 1000.0, 500.0, distance).unwrap(), 1.0);
        assert_eq!(ratio(1500.0, 1000.0, 500.0, distance), 1.0);
    }
    let just_before = raw_progress(1499.0, 1000.0, 500.0, 3.0).unwrap();
    assert!((just_before - 499.0 / 1500.0).abs() < 1e-12);
}

#[test]
fn short_distance_saturates_before_element_bottom() {
    // (1400 - 1000) / (500 * 0.2) = 4.0 before clamping
    let raw = raw_progress(1400.0, 1000.0, 500.0, 0.2).unwrap();
    assert!((raw - 4.0).abs() < 1e-12);
    assert_eq!(ratio(1400.0, 1000.0, 500.0, 0.2), 1.0);
}

#[test]
fn clamped_ratio_always_in_unit_interval() {
    let tops = [-300.0, 0.0, 120.0, 5000.0];
    let heights = [0.0, 1.0, 250.0, 4096.0];
    let distances = [0.01, 0.5, 1.0, 7.5];
    for &top in &tops {
        for &height in &heights {
            for &distance in &distances {
                for step in -10..=60 {
                    let scroll = f64::from(step) * 97.0;
                    let r = ratio(scroll, top, height, distance);
                    assert!((0.0..=1.0).contains(&r), "{scroll} {top} {height} {distance}");
                }
            }
        }
    }
}

#[test]
fn zero_height_element_on_scroll_line_is_zero() {
    assert_eq!(ratio(200.0, 200.0, 0.0, 0.5), 0.0);
    assert_eq!(ratio(200.5, 200.0, 0.0, 0.5), 1.0);
}

#[test]
fn non_positive_distance_is_invalid_configuration() {
    for distance in [0.0, -0.5, f64::NAN, f64::INFINITY] {
        let err = visibility_ratio(0.0, 0.0, 100.0, distance).unwrap_err();
        assert!(matches!(err, CrossfadeError::InvalidConfiguration(_)));
    }
}

#[test]
fn blend_state_clamps_and_maps_nan_to_start() {
    assert_eq!(BlendState::new(-0.2), BlendState::START);
    assert_eq!(BlendState::new(1.7), BlendState::END);
    assert_eq!(BlendState::new(f64::NAN), BlendState::START);
    assert_eq!(BlendState::new(0.25).opacity(), 0.25);
}
