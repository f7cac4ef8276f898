use super::*;

fn all_eases() -> Vec<Ease> {
    let mut out = vec![Ease::Linear];
    for c in Curve::ALL {
        out.extend([Ease::In(c), Ease::Out(c), Ease::InOut(c), Ease::OutIn(c)]);
    }
    out
}

#[test]
fn endpoints_are_exact_for_every_curve() {
    for ease in all_eases() {
        assert_eq!(ease.apply(0.0), 0.0, "{ease}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease}");
        assert_eq!(ease.apply(-3.0), 0.0, "{ease}");
        assert_eq!(ease.apply(7.0), 1.0, "{ease}");
    }
}

#[test]
fn in_out_quad_matches_closed_form() {
    let e = Ease::InOut(Curve::Quad);
    assert!((e.apply(0.25) - 0.125).abs() < 1e-12);
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((e.apply(0.75) - 0.875).abs() < 1e-12);
}

#[test]
fn out_is_mirror_of_in() {
    for c in Curve::ALL {
        for t in [0.1, 0.3, 0.6, 0.9] {
            let a = Ease::Out(c).apply(t);
            let b = 1.0 - Ease::In(c).apply(1.0 - t);
            assert!((a - b).abs() < 1e-12, "{c:?} at {t}");
        }
    }
}

#[test]
fn registry_round_trips_every_name() {
    for ease in all_eases() {
        assert_eq!(Ease::lookup(&ease.name()), Some(ease));
    }
    assert_eq!(Ease::from_name("linear"), Ease::Linear);
    assert_eq!(Ease::from_name(" ease-out-bounce "), Ease::Out(Curve::Bounce));
}

#[test]
fn unknown_name_falls_back() {
    assert_eq!(Ease::lookup("ease-sideways"), None);
    assert_eq!(Ease::from_name("ease-sideways"), Ease::FALLBACK);
    assert_eq!(Ease::default(), Ease::InOut(Curve::Quad));
}

#[test]
fn serde_uses_names() {
    let json = serde_json::to_string(&Ease::OutIn(Curve::Expo)).unwrap();
    assert_eq!(json, "\"ease-out-in-expo\"");
    let back: Ease = serde_json::from_str("\"ease-in-circ\"").unwrap();
    assert_eq!(back, Ease::In(Curve::Circ));
    let fallback: Ease = serde_json::from_str("\"nope\"").unwrap();
    assert_eq!(fallback, Ease::FALLBACK);
}

#[test]
fn monotonic_curves_are_monotonic() {
    for c in [Curve::Quad, Curve::Cubic, Curve::Sine, Curve::Expo, Curve::Circ] {
        let e = Ease::InOut(c);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = e.apply(f64::from(i) / 100.0);
            assert!(v >= prev, "{c:?}");
            prev = v;
        }
    }
}
