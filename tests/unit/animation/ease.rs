use super::*;

#[test]
fn endpoints_are_exact() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn out_of_range_input_clamps() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.5), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        if matches!(ease, Ease::OutBack | Ease::OutElastic) {
            continue;
        }
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn back_out_overshoots() {
    let peak = (1..100)
        .map(|i| Ease::OutBack.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn gsap_names_parse() {
    assert_eq!("power3.out".parse::<Ease>().unwrap(), Ease::OutQuart);
    assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
    assert_eq!("power2.inOut".parse::<Ease>().unwrap(), Ease::InOutCubic);
    assert_eq!("power1.in".parse::<Ease>().unwrap(), Ease::InQuad);
    assert!("bounce.sideways".parse::<Ease>().is_err());
}
