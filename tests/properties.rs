use shiftinvert::{ColorInversionFilter, FilterState, Frame, InversionRegistry, Pixel, TargetId};

const EPS: f32 = 1e-4;

fn sample_frame() -> Frame {
    let (w, h) = (31, 17);
    let pixels = (0..w * h)
        .map(|i| {
            let t = i as f32 / (w * h) as f32;
            Pixel::new(t, (t * 7.0).fract(), 1.0 - t, (t * 3.0).fract())
        })
        .collect();
    Frame::from_pixels(w, h, pixels).unwrap()
}

#[test]
fn gray_inputs_keep_full_alpha() {
    let filter = ColorInversionFilter::default();
    for i in 0..=255 {
        let v = i as f32 / 255.0;
        assert_eq!(filter.apply(Pixel::gray(v)).a, 1.0);
    }
}

#[test]
fn alpha_preserved_across_frame() {
    let filter = ColorInversionFilter::default();
    let frame = sample_frame();
    let out = filter.apply_to_frame(&frame, true);
    for (src, dst) in frame.pixels().iter().zip(out.pixels()) {
        assert_eq!(src.a.to_bits(), dst.a.to_bits());
    }
}

#[test]
fn disabling_after_enabling_restores_frame() {
    let filter = ColorInversionFilter::default();
    let frame = sample_frame();
    let enabled = filter.apply_to_frame(&frame, true);
    assert_ne!(enabled, frame);
    assert_eq!(enabled.dimensions(), frame.dimensions());
    let disabled = filter.apply_to_frame(&frame, false);
    assert_eq!(disabled, frame);
}

#[test]
fn reference_points() {
    let filter = ColorInversionFilter::default();

    let black = filter.apply(Pixel::gray(0.0));
    assert!((black.r - 1.0).abs() < EPS && (black.b - 1.0).abs() < EPS);

    let white = filter.apply(Pixel::gray(1.0));
    assert!((white.g - 0.0741).abs() < 1e-3);

    let mid = filter.apply(Pixel::gray(0.5));
    assert!((mid.r - 0.5370).abs() < 1e-3);
}

#[test]
fn frame_application_is_deterministic() {
    let filter = ColorInversionFilter::default();
    let frame = sample_frame();
    let a = filter.apply_to_frame(&frame, true);
    let b = filter.apply_to_frame(&frame, true);
    for (x, y) in a.pixels().iter().zip(b.pixels()) {
        assert_eq!(x.r.to_bits(), y.r.to_bits());
        assert_eq!(x.g.to_bits(), y.g.to_bits());
        assert_eq!(x.b.to_bits(), y.b.to_bits());
    }
}

#[test]
fn registry_toggles_indefinitely() {
    let mut reg: InversionRegistry = InversionRegistry::default();
    let id = TargetId::new();
    let frame = sample_frame();
    for i in 0..6 {
        let state = reg.toggle(id);
        let expected = if i % 2 == 0 { FilterState::Inverted } else { FilterState::Normal };
        assert_eq!(state, expected);
        let rendered = reg.render(id, &frame);
        assert_eq!(rendered == frame, state == FilterState::Normal);
    }
}
