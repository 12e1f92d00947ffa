use swcanvas::*;

const RED: Color = Color::from_rgba8(255, 0, 0, 255);

fn context(width: u32, height: u32) -> Context {
    Context::new(Surface::new(width, height).unwrap())
}

#[test]
fn dashed_stroke_hit_testing() {
    let mut ctx = context(200, 200);
    ctx.set_line_width(5.0);
    ctx.set_line_dash(vec![20.0, 10.0]);
    ctx.begin_path();
    ctx.move_to(20.0, 100.0);
    ctx.line_to(180.0, 100.0);

    assert!(ctx.is_point_in_stroke(30.0, 100.0));
    assert!(!ctx.is_point_in_stroke(45.0, 100.0));
    assert!(ctx.is_point_in_stroke(60.0, 100.0));

    ctx.set_line_dash_offset(10.0);
    assert!(ctx.is_point_in_stroke(25.0, 100.0));
    assert!(!ctx.is_point_in_stroke(35.0, 100.0));
    assert!(ctx.is_point_in_stroke(50.0, 100.0));
}

#[test]
fn thick_horizontal_line_band() {
    let mut ctx = context(20, 20);
    ctx.set_stroke_style(PaintSource::Solid(RED));
    ctx.set_line_width(4.0);
    ctx.begin_path();
    ctx.move_to(5.0, 10.0);
    ctx.line_to(15.0, 10.0);
    ctx.stroke();

    // The band is [5, 15) x [8, 12) in pixel centers.
    for y in 0..20 {
        for x in 0..20 {
            let inside = (5..15).contains(&x) && (8..12).contains(&y);
            let expected = if inside { RED } else { Color::TRANSPARENT };
            assert_eq!(ctx.surface().pixel(x, y), Some(expected), "at {} {}", x, y);
        }
    }
    assert_eq!(ctx.slow_path_count(), 0);
}

#[test]
fn sub_pixel_stroke_attenuates_alpha() {
    let mut ctx = context(20, 20);
    ctx.set_stroke_style(PaintSource::Solid(Color::BLACK));
    ctx.set_line_width(0.5);
    ctx.begin_path();
    ctx.move_to(5.0, 10.0);
    ctx.line_to(15.0, 10.0);
    ctx.stroke();

    // One pixel wide, alpha scaled by the requested width.
    let p = ctx.surface().pixel(10, 9).unwrap();
    assert!((i32::from(p.alpha()) - 128).abs() <= 1, "alpha {}", p.alpha());
    assert_eq!(ctx.surface().pixel(10, 10), Some(Color::TRANSPARENT));
    assert_eq!(ctx.surface().pixel(10, 8), Some(Color::TRANSPARENT));
}

#[test]
fn stroke_is_direction_invariant() {
    let mut forward = context(30, 30);
    forward.set_stroke_style(PaintSource::Solid(RED));
    forward.set_line_width(3.0);
    forward.begin_path();
    forward.move_to(5.0, 5.0);
    forward.line_to(25.0, 5.0);
    forward.line_to(25.0, 25.0);
    forward.line_to(5.0, 25.0);
    forward.close_path();
    forward.stroke();

    let mut backward = context(30, 30);
    backward.set_stroke_style(PaintSource::Solid(RED));
    backward.set_line_width(3.0);
    backward.begin_path();
    backward.move_to(5.0, 5.0);
    backward.line_to(5.0, 25.0);
    backward.line_to(25.0, 25.0);
    backward.line_to(25.0, 5.0);
    backward.close_path();
    backward.stroke();

    assert_eq!(forward.surface().data(), backward.surface().data());
}

#[test]
fn miter_join_fills_the_corner() {
    let mut miter = context(25, 25);
    miter.set_stroke_style(PaintSource::Solid(RED));
    miter.set_line_width(4.0);
    miter.begin_path();
    miter.move_to(5.0, 5.0);
    miter.line_to(15.0, 5.0);
    miter.line_to(15.0, 15.0);
    miter.stroke();

    // The outer corner square [15, 17) x [3, 5) is covered by the miter.
    assert_eq!(miter.surface().pixel(16, 3), Some(RED));

    let mut bevel = context(25, 25);
    bevel.set_stroke_style(PaintSource::Solid(RED));
    bevel.set_line_width(4.0);
    bevel.set_line_join(LineJoin::Bevel);
    bevel.begin_path();
    bevel.move_to(5.0, 5.0);
    bevel.line_to(15.0, 5.0);
    bevel.line_to(15.0, 15.0);
    bevel.stroke();

    assert_eq!(bevel.surface().pixel(16, 3), Some(Color::TRANSPARENT));
    // Both cover the band pixels next to the corner.
    assert_eq!(bevel.surface().pixel(14, 4), Some(RED));
}

#[test]
fn round_cap_extends_past_the_endpoint() {
    let mut ctx = context(30, 30);
    ctx.set_stroke_style(PaintSource::Solid(RED));
    ctx.set_line_width(6.0);
    ctx.set_line_cap(LineCap::Round);
    ctx.begin_path();
    ctx.move_to(10.0, 10.0);
    ctx.line_to(20.0, 10.0);
    ctx.stroke();

    // Round caps deflect the direct line path.
    assert_eq!(ctx.slow_path_count(), 1);
    // Half-disc around (10, 10): (7, 10) is inside, (6, 10) is not.
    assert_eq!(ctx.surface().pixel(7, 10), Some(RED));
    assert_eq!(ctx.surface().pixel(6, 10), Some(Color::TRANSPARENT));
}

#[test]
fn square_cap_extends_by_half_width() {
    let mut ctx = context(30, 30);
    ctx.set_stroke_style(PaintSource::Solid(RED));
    ctx.set_line_width(4.0);
    ctx.set_line_cap(LineCap::Square);
    ctx.begin_path();
    ctx.move_to(10.0, 10.0);
    ctx.line_to(20.0, 10.0);
    ctx.stroke();

    // Extended to [8, 22) horizontally.
    assert_eq!(ctx.surface().pixel(8, 10), Some(RED));
    assert_eq!(ctx.surface().pixel(21, 10), Some(RED));
    assert_eq!(ctx.surface().pixel(7, 10), Some(Color::TRANSPARENT));
    assert_eq!(ctx.surface().pixel(22, 10), Some(Color::TRANSPARENT));
}

#[test]
fn dashed_line_draws_gaps() {
    let mut ctx = context(120, 20);
    ctx.set_stroke_style(PaintSource::Solid(RED));
    ctx.set_line_width(4.0);
    ctx.set_line_dash(vec![20.0, 10.0]);
    ctx.begin_path();
    ctx.move_to(10.0, 10.0);
    ctx.line_to(110.0, 10.0);
    ctx.stroke();

    // Dashing deflects to the general pipeline.
    assert_eq!(ctx.slow_path_count(), 1);
    // On [10, 30), off [30, 40), on [40, 60) ...
    assert_eq!(ctx.surface().pixel(15, 10), Some(RED));
    assert_eq!(ctx.surface().pixel(35, 10), Some(Color::TRANSPARENT));
    assert_eq!(ctx.surface().pixel(45, 10), Some(RED));
}
