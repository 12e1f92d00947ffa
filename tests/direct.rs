use swcanvas::*;

const RED: Color = Color::from_rgba8(255, 0, 0, 255);
const TAU: f32 = std::f32::consts::TAU;

fn context(width: u32, height: u32) -> Context {
    Context::new(Surface::new(width, height).unwrap())
}

#[test]
fn common_draws_never_deflect() {
    let mut ctx = context(100, 100);
    ctx.set_fill_style(PaintSource::Solid(RED));
    ctx.set_stroke_style(PaintSource::Solid(RED));

    ctx.fill_rect(5.0, 5.0, 20.0, 10.0);
    ctx.fill_circle(50.0, 50.0, 20.0).unwrap();
    ctx.stroke_circle(50.0, 50.0, 25.0).unwrap();
    ctx.set_line_width(3.0);
    ctx.stroke_rect(10.0, 60.0, 30.0, 20.0);
    ctx.fill_round_rect(60.0, 10.0, 30.0, 20.0, 5.0).unwrap();

    ctx.translate(1.0, 2.0);
    ctx.fill_circle(20.0, 20.0, 5.0).unwrap();

    ctx.set_global_alpha(0.5);
    ctx.fill_rect(0.0, 0.0, 4.0, 4.0);

    assert_eq!(ctx.slow_path_count(), 0);
}

#[test]
fn skew_deflects() {
    let mut ctx = context(50, 50);
    ctx.set_fill_style(PaintSource::Solid(RED));
    ctx.concat_transform(1.0, 0.0, 0.5, 1.0, 0.0, 0.0);
    ctx.fill_circle(20.0, 20.0, 8.0).unwrap();
    assert_eq!(ctx.slow_path_count(), 1);

    ctx.fill_rect(2.0, 2.0, 10.0, 10.0);
    assert_eq!(ctx.slow_path_count(), 2);
}

#[test]
fn non_uniform_scale_deflects_circles_but_not_rects() {
    let mut ctx = context(50, 50);
    ctx.set_fill_style(PaintSource::Solid(RED));
    ctx.scale(2.0, 1.0);

    ctx.fill_rect(2.0, 2.0, 10.0, 10.0);
    assert_eq!(ctx.slow_path_count(), 0);

    ctx.fill_circle(10.0, 20.0, 5.0).unwrap();
    assert_eq!(ctx.slow_path_count(), 1);
}

#[test]
fn composite_op_and_shadow_deflect() {
    let mut ctx = context(50, 50);
    ctx.set_fill_style(PaintSource::Solid(RED));

    ctx.set_composite_op(CompositeOp::DestinationOver);
    ctx.fill_rect(2.0, 2.0, 10.0, 10.0);
    assert_eq!(ctx.slow_path_count(), 1);

    ctx.set_composite_op(CompositeOp::SourceOver);
    ctx.set_shadow_color(Color::BLACK);
    ctx.set_shadow_offset(3.0, 3.0);
    ctx.fill_rect(2.0, 2.0, 10.0, 10.0);
    assert_eq!(ctx.slow_path_count(), 2);
}

#[test]
fn full_arc_and_circle_agree() {
    let mut circle = context(60, 60);
    circle.set_fill_style(PaintSource::Solid(RED));
    circle.fill_circle(30.0, 30.0, 10.0).unwrap();

    let mut arc = context(60, 60);
    arc.set_fill_style(PaintSource::Solid(RED));
    arc.begin_path();
    arc.arc(30.0, 30.0, 10.0, 0.0, TAU, false).unwrap();
    arc.fill();

    assert_eq!(circle.slow_path_count(), 0);
    assert_eq!(arc.slow_path_count(), 0);
    assert_eq!(circle.surface().data(), arc.surface().data());

    let mut circle_stroke = context(60, 60);
    circle_stroke.set_stroke_style(PaintSource::Solid(RED));
    circle_stroke.set_line_width(4.0);
    circle_stroke.stroke_circle(30.0, 30.0, 12.0).unwrap();

    let mut arc_stroke = context(60, 60);
    arc_stroke.set_stroke_style(PaintSource::Solid(RED));
    arc_stroke.set_line_width(4.0);
    arc_stroke.begin_path();
    arc_stroke.arc(30.0, 30.0, 12.0, 0.0, TAU, false).unwrap();
    arc_stroke.stroke();

    assert_eq!(circle_stroke.surface().data(), arc_stroke.surface().data());
}

#[test]
fn partial_arc_is_a_subset_of_the_circle() {
    let mut full = context(60, 60);
    full.set_stroke_style(PaintSource::Solid(RED));
    full.set_line_width(4.0);
    full.stroke_circle(30.0, 30.0, 15.0).unwrap();

    // First quadrant (angles 0..pi/2 point down-right in y-down space).
    let mut quarter = context(60, 60);
    quarter.set_stroke_style(PaintSource::Solid(RED));
    quarter.set_line_width(4.0);
    quarter.begin_path();
    quarter
        .arc(30.0, 30.0, 15.0, 0.0, std::f32::consts::FRAC_PI_2, false)
        .unwrap();
    quarter.stroke();

    assert_eq!(quarter.slow_path_count(), 0);

    let mut arc_pixels = 0;
    for y in 0..60 {
        for x in 0..60 {
            let a = quarter.surface().pixel(x, y).unwrap();
            if a.alpha() != 0 {
                arc_pixels += 1;
                // Every arc pixel is a circle pixel.
                assert_eq!(full.surface().pixel(x, y), Some(RED), "at {} {}", x, y);
                // And it lies in the first quadrant, give or take the
                // inclusive-boundary pixels on the axes.
                assert!(x as i32 >= 29 && y as i32 >= 29, "at {} {}", x, y);
            }
        }
    }

    assert!(arc_pixels > 0);
    // Roughly a quarter of the ring.
    let mut full_pixels = 0;
    for y in 0..60 {
        for x in 0..60 {
            if full.surface().pixel(x, y).unwrap().alpha() != 0 {
                full_pixels += 1;
            }
        }
    }
    assert!(arc_pixels < full_pixels / 2);
}

#[test]
fn rotated_rect_matches_path_pipeline() {
    let mut direct = context(60, 60);
    direct.set_fill_style(PaintSource::Solid(RED));
    direct.translate(30.0, 30.0);
    direct.rotate(0.4);
    direct.fill_rect(-15.0, -8.0, 30.0, 16.0);
    assert_eq!(direct.slow_path_count(), 0);

    let mut general = context(60, 60);
    general.set_fill_style(PaintSource::Solid(RED));
    general.translate(30.0, 30.0);
    general.rotate(0.4);
    general.begin_path();
    general.move_to(-15.0, -8.0);
    general.line_to(15.0, -8.0);
    general.line_to(15.0, 8.0);
    general.line_to(-15.0, 8.0);
    general.close_path();
    general.fill();
    assert_eq!(general.slow_path_count(), 1);

    assert_eq!(direct.surface().data(), general.surface().data());
}

#[test]
fn axis_aligned_stroke_rect_matches_path_pipeline() {
    let mut direct = context(60, 60);
    direct.set_stroke_style(PaintSource::Solid(RED));
    direct.set_line_width(5.0);
    direct.stroke_rect(10.0, 10.0, 30.0, 20.0);
    assert_eq!(direct.slow_path_count(), 0);

    let mut general = context(60, 60);
    general.set_stroke_style(PaintSource::Solid(RED));
    general.set_line_width(5.0);
    general.begin_path();
    general.move_to(10.0, 10.0);
    general.line_to(40.0, 10.0);
    general.line_to(40.0, 30.0);
    general.line_to(10.0, 30.0);
    general.close_path();
    general.stroke();
    assert_eq!(general.slow_path_count(), 1);

    assert_eq!(direct.surface().data(), general.surface().data());
}

#[test]
fn axis_aligned_thin_line_matches_path_pipeline() {
    let mut direct = context(30, 30);
    direct.set_stroke_style(PaintSource::Solid(RED));
    direct.begin_path();
    direct.move_to(5.0, 10.0);
    direct.line_to(25.0, 10.0);
    direct.stroke();
    assert_eq!(direct.slow_path_count(), 0);

    // Force the pipeline with an interior point on the same segment.
    let mut general = context(30, 30);
    general.set_stroke_style(PaintSource::Solid(RED));
    general.begin_path();
    general.move_to(5.0, 10.0);
    general.line_to(15.0, 10.0);
    general.line_to(25.0, 10.0);
    general.stroke();
    assert_eq!(general.slow_path_count(), 1);

    assert_eq!(direct.surface().data(), general.surface().data());
}

#[test]
fn diagonal_one_pixel_line_is_bresenham() {
    let mut ctx = context(20, 20);
    ctx.set_stroke_style(PaintSource::Solid(RED));
    ctx.begin_path();
    ctx.move_to(2.0, 2.0);
    ctx.line_to(12.0, 12.0);
    ctx.stroke();

    assert_eq!(ctx.slow_path_count(), 0);
    for i in 1..11 {
        assert_eq!(ctx.surface().pixel(i, i), Some(RED), "diagonal {}", i);
    }
}

#[test]
fn round_rect_rotated_direct_stays_fast() {
    let mut ctx = context(80, 80);
    ctx.set_fill_style(PaintSource::Solid(RED));
    ctx.translate(40.0, 40.0);
    ctx.rotate(0.6);
    ctx.fill_round_rect(-20.0, -10.0, 40.0, 20.0, 6.0).unwrap();
    assert_eq!(ctx.slow_path_count(), 0);

    // Center is filled, far corners are not.
    assert_eq!(ctx.surface().pixel(40, 40), Some(RED));
    assert_eq!(ctx.surface().pixel(0, 0), Some(Color::TRANSPARENT));
}

#[test]
fn fill_and_stroke_covers_the_seam_once() {
    let mut ctx = context(60, 60);
    // Translucent fill and stroke: the boundary must blend exactly once.
    ctx.set_fill_style(PaintSource::Solid(Color::from_rgba8(0, 0, 255, 128)));
    ctx.set_stroke_style(PaintSource::Solid(Color::from_rgba8(255, 0, 0, 128)));
    ctx.set_line_width(4.0);
    ctx.fill_and_stroke_circle(30.0, 30.0, 15.0).unwrap();

    // A pixel well inside the stroke ring blends red over background only:
    // alpha stays 128.
    let ring = ctx.surface().pixel(30 + 15, 30).unwrap();
    assert_eq!(ring.red(), 255);
    assert!((i32::from(ring.alpha()) - 128).abs() <= 1);

    // The fill interior blends blue once.
    let inner = ctx.surface().pixel(30, 30).unwrap();
    assert_eq!(inner.blue(), 255);
    assert!((i32::from(inner.alpha()) - 128).abs() <= 1);
}
