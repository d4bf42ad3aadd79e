use simd_mandelbrot::{
    coords::Complex, screen, Config, InstructionSet, Palette, Pixel, Session, ViewBounds,
    ZoomDirection,
};

fn config(instruction_set: InstructionSet, threads: usize) -> Config {
    Config {
        size: screen::Size::new(203, 157).unwrap(),
        max_iter: 120,
        bounds: ViewBounds::new(-2.0, 0.75, -1.25, 1.25).unwrap(),
        instruction_set,
        palette: Palette::Polynomial,
        threads,
    }
}

fn render(config: &Config) -> (Vec<u32>, Vec<Pixel>) {
    let mut session = Session::new(config).unwrap();
    session.render();
    (session.iteration_field(), session.pixels().to_vec())
}

#[test]
fn thread_count_does_not_change_the_frame() {
    for instruction_set in [
        InstructionSet::Reference,
        InstructionSet::Vector4,
        InstructionSet::Vector16,
    ] {
        let single = render(&config(instruction_set, 1));
        for threads in [2, 3, 8] {
            assert_eq!(
                render(&config(instruction_set, threads)),
                single,
                "{instruction_set} with {threads} threads"
            );
        }
    }
}

#[test]
fn vector4_frame_is_identical_to_reference() {
    assert_eq!(
        render(&config(InstructionSet::Vector4, 4)),
        render(&config(InstructionSet::Reference, 4))
    );
}

#[test]
fn double_precision_differs_only_at_a_few_boundary_pixels() {
    let single = config(InstructionSet::Reference, 4);
    let (width, height) = (single.size.width() as i64, single.size.height() as i64);
    let (reference, _) = render(&single);
    let (wide, _) = render(&config(InstructionSet::Vector16, 4));

    let differing: Vec<usize> = reference
        .iter()
        .zip(&wide)
        .enumerate()
        .filter(|(_, (single, double))| single != double)
        .map(|(index, _)| index)
        .collect();
    assert!(
        differing.len() * 200 < reference.len(),
        "{} of {} pixels differ",
        differing.len(),
        reference.len()
    );

    // Precision only moves a pixel across a level set, so each difference sits
    // next to a pixel whose single-precision count is already different.
    for &index in &differing {
        let (x, y) = ((index as i64) % width, (index as i64) / width);
        let on_boundary = (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (x + dx, y + dy)))
            .filter(|&(nx, ny)| (nx, ny) != (x, y))
            .filter(|&(nx, ny)| (0..width).contains(&nx) && (0..height).contains(&ny))
            .any(|(nx, ny)| reference[(ny * width + nx) as usize] != reference[index]);
        assert!(on_boundary, "pixel ({x}, {y}) differs inside a flat region");
    }
}

#[test]
fn known_points_in_a_full_frame() {
    // 5x5 over [-2, 3]²: the centre pixel is the origin and the corner is -2 - 2i.
    for instruction_set in [
        InstructionSet::Reference,
        InstructionSet::Vector4,
        InstructionSet::Vector16,
    ] {
        let mut session = Session::new(&Config {
            size: screen::Size::new(5, 5).unwrap(),
            bounds: ViewBounds::new(-2.0, 3.0, -2.0, 3.0).unwrap(),
            max_iter: 64,
            instruction_set,
            threads: 2,
            ..Config::default()
        })
        .unwrap();
        let field = session.iteration_field();
        assert_eq!(field[2 * 5 + 2], 64, "{instruction_set}");
        assert_eq!(field[0], 1, "{instruction_set}");
    }
}

#[test]
fn view_changes_rerender_the_whole_frame() {
    let mut session = Session::new(&config(InstructionSet::Vector4, 2)).unwrap();
    session.render();
    let before = session.pixels().to_vec();

    session.zoom(Complex::new(-0.75, 0.1), ZoomDirection::In);
    session.render();
    assert_ne!(session.pixels(), &before[..]);

    let mut fresh = Session::new(&Config {
        bounds: session.bounds(),
        ..config(InstructionSet::Vector4, 2)
    })
    .unwrap();
    fresh.render();
    assert_eq!(session.pixels(), fresh.pixels());
}

#[test]
fn resize_then_render_fills_the_new_buffer() {
    let mut session = Session::new(&config(InstructionSet::Vector16, 2)).unwrap();
    session.resize(33, 17).unwrap();
    session.render();
    assert_eq!(session.pixels().len(), 33 * 17);
    assert!(session.pixels().iter().all(|pixel| pixel.opacity == 255));
}
