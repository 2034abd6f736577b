use std::path::Path;
use std::time::Duration;

use console::Style;
use glimpse_core::resample::ResamplePolicy;
use glimpse_core::scale::{FitPolicy, ScaledPlacement, ViewportSize};
use glimpse_core::source::{ImageInfo, Origin};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn print_placement_rows(s: &Styles, placement: Option<&ScaledPlacement>) {
    match placement {
        Some(p) if !p.is_degenerate() => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Drawn size"),
                s.value
                    .apply_to(format!("{}x{}", p.scaled_width, p.scaled_height))
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Offset"),
                s.value.apply_to(format!("({}, {})", p.offset_x, p.offset_y))
            );
        }
        _ => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Drawn size"),
                s.disabled.apply_to("nothing drawn (empty placement)")
            );
        }
    }
}

pub fn print_placement_summary(
    source: (u32, u32),
    viewport: ViewportSize,
    scale: f64,
    fit: FitPolicy,
    placement: &ScaledPlacement,
) {
    let s = Styles::new();
    print_title(&s, "Glimpse Placement");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.value.apply_to(format!("{}x{}", source.0, source.1))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Viewport"),
        s.value
            .apply_to(format!("{}x{}", viewport.width, viewport.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Fit"),
        s.method.apply_to(format!("{fit:?}"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{scale:.4}"))
    );
    print_placement_rows(&s, Some(placement));
    println!();
}

pub fn print_render_summary(
    info: &ImageInfo,
    viewport: ViewportSize,
    resample: ResamplePolicy,
    placement: Option<&ScaledPlacement>,
    output: &Path,
    elapsed: Duration,
) {
    let s = Styles::new();
    print_title(&s, "Glimpse Render");

    let source = match &info.origin {
        Origin::File(path) => path.display().to_string(),
        Origin::Resource { path, .. } => format!("{} (resource)", path.display()),
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(source)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.value.apply_to(format!("{}x{}", info.width, info.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Viewport"),
        s.value
            .apply_to(format!("{}x{}", viewport.width, viewport.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Resample"),
        s.method.apply_to(resample)
    );
    print_placement_rows(&s, placement);
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Time"),
        s.value.apply_to(format!("{:.1}ms", elapsed.as_secs_f64() * 1000.0))
    );
    println!();
}
