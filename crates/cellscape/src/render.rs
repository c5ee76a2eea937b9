//! Terminal rendering of scene frames.

use cellscape_core::Rgb;
use cellscape_scene::{Frame as SceneFrame, Material};
use glam::{Mat4, Vec3};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Smallest area the scene is drawn into.
const MIN_WIDTH: u16 = 24;
const MIN_HEIGHT: u16 = 10;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Camera placement; reduced tiers pull back and narrow the field of view.
struct Camera {
    eye: Vec3,
    fov_deg: f32,
}

impl Camera {
    fn for_frame(frame: &SceneFrame) -> Self {
        if frame.tier.is_reduced() {
            Self {
                eye: Vec3::new(0.0, -2.0, 15.0),
                fov_deg: 35.0,
            }
        } else {
            Self {
                eye: Vec3::new(0.0, -2.0, 9.0),
                fov_deg: 45.0,
            }
        }
    }
}

/// A point after projection onto the terminal grid.
#[derive(Debug, Clone, Copy)]
struct Splat {
    depth: f32,
    glyph: char,
    color: Rgb,
}

/// Draw a scene frame, or a placeholder when the terminal is too small.
pub fn draw(frame: &mut Frame, scene: &SceneFrame, background: &[Rgb], help: Line<'_>) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        draw_placeholder(frame, area);
        return;
    }

    let [canvas, help_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    let splats = rasterize(scene, canvas.width, canvas.height);
    let lines: Vec<Line> = (0..canvas.height)
        .map(|y| {
            let spans: Vec<Span> = (0..canvas.width)
                .map(|x| {
                    let bg = gradient_color(
                        background,
                        scene.gradient_angle,
                        x,
                        y,
                        canvas.width,
                        canvas.height,
                    );
                    match splats[y as usize * canvas.width as usize + x as usize] {
                        Some(splat) => {
                            let fg = bg.lerp(splat.color, scene.opacity * scene.opacity);
                            Span::styled(
                                splat.glyph.to_string(),
                                Style::new().fg(fg.into()).bg(bg.into()),
                            )
                        }
                        None => Span::styled(" ", Style::new().bg(bg.into())),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), canvas);
    frame.render_widget(help.centered(), help_area);
}

fn draw_placeholder(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from("Interactive 3D Experience Unavailable".bold()),
        Line::from("Enlarge the terminal to show the scene.".dark_gray()),
    ];
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
}

/// Glyph ramps as `(minimum projected rows, glyph)`, finer with more sphere
/// segments.
const RAMP_COARSE: [(f32, char); 2] = [(0.5, '●'), (0.0, '·')];
const RAMP_MEDIUM: [(f32, char); 3] = [(1.0, '●'), (0.3, '•'), (0.0, '·')];
const RAMP_FINE: [(f32, char); 4] = [(1.0, '●'), (0.5, '•'), (0.2, '∙'), (0.0, '·')];

fn glyph_ramp(segments: u32) -> &'static [(f32, char)] {
    match segments / 4 {
        0..=2 => &RAMP_COARSE,
        3..=7 => &RAMP_MEDIUM,
        _ => &RAMP_FINE,
    }
}

fn glyph_for(rows: f32, ramp: &[(f32, char)]) -> char {
    ramp.iter()
        .find(|(min, _)| rows >= *min)
        .map_or('·', |&(_, glyph)| glyph)
}

/// Project visible points into a depth-sorted grid of cells.
fn rasterize(scene: &SceneFrame, width: u16, height: u16) -> Vec<Option<Splat>> {
    let (w, h) = (width as i32, height as i32);
    let mut cells: Vec<Option<Splat>> = vec![None; width as usize * height as usize];
    let camera = Camera::for_frame(scene);
    let aspect = width as f32 / (height as f32 * CELL_ASPECT);
    let fov = camera.fov_deg.to_radians();
    let view = Mat4::look_at_rh(camera.eye, Vec3::ZERO, Vec3::Y);
    let projection = Mat4::perspective_rh(fov, aspect, 0.1, 100.0);
    let view_projection = projection * view;
    let focal = 1.0 / (fov / 2.0).tan();

    let material = Material::for_tier(scene.tier);
    let ramp = glyph_ramp(scene.budget.segments);
    let t = scene.elapsed;

    for point in scene.points.iter().filter(|p| p.visible && p.scale > 0.0) {
        let normal = point.position.normalize_or(Vec3::Z);
        let position = material.displace(point.position, normal, t, point.scale);
        let clip = view_projection * position.extend(1.0);
        if clip.w <= 0.0 {
            continue;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            continue;
        }

        let col = ((ndc.x + 1.0) / 2.0 * width as f32) as i32;
        let row = ((1.0 - ndc.y) / 2.0 * height as f32) as i32;
        let rows = point.radius * point.scale * focal / clip.w * height as f32 / 2.0;
        let eye_dir = (camera.eye - position).normalize_or(Vec3::Z);
        let splat = Splat {
            depth: clip.w,
            glyph: glyph_for(rows, ramp),
            color: material.shade(point.color, position, normal, eye_dir, t),
        };

        // denser pixel ratios resolve large spheres over several cells
        let reach = (rows.min(scene.pixel_ratio) - 1.0).max(0.0).round() as i32;
        for dy in -reach..=reach {
            for dx in -2 * reach..=2 * reach {
                let (x, y) = (col + dx, row + dy);
                let inside =
                    (dx as f32 / 2.0).powi(2) + (dy as f32).powi(2) <= (reach * reach) as f32;
                if !inside || x < 0 || y < 0 || x >= w || y >= h {
                    continue;
                }
                let cell = &mut cells[(y * w + x) as usize];
                if cell.is_none_or(|existing| splat.depth < existing.depth) {
                    *cell = Some(splat);
                }
            }
        }
    }

    cells
}

/// Linear gradient across the canvas, angle in CSS degrees (0 = upwards).
fn gradient_color(stops: &[Rgb], angle_deg: f32, x: u16, y: u16, width: u16, height: u16) -> Rgb {
    match stops {
        [] => Rgb::WHITE,
        [only] => *only,
        _ => {
            let (sin, cos) = angle_deg.to_radians().sin_cos();
            let w = width as f32;
            let h = height as f32 * CELL_ASPECT;
            let dx = x as f32 - w / 2.0;
            let dy = y as f32 * CELL_ASPECT - h / 2.0;
            let length = (w * sin).abs() + (h * cos).abs();
            let t = (0.5 + (dx * sin - dy * cos) / length.max(1.0)).clamp(0.0, 1.0);

            let segments = (stops.len() - 1) as f32;
            let scaled = t * segments;
            let index = (scaled.floor() as usize).min(stops.len() - 2);
            stops[index].lerp(stops[index + 1], scaled - index as f32)
        }
    }
}

/// Help line shown under the scene.
pub fn help_line(tier: &str, forced: bool, paused: bool, color: Color) -> Line<'static> {
    let mode = if forced { " (forced)" } else { " (auto)" };
    let pause = if paused { " resume  " } else { " pause  " };
    Line::from(vec![
        "q".bold().fg(color),
        " quit  ".dark_gray(),
        "space".bold().fg(color),
        pause.dark_gray(),
        "t".bold().fg(color),
        format!(" tier: {tier}{mode}  ").dark_gray(),
        "r".bold().fg(color),
        " reseed  ".dark_gray(),
        "s".bold().fg(color),
        " save".dark_gray(),
    ])
}
