use crate::models::{Scene, ViewportTransform, VisualClass};
use std::f64::consts::PI;
use web_sys::CanvasRenderingContext2d;

const CANVAS_BACKGROUND_COLOR: &str = "#0a0a0a";
const LAND_FILL_COLOR: &str = "#161616";
const COASTLINE_COLOR: &str = "#333";
const COASTLINE_WIDTH: f64 = 1.0;

const EMPTY_MESSAGE_COLOR: &str = "#666";
const EMPTY_MESSAGE_FONT: &str = "16px sans-serif";
const EMPTY_MESSAGE_TEXT: &str = "Search for a station to add it to the map";

const STATION_COLOR: &str = "#4a9eff";
const NODE_FILL_COLOR: &str = "#2a2a2a";
const SELECTED_COLOR: &str = "#ffaa00";
const LABEL_COLOR: &str = "#fff";
const MARKER_OUTLINE_RATIO: f64 = 0.2;

const CONNECTOR_COLOR: &str = "rgba(255, 170, 0, 0.35)";
const DURATION_TEXT_COLOR: &str = "#fff";
const DURATION_HALO_COLOR: &str = "#0a0a0a";
const DURATION_HALO_RATIO: f64 = 0.25;

fn font(size: f64) -> String {
    format!("{size}px sans-serif")
}

fn draw_background(ctx: &CanvasRenderingContext2d, scene: &Scene, k: f64) {
    ctx.set_fill_style_str(LAND_FILL_COLOR);
    ctx.set_stroke_style_str(COASTLINE_COLOR);
    ctx.set_line_width(COASTLINE_WIDTH / k);

    for path in &scene.background {
        let Some((first, rest)) = path.points.split_first() else { continue };
        ctx.begin_path();
        ctx.move_to(first.0, first.1);
        for point in rest {
            ctx.line_to(point.0, point.1);
        }
        if path.closed {
            ctx.close_path();
            ctx.fill();
        }
        ctx.stroke();
    }
}

fn draw_connectors(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    ctx.set_stroke_style_str(CONNECTOR_COLOR);
    ctx.set_line_cap("round");

    for connector in &scene.connectors {
        ctx.set_line_width(connector.width);
        ctx.begin_path();
        ctx.move_to(connector.start.0, connector.start.1);
        ctx.line_to(connector.end.0, connector.end.1);
        ctx.stroke();
    }
}

fn draw_markers(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    for marker in &scene.markers {
        let stroke = match marker.class {
            VisualClass::Selected => SELECTED_COLOR,
            VisualClass::Deselected => STATION_COLOR,
        };
        ctx.set_fill_style_str(NODE_FILL_COLOR);
        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(marker.size * MARKER_OUTLINE_RATIO);
        ctx.begin_path();
        let _ = ctx.arc(marker.position.0, marker.position.1, marker.radius(), 0.0, 2.0 * PI);
        ctx.fill();
        ctx.stroke();
    }
}

fn draw_labels(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");

    for label in &scene.labels {
        let color = match label.class {
            VisualClass::Selected => SELECTED_COLOR,
            VisualClass::Deselected => LABEL_COLOR,
        };
        ctx.set_fill_style_str(color);
        ctx.set_font(&font(label.font_size));
        let (x, y) = label.anchor();
        let _ = ctx.fill_text(&label.text, x, y);
    }
}

fn draw_duration_labels(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_line_join("round");

    for label in &scene.duration_labels {
        ctx.set_font(&font(label.font_size));
        ctx.set_stroke_style_str(DURATION_HALO_COLOR);
        ctx.set_line_width(label.font_size * DURATION_HALO_RATIO);
        let _ = ctx.stroke_text(&label.text, label.position.0, label.position.1);
        ctx.set_fill_style_str(DURATION_TEXT_COLOR);
        let _ = ctx.fill_text(&label.text, label.position.0, label.position.1);
    }
}

/// Paint the whole scene under `transform`
///
/// Sizes in the scene are already divided by the scale, so everything but
/// positions comes out at its base size on screen.
pub fn draw_map(ctx: &CanvasRenderingContext2d, scene: &Scene, transform: ViewportTransform, (width, height): (f64, f64)) {
    ctx.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.save();
    let _ = ctx.translate(transform.x, transform.y);
    let _ = ctx.scale(transform.k, transform.k);

    draw_background(ctx, scene, transform.k);
    draw_connectors(ctx, scene);
    draw_markers(ctx, scene);
    draw_labels(ctx, scene);
    draw_duration_labels(ctx, scene);

    ctx.restore();

    if scene.markers.is_empty() {
        ctx.set_fill_style_str(EMPTY_MESSAGE_COLOR);
        ctx.set_font(EMPTY_MESSAGE_FONT);
        ctx.set_text_align("center");
        let _ = ctx.fill_text(EMPTY_MESSAGE_TEXT, width / 2.0, height / 2.0);
    }
}
