//! Canvas2D painter.
//!
//! Replays a [`Frame`] display list onto an HTML `<canvas>` via
//! `CanvasRenderingContext2d`.

use pl_core::{DrawCmd, Frame};
use web_sys::CanvasRenderingContext2d;

/// Paint every command in order.
pub fn paint_frame(ctx: &CanvasRenderingContext2d, frame: &Frame) {
    for cmd in &frame.commands {
        paint_cmd(ctx, cmd);
    }
}

fn paint_cmd(ctx: &CanvasRenderingContext2d, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::Clear { width, height } => {
            ctx.clear_rect(0.0, 0.0, *width, *height);
        }
        DrawCmd::FillRect { rect, color } => {
            ctx.set_fill_style_str(&color.to_css());
            ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
        }
        DrawCmd::StrokeSegments {
            segments,
            color,
            line_width,
        } => {
            ctx.begin_path();
            ctx.set_stroke_style_str(&color.to_css());
            ctx.set_line_width(*line_width);
            for seg in segments {
                ctx.move_to(seg.p0.x, seg.p0.y);
                ctx.line_to(seg.p1.x, seg.p1.y);
            }
            ctx.stroke();
        }
        DrawCmd::FillText {
            text,
            origin,
            color,
            font,
        } => {
            ctx.set_fill_style_str(&color.to_css());
            ctx.set_font(font);
            let _ = ctx.fill_text(text, origin.x, origin.y);
        }
    }
}
