/// ASCII canvas executing paint commands in terminal cells
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use polyview_core::geometry::Color;
use polyview_core::screen::PaintCommand;
use std::io::Write;

/// Character ramp for stroke weight (lightest to densest). Thin strokes are
/// near edges, so they get the densest glyphs and are painted last.
const STROKE_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

const FILL_CHAR: char = '#';

#[derive(Debug, Clone, Copy)]
struct Cell {
    glyph: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: Color::WHITE,
};

/// Cell buffer that rasterizes `PaintCommand`s and flushes them through
/// crossterm. Commands are executed in order; later commands overdraw.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    pub fn apply(&mut self, commands: &[PaintCommand]) {
        // Stroke glyphs are picked relative to the widest stroke in the
        // batch, so the nearest edge always gets the densest glyph.
        let max_width = commands
            .iter()
            .filter_map(|command| match command {
                PaintCommand::Line { width, .. } => Some(*width),
                PaintCommand::Fill { .. } => None,
            })
            .fold(0.0_f64, f64::max);

        for command in commands {
            match command {
                PaintCommand::Line { line, width, color } => {
                    let glyph = stroke_glyph(*width, max_width);
                    self.stroke_line(
                        (line.start.x, line.start.y),
                        (line.end.x, line.end.y),
                        glyph,
                        *color,
                    );
                }
                PaintCommand::Fill { polygon, color } => {
                    let outline: Vec<(f64, f64)> = polygon
                        .vertices
                        .iter()
                        .map(|vertex| (vertex.x, vertex.y))
                        .collect();
                    self.fill_polygon(&outline, *color);
                }
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, glyph: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Cell { glyph, color };
    }

    fn stroke_line(&mut self, start: (f64, f64), end: (f64, f64), glyph: char, color: Color) {
        // Clip in float space first; fan-clipped polygons produce endpoints
        // far outside any integer-safe range.
        let Some(((x0, y0), (x1, y1))) =
            clip_segment(start, end, self.width as f64, self.height as f64)
        else {
            return;
        };

        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil() as i64;
        if steps == 0 {
            self.plot(x0 as i64, y0 as i64, glyph, color);
            return;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.plot(x.round() as i64, y.round() as i64, glyph, color);
        }
    }

    fn fill_polygon(&mut self, outline: &[(f64, f64)], color: Color) {
        if outline.len() < 3 {
            return;
        }
        let min_y = outline.iter().fold(f64::MAX, |m, p| m.min(p.1)).floor();
        let max_y = outline.iter().fold(f64::MIN, |m, p| m.max(p.1)).ceil();
        let min_y = (min_y.max(0.0)) as i64;
        let max_y = (max_y.min(self.height as f64 - 1.0)) as i64;

        for row in min_y..=max_y {
            let scan_y = row as f64 + 0.5;
            // Even-odd rule: collect edge crossings, fill between pairs.
            let mut crossings: Vec<f64> = Vec::new();
            for (i, a) in outline.iter().enumerate() {
                let b = outline[(i + 1) % outline.len()];
                if (a.1 <= scan_y) == (b.1 <= scan_y) {
                    continue;
                }
                crossings.push(a.0 + (scan_y - a.1) / (b.1 - a.1) * (b.0 - a.0));
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let left = pair[0].max(0.0).round() as i64;
                let right = pair[1].min(self.width as f64 - 1.0).round() as i64;
                for x in left..=right {
                    self.plot(x, row, FILL_CHAR, color);
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                writer.queue(SetForegroundColor(TermColor::Rgb {
                    r: cell.color.r,
                    g: cell.color.g,
                    b: cell.color.b,
                }))?;
                writer.queue(Print(cell.glyph))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn glyph_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].glyph
    }
}

fn stroke_glyph(width: f64, max_width: f64) -> char {
    if max_width <= 0.0 {
        return STROKE_RAMP[STROKE_RAMP.len() - 1];
    }
    let nearness = 1.0 - (width / max_width).clamp(0.0, 1.0);
    let index = (nearness * (STROKE_RAMP.len() - 1) as f64).round() as usize;
    STROKE_RAMP[index.min(STROKE_RAMP.len() - 1)]
}

/// Liang-Barsky segment clip against the canvas rectangle.
fn clip_segment(
    start: (f64, f64),
    end: (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-dx, start.0),             // left edge x >= 0
        (dx, width - 1.0 - start.0), // right edge
        (-dy, start.1),             // top edge
        (dy, height - 1.0 - start.1), // bottom edge
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    if t0 > t1 {
        return None;
    }
    Some((
        (start.0 + dx * t0, start.1 + dy * t0),
        (start.0 + dx * t1, start.1 + dy * t1),
    ))
}
