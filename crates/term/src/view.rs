//! ArcadeView: draws a minigame [`Frame`] plus the round HUD into a framebuffer.
//!
//! Pure (no I/O), so layouts are unit-tested by reading framebuffer rows back.

use crate::core::{Frame, FrameBody, GridCell};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Color, GameKind, InputMode, RoundStatus};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Round state shown around the game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub game: GameKind,
    pub status: RoundStatus,
    pub streak: u32,
    pub score: u32,
    /// Countdown progress in `[0, 1]`
    pub progress: f64,
    pub mode: InputMode,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(90, 90, 130);
const BODY_TOP: u16 = 6;

pub struct ArcadeView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Progress bar width cap.
    bar_w: u16,
}

impl Default for ArcadeView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            bar_w: 40,
        }
    }
}

impl ArcadeView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, hud: &Hud, frame: &Frame, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let title = format!("PUZZLE ARCADE · {}", hud.game.as_str().to_uppercase());
        fb.put_centered(0, &title, Style::default().bold());

        self.draw_progress(fb, hud.progress, 2);

        let status = format!(
            "{}   STREAK {}   SCORE {}",
            hud.status.as_str().to_uppercase(),
            hud.streak,
            hud.score
        );
        fb.put_centered(3, &status, Style::fg(status_color(hud.status)).bold());
        fb.put_centered(4, &frame.caption, Style::default().dim());

        let (bx, by, bw, bh) = match &frame.body {
            FrameBody::Grid {
                rows,
                columns,
                cells,
                cursor,
            } => self.draw_grid(fb, *rows, *columns, cells, *cursor),
            FrameBody::Text { lines } => draw_text(fb, lines),
        };

        if let Some(banner) = banner(hud.status) {
            let y = by.saturating_add(bh / 2);
            let w = banner.chars().count() as u16 + 2;
            let x = bx.saturating_add(bw.saturating_sub(w) / 2);
            let style = Style::fg(Rgb::new(255, 255, 255))
                .on(status_color(hud.status))
                .bold();
            fb.put_str(x, y, &format!(" {banner} "), style);
        }

        if viewport.height > BODY_TOP {
            fb.put_centered(viewport.height - 1, hint(hud.mode), Style::default().dim());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, hud: &Hud, frame: &Frame, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(hud, frame, viewport, &mut fb);
        fb
    }

    fn draw_progress(&self, fb: &mut FrameBuffer, progress: f64, y: u16) {
        let bar_w = self.bar_w.min(fb.width().saturating_sub(8));
        if bar_w == 0 {
            return;
        }
        let progress = progress.clamp(0.0, 1.0);
        let filled = (progress * bar_w as f64).round() as u16;
        let x = fb.width().saturating_sub(bar_w + 7) / 2;

        let frame = Style::default();
        let mut cx = fb.put_str(x, y, "[", frame);
        let fill = Style::fg(progress_color(progress));
        for i in 0..bar_w {
            let ch = if i < filled { '█' } else { '░' };
            let style = if i < filled { fill } else { fill.dim() };
            fb.put(cx, y, ch, style);
            cx += 1;
        }
        cx = fb.put_str(cx, y, "]", frame);
        fb.put_str(cx + 1, y, &format!("{:>3}%", (progress * 100.0) as u32), frame);
    }

    fn draw_grid(
        &self,
        fb: &mut FrameBuffer,
        rows: u8,
        columns: u8,
        cells: &[GridCell],
        cursor: Option<usize>,
    ) -> (u16, u16, u16, u16) {
        let w = columns as u16 * self.cell_w + 2;
        let h = rows as u16 + 2;
        let x0 = fb.width().saturating_sub(w) / 2;
        let y0 = BODY_TOP;

        fb.draw_box(x0, y0, w, h, Style::fg(Rgb::new(200, 200, 200)));
        for (i, cell) in cells.iter().enumerate() {
            let (row, col) = (i / columns.max(1) as usize, i % columns.max(1) as usize);
            let (ch, mut style) = grid_glyph(*cell);
            if cursor == Some(i) {
                style = style.on(CURSOR_BG);
            }
            let px = x0 + 1 + col as u16 * self.cell_w;
            fb.fill_rect(px, y0 + 1 + row as u16, self.cell_w, 1, ch, style);
        }
        (x0, y0, w, h)
    }
}

fn draw_text(fb: &mut FrameBuffer, lines: &[String]) -> (u16, u16, u16, u16) {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let w = inner.max(16) + 4;
    let h = lines.len() as u16 + 2;
    let x0 = fb.width().saturating_sub(w) / 2;
    let y0 = BODY_TOP;

    fb.draw_box(x0, y0, w, h, Style::fg(Rgb::new(200, 200, 200)));
    for (i, line) in lines.iter().enumerate() {
        fb.put_str(x0 + 2, y0 + 1 + i as u16, line, Style::default());
    }
    (x0, y0, w, h)
}

fn grid_glyph(cell: GridCell) -> (char, Style) {
    match cell {
        GridCell::Empty => ('·', Style::fg(Rgb::new(90, 90, 100)).on(BOARD_BG).dim()),
        GridCell::Tile(color) => ('█', Style::fg(tile_rgb(color)).on(BOARD_BG)),
        GridCell::Lit => ('█', Style::fg(Rgb::new(250, 250, 250)).on(BOARD_BG).bold()),
        GridCell::Hidden => ('░', Style::fg(Rgb::new(110, 110, 120)).on(BOARD_BG)),
        GridCell::Marked => ('█', Style::fg(Rgb::new(100, 220, 120)).on(BOARD_BG)),
        GridCell::Miss => ('X', Style::fg(Rgb::new(220, 80, 80)).on(BOARD_BG).bold()),
    }
}

fn tile_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(220, 80, 80),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Cyan => Rgb::new(80, 220, 220),
    }
}

fn status_color(status: RoundStatus) -> Rgb {
    match status {
        RoundStatus::Won => Rgb::new(60, 160, 80),
        RoundStatus::Lost => Rgb::new(180, 60, 60),
        RoundStatus::Reset => Rgb::new(160, 130, 40),
        RoundStatus::Idle | RoundStatus::Running => Rgb::new(200, 200, 200),
    }
}

fn progress_color(progress: f64) -> Rgb {
    if progress < 0.6 {
        Rgb::new(100, 220, 120)
    } else if progress < 0.85 {
        Rgb::new(240, 220, 80)
    } else {
        Rgb::new(220, 80, 80)
    }
}

fn banner(status: RoundStatus) -> Option<&'static str> {
    match status {
        RoundStatus::Won => Some("SOLVED"),
        RoundStatus::Lost => Some("FAILED"),
        RoundStatus::Reset => Some("RESET"),
        RoundStatus::Idle | RoundStatus::Running => None,
    }
}

fn hint(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Navigate => "arrows/hjkl move · space select · r restart · q quit",
        InputMode::Text => "type · enter submit · ctrl-r restart · esc quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hud(status: RoundStatus, progress: f64) -> Hud {
        Hud {
            game: GameKind::Tiles,
            status,
            streak: 2,
            score: 9,
            progress,
            mode: InputMode::Navigate,
        }
    }

    fn grid_frame() -> Frame {
        Frame {
            caption: "3 tiles left".to_string(),
            body: FrameBody::Grid {
                rows: 2,
                columns: 2,
                cells: vec![
                    GridCell::Tile(Color::Red),
                    GridCell::Empty,
                    GridCell::Tile(Color::Blue),
                    GridCell::Tile(Color::Blue),
                ],
                cursor: Some(1),
            },
        }
    }

    #[test]
    fn test_hud_rows() {
        let fb = ArcadeView::default().render(
            &hud(RoundStatus::Running, 0.5),
            &grid_frame(),
            Viewport::new(60, 20),
        );
        assert!(fb.row_text(0).contains("PUZZLE ARCADE · TILES"));
        assert!(fb.row_text(2).contains(" 50%"));
        assert!(fb.row_text(3).contains("RUNNING   STREAK 2   SCORE 9"));
        assert!(fb.row_text(4).contains("3 tiles left"));
        assert!(fb.row_text(19).contains("q quit"));
    }

    #[test]
    fn test_grid_cells_drawn_two_wide() {
        let fb = ArcadeView::default().render(
            &hud(RoundStatus::Running, 0.0),
            &grid_frame(),
            Viewport::new(20, 12),
        );
        // Box is 6 wide, centered at x=7.
        assert_eq!(fb.row_text(BODY_TOP).trim(), "┌────┐");
        assert_eq!(fb.row_text(BODY_TOP + 1).trim(), "│██··│");
        assert_eq!(fb.row_text(BODY_TOP + 2).trim(), "│████│");

        let cursor = fb.get(10, BODY_TOP + 1).unwrap();
        assert_eq!(cursor.style.bg, CURSOR_BG);
        let red = fb.get(8, BODY_TOP + 1).unwrap();
        assert_eq!(red.style.fg, tile_rgb(Color::Red));
    }

    #[test]
    fn test_text_body_and_banner() {
        let frame = Frame {
            caption: String::new(),
            body: FrameBody::Text {
                lines: vec!["1234  exact 4  partial 0".to_string(), "> ____".to_string()],
            },
        };
        let fb = ArcadeView::default().render(
            &hud(RoundStatus::Won, 0.3),
            &frame,
            Viewport::new(60, 16),
        );
        assert!(fb.row_text(BODY_TOP + 1).contains("1234  exact 4  partial 0"));
        // Banner sits on the middle row of the 4-row box.
        assert!(fb.row_text(BODY_TOP + 2).contains(" SOLVED "));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let fb = ArcadeView::default().render(
            &hud(RoundStatus::Lost, 1.0),
            &grid_frame(),
            Viewport::new(3, 2),
        );
        assert_eq!(fb.width(), 3);
    }
}
