//! Frame composition
//!
//! Each frame is drawn from scratch in a fixed order: clear, board tiles,
//! then either the live entities or the scoreboard, then the HUD on top.

use glam::Vec2;

use super::{ImageSource, Sprite, Surface};
use crate::consts::*;
use crate::sim::{Collidable, GamePhase, GameState, GemKind, ScoreBreakdown};

/// Tile art per board row, top to bottom
const BOARD_ROWS: [Sprite; 9] = [
    Sprite::WaterBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::GrassBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::GrassBlock,
    Sprite::WoodBlock,
];

const HUD_FONT: &str = "50px Gaegu";
const SCORE_FONT: &str = "45px Gaegu";
const TEXT_FILL: &str = "#fff";
const TEXT_STROKE: &str = "#000";
const TEXT_OUTLINE: f64 = 3.0;

/// Horizontal spacing of the HUD counters
const HUD_SPACING: f64 = 202.0;
/// Scoreboard panel sits this far above center
const SCORE_OFFSET: f64 = 70.0;
/// Vertical spacing of scoreboard lines
const SCORE_LINE: f64 = 80.0;

/// Draw one frame. Returns the number of draws skipped because an image
/// was missing from `images`.
pub fn render_frame<S, R>(surface: &mut S, images: &R, state: &GameState) -> usize
where
    S: Surface,
    R: ImageSource<Image = S::Image>,
{
    let mut painter = Painter {
        surface,
        images,
        missing: 0,
    };

    painter
        .surface
        .clear_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    painter.board();

    if state.phase == GamePhase::Playing {
        painter.entities(state);
    } else {
        painter.scoreboard(state.phase, &state.score());
    }

    painter.hud(state);
    painter.missing
}

struct Painter<'a, S, R> {
    surface: &'a mut S,
    images: &'a R,
    missing: usize,
}

impl<S, R> Painter<'_, S, R>
where
    S: Surface,
    R: ImageSource<Image = S::Image>,
{
    fn draw(&mut self, sprite: Sprite, x: f64, y: f64) {
        let images = self.images;
        match images.get(sprite) {
            Some(image) => self.surface.draw_image(image, x, y),
            None => self.missing += 1,
        }
    }

    fn draw_at(&mut self, sprite: Sprite, pos: Vec2) {
        self.draw(sprite, pos.x as f64, pos.y as f64);
    }

    /// Draw shrunk by `divisor` in both dimensions
    fn draw_shrunk(&mut self, sprite: Sprite, x: f64, y: f64, divisor: f64) {
        let images = self.images;
        match images.get(sprite) {
            Some(image) => {
                let (w, h) = self.surface.image_size(image);
                self.surface
                    .draw_image_scaled(image, x, y, w / divisor, h / divisor);
            }
            None => self.missing += 1,
        }
    }

    fn text_style(&mut self, font: &str) {
        self.surface.set_font(font);
        self.surface.set_fill_style(TEXT_FILL);
        self.surface.set_stroke_style(TEXT_STROKE);
        self.surface.set_line_width(TEXT_OUTLINE);
    }

    /// White text with a black outline
    fn outlined(&mut self, text: &str, x: f64, y: f64) {
        self.surface.stroke_text(text, x, y);
        self.surface.fill_text(text, x, y);
    }

    fn board(&mut self) {
        for (row, &tile) in BOARD_ROWS.iter().enumerate() {
            for col in 0..NUM_COLS {
                self.draw(
                    tile,
                    col as f64 * CELL_WIDTH as f64,
                    row as f64 * CELL_HEIGHT as f64,
                );
            }
        }
    }

    /// Back to front: gems, bugs, player, rocks
    fn entities(&mut self, state: &GameState) {
        for gem in &state.gems {
            self.draw_at(Sprite::for_gem(gem.kind), gem.position());
        }
        for enemy in &state.enemies {
            self.draw_at(Sprite::EnemyBug, enemy.position());
        }
        self.draw_at(
            Sprite::for_character(state.player.character),
            state.player.position(),
        );
        for rock in &state.rocks {
            self.draw_at(Sprite::Rock, rock.position());
        }
    }

    fn scoreboard(&mut self, phase: GamePhase, score: &ScoreBreakdown) {
        let images = self.images;
        match images.get(Sprite::ScoreBoard) {
            Some(panel) => {
                let (w, h) = self.surface.image_size(panel);
                self.surface.draw_image(
                    panel,
                    (CANVAS_WIDTH - w) / 2.0,
                    (CANVAS_HEIGHT - h - SCORE_OFFSET) / 2.0,
                );
            }
            None => self.missing += 1,
        }

        self.draw_shrunk(Sprite::Star, 175.0, 260.0 - SCORE_OFFSET, 1.5);
        for (i, kind) in GemKind::ALL.into_iter().enumerate() {
            let y = 345.0 + SCORE_LINE * i as f64 - SCORE_OFFSET;
            self.draw_shrunk(Sprite::for_gem(kind), 180.0, y, 1.8);
        }

        self.text_style(HUD_FONT);
        let (title, title_x) = match phase {
            GamePhase::Won => ("Congrats, you won!", 152.0),
            _ => ("Ah, you lost!", 220.0),
        };
        self.outlined(title, title_x, 280.0 - SCORE_OFFSET);

        self.surface.set_font(SCORE_FONT);
        let level_line = format!(
            "{} x {} = {}",
            score.level, LEVEL_POINTS, score.level_points
        );
        self.outlined(&level_line, 270.0, 340.0 - SCORE_OFFSET);
        for (i, kind) in GemKind::ALL.into_iter().enumerate() {
            let line = format!(
                "{} x {} = {}",
                score.gems.get(kind),
                kind.points(),
                score.gem_points(kind)
            );
            let y = 420.0 + SCORE_LINE * i as f64 - SCORE_OFFSET;
            self.outlined(&line, 270.0, y);
        }

        let total_y = 640.0 - SCORE_OFFSET;
        self.outlined("_______", 270.0, total_y);
        self.outlined(&format!("Total: {}", score.total), 270.0, total_y);
        self.outlined("Spacebar to restart", 170.0, 680.0);
    }

    fn hud(&mut self, state: &GameState) {
        self.draw(Sprite::Logo, 59.0, 30.0);
        self.draw_shrunk(Sprite::Star, 10.0, 670.0, 1.2);
        for (i, kind) in GemKind::ALL.into_iter().enumerate() {
            let x = 219.0 + HUD_SPACING * i as f64;
            self.draw_shrunk(Sprite::for_gem(kind), x, 682.0, 1.5);
        }

        self.text_style(HUD_FONT);
        let counters = [
            state.level,
            state.gems_collected.blue,
            state.gems_collected.green,
            state.gems_collected.orange,
        ];
        for (i, value) in counters.into_iter().enumerate() {
            let x = 34.0 + HUD_SPACING * i as f64;
            self.outlined(&value.to_string(), x, 825.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Enemy, Gem, GemCounts, GridPosition, Rock};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Draw(Sprite, f64, f64),
        DrawScaled(Sprite, f64, f64, f64, f64),
        Font(String),
        Fill(String, f64, f64),
        Stroke(String, f64, f64),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn draws_of(&self, sprite: Sprite) -> Vec<usize> {
            self.ops
                .iter()
                .enumerate()
                .filter(|(_, op)| matches!(op, Op::Draw(s, ..) if *s == sprite))
                .map(|(i, _)| i)
                .collect()
        }

        fn filled_text(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Fill(text, ..) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for Recorder {
        type Image = Sprite;

        fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
            self.ops.push(Op::Clear);
        }

        fn draw_image(&mut self, image: &Sprite, x: f64, y: f64) {
            self.ops.push(Op::Draw(*image, x, y));
        }

        fn draw_image_scaled(&mut self, image: &Sprite, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::DrawScaled(*image, x, y, w, h));
        }

        fn image_size(&self, image: &Sprite) -> (f64, f64) {
            match image {
                Sprite::ScoreBoard => (500.0, 600.0),
                _ => (101.0, 171.0),
            }
        }

        fn set_font(&mut self, font: &str) {
            self.ops.push(Op::Font(font.to_string()));
        }

        fn set_fill_style(&mut self, _style: &str) {}

        fn set_stroke_style(&mut self, _style: &str) {}

        fn set_line_width(&mut self, _width: f64) {}

        fn fill_text(&mut self, text: &str, x: f64, y: f64) {
            self.ops.push(Op::Fill(text.to_string(), x, y));
        }

        fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
            self.ops.push(Op::Stroke(text.to_string(), x, y));
        }
    }

    /// Every sprite present, except the ones listed
    struct Images {
        missing: Vec<Sprite>,
    }

    impl ImageSource for Images {
        type Image = Sprite;

        fn get(&self, sprite: Sprite) -> Option<&Sprite> {
            if self.missing.contains(&sprite) {
                return None;
            }
            Sprite::ALL.iter().find(|&&s| s == sprite)
        }
    }

    fn all_images() -> Images {
        Images {
            missing: Vec::new(),
        }
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(Settings::default(), 42).unwrap();
        state.gems = vec![Gem::new(GemKind::Blue, GridPosition::new(1, 2))];
        state.enemies = vec![Enemy {
            x: 50.0,
            row: 4,
            speed: 100.0,
        }];
        state.rocks = vec![Rock::new(5)];
        state
    }

    #[test]
    fn test_single_clear_first() {
        let mut surface = Recorder::default();
        render_frame(&mut surface, &all_images(), &playing_state());
        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(surface.ops.iter().filter(|op| **op == Op::Clear).count(), 1);
    }

    #[test]
    fn test_board_tiles() {
        let mut surface = Recorder::default();
        render_frame(&mut surface, &all_images(), &playing_state());

        assert_eq!(surface.ops[1], Op::Draw(Sprite::WaterBlock, 0.0, 0.0));
        assert_eq!(surface.draws_of(Sprite::WaterBlock).len(), 7);
        assert_eq!(surface.draws_of(Sprite::StoneBlock).len(), 35);
        assert_eq!(surface.draws_of(Sprite::GrassBlock).len(), 14);
        assert!(
            surface
                .ops
                .contains(&Op::Draw(Sprite::WoodBlock, 606.0, 664.0))
        );
    }

    #[test]
    fn test_entities_back_to_front() {
        let state = playing_state();
        let mut surface = Recorder::default();
        let missing = render_frame(&mut surface, &all_images(), &state);
        assert_eq!(missing, 0);

        let gem = surface.draws_of(Sprite::GemBlue);
        let bug = surface.draws_of(Sprite::EnemyBug);
        let player = surface.draws_of(Sprite::for_character(state.player.character));
        let rock = surface.draws_of(Sprite::Rock);
        assert_eq!((gem.len(), bug.len(), player.len(), rock.len()), (1, 1, 1, 1));
        assert!(gem[0] < bug[0] && bug[0] < player[0] && player[0] < rock[0]);

        // Entities land on their lane pixels
        assert_eq!(surface.ops[gem[0]], Op::Draw(Sprite::GemBlue, 101.0, 226.0));
        assert_eq!(surface.ops[bug[0]], Op::Draw(Sprite::EnemyBug, 50.0, 392.0));
        assert_eq!(surface.ops[rock[0]], Op::Draw(Sprite::Rock, 505.0, 309.0));
    }

    #[test]
    fn test_hud_counters() {
        let mut state = playing_state();
        state.level = 7;
        state.gems_collected = GemCounts {
            blue: 3,
            green: 1,
            orange: 0,
        };
        let mut surface = Recorder::default();
        render_frame(&mut surface, &all_images(), &state);

        assert!(surface.ops.contains(&Op::Draw(Sprite::Logo, 59.0, 30.0)));
        assert!(surface.ops.contains(&Op::Font(HUD_FONT.to_string())));
        for (text, x) in [("7", 34.0), ("3", 236.0), ("1", 438.0), ("0", 640.0)] {
            assert!(surface.ops.contains(&Op::Stroke(text.to_string(), x, 825.0)));
            assert!(surface.ops.contains(&Op::Fill(text.to_string(), x, 825.0)));
        }
    }

    #[test]
    fn test_lost_shows_scoreboard_without_entities() {
        let mut state = playing_state();
        state.phase = GamePhase::Lost;
        state.level = 3;
        state.gems_collected.green = 2;
        let mut surface = Recorder::default();
        render_frame(&mut surface, &all_images(), &state);

        assert!(surface.draws_of(Sprite::EnemyBug).is_empty());
        assert!(surface.draws_of(Sprite::Rock).is_empty());
        assert!(
            surface
                .draws_of(Sprite::for_character(state.player.character))
                .is_empty()
        );
        // Centered panel, raised by the offset
        assert!(surface.ops.contains(&Op::Draw(Sprite::ScoreBoard, 103.5, 85.0)));

        let text = surface.filled_text();
        assert!(text.contains(&"Ah, you lost!"));
        assert!(text.contains(&"3 x 60 = 180"));
        assert!(text.contains(&"2 x 40 = 80"));
        assert!(text.contains(&"Total: 260"));
        assert!(text.contains(&"Spacebar to restart"));
    }

    #[test]
    fn test_won_title() {
        let mut state = playing_state();
        state.phase = GamePhase::Won;
        state.level = 15;
        let mut surface = Recorder::default();
        render_frame(&mut surface, &all_images(), &state);

        let text = surface.filled_text();
        assert!(text.contains(&"Congrats, you won!"));
        assert!(!text.contains(&"Ah, you lost!"));
        assert!(text.contains(&"Total: 900"));
    }

    #[test]
    fn test_hud_drawn_over_scoreboard() {
        let mut state = playing_state();
        state.phase = GamePhase::Lost;
        let mut surface = Recorder::default();
        render_frame(&mut surface, &all_images(), &state);

        let panel = surface.draws_of(Sprite::ScoreBoard)[0];
        let logo = surface.draws_of(Sprite::Logo)[0];
        assert!(panel < logo);
    }

    #[test]
    fn test_missing_images_are_skipped() {
        let images = Images {
            missing: vec![Sprite::EnemyBug, Sprite::Star],
        };
        let mut surface = Recorder::default();
        let missing = render_frame(&mut surface, &images, &playing_state());

        // One bug plus the HUD star
        assert_eq!(missing, 2);
        assert!(surface.draws_of(Sprite::EnemyBug).is_empty());
        assert!(surface.draws_of(Sprite::Rock).len() == 1);
    }
}
