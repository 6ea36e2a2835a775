//! Terminal explorer for wandering a world map.
//!
//! Roguelike-style ratatui interface: the player glyph stays centered
//! while the live window pans underneath it. Movement keys attempt the
//! player move and pan in lockstep; blocked terrain refuses both.

use std::error::Error;
use std::io::stdout;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::keybinds::{Action, KeyBindings};
use crate::occupants::{Occupant, OccupantId};
use crate::storage::MapStorage;
use crate::world::WorldMap;

/// Number of monsters scattered around the starting window.
const MONSTER_COUNT: usize = 8;

/// Create a darker background color from a tile color so the glyph pops.
fn make_bg_color(r: u8, g: u8, b: u8) -> Color {
    let factor = 0.35;
    Color::Rgb(
        (r as f32 * factor) as u8,
        (g as f32 * factor) as u8,
        (b as f32 * factor) as u8,
    )
}

/// Brighten a tile color slightly for the foreground glyph.
fn make_fg_color(r: u8, g: u8, b: u8) -> Color {
    let brighten = |c: u8| -> u8 {
        let boosted = c as u16 + 40;
        boosted.min(255) as u8
    };
    Color::Rgb(brighten(r), brighten(g), brighten(b))
}

struct Explorer {
    map: WorldMap,
    storage: MapStorage,
    binds: KeyBindings,
    player: OccupantId,
    turns: u64,
    message: Option<String>,
    show_help: bool,
}

impl Explorer {
    fn new(mut map: WorldMap, storage: MapStorage, binds: KeyBindings) -> Self {
        let px = map.x_off() + map.width() as i64 / 2;
        let py = map.y_off() + map.height() as i64 / 2;
        let player = map.add_occupant(Occupant::new(px, py, '@', (255, 255, 255)));
        scatter_monsters(&mut map);

        Explorer {
            map,
            storage,
            binds,
            player,
            turns: 0,
            message: None,
            show_help: false,
        }
    }

    /// Apply one bound action. Returns false when the explorer should exit.
    fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.step(-1, 0),
            Action::MoveRight => self.step(1, 0),
            Action::MoveUp => self.step(0, -1),
            Action::MoveDown => self.step(0, 1),
            Action::Save => match self.map.dump(&self.storage) {
                Ok(()) => {
                    self.message = Some(format!("saved {} tiles", self.map.cache().len()));
                }
                Err(e) => {
                    self.message = Some(format!("save failed: {}", e));
                }
            },
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => return false,
        }
        true
    }

    /// Move the player and pan the window in lockstep. A refused move
    /// costs no turn.
    fn step(&mut self, dx: i64, dy: i64) {
        let moved = self
            .map
            .attempt_move_occupant(self.player, dx, dy)
            .unwrap_or(false);
        if moved {
            self.turns += self.map.pan(dx, dy);
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(f.area());
        let map_area = chunks[0];
        let status_area = chunks[1];

        self.render_map(map_area, f.buffer_mut());

        let player = self.map.occupant(self.player);
        let under = player.map(|p| self.map.at(p.x, p.y).biome.name()).unwrap_or("?");
        let msg_str = self
            .message
            .as_ref()
            .map(|m| format!(" | {}", m))
            .unwrap_or_default();
        let status = format!(
            " ({}, {}) | turn {} | seed {} | {} | {} tiles known{} | S:Save  ?:Help  Q:Quit",
            self.map.x_off(),
            self.map.y_off(),
            self.turns,
            self.map.seed(),
            under,
            self.map.cache().len(),
            msg_str,
        );
        let status_para =
            Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
        f.render_widget(status_para, status_area);

        if self.show_help {
            self.render_help(map_area, f.buffer_mut());
        }
    }

    /// Draw the live grid plus every occupant inside the window.
    fn render_map(&self, area: Rect, buf: &mut Buffer) {
        let grid = self.map.grid();
        let draw_w = (area.width as usize).min(grid.width());
        let draw_h = (area.height as usize).min(grid.height());

        for j in 0..draw_h {
            for i in 0..draw_w {
                let tile = grid.get(i, j);
                let (r, g, b) = tile.color();
                buf.get_mut(area.x + i as u16, area.y + j as u16)
                    .set_char(tile.biome.glyph())
                    .set_fg(make_fg_color(r, g, b))
                    .set_bg(make_bg_color(r, g, b));
            }
        }

        for (_, occupant) in self.map.occupants() {
            if !grid.contains(occupant.x, occupant.y) {
                continue;
            }
            let i = (occupant.x - grid.x_off()) as usize;
            let j = (occupant.y - grid.y_off()) as usize;
            if i >= draw_w || j >= draw_h {
                continue;
            }
            let (r, g, b) = occupant.color;
            buf.get_mut(area.x + i as u16, area.y + j as u16)
                .set_char(occupant.glyph)
                .set_fg(Color::Rgb(r, g, b));
        }
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let lines = [
            "Overland Explorer",
            "",
            "  Arrows / hjkl - Walk (the window follows)",
            "  S - Save the explored world",
            "  ? - Toggle this help",
            "  Q / Esc - Quit",
            "",
            "Ocean blocks movement. Everything you walk",
            "past is remembered and never regenerated.",
            "",
            "Press any key to close.",
        ];
        let width = 48.min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        Clear.render(popup, buf);
        let text = lines.join("\n");
        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" Help "))
            .style(Style::default().fg(Color::White).bg(Color::Black))
            .render(popup, buf);
    }
}

/// Drop a few monsters on walkable tiles around the starting window.
fn scatter_monsters(map: &mut WorldMap) {
    let mut rng = ChaCha8Rng::seed_from_u64(map.seed().wrapping_add(2222));
    let x_range = map.x_off()..map.x_off() + map.width() as i64;
    let y_range = map.y_off()..map.y_off() + map.height() as i64;

    let mut placed = 0;
    for _ in 0..MONSTER_COUNT * 50 {
        if placed == MONSTER_COUNT {
            break;
        }
        let x = rng.gen_range(x_range.clone());
        let y = rng.gen_range(y_range.clone());
        if map.at(x, y).blocked {
            continue;
        }
        map.add_occupant(Occupant::new(x, y, 'm', (200, 60, 60)));
        placed += 1;
    }
}

/// Run the interactive explorer until the user quits.
pub fn run_explorer(
    map: WorldMap,
    storage: MapStorage,
    binds: KeyBindings,
) -> Result<(), Box<dyn Error>> {
    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut explorer = Explorer::new(map, storage, binds);
    let result = run_loop(&mut terminal, &mut explorer);

    terminal::disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    explorer: &mut Explorer,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| explorer.render(f))?;

        // Clear message after display
        explorer.message = None;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if explorer.show_help {
                    explorer.show_help = false;
                    continue;
                }
                if let Some(action) = explorer.binds.lookup(key.modifiers, key.code) {
                    if !explorer.handle_action(action) {
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
