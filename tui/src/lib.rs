//! TUI rendering for KatPhone using ratatui.

mod effects;
mod input;
mod layout;
mod theme;

pub use effects::apply_drag_offset;
pub use input::{InputPump, apply_event, handle_events};
pub use layout::PhoneLayout;
pub use theme::{Glyphs, Palette, Styles, glyphs, palette};

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use katphone_engine::{Alert, App, HOME_COLUMNS};
use katphone_types::{AppId, ViewState};

const ALERT_WIDTH: u16 = 30;
const ALERT_HEIGHT: u16 = 6;
const TIMER_BAR_PERCENT: usize = 80;

/// Draw the phone for the current view and return the layout used, for mouse
/// hit testing on the next input pass.
pub fn draw(frame: &mut Frame, app: &App) -> PhoneLayout {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let layout = PhoneLayout::compute(frame.area(), app.display(), HOME_COLUMNS);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_phone)),
        frame.area(),
    );

    let background = if app.view() == ViewState::Game {
        palette.bg_phone
    } else {
        palette.wallpaper_tint(app.wallpaper())
    };
    let bezel = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(background));
    frame.render_widget(bezel, layout.frame());

    match app.view() {
        ViewState::Lock => draw_lock(frame, app, &layout, &palette, &glyphs),
        ViewState::Game => draw_game(frame, app, &layout, &palette, &glyphs),
        view => {
            draw_status_bar(frame, app, &layout, &palette, &glyphs);
            match view {
                ViewState::Chat => draw_chat(frame, app, &layout, &palette),
                ViewState::Store => draw_store(frame, app, &layout, &palette, &glyphs),
                _ => draw_home(frame, app, &layout, &palette, &glyphs),
            }
            draw_dock(frame, &layout, &palette, &glyphs);
        }
    }

    if let Some(alert) = app.current_alert() {
        draw_alert(frame, alert, &layout, &palette);
    }
    layout
}

fn draw_lock(frame: &mut Frame, app: &App, layout: &PhoneLayout, palette: &Palette, glyphs: &Glyphs) {
    let screen = layout.screen();
    let clock = app.clock_snapshot();
    let button_row = layout.unlock_button().y.saturating_sub(screen.y);
    let top = screen.height / 4;

    let mut lines: Vec<Line> = vec![Line::from(""); usize::from(top)];
    lines.push(Line::from(Span::styled(
        clock.time.clone(),
        Styles::title(palette),
    )));
    lines.push(Line::from(Span::styled(
        clock.date.clone(),
        Style::default().fg(palette.text_primary),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        app.wallpaper().caption(),
        Styles::muted(palette),
    )));
    while lines.len() < usize::from(button_row) {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(" {} SWIPE UP TO UNLOCK ", glyphs.swipe),
        Styles::button(palette),
    )));

    let (area, scroll) = apply_drag_offset(screen, layout.offset_rows(app.lock_offset()));
    if area.height == 0 {
        return;
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    layout: &PhoneLayout,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let row = Rect {
        height: 1.min(layout.header().height),
        ..layout.header()
    };
    let style = Style::default()
        .fg(palette.text_primary)
        .add_modifier(Modifier::BOLD);
    let signal = if glyphs.ascii {
        "100% "
    } else {
        "📶 🔋 100% "
    };
    frame.render_widget(
        Paragraph::new(format!(" {}", app.clock_snapshot().time)).style(style),
        row,
    );
    frame.render_widget(
        Paragraph::new(signal)
            .style(style)
            .alignment(Alignment::Right),
        row,
    );
}

fn draw_home(frame: &mut Frame, app: &App, layout: &PhoneLayout, palette: &Palette, glyphs: &Glyphs) {
    for (index, id) in app.home_apps().into_iter().enumerate() {
        let Some(tile) = layout.home_icon(index) else {
            break;
        };
        let entry = id.entry();
        let selected = index == app.home_cursor();
        let width = usize::from(tile.width.saturating_sub(2));

        let icon = Rect {
            x: tile.x + 1,
            width: tile.width.saturating_sub(2),
            height: 2,
            ..tile
        };
        let icon_style = Style::default()
            .bg(palette.app_color(entry))
            .fg(palette.app_text(entry));
        frame.render_widget(
            Paragraph::new(glyphs.app(entry))
                .style(icon_style)
                .alignment(Alignment::Center),
            icon,
        );

        let label_style = if selected {
            Styles::selected(palette).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_primary)
        };
        let label = Rect {
            y: tile.y + 2,
            height: 1,
            ..tile
        };
        frame.render_widget(
            Paragraph::new(fit(id.as_str(), width))
                .style(label_style)
                .alignment(Alignment::Center),
            label,
        );
    }
}

fn draw_chat(frame: &mut Frame, app: &App, layout: &PhoneLayout, palette: &Palette) {
    let body = layout.body();
    let mut lines = vec![
        Line::from(Span::styled(" Space Messages", Styles::title(palette))),
        Line::from(""),
    ];
    for entry in app.feed() {
        let accent = palette.speaker_color(entry.accent);
        lines.push(Line::from(vec![
            Span::styled(" ▎", Style::default().fg(accent)),
            Span::styled(
                entry.speaker.name(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" ▎", Style::default().fg(accent)),
            Span::styled(entry.text, Style::default().fg(palette.text_primary)),
        ]));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
}

fn draw_store(frame: &mut Frame, app: &App, layout: &PhoneLayout, palette: &Palette, glyphs: &Glyphs) {
    let body = layout.body();
    let title = if glyphs.ascii {
        " KatStore".to_string()
    } else {
        format!(" KatStore {}", glyphs.app(AppId::KatStore.entry()))
    };
    let title_row = Rect { height: 1.min(body.height), ..body };
    frame.render_widget(
        Paragraph::new(Span::styled(title, Styles::title(palette))),
        title_row,
    );

    let listing = app.available_for_purchase();
    if listing.is_empty() {
        if let Some(row) = layout.store_row(0) {
            frame.render_widget(
                Paragraph::new(" All apps installed").style(Styles::muted(palette)),
                row,
            );
        }
        return;
    }

    for (index, id) in listing.into_iter().enumerate() {
        let Some(row) = layout.store_row(index) else {
            break;
        };
        let selected = index == app.store_cursor();
        let left = format!(" {} {}", glyphs.app(id.entry()), id.as_str());
        let right = "GET ";
        let filler = usize::from(row.width).saturating_sub(left.width() + right.width());

        let base = if selected {
            Styles::selected(palette)
        } else {
            Style::default().bg(palette.bg_panel)
        };
        let line = Line::from(vec![
            Span::styled(left, base.fg(palette.text_primary)),
            Span::styled(" ".repeat(filler), base),
            Span::styled(right, base.fg(palette.gold).add_modifier(Modifier::BOLD)),
        ]);
        frame.render_widget(Paragraph::new(line), row);
    }
}

fn draw_dock(frame: &mut Frame, layout: &PhoneLayout, palette: &Palette, glyphs: &Glyphs) {
    let labels = [glyphs.messages, glyphs.lock, glyphs.home];
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_panel)),
        layout.dock(),
    );
    for (button, label) in layout.dock_buttons().into_iter().zip(labels) {
        let lines = vec![Line::from(""), Line::from(label)];
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(palette.text_primary))
                .alignment(Alignment::Center),
            button,
        );
    }
}

fn draw_game(frame: &mut Frame, app: &App, layout: &PhoneLayout, palette: &Palette, glyphs: &Glyphs) {
    let Some(round) = app.game_round() else {
        return;
    };
    let hud = layout.game_hud();

    let bar_width = usize::from(hud.width) * TIMER_BAR_PERCENT / 100;
    let filled = ((round.remaining() * bar_width as f32).round() as usize).min(bar_width);
    let lines = vec![
        Line::from(Span::styled("Cat Catcher", Styles::title(palette))),
        Line::from(Span::styled(
            format!("Score: {}", round.score()),
            Style::default().fg(palette.gold),
        )),
        Line::from(vec![
            Span::styled(
                glyphs.timer_fill.repeat(filled),
                Style::default().fg(palette.timer_fill),
            ),
            Span::styled(
                glyphs.timer_track.repeat(bar_width - filled),
                Style::default().fg(palette.timer_track),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), hud);

    let target = layout.target_rect(round.target());
    if target.height > 0 {
        let middle = Rect {
            y: target.y + target.height / 2,
            height: 1,
            ..target
        };
        frame.render_widget(
            Paragraph::new(glyphs.target).alignment(Alignment::Center),
            middle,
        );
    }

    frame.render_widget(
        Paragraph::new("QUIT")
            .style(Styles::button(palette))
            .alignment(Alignment::Center),
        layout.quit_button(),
    );
}

fn draw_alert(frame: &mut Frame, alert: &Alert, layout: &PhoneLayout, palette: &Palette) {
    let screen = layout.screen();
    let width = ALERT_WIDTH.min(screen.width);
    let height = ALERT_HEIGHT.min(screen.height);
    let area = Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    };
    let inner_width = usize::from(width.saturating_sub(2));

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(Span::styled(fit(&alert.title, inner_width), Styles::title(palette)))
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg_popup));
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            fit(&alert.body, inner_width),
            Style::default().fg(palette.text_primary),
        )),
        Line::from(""),
        Line::from(Span::styled("OK", Style::default().fg(palette.accent))),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

/// Truncate to `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
