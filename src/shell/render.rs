//! Arena rendering: setup screen, HUD, enemy panel, log, help bar and the
//! shop overlay. Click targets are registered while drawing.

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::arena::enemy::Difficulty;
use crate::arena::shop::{catalog, ShopTab};
use crate::config::HeroId;
use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::assets;
use super::{App, Screen};

const ORANGE: Color = Color::Rgb(255, 140, 0);
const GOLD: Color = Color::Rgb(255, 215, 0);

pub fn render(app: &App, f: &mut Frame, cs: &mut ClickState) {
    let size = f.area();
    cs.begin_frame(size.width, size.height);
    match app.screen {
        Screen::Setup => render_setup(app, f, size, cs),
        Screen::Playing => render_playing(app, f, size, cs),
    }
}

/// `█░` bar of `width` cells.
fn bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0)) * width as f64).round() as usize;
    "█".repeat(filled) + &"░".repeat(width - filled)
}

fn borders_for(width: u16) -> Borders {
    if is_narrow_layout(width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

// ── Setup ───────────────────────────────────────────────────────

fn render_setup(app: &App, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let selected = Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD);
    let normal = Style::default().fg(Color::White);

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!(" Meilleur score : {}", app.session.best_score()),
        Style::default().fg(Color::Yellow),
    )));
    cl.push(Line::from(""));

    cl.push(Line::from(Span::styled(" Héros", Style::default().fg(Color::DarkGray))));
    for (i, hero) in HeroId::all().iter().enumerate() {
        let chosen = app.hero == Some(*hero);
        let mark = if chosen { "●" } else { "○" };
        let style = if chosen { selected } else { normal };
        cl.push_clickable(
            Line::from(Span::styled(format!("  {mark} {}", hero.label()), style)),
            SELECT_HERO_BASE + i as u16,
        );
    }
    for row in app.hero_art {
        cl.push(Line::from(Span::styled(format!("    {row}"), Style::default().fg(Color::Magenta))));
    }
    cl.push(Line::from(""));

    cl.push(Line::from(Span::styled(" Difficulté", Style::default().fg(Color::DarkGray))));
    for (i, d) in Difficulty::all().iter().enumerate() {
        let mark = if *d == app.difficulty { "●" } else { "○" };
        let style = if *d == app.difficulty { selected } else { normal };
        cl.push_clickable(
            Line::from(Span::styled(
                format!("  {mark} {} (PV ×{})", d.label(), d.health_multiplier()),
                style,
            )),
            SELECT_DIFFICULTY_BASE + i as u16,
        );
    }
    cl.push(Line::from(""));

    let (key, label) = if app.hero.is_some() {
        (Style::default().fg(Color::Green).add_modifier(Modifier::BOLD), normal)
    } else {
        (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
    };
    cl.push_clickable(
        Line::from(vec![Span::styled(" [S] ", key), Span::styled("Commencer", label)]),
        START_RUN,
    );
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [X] ", Style::default().fg(Color::Red)),
            Span::styled("Effacer le meilleur score", Style::default().fg(Color::DarkGray)),
        ]),
        CLEAR_BEST,
    );
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " h: héros  d: difficulté",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(" Clicker Arena ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
    cl.register_targets_with_block(area, &block, cs, 0, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Playing ─────────────────────────────────────────────────────

fn render_playing(app: &App, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(3)])
        .split(area);

    render_status(app, f, chunks[0]);

    let (arena_area, log_area) = if is_narrow_layout(area.width) {
        let v = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Min(3)])
            .split(chunks[1]);
        (v[0], v[1])
    } else {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        (h[0], h[1])
    };
    render_arena(app, f, arena_area, cs);
    render_log(app, f, log_area);
    render_help(app, f, chunks[2], cs);

    if app.shop_open {
        render_shop(app, f, chunks[1], cs);
    }
}

fn render_status(app: &App, f: &mut Frame, area: Rect) {
    let run = app.session.run();
    let now = app.now_ms;
    let gold_style = if app.hud.double_gold.is_on(now) {
        Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(GOLD)
    };
    let level_style = if app.hud.level_up.is_on(now) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Green)
    };
    let sep = Span::styled(" │ ", Style::default().fg(Color::DarkGray));

    let mut spans = vec![
        Span::styled(format!("Score {}", run.score), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        sep.clone(),
        Span::styled(
            if app.session.best_score_saved() {
                format!("Meilleur {}", app.session.best_score())
            } else {
                format!("Meilleur {} (non sauvegardé)", app.session.best_score())
            },
            Style::default().fg(Color::Yellow),
        ),
        sep.clone(),
        Span::styled(format!("Niveau {}", app.session.enemy().level()), level_style),
        sep,
        Span::styled(format!("Or {}", run.currency.floor() as u64), gold_style),
    ];
    if run.is_paused && !app.shop_open {
        spans.push(Span::styled("  ⏸ PAUSE", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)));
    }

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(block).alignment(Alignment::Center),
        area,
    );
}

fn render_arena(app: &App, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let now = app.now_ms;
    let hud = &app.hud;
    let hit = hud.hit.is_on(now);

    let border_color = if hud.charged_hit.is_on(now) {
        ORANGE
    } else if hud.bleed.is_on(now) {
        Color::Red
    } else if hud.level_up.is_on(now) {
        Color::Green
    } else {
        Color::White
    };

    let enemy = assets::enemy_art(app.session.enemy().level(), hit);
    let enemy_style = if hit {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::LightRed)
    };
    let hero_width = app.hero_art.iter().map(|l| Line::from(*l).width()).max().unwrap_or(0);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for i in 0..app.hero_art.len().max(enemy.len()) {
        let hero_part = app.hero_art.get(i).copied().unwrap_or("");
        let pad = hero_width.saturating_sub(Line::from(hero_part).width());
        lines.push(Line::from(vec![
            Span::styled(format!("  {hero_part}{}", " ".repeat(pad)), Style::default().fg(Color::Magenta)),
            Span::raw("     "),
            Span::styled(enemy.get(i).copied().unwrap_or(""), enemy_style),
        ]));
    }
    lines.push(Line::from(""));

    let (current, max) = hud.health;
    let ratio = if max > 0 { current as f64 / max as f64 } else { 0.0 };
    let gauge_width = (area.width.saturating_sub(6) as usize).min(30);
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(bar(ratio, gauge_width), Style::default().fg(Color::Red)),
    ]));
    lines.push(Line::from(Span::styled(
        format!("  PV : {current} / {max}"),
        Style::default().fg(Color::White),
    )));

    if app.session.upgrades().active_bonus_active {
        let charge = app.session.charge();
        let (label, color) = if hud.charge_ready {
            ("Prêt !", ORANGE)
        } else if charge.is_charging() {
            ("Charge…", Color::Blue)
        } else {
            ("Maintenir pour charger", Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(bar(charge.progress(now), gauge_width), Style::default().fg(color)),
            Span::styled(format!(" {label}"), Style::default().fg(color)),
        ]));
    }

    let title = format!(" Ennemi niv. {} ", app.session.enemy().level());
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color).add_modifier(Modifier::BOLD)));
    f.render_widget(Paragraph::new(lines).block(block), area);

    cs.add_click_target(area, ENEMY);
}

fn render_log(app: &App, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .hud
        .log
        .iter()
        .rev()
        .take(visible)
        .enumerate()
        .map(|(i, entry)| {
            let style = match (entry.is_important, i < 3) {
                (true, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                (false, true) => Style::default().fg(Color::White),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Blue))
        .title(" Journal ");
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_help(app: &App, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let key = |c: Color| Style::default().fg(c).add_modifier(Modifier::BOLD);
    let pause_label = if app.session.run().is_paused && !app.shop_open {
        "[P] Reprendre"
    } else {
        "[P] Pause"
    };
    let shop_label = if app.shop_open { "[B] Fermer" } else { "[B] Boutique" };

    TabBar::new(" ")
        .tab("[A] Attaque", key(Color::Yellow), ATTACK)
        .tab(pause_label, key(Color::Cyan), PAUSE)
        .tab(shop_label, key(GOLD), if app.shop_open { CLOSE_SHOP } else { OPEN_SHOP })
        .tab("[R] Recommencer", key(Color::Magenta), RESET)
        .tab("[X] Effacer record", key(Color::DarkGray), CLEAR_BEST)
        .block(
            Block::default()
                .borders(borders_for(area.width))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, cs);
}

// ── Shop overlay ────────────────────────────────────────────────

fn overlay_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(64);
    let height = area.height.saturating_sub(2).min(16);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_shop(app: &App, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let popup = overlay_rect(area);
    f.render_widget(Clear, popup);

    let gold = app.session.run().currency;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD))
        .title(Span::styled(
            format!(" Boutique · Or : {} ", gold.floor() as u64),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let tab_style = |tab: ShopTab| {
        if tab == app.shop_tab {
            Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(GOLD)
        }
    };
    TabBar::new(" │ ")
        .tab(ShopTab::Weapons.label(), tab_style(ShopTab::Weapons), TAB_WEAPONS)
        .tab(ShopTab::Bonuses.label(), tab_style(ShopTab::Bonuses), TAB_BONUSES)
        .render(f, chunks[0], cs);

    let upgrades = app.session.upgrades();
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    for (idx, item) in catalog().iter().enumerate().filter(|(_, i)| i.tab == app.shop_tab) {
        let action = BUY_ITEM_BASE + idx as u16;
        let owned = upgrades.owns(item.id);
        let affordable = gold >= item.cost as f64;
        let icon = assets::icon(item.icon).unwrap_or(assets::PLACEHOLDER_ICON);

        let name_style = if owned {
            Style::default().fg(Color::DarkGray)
        } else if affordable {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut spans = vec![
            Span::styled(format!(" [{}] ", idx + 1), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{icon} ")),
            Span::styled(item.name, name_style),
        ];
        if owned {
            spans.push(Span::styled("  ✔ Acheté", Style::default().fg(Color::Green)));
        } else {
            let cost_color = if affordable { GOLD } else { Color::DarkGray };
            spans.push(Span::styled(format!("  {} or", item.cost), Style::default().fg(cost_color)));
        }
        if let Some(reason) = app.hud.rejection_for(item.id, app.now_ms) {
            spans.push(Span::styled(
                format!("  {reason}"),
                Style::default().fg(Color::White).bg(Color::Red),
            ));
        }
        cl.push_clickable(Line::from(spans), action);
        cl.push_clickable(
            Line::from(Span::styled(format!("      {}", item.description), Style::default().fg(Color::DarkGray))),
            action,
        );
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [B] ", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled("Fermer", Style::default().fg(Color::White)),
            Span::styled("   t: changer d'onglet", Style::default().fg(Color::DarkGray)),
        ]),
        CLOSE_SHOP,
    );

    cl.register_targets(chunks[1], cs, 0, 0, 0, 0);
    f.render_widget(Paragraph::new(cl.into_lines()), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0, 4), "░░░░");
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(1.0, 4), "████");
        assert_eq!(bar(2.0, 4), "████");
        assert_eq!(bar(-1.0, 4), "░░░░");
    }

    #[test]
    fn overlay_fits_inside_area() {
        let area = Rect::new(0, 3, 100, 30);
        let r = overlay_rect(area);
        assert!(r.x >= area.x && r.right() <= area.right());
        assert!(r.y >= area.y && r.bottom() <= area.bottom());
        assert_eq!(r.width, 64);

        let tiny = Rect::new(0, 0, 3, 1);
        let r = overlay_rect(tiny);
        assert_eq!((r.width, r.height), (0, 0));
    }
}
