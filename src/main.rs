mod arena;
mod config;
mod input;
mod logging;
mod shell;
mod storage;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use arena::rng::SeededRandom;
use config::LaunchOptions;
use input::{ClickState, InputEvent};
use shell::App;
use time::MonotonicClock;

/// Resolve a mouse position to the action under it.
///
/// DomBackend renders the grid as a `<div>` directly inside `<body>`.
fn dom_pixel_to_action(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let document = web_sys::window()?.document()?;
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();
    cs.hit_test_pixel(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    )
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let options = LaunchOptions::from_page();
    let seed = options.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
    logging::info(&format!("clicker arena: seed={seed}"));

    let app = Rc::new(RefCell::new(App::new(
        options,
        storage::default_store(),
        Box::new(SeededRandom::new(seed)),
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(MonotonicClock::new()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Pointer: press starts (or charges) an action, release resolves it.
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        let clock = clock.clone();
        move |mouse_event| {
            if mouse_event.button != MouseButton::Left {
                return;
            }
            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let target = dom_pixel_to_action(mouse_event.x, mouse_event.y, &cs);
            drop(cs);

            let event = match (mouse_event.event, target) {
                (MouseEventKind::Pressed, Some(id)) => InputEvent::Click(id),
                (MouseEventKind::Released, target) => InputEvent::Release(target),
                _ => return,
            };
            let now = clock.borrow_mut().now();
            app.borrow_mut().handle_input(event, now);
        }
    });

    terminal.on_key_event({
        let app = app.clone();
        let clock = clock.clone();
        move |key_event| {
            let mut app = app.borrow_mut();
            let key = match key_event.code {
                KeyCode::Char(c) => c.to_ascii_lowercase(),
                KeyCode::Enter => '\n',
                KeyCode::Esc if app.shop_open => 'b',
                _ => return,
            };
            let now = clock.borrow_mut().now();
            app.handle_input(InputEvent::Key(key), now);
        }
    });

    terminal.draw_web(move |f| {
        let now = clock.borrow_mut().now();
        let mut app = app.borrow_mut();
        app.frame(now);
        shell::render::render(&app, f, &mut click_state.borrow_mut());
    });

    Ok(())
}
