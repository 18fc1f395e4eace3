mod input;
mod render;

use std::io::{self, Stdout, Write};
use std::panic;
use std::time::{Duration, Instant};

use crossterm::cursor::Show;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tubelink_core::{Msg, Notification};
use tubelink_logging::tl_info;

use super::app::Controller;
use input::{handle_key, handle_paste, scroll_offset, KeyAction};

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

pub fn run_ui(controller: &mut Controller, notification_ttl: Duration) -> io::Result<()> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, controller, notification_ttl);

    cleanup_terminal(&mut terminal)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
    notification_ttl: Duration,
) -> io::Result<()> {
    let mut tick: usize = 0;
    let mut shown: Option<(Notification, Instant)> = None;
    let mut history_offset: usize = 0;
    let mut history_len = controller.state().history().len();

    loop {
        controller.pump();

        // Notifications are transient; drop them once they have been up long enough.
        let current = controller.state().notification().cloned();
        match (&current, &shown) {
            (Some(note), Some((seen, since))) if note == seen => {
                if since.elapsed() >= notification_ttl {
                    controller.dispatch(Msg::NotificationDismissed);
                    shown = None;
                }
            }
            (Some(note), _) => shown = Some((note.clone(), Instant::now())),
            (None, _) => shown = None,
        }

        // A new record lands on top; jump back to it.
        if controller.state().history().len() != history_len {
            history_len = controller.state().history().len();
            history_offset = 0;
        }

        let view = controller.view();
        terminal.draw(|frame| render::draw(frame, &view, tick, history_offset))?;
        tick = tick.wrapping_add(1);

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) => handle_key(key, controller.state().input()),
            Event::Paste(text) => handle_paste(&text, controller.state().input()),
            _ => KeyAction::Ignore,
        };
        match action {
            KeyAction::Quit => {
                tl_info!("Quit requested");
                return Ok(());
            }
            KeyAction::Dispatch(msg) => {
                controller.dispatch(msg);
            }
            KeyAction::ScrollHistory(delta) => {
                history_offset = scroll_offset(history_offset, delta, history_len);
            }
            KeyAction::Ignore => {}
        }
    }
}

/// Puts the terminal back before the default panic message is printed.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = write_restore(&mut io::stdout());
        previous(info);
    }));
}

fn write_restore(out: &mut impl Write) -> io::Result<()> {
    queue!(out, DisableBracketedPaste, LeaveAlternateScreen, Show)?;
    out.flush()
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    write_restore(terminal.backend_mut())?;
    terminal.show_cursor()?;
    Ok(())
}
