use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tubelink_core::{LinkTarget, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum KeyAction {
    Quit,
    Dispatch(Msg),
    /// Move the history view by this many rows; negative is toward newer.
    ScrollHistory(isize),
    Ignore,
}

const PAGE_ROWS: isize = 5;

/// Maps a key press to what the form should do, given the current input text.
pub(super) fn handle_key(key: KeyEvent, input: &str) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('f') if ctrl => KeyAction::Dispatch(Msg::OpenLinkClicked(LinkTarget::Folder)),
        KeyCode::Char('s') if ctrl => {
            KeyAction::Dispatch(Msg::OpenLinkClicked(LinkTarget::Spreadsheet))
        }
        KeyCode::Char('u') if ctrl => KeyAction::Dispatch(Msg::InputChanged(String::new())),
        KeyCode::Char(_) if ctrl => KeyAction::Ignore,
        KeyCode::Enter => KeyAction::Dispatch(Msg::SubmitClicked),
        KeyCode::Up => KeyAction::ScrollHistory(-1),
        KeyCode::Down => KeyAction::ScrollHistory(1),
        KeyCode::PageUp => KeyAction::ScrollHistory(-PAGE_ROWS),
        KeyCode::PageDown => KeyAction::ScrollHistory(PAGE_ROWS),
        KeyCode::Backspace => {
            let mut next = input.to_string();
            if next.pop().is_none() {
                return KeyAction::Ignore;
            }
            KeyAction::Dispatch(Msg::InputChanged(next))
        }
        KeyCode::Char(ch) => {
            let mut next = input.to_string();
            next.push(ch);
            KeyAction::Dispatch(Msg::InputChanged(next))
        }
        _ => KeyAction::Ignore,
    }
}

/// Applies a scroll step, keeping the first visible row inside the list.
pub(super) fn scroll_offset(offset: usize, delta: isize, len: usize) -> usize {
    let max = len.saturating_sub(1);
    offset.saturating_add_signed(delta).min(max)
}

/// Bracketed paste: append the pasted text with line breaks removed.
pub(super) fn handle_paste(pasted: &str, input: &str) -> KeyAction {
    let cleaned: String = pasted.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    if cleaned.is_empty() {
        return KeyAction::Ignore;
    }
    KeyAction::Dispatch(Msg::InputChanged(format!("{input}{cleaned}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_appends_and_backspace_removes() {
        assert_eq!(
            handle_key(press(KeyCode::Char('x')), "abc"),
            KeyAction::Dispatch(Msg::InputChanged("abcx".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Backspace), "abc"),
            KeyAction::Dispatch(Msg::InputChanged("ab".to_string()))
        );
        assert_eq!(handle_key(press(KeyCode::Backspace), ""), KeyAction::Ignore);
    }

    #[test]
    fn enter_submits_and_escape_quits() {
        assert_eq!(
            handle_key(press(KeyCode::Enter), "x"),
            KeyAction::Dispatch(Msg::SubmitClicked)
        );
        assert_eq!(handle_key(press(KeyCode::Esc), "x"), KeyAction::Quit);
        assert_eq!(handle_key(ctrl('c'), "x"), KeyAction::Quit);
    }

    #[test]
    fn control_shortcuts_open_links() {
        assert_eq!(
            handle_key(ctrl('f'), ""),
            KeyAction::Dispatch(Msg::OpenLinkClicked(LinkTarget::Folder))
        );
        assert_eq!(
            handle_key(ctrl('s'), ""),
            KeyAction::Dispatch(Msg::OpenLinkClicked(LinkTarget::Spreadsheet))
        );
        assert_eq!(handle_key(ctrl('z'), "abc"), KeyAction::Ignore);
    }

    #[test]
    fn arrows_and_pages_scroll_history() {
        assert_eq!(handle_key(press(KeyCode::Up), ""), KeyAction::ScrollHistory(-1));
        assert_eq!(handle_key(press(KeyCode::Down), ""), KeyAction::ScrollHistory(1));
        assert_eq!(
            handle_key(press(KeyCode::PageDown), ""),
            KeyAction::ScrollHistory(PAGE_ROWS)
        );
        assert_eq!(
            handle_key(press(KeyCode::PageUp), ""),
            KeyAction::ScrollHistory(-PAGE_ROWS)
        );
    }

    #[test]
    fn scroll_offset_stays_in_range() {
        assert_eq!(scroll_offset(0, -1, 10), 0);
        assert_eq!(scroll_offset(0, 5, 10), 5);
        assert_eq!(scroll_offset(8, 5, 10), 9);
        assert_eq!(scroll_offset(3, 1, 0), 0);
    }

    #[test]
    fn paste_strips_line_breaks() {
        assert_eq!(
            handle_paste("https://youtu.be/dQw4w9WgXcQ\r\n", ""),
            KeyAction::Dispatch(Msg::InputChanged(
                "https://youtu.be/dQw4w9WgXcQ".to_string()
            ))
        );
        assert_eq!(handle_paste("\n", "abc"), KeyAction::Ignore);
    }
}
