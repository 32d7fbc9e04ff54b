use crate::ui::app::{App, Focus, UiCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a view change and, when needed, a command.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<UiCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_char(key, 'c') || is_ctrl_char(key, 'q') {
        app.request_quit();
        return None;
    }

    match key.code {
        KeyCode::Tab => {
            app.cycle_focus();
            return None;
        }
        KeyCode::F(1) => return Some(UiCommand::About),
        KeyCode::F(5) => return app.input_enabled().then_some(UiCommand::Home),
        _ => {}
    }

    if is_ctrl_char(key, 't') {
        app.toggle_thinking();
        return None;
    }

    match app.focus() {
        Focus::Question => handle_question_key(app, key),
        Focus::Examples => handle_examples_key(app, key),
        Focus::Result => {
            handle_result_key(app, key);
            None
        }
    }
}

/// Pasted text is appended to the question.
pub fn handle_paste(app: &App, text: &str) -> Option<UiCommand> {
    if !app.input_enabled() || app.focus() != Focus::Question {
        return None;
    }
    let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
    if pasted.is_empty() {
        return None;
    }
    Some(UiCommand::EditQuestion(format!("{}{}", app.question(), pasted)))
}

fn handle_question_key(app: &mut App, key: KeyEvent) -> Option<UiCommand> {
    if !app.input_enabled() {
        return None;
    }

    if is_ctrl_char(key, 'u') {
        return Some(UiCommand::EditQuestion(String::new()));
    }

    match key.code {
        KeyCode::Enter => Some(UiCommand::Submit),
        KeyCode::Backspace => {
            let mut question = app.question().to_string();
            question.pop()?;
            Some(UiCommand::EditQuestion(question))
        }
        KeyCode::Char(ch)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut question = app.question().to_string();
            question.push(ch);
            Some(UiCommand::EditQuestion(question))
        }
        _ => None,
    }
}

fn handle_examples_key(app: &mut App, key: KeyEvent) -> Option<UiCommand> {
    match key.code {
        KeyCode::Up => {
            app.move_example_selection(-1);
            None
        }
        KeyCode::Down => {
            app.move_example_selection(1);
            None
        }
        KeyCode::Enter if app.input_enabled() => {
            let example = app.selected_example()?.to_string();
            app.set_focus(Focus::Question);
            Some(UiCommand::SelectExample(example))
        }
        _ => None,
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.scroll_result(-1),
        KeyCode::Down => app.scroll_result(1),
        KeyCode::PageUp => app.scroll_result(-10),
        KeyCode::PageDown => app.scroll_result(10),
        KeyCode::Home => app.scroll_result(-i32::from(u16::MAX)),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisState, OperationState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn app_with(question: &str) -> App {
        App::new(
            vec!["Exemplo 1".into(), "Exemplo 2".into()],
            AnalysisState::with_question(question),
        )
    }

    fn in_flight(app: &mut App) {
        let mut state = app.analysis().clone();
        state.operation = OperationState::InFlight;
        app.sync(state, Vec::new());
    }

    #[test]
    fn typing_appends_to_question() {
        let mut app = app_with("DF");
        assert_eq!(
            handle_key(&mut app, press(KeyCode::Char('D'))),
            Some(UiCommand::EditQuestion("DFD".into()))
        );
    }

    #[test]
    fn backspace_on_empty_question_does_nothing() {
        let mut app = app_with("");
        assert_eq!(handle_key(&mut app, press(KeyCode::Backspace)), None);
    }

    #[test]
    fn enter_submits() {
        let mut app = app_with("Como elaborar um DFD?");
        assert_eq!(
            handle_key(&mut app, press(KeyCode::Enter)),
            Some(UiCommand::Submit)
        );
    }

    #[test]
    fn input_ignored_while_in_flight() {
        let mut app = app_with("q");
        in_flight(&mut app);

        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('x'))), None);
        assert_eq!(handle_key(&mut app, press(KeyCode::F(5))), None);
        assert_eq!(handle_paste(&app, "text"), None);
    }

    #[test]
    fn example_enter_selects_without_submitting() {
        let mut app = app_with("q");
        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Down));

        assert_eq!(
            handle_key(&mut app, press(KeyCode::Enter)),
            Some(UiCommand::SelectExample("Exemplo 2".into()))
        );
        assert_eq!(app.focus(), Focus::Question);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app_with("q");
        assert_eq!(handle_key(&mut app, ctrl('c')), None);
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_u_clears_question() {
        let mut app = app_with("q");
        assert_eq!(
            handle_key(&mut app, ctrl('u')),
            Some(UiCommand::EditQuestion(String::new()))
        );
    }

    #[test]
    fn function_keys_map_to_menu_actions() {
        let mut app = app_with("q");
        assert_eq!(handle_key(&mut app, press(KeyCode::F(1))), Some(UiCommand::About));
        assert_eq!(handle_key(&mut app, press(KeyCode::F(5))), Some(UiCommand::Home));
    }

    #[test]
    fn paste_strips_newlines() {
        let app = app_with("Como ");
        assert_eq!(
            handle_paste(&app, "elaborar\num DFD?"),
            Some(UiCommand::EditQuestion("Como elaborarum DFD?".into()))
        );
    }
}
