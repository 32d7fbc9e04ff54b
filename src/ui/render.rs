use crate::analysis::{AnalysisResult, OperationState};
use crate::notify::{Severity, Toast};
use crate::ui::app::{App, Focus};
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, BORDER, FOCUS_BORDER, HEADER_TEXT, MUTED_TEXT, PRIMARY, STATUS_ERROR,
    STATUS_OK,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use std::time::Instant;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let [header, question, status, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);
    let [examples, result] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(body);

    draw_header(frame, header);
    draw_question(frame, app, question);
    draw_status(frame, app, status);
    draw_examples(frame, app, examples);
    draw_result(frame, app, result);
    draw_footer(frame, app, footer);
    draw_toasts(frame, app.toasts(), area);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { FOCUS_BORDER } else { BORDER };
    Block::bordered()
        .title(Span::styled(title, Style::default().fg(HEADER_TEXT)))
        .border_style(Style::default().fg(color))
}

fn draw_header(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "📋 Analisador de Licitações",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Lei Federal 14.133/2021 e Decreto Estadual 1.525/2022 · Especialista em DFD, ETP e TR",
            Style::default().fg(MUTED_TEXT),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_question(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Question;
    let style = if app.input_enabled() {
        Style::default().fg(HEADER_TEXT)
    } else {
        Style::default().fg(MUTED_TEXT)
    };
    let text = if app.question().is_empty() {
        Span::styled(
            "Digite sua pergunta sobre licitações...",
            Style::default().fg(MUTED_TEXT),
        )
    } else {
        Span::styled(app.question(), style)
    };

    let block = panel("Qual sua dúvida sobre licitações?", focused);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

    if focused && app.input_enabled() && inner.width > 0 {
        let typed = app.question().chars().count() as u16;
        let x = inner.x + typed.min(inner.width.saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let analysis = app.analysis();

    if analysis.shows_progress() {
        let spinner = SPINNER[app.spinner_frame(Instant::now()) % SPINNER.len()];
        let label = format!(
            "{} {}% {}",
            spinner, analysis.progress.percent, analysis.progress.step_label
        );
        let gauge = Gauge::default()
            .block(panel("Progresso da análise", false))
            .gauge_style(Style::default().fg(PRIMARY).bg(ACTIVE_HIGHLIGHT))
            .ratio(analysis.progress.ratio())
            .label(label);
        frame.render_widget(gauge, area);
        return;
    }

    let line = match &analysis.operation {
        OperationState::Idle if analysis.can_submit() => Line::from(Span::styled(
            "Pressione Enter para analisar",
            Style::default().fg(MUTED_TEXT),
        )),
        OperationState::Idle => Line::from(Span::styled(
            "Digite uma pergunta para começar",
            Style::default().fg(MUTED_TEXT),
        )),
        OperationState::InFlight => Line::default(),
        OperationState::Succeeded(_) => Line::from(Span::styled(
            format!(
                "{}% {}",
                analysis.progress.percent, analysis.progress.step_label
            ),
            Style::default().fg(STATUS_OK),
        )),
        OperationState::Failed(reason) => Line::from(Span::styled(
            format!("Falha: {}", reason),
            Style::default().fg(STATUS_ERROR),
        )),
    };
    frame.render_widget(Paragraph::new(line).block(panel("Status", false)), area);
}

fn draw_examples(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .examples()
        .iter()
        .map(|example| ListItem::new(Line::from(example.as_str())))
        .collect();
    let list = List::new(items)
        .block(panel("💡 Exemplos de Perguntas", app.focus() == Focus::Examples))
        .highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT).fg(PRIMARY))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.example_selection()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_result(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = panel("📚 Análise", app.focus() == Focus::Result);
    let text = match app.analysis().last_result.as_deref() {
        Some(result) => result_text(result, app.show_thinking()),
        None => Text::from(Span::styled(
            "Nenhuma análise ainda. Escolha um exemplo ou digite uma pergunta.",
            Style::default().fg(MUTED_TEXT),
        )),
    };
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.result_scroll(), 0));
    frame.render_widget(paragraph, area);
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
    ))
}

fn result_text(result: &AnalysisResult, show_thinking: bool) -> Text<'static> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Pergunta: ", Style::default().fg(MUTED_TEXT)),
            Span::raw(result.question.clone()),
        ]),
        Line::from(vec![
            Span::styled("Gerado em: ", Style::default().fg(MUTED_TEXT)),
            Span::raw(result.display_timestamp()),
        ]),
        Line::default(),
    ];
    lines.extend(result.analysis.lines().map(|l| Line::from(l.to_string())));

    if let Some(references) = &result.references {
        lines.push(Line::default());
        lines.push(section_title("Referências"));
        lines.extend(references.lines().map(|l| Line::from(l.to_string())));
    }

    if let Some(thinking) = &result.thinking_process {
        lines.push(Line::default());
        if show_thinking {
            lines.push(section_title("Processo de raciocínio"));
            let muted = Style::default().fg(MUTED_TEXT);
            lines.extend(
                thinking
                    .lines()
                    .map(|l| Line::from(Span::styled(l.to_string(), muted))),
            );
        } else {
            lines.push(Line::from(Span::styled(
                "Ctrl+T mostra o processo de raciocínio",
                Style::default().fg(MUTED_TEXT),
            )));
        }
    }

    Text::from(lines)
}

const FOOTER_HINTS: &str =
    "Tab alternar painel · F5 início · F1 sobre · Ctrl+T raciocínio · Ctrl+Q sair";

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = Vec::with_capacity(2);
    if app.analysis().can_submit() {
        spans.push(Span::styled("Enter analisar · ", Style::default().fg(PRIMARY)));
    }
    spans.push(Span::styled(FOOTER_HINTS, Style::default().fg(MUTED_TEXT)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_toasts(frame: &mut Frame<'_>, toasts: &[Toast], area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width);
    let mut y = area.y;

    for toast in toasts.iter().rev() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = match toast.severity {
            Severity::Success => STATUS_OK,
            Severity::Error => STATUS_ERROR,
        };
        let block = Block::bordered()
            .title(Span::styled(
                toast.severity.summary(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(color));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.detail.as_str())
                .block(block)
                .wrap(Wrap { trim: true }),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}
