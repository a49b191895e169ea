//! Drawing the page with ratatui widgets.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar as TuiBar, BarChart, BarGroup, Block, Chart, Clear, Dataset, GraphType, Paragraph,
    Wrap,
};
use ratatui::Frame;

use super::state::{Focus, ServiceStatus, UiState};
use super::theme::{to_color, Theme};
use crate::charts::{carat, CaratChart, GradeBarChart, InsightCharts};
use crate::form::{FormState, ResultView, PLACEHOLDER_TEXT, RESULT_CAPTION};
use crate::format::format_number;
use crate::insights::copy::{FOUR_CS, FOUR_CS_TITLE, KEY_INSIGHTS, PANEL_SUBTITLE, PANEL_TITLE};
use crate::insights::PanelView;
use crate::output::PAGE_TITLE;
use crate::page::Page;
use crate::scale::{LinearScale, Scale};

const KEY_HINTS: &str =
    " Tab/\u{2191}\u{2193} field  \u{2190}/\u{2192} option  Enter predict  i insights  ? help  q quit ";

/// Draw one frame.
pub fn draw(frame: &mut Frame, page: &Page, ui: &UiState, theme: &Theme) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, ui, theme);

    let top = if page.insights().is_visible() {
        let [top, bottom] = Layout::vertical([Constraint::Length(12), Constraint::Min(0)]).areas(body);
        draw_insights(frame, bottom, page, theme);
        top
    } else {
        body
    };

    let [form_area, result_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
    draw_form(frame, form_area, page.form(), ui.focus, theme);
    draw_result(frame, result_area, page.form(), theme);

    let hints = Line::from(vec![
        Span::styled(KEY_HINTS, theme.hint()),
        Span::styled(format!(" [{}] ", page.toggle_label()), theme.hint()),
    ]);
    frame.render_widget(Paragraph::new(hints), footer);

    if ui.show_help {
        draw_help(frame, theme);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, ui: &UiState, theme: &Theme) {
    let service = match &ui.service {
        ServiceStatus::Unknown => Span::styled("connecting...", theme.hint()),
        ServiceStatus::Online(info) => Span::styled(
            format!("{} v{} ({})", info.message, info.version, info.model),
            Style::default().fg(theme.accent),
        ),
        ServiceStatus::Offline => Span::styled("service unreachable", theme.error_text()),
    };
    let block = Block::bordered().border_style(theme.border(false));
    let line = Line::from(vec![
        Span::styled(PAGE_TITLE, theme.heading()),
        Span::raw("  "),
        service,
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn field_value(form: &FormState, focus: Focus) -> &str {
    let fields = form.fields();
    match focus {
        Focus::Carat => &fields.carat,
        Focus::Cut => &fields.cut,
        Focus::Color => &fields.color,
        Focus::Clarity => &fields.clarity,
    }
}

fn draw_form(frame: &mut Frame, area: Rect, form: &FormState, focus: Focus, theme: &Theme) {
    let validation = form.validation();
    let errors = [
        validation.carat.as_ref().err().map(ToString::to_string),
        validation.cut.as_ref().err().map(ToString::to_string),
        validation.color.as_ref().err().map(ToString::to_string),
        validation.clarity.as_ref().err().map(ToString::to_string),
    ];

    let mut lines = Vec::new();
    for (field, error) in Focus::ALL.into_iter().zip(errors) {
        let focused = field == focus;
        let marker = if focused { "\u{25b8} " } else { "  " };
        let value = field_value(form, field);
        let value_span = if value.is_empty() {
            Span::styled(field.placeholder(), theme.hint())
        } else if field == Focus::Carat {
            Span::raw(value.to_string())
        } else {
            Span::raw(format!("\u{2039} {value} \u{203a}"))
        };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(format!("{:<8}", field.label()), theme.heading()),
            value_span,
        ];
        if focused && field == Focus::Carat {
            spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }
        lines.push(Line::from(spans));
        if let Some(message) = error {
            lines.push(Line::from(Span::styled(format!("    {message}"), theme.error_text())));
        }
    }

    lines.push(Line::default());
    let button = if form.can_submit() {
        Style::default().fg(Color::Black).bg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        theme.hint()
    };
    lines.push(Line::from(Span::styled(" Predict Price ", button)));

    let block = Block::bordered()
        .title(" Diamond Details ")
        .border_style(theme.border(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_result(frame: &mut Frame, area: Rect, form: &FormState, theme: &Theme) {
    let mut lines = vec![Line::default()];
    match form.display() {
        ResultView::Placeholder => {
            lines.push(Line::from(Span::styled(PLACEHOLDER_TEXT, theme.hint())));
        }
        ResultView::Loading => {
            lines.push(Line::from(Span::styled("Loading...", theme.heading())));
        }
        ResultView::Price { text, .. } => {
            lines.push(Line::from(Span::styled(RESULT_CAPTION, theme.hint())));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )));
        }
    }
    if let Some(error) = form.error() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(error, theme.error_text())));
    }

    let block = Block::bordered()
        .title(" Prediction Result ")
        .border_style(theme.border(false));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn draw_insights(frame: &mut Frame, area: Rect, page: &Page, theme: &Theme) {
    let block = Block::bordered()
        .title(format!(" {PANEL_TITLE} "))
        .border_style(theme.border(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let data = match page.insights().view() {
        PanelView::Ready { data, .. } => data,
        PanelView::Loading => {
            frame.render_widget(Paragraph::new(Span::styled("Loading insights...", theme.hint())), inner);
            return;
        }
        PanelView::Hidden => return,
    };

    let [subtitle, grid, notes] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(4),
    ])
    .areas(inner);
    frame.render_widget(Paragraph::new(Span::styled(PANEL_SUBTITLE, theme.hint())), subtitle);

    let charts = InsightCharts::new(data);
    let [row1, row2] = Layout::vertical([Constraint::Percentage(50); 2]).areas(grid);
    let [a, b] = Layout::horizontal([Constraint::Percentage(50); 2]).areas(row1);
    let [c, d] = Layout::horizontal([Constraint::Percentage(50); 2]).areas(row2);
    draw_scatter(frame, a, &charts.carat, theme);
    draw_bars(frame, b, &charts.cut, theme);
    draw_bars(frame, c, &charts.color, theme);
    draw_bars(frame, d, &charts.clarity, theme);

    let key_insights: Vec<Line> = KEY_INSIGHTS
        .iter()
        .map(|b| {
            Line::from(vec![
                Span::styled(format!("{}: ", b.title), theme.heading()),
                Span::raw(b.body),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(key_insights), notes);
}

fn axis_bounds(scale: Option<LinearScale>) -> (f64, f64) {
    scale.map(|s| s.nice(4).domain()).unwrap_or((0.0, 1.0))
}

fn axis_labels((lo, hi): (f64, f64)) -> Vec<String> {
    vec![format_number(lo), format_number((lo + hi) / 2.0), format_number(hi)]
}

fn draw_scatter(frame: &mut Frame, area: Rect, chart: &CaratChart, theme: &Theme) {
    let points: Vec<(f64, f64)> = chart.marks().iter().map(|m| (m.carat, m.price)).collect();
    let carats: Vec<f64> = points.iter().map(|p| p.0).collect();
    let prices: Vec<f64> = points.iter().map(|p| p.1).collect();
    let x = axis_bounds(LinearScale::from_data(&carats, (0.0, 1.0)));
    let y = axis_bounds(LinearScale::from_zero(&prices, (0.0, 1.0)));

    let text = chart.text();
    let dataset = Dataset::default()
        .name(carat::LEGEND)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(to_color(chart.color())))
        .data(&points);

    let widget = Chart::new(vec![dataset])
        .block(
            Block::bordered()
                .title(format!(" {} ", text.title))
                .border_style(theme.border(false)),
        )
        .x_axis(
            Axis::default()
                .title(text.x_label.unwrap_or_default())
                .style(theme.hint())
                .bounds([x.0, x.1])
                .labels(axis_labels(x)),
        )
        .y_axis(
            Axis::default()
                .title(text.y_label)
                .style(theme.hint())
                .bounds([y.0, y.1])
                .labels(axis_labels(y)),
        );
    frame.render_widget(widget, area);
}

/// Compact bar caption: `$3.5k`.
fn short_price(value: f64) -> String {
    if value >= 1000.0 {
        format!("${:.1}k", value / 1000.0)
    } else {
        format!("${value:.0}")
    }
}

fn draw_bars(frame: &mut Frame, area: Rect, chart: &GradeBarChart, theme: &Theme) {
    let bars: Vec<TuiBar> = chart
        .bars()
        .iter()
        .map(|b| {
            let value = if b.value.is_finite() { b.value.max(0.0).round() as u64 } else { 0 };
            TuiBar::default()
                .value(value)
                .label(Line::from(b.label))
                .text_value(short_price(b.value))
                .style(Style::default().fg(to_color(b.color)))
                .value_style(Style::default().fg(Color::Black).bg(to_color(b.color)))
        })
        .collect();

    let count = bars.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / count).saturating_sub(1).clamp(1, 12);
    let widget = BarChart::default()
        .block(
            Block::bordered()
                .title(format!(" {} ", chart.text().title))
                .border_style(theme.border(false)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(widget, area);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

fn draw_help(frame: &mut Frame, theme: &Theme) {
    let area = centered(frame.area(), 70, 80);
    let keys = [
        ("Tab / Down / j", "next field"),
        ("Shift-Tab / Up / k", "previous field"),
        ("Left / Right / h / l", "change grade"),
        ("0-9 . - e, Backspace", "edit carat"),
        ("Enter", "predict price"),
        ("i", "show / hide insights"),
        ("?", "toggle this help"),
        ("q / Esc / Ctrl-C", "quit"),
    ];

    let mut lines: Vec<Line> = keys
        .iter()
        .map(|(k, v)| {
            Line::from(vec![
                Span::styled(format!("{k:<24}"), Style::default().fg(theme.accent)),
                Span::raw(*v),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(FOUR_CS_TITLE, theme.heading())));
    for c in &FOUR_CS {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", c.title), theme.heading()),
            Span::raw(c.body),
        ]));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Help ").border_style(theme.border(true))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormEvent;
    use crate::insights::PanelEvent;
    use crate::model::{PredictionResult, ServiceInfo};
    use crate::page::{Command, PageEvent};
    use crate::validation::FormFields;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(page: &Page, ui: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal
            .draw(|f| draw(f, page, ui, &Theme::default()))
            .unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_empty_form() {
        let out = render(&Page::new(1), &UiState::default());
        assert!(out.contains("Diamond Price Predictor"));
        assert!(out.contains("Enter carat (e.g., 0.5)"));
        assert!(out.contains("Carat is required"));
        assert!(out.contains("Select a cut grade"));
        assert!(out.contains("Enter diamond details"));
        assert!(out.contains("Show Insights"));
    }

    #[test]
    fn test_price_shown() {
        let mut page = Page::with_fields(1, FormFields::new("1.5", "Ideal", "E", "VS1"));
        let Some(Command::Predict { token, .. }) = page.apply(PageEvent::Form(FormEvent::Submit)) else {
            panic!("expected a predict command");
        };
        page.apply(PageEvent::Form(FormEvent::PredictionSucceeded {
            token,
            result: PredictionResult {
                predicted_price: 8500.0,
            },
        }));

        let out = render(&page, &UiState::default());
        assert!(out.contains("$8,500"));
        assert!(out.contains("Predicted Diamond Price"));
    }

    #[test]
    fn test_insights_drawn_after_fallback() {
        let mut page = Page::new(42);
        page.apply(PageEvent::ToggleInsights);
        let loading = render(&page, &UiState::default());
        assert!(loading.contains("Loading insights..."));

        page.apply(PageEvent::Insights(PanelEvent::Loaded(Err(
            crate::api::ApiError::Network("down".into()),
        ))));
        let out = render(&page, &UiState::default());
        assert!(out.contains("Price vs Carat Weight"));
        assert!(out.contains("Average Price by Cut Quality"));
        assert!(out.contains("Hide Insights"));
    }

    #[test]
    fn test_help_and_service_banner() {
        let ui = UiState {
            show_help: true,
            service: ServiceStatus::Online(ServiceInfo {
                message: "Diamond Price Predictor API".into(),
                model: "m5".into(),
                version: "1.0.0".into(),
            }),
            ..UiState::default()
        };
        let out = render(&Page::new(1), &ui);
        assert!(out.contains("v1.0.0"));
        assert!(out.contains("Help"));
        assert!(out.contains("predict price"));
    }

    #[test]
    fn test_short_price() {
        assert_eq!(short_price(3458.0), "$3.5k");
        assert_eq!(short_price(950.0), "$950");
    }
}
