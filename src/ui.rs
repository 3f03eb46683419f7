//! The UI renders the application state into something visible and navigable.
//!
//! The draw function dispatches based on the current view (browse or full-screen diagram). The
//! browse view shows the sidebar beside the page, or the page alone with the sidebar as an overlay
//! when the terminal is narrower than the configured compact width. Pages are pre-wrapped into
//! lines so that section offsets are known for scrolling; diagrams are drawn on a braille canvas.

use crate::app_state::{AppState, Focus, View};
use crate::config::Config;
use crate::diagram::{self, Diagram, Fill, Node, NodeStyle, Viewport};
use crate::highlight::PayloadHighlighter;
use crate::navigation::{SidebarRow, VERSION_LABEL};
use crate::render::{render_page, Badge, PageView, Payload, SectionView, NOT_FOUND_TEXT};
use crate::section::{Block as ContentBlock, FlowchartRef, ListEntry, Method};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points, Rectangle},
        Block, Borders, Clear, List, ListItem, ListState, Paragraph,
    },
    Frame,
};

const SIDEBAR_WIDTH: u16 = 32;
/// Brand yellow, `#FFF539`.
const ACCENT: Color = Color::Rgb(0xFF, 0xF5, 0x39);
const ORANGE: Color = Color::Rgb(255, 165, 0);
/// Upper bound on grid dots per frame; the gap doubles until the grid fits under it.
const MAX_GRID_POINTS: f64 = 6000.0;
/// Dash length of optional node borders, in diagram units.
const DASH: f64 = 8.0;

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config, highlighter: &PayloadHighlighter) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    app.compact = f.area().width < cfg.compact_width;
    draw_header(f, app, chunks[0]);
    match app.view {
        View::Browse => draw_browse(f, app, cfg, highlighter, chunks[1]),
        View::Diagram(reference) => draw_diagram_view(f, app, cfg, reference, chunks[1]),
    }
    draw_help(f, app, chunks[2]);
}

#[must_use]
/// Badge background for an HTTP method.
pub fn method_color(method: Method) -> Color {
    match method {
        Method::Get => Color::Green,
        Method::Post => Color::Blue,
        Method::Put => ORANGE,
        Method::Patch => Color::Magenta,
        Method::Delete => Color::Red,
    }
}

fn draw_header(f: &mut Frame, app: &AppState, area: Rect) {
    let topic = app
        .sidebar
        .title_of(&app.ui.active_topic_id)
        .unwrap_or(app.ui.active_topic_id.as_str());
    let line = Line::from(vec![
        Span::styled(
            "metaninza",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" docs"),
        Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
        Span::raw(topic.to_string()),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_browse(
    f: &mut Frame,
    app: &mut AppState,
    cfg: &Config,
    highlighter: &PayloadHighlighter,
    area: Rect,
) {
    if app.compact {
        draw_content(f, app, cfg, highlighter, area);
        if app.ui.sidebar_open {
            let overlay = Rect {
                width: SIDEBAR_WIDTH.min(area.width),
                ..area
            };
            f.render_widget(Clear, overlay);
            draw_sidebar(f, app, overlay, true);
        }
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        draw_sidebar(f, app, panes[0], app.focus == Focus::Sidebar);
        draw_content(f, app, cfg, highlighter, panes[1]);
    }
}

fn sidebar_line(row: &SidebarRow, active_topic: &str) -> Line<'static> {
    match row {
        SidebarRow::Group(title) => Line::from(Span::styled(
            title.to_uppercase(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )),
        SidebarRow::Topic { entry, nested } => {
            let indent = if *nested { "    " } else { "  " };
            let active = entry.id == active_topic;
            let style = if active {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = vec![
                Span::raw(indent),
                Span::raw(format!("{} ", entry.icon.glyph())),
                Span::styled(entry.title, style),
            ];
            if active {
                spans.push(Span::styled(" ›", style));
            }
            Line::from(spans)
        }
        SidebarRow::SubGroup {
            title,
            icon,
            expanded,
        } => {
            let chevron = if *expanded { "▾" } else { "▸" };
            Line::from(vec![
                Span::raw(format!("  {chevron} {} ", icon.glyph())),
                Span::styled(*title, Style::default().add_modifier(Modifier::BOLD)),
            ])
        }
    }
}

fn draw_sidebar(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let title = if app.compact { "Navigation" } else { "Topics" };
    let border = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = app
        .sidebar_rows()
        .iter()
        .map(|row| ListItem::new(sidebar_line(row, &app.ui.active_topic_id)))
        .collect();
    let highlight = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let mut state = ListState::default().with_selected(Some(app.sidebar_cursor));
    f.render_stateful_widget(List::new(items).highlight_style(highlight), parts[0], &mut state);

    let footer = Paragraph::new(Span::styled(
        VERSION_LABEL,
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(footer, parts[1]);
}

fn draw_content(
    f: &mut Frame,
    app: &mut AppState,
    cfg: &Config,
    highlighter: &PayloadHighlighter,
    area: Rect,
) {
    let focused = if app.compact {
        !app.ui.sidebar_open
    } else {
        app.focus == Focus::Content
    };
    let border = if focused && !app.compact {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let page = render_page(&app.store, &app.ui);
    let cursor = focused.then_some(app.section_cursor);
    let layout = PageLayout::build(
        &page,
        usize::from(inner.width),
        cfg.diagram_height,
        cursor,
        highlighter,
    );

    if app.follow_cursor {
        if let Some(&offset) = layout.section_offsets.get(app.section_cursor) {
            if offset < app.scroll || offset >= app.scroll.saturating_add(inner.height) {
                app.scroll = offset;
            }
        }
        app.follow_cursor = false;
    }
    app.scroll = app.scroll.min(layout.height.saturating_sub(1));
    layout.render(f, inner, app.scroll, cfg.grid_gap);
}

/// A run of page rows: wrapped text, or a canvas of fixed height.
enum Segment {
    Text(Vec<Line<'static>>),
    Diagram(FlowchartRef, u16),
}

/// A page flattened to rows, with the row at which each section starts.
struct PageLayout {
    segments: Vec<Segment>,
    section_offsets: Vec<u16>,
    height: u16,
}

fn to_rows(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl PageLayout {
    fn build(
        page: &PageView,
        width: usize,
        diagram_height: u16,
        cursor: Option<usize>,
        highlighter: &PayloadHighlighter,
    ) -> Self {
        let mut builder = PageBuilder {
            segments: Vec::new(),
            lines: Vec::new(),
            rows: 0,
            section_offsets: Vec::new(),
            width: width.max(8),
        };
        match page {
            PageView::NotFound => builder.line(Line::from(Span::styled(
                NOT_FOUND_TEXT,
                Style::default().fg(Color::DarkGray),
            ))),
            PageView::Document {
                title,
                description,
                sections,
            } => {
                builder.line(Line::from(Span::styled(
                    title.clone(),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )));
                if !description.is_empty() {
                    builder.wrapped(
                        &inline_spans(description, Style::default().fg(Color::Gray)),
                        "",
                        "",
                    );
                }
                builder.blank();
                for section in sections {
                    builder.section(section, cursor, diagram_height, highlighter);
                }
            }
        }
        builder.finish()
    }

    fn render(&self, f: &mut Frame, area: Rect, scroll: u16, grid_gap: f64) {
        let top = usize::from(scroll);
        let bottom = top + usize::from(area.height);
        let mut row = 0usize;
        for segment in &self.segments {
            let len = match segment {
                Segment::Text(lines) => lines.len(),
                Segment::Diagram(_, height) => usize::from(*height),
            };
            let (start, end) = (row.max(top), (row + len).min(bottom));
            if start < end {
                let rect = Rect {
                    x: area.x,
                    y: area.y + to_rows(start - top),
                    width: area.width,
                    height: to_rows(end - start),
                };
                match segment {
                    Segment::Text(lines) => {
                        let visible = lines[start - row..end - row].to_vec();
                        f.render_widget(Paragraph::new(visible), rect);
                    }
                    Segment::Diagram(reference, _) => {
                        draw_inline_diagram(f, rect, *reference, grid_gap);
                    }
                }
            }
            row += len;
            if row >= bottom {
                break;
            }
        }
    }
}

struct PageBuilder {
    segments: Vec<Segment>,
    lines: Vec<Line<'static>>,
    rows: usize,
    section_offsets: Vec<u16>,
    width: usize,
}

impl PageBuilder {
    fn line(&mut self, line: Line<'static>) {
        self.lines.push(line);
        self.rows += 1;
    }

    fn blank(&mut self) {
        self.line(Line::default());
    }

    fn wrapped(&mut self, spans: &[Span<'static>], prefix: &str, indent: &str) {
        for line in wrap_spans(spans, self.width, prefix, indent) {
            self.line(line);
        }
    }

    fn diagram(&mut self, reference: FlowchartRef, height: u16) {
        if !self.lines.is_empty() {
            self.segments
                .push(Segment::Text(std::mem::take(&mut self.lines)));
        }
        self.segments.push(Segment::Diagram(reference, height));
        self.rows += usize::from(height);
    }

    fn section(
        &mut self,
        section: &SectionView,
        cursor: Option<usize>,
        diagram_height: u16,
        highlighter: &PayloadHighlighter,
    ) {
        self.section_offsets.push(to_rows(self.rows));
        let selected = cursor == Some(section.index);
        let mut heading_style = Style::default().add_modifier(Modifier::BOLD);
        if selected {
            heading_style = heading_style.add_modifier(Modifier::REVERSED);
        }
        let mut heading = Vec::new();
        if let Some(chevron) = section.toggle.chevron() {
            heading.push(Span::styled(format!("{chevron} "), heading_style));
        }
        heading.push(Span::styled(section.heading.clone(), heading_style));
        self.line(Line::from(heading));
        if let Some(badge) = &section.badge {
            self.line(Line::from(badge_spans(badge)));
        }
        self.blank();

        for block in &section.blocks {
            self.block(block);
        }

        if let Some(reference) = section.diagram {
            let title = Diagram::for_ref(reference).title;
            self.line(Line::from(vec![
                Span::styled(format!("◆ {title}"), Style::default().fg(ACCENT)),
                Span::styled(
                    "  (Enter: full screen)",
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            self.diagram(reference, diagram_height);
            self.blank();
        }

        for payload in &section.payloads {
            self.payload(payload, highlighter);
        }
        self.blank();
    }

    fn block(&mut self, block: &ContentBlock) {
        match block {
            ContentBlock::Paragraph { text } => {
                self.wrapped(&inline_spans(text, Style::default()), "", "");
            }
            ContentBlock::Subheading { text } => self.line(Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(ACCENT)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))),
            ContentBlock::List { ordered, items } => self.list(*ordered, items),
            ContentBlock::Table { header, rows } => {
                for line in table_lines(header, rows, self.width) {
                    self.line(line);
                }
            }
        }
        self.blank();
    }

    fn list(&mut self, ordered: bool, items: &[ListEntry]) {
        let mut number = 0;
        for item in items {
            let indent = "  ".repeat(item.depth + 1);
            let marker = if ordered && item.depth == 0 {
                number += 1;
                format!("{number}. ")
            } else {
                "• ".to_string()
            };
            let prefix = format!("{indent}{marker}");
            let hanging = " ".repeat(prefix.chars().count());
            self.wrapped(&inline_spans(&item.text, Style::default()), &prefix, &hanging);
        }
    }

    fn payload(&mut self, payload: &Payload, highlighter: &PayloadHighlighter) {
        let frame = Style::default().fg(Color::DarkGray);
        let title = payload.kind.title();
        let rule = "─".repeat(self.width.saturating_sub(title.chars().count() + 6));
        self.line(Line::from(vec![
            Span::styled("  ┌─ ", frame),
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {rule}"), frame),
        ]));
        for line in highlighter.highlight(&payload.text, payload.language.as_deref()) {
            let mut spans = vec![Span::styled("  │ ", frame)];
            spans.extend(line.spans);
            self.line(Line::from(spans));
        }
        self.line(Line::from(Span::styled("  └", frame)));
        self.blank();
    }

    fn finish(mut self) -> PageLayout {
        if !self.lines.is_empty() {
            self.segments.push(Segment::Text(self.lines));
        }
        PageLayout {
            segments: self.segments,
            section_offsets: self.section_offsets,
            height: to_rows(self.rows),
        }
    }
}

fn badge_spans(badge: &Badge) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw("  ")];
    if let Some(method) = badge.method {
        spans.push(Span::styled(
            format!(" {method} "),
            Style::default()
                .fg(Color::Black)
                .bg(method_color(method))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    if let Some(endpoint) = &badge.endpoint {
        spans.push(Span::styled(
            endpoint.clone(),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans
}

fn flush_span(buffer: &mut String, spans: &mut Vec<Span<'static>>, style: Style) {
    if !buffer.is_empty() {
        spans.push(Span::styled(std::mem::take(buffer), style));
    }
}

/// Styles `**bold**` and `` `code` `` runs; the markers themselves are dropped.
fn inline_spans(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let (mut bold, mut code) = (false, false);
    let style = |bold: bool, code: bool| {
        let mut style = base;
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if code {
            style = style.fg(Color::Cyan);
        }
        style
    };
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if !code && rest.starts_with("**") {
            flush_span(&mut buffer, &mut spans, style(bold, code));
            bold = !bold;
            rest = &rest[2..];
        } else if ch == '`' {
            flush_span(&mut buffer, &mut spans, style(bold, code));
            code = !code;
            rest = &rest[1..];
        } else {
            buffer.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    flush_span(&mut buffer, &mut spans, style(bold, code));
    spans
}

/// Inline text with the markup markers removed.
fn plain_inline(text: &str) -> String {
    text.replace("**", "").replace('`', "")
}

/// Greedy word wrap that keeps span styles; words longer than the width get a row of their own.
fn wrap_spans(
    spans: &[Span<'static>],
    width: usize,
    prefix: &str,
    indent: &str,
) -> Vec<Line<'static>> {
    let mut words: Vec<Vec<Span<'static>>> = Vec::new();
    let mut word: Vec<Span<'static>> = Vec::new();
    for span in spans {
        let mut piece = String::new();
        for ch in span.content.chars() {
            if ch.is_whitespace() {
                flush_span(&mut piece, &mut word, span.style);
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            } else {
                piece.push(ch);
            }
        }
        flush_span(&mut piece, &mut word, span.style);
    }
    if !word.is_empty() {
        words.push(word);
    }

    let mut lines = Vec::new();
    let mut line = vec![Span::raw(prefix.to_string())];
    let mut used = Span::raw(prefix).width();
    let mut empty = true;
    for word in words {
        let word_width: usize = word.iter().map(Span::width).sum();
        if !empty && used + 1 + word_width > width {
            lines.push(Line::from(std::mem::replace(
                &mut line,
                vec![Span::raw(indent.to_string())],
            )));
            used = Span::raw(indent).width();
            empty = true;
        }
        if !empty {
            line.push(Span::raw(" "));
            used += 1;
        }
        used += word_width;
        line.extend(word);
        empty = false;
    }
    lines.push(Line::from(line));
    lines
}

/// Greedy wrap of plain text into rows of at most `width` characters.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
            }
            rows.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = usize::from(!row.is_empty()) + word.chars().count();
        if row.chars().count() + needed > width {
            rows.push(std::mem::take(&mut row));
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(&word);
    }
    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    rows
}

/// Column widths that fit `width` once borders are added, shrinking the widest column first.
fn column_widths(header: &[String], rows: &[Vec<String>], width: usize) -> Vec<usize> {
    let columns = header.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut widths: Vec<usize> = (0..columns)
        .map(|c| {
            std::iter::once(header.get(c))
                .chain(rows.iter().map(|r| r.get(c)))
                .flatten()
                .map(|cell| plain_inline(cell).chars().count())
                .max()
                .unwrap_or(0)
                .max(1)
        })
        .collect();
    let available = width.saturating_sub(columns * 3 + 1).max(columns * 4);
    while widths.iter().sum::<usize>() > available {
        let Some((widest, &w)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if w <= 4 {
            break;
        }
        widths[widest] = w - 1;
    }
    widths
}

fn table_rule(widths: &[usize], left: &str, join: &str, right: &str) -> Line<'static> {
    let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    Line::from(Span::styled(
        format!("{left}{}{right}", inner.join(join)),
        Style::default().fg(Color::DarkGray),
    ))
}

fn table_row(cells: &[String], widths: &[usize], style: Style) -> Vec<Line<'static>> {
    let wrapped: Vec<Vec<String>> = widths
        .iter()
        .enumerate()
        .map(|(c, &w)| wrap_text(&plain_inline(cells.get(c).map_or("", String::as_str)), w))
        .collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
    let border = Style::default().fg(Color::DarkGray);
    (0..height)
        .map(|r| {
            let mut spans = vec![Span::styled("│", border)];
            for (c, &w) in widths.iter().enumerate() {
                let text = wrapped[c].get(r).map_or("", String::as_str);
                spans.push(Span::styled(format!(" {text:<w$} "), style));
                spans.push(Span::styled("│", border));
            }
            Line::from(spans)
        })
        .collect()
}

fn table_lines(header: &[String], rows: &[Vec<String>], width: usize) -> Vec<Line<'static>> {
    let widths = column_widths(header, rows, width);
    if widths.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![table_rule(&widths, "┌", "┬", "┐")];
    lines.extend(table_row(
        header,
        &widths,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    lines.push(table_rule(&widths, "├", "┼", "┤"));
    for row in rows {
        lines.extend(table_row(row, &widths, Style::default()));
    }
    lines.push(table_rule(&widths, "└", "┴", "┘"));
    lines
}

fn draw_inline_diagram(f: &mut Frame, area: Rect, reference: FlowchartRef, grid_gap: f64) {
    let diagram = Diagram::for_ref(reference);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 4 || inner.height < 2 {
        return;
    }
    let viewport = Viewport::fit(diagram.bounds(), inner.width, inner.height);
    draw_diagram(f, inner, &diagram, viewport, grid_gap);
}

fn draw_diagram_view(
    f: &mut Frame,
    app: &mut AppState,
    cfg: &Config,
    reference: FlowchartRef,
    area: Rect,
) {
    let diagram = Diagram::for_ref(reference);
    let card = Block::default().borders(Borders::ALL);
    let inner = card.inner(area);
    let viewport = *app
        .viewports
        .entry(reference)
        .or_insert_with(|| Viewport::fit(diagram.bounds(), inner.width, inner.height));

    let title = format!(" {} · zoom {:.0}% ", diagram.title, viewport.zoom * 100.0);
    f.render_widget(card.title(title), area);
    draw_diagram(f, inner, &diagram, viewport, cfg.grid_gap);
    if app.show_minimap {
        draw_minimap(f, inner, &diagram, viewport);
    }
}

fn fill_color(fill: Fill) -> Color {
    let (r, g, b) = fill.rgb();
    Color::Rgb(r, g, b)
}

/// Border colour and label style of a node. Navy boxes take the brand yellow, as their text does.
fn node_colors(style: NodeStyle) -> (Color, Style) {
    if style.dimmed {
        let grey = Color::DarkGray;
        return (grey, Style::default().fg(grey));
    }
    match style.fill {
        Fill::Navy => (
            ACCENT,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Fill::Yellow => (
            fill_color(Fill::Yellow),
            Style::default()
                .fg(fill_color(Fill::Yellow))
                .add_modifier(Modifier::BOLD),
        ),
        Fill::White => (
            fill_color(Fill::White),
            Style::default().fg(fill_color(Fill::White)),
        ),
    }
}

/// Width in diagram units of `chars` columns at `zoom`.
#[allow(clippy::cast_precision_loss)]
fn text_units(chars: usize, zoom: f64) -> f64 {
    chars as f64 * diagram::UNITS_PER_COLUMN / zoom
}

fn draw_diagram(f: &mut Frame, area: Rect, diagram: &Diagram, viewport: Viewport, grid_gap: f64) {
    let visible = viewport.bounds(area.width, area.height);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([visible.x, visible.right()])
        .y_bounds([-visible.bottom(), -visible.y])
        .paint(|ctx| {
            paint_grid(ctx, &visible, grid_gap);
            ctx.layer();
            for edge in &diagram.edges {
                paint_edge(ctx, diagram, edge, viewport.zoom);
            }
            for node in &diagram.nodes {
                paint_node(ctx, node, &viewport);
            }
        });
    f.render_widget(canvas, area);
}

fn paint_grid(ctx: &mut Context, visible: &diagram::Rect, gap: f64) {
    if gap <= 0.0 {
        return;
    }
    let mut gap = gap;
    while (visible.width / gap) * (visible.height / gap) > MAX_GRID_POINTS {
        gap *= 2.0;
    }
    let mut coords = Vec::new();
    let mut x = (visible.x / gap).ceil() * gap;
    while x <= visible.right() {
        let mut y = (visible.y / gap).ceil() * gap;
        while y <= visible.bottom() {
            coords.push((x, -y));
            y += gap;
        }
        x += gap;
    }
    ctx.draw(&Points {
        coords: &coords,
        color: Color::DarkGray,
    });
}

fn paint_edge(ctx: &mut Context, diagram: &Diagram, edge: &diagram::Edge, zoom: f64) {
    let Some(route) = diagram.edge_route(edge) else {
        return;
    };
    let color = if edge.muted {
        Color::DarkGray
    } else if edge.animated {
        Color::White
    } else {
        Color::Gray
    };
    for pair in route.windows(2) {
        ctx.draw(&CanvasLine::new(
            pair[0].x,
            -pair[0].y,
            pair[1].x,
            -pair[1].y,
            color,
        ));
    }
    if let Some(end) = route.last() {
        let lift = diagram::UNITS_PER_ROW / zoom / 2.0;
        ctx.print(
            end.x,
            -(end.y - lift),
            Span::styled("▼", Style::default().fg(color)),
        );
    }
    if let (Some(label), Some(anchor)) = (edge.label, diagram::label_anchor(&route)) {
        let half = text_units(label.chars().count(), zoom) / 2.0;
        ctx.print(
            anchor.x - half,
            -anchor.y,
            Span::styled(
                label,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::ITALIC),
            ),
        );
    }
}

fn paint_node(ctx: &mut Context, node: &Node, viewport: &Viewport) {
    let rect = node.rect();
    let (border, text) = node_colors(node.style);
    let corners = [
        diagram::Point::new(rect.x, -rect.y),
        diagram::Point::new(rect.right(), -rect.y),
        diagram::Point::new(rect.right(), -rect.bottom()),
        diagram::Point::new(rect.x, -rect.bottom()),
    ];
    for i in 0..corners.len() {
        let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
        let segments = if node.style.dashed {
            diagram::dashed_segments(a, b, DASH)
        } else {
            vec![(a, b)]
        };
        for (from, to) in segments {
            ctx.draw(&CanvasLine::new(from.x, from.y, to.x, to.y, border));
        }
    }

    let lines: Vec<&str> = if viewport.shows_full_labels() {
        node.label.lines().collect()
    } else {
        node.label.lines().take(1).collect()
    };
    #[allow(clippy::cast_precision_loss)]
    let block_height = lines.len() as f64 * diagram::LINE_HEIGHT;
    let top = rect.center().y - block_height / 2.0;
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let x = rect.center().x - text_units(line.chars().count(), viewport.zoom) / 2.0;
        #[allow(clippy::cast_precision_loss)]
        let y = top + (i as f64 + 0.5) * diagram::LINE_HEIGHT;
        ctx.print(x, -y, Span::styled((*line).to_string(), text));
    }
}

fn draw_minimap(f: &mut Frame, area: Rect, diagram: &Diagram, viewport: Viewport) {
    let width = (area.width / 4).clamp(16, 32);
    let height = (area.height / 3).clamp(6, 12);
    if area.width < width + 2 || area.height < height + 2 {
        return;
    }
    let rect = Rect {
        x: area.right() - width - 1,
        y: area.bottom() - height - 1,
        width,
        height,
    };
    let visible = viewport.bounds(area.width, area.height);
    let world = diagram.bounds().inflate(20.0).union(&visible);
    let nodes: Vec<diagram::Rect> = diagram.nodes.iter().map(Node::rect).collect();
    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("Minimap"),
        )
        .marker(Marker::Braille)
        .x_bounds([world.x, world.right()])
        .y_bounds([-world.bottom(), -world.y])
        .paint(|ctx| {
            for node in &nodes {
                ctx.draw(&Rectangle {
                    x: node.x,
                    y: -node.bottom(),
                    width: node.width,
                    height: node.height,
                    color: Color::Gray,
                });
            }
            ctx.draw(&Rectangle {
                x: visible.x,
                y: -visible.bottom(),
                width: visible.width,
                height: visible.height,
                color: ACCENT,
            });
        });
    f.render_widget(Clear, rect);
    f.render_widget(canvas, rect);
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let help = if let Some(message) = &app.message {
        message.clone()
    } else {
        match app.view {
            View::Diagram(_) => {
                "←/→/↑/↓ hjkl: Pan | +/-: Zoom | 0: Fit | n: Minimap | Esc/q: Back".to_string()
            }
            View::Browse if app.compact && app.ui.sidebar_open => {
                "↑/↓: Navigate | Enter: Open | Esc: Close | q: Quit".to_string()
            }
            View::Browse if !app.compact && app.focus == Focus::Sidebar => {
                "↑/↓: Navigate | Enter: Open | Tab/→: Page | q: Quit".to_string()
            }
            View::Browse if app.compact => {
                "↑/↓: Section | Enter/Space: Toggle | PgUp/PgDn: Scroll | m: Menu | q: Quit"
                    .to_string()
            }
            View::Browse => {
                "↑/↓: Section | Enter/Space: Toggle | PgUp/PgDn: Scroll | Tab/←: Topics | q: Quit"
                    .to_string()
            }
        }
    };
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
