use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::markup::{self, Segment};
use crate::core::message::{Category, Message};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Pulse intensity threshold above which the border transitions from DIM to normal.
const PULSE_NORMAL_THRESHOLD: f32 = 0.5;

/// A stateless component that renders a single chat message.
///
/// The sender is the border title; the text is drawn as styled spans from
/// [`markup::parse`]. Nothing in either is interpreted beyond `**bold**` and
/// `*italic*`: the terminal shows every other character literally.
///
/// # Styling
///
/// - **user** (green), **llm** (blue), **system** (yellow)
/// - **error** (red)
/// - **info** (dark gray, italic), used by the pending indicator
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
    /// Current pulse intensity (0.0 to 1.0); non-zero only for the pending indicator
    pub pulse_intensity: f32,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message, pulse_intensity: f32) -> Self {
        Self {
            message,
            pulse_intensity,
        }
    }

    /// Height of the bordered message at the given outer width.
    ///
    /// Counts lines with the same `Paragraph` configuration used for
    /// rendering, so the scroll extent matches what is drawn.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }
        bordered_height(body(message).line_count(content_width))
    }
}

/// Outer height for `lines` wrapped body lines, saturating at `u16::MAX`.
fn bordered_height(lines: usize) -> u16 {
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .max(1)
        .saturating_add(VERTICAL_OVERHEAD)
}

/// Base style for a category.
pub fn category_style(category: Category) -> Style {
    match category {
        Category::User => Style::default().fg(Color::Green),
        Category::Llm => Style::default().fg(Color::Blue),
        Category::System => Style::default().fg(Color::Yellow),
        Category::Error => Style::default().fg(Color::Red),
        Category::Info => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    }
}

/// Convert message text into styled lines: strong → BOLD, emphasis → ITALIC.
pub fn render_text(text: &str, base: Style) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = vec![Line::default()];
    for segment in markup::parse(text) {
        let style = segment_style(&segment, base);
        for (i, part) in segment.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !part.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.push_span(Span::styled(part.to_string(), style));
                }
            }
        }
    }
    Text::from(lines)
}

fn segment_style(segment: &Segment, base: Style) -> Style {
    let mut style = base;
    if segment.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if segment.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

fn body(message: &Message) -> Paragraph<'static> {
    let style = category_style(message.category);
    Paragraph::new(render_text(&message.text, style)).wrap(Wrap { trim: true })
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = category_style(self.message.category);
        let border_style = if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        // Span, not markup: the sender label is always literal.
        let title = Span::styled(format!("{}:", self.message.sender), border_style);
        let block = Block::bordered()
            .title(title)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);
        body(self.message).render(inner_area, buf);
    }
}

impl<'a> Component for MessageView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
