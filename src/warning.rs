use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up describing a non-fatal error
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: u16 = 12;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Confirm => Some(WarningOutcome::Dismissed),
            Command::Quit | Command::Q => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    /// Lay out an error message followed by the messages of its causes,
    /// outermost first
    fn from_error_messages(msgs: Vec<String>) -> Self {
        let width = usize::from(Warning::TEXT_WIDTH);
        let mut msgs = msgs.into_iter();
        let mut lines = Vec::new();
        if let Some(first) = msgs.next() {
            let opts = textwrap::Options::new(width).break_words(true);
            lines.extend(textwrap::wrap(&first, opts).into_iter().map(Cow::into_owned));
        }
        for m in msgs {
            let opts = textwrap::Options::new(width)
                .break_words(true)
                .initial_indent("  - ")
                .subsequent_indent("    ");
            lines.extend(textwrap::wrap(&m, opts).into_iter().map(Cow::into_owned));
        }
        lines.truncate(usize::from(Warning::MAX_LINES));
        Warning { lines }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_error_messages(msgs)
    }
}

impl Widget for &Warning {
    // `area` is the whole display; the pop-up centers itself within it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_height = u16::try_from(self.lines.len()).unwrap_or(Warning::MAX_LINES);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height: text_height.saturating_add(4),
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}
