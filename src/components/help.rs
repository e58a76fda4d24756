use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::config::{key_event_to_string, KeyBindings};

#[derive(Debug)]
pub struct Help {
    title: String,
    bindings: Vec<(String, String)>,
    column_spacing: u16,
    margin_vertical: u16,
    margin_horizontal: u16,
}

impl Help {
    pub fn new(title: impl Into<String>, keybindings: &KeyBindings) -> Self {
        let mut bindings: Vec<(String, String)> =
            keybindings.iter().map(|(event, action)| (key_event_to_string(event), action.to_string())).collect();
        // Group keys by what they do
        bindings.sort_by(|(ka, va), (kb, vb)| va.cmp(vb).then_with(|| ka.cmp(kb)));

        Self { title: title.into(), bindings, column_spacing: 5, margin_vertical: 1, margin_horizontal: 2 }
    }

    fn size(&self) -> (u16, u16) {
        let key_length = self.bindings.iter().map(|(key, _)| key.len()).max().unwrap_or(0) as u16;
        let val_length = self.bindings.iter().map(|(_, val)| val.len()).max().unwrap_or(0) as u16;

        // + column_spacing + margin*2 + border
        let width = key_length + val_length + self.column_spacing + (self.margin_horizontal * 2) + 2;
        // + margin*2 + header and its margin + border
        let height = self.bindings.len() as u16 + (self.margin_vertical * 2) + 2 + 2;
        (width, height)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (width, height) = self.size();
        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);

        let key_length = self.bindings.iter().map(|(key, _)| key.len()).max().unwrap_or(0) as u16;
        let rows: Vec<Row> = self.bindings.into_iter().map(|(key, val)| Row::new(vec![key, val])).collect();
        let table = Table::new(rows, [Constraint::Length(key_length), Constraint::Min(0)])
            .column_spacing(self.column_spacing)
            .header(Row::new(vec!["Key", "Action"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(self.title)
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(Padding::symmetric(self.margin_horizontal, self.margin_vertical)),
            );

        Clear.render(area, buf);
        table.render(area, buf);
    }
}
