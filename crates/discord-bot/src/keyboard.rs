//! Platform-neutral button layouts and their Discord rendering.
//!
//! Screens are built as rows of [`Button`]s whose identifiers are dialogue
//! [`Action`] tokens. Discord allows at most five action rows of five buttons
//! per message and 80 characters per label; [`Keyboard::fitted`] reshapes a
//! layout to those limits before it is rendered.

use nailbook_core::session::Action;
use serenity::{
    builder::CreateComponents, model::application::component::ButtonStyle,
};

pub const MAX_ROWS: usize = 5;
pub const MAX_BUTTONS_PER_ROW: usize = 5;
pub const MAX_LABEL_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Primary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
    pub tone: Tone,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
            tone: Tone::Neutral,
        }
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// One button per row.
    pub fn column(buttons: impl IntoIterator<Item = Button>) -> Self {
        Self {
            rows: buttons.into_iter().map(|button| vec![button]).collect(),
        }
    }

    /// Buttons laid out left to right, `per_row` at a time.
    pub fn grid(buttons: impl IntoIterator<Item = Button>, per_row: usize) -> Self {
        let buttons: Vec<Button> = buttons.into_iter().collect();
        Self {
            rows: buttons
                .chunks(per_row.max(1))
                .map(<[Button]>::to_vec)
                .collect(),
        }
    }

    pub fn row(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        let row: Vec<Button> = buttons.into_iter().collect();
        if !row.is_empty() {
            self.rows.push(row);
        }
        self
    }

    pub fn button(self, button: Button) -> Self {
        self.row([button])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Reshape to Discord's limits: long rows are split and labels
    /// truncated. Rows are never dropped; screens with more options than fit
    /// paginate instead, and [`Keyboard::fits`] reports whether they did.
    pub fn fitted(&self) -> Keyboard {
        Keyboard {
            rows: self
                .rows
                .iter()
                .flat_map(|row| row.chunks(MAX_BUTTONS_PER_ROW).map(<[Button]>::to_vec))
                .map(|row| row.into_iter().map(truncate_label).collect())
                .collect(),
        }
    }

    pub fn fits(&self) -> bool {
        self.fitted().rows.len() <= MAX_ROWS
    }
}

fn truncate_label(mut button: Button) -> Button {
    if button.label.chars().count() > MAX_LABEL_CHARS {
        let mut label: String = button.label.chars().take(MAX_LABEL_CHARS - 1).collect();
        label.push('…');
        button.label = label;
    }
    button
}

fn style(tone: Tone) -> ButtonStyle {
    match tone {
        Tone::Neutral => ButtonStyle::Secondary,
        Tone::Primary => ButtonStyle::Primary,
        Tone::Success => ButtonStyle::Success,
        Tone::Danger => ButtonStyle::Danger,
    }
}

/// Write `keyboard` into a serenity components builder.
pub fn render<'a>(keyboard: &Keyboard, components: &'a mut CreateComponents) -> &'a mut CreateComponents {
    for row in keyboard.fitted().rows {
        components.create_action_row(|action_row| {
            for button in &row {
                action_row.create_button(|b| {
                    b.custom_id(button.action.to_string())
                        .label(&button.label)
                        .style(style(button.tone))
                });
            }
            action_row
        });
    }
    components
}
