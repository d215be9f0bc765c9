use nailbook_core::session::Action;
use nailbook_discord_bot::keyboard::{self, Button, Keyboard, MAX_BUTTONS_PER_ROW, MAX_LABEL_CHARS};
use pretty_assertions::assert_eq;
use serenity::builder::CreateComponents;

fn buttons(count: usize) -> Vec<Button> {
    (0..count)
        .map(|i| Button::new(format!("b{i}"), Action::Book))
        .collect()
}

#[test]
fn grid_chunks_rows() {
    let keyboard = Keyboard::grid(buttons(7), 3);
    let sizes: Vec<usize> = keyboard.rows.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![3, 3, 1]);
}

#[test]
fn fitted_splits_wide_rows() {
    let keyboard = Keyboard::new().row(buttons(12));
    let sizes: Vec<usize> = keyboard.fitted().rows.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![5, 5, 2]);
}

#[test]
fn fitted_never_drops_rows() {
    let keyboard = Keyboard::column(buttons(8)).button(Button::new("Back", Action::ToMain));

    let fitted = keyboard.fitted();

    assert_eq!(fitted.rows.len(), 9);
    assert_eq!(fitted.buttons().count(), 9);
    assert!(!keyboard.fits());
}

#[test]
fn five_full_rows_fit() {
    let keyboard = Keyboard::grid(buttons(25), MAX_BUTTONS_PER_ROW);
    assert!(keyboard.fits());
    assert!(!keyboard.button(Button::new("Back", Action::ToMain)).fits());
}

#[test]
fn fitted_truncates_long_labels() {
    let keyboard = Keyboard::new().button(Button::new("x".repeat(120), Action::Book));

    let label = &keyboard.fitted().rows[0][0].label;

    assert_eq!(label.chars().count(), MAX_LABEL_CHARS);
    assert!(label.ends_with('…'));
}

#[test]
fn empty_rows_are_skipped() {
    let keyboard = Keyboard::new().row(Vec::new()).button(Button::new("Menu", Action::ToMain));
    assert_eq!(keyboard.rows.len(), 1);
    assert!(!keyboard.is_empty());
}

#[test]
fn render_writes_one_action_row_per_row() {
    let keyboard = Keyboard::grid(buttons(4), 2).button(Button::new("Back", Action::ToMain));
    let mut components = CreateComponents::default();

    keyboard::render(&keyboard, &mut components);

    assert_eq!(components.0.len(), 3);
    assert_eq!(components.0[2]["components"][0]["custom_id"], "to_main");
}
