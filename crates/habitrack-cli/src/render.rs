//! Plain-text rendering of the list and detail views.

use habitrack_core::view::{StripCell, TitleForm};
use habitrack_core::{DetailView, ListView, View};

const DONE: &str = "[x]";
const OPEN: &str = "[ ]";

fn cell(cell: &StripCell) -> &'static str {
    if cell.completed {
        DONE
    } else {
        OPEN
    }
}

fn form_lines(label: &str, form: &TitleForm, out: &mut Vec<String>) {
    if !form.open {
        return;
    }
    if form.initial.is_empty() {
        out.push(format!("{label}: title?"));
    } else {
        out.push(format!("{label}: title? (currently \"{}\")", form.initial));
    }
    if let Some(error) = &form.error {
        out.push(format!("  ! {error}"));
    }
}

pub fn list(view: &ListView) -> String {
    let mut out = vec!["My Habits".to_string()];

    let header: Vec<_> = view.window.iter().map(|d| d.month_day()).collect();
    out.push(format!("      {}", header.join(" ")));

    if view.cards.is_empty() {
        out.push("  (no habits yet, try `create <title>`)".to_string());
    }
    let width = view.cards.iter().map(|c| c.id.as_str().len()).max().unwrap_or(0);
    for card in &view.cards {
        let strip: Vec<_> = card.strip.iter().map(|c| format!(" {} ", cell(c))).collect();
        out.push(format!(
            "{:>width$}  {}  {}  -> {}",
            card.id.as_str(),
            strip.join(""),
            card.title,
            card.detail_route,
            width = width
        ));
    }

    form_lines("New habit", &view.create_form, &mut out);
    if let Some((id, form)) = &view.edit_dialog {
        form_lines(&format!("Edit habit {id}"), form, &mut out);
    }
    out.join("\n")
}

pub fn detail(view: &DetailView) -> String {
    match view {
        DetailView::NotFound { id } => {
            format!("Habit not found: {id}\n  (`back` returns to the list)")
        }
        DetailView::Found {
            id,
            title,
            strip,
            edit_dialog,
        } => {
            let mut out = vec![format!("Habit {id}: {title}")];
            let days: Vec<_> = strip
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}:{} {}", i + 1, c.day.month_day(), cell(c)))
                .collect();
            out.push(format!("  {}", days.join("  ")));
            form_lines("Edit habit", edit_dialog, &mut out);
            out.join("\n")
        }
    }
}

pub fn view(view: &View) -> String {
    match view {
        View::List(list_view) => list(list_view),
        View::Detail(detail_view) => detail(detail_view),
    }
}
