use std::io::{stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Color::DarkBlue;
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use command_runner_core::error::Result;
use command_runner_core::select::Picker;

use super::types::CycleDirection::{Down, Up};
use super::types::UiState;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Crossterm-backed single-select list.
pub struct QuickPick;

impl Picker for QuickPick {
    fn pick(&self, prompt: &str, items: &[String]) -> Result<Option<String>> {
        prompt_for_selection(prompt, items)
    }
}

fn filtered_indexes(items: &[String], filter_text: &str, matcher: &SkimMatcherV2) -> Vec<usize> {
    if filter_text.is_empty() {
        return (0..items.len()).collect();
    }

    let mut scored: Vec<(i64, usize)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            matcher
                .fuzzy_match(item, filter_text)
                .map(|score| (score, index))
        })
        .collect();

    // Best match first; equal scores keep list order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, index)| index).collect()
}

fn redraw(
    prompt: &str,
    state: &UiState,
    items: &[String],
    visible: &[usize],
    viewport_height: usize,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    let header = if state.filter_text.is_empty() {
        format!("{prompt}:")
    } else {
        format!("{prompt} (filter: {}):", state.filter_text)
    };
    queue!(
        stdout,
        SetAttribute(Attribute::Bold),
        Print(header),
        SetAttribute(Attribute::Reset),
        cursor::MoveToNextLine(1)
    )?;

    if visible.is_empty() {
        queue!(
            stdout,
            Print("No matching commands!".to_string()),
            cursor::MoveToNextLine(1)
        )?;
    }

    for (row, item_index) in visible
        .iter()
        .enumerate()
        .skip(state.offset)
        .take(viewport_height)
    {
        let is_selected = row == state.selected_index;
        if is_selected {
            queue!(stdout, SetBackgroundColor(DarkBlue))?;
        }

        queue!(
            stdout,
            Print(&items[*item_index]),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Runs the picker loop until the user selects an item or cancels.
pub fn prompt_for_selection(prompt: &str, items: &[String]) -> Result<Option<String>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let _guard = RawModeGuard;

    let matcher = SkimMatcherV2::default();
    let mut state = UiState::default();

    loop {
        let visible = filtered_indexes(items, &state.filter_text, &matcher);

        let (_, height) = terminal::size()?;
        let viewport_height = height.saturating_sub(1) as usize;
        state.clamp(visible.len(), viewport_height);

        redraw(prompt, &state, items, &visible, viewport_height)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            KeyCode::Enter => {
                return Ok(visible
                    .get(state.selected_index)
                    .map(|index| items[*index].clone()));
            }
            KeyCode::Up => state.cycle(Up, visible.len()),
            KeyCode::Down => state.cycle(Down, visible.len()),
            KeyCode::Backspace => {
                state.filter_text.pop();
                state.reset_selection();
            }
            KeyCode::Char(c) => {
                state.filter_text.push(c);
                state.reset_selection();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_filter_shows_everything_in_order() {
        let matcher = SkimMatcherV2::default();
        let items = items(&["build", "test", "lint"]);

        assert_eq!(filtered_indexes(&items, "", &matcher), vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_narrows_matches() {
        let matcher = SkimMatcherV2::default();
        let items = items(&["build", "test", "lint"]);

        let visible = filtered_indexes(&items, "bld", &matcher);
        assert_eq!(visible, vec![0]);
    }

    #[test]
    fn test_filter_without_matches_is_empty() {
        let matcher = SkimMatcherV2::default();
        let items = items(&["build", "test"]);

        assert!(filtered_indexes(&items, "zzz", &matcher).is_empty());
    }
}
