//! Plain-text rendering of the view model.
//!
//! The renderer turns a [`UIViewModel`] into a block of text the terminal
//! binary prints after every change. Layout, top to bottom: notice, header,
//! search bar, category chips, filter chips, then either the detail view, the
//! filter editor, or the grid, and finally the footer.
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::AppState;
//! use pixgrid::app::debounce::SEARCH_DEBOUNCE;
//! use pixgrid::ui::render;
//!
//! let state = AppState::new(SEARCH_DEBOUNCE);
//! let text = render(&state, 80);
//! assert!(text.contains("Pixels"));
//! ```

use crate::app::AppState;
use crate::platform::Notice;
use crate::ui::viewmodel::{DetailInfo, FilterPanelInfo, GridInfo, UIViewModel};

/// Renders `state` for a surface `cols` columns wide.
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(cols);
    render_viewmodel(&viewmodel, cols)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, cols: usize) -> String {
    let cols = cols.max(20);
    let mut out = String::new();

    if let Some(notice) = &vm.notice {
        line(&mut out, &render_notice(notice));
    }

    line(&mut out, &centered(&vm.header.title, cols, '='));

    let clear = if vm.search_bar.show_clear { "  (x: clear)" } else { "" };
    line(&mut out, &format!("Search: [{}]{clear}", vm.search_bar.query));

    let chips: Vec<String> = vm
        .categories
        .iter()
        .map(|c| if c.is_active { format!("[{}]", c.name) } else { c.name.to_string() })
        .collect();
    for wrapped in wrap(&chips, cols, "Categories: ") {
        line(&mut out, &wrapped);
    }

    if !vm.filter_chips.is_empty() {
        let chips: Vec<String> = vm.filter_chips.iter().map(|c| format!("{}={} (x)", c.key, c.value)).collect();
        line(&mut out, &fit(&format!("Filters: {}", chips.join("  ")), cols));
    }

    line(&mut out, &"-".repeat(cols));

    if let Some(detail) = &vm.detail {
        render_detail(&mut out, detail, cols);
    } else if let Some(panel) = &vm.filter_panel {
        render_filter_panel(&mut out, panel, cols);
    } else if let Some(empty) = &vm.empty_state {
        line(&mut out, &centered(&empty.message, cols, ' '));
        line(&mut out, &centered(&empty.subtitle, cols, ' '));
    } else {
        render_grid(&mut out, &vm.grid, cols);
    }

    line(&mut out, &"-".repeat(cols));
    line(&mut out, &centered(&vm.footer.keybindings, cols, ' '));
    out
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Toast(message) => format!("* {message}"),
        Notice::Alert { title, message } => format!("! {title}: {message}  (ok: dismiss)"),
    }
}

/// Cells are laid out row by row across the masonry columns.
fn render_grid(out: &mut String, grid: &GridInfo, cols: usize) {
    let columns = grid.columns.len().max(1);
    let width = cols / columns;
    let rows = grid.columns.iter().map(Vec::len).max().unwrap_or(0);

    for row in 0..rows {
        let mut text = String::new();
        for column in &grid.columns {
            let cell = column
                .get(row)
                .map(|c| format!("{:>3} {} ({}h)", c.position, c.label, c.height))
                .unwrap_or_default();
            text.push_str(&pad(&fit(&cell, width.saturating_sub(1)), width));
        }
        line(out, text.trim_end());
    }
}

fn render_filter_panel(out: &mut String, panel: &FilterPanelInfo, cols: usize) {
    line(out, "Filters");
    for section in &panel.sections {
        let options: Vec<String> = section
            .options
            .iter()
            .map(|o| if o.is_selected { format!("[{}]", o.value) } else { o.value.to_string() })
            .collect();
        let label = format!("  {:<12}", section.key.as_str());
        for wrapped in wrap(&options, cols, &label) {
            line(out, &wrapped);
        }
    }
}

fn render_detail(out: &mut String, detail: &DetailInfo, cols: usize) {
    let status = if detail.status.is_empty() {
        String::new()
    } else {
        format!("  [{}]", detail.status)
    };
    line(out, &fit(&format!("{}{status}", detail.file_name), cols));
    line(out, &fit(&detail.url, cols));
    line(out, &format!("{} x {}", detail.width, detail.height));
    if !detail.tags.is_empty() {
        line(out, &fit(&format!("Tags: {}", detail.tags), cols));
    }
    if !detail.user.is_empty() {
        line(out, &fit(&format!("By: {}", detail.user), cols));
    }
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

/// Truncates to `width` characters, ending with "..." when cut.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(&".".repeat(width.min(3)));
    cut
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn centered(text: &str, cols: usize, fill: char) -> String {
    let text = fit(text, cols);
    let len = text.chars().count();
    let left = (cols - len) / 2;
    let right = cols - len - left;
    let fill = fill.to_string();
    let line = format!("{}{text}{}", fill.repeat(left), fill.repeat(right));
    line.trim_end().to_string()
}

/// Joins `items` with spaces into lines no wider than `cols`, first line prefixed.
fn wrap(items: &[String], cols: usize, prefix: &str) -> Vec<String> {
    let indent = " ".repeat(prefix.chars().count());
    let mut lines = Vec::new();
    let mut current = prefix.to_string();
    let mut has_items = false;

    for item in items {
        let needed = current.chars().count() + usize::from(has_items) + item.chars().count();
        if has_items && needed > cols {
            lines.push(current);
            current = indent.clone();
            has_items = false;
        }
        if has_items {
            current.push(' ');
        }
        current.push_str(item);
        has_items = true;
    }

    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchOutcome;
    use crate::app::debounce::SEARCH_DEBOUNCE;
    use crate::domain::{FilterKey, ImageHit};

    fn hit(id: u64, tags: &str) -> ImageHit {
        ImageHit {
            id,
            preview_url: format!("https://cdn.example/{id}_150.jpg"),
            webformat_url: format!("https://cdn.example/{id}_640.jpg"),
            large_image_url: String::new(),
            image_width: 640,
            image_height: 427,
            tags: tags.to_string(),
            user: "someone".to_string(),
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(SEARCH_DEBOUNCE);
        let request = state.initialize();
        state.complete_fetch(
            request.ticket,
            FetchOutcome::Success(vec![hit(1, "sunset, sea"), hit(2, "dog"), hit(3, "forest")]),
        );
        state
    }

    #[test]
    fn fit_truncates_with_ellipsis() {
        assert_eq!(fit("abcdef", 10), "abcdef");
        assert_eq!(fit("abcdefghijkl", 8), "abcde...");
        assert_eq!(fit("äöüäöü", 4), "ä...");
    }

    #[test]
    fn wrap_breaks_on_width() {
        let items: Vec<String> = ["alpha", "beta", "gamma"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(wrap(&items, 16, "C: "), vec!["C: alpha beta", "   gamma"]);
        assert_eq!(wrap(&[], 16, "C: "), vec!["C: "]);
    }

    #[test]
    fn grid_lists_every_result_with_position() {
        let text = render(&loaded(), 80);
        assert!(text.contains("Pixels (3 images, page 1)"));
        assert!(text.contains("1 sunset"));
        assert!(text.contains("2 dog"));
        assert!(text.contains("3 forest"));
    }

    #[test]
    fn active_category_and_filters_are_marked() {
        let mut state = loaded();
        state.set_category(Some("nature"));
        state.open_filters();
        state.edit_filter(FilterKey::Order, "latest").unwrap();
        state.apply_filters();

        let text = render(&state, 100);
        assert!(text.contains("[nature]"));
        assert!(text.contains("Filters: order=latest (x)"));
        assert!(text.contains("No images"));
    }

    #[test]
    fn filter_panel_marks_draft_selection() {
        let mut state = loaded();
        state.open_filters();
        state.edit_filter(FilterKey::Colors, "blue").unwrap();

        let text = render(&state, 120);
        assert!(text.contains("[blue]"));
        assert!(text.contains("orientation"));
    }

    #[test]
    fn detail_and_alert_render() {
        let mut state = loaded();
        state.open_image(1).unwrap();
        state.notice = Some(Notice::alert("Image", "connection reset"));

        let text = render(&state, 80);
        assert!(text.starts_with("! Image: connection reset"));
        assert!(text.contains("2_150.jpg  [loading]"));
        assert!(text.contains("By: someone"));
        assert!(!text.contains("1 sunset"));
    }
}
