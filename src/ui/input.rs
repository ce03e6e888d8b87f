//! Line-oriented command parsing for the terminal surface.
//!
//! Each stdin line is one command. Commands map onto controller [`Event`]s;
//! `help` is handled by the surface itself.
//!
//! ```text
//! s <text>            search (debounced)       x | clear        clear search
//! c [category]        toggle category          f | filters      open filter editor
//! set <key> <value>   edit draft filter        apply | reset    commit | drop filters
//! close               close filter editor      unset <key>      remove one filter
//! more                next page                scroll <o> <c> <v>  report scroll
//! open <n>            open result n            loaded           image finished loading
//! download | share    transfer open image      back             close image
//! ok                  dismiss notice           q | quit         exit
//! ```

use crate::app::Event;
use crate::domain::{catalog, FilterKey, PixgridError, Result};
use std::time::Instant;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(Event),
    Help,
}

/// Help text printed for `help`.
pub const HELP: &str = "\
s <text>             search after a short pause
x | clear            clear the search
c [category]         toggle a category (no name clears it)
f | filters          open the filter editor
set <key> <value>    choose a filter value in the editor
apply | reset        apply or reset filters and close the editor
close                close the editor without applying
unset <key>          remove one active filter
more                 load the next page
scroll <offset> <content> <viewport>
                     report the scroll position
open <n>             open result n
loaded               mark the open image as loaded
download | share     save or share the open image
back                 close the image
ok                   dismiss the notice
q | quit             exit";

/// Parses one input line received at `now`.
///
/// # Errors
///
/// Returns [`PixgridError::Command`] for empty lines, unknown commands, and
/// missing or malformed arguments.
pub fn parse_command(line: &str, now: Instant) -> Result<Command> {
    let line = line.trim();
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(name, rest)| (name, rest.trim()));

    let event = match name.to_ascii_lowercase().as_str() {
        "" => return Err(PixgridError::Command("empty command".to_string())),
        "help" | "?" => return Ok(Command::Help),
        "s" | "search" => Event::SearchInput {
            text: rest.to_string(),
            at: now,
        },
        "x" | "clear" => Event::ClearSearch,
        "c" | "category" => Event::SelectCategory(parse_category(rest)?),
        "f" | "filters" => Event::OpenFilters,
        "close" => Event::CloseFilters,
        "set" => {
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| usage("set <key> <value>"))?;
            Event::EditFilter {
                key: key.parse()?,
                value: value.trim().to_string(),
            }
        }
        "apply" => Event::ApplyFilters,
        "reset" => Event::ResetFilters,
        "unset" => Event::ClearFilter(rest.parse::<FilterKey>()?),
        "more" => Event::LoadMore,
        "scroll" => parse_scroll(rest)?,
        "open" => Event::OpenImage(parse_position(rest)?),
        "loaded" => Event::ImageLoaded,
        "back" => Event::CloseImage,
        "download" => Event::DownloadImage,
        "share" => Event::ShareImage,
        "ok" => Event::DismissNotice,
        "q" | "quit" | "exit" => Event::Quit,
        other => return Err(PixgridError::Command(format!("unknown command: {other} (try 'help')"))),
    };

    Ok(Command::Event(event))
}

fn parse_category(name: &str) -> Result<Option<String>> {
    if name.is_empty() {
        return Ok(None);
    }
    catalog::find_category(name)
        .map(|category| Some(category.to_string()))
        .ok_or_else(|| PixgridError::Command(format!("unknown category: {name}")))
}

/// `open` takes the 1-based position shown in the grid.
fn parse_position(arg: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(usage("open <n>, n starting at 1")),
    }
}

fn parse_scroll(args: &str) -> Result<Event> {
    let numbers = args
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| usage("scroll <offset> <content> <viewport>"))?;

    match numbers.as_slice() {
        &[offset, content_height, viewport_height] => Ok(Event::Scrolled {
            offset,
            content_height,
            viewport_height,
        }),
        _ => Err(usage("scroll <offset> <content> <viewport>")),
    }
}

fn usage(form: &str) -> PixgridError {
    PixgridError::Command(format!("usage: {form}"))
}
