// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::{
    config::{consts::{DOWNLOAD_BTN_CLASS, INVERT_BTN_CLASS}, options::ExportOptions},
    core::{html::read_document, sanitize::normalize_ws},
    dom::NodeId,
    enhance::{list, table, visible_text},
    file,
    message::Command,
    page::Page,
    picker::PickKind,
};

const PREVIEW_CHARS: usize = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectSpec {
    None,
    All,
    /// 1-based row/item numbers, sorted and deduplicated.
    Ids(Vec<usize>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub html: PathBuf,
    pub kind: PickKind,
    pub index: usize,
    pub select: SelectSpec,
    pub invert: bool,
    pub out: Option<String>,
    pub candidates: bool,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_args(env::args().skip(1))?;
    if let Some(path) = run_with(&params)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Load, pick, tick, export. Returns the saved file (None for `--candidates`).
pub fn run_with(params: &Params) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let doc = read_document(&params.html)?;
    let mut page = Page::new(doc);

    if params.candidates {
        for line in describe_candidates(&page) {
            println!("{line}");
        }
        return Ok(None);
    }

    let targets = page.candidates(params.kind);
    let target = *targets.get(params.index).ok_or_else(|| {
        format!("No {} #{} on the page (found {})", params.kind.label(), params.index, targets.len())
    })?;

    // The host clock only has to move forward.
    let mut clock = 0u64;
    let mut tick = || { clock += 1; clock };

    page.handle_command(Command::StartPicking { element_type: params.kind });
    page.pointer_over(target, tick());
    page.click(target, tick());
    for msg in page.take_outbox() {
        logd!("CLI: Outbound {}", msg.to_json());
    }

    let widget = page
        .widget_for(target)
        .cloned()
        .ok_or("Element could not be enhanced (already enhanced or empty)")?;

    let wanted: Vec<NodeId> = match &params.select {
        SelectSpec::None => Vec::new(),
        SelectSpec::All => widget.checkboxes().to_vec(),
        SelectSpec::Ids(ids) => {
            let mut v = Vec::with_capacity(ids.len());
            for &id in ids {
                match id.checked_sub(1).and_then(|ix| widget.checkboxes().get(ix)) {
                    Some(&cb) => v.push(cb),
                    None => eprintln!("Warning: no row/item {} (have {})", id, widget.checkboxes().len()),
                }
            }
            v
        }
    };
    for cb in wanted {
        if !page.doc().checked(cb) {
            page.click(cb, tick());
        }
    }

    if params.invert {
        match panel_button(&page, widget.panel(), INVERT_BTN_CLASS) {
            Some(btn) => { page.click(btn, tick()); }
            None => return Err("Control panel is missing (invert)".into()),
        }
    }

    let Some(btn) = panel_button(&page, widget.panel(), DOWNLOAD_BTN_CLASS) else {
        return Err("Control panel is missing (download)".into());
    };
    page.click(btn, tick());
    let download = page.take_downloads().into_iter().next().ok_or("Export produced no file")?;

    let mut export = ExportOptions::default();
    if let Some(out) = &params.out {
        export.set_out_dir(out);
    }
    let path = file::save_download(&export, &download)?;
    logf!("CLI: {} #{} selected={} → {}",
        params.kind.label(), params.index, widget.selected_count(page.doc()), path.display());
    Ok(Some(path))
}

fn panel_button(page: &Page, panel: Option<NodeId>, class: &str) -> Option<NodeId> {
    page.doc().find_first(panel?, |el| el.has_class(class))
}

/// One line per pickable element: kind, index, size, text preview.
pub fn describe_candidates(page: &Page) -> Vec<String> {
    let doc = page.doc();
    let mut out = Vec::new();
    for kind in [PickKind::Table, PickKind::List] {
        for (i, node) in page.candidates(kind).into_iter().enumerate() {
            let (count, unit) = match kind {
                PickKind::Table => (table::rows(doc, node).len(), "rows"),
                PickKind::List => (list::items(doc, node).len(), "items"),
            };
            let text = normalize_ws(&visible_text(doc, node));
            let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
            if text.chars().count() > PREVIEW_CHARS { preview.push('…'); }
            out.push(format!("{} #{}: {} {} | {}", kind.label(), i, count, unit, preview));
        }
    }
    out
}

pub fn parse_args<I>(args: I) -> Result<Params, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut html: Option<PathBuf> = None;
    let mut params = Params {
        html: PathBuf::new(),
        kind: PickKind::Table,
        index: 0,
        select: SelectSpec::None,
        invert: false,
        out: None,
        candidates: false,
    };

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--candidates" => params.candidates = true,
            "--pick" => {
                let v = args.next().ok_or("Missing value for --pick")?;
                params.kind = match v.to_ascii_lowercase().as_str() {
                    "table" => PickKind::Table,
                    "list" => PickKind::List,
                    other => return Err(format!("Unknown element type: {}", other).into()),
                };
            }
            "--index" => params.index = args.next().ok_or("Missing value for --index")?.parse()?,
            "--select" => {
                let v = args.next().ok_or("Missing value for --select")?;
                params.select = match v.to_ascii_lowercase().as_str() {
                    "all" => SelectSpec::All,
                    "none" => SelectSpec::None,
                    _ => SelectSpec::Ids(parse_ids_list(&v)?),
                };
            }
            "--invert" => params.invert = true,
            "-o" | "--out" => params.out = Some(args.next().ok_or("Missing output directory")?),
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            s if s.starts_with('-') => return Err(format!("Unknown arg: {}", a).into()),
            _ if html.is_none() => html = Some(PathBuf::from(&a)),
            _ => return Err(format!("Unexpected extra argument: {}", a).into()),
        }
    }

    params.html = html.ok_or("Missing HTML file (see --help)")?;
    Ok(params)
}

/// "1,3-5" → [1, 3, 4, 5]. Numbers are 1-based; 0 is rejected.
pub fn parse_ids_list(s: &str) -> Result<Vec<usize>, Box<dyn Error>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some(dash) = part.find('-') {
            let a: usize = part[..dash].trim().parse()?;
            let b: usize = part[dash + 1..].trim().parse()?;
            if a == 0 || a > b { return Err(format!("Invalid range: {}", part).into()); }
            out.extend(a..=b);
        } else {
            let v: usize = part.parse()?;
            if v == 0 { return Err(s!("Row numbers start at 1").into()); }
            out.push(v);
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s!(*s)).collect()
    }

    #[test]
    fn ids_list_expands_ranges() {
        assert_eq!(parse_ids_list("3-5, 1,4").unwrap(), vec![1, 3, 4, 5]);
        assert!(parse_ids_list("0").is_err());
        assert!(parse_ids_list("5-3").is_err());
        assert!(parse_ids_list("x").is_err());
    }

    #[test]
    fn parse_full_command_line() {
        let p = parse_args(args(&["page.html", "--pick", "list", "--index", "2",
            "--select", "1-2", "--invert", "-o", "out"])).unwrap();
        assert_eq!(p.html, PathBuf::from("page.html"));
        assert_eq!(p.kind, PickKind::List);
        assert_eq!(p.index, 2);
        assert_eq!(p.select, SelectSpec::Ids(vec![1, 2]));
        assert!(p.invert);
        assert_eq!(p.out.as_deref(), Some("out"));
    }

    #[test]
    fn missing_file_and_unknown_flags_fail() {
        assert!(parse_args(args(&["--pick", "table"])).is_err());
        assert!(parse_args(args(&["a.html", "--frobnicate"])).is_err());
        assert!(parse_args(args(&["a.html", "--pick", "div"])).is_err());
    }
}
