// tests/table_export.rs
use pick_csv::config::consts::{BOM, DOWNLOAD_BTN_CLASS, INVERT_BTN_CLASS, TABLE_FILENAME};
use pick_csv::core::html::parse_document;
use pick_csv::csv::parse_rows;
use pick_csv::dom::NodeId;
use pick_csv::enhance::Download;
use pick_csv::page::Page;
use pick_csv::picker::PickKind;

fn enhanced(html: &str) -> (Page, NodeId) {
    let mut page = Page::new(parse_document(html));
    let t = page.candidates(PickKind::Table)[0];
    page.enhance(t, PickKind::Table).unwrap();
    (page, t)
}

fn button(page: &Page, t: NodeId, class: &str) -> NodeId {
    let panel = page.widget_for(t).unwrap().panel().unwrap();
    page.doc().find_first(panel, |el| el.has_class(class)).unwrap()
}

fn download(page: &mut Page, t: NodeId) -> Download {
    let b = button(page, t, DOWNLOAD_BTN_CLASS);
    page.click(b, 0);
    let mut got = page.take_downloads();
    assert_eq!(got.len(), 1);
    got.remove(0)
}

const THREE_ROWS: &str = r#"<table>
  <tr><th>Name</th><th>Age</th></tr>
  <tr><td>Ann</td><td>31</td></tr>
  <tr><td>Bob</td><td>42</td></tr>
</table>"#;

#[test]
fn all_checked_three_row_table() {
    let (mut page, t) = enhanced(THREE_ROWS);
    let sa = page.widget_for(t).unwrap().select_all().unwrap();
    page.click(sa, 0);

    let dl = download(&mut page, t);
    assert_eq!(dl.filename, TABLE_FILENAME);
    let text = dl.text();
    assert!(text.starts_with(BOM));

    let lines: Vec<&str> = text.trim_start_matches(BOM).split('\n').collect();
    assert_eq!(lines, vec![
        r#""✓","Name","Age""#,
        r#""✓","Ann","31""#,
        r#""✓","Bob","42""#,
    ]);
}

#[test]
fn unchecked_rows_have_empty_first_field() {
    let (mut page, t) = enhanced(THREE_ROWS);
    let bob = page.widget_for(t).unwrap().checkboxes()[1];
    page.click(bob, 0);

    let rows = parse_rows(&download(&mut page, t).text());
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == 3));
    assert_eq!(rows[0][0], "");
    assert_eq!(rows[1][0], "");
    assert_eq!(rows[2][0], "✓");
}

#[test]
fn select_all_sets_rows_and_reflects_them() {
    let (mut page, t) = enhanced(THREE_ROWS);
    let w = page.widget_for(t).unwrap().clone();
    let sa = w.select_all().unwrap();
    let rows = w.checkboxes().to_vec();

    page.click(sa, 0);
    assert!(rows.iter().all(|&cb| page.doc().checked(cb)));

    // one row off → partial
    page.click(rows[0], 1);
    assert!(!page.doc().checked(sa));
    assert!(page.doc().indeterminate(sa));

    // back on → full
    page.click(rows[0], 2);
    assert!(page.doc().checked(sa));
    assert!(!page.doc().indeterminate(sa));

    // select-all off clears everything
    page.click(sa, 3);
    assert!(rows.iter().all(|&cb| !page.doc().checked(cb)));
    assert!(!page.doc().indeterminate(sa));
}

#[test]
fn invert_twice_is_identity() {
    let (mut page, t) = enhanced(THREE_ROWS);
    let w = page.widget_for(t).unwrap().clone();
    let sa = w.select_all().unwrap();
    let rows = w.checkboxes().to_vec();
    let invert = button(&page, t, INVERT_BTN_CLASS);

    page.click(rows[1], 0);
    page.click(invert, 1);
    assert!(page.doc().checked(rows[0]));
    assert!(!page.doc().checked(rows[1]));
    assert!(page.doc().indeterminate(sa));

    page.click(invert, 2);
    assert!(!page.doc().checked(rows[0]));
    assert!(page.doc().checked(rows[1]));
    assert!(page.take_downloads().is_empty());
}

#[test]
fn rows_added_later_export_with_placeholder() {
    let (mut page, t) = enhanced(THREE_ROWS);
    let sa = page.widget_for(t).unwrap().select_all().unwrap();
    page.click(sa, 0);

    // a row appended after enhancement has no selection control
    let first_row = page.doc().find_first(t, |el| el.tag() == "tr").unwrap();
    let section = page.doc().parent(first_row).unwrap();
    let doc = page.doc_mut();
    let tr = doc.create_element("tr");
    for text in ["Cy", "7"] {
        let td = doc.create_element("td");
        let txt = doc.create_text(text);
        doc.append_child(td, txt);
        doc.append_child(tr, td);
    }
    doc.append_child(section, tr);

    let rows = parse_rows(&download(&mut page, t).text());
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3], vec!["Selected".to_string(), "Cy".into(), "7".into()]);
    assert_eq!(rows[2][0], "✓");
}

#[test]
fn commas_quotes_and_whitespace_in_cells() {
    let (mut page, t) = enhanced(
        r#"<table><tr><th>Who</th><th>Quote</th><th>Note</th></tr>
           <tr><td>Smith, John</td><td>say "hi"</td><td>
             multi
             line </td></tr></table>"#,
    );
    let row = page.widget_for(t).unwrap().checkboxes()[0];
    page.click(row, 0);
    let text = download(&mut page, t).text();
    let lines: Vec<&str> = text.trim_start_matches(BOM).split('\n').collect();
    assert_eq!(lines[0], r#""✓","Who","Quote","Note""#);
    assert_eq!(lines[1], r#""✓","Smith; John","say ""hi""","multi line""#);
}

#[test]
fn style_and_boilerplate_text_is_dropped() {
    let (mut page, t) = enhanced(
        r#"<table><tr><td>Paris<style>.a{}</style></td>
           <td><div class="mw-parser-output">junk</div>kept</td></tr></table>"#,
    );
    let rows = parse_rows(&download(&mut page, t).text());
    assert_eq!(rows, vec![vec!["".to_string(), "Paris".into(), "kept".into()]]);
}
