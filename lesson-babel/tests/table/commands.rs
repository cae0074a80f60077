use lesson_babel::ir::nodes::*;
use lesson_babel::table::{CellRect, Slot, MAX_COLSPAN};
use lesson_babel::{parse_markdown, to_markdown, TableError};

fn table_of(md: &str) -> Table {
    let doc = parse_markdown(md).unwrap();
    match doc.children.into_iter().next() {
        Some(Block::Table(table)) => table,
        other => panic!("expected a table, got {other:?}"),
    }
}

fn reread(table: &Table) -> Table {
    let md = to_markdown(&Document::new(vec![Block::Table(table.clone())])).unwrap();
    table_of(&md)
}

fn cell_text(table: &Table, row: usize, index: usize) -> String {
    table.rows[row].cells[index]
        .content
        .iter()
        .filter_map(|block| match block {
            Block::Paragraph(p) => Some(p.plain_text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

const PERIODIC: &str = "<table>
<tr><th><p>Element</p></th><th><p>Symbol</p></th><th><p>Z</p></th></tr>
<tr><td><p>Hydrogen</p></td><td><p>H</p></td><td><p>1</p></td></tr>
<tr><td><p>Helium</p></td><td><p>He</p></td><td><p>2</p></td></tr>
</table>";

#[test]
fn test_insert_row_and_column() {
    let mut table = table_of(PERIODIC);
    table.insert_row_after(0).unwrap();
    table.insert_column_before(0).unwrap();

    let map = table.map();
    assert_eq!((map.width(), map.height()), (4, 4));
    assert!(map.is_complete());
    assert!(table.rows[0].cells[0].header, "new column inherits the header row");
    assert!(!table.rows[1].cells[1].header);
    assert_eq!(reread(&table), table);
}

#[test]
fn test_merge_then_split() {
    let mut table = table_of(PERIODIC);
    table.merge_cells(CellRect::new(1, 0, 2, 0)).unwrap();

    assert_eq!(table.rows[1].cells[0].rowspan, 2);
    assert_eq!(cell_text(&table, 1, 0), "Hydrogen/Helium");
    assert_eq!(table.map().slot(2, 0), Some(Slot::Merged { row: 1, col: 0 }));
    assert_eq!(reread(&table), table);

    table.split_cell(1, 0).unwrap();
    let map = table.map();
    assert!(map.is_complete());
    assert_eq!(table.rows[2].cells.len(), 3);
    assert_eq!(cell_text(&table, 2, 0), "");
}

#[test]
fn test_merge_refuses_partial_overlap() {
    let mut table = table_of(PERIODIC);
    table.merge_cells(CellRect::new(1, 0, 1, 1)).unwrap();
    assert_eq!(
        table.merge_cells(CellRect::new(1, 1, 2, 2)),
        Err(TableError::CutsMergedCell)
    );
}

#[test]
fn test_delete_through_merged_cell_shrinks_it() {
    let mut table = table_of(PERIODIC);
    table.merge_cells(CellRect::new(0, 0, 0, 2)).unwrap();
    table.delete_column(1).unwrap();
    assert_eq!(table.rows[0].cells[0].colspan, 2);
    assert_eq!(table.map().width(), 2);

    table.delete_row(0).unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(cell_text(&table, 0, 0), "Hydrogen");
}

#[test]
fn test_header_toggles() {
    let mut table = table_of(PERIODIC);
    table.toggle_header_row(0).unwrap();
    assert!(table.rows[0].cells.iter().all(|cell| !cell.header));

    table.toggle_header_column(0).unwrap();
    assert!(table.rows.iter().all(|row| row.cells[0].header));

    table.toggle_header_cell(2, 2).unwrap();
    assert!(table.rows[2].cells[2].header);
    assert_eq!(reread(&table), table);
}

#[test]
fn test_commands_report_bad_coordinates() {
    let mut table = table_of(PERIODIC);
    assert_eq!(
        table.insert_row_before(9),
        Err(TableError::OutOfBounds { row: 9, col: 0 })
    );
    assert_eq!(
        table.merge_cells(CellRect::new(0, 0, 0, 0)),
        Err(TableError::SingleCell)
    );
    assert!(matches!(
        table.split_cell(0, 0),
        Err(TableError::NotMerged { row: 0, col: 0 })
    ));

    let mut single = Table::new(1, 1, false);
    assert_eq!(single.delete_row(0), Err(TableError::WouldBeEmpty));
}

#[test]
fn test_oversized_colspan_is_capped() {
    let mut table = table_of(
        "<table>\n<tr><td colspan=\"18446744073709551615\"><p>wide</p></td><td><p>x</p></td></tr>\n</table>",
    );
    assert_eq!(table.rows[0].cells[0].colspan, MAX_COLSPAN);

    table.insert_row_after(0).unwrap();
    let map = table.map();
    assert_eq!((map.width(), map.height()), (MAX_COLSPAN + 1, 2));
    assert!(map.is_complete());
    assert_eq!(reread(&table), table);
}
