use std::rc::Rc;

use movielist_core::{
    sample_movies, CycleStep, Direction, Field, ListRenderer, MovieListError, MovieRecord,
    RenderTarget, SortCycle, StyleMap, TableBuilder, TableView, CYCLE_PERIOD, DESCEND_DELAY,
    PAGE_TITLE,
};

fn record(id: i64, title: &str, year: i64, imdb: f64) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_string(),
        year,
        imdb,
    }
}

/// Đích render ghi lại mọi thao tác, thay cho trang thật.
#[derive(Default)]
struct RecordingTarget {
    tables: Vec<TableView>,
    headings: Vec<String>,
    document_titles: Vec<String>,
}

impl RenderTarget for RecordingTarget {
    fn mount_table(&mut self, view: &TableView) -> Result<(), MovieListError> {
        self.tables.push(view.clone());
        Ok(())
    }

    fn set_heading(&mut self, text: &str) -> Result<(), MovieListError> {
        self.headings.push(text.to_string());
        Ok(())
    }

    fn set_document_title(&mut self, text: &str) -> Result<(), MovieListError> {
        self.document_titles.push(text.to_string());
        Ok(())
    }
}

/// Đích render mô phỏng trang thiếu phần tử `.welcome`.
struct MissingAnchorTarget;

impl RenderTarget for MissingAnchorTarget {
    fn mount_table(&mut self, _: &TableView) -> Result<(), MovieListError> {
        Ok(())
    }

    fn set_heading(&mut self, _: &str) -> Result<(), MovieListError> {
        Err(MovieListError::MissingAnchor {
            selector: ".welcome".to_string(),
        })
    }

    fn set_document_title(&mut self, _: &str) -> Result<(), MovieListError> {
        Ok(())
    }
}

#[test]
fn header_row_is_built_once_and_reused() {
    let mut builder = TableBuilder::new(StyleMap::default());
    let records = sample_movies();

    let first = builder.build(&records, None);
    let second = builder.build(&records, Some((Field::Id, Direction::Ascending)));

    assert!(Rc::ptr_eq(&first.header, &second.header));
}

#[test]
fn header_row_carries_its_own_labels_as_data() {
    let mut builder = TableBuilder::new(StyleMap::default());
    let view = builder.build(&sample_movies(), None);

    for (field, value) in &view.header.data {
        assert_eq!(value, field.as_str());
    }
    assert!(view
        .header
        .classes
        .contains(&StyleMap::default().headers));
}

#[test]
fn rows_keep_raw_values_next_to_decorated_text() {
    let mut builder = TableBuilder::new(StyleMap::default());
    let view = builder.build(&[record(22, "Побег из Шоушенка", 1994, 9.3)], None);

    let row = &view.rows[0];
    assert_eq!(
        row.data,
        vec![
            (Field::Id, "22".to_string()),
            (Field::Title, "Побег из Шоушенка".to_string()),
            (Field::Year, "1994".to_string()),
            (Field::Imdb, "9.3".to_string()),
        ]
    );

    let texts: Vec<&str> = row.cells.iter().map(|cell| cell.text.as_str()).collect();
    assert_eq!(texts, vec!["22", "Побег из Шоушенка", "(1994)", "9.30"]);
}

#[test]
fn cycle_alternates_ascending_and_reversal_per_column() {
    let mut cycle = SortCycle::new(vec![
        record(2, "B", 2002, 7.2),
        record(1, "A", 2001, 7.1),
    ]);
    assert_eq!(cycle.indicator(), None);

    let step = cycle.advance();
    assert_eq!(
        step,
        CycleStep {
            field: Field::Id,
            direction: Direction::Ascending,
            hold: DESCEND_DELAY,
        }
    );
    let ids: Vec<i64> = cycle.records().iter().map(|movie| movie.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(cycle.indicator(), Some((Field::Id, Direction::Ascending)));

    let step = cycle.advance();
    assert_eq!(step.field, Field::Id);
    assert_eq!(step.direction, Direction::Descending);
    assert_eq!(step.hold, CYCLE_PERIOD - DESCEND_DELAY);
    let ids: Vec<i64> = cycle.records().iter().map(|movie| movie.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(cycle.indicator(), Some((Field::Id, Direction::Descending)));

    // Sau cặp tăng/giảm, con trỏ chuyển sang cột kế tiếp.
    let step = cycle.advance();
    assert_eq!(step.field, Field::Title);
    assert_eq!(step.direction, Direction::Ascending);
}

#[test]
fn descending_reverses_current_order_not_a_fresh_sort() {
    // Hai bản ghi cùng năm: bước giảm dần phải đảo đúng dãy tăng dần, nên
    // cặp khóa bằng nhau cũng bị đảo chỗ.
    let mut cycle = SortCycle::new(vec![
        record(1, "A", 2000, 7.1),
        record(2, "B", 2000, 7.2),
        record(3, "C", 1990, 7.3),
    ]);

    cycle.advance();
    cycle.advance();
    cycle.advance();
    cycle.advance();
    let step = cycle.advance();
    assert_eq!(step.field, Field::Year);
    assert_eq!(step.direction, Direction::Ascending);
    let ascending: Vec<i64> = cycle.records().iter().map(|movie| movie.id).collect();

    cycle.advance();
    let descending: Vec<i64> = cycle.records().iter().map(|movie| movie.id).collect();
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

#[test]
fn renderer_mounts_and_titles_on_construction() {
    let renderer = ListRenderer::with_records(
        sample_movies(),
        StyleMap::default(),
        RecordingTarget::default(),
    )
    .expect("Không khởi tạo được renderer");

    let target = renderer.target();
    assert_eq!(target.tables.len(), 1);
    assert_eq!(target.tables[0].indicator, None);
    assert_eq!(target.headings, vec![PAGE_TITLE.to_string()]);
    assert_eq!(target.document_titles, vec![PAGE_TITLE.to_string()]);
}

#[test]
fn renderer_remounts_once_per_step_with_indicator_transitions() {
    let mut renderer = ListRenderer::with_records(
        sample_movies(),
        StyleMap::default(),
        RecordingTarget::default(),
    )
    .expect("Không khởi tạo được renderer");

    renderer.advance().expect("Bước tăng dần thất bại");
    renderer.advance().expect("Bước giảm dần thất bại");

    let target = renderer.target();
    assert_eq!(target.tables.len(), 3);
    assert_eq!(
        target.tables[1].indicator,
        Some((Field::Id, Direction::Ascending))
    );
    assert_eq!(
        target.tables[2].indicator,
        Some((Field::Id, Direction::Descending))
    );
    // Hàng tiêu đề là cùng một node qua mọi lần gắn.
    assert!(Rc::ptr_eq(&target.tables[0].header, &target.tables[2].header));
    // Tiêu đề trang chỉ ghi một lần lúc khởi tạo.
    assert_eq!(target.headings.len(), 1);
}

#[test]
fn missing_welcome_anchor_is_a_typed_error() {
    let result =
        ListRenderer::with_records(sample_movies(), StyleMap::default(), MissingAnchorTarget);

    match result {
        Err(MovieListError::MissingAnchor { selector }) => assert_eq!(selector, ".welcome"),
        _ => panic!("Mong lỗi MissingAnchor"),
    }
}

#[test]
fn text_rendering_marks_the_sorted_column() {
    let mut renderer = ListRenderer::with_records(
        vec![record(1, "A", 2001, 7.1), record(2, "B", 2002, 7.2)],
        StyleMap::default(),
        RecordingTarget::default(),
    )
    .expect("Không khởi tạo được renderer");

    renderer.advance().expect("Bước tăng dần thất bại");
    let text = renderer.target().tables.last().unwrap().to_text();

    let header_line = text.lines().next().unwrap();
    assert!(header_line.contains("id ^"));
    assert!(text.contains("(2001)"));
    assert!(text.contains("7.10"));
}
