use movielist_core::{
    compare_by, decorate_cell_value, normalize_movies, reverse_order, sort_ascending, CellValue,
    Field, FieldCursor, MovieListError, MovieRecord, RawMovie, RawValue,
};

fn raw(id: RawValue, title: &str, year: RawValue, imdb: RawValue) -> RawMovie {
    RawMovie {
        id: Some(id),
        title: Some(title.to_string()),
        year: Some(year),
        imdb: Some(imdb),
    }
}

fn record(id: i64, title: &str, year: i64, imdb: f64) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_string(),
        year,
        imdb,
    }
}

#[test]
fn normalize_coerces_mixed_input() {
    let movies = normalize_movies(&[raw(
        RawValue::Text(" 22 ".to_string()),
        "Побег из Шоушенка",
        RawValue::Number(1994.0),
        RawValue::Text("9.3".to_string()),
    )])
    .expect("Không chuẩn hóa được bản ghi hợp lệ");

    assert_eq!(movies, vec![record(22, "Побег из Шоушенка", 1994, 9.3)]);
}

#[test]
fn normalize_accepts_integral_float_for_integer_fields() {
    let movies = normalize_movies(&[raw(
        RawValue::Number(7.0),
        "Список Шиндлера",
        RawValue::Text("1994.0".to_string()),
        RawValue::Number(8.9),
    )])
    .expect("Số thực tròn phải được chấp nhận cho trường nguyên");

    assert_eq!(movies[0].id, 7);
    assert_eq!(movies[0].year, 1994);
}

#[test]
fn normalize_rejects_non_integral_id() {
    let result = normalize_movies(&[raw(
        RawValue::Text("7.5".to_string()),
        "Hỏng",
        RawValue::Number(2000.0),
        RawValue::Number(8.0),
    )]);

    match result {
        Err(MovieListError::InvalidNumber { index, field, .. }) => {
            assert_eq!(index, 0);
            assert_eq!(field, Field::Id);
        }
        other => panic!("Mong lỗi InvalidNumber, nhận {other:?}"),
    }
}

#[test]
fn normalize_rejects_blank_text() {
    let result = normalize_movies(&[raw(
        RawValue::Number(1.0),
        "Hỏng",
        RawValue::Text("   ".to_string()),
        RawValue::Number(8.0),
    )]);

    assert!(matches!(
        result,
        Err(MovieListError::InvalidNumber {
            field: Field::Year,
            ..
        })
    ));
}

#[test]
fn normalize_rejects_non_finite_numbers() {
    let result = normalize_movies(&[raw(
        RawValue::Number(1.0),
        "Hỏng",
        RawValue::Number(2000.0),
        RawValue::Number(f64::NAN),
    )]);

    assert!(matches!(
        result,
        Err(MovieListError::InvalidNumber {
            field: Field::Imdb,
            ..
        })
    ));
}

#[test]
fn normalize_reports_missing_fields() {
    let result = normalize_movies(&[RawMovie {
        id: Some(RawValue::Number(1.0)),
        title: None,
        year: Some(RawValue::Number(2000.0)),
        imdb: Some(RawValue::Number(8.0)),
    }]);

    match result {
        Err(MovieListError::MissingField { index, field }) => {
            assert_eq!(index, 0);
            assert_eq!(field, Field::Title);
        }
        other => panic!("Mong lỗi MissingField, nhận {other:?}"),
    }
}

#[test]
fn sort_by_year_and_title_orders_records() {
    let records = vec![record(1, "B", 2000, 5.0), record(2, "A", 1990, 9.0)];

    let by_year = sort_ascending(&records, Field::Year);
    assert_eq!(by_year[0].id, 2);
    assert_eq!(by_year[1].id, 1);

    let by_title = sort_ascending(&records, Field::Title);
    assert_eq!(by_title[0].id, 2);
    assert_eq!(by_title[1].id, 1);
}

#[test]
fn title_comparison_folds_accented_yo() {
    let a = record(1, "Актёр", 2001, 7.0);
    let b = record(2, "Актер", 2002, 7.0);

    assert_eq!(compare_by(Field::Title, &a, &b), std::cmp::Ordering::Equal);

    // Khóa bằng nhau giữ nguyên thứ tự tương đối ban đầu.
    let sorted = sort_ascending(&[a, b], Field::Title);
    assert_eq!(sorted[0].id, 1);
    assert_eq!(sorted[1].id, 2);
}

#[test]
fn reversing_ascending_equals_descending_for_unique_keys() {
    let records = vec![
        record(3, "C", 2003, 7.3),
        record(1, "A", 2001, 7.1),
        record(2, "B", 2002, 7.2),
    ];

    let ascending = sort_ascending(&records, Field::Id);
    let reversed = reverse_order(&ascending);

    let ids: Vec<i64> = reversed.iter().map(|movie| movie.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn decoration_applies_only_to_numeric_columns() {
    assert_eq!(
        decorate_cell_value(Field::Year, &CellValue::Integer(1999)),
        "(1999)"
    );
    assert_eq!(
        decorate_cell_value(Field::Imdb, &CellValue::Float(7.5)),
        "7.50"
    );
    assert_eq!(decorate_cell_value(Field::Id, &CellValue::Integer(7)), "7");
    assert_eq!(
        decorate_cell_value(Field::Title, &CellValue::Text("(чистый)".to_string())),
        "(чистый)"
    );
    // Nhãn tiêu đề là chữ nên không bao giờ bị trang trí.
    assert_eq!(
        decorate_cell_value(Field::Year, &CellValue::Text("year".to_string())),
        "year"
    );
}

#[test]
fn cursor_wraps_after_four_columns() {
    let mut cursor = FieldCursor::default();
    let fields: Vec<Field> = (0..5).map(|_| cursor.advance()).collect();
    assert_eq!(
        fields,
        vec![
            Field::Id,
            Field::Title,
            Field::Year,
            Field::Imdb,
            Field::Id
        ]
    );
}
