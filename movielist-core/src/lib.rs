//! Logic lõi của widget danh sách phim: chuẩn hóa dữ liệu, dựng bảng và chu
//! kỳ sắp xếp chạy bằng tick.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Các cột cố định của bảng phim, theo đúng thứ tự hàng tiêu đề.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Title,
    Year,
    Imdb,
}

impl Field {
    /// Thứ tự tiêu đề cố định: `id, title, year, imdb`.
    pub const ALL: [Field; 4] = [Field::Id, Field::Title, Field::Year, Field::Imdb];

    /// Tên trường, dùng làm nhãn tiêu đề và khóa dataset.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Year => "year",
            Field::Imdb => "imdb",
        }
    }

    /// Tra cứu cột theo tên trường.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Con trỏ cột của chu kỳ sắp xếp, quay vòng trên danh sách tiêu đề cố định.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCursor {
    index: usize,
}

impl FieldCursor {
    /// Trả về cột hiện tại rồi dịch con trỏ sang cột kế tiếp (quay vòng).
    pub fn advance(&mut self) -> Field {
        let field = Field::ALL[self.index];
        self.index = if self.index + 1 == Field::ALL.len() {
            0
        } else {
            self.index + 1
        };
        field
    }
}

/// Chiều sắp xếp của một bước trong chu kỳ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

/// Bản ghi phim đã chuẩn hóa.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    /// Mã định danh.
    pub id: i64,
    /// Tựa phim, giữ nguyên như đầu vào.
    pub title: String,
    /// Năm sản xuất.
    pub year: i64,
    /// Điểm IMDB.
    pub imdb: f64,
}

/// Giá trị đầu vào lỏng: chấp nhận cả số JSON lẫn chuỗi.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// Bản ghi phim thô trước khi chuẩn hóa; trường nào cũng có thể vắng.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawMovie {
    #[serde(default)]
    pub id: Option<RawValue>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<RawValue>,
    #[serde(default)]
    pub imdb: Option<RawValue>,
}

/// Chuẩn hóa danh sách bản ghi thô về `MovieRecord`.
///
/// `id`, `year`, `imdb` được ép về dạng số: chuỗi được trim trước khi parse,
/// trường nguyên chấp nhận số thực tròn như `"1994.0"`; `title` giữ nguyên.
/// Ép kiểu thất bại trả về lỗi có kiểu kèm vị trí bản ghi thay vì lặng lẽ
/// sinh `NaN`.
pub fn normalize_movies(raw: &[RawMovie]) -> Result<Vec<MovieRecord>, MovieListError> {
    raw.iter()
        .enumerate()
        .map(|(index, movie)| normalize_movie(index, movie))
        .collect()
}

fn normalize_movie(index: usize, raw: &RawMovie) -> Result<MovieRecord, MovieListError> {
    let id = coerce_integer(index, Field::Id, raw.id.as_ref())?;
    let title = raw
        .title
        .clone()
        .ok_or(MovieListError::MissingField {
            index,
            field: Field::Title,
        })?;
    let year = coerce_integer(index, Field::Year, raw.year.as_ref())?;
    let imdb = coerce_float(index, Field::Imdb, raw.imdb.as_ref())?;

    Ok(MovieRecord {
        id,
        title,
        year,
        imdb,
    })
}

fn coerce_float(
    index: usize,
    field: Field,
    value: Option<&RawValue>,
) -> Result<f64, MovieListError> {
    let value = value.ok_or(MovieListError::MissingField { index, field })?;

    let number = match value {
        RawValue::Number(number) => *number,
        RawValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(invalid_number(index, field, text));
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| invalid_number(index, field, text))?
        }
    };

    if number.is_finite() {
        Ok(number)
    } else {
        Err(invalid_number(index, field, &number.to_string()))
    }
}

fn coerce_integer(
    index: usize,
    field: Field,
    value: Option<&RawValue>,
) -> Result<i64, MovieListError> {
    let number = coerce_float(index, field, value)?;
    if number.fract() == 0.0 && number >= i64::MIN as f64 && number <= i64::MAX as f64 {
        Ok(number as i64)
    } else {
        Err(invalid_number(index, field, &number.to_string()))
    }
}

fn invalid_number(index: usize, field: Field, value: &str) -> MovieListError {
    MovieListError::InvalidNumber {
        index,
        field,
        value: value.to_string(),
    }
}

/// Bảng ánh xạ khóa ngữ nghĩa sang tên lớp CSS cụ thể.
///
/// Trang chủ quản truyền vào khi khởi tạo; widget chỉ đọc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleMap {
    pub table: String,
    pub row: String,
    pub headers: String,
    pub cell: String,
    pub up: String,
    pub down: String,
    pub id: String,
    pub title: String,
    pub year: String,
    pub imdb: String,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self {
            table: "movielist-table".to_string(),
            row: "movielist-row".to_string(),
            headers: "movielist-headers".to_string(),
            cell: "movielist-cell".to_string(),
            up: "movielist-up".to_string(),
            down: "movielist-down".to_string(),
            id: "movielist-id".to_string(),
            title: "movielist-title".to_string(),
            year: "movielist-year".to_string(),
            imdb: "movielist-imdb".to_string(),
        }
    }
}

impl StyleMap {
    /// Tên lớp cho ô thuộc một cột.
    pub fn field_class(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Title => &self.title,
            Field::Year => &self.year,
            Field::Imdb => &self.imdb,
        }
    }

    /// Tên lớp đánh dấu chiều sắp xếp trên ô tiêu đề.
    pub fn indicator_class(&self, direction: Direction) -> &str {
        match direction {
            Direction::Ascending => &self.up,
            Direction::Descending => &self.down,
        }
    }
}

/// Thay mọi ký tự `ё` bằng `е` trước khi so sánh tựa phim.
///
/// Quy tắc gộp duy nhất của widget; chữ hoa `Ё` giữ nguyên.
pub fn fold_title(title: &str) -> String {
    title.replace('ё', "е")
}

/// So sánh hai bản ghi theo một cột; luôn là thứ tự toàn phần.
pub fn compare_by(field: Field, a: &MovieRecord, b: &MovieRecord) -> Ordering {
    match field {
        Field::Id => a.id.cmp(&b.id),
        Field::Title => fold_title(&a.title).cmp(&fold_title(&b.title)),
        Field::Year => a.year.cmp(&b.year),
        Field::Imdb => a.imdb.total_cmp(&b.imdb),
    }
}

/// Sắp xếp tăng dần theo cột, trả về dãy mới; khóa bằng nhau giữ nguyên thứ
/// tự tương đối ban đầu.
pub fn sort_ascending(records: &[MovieRecord], field: Field) -> Vec<MovieRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_by(field, a, b));
    sorted
}

/// Đảo ngược dãy hiện tại, cũng chính là bước "giảm dần" của chu kỳ.
pub fn reverse_order(records: &[MovieRecord]) -> Vec<MovieRecord> {
    records.iter().rev().cloned().collect()
}

/// Giá trị một ô trước khi trang trí.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl CellValue {
    /// Dạng chuỗi thô chưa trang trí, ghi vào thuộc tính dataset của hàng.
    pub fn raw_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Float(value) => value.to_string(),
        }
    }

    fn numeric(&self) -> Option<f64> {
        match self {
            CellValue::Text(_) => None,
            CellValue::Integer(value) => Some(*value as f64),
            CellValue::Float(value) => Some(*value),
        }
    }
}

/// Trang trí giá trị ô theo cột, chỉ áp dụng cho giá trị số.
///
/// `year` bọc trong ngoặc tròn, `imdb` làm tròn hai chữ số thập phân, số ở
/// cột khác giữ dạng mặc định; `title` không bao giờ được trang trí.
pub fn decorate_cell_value(field: Field, value: &CellValue) -> String {
    let Some(number) = value.numeric() else {
        return value.raw_text();
    };

    match field {
        Field::Year => format!("({})", value.raw_text()),
        Field::Imdb => format!("{number:.2}"),
        _ => value.raw_text(),
    }
}

/// Một ô trong cây bảng.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    /// Các lớp CSS của ô: lớp `cell` cộng lớp theo cột.
    pub classes: Vec<String>,
    /// Cột của ô; tầng DOM dựa vào đây để bắt ô tiêu đề khi gắn mũi tên.
    pub field: Field,
    /// Chữ hiển thị sau trang trí.
    pub text: String,
}

/// Một hàng trong cây bảng.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub classes: Vec<String>,
    pub cells: Vec<CellView>,
    /// Thuộc tính dataset của hàng: tên trường -> giá trị thô.
    pub data: Vec<(Field, String)>,
}

/// Cây bảng dựng lại từ đầu sau mỗi lần render.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Lớp CSS của khối bao ngoài.
    pub class: String,
    /// Hàng tiêu đề dùng chung giữa các lần dựng, so sánh được bằng con trỏ.
    pub header: Rc<RowView>,
    pub rows: Vec<RowView>,
    /// Cột và chiều đang được đánh dấu mũi tên trên hàng tiêu đề.
    pub indicator: Option<(Field, Direction)>,
}

impl TableView {
    /// Kết xuất dạng chữ thuần cho demo CLI.
    ///
    /// Cột đang sắp xếp được đánh dấu `^` (tăng dần) hoặc `v` (giảm dần)
    /// ngay sau nhãn tiêu đề.
    pub fn to_text(&self) -> String {
        let header_labels: Vec<String> = self
            .header
            .cells
            .iter()
            .map(|cell| match self.indicator {
                Some((field, direction)) if field == cell.field => {
                    let mark = match direction {
                        Direction::Ascending => '^',
                        Direction::Descending => 'v',
                    };
                    format!("{} {mark}", cell.text)
                }
                _ => cell.text.clone(),
            })
            .collect();

        let mut widths: Vec<usize> = header_labels
            .iter()
            .map(|label| label.chars().count())
            .collect();
        for row in &self.rows {
            for (column, cell) in row.cells.iter().enumerate() {
                widths[column] = widths[column].max(cell.text.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_text_line(&header_labels, &widths));
        for row in &self.rows {
            let texts: Vec<String> = row.cells.iter().map(|cell| cell.text.clone()).collect();
            lines.push(render_text_line(&texts, &widths));
        }
        lines.join("\n")
    }
}

fn render_text_line(texts: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (column, text) in texts.iter().enumerate() {
        if column > 0 {
            line.push_str("  ");
        }
        line.push_str(text);
        let pad = widths[column].saturating_sub(text.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    line.trim_end().to_string()
}

/// Dựng `TableView` từ dãy bản ghi, giữ lại hàng tiêu đề giữa các lần dựng.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    styles: StyleMap,
    header: Option<Rc<RowView>>,
}

impl TableBuilder {
    pub fn new(styles: StyleMap) -> Self {
        Self {
            styles,
            header: None,
        }
    }

    /// Bảng ánh xạ kiểu đang dùng.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Dựng cây bảng mới: hàng tiêu đề dùng lại nếu đã có, mỗi bản ghi một
    /// hàng.
    pub fn build(
        &mut self,
        records: &[MovieRecord],
        indicator: Option<(Field, Direction)>,
    ) -> TableView {
        let header = match &self.header {
            Some(header) => Rc::clone(header),
            None => {
                let header = Rc::new(self.build_header_row());
                self.header = Some(Rc::clone(&header));
                header
            }
        };

        TableView {
            class: self.styles.table.clone(),
            header,
            rows: records
                .iter()
                .map(|record| self.build_record_row(record))
                .collect(),
            indicator,
        }
    }

    fn build_header_row(&self) -> RowView {
        // Hàng tiêu đề đi qua đúng đường dựng hàng thường, với "bản ghi" mà
        // giá trị mỗi trường là chính tên trường, nên dataset của nó cũng là
        // `data-id="id"`...
        let values = Field::ALL.map(|field| (field, CellValue::Text(field.as_str().to_string())));
        let mut row = self.build_row(values);
        row.classes.push(self.styles.headers.clone());
        row
    }

    fn build_record_row(&self, record: &MovieRecord) -> RowView {
        self.build_row([
            (Field::Id, CellValue::Integer(record.id)),
            (Field::Title, CellValue::Text(record.title.clone())),
            (Field::Year, CellValue::Integer(record.year)),
            (Field::Imdb, CellValue::Float(record.imdb)),
        ])
    }

    fn build_row(&self, values: [(Field, CellValue); 4]) -> RowView {
        let mut cells = Vec::with_capacity(values.len());
        let mut data = Vec::with_capacity(values.len());

        for (field, value) in values {
            data.push((field, value.raw_text()));
            cells.push(CellView {
                classes: vec![
                    self.styles.cell.clone(),
                    self.styles.field_class(field).to_string(),
                ],
                field,
                text: decorate_cell_value(field, &value),
            });
        }

        RowView {
            classes: vec![self.styles.row.clone()],
            cells,
            data,
        }
    }
}

/// Chuỗi ghi vào phần tử chào mừng và tiêu đề tài liệu.
pub const PAGE_TITLE: &str = "Movie List";

/// Bộ chọn phần tử chào mừng trên trang chủ quản.
pub const WELCOME_SELECTOR: &str = ".welcome";

/// Đích render mà widget ghi vào, truyền từ ngoài khi khởi tạo để kiểm thử
/// không cần trang thật.
pub trait RenderTarget {
    /// Gỡ bảng cũ (nếu có) rồi gắn cây bảng mới vào cuối điểm gắn.
    fn mount_table(&mut self, view: &TableView) -> Result<(), MovieListError>;

    /// Ghi chữ vào phần tử chào mừng; thiếu phần tử là lỗi `MissingAnchor`.
    fn set_heading(&mut self, text: &str) -> Result<(), MovieListError>;

    /// Đổi tiêu đề tài liệu.
    fn set_document_title(&mut self, text: &str) -> Result<(), MovieListError>;
}

/// Thành phần trình bày trọn vòng đời danh sách phim: chuẩn hóa, dựng bảng,
/// gắn lên đích, ghi tiêu đề trang rồi chạy chu kỳ sắp xếp qua `advance`.
pub struct ListRenderer<T: RenderTarget> {
    target: T,
    builder: TableBuilder,
    cycle: SortCycle,
}

impl<T: RenderTarget> ListRenderer<T> {
    /// Khởi tạo từ dữ liệu thô: chuẩn hóa, render lần đầu và ghi tiêu đề
    /// trang.
    pub fn new(raw: &[RawMovie], styles: StyleMap, target: T) -> Result<Self, MovieListError> {
        let records = normalize_movies(raw)?;
        Self::with_records(records, styles, target)
    }

    /// Khởi tạo từ bản ghi đã chuẩn hóa sẵn.
    pub fn with_records(
        records: Vec<MovieRecord>,
        styles: StyleMap,
        mut target: T,
    ) -> Result<Self, MovieListError> {
        let mut builder = TableBuilder::new(styles);
        let cycle = SortCycle::new(records);

        let view = builder.build(cycle.records(), cycle.indicator());
        target.mount_table(&view)?;
        target.set_heading(PAGE_TITLE)?;
        target.set_document_title(PAGE_TITLE)?;

        Ok(Self {
            target,
            builder,
            cycle,
        })
    }

    /// Một bước chu kỳ: đổi thứ tự dãy, dựng lại bảng và gắn lại lên đích.
    pub fn advance(&mut self) -> Result<CycleStep, MovieListError> {
        let step = self.cycle.advance();
        let view = self.builder.build(self.cycle.records(), self.cycle.indicator());
        self.target.mount_table(&view)?;
        Ok(step)
    }

    /// Dãy bản ghi theo thứ tự hiện tại.
    pub fn records(&self) -> &[MovieRecord] {
        self.cycle.records()
    }

    /// Truy cập đích render, demo CLI dùng để đọc lại bảng vừa in.
    pub fn target(&self) -> &T {
        &self.target
    }
}

/// Nhịp của bước tăng dần: chu kỳ đổi cột mỗi 4000 ms.
pub const CYCLE_PERIOD: Duration = Duration::from_millis(4_000);

/// Bước giảm dần bắn sau bước tăng dần 2000 ms.
pub const DESCEND_DELAY: Duration = Duration::from_millis(2_000);

/// Một bước của chu kỳ sắp xếp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStep {
    /// Cột vừa sắp xếp.
    pub field: Field,
    /// Chiều của bước.
    pub direction: Direction,
    /// Thời gian bảng đứng yên trước bước kế tiếp.
    pub hold: Duration,
}

/// Máy trạng thái của chu kỳ sắp xếp, chạy bằng tick thay vì timer thật.
///
/// Mỗi bước sinh một dãy mới từ dãy hiện tại: bước tăng dần sắp xếp dãy đang
/// có theo cột kế tiếp của con trỏ, bước giảm dần đảo ngược đúng dãy đó chứ
/// không sắp xếp độc lập. Vòng lặp không có điều kiện dừng.
#[derive(Debug, Clone)]
pub struct SortCycle {
    records: Vec<MovieRecord>,
    cursor: FieldCursor,
    state: CycleState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleState {
    Idle,
    SortedUp(Field),
    SortedDown(Field),
}

impl SortCycle {
    /// Tạo chu kỳ mới ở trạng thái nghỉ, chưa cột nào được chọn.
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self {
            records,
            cursor: FieldCursor::default(),
            state: CycleState::Idle,
        }
    }

    /// Dãy bản ghi theo thứ tự hiện tại.
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Cột và chiều đang đánh dấu, nếu chu kỳ đã chạy.
    pub fn indicator(&self) -> Option<(Field, Direction)> {
        match self.state {
            CycleState::Idle => None,
            CycleState::SortedUp(field) => Some((field, Direction::Ascending)),
            CycleState::SortedDown(field) => Some((field, Direction::Descending)),
        }
    }

    /// Thực hiện một bước: sau bước tăng dần là bước giảm dần trên cùng cột,
    /// rồi con trỏ mới chuyển sang cột kế tiếp.
    pub fn advance(&mut self) -> CycleStep {
        match self.state {
            CycleState::Idle | CycleState::SortedDown(_) => {
                let field = self.cursor.advance();
                self.records = sort_ascending(&self.records, field);
                self.state = CycleState::SortedUp(field);
                CycleStep {
                    field,
                    direction: Direction::Ascending,
                    hold: DESCEND_DELAY,
                }
            }
            CycleState::SortedUp(field) => {
                self.records = reverse_order(&self.records);
                self.state = CycleState::SortedDown(field);
                CycleStep {
                    field,
                    direction: Direction::Descending,
                    hold: CYCLE_PERIOD - DESCEND_DELAY,
                }
            }
        }
    }
}

/// Lỗi chung của widget danh sách phim.
#[derive(Debug, thiserror::Error)]
pub enum MovieListError {
    /// Bản ghi thiếu trường bắt buộc.
    #[error("Bản ghi {index}: thiếu trường `{field}`")]
    MissingField { index: usize, field: Field },
    /// Không ép được giá trị về dạng số.
    #[error("Bản ghi {index}: không ép được `{value}` về dạng số cho trường `{field}`")]
    InvalidNumber {
        index: usize,
        field: Field,
        value: String,
    },
    /// Không đọc được dữ liệu đầu vào.
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    /// Trang chủ quản thiếu phần tử neo mà widget cần ghi vào.
    #[error("Không tìm thấy phần tử khớp bộ chọn `{selector}`")]
    MissingAnchor { selector: String },
    /// Lỗi từ tầng hiển thị phía dưới.
    #[error("Lỗi tầng hiển thị: {0}")]
    Target(String),
}

/// Tiện ích dựng danh sách phim mẫu (dùng cho demo/kiểm thử).
pub fn sample_movies() -> Vec<MovieRecord> {
    vec![
        MovieRecord {
            id: 22,
            title: "Побег из Шоушенка".to_string(),
            year: 1994,
            imdb: 9.3,
        },
        MovieRecord {
            id: 23,
            title: "Крёстный отец".to_string(),
            year: 1972,
            imdb: 9.2,
        },
        MovieRecord {
            id: 24,
            title: "Тёмный рыцарь".to_string(),
            year: 2008,
            imdb: 9.0,
        },
        MovieRecord {
            id: 25,
            title: "Криминальное чтиво".to_string(),
            year: 1994,
            imdb: 8.9,
        },
    ]
}
