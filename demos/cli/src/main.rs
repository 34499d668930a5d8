use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use movielist_core::{
    sample_movies, Direction, ListRenderer, MovieListError, RenderTarget, StyleMap, TableView,
};
use movielist_data::parse_movies_str;

#[derive(Parser, Debug)]
#[command(
    name = "movielist-cli",
    about = "Chạy chu kỳ sắp xếp danh sách phim và in bảng sau từng bước."
)]
struct Args {
    /// Đường dẫn tới file JSON danh sách phim; bỏ trống để dùng danh sách
    /// mẫu.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Số bước chu kỳ cần chạy.
    #[arg(short, long, default_value_t = 8)]
    steps: u32,

    /// In danh sách đã chuẩn hóa dạng JSON trước khi chạy.
    #[arg(long)]
    json: bool,
}

/// Đích render in được: giữ lại bảng dạng chữ của lần gắn gần nhất.
#[derive(Default)]
struct TextTarget {
    table: Option<String>,
    page_title: Option<String>,
}

impl RenderTarget for TextTarget {
    fn mount_table(&mut self, view: &TableView) -> Result<(), MovieListError> {
        self.table = Some(view.to_text());
        Ok(())
    }

    fn set_heading(&mut self, text: &str) -> Result<(), MovieListError> {
        self.page_title = Some(text.to_string());
        Ok(())
    }

    fn set_document_title(&mut self, text: &str) -> Result<(), MovieListError> {
        self.page_title = Some(text.to_string());
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let records = match &args.input {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {path:?}"))?;
            parse_movies_str(&data)?
        }
        None => sample_movies(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    let mut renderer =
        ListRenderer::with_records(records, StyleMap::default(), TextTarget::default())?;

    if let Some(title) = renderer.target().page_title.as_deref() {
        println!("{title}\n");
    }
    if let Some(table) = renderer.target().table.as_deref() {
        println!("{table}\n");
    }

    for _ in 0..args.steps {
        let step = renderer.advance()?;
        let direction = match step.direction {
            Direction::Ascending => "tăng dần",
            Direction::Descending => "giảm dần",
        };
        println!(
            "Cột `{}`, {direction} (giữ {} ms):",
            step.field,
            step.hold.as_millis()
        );
        if let Some(table) = renderer.target().table.as_deref() {
            println!("{table}\n");
        }
    }

    Ok(())
}
