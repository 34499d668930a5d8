//! Đọc JSON lỏng từ trang chủ quản thành danh sách `MovieRecord` đã chuẩn
//! hóa.

use movielist_core::{normalize_movies, MovieListError, MovieRecord, RawMovie};
use serde_json::Value;

/// Chuẩn hóa danh sách phim từ một chuỗi JSON.
pub fn parse_movies_str(movies_json: &str) -> Result<Vec<MovieRecord>, MovieListError> {
    let value: Value =
        serde_json::from_str(movies_json).map_err(|err| MovieListError::Parse(err.to_string()))?;
    parse_movies_value(&value)
}

/// Chuẩn hóa danh sách phim từ một `serde_json::Value`.
///
/// Đầu vào phải là mảng các object phim lỏng: trường số chấp nhận cả số JSON
/// lẫn chuỗi, trường vắng hoặc không ép được sẽ trả lỗi có kiểu kèm vị trí
/// bản ghi.
pub fn parse_movies_value(movies: &Value) -> Result<Vec<MovieRecord>, MovieListError> {
    let raw: Vec<RawMovie> = serde_json::from_value(movies.clone())
        .map_err(|err| MovieListError::Parse(err.to_string()))?;
    normalize_movies(&raw)
}
