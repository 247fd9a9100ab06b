// src/export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 엑셀에서 바로 열리도록 UTF-8 BOM(utf-8-sig)을 붙인다
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// 매치 CSV 열 순서. 라벨까지 그대로 유지해야 기존 시트와 호환된다.
pub const MATCH_HEADERS: &[&str] = &[
    "브랜드", "글번호", "제목", "링크", "작성시간", "조회수", "댓글수", "감성",
];

pub const SEARCH_HEADERS: &[&str] = &["구분", "제목", "링크", "날짜"];

/// 행이 하나도 없어도 헤더는 항상 쓴다.
pub fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("CSV 생성 실패: {}", path.display()))?;
    file.write_all(BOM)?;

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
