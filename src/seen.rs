// src/seen.rs
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// 이미 메일로 보고한 글번호 목록. 한 줄에 글번호 하나.
pub const DEFAULT_SEEN_FILE: &str = "seen_posts.txt";

/// 파일에서 글번호 집합을 읽는다. 파일이 없으면 빈 집합(첫 실행).
pub fn load(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("seen 파일 읽기 실패: {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// 집합 전체를 덮어쓴다. 숫자 글번호는 오름차순, 공지 같은 비숫자는 맨 뒤.
/// 순서는 실행 간 파일 diff 보기 좋으라고 맞출 뿐이고, 읽을 때는 순서 무관.
pub fn save(path: &Path, ids: &HashSet<String>) -> Result<()> {
    let mut sorted: Vec<&str> = ids.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| id_order(a, b));

    let mut out = String::with_capacity(sorted.len() * 8);
    for id in sorted {
        out.push_str(id);
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("seen 파일 쓰기 실패: {}", path.display()))?;
    Ok(())
}

/// 숫자끼리는 자릿수 → 사전순 비교. 숫자 크기 비교와 같으면서 파싱이 없어
/// 글번호가 아무리 길어도 오버플로할 일이 없다.
fn id_order(a: &str, b: &str) -> Ordering {
    let a_num = a.bytes().all(|c| c.is_ascii_digit());
    let b_num = b.bytes().all(|c| c.is_ascii_digit());
    match (a_num, b_num) {
        (true, true) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}
