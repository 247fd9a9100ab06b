// src/post.rs
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// 제목 키워드로 판정한 감성 라벨
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    #[serde(rename = "긍정")]
    Positive,
    #[serde(rename = "부정")]
    Negative,
    #[serde(rename = "중립")]
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "긍정",
            Sentiment::Negative => "부정",
            Sentiment::Neutral => "중립",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 목록 페이지에서 뽑은 글 하나 (필터 전)
#[derive(Clone, Debug)]
pub struct Candidate {
    pub no: String, // 글번호. 공지 글은 숫자가 아닐 수 있음
    pub title: String,
    pub link: String,
    pub posted_at: String, // 목록에 표시된 시각 문자열 그대로
    pub views: u32,
    pub replies: u32,
}

/// 브랜드 키워드에 걸린 새 글 — CSV 한 줄 + 메일 표 한 줄
#[derive(Clone, Debug, Serialize)]
pub struct BrandMatch {
    #[serde(rename = "브랜드")]
    pub brand: &'static str,
    #[serde(rename = "글번호")]
    pub no: String,
    #[serde(rename = "제목")]
    pub title: String,
    #[serde(rename = "링크")]
    pub link: String,
    #[serde(rename = "작성시간")]
    pub posted_at: String,
    #[serde(rename = "조회수")]
    pub views: u32,
    #[serde(rename = "댓글수")]
    pub replies: u32,
    #[serde(rename = "감성")]
    pub sentiment: Sentiment,
}

impl BrandMatch {
    pub fn promote(c: Candidate, brand: &'static str, sentiment: Sentiment) -> Self {
        Self {
            brand,
            no: c.no,
            title: c.title,
            link: c.link,
            posted_at: c.posted_at,
            views: c.views,
            replies: c.replies,
            sentiment,
        }
    }
}

impl fmt::Display for BrandMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {} | {} | 댓글 {} 조회 {} | {}",
            self.brand, self.sentiment, self.no, self.title, self.replies, self.views, self.link
        )
    }
}

/// 네이버 블로그/카페 검색 결과 한 건
#[derive(Clone, Debug, Serialize)]
pub struct SearchPost {
    #[serde(rename = "구분")]
    pub channel: &'static str, // "블로그" / "카페"
    #[serde(rename = "제목")]
    pub title: String,
    #[serde(rename = "링크")]
    pub link: String,
    #[serde(rename = "날짜")]
    pub date: String,
}

/// 한 번의 크롤 결과. 크롤 루프가 만들어 채운 뒤 호출자에게 돌려준다.
/// seen은 로드한 집합의 작업 사본에서 출발해 매치된 글번호만 더해진다.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub matches: Vec<BrandMatch>,
    pub seen: HashSet<String>,
}

impl CrawlOutcome {
    pub fn new(seen: HashSet<String>) -> Self {
        Self {
            matches: Vec::new(),
            seen,
        }
    }
}
