// src/theqoo.rs
use anyhow::{Context, Result};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::thread;
use std::time::Duration;
use url::Url;

use crate::brands;
use crate::post::{BrandMatch, Candidate, CrawlOutcome};

const BASE: &str = "https://theqoo.net";
const BOARD: &str = "https://theqoo.net/beauty";

/* ================= HTTP 공통 ================= */

fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
    );

    Ok(Client::builder()
        .connect_timeout(Duration::from_secs(4))
        .timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .default_headers(headers)
        .build()?)
}

fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let text = client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .with_context(|| format!("요청 실패: {url}"))?;
    Ok(text)
}

/* ================= 크롤 루프 ================= */

/// 뷰티 게시판 페이지 범위 (ENV로 조절)
pub fn page_window() -> u32 {
    std::env::var("THEQOO_PAGES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(20)
}

/// page 1..=N을 순서대로 돌면서 seen에 없는 브랜드 글만 모은다.
/// 페이지 하나가 실패해도 그 페이지만 건너뛰고 계속 간다.
pub fn crawl(seen: &HashSet<String>) -> Result<CrawlOutcome> {
    let pages = page_window();
    let delay_ms: u64 = std::env::var("CRAWL_DELAY_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);

    let client = build_client()?;
    let mut outcome = CrawlOutcome::new(seen.clone());

    for page in 1..=pages {
        let url = format!("{BOARD}?page={page}");
        match fetch_page(&client, &url) {
            Ok(html) => absorb(&mut outcome, parse_listing(&html)),
            Err(e) => eprintln!("[theqoo] page {page} skipped: {e:#}"),
        }
        thread::sleep(Duration::from_millis(delay_ms));
    }

    Ok(outcome)
}

/// seen에 있는 글은 건너뛰고, 브랜드 키워드에 걸린 글만 매치로 담는다.
/// 매치로 보고된 글번호만 seen에 들어간다. 안 걸린 글은 다음 실행에서 다시 본다.
pub fn absorb(outcome: &mut CrawlOutcome, rows: Vec<Candidate>) {
    for c in rows {
        if outcome.seen.contains(&c.no) {
            continue;
        }
        let Some(brand) = brands::detect_brand(&c.title) else {
            continue;
        };
        let sentiment = brands::detect_sentiment(&c.title);
        outcome.seen.insert(c.no.clone());
        outcome.matches.push(BrandMatch::promote(c, brand, sentiment));
    }
}

/* ================= 목록 파싱 ================= */

/// 목록 페이지 한 장에서 후보 글을 전부 뽑는다.
pub fn parse_listing(html: &str) -> Vec<Candidate> {
    let doc = Html::parse_document(html);

    let sel_row = Selector::parse("tr").unwrap();
    let sel_no = Selector::parse("td.no").unwrap();
    let sel_title = Selector::parse(".title a").unwrap();
    let sel_time = Selector::parse("td.time").unwrap();
    let sel_view = Selector::parse("td.m_no").unwrap();
    let sel_reply = Selector::parse("a.replyNum").unwrap();
    let re_num = Regex::new(r"[0-9][0-9,]*").unwrap();

    let mut out = Vec::new();
    for row in doc.select(&sel_row) {
        let Some(no) = cell_text(row, &sel_no) else {
            continue;
        };
        let Some(title_tag) = row.select(&sel_title).next() else {
            continue;
        };
        let Some(posted_at) = cell_text(row, &sel_time) else {
            continue;
        };
        let Some(views) = cell_text(row, &sel_view).and_then(|s| parse_count(&re_num, &s)) else {
            continue;
        };

        let title = norm_text(&title_tag.text().collect::<String>());
        let href = title_tag.value().attr("href").unwrap_or("").trim();
        if no.is_empty() || title.is_empty() || href.is_empty() {
            continue;
        }
        let link = match Url::parse(BASE).and_then(|u| u.join(href)) {
            Ok(u) => u.to_string(),
            Err(_) => continue,
        };

        let replies = cell_text(row, &sel_reply)
            .and_then(|s| parse_count(&re_num, &s))
            .unwrap_or(0);

        out.push(Candidate {
            no,
            title,
            link,
            posted_at,
            views,
            replies,
        });
    }
    out
}

fn cell_text(row: ElementRef<'_>, sel: &Selector) -> Option<String> {
    row.select(sel)
        .next()
        .map(|n| norm_text(&n.text().collect::<String>()))
}

/// "1,234" 같은 셀에서 숫자만 뽑는다
fn parse_count(re: &Regex, s: &str) -> Option<u32> {
    re.find(s)?.as_str().replace(',', "").parse().ok()
}

fn norm_text(s: &str) -> String {
    let t = s
        .replace('\u{00A0}', " ")
        .replace('\r', " ")
        .replace('\n', " ")
        .replace('\t', " ");
    t.split_whitespace().collect::<Vec<_>>().join(" ").trim().to_string()
}
