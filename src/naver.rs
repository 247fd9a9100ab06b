// src/naver.rs
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::thread;
use std::time::Duration;

use crate::post::SearchPost;

/// 로라 메르시에, 최근 1일, 최신순
const BLOG_URL: &str = "https://search.naver.com/search.naver?ssc=tab.blog.all&query=로라%20메르시에&sm=tab_opt&nso=so%3Add%2Cp%3A1d";
const CAFE_URL: &str = "https://search.naver.com/search.naver?cafe_where=articleg&date_option=2&nso_open=1&prdtype=0&query=로라+메르시에&sm=mtb_opt&ssc=tab.cafe.all&st=date&stnm=date&opt_tab=0&nso=so%3Add%2Cp%3A1d";

fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64)")
        .timeout(Duration::from_secs(10))
        .build()?)
}

/// 블로그 → 카페 순서로 훑는다. 한쪽이 실패해도 그 채널만 비우고 계속 간다.
pub fn collect() -> Result<Vec<SearchPost>> {
    let client = build_client()?;
    let mut out = Vec::new();

    match fetch(&client, BLOG_URL) {
        Ok(html) => out.extend(parse_results(&html, "블로그")),
        Err(e) => eprintln!("[naver] 블로그 검색 skipped: {e:#}"),
    }

    thread::sleep(Duration::from_millis(1000));

    match fetch(&client, CAFE_URL) {
        Ok(html) => out.extend(parse_results(&html, "카페")),
        Err(e) => eprintln!("[naver] 카페 검색 skipped: {e:#}"),
    }

    Ok(out)
}

fn fetch(client: &Client, url: &str) -> Result<String> {
    let text = client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .with_context(|| format!("요청 실패: {url}"))?;
    Ok(text)
}

/// 검색 결과 블록에서 제목/링크/날짜를 뽑는다. 날짜가 없으면 빈 문자열.
pub fn parse_results(html: &str, channel: &'static str) -> Vec<SearchPost> {
    let doc = Html::parse_document(html);

    let sel_item = Selector::parse(".api_subject_bx").unwrap();
    let sel_title = Selector::parse(".api_txt_lines.total_tit").unwrap();
    let sel_date = Selector::parse(".sub_time").unwrap();

    let mut out = Vec::new();
    for item in doc.select(&sel_item) {
        let Some(title_tag) = item.select(&sel_title).next() else {
            continue;
        };
        let title = clean(&title_tag.text().collect::<String>());
        let Some(link) = title_tag.value().attr("href") else {
            continue;
        };
        if title.is_empty() || link.is_empty() {
            continue;
        }
        let date = item
            .select(&sel_date)
            .next()
            .map(|d| clean(&d.text().collect::<String>()))
            .unwrap_or_default();

        out.push(SearchPost {
            channel,
            title,
            link: link.to_string(),
            date,
        });
    }
    out
}

fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_block(title: &str, href: &str, date: Option<&str>) -> String {
        let date_tag = date
            .map(|d| format!(r#"<span class="sub_time">{d}</span>"#))
            .unwrap_or_default();
        format!(
            r#"<div class="api_subject_bx">
                <a class="api_txt_lines total_tit" href="{href}">{title}</a>
                {date_tag}
            </div>"#
        )
    }

    #[test]
    fn search_blocks_become_posts() {
        let html = format!(
            "<div>{}{}</div>",
            result_block("로라 메르시에 파우더 후기", "https://blog.naver.com/p/1", Some("어제")),
            result_block("세팅 파우더 비교", "https://blog.naver.com/p/2", None),
        );
        let posts = parse_results(&html, "블로그");

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].channel, "블로그");
        assert_eq!(posts[0].title, "로라 메르시에 파우더 후기");
        assert_eq!(posts[0].link, "https://blog.naver.com/p/1");
        assert_eq!(posts[0].date, "어제");
        assert_eq!(posts[1].date, "");
    }

    #[test]
    fn blocks_without_title_link_are_dropped() {
        let html = r#"<div class="api_subject_bx"><span>광고 블록</span></div>"#;
        assert!(parse_results(html, "카페").is_empty());
    }
}
