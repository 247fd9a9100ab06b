// src/main.rs
use anyhow::Result;
use std::path::{Path, PathBuf};

mod brands;
mod export;
mod mail;
mod naver;
mod post;
mod report;
mod seen;
mod theqoo;

fn main() -> Result<()> {
    eprintln!("[start] main");

    let today = chrono::Local::now().format("%Y%m%d").to_string();
    let seen_path: PathBuf = std::env::var("SEEN_FILE")
        .unwrap_or_else(|_| seen::DEFAULT_SEEN_FILE.into())
        .into();

    // ── 1) 지난 실행까지 보고한 글번호 읽기 (파일 없으면 첫 실행)
    let seen_before = seen::load(&seen_path)?;
    eprintln!("[seen] {}건 로드", seen_before.len());

    // ── 2) 더쿠 뷰티 게시판 크롤: seen에 없는 브랜드 글만 수집
    eprintln!("[theqoo] fetching…");
    let outcome = theqoo::crawl(&seen_before)?;
    eprintln!("[theqoo] 새 매치 {}건", outcome.matches.len());

    // ── 3) seen 파일 갱신 (기존 + 이번에 보고한 글번호)
    seen::save(&seen_path, &outcome.seen)?;

    // ── 4) 매치 CSV 저장
    let csv_file = format!("theqoo_competitor_data_{today}.csv");
    export::write_csv(Path::new(&csv_file), export::MATCH_HEADERS, &outcome.matches)?;
    println!("CSV 저장 완료: {csv_file}");

    // ── 5) 브랜드별 결과 메일 (설정이 없으면 여기서 실패, 수집분은 이미 저장됨)
    let cfg = mail::MailConfig::from_env()?;
    let body = report::brand_email_body(&outcome.matches, theqoo::page_window());
    mail::send_html(
        &cfg,
        &format!("[크롤링]더쿠 게시글 크롤링 결과 - {today}"),
        body,
    )?;
    println!("메일 발송 완료");

    // ── 6) 네이버 블로그/카페 검색 (보조 수집, 채널별 실패는 개별 skip)
    eprintln!("[naver] fetching…");
    let posts = naver::collect()?;
    eprintln!("[naver] {}건", posts.len());

    let naver_csv = format!("naver_posts_{today}.csv");
    export::write_csv(Path::new(&naver_csv), export::SEARCH_HEADERS, &posts)?;
    println!("CSV 저장 완료: {naver_csv}");

    mail::send_html(
        &cfg,
        &format!("네이버 블로그/카페 크롤링 결과 - {today}"),
        report::search_email_body(&posts),
    )?;
    println!("메일 발송 완료");

    // ── 7) 콘솔 프리뷰
    println!("\n[새 매치 {}건]", outcome.matches.len());
    for m in &outcome.matches {
        println!("- {m}");
    }

    eprintln!("[done]");
    Ok(())
}
