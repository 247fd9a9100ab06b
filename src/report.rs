// src/report.rs
use chrono::{FixedOffset, Utc};

use crate::brands;
use crate::post::{BrandMatch, SearchPost};

const MAX_TITLE_LEN: usize = 50;

const TABLE_OPEN: &str = r#"<table border="1" cellpadding="5" cellspacing="0" style="border-collapse: collapse; width: 100%;">"#;

/// 브랜드별로 묶은 매치 표. 매치가 없으면 안내 문단 하나만.
pub fn brand_email_body(matches: &[BrandMatch], pages: u32) -> String {
    if matches.is_empty() {
        return "<p>이번에 크롤링된 게시글이 없습니다.</p>".to_string();
    }

    let mut body = format!(
        "\
    <p>더쿠 게시글 크롤링 결과</p>\n\
    <p><small>-. 크롤링 기준: 더쿠 뷰티 게시판 page 1~{pages}, {} (한국시간)</small></p>\n\
    <p><small>-. 참고: 다수 브랜드 언급 시 한 브랜드 결과값에만 노출됩니다 (상위 표 기준으로 노출)</small></p>\n",
        kst_now_stamp()
    );

    for brand in brands::display_order() {
        let rows: Vec<&BrandMatch> = matches.iter().filter(|m| m.brand == brand).collect();
        if rows.is_empty() {
            continue;
        }

        body.push_str(&format!("<h3>{brand}</h3>\n"));
        body.push_str(TABLE_OPEN);
        body.push_str(
            "\n<tr>\
             <th>글번호</th><th>제목</th><th>댓글수</th><th>조회수</th>\
             <th>감성</th><th>작성시간</th><th>링크</th>\
             </tr>\n",
        );
        for m in rows {
            body.push_str(&format!(
                "<tr>\
                 <td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td>{}</td><td>{}</td><td><a href=\"{}\">바로가기</a></td>\
                 </tr>\n",
                m.no,
                shorten(&m.title),
                m.replies,
                m.views,
                m.sentiment,
                m.posted_at,
                m.link
            ));
        }
        body.push_str("</table><br>\n");
    }

    body
}

/// 네이버 블로그/카페 결과 표 하나짜리 본문
pub fn search_email_body(posts: &[SearchPost]) -> String {
    if posts.is_empty() {
        return "<p>오늘 수집된 데이터가 없습니다.</p>".to_string();
    }

    let mut body = String::from("<p>오늘 네이버 블로그 & 카페 게시글</p>\n");
    body.push_str(TABLE_OPEN);
    body.push_str("\n<tr><th>구분</th><th>제목</th><th>날짜</th><th>링크</th></tr>\n");
    for p in posts {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><a href=\"{}\">바로가기</a></td></tr>\n",
            p.channel,
            shorten(&p.title),
            p.date,
            p.link
        ));
    }
    body.push_str("</table>\n");
    body
}

/// 50자 넘는 제목은 잘라서 말줄임표를 붙인다. 바이트가 아니라 글자 기준.
fn shorten(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_LEN {
        let cut: String = title.chars().take(MAX_TITLE_LEN).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}

fn kst_now_stamp() -> String {
    let kst = FixedOffset::east_opt(9 * 3600).unwrap();
    Utc::now()
        .with_timezone(&kst)
        .format("%Y-%m-%d %H:%M 기준")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Sentiment;

    fn sample(brand: &'static str, no: &str, title: &str) -> BrandMatch {
        BrandMatch {
            brand,
            no: no.to_string(),
            title: title.to_string(),
            link: format!("https://theqoo.net/beauty/{no}"),
            posted_at: "10:15".to_string(),
            views: 100,
            replies: 3,
            sentiment: Sentiment::Neutral,
        }
    }

    #[test]
    fn empty_matches_give_notice_paragraph() {
        assert_eq!(
            brand_email_body(&[], 20),
            "<p>이번에 크롤링된 게시글이 없습니다.</p>"
        );
    }

    #[test]
    fn brands_appear_in_display_order() {
        // 입력 순서는 디올 먼저, 표 순서는 로라메르시에가 먼저여야 한다
        let matches = vec![sample("디올", "2", "디올 립밤"), sample("로라메르시에", "1", "로라 파우더")];
        let body = brand_email_body(&matches, 20);

        let laura = body.find("<h3>로라메르시에</h3>").unwrap();
        let dior = body.find("<h3>디올</h3>").unwrap();
        assert!(laura < dior);
        // 매치 없는 브랜드 표는 만들지 않는다
        assert!(!body.contains("<h3>샤넬</h3>"));
    }

    #[test]
    fn long_titles_are_cut_at_fifty_chars() {
        let long = "가".repeat(60);
        let matches = vec![sample("샤넬", "9", &long)];
        let body = brand_email_body(&matches, 20);

        let expected = format!("{}...", "가".repeat(50));
        assert!(body.contains(&expected));
        assert!(!body.contains(&long));
    }

    #[test]
    fn short_titles_stay_intact() {
        assert_eq!(shorten("짧은 제목"), "짧은 제목");
        let exactly_fifty = "b".repeat(50);
        assert_eq!(shorten(&exactly_fifty), exactly_fifty);
    }

    #[test]
    fn rows_carry_sentiment_label_and_link() {
        let mut m = sample("나스", "77", "나스 블러셔");
        m.sentiment = Sentiment::Positive;
        let body = brand_email_body(&[m], 20);

        assert!(body.contains("<td>긍정</td>"));
        assert!(body.contains(r#"<a href="https://theqoo.net/beauty/77">바로가기</a>"#));
    }

    #[test]
    fn search_body_lists_both_channels() {
        let posts = vec![
            SearchPost {
                channel: "블로그",
                title: "파우더 후기".to_string(),
                link: "https://blog.naver.com/p/1".to_string(),
                date: "어제".to_string(),
            },
            SearchPost {
                channel: "카페",
                title: "카페 글".to_string(),
                link: "https://cafe.naver.com/p/2".to_string(),
                date: "".to_string(),
            },
        ];
        let body = search_email_body(&posts);
        assert!(body.contains("<td>블로그</td>"));
        assert!(body.contains("<td>카페</td>"));
    }

    #[test]
    fn empty_search_gives_notice_paragraph() {
        assert_eq!(search_email_body(&[]), "<p>오늘 수집된 데이터가 없습니다.</p>");
    }
}
