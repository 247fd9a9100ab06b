// src/mail.rs
use anyhow::{Context, Result, bail};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

const SMTP_HOST: &str = "smtp.gmail.com";

/// 발신/수신/앱 비밀번호는 전부 환경변수로 받는다.
/// 하나라도 없으면 발송을 시도하지 않고 바로 실패한다.
pub struct MailConfig {
    pub sender: String,
    pub recipients: Vec<String>,
    app_password: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            env_value("GMAIL_SENDER"),
            env_value("GMAIL_RECEIVER"),
            env_value("GMAIL_APP_PASSWORD"),
        )
    }

    fn from_values(
        sender: Option<String>,
        receivers: Option<String>,
        app_password: Option<String>,
    ) -> Result<Self> {
        let (Some(sender), Some(receivers), Some(app_password)) =
            (sender, receivers, app_password)
        else {
            bail!("GMAIL_SENDER / GMAIL_RECEIVER / GMAIL_APP_PASSWORD 환경변수가 필요합니다");
        };

        let recipients: Vec<String> = receivers
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        if recipients.is_empty() {
            bail!("GMAIL_RECEIVER에 수신 주소가 없습니다");
        }

        Ok(Self {
            sender,
            recipients,
            app_password,
        })
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// HTML 본문 하나를 발송한다. 수신자는 서로 안 보이게 숨은 참조로 넣는다.
pub fn send_html(cfg: &MailConfig, subject: &str, html: String) -> Result<()> {
    let mut builder = Message::builder()
        .from(
            cfg.sender
                .parse()
                .with_context(|| format!("발신 주소 형식 오류: {}", cfg.sender))?,
        )
        .subject(subject)
        .header(ContentType::TEXT_HTML);

    for rcpt in &cfg.recipients {
        builder = builder.bcc(
            rcpt.parse()
                .with_context(|| format!("수신 주소 형식 오류: {rcpt}"))?,
        );
    }

    let msg = builder.body(html).context("메일 본문 생성 실패")?;

    let mailer = SmtpTransport::relay(SMTP_HOST)
        .context("SMTP 설정 실패")?
        .credentials(Credentials::new(
            cfg.sender.clone(),
            cfg.app_password.clone(),
        ))
        .build();

    mailer.send(&msg).context("메일 발송 실패")?;
    Ok(())
}
