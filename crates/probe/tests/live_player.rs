//! Live player behavior
//!
//! Requires a WebDriver server (chromedriver on :4444 by default) and a page
//! embedding the player:
//!
//! ```text
//! EMBEDPROBE_URL=https://example.com/embed.html \
//!     cargo test --package embedprobe --test live_player -- --ignored
//! ```
//! `EMBEDPROBE_WEBDRIVER` points at a different WebDriver endpoint and
//! `EMBEDPROBE_MUTED_URL` at a page configured with auto-mute.

use embedprobe::config::URL_ENV;
use embedprobe::webdriver::WebDriverConfig;
use embedprobe::{PlayerHandle, ProbeConfig, WebDriverSession};

fn live_config(url_var: &str) -> Option<ProbeConfig> {
    let url = match std::env::var(url_var) {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping: {url_var} not set");
            return None;
        }
    };

    let mut config = ProbeConfig::new(url);
    config.webdriver = WebDriverConfig {
        headless: true,
        ..Default::default()
    };
    if let Ok(endpoint) = std::env::var("EMBEDPROBE_WEBDRIVER") {
        config.webdriver.endpoint = endpoint;
    }
    Some(config)
}

#[tokio::test]
#[ignore]
async fn player_auto_plays_with_audio() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let Some(config) = live_config(URL_ENV) else {
        return;
    };

    let session = WebDriverSession::connect(&config.webdriver)
        .await
        .expect("connect to WebDriver");
    let result = async {
        let mut player = PlayerHandle::build_with(
            &config.url,
            &session,
            &config.navigator,
            config.extractor.clone(),
        )
        .await?;

        let playing = player.refresh().await?.is_playing;
        let volume = player.refresh().await?.volume.unwrap_or_default();
        Ok::<_, embedprobe::ProbeError>((playing, volume))
    }
    .await;
    session.close().await.expect("close session");

    let (playing, volume) = result.expect("probe player");
    assert_eq!(playing, Some(true), "player should auto play");
    assert!(volume > 0.0, "player should play with audio, volume={volume}");
}

#[tokio::test]
#[ignore]
async fn auto_muted_player_plays_without_audio() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let Some(config) = live_config("EMBEDPROBE_MUTED_URL") else {
        return;
    };

    let session = WebDriverSession::connect(&config.webdriver)
        .await
        .expect("connect to WebDriver");
    let result = async {
        let mut player = PlayerHandle::build(&config.url, &session).await?;
        let snapshot = player.refresh().await?.clone();
        Ok::<_, embedprobe::ProbeError>(snapshot)
    }
    .await;
    session.close().await.expect("close session");

    let snapshot = result.expect("probe player");
    assert_eq!(snapshot.is_muted, Some(true));
    assert_eq!(snapshot.volume, Some(0.0));
}

#[tokio::test]
#[ignore]
async fn page_without_player_frame_times_out() {
    let Some(mut config) = live_config(URL_ENV) else {
        return;
    };
    config.webdriver.wait_timeout_ms = Some(3000);
    config.navigator.frame_selector = "iframe.does-not-exist".to_string();

    let session = WebDriverSession::connect(&config.webdriver)
        .await
        .expect("connect to WebDriver");
    let result = PlayerHandle::build_with(
        &config.url,
        &session,
        &config.navigator,
        config.extractor.clone(),
    )
    .await
    .map(|_| ());
    session.close().await.expect("close session");

    let err = result.expect_err("build should fail without the frame");
    assert!(err.is_locate_timeout(), "unexpected error: {err}");
}
