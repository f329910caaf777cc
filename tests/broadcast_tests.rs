mod support;

use klinewatch::app::broadcast::{CONSOLIDATION_ERROR_TEXT, MOVERS_ERROR_TEXT};
use klinewatch::adapter::outbound::telegram::format::escape_markdown;
use klinewatch::domain::{Audience, ChartInterval, CoinCode};

use support::market::{consolidating, mover};
use support::messenger::FAILED_SEND_REASON;
use support::{FakeMarket, Harness, MemorySubscribers, Sent};

fn market_with_movers() -> FakeMarket {
    FakeMarket {
        movements: vec![mover(1, "BTC", 0.1), mover(2, "ETH", 5.0)],
        ..Default::default()
    }
    .with_history(30)
}

#[tokio::test]
async fn notifications_send_table_then_btc_chart() {
    let h = Harness::new(market_with_movers(), MemorySubscribers::with_chats(&[10, 20]));

    h.broadcaster.send_notifications().await.unwrap();

    for chat in [10, 20] {
        let texts = h.messenger.texts_to(chat);
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with("```"));
        assert!(texts[0].contains("ETH [2]"));
        assert!(!texts[0].contains("BTC [1]"));
        assert_eq!(h.messenger.photos_to(chat), 1);
    }

    let requests = h.market.history_requests.lock().clone();
    assert_eq!(requests, vec![(CoinCode::btc(), ChartInterval::FourHours)]);
}

#[tokio::test]
async fn notifications_skip_when_nothing_moved() {
    let market = FakeMarket {
        movements: vec![mover(1, "BTC", 0.1)],
        ..Default::default()
    };
    let h = Harness::new(market, MemorySubscribers::with_chats(&[10]));

    h.broadcaster.send_notifications().await.unwrap();

    assert!(h.messenger.sent().is_empty());
}

#[tokio::test]
async fn blocked_chat_is_disabled_and_gets_no_chart() {
    let h = Harness::new(market_with_movers(), MemorySubscribers::with_chats(&[10, 20]));
    h.messenger.block(10);

    h.broadcaster.send_notifications().await.unwrap();

    assert!(!h.subscribers.is_enabled(10));
    assert!(h.subscribers.is_enabled(20));
    assert_eq!(h.messenger.photos_to(10), 0);
    assert_eq!(h.messenger.photos_to(20), 1);
}

#[tokio::test]
async fn overlapping_pass_is_skipped() {
    let h = Harness::new(market_with_movers(), MemorySubscribers::with_chats(&[10]));

    let (first, second) = tokio::join!(
        h.broadcaster.send_notifications(),
        h.broadcaster.send_notifications()
    );
    first.unwrap();
    second.unwrap();

    assert_eq!(h.messenger.texts_to(10).len(), 1);

    h.broadcaster.send_notifications().await.unwrap();
    assert_eq!(h.messenger.texts_to(10).len(), 2);
}

#[tokio::test]
async fn failed_movers_query_reports_error_text() {
    let market = FakeMarket {
        fail_movements: true,
        ..Default::default()
    };
    let h = Harness::new(market, MemorySubscribers::with_chats(&[10]));

    let text = h.broadcaster.movers_text().await;

    assert_eq!(text, escape_markdown(MOVERS_ERROR_TEXT));
}

#[tokio::test]
async fn consolidation_goes_to_every_subscriber() {
    let market = FakeMarket {
        consolidation: vec![
            consolidating(1, "XRP", 101.0, 100.0),
            consolidating(2, "DOGE", 150.0, 100.0),
        ],
        ..Default::default()
    };
    let h = Harness::new(market, MemorySubscribers::with_chats(&[10, 20]));

    h.broadcaster.send_consolidation().await.unwrap();

    for chat in [10, 20] {
        let texts = h.messenger.texts_to(chat);
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("XRP"));
        assert!(!texts[0].contains("DOGE"));
        assert!(texts[0].contains("Coins in period consolidation"));
    }
}

#[tokio::test]
async fn consolidation_failure_sends_delivery_error() {
    let market = FakeMarket {
        consolidation: vec![consolidating(1, "XRP", 101.0, 100.0)],
        ..Default::default()
    };
    let h = Harness::new(market, MemorySubscribers::with_chats(&[10, 20]));
    let report = h.broadcaster.consolidation_text().await;
    h.messenger.fail_text(&report);
    h.messenger.block(20);

    h.broadcaster.send_consolidation().await.unwrap();

    assert_eq!(
        h.messenger.texts_to(10),
        vec![escape_markdown(FAILED_SEND_REASON)]
    );
    assert!(!h.subscribers.is_enabled(20));
}

#[tokio::test]
async fn failed_consolidation_query_is_still_delivered_as_error() {
    let market = FakeMarket {
        fail_consolidation: true,
        ..Default::default()
    };
    let h = Harness::new(market, MemorySubscribers::with_chats(&[10]));

    h.broadcaster.send_consolidation().await.unwrap();

    assert_eq!(
        h.messenger.texts_to(10),
        vec![escape_markdown(CONSOLIDATION_ERROR_TEXT)]
    );
}

#[tokio::test]
async fn chart_goes_only_to_the_target_chat() {
    let h = Harness::new(
        FakeMarket::default().with_history(5),
        MemorySubscribers::with_chats(&[10, 20]),
    );

    h.broadcaster
        .send_chart(Audience::Chat(20), CoinCode::new("eth"), ChartInterval::OneHour)
        .await
        .unwrap();

    assert_eq!(h.messenger.sent(), vec![Sent::Photo(20, b"ETH".to_vec())]);
}

#[tokio::test]
async fn chart_without_history_sends_nothing() {
    let h = Harness::new(FakeMarket::default(), MemorySubscribers::with_chats(&[10]));

    h.broadcaster
        .send_chart(Audience::Everyone, CoinCode::btc(), ChartInterval::TenMinutes)
        .await
        .unwrap();

    assert!(h.messenger.sent().is_empty());
}
