#![allow(dead_code)]

pub mod market;
pub mod messenger;
pub mod subscribers;

use std::sync::Arc;

use klinewatch::app::Broadcaster;
use klinewatch::domain::{ChartInterval, CoinCode, PricePoint};
use klinewatch::error::Result;
use klinewatch::port::outbound::ChartRenderer;

pub use market::FakeMarket;
pub use messenger::{RecordingMessenger, Sent};
pub use subscribers::MemorySubscribers;

/// Chart renderer that returns the coin code as bytes.
#[derive(Default)]
pub struct StubChart;

impl ChartRenderer for StubChart {
    fn render(&self, code: &CoinCode, _: ChartInterval, _: &[PricePoint]) -> Result<Vec<u8>> {
        Ok(code.as_str().as_bytes().to_vec())
    }
}

/// Ports behind a broadcaster, kept for assertions.
pub struct Harness {
    pub market: Arc<FakeMarket>,
    pub subscribers: Arc<MemorySubscribers>,
    pub messenger: Arc<RecordingMessenger>,
    pub broadcaster: Broadcaster,
}

impl Harness {
    pub fn new(market: FakeMarket, subscribers: MemorySubscribers) -> Self {
        let market = Arc::new(market);
        let subscribers = Arc::new(subscribers);
        let messenger = Arc::new(RecordingMessenger::default());
        let broadcaster = Broadcaster::new(
            market.clone(),
            subscribers.clone(),
            messenger.clone(),
            Arc::new(StubChart),
        );
        Self {
            market,
            subscribers,
            messenger,
            broadcaster,
        }
    }
}
